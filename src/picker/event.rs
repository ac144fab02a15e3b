use std::fmt;

use crate::grid::CalendarDay;

/// Completion hook supplied by the caller with a click (e.g. close the panel)
pub type Callback = Box<dyn FnOnce() + Send>;

/// Day-cell interactions understood by the selection reducer
///
/// The set is closed: adding a kind means updating every `match` on it.
pub enum Event {
    /// Pointer click on a day cell, with the hook to run if the click commits
    Click(CalendarDay, Callback),
    /// Pointer entered a day cell
    HoverEnter(CalendarDay),
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Click(day, _) => f.debug_tuple("Click").field(&day.key).finish(),
            Event::HoverEnter(day) => f.debug_tuple("HoverEnter").field(&day.key).finish(),
        }
    }
}
