/// Pointer event to picker event mapping
///
/// Translates crossterm mouse events over the calendar panel into selection
/// events (`Click`, `HoverEnter`) or header navigation. Hover is reported
/// once per cell entered, not on every motion inside a cell.
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use tracing::trace;

use crate::grid::CalendarGrid;
use crate::picker::{Callback, Event};
use crate::tui::layout::{PanelLayout, Target};

/// Outcome of routing one pointer event
#[derive(Debug)]
pub enum Routed {
    Picker(Event),
    PreviousMonth,
    NextMonth,
    Today,
}

#[derive(Debug, Default)]
pub struct InteractionRouter {
    /// Key of the day cell under the pointer
    hovered: Option<String>,
}

impl InteractionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the hovered cell (panel closed or grid replaced)
    pub fn reset(&mut self) {
        self.hovered = None;
    }

    /// Map a mouse event to a picker event or navigation request
    ///
    /// `on_committed` builds the completion hook threaded through clicks.
    pub fn route(
        &mut self,
        mouse: &MouseEvent,
        layout: &PanelLayout,
        grid: &CalendarGrid,
        on_committed: &dyn Fn() -> Callback,
    ) -> Option<Routed> {
        let target = layout.hit_test(mouse.column, mouse.row, grid);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => match target? {
                Target::PreviousMonth => Some(Routed::PreviousMonth),
                Target::NextMonth => Some(Routed::NextMonth),
                Target::Today => Some(Routed::Today),
                Target::Day(week, weekday) => {
                    let day = grid.weeks()[week].days[weekday].clone();
                    trace!("ROUTER: Click on {}", day.key);
                    Some(Routed::Picker(Event::Click(day, on_committed())))
                }
            },
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let Some(Target::Day(week, weekday)) = target else {
                    self.hovered = None;
                    return None;
                };
                let day = grid.weeks()[week].days[weekday].clone();
                if self.hovered.as_deref() == Some(day.key.as_str()) {
                    return None;
                }
                trace!("ROUTER: Pointer entered {}", day.key);
                self.hovered = Some(day.key.clone());
                Some(Routed::Picker(Event::HoverEnter(day)))
            }
            _ => None,
        }
    }
}
