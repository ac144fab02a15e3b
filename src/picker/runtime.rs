use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::context::{Selection, SelectionContext, SelectionMode};
use super::effect::{Deferred, Effect};
use super::event::Event;
use super::reducer::reduce;
use crate::grid::{CalendarGrid, MonthStep, Week};

/// Consumer hook receiving each committed selection
pub type OnChange = Box<dyn FnMut(Selection) + Send>;

/// One date picker instance
///
/// Owns the selection context, the grid cursor and the queue of deferred
/// effects. `dispatch` runs the reducer and executes navigation right away;
/// notifications and completion callbacks wait in the queue until
/// `process_deferred` is called on a later turn of the event loop.
pub struct DatePicker {
    mode: SelectionMode,
    context: SelectionContext,
    grid: CalendarGrid,
    on_change: OnChange,
    deferred_tx: mpsc::UnboundedSender<Deferred>,
    deferred_rx: mpsc::UnboundedReceiver<Deferred>,
}

impl DatePicker {
    pub fn new(mode: SelectionMode, grid: CalendarGrid, on_change: OnChange) -> Self {
        let (deferred_tx, deferred_rx) = mpsc::unbounded_channel();
        Self {
            mode,
            context: SelectionContext::default(),
            grid,
            on_change,
            deferred_tx,
            deferred_rx,
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn context(&self) -> &SelectionContext {
        &self.context
    }

    pub fn grid(&self) -> &CalendarGrid {
        &self.grid
    }

    pub fn weeks(&self) -> &[Week] {
        self.grid.weeks()
    }

    pub fn go_to_previous_month(&mut self) {
        self.grid.go_to_previous_month();
    }

    pub fn go_to_next_month(&mut self) {
        self.grid.go_to_next_month();
    }

    pub fn go_to_today(&mut self) {
        self.grid.go_to_today();
    }

    /// Run one event through the reducer and execute its effects
    pub fn dispatch(&mut self, event: Event) {
        trace!("PICKER: Dispatching {:?}", event);

        let context = std::mem::take(&mut self.context);
        let (new_context, effect) = reduce(context, event, self.mode, self.grid.cursor());
        self.context = new_context;

        self.execute_effect(effect);
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Navigate(step) => {
                debug!("EFFECT: Navigating {:?}", step);
                match step {
                    MonthStep::Previous => self.grid.go_to_previous_month(),
                    MonthStep::Next => self.grid.go_to_next_month(),
                }
            }
            Effect::Deferred(deferred) => {
                trace!("EFFECT: Queueing {:?}", deferred);
                // the receiver lives in self, so the send cannot fail
                let _ = self.deferred_tx.send(deferred);
            }
            Effect::Batch(effects) => {
                for e in effects {
                    self.execute_effect(e);
                }
            }
        }
    }

    /// Whether deferred work is waiting for the next turn
    pub fn has_pending(&self) -> bool {
        !self.deferred_rx.is_empty()
    }

    /// Run every queued notification and callback, in the order queued
    ///
    /// Returns the number of deferred effects executed.
    pub fn process_deferred(&mut self) -> usize {
        let mut count = 0;
        while let Ok(deferred) = self.deferred_rx.try_recv() {
            match deferred {
                Deferred::Notify(selection) => {
                    debug!("EFFECT: Notifying consumer of {}", selection);
                    (self.on_change)(selection);
                }
                Deferred::Callback(callback) => {
                    debug!("EFFECT: Running completion callback");
                    callback();
                }
            }
            count += 1;
        }
        count
    }
}

impl std::fmt::Debug for DatePicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatePicker")
            .field("mode", &self.mode)
            .field("context", &self.context)
            .field("grid", &self.grid)
            .finish_non_exhaustive()
    }
}
