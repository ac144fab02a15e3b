//! Selection state machine and the runtime that drives it
//!
//! `reduce` is the pure transition function. `DatePicker` owns one context,
//! one grid and the deferred effect queue.

pub mod context;
pub mod effect;
pub mod event;
pub mod reducer;
pub mod runtime;

pub use context::{DateRange, Selection, SelectionContext, SelectionMode, SelectionState};
pub use effect::{Deferred, Effect};
pub use event::{Callback, Event};
pub use reducer::reduce;
pub use runtime::{DatePicker, OnChange};
