use std::fmt;

use super::context::Selection;
use super::event::Callback;
use crate::grid::MonthStep;

/// Work to run after the next render, never inline with the transition
pub enum Deferred {
    /// Deliver the committed value to the consumer's `on_change`
    Notify(Selection),
    /// Run the caller's completion hook
    Callback(Callback),
}

/// Side effects returned by the reducer alongside the new context
pub enum Effect {
    None,
    /// Move the grid cursor; executed synchronously by the runtime
    Navigate(MonthStep),
    Deferred(Deferred),
    Batch(Vec<Effect>),
}

impl Effect {
    /// Flatten nested batches into a list, dropping `None`
    pub fn into_vec(self) -> Vec<Effect> {
        match self {
            Effect::None => Vec::new(),
            Effect::Batch(effects) => effects.into_iter().flat_map(Effect::into_vec).collect(),
            other => vec![other],
        }
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deferred::Notify(selection) => f.debug_tuple("Notify").field(selection).finish(),
            Deferred::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::None => f.write_str("None"),
            Effect::Navigate(step) => f.debug_tuple("Navigate").field(step).finish(),
            Effect::Deferred(deferred) => f.debug_tuple("Deferred").field(deferred).finish(),
            Effect::Batch(effects) => f.debug_tuple("Batch").field(effects).finish(),
        }
    }
}
