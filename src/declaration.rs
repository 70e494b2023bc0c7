//! Static per-event metadata.

use serde::{Deserialize, Serialize};

fn default_cancelable() -> bool {
    true
}

/// Declared behavior of one event name.
///
/// Declarations are looked up by exact event name (not namespace-aware)
/// when the event is emitted. Undeclared events behave as
/// [`EventDeclaration::default`]: non-bubbling, cancelable.
///
/// Partial declarations deserialize with the same defaults, so
/// `{"bubbling": true}` yields a cancelable bubbling event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDeclaration {
    /// Whether the event re-dispatches to the parent emitter after all
    /// listeners at the current level have run.
    #[serde(default)]
    pub bubbling: bool,
    /// Whether a listener can halt the dispatch.
    #[serde(default = "default_cancelable")]
    pub cancelable: bool,
}

impl Default for EventDeclaration {
    fn default() -> Self {
        Self {
            bubbling: false,
            cancelable: true,
        }
    }
}
