//! Listener identity and registration records.
//!
//! A listener is registered against one namespace node and identified by the
//! [`ListenerId`] handle returned at registration time. The handle is the
//! unit of removal: the same closure registered twice yields two handles,
//! each independently removable and independently triggered.

use std::any::Any;
use std::rc::Rc;

use uuid::Uuid;

use crate::context::{EventContext, Flow};

/// Handle identifying one listener registration.
///
/// Pass it back to
/// [`Emitter::remove_event_listener`](crate::Emitter::remove_event_listener)
/// to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

impl ListenerId {
    /// Create a new unique listener ID
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listener({})", &self.0.to_string()[..8])
    }
}

/// Type alias for listener callback functions
pub type ListenerFn = Rc<dyn Fn(&mut EventContext, &[&dyn Any]) -> Flow>;

/// A single listener registration, owned by exactly one namespace node.
///
/// Cloning shares the underlying callback and keeps the same identity and
/// flags.
#[derive(Clone)]
pub struct Registration {
    callback: ListenerFn,
    id: ListenerId,
    once: bool,
}

impl Registration {
    pub(crate) fn new(callback: ListenerFn, once: bool) -> Self {
        Self {
            callback,
            id: ListenerId::new(),
            once,
        }
    }

    /// The handle identifying this registration.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Whether the registration is removed after its first invocation.
    pub fn is_once(&self) -> bool {
        self.once
    }

    pub(crate) fn invoke(&self, context: &mut EventContext, args: &[&dyn Any]) -> Flow {
        (self.callback)(context, args)
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("id", &self.id)
            .field("callback", &"<callback>")
            .field("once", &self.once)
            .finish()
    }
}
