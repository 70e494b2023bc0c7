//! Emitter implementation.
//!
//! Provides:
//! - Subscription management over a namespace listener tree
//! - Per-event declarations (bubbling/cancelable metadata)
//! - Synchronous dispatch with wildcard listeners, cooperative
//!   cancellation, and bubbling to an optional parent emitter

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::context::{EventContext, Flow};
use crate::declaration::EventDeclaration;
use crate::listener::{ListenerId, Registration};
use crate::namespace::ListenerTree;

struct EmitterInner {
    /// Root of the namespace listener tree.
    tree: ListenerTree,
    /// Declared events, keyed by exact event name.
    events: RefCell<HashMap<String, EventDeclaration>>,
    /// Bubbling target. Weak: linking under a parent must not keep it alive.
    parent: RefCell<Option<Weak<EmitterInner>>>,
}

/// Addressable publish/listen unit.
///
/// `Emitter` is a cheap `Clone` handle; clones address the same listener
/// tree and declarations. Dispatch runs to completion on the calling thread
/// before `emit` returns, and listeners may re-enter the emitter freely
/// (subscribe, unsubscribe, or emit again) while a dispatch is in flight.
#[derive(Clone)]
pub struct Emitter {
    inner: Rc<EmitterInner>,
}

impl Emitter {
    /// Create an emitter with no declared events.
    pub fn new() -> Self {
        Self::with_events(HashMap::new())
    }

    /// Create an emitter with an initial set of event declarations.
    pub fn with_events(events: HashMap<String, EventDeclaration>) -> Self {
        Self {
            inner: Rc::new(EmitterInner {
                tree: ListenerTree::new(),
                events: RefCell::new(events),
                parent: RefCell::new(None),
            }),
        }
    }

    /// Upsert the declaration for an exact event name.
    ///
    /// Dispatches already in flight keep the declaration they started with.
    pub fn declare_event(&self, name: impl Into<String>, declaration: EventDeclaration) {
        self.inner
            .events
            .borrow_mut()
            .insert(name.into(), declaration);
    }

    /// Link this emitter under `parent` as its bubbling target, or unlink
    /// with `None`. The link does not keep the parent alive.
    pub fn set_parent_emitter(&self, parent: Option<&Emitter>) {
        *self.inner.parent.borrow_mut() = parent.map(|p| Rc::downgrade(&p.inner));
    }

    /// The current parent emitter, if one was set and is still alive.
    pub fn get_parent_emitter(&self) -> Option<Emitter> {
        self.inner
            .parent
            .borrow()
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|inner| Emitter { inner })
    }

    /// Register `listener` under `name`, creating namespace nodes as
    /// needed. Returns the handle used for removal.
    ///
    /// Duplicate registrations are permitted: the same closure registered
    /// twice fires twice and is removed one handle at a time.
    pub fn add_event_listener<F>(&self, name: &str, listener: F, once: bool) -> ListenerId
    where
        F: Fn(&mut EventContext, &[&dyn Any]) -> Flow + 'static,
    {
        let registration = Registration::new(Rc::new(listener), once);
        let id = registration.id();
        let node = self.inner.tree.ensure(name.split('.'));
        node.borrow_mut().push_listener(registration);
        tracing::debug!("Listener {} added for {:?}", id, name);
        id
    }

    /// Register a listener. Alias of [`add_event_listener`] with
    /// `once = false`.
    ///
    /// [`add_event_listener`]: Emitter::add_event_listener
    pub fn on<F>(&self, name: &str, listener: F) -> ListenerId
    where
        F: Fn(&mut EventContext, &[&dyn Any]) -> Flow + 'static,
    {
        self.add_event_listener(name, listener, false)
    }

    /// Register a listener that is removed right after its first
    /// invocation.
    pub fn once<F>(&self, name: &str, listener: F) -> ListenerId
    where
        F: Fn(&mut EventContext, &[&dyn Any]) -> Flow + 'static,
    {
        self.add_event_listener(name, listener, true)
    }

    /// Remove a listener registered under `name`.
    ///
    /// With a handle, removes that registration only. With `None`, clears
    /// every listener at exactly `name` while descendant namespaces keep
    /// theirs. Removing from a path that was never subscribed is a no-op.
    ///
    /// Returns whether anything was removed.
    pub fn remove_event_listener(&self, name: &str, listener: Option<ListenerId>) -> bool {
        let Some(node) = self.inner.tree.resolve(name.split('.')) else {
            return false;
        };
        let removed = match listener {
            Some(id) => node.borrow_mut().remove_listener(id),
            None => node.borrow_mut().clear_listeners(),
        };
        if removed {
            tracing::debug!("Listener(s) removed from {:?}", name);
        }
        removed
    }

    /// Alias of [`remove_event_listener`](Emitter::remove_event_listener).
    pub fn off(&self, name: &str, listener: Option<ListenerId>) -> bool {
        self.remove_event_listener(name, listener)
    }

    /// Every registration an emission of `name` would fire, in dispatch
    /// order: `name`'s node and its descendants shallow-first, then
    /// wildcard registrations.
    pub fn get_listeners(&self, name: &str) -> Vec<Registration> {
        self.inner
            .tree
            .collect(name)
            .into_iter()
            .map(|(_, registration)| registration)
            .collect()
    }

    /// Number of registrations an emission of `name` would fire.
    pub fn listener_count(&self, name: &str) -> usize {
        self.get_listeners(name).len()
    }

    /// Emit `name` with positional arguments.
    ///
    /// Builds the [`EventContext`] from this emitter's declaration for
    /// `name` (defaults apply when undeclared), fires matching listeners in
    /// order, then bubbles to the parent emitter when declared bubbling and
    /// not stopped. Fire-and-forget: emitting a name nobody listens to is
    /// not an error.
    ///
    /// A panicking listener is not caught; the panic aborts the remainder
    /// of the dispatch and unwinds to the caller.
    pub fn emit(&self, name: &str, args: &[&dyn Any]) {
        let declaration = self
            .inner
            .events
            .borrow()
            .get(name)
            .copied()
            .unwrap_or_default();
        tracing::trace!("Emitting {:?} ({} args)", name, args.len());
        let mut context = EventContext::new(self.clone(), name, declaration);
        self.dispatch(&mut context, args);
    }

    /// One level of dispatch, re-entered per bubble step with the same
    /// context and arguments.
    fn dispatch(&self, context: &mut EventContext, args: &[&dyn Any]) {
        // Snapshot first: listeners may unsubscribe, subscribe, or emit
        // re-entrantly while the loop runs, and `once` removal below
        // mutates the live lists.
        let matched = self.inner.tree.collect(context.name());
        for (owner, registration) in matched {
            let flow = registration.invoke(context, args);
            if registration.is_once() {
                owner.borrow_mut().remove_listener(registration.id());
            }
            if context.is_cancelable() && (flow == Flow::Cancel || context.is_cancelled()) {
                tracing::trace!("Dispatch of {:?} cancelled", context.name());
                return;
            }
        }
        if context.is_bubbling() && !context.is_stopped() {
            if let Some(parent) = self.get_parent_emitter() {
                parent.dispatch(context, args);
            }
        }
    }

    /// Whether two handles address the same emitter.
    pub fn ptr_eq(&self, other: &Emitter) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Emitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("declared_events", &self.inner.events.borrow().len())
            .field("has_parent", &self.get_parent_emitter().is_some())
            .finish()
    }
}
