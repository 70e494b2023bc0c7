//! # TreeBus
//!
//! Hierarchical, namespaced, in-process event dispatch.
//! Provides the fundamental pieces for publish/listen wiring inside a
//! single thread:
//! - Dotted event names indexed by a namespace tree, so emitting a path
//!   fires the listeners of that path and of every sub-namespace below it
//! - Wildcard (`:all`) listeners that observe every emission
//! - Parent-emitter bubbling with cooperative cancellation
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use treebus::{Emitter, Flow};
//!
//! let machine = Emitter::new();
//!
//! let seen = Rc::new(Cell::new(0));
//! let tally = Rc::clone(&seen);
//! machine.on("state.changed", move |_context, _args| {
//!     tally.set(tally.get() + 1);
//!     Flow::Continue
//! });
//!
//! machine.emit("state", &[]);          // fires the whole "state" subtree
//! machine.emit("state.changed", &[]);  // fires the exact path
//! machine.emit("state.restored", &[]); // sibling path, no match
//! assert_eq!(seen.get(), 2);
//! ```
//!
//! Dispatch is fully synchronous and strictly local to the calling thread;
//! `Emitter` is a cheap `Clone` handle and intentionally `!Send`.

pub mod context;
pub mod declaration;
pub mod emitter;
pub mod listener;
mod namespace;

pub use context::{EventContext, Flow};
pub use declaration::EventDeclaration;
pub use emitter::Emitter;
pub use listener::{ListenerFn, ListenerId, Registration};

/// Reserved event name whose listeners fire on every emission of their
/// emitter, after all name-matched listeners.
pub const WILDCARD: &str = ":all";
