//! Namespace listener tree.
//!
//! Event names are dot-separated paths and each segment is one tree level.
//! A node carries the listeners registered at exactly its path plus an
//! insertion-ordered child list, so a single walk yields every listener an
//! emission of that path must fire: the node's own listeners first, then
//! each child subtree in child-creation order. Ancestor nodes never
//! qualify.
//!
//! Nodes are created on demand and never removed. Clearing a path empties
//! that node's own listener list and leaves its subtree in place, so
//! descendant listeners keep firing for later emissions of ancestor paths.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::listener::{ListenerId, Registration};

/// Shared handle to one tree node.
pub(crate) type NodeRef = Rc<RefCell<NamespaceNode>>;

/// One segment of a namespace path.
pub(crate) struct NamespaceNode {
    /// Path segment this node represents; empty for the root.
    segment: String,
    /// Listeners registered at exactly this path, in insertion order.
    listeners: Vec<Registration>,
    /// Children in creation order. The order is load-bearing: it decides
    /// the relative order of sibling subtrees during dispatch.
    children: Vec<(String, NodeRef)>,
    /// Navigation-only back-reference; the tree is owned root-down.
    parent: Weak<RefCell<NamespaceNode>>,
}

impl NamespaceNode {
    fn root() -> NodeRef {
        Rc::new(RefCell::new(Self {
            segment: String::new(),
            listeners: Vec::new(),
            children: Vec::new(),
            parent: Weak::new(),
        }))
    }

    /// Create an empty child of `parent` and link it in.
    fn spawn(segment: &str, parent: &NodeRef) -> NodeRef {
        let node = Rc::new(RefCell::new(Self {
            segment: segment.to_string(),
            listeners: Vec::new(),
            children: Vec::new(),
            parent: Rc::downgrade(parent),
        }));
        parent
            .borrow_mut()
            .children
            .push((segment.to_string(), Rc::clone(&node)));
        node
    }

    pub(crate) fn push_listener(&mut self, registration: Registration) {
        self.listeners.push(registration);
    }

    /// Remove the first registration matching `id`. No-op when absent.
    pub(crate) fn remove_listener(&mut self, id: ListenerId) -> bool {
        match self.listeners.iter().position(|r| r.id() == id) {
            Some(index) => {
                self.listeners.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop every listener at exactly this path, keeping descendants.
    pub(crate) fn clear_listeners(&mut self) -> bool {
        let had_any = !self.listeners.is_empty();
        self.listeners.clear();
        had_any
    }

    pub(crate) fn listeners(&self) -> &[Registration] {
        &self.listeners
    }

    pub(crate) fn child(&self, segment: &str) -> Option<NodeRef> {
        self.children
            .iter()
            .find(|(name, _)| name == segment)
            .map(|(_, node)| Rc::clone(node))
    }

    /// Dotted path from the root to this node, rebuilt through the parent
    /// links. Diagnostic only.
    pub(crate) fn path(&self) -> String {
        let mut segments = vec![self.segment.clone()];
        let mut ancestor = self.parent.upgrade();
        while let Some(node) = ancestor {
            let node = node.borrow();
            if !node.segment.is_empty() {
                segments.push(node.segment.clone());
            }
            ancestor = node.parent.upgrade();
        }
        segments.reverse();
        segments.join(".")
    }
}

/// Tree of namespace nodes owned by one emitter.
pub(crate) struct ListenerTree {
    root: NodeRef,
}

impl ListenerTree {
    pub(crate) fn new() -> Self {
        Self {
            root: NamespaceNode::root(),
        }
    }

    /// Walk `path` from the root without creating anything.
    pub(crate) fn resolve<'a, I>(&self, path: I) -> Option<NodeRef>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut current = Rc::clone(&self.root);
        for segment in path {
            let child = current.borrow().child(segment)?;
            current = child;
        }
        Some(current)
    }

    /// Walk `path` from the root, creating missing segments as empty nodes.
    pub(crate) fn ensure<'a, I>(&self, path: I) -> NodeRef
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut current = Rc::clone(&self.root);
        for segment in path {
            let existing = current.borrow().child(segment);
            let next = match existing {
                Some(node) => node,
                None => {
                    let node = NamespaceNode::spawn(segment, &current);
                    tracing::trace!("Namespace node {:?} created", node.borrow().path());
                    node
                }
            };
            current = next;
        }
        current
    }

    /// Snapshot of every registration an emission of `name` must fire, in
    /// dispatch order: the resolved node's subtree (own listeners before
    /// children, siblings in creation order), then the wildcard node's own
    /// list. Each entry carries the owning node so `once` registrations can
    /// be removed from the live list after they run.
    pub(crate) fn collect(&self, name: &str) -> Vec<(NodeRef, Registration)> {
        let mut matched = Vec::new();
        if let Some(node) = self.resolve(name.split('.')) {
            Self::collect_subtree(&node, &mut matched);
        }
        if let Some(wildcard) = self.root.borrow().child(crate::WILDCARD) {
            for registration in wildcard.borrow().listeners() {
                matched.push((Rc::clone(&wildcard), registration.clone()));
            }
        }
        matched
    }

    fn collect_subtree(node: &NodeRef, out: &mut Vec<(NodeRef, Registration)>) {
        let current = node.borrow();
        for registration in current.listeners.iter() {
            out.push((Rc::clone(node), registration.clone()));
        }
        for (_, child) in current.children.iter() {
            Self::collect_subtree(child, out);
        }
    }
}
