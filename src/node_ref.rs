//! Borrowed view of a single node.

use std::fmt;

use crate::node::{Node, NodeId};
use crate::Radix;

/// A read-only handle to a node of a [`Radix`] tree.
///
/// This is what lookups and navigation hand back. It borrows the tree, so the tree cannot be
/// mutated while a `NodeRef` is alive; keep the [`NodeId`] instead when a handle has to survive
/// mutations.
pub struct NodeRef<'a, V> {
    tree: &'a Radix<V>,
    id: NodeId,
}

impl<'a, V> NodeRef<'a, V> {
    pub(crate) fn new(tree: &'a Radix<V>, id: NodeId) -> Self {
        NodeRef { tree, id }
    }

    fn node(&self) -> &'a Node<V> {
        &self.tree.nodes[self.id]
    }

    fn wrap(&self, id: Option<NodeId>) -> Option<NodeRef<'a, V>> {
        id.map(|id| NodeRef::new(self.tree, id))
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The full key: fragments concatenated from the root down to this node.
    pub fn key(&self) -> Vec<u8> {
        self.tree.key_of(self.id)
    }

    /// The part of the key stored at this node, relative to its parent.
    pub fn fragment(&self) -> &'a [u8] {
        &self.node().key_fragment
    }

    /// The stored value; `None` for branch nodes and the root.
    pub fn value(&self) -> Option<&'a V> {
        self.node().value.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.id == self.tree.root
    }

    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }

    pub fn children_len(&self) -> usize {
        self.node().children.len()
    }

    /// Direct children, in no particular order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a, V>> + 'a {
        let tree = self.tree;
        self.node()
            .children
            .values()
            .map(move |&id| NodeRef::new(tree, id))
    }

    /// Direct parent, valueless or not. `None` for the root.
    pub fn parent(&self) -> Option<NodeRef<'a, V>> {
        self.wrap(self.node().parent)
    }

    /// The closest ancestor that holds a value, or `None` when only the root is above.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_tree::Radix;
    ///
    /// let mut tree = Radix::new();
    /// tree.insert("a", 1);
    /// tree.insert("abc", 2);
    /// tree.insert("abd", 3);
    ///
    /// let (abc, _) = tree.find("abc");
    /// // "ab" is a bare branch point and is skipped
    /// assert_eq!(abc.unwrap().up().unwrap().key(), b"a");
    /// ```
    pub fn up(&self) -> Option<NodeRef<'a, V>> {
        let parent = self.node().parent?;
        self.wrap(self.tree.value_or_ancestor(parent))
    }

    /// The entry following this one in key order, wrapping from the last entry to the first.
    /// See [`Radix::next`].
    pub fn next(&self) -> Option<NodeRef<'a, V>> {
        self.wrap(self.tree.next(self.id))
    }

    /// The entry preceding this one in key order, wrapping from the first entry to the last.
    /// See [`Radix::prev`].
    pub fn prev(&self) -> Option<NodeRef<'a, V>> {
        self.wrap(self.tree.prev(self.id))
    }

    /// Number of values stored at and below this node.
    pub fn len(&self) -> usize {
        self.tree.subtree_size(self.id)
    }

    /// Returns `true` if neither this node nor any node below it stores a value.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V> Clone for NodeRef<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for NodeRef<'_, V> {}

impl<V> PartialEq for NodeRef<'_, V> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl<V> Eq for NodeRef<'_, V> {}

impl<V: fmt::Debug> fmt::Debug for NodeRef<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("key", &String::from_utf8_lossy(&self.key()))
            .field("value", &self.value())
            .finish()
    }
}
