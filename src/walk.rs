//! Ordered navigation over the stored entries.
//!
//! Entries are ordered by their full keys, byte by byte, with a key preceding its own
//! extensions. That is a pre-order walk taking children by ascending first byte. Children are
//! kept unordered, so every step scans the sibling set for the nearest byte instead of keeping
//! a sorted index.
//!
//! Both directions wrap around: the entries form a ring, and a tree with a single entry is its
//! own successor and predecessor.

use crate::node::NodeId;
use crate::node_ref::NodeRef;
use crate::util::{largest_predecessor, leftmost_child, rightmost_child, smallest_successor};
use crate::Radix;

impl<V> Radix<V> {
    /// The entry after `id` in key order.
    ///
    /// Returns the first entry past the end, and the first entry overall when `id` is the root.
    /// `None` for an empty tree or a retired id.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_tree::Radix;
    ///
    /// let mut tree = Radix::new();
    /// let a = tree.insert("nl.miek", ()).unwrap();
    /// let b = tree.insert("nl.miek.a", ()).unwrap();
    ///
    /// assert_eq!(tree.next(a), Some(b));
    /// assert_eq!(tree.next(b), Some(a));
    /// ```
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id)?;

        let mut cursor = id;
        let mut wrapped = false;
        loop {
            cursor = match self.preorder_successor(cursor) {
                Some(next) => next,
                None if !wrapped => {
                    trace_log!("next: wrapped to the first entry");
                    wrapped = true;
                    self.root
                }
                None => return None,
            };
            if self.nodes[cursor].value.is_some() {
                return Some(cursor);
            }
        }
    }

    /// The entry before `id` in key order; the mirror of [`next`](Self::next).
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id)?;

        let mut cursor = id;
        let mut wrapped = false;
        loop {
            cursor = match self.preorder_predecessor(cursor) {
                Some(prev) => prev,
                None if !wrapped => {
                    trace_log!("prev: wrapped to the last entry");
                    wrapped = true;
                    self.rightmost_descendant(self.root)
                }
                None => return None,
            };
            if self.nodes[cursor].value.is_some() {
                return Some(cursor);
            }
        }
    }

    /// The entry with the smallest key.
    pub fn first(&self) -> Option<NodeRef<'_, V>> {
        self.next(self.root).map(|id| NodeRef::new(self, id))
    }

    /// The entry with the largest key.
    pub fn last(&self) -> Option<NodeRef<'_, V>> {
        self.prev(self.root).map(|id| NodeRef::new(self, id))
    }

    /// Next node in pre-order, valueless or not. `None` past the last node.
    fn preorder_successor(&self, id: NodeId) -> Option<NodeId> {
        let node = &self.nodes[id];
        if let Some(byte) = leftmost_child(&node.children) {
            return node.children.get(&byte).copied();
        }

        // A leaf: the next node is the nearest greater sibling of the closest ancestor that
        // has one
        let mut cursor = id;
        loop {
            let node = &self.nodes[cursor];
            let parent = node.parent?;
            let byte = node.first_byte()?;
            let siblings = &self.nodes[parent].children;
            if let Some(sibling) = smallest_successor(siblings, byte) {
                return siblings.get(&sibling).copied();
            }
            cursor = parent;
        }
    }

    /// Previous node in pre-order, valueless or not. `None` before the root.
    fn preorder_predecessor(&self, id: NodeId) -> Option<NodeId> {
        let node = &self.nodes[id];
        let parent = node.parent?;
        let byte = node.first_byte()?;
        let siblings = &self.nodes[parent].children;

        match largest_predecessor(siblings, byte) {
            Some(sibling) => siblings
                .get(&sibling)
                .map(|&sibling| self.rightmost_descendant(sibling)),
            None => Some(parent),
        }
    }

    /// Follows the largest child down to a leaf.
    fn rightmost_descendant(&self, id: NodeId) -> NodeId {
        let mut cursor = id;
        loop {
            let children = &self.nodes[cursor].children;
            match rightmost_child(children).and_then(|byte| children.get(&byte)) {
                Some(&child) => cursor = child,
                None => return cursor,
            }
        }
    }

    /// Iterates over the entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_tree::Radix;
    ///
    /// let tree: Radix<u32> = vec![("b", 2), ("ab", 1), ("c", 3)].into_iter().collect();
    /// let keys: Vec<Vec<u8>> = tree.iter().map(|node| node.key()).collect();
    /// assert_eq!(keys, vec![b"ab".to_vec(), b"b".to_vec(), b"c".to_vec()]);
    /// ```
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self, self.next(self.root), Direction::Forward)
    }

    /// Iterates over the entries in descending key order.
    pub fn iter_rev(&self) -> Iter<'_, V> {
        Iter::new(self, self.prev(self.root), Direction::Backward)
    }

    /// Calls `f` on every value in ascending key order.
    ///
    /// Walks the ring from the first entry with repeated [`next`](Self::next) calls until it
    /// comes back around.
    pub fn next_do<F: FnMut(&V)>(&self, mut f: F) {
        for node in self.iter() {
            if let Some(value) = node.value() {
                f(value);
            }
        }
    }

    /// Calls `f` on every value in descending key order.
    pub fn prev_do<F: FnMut(&V)>(&self, mut f: F) {
        for node in self.iter_rev() {
            if let Some(value) = node.value() {
                f(value);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// An iterator over the entries of a [`Radix`] tree, in key order.
///
/// It steps around the entry ring with [`Radix::next`] or [`Radix::prev`] and stops once the
/// starting entry comes up again.
pub struct Iter<'a, V> {
    tree: &'a Radix<V>,
    start: Option<NodeId>,
    cursor: Option<NodeId>,
    direction: Direction,
}

impl<'a, V> Iter<'a, V> {
    fn new(tree: &'a Radix<V>, start: Option<NodeId>, direction: Direction) -> Self {
        Iter {
            tree,
            start,
            cursor: start,
            direction,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = NodeRef<'a, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor?;
        let step = match self.direction {
            Direction::Forward => self.tree.next(current),
            Direction::Backward => self.tree.prev(current),
        };
        let start = self.start;
        self.cursor = step.filter(|&id| Some(id) != start);
        Some(NodeRef::new(self.tree, current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.cursor {
            Some(_) => (1, Some(self.tree.len())),
            None => (0, Some(0)),
        }
    }
}

impl<'a, V> IntoIterator for &'a Radix<V> {
    type Item = NodeRef<'a, V>;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
