//! Internal node storage for the radix tree.
//!
//! Nodes live in an [`Arena`] and refer to each other through [`NodeId`]s. A parent owns its
//! children through the `children` map; the `parent` link is a plain id used for upward walks
//! only, so splitting and collapsing are just id edits.

use std::collections::HashMap;
use std::fmt;

/// Stable handle to a node of a [`Radix`](crate::Radix) tree.
///
/// An id stays valid as long as its node is part of the tree. Once the node is spliced out by
/// a removal the id is retired: it never resolves again, even if its slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.index as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}v{})", self.index, self.generation)
    }
}

/// A single node of the tree.
#[derive(Debug)]
pub(crate) struct Node<V> {
    /// The key fragment stored at this node, relative to its parent
    pub key_fragment: Vec<u8>,

    /// The value stored at this node; `None` marks a pure branch node
    pub value: Option<V>,

    /// Child nodes indexed by the first byte of their key fragment
    pub children: HashMap<u8, NodeId>,

    /// Back-reference to the owning node, `None` for the root
    pub parent: Option<NodeId>,
}

impl<V> Node<V> {
    /// Creates a new empty node with the given key fragment
    pub fn new(key_fragment: Vec<u8>, parent: Option<NodeId>) -> Self {
        Node {
            key_fragment,
            value: None,
            children: HashMap::new(),
            parent,
        }
    }

    /// Creates a new leaf holding `value`
    pub fn with_value(key_fragment: Vec<u8>, value: V, parent: NodeId) -> Self {
        Node {
            key_fragment,
            value: Some(value),
            children: HashMap::new(),
            parent: Some(parent),
        }
    }

    /// First byte of the fragment; the byte this node is filed under in its parent.
    /// The root has none.
    pub fn first_byte(&self) -> Option<u8> {
        self.key_fragment.first().copied()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug)]
struct Slot<V> {
    generation: u32,
    node: Option<Node<V>>,
}

/// Slot storage for nodes with a free list.
#[derive(Debug)]
pub(crate) struct Arena<V> {
    slots: Vec<Slot<V>>,
    free: Vec<u32>,
}

impl<V> Arena<V> {
    pub fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Stores `node` and returns its id, reusing a retired slot when one is available.
    pub fn alloc(&mut self, node: Node<V>) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    /// Takes the node out of the arena and retires `id`.
    pub fn free(&mut self, id: NodeId) -> Option<Node<V>> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(node)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<V>> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<V>> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Number of live nodes, branch nodes and the root included.
    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

impl<V> std::ops::Index<NodeId> for Arena<V> {
    type Output = Node<V>;

    fn index(&self, id: NodeId) -> &Node<V> {
        match self.get(id) {
            Some(node) => node,
            None => panic!("stale node id {:?}", id),
        }
    }
}

impl<V> std::ops::IndexMut<NodeId> for Arena<V> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<V> {
        match self.get_mut(id) {
            Some(node) => node,
            None => panic!("stale node id {:?}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node() {
        let node: Node<u32> = Node::new(Vec::new(), None);

        assert!(node.key_fragment.is_empty());
        assert!(node.value.is_none());
        assert!(node.is_leaf());
        assert_eq!(node.first_byte(), None);
    }

    #[test]
    fn test_with_value() {
        let mut arena = Arena::new();
        let root = arena.alloc(Node::new(Vec::new(), None));
        let leaf = arena.alloc(Node::with_value(b"abc".to_vec(), 42u32, root));

        assert_eq!(arena[leaf].value, Some(42));
        assert_eq!(arena[leaf].parent, Some(root));
        assert_eq!(arena[leaf].first_byte(), Some(b'a'));
    }

    #[test]
    fn test_free_retires_id() {
        let mut arena: Arena<u32> = Arena::new();
        let a = arena.alloc(Node::new(b"a".to_vec(), None));
        assert_eq!(arena.live(), 1);

        let node = arena.free(a).unwrap();
        assert_eq!(node.key_fragment, b"a");
        assert!(arena.get(a).is_none());
        assert!(arena.free(a).is_none());
        assert_eq!(arena.live(), 0);

        // The slot is reused, but the old id stays dead
        let b = arena.alloc(Node::new(b"b".to_vec(), None));
        assert_eq!(a.index(), b.index());
        assert_ne!(a, b);
        assert!(arena.get(a).is_none());
        assert_eq!(arena[b].key_fragment, b"b");
    }
}
