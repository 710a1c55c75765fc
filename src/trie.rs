//! The main tree implementation.
//!
//! This module contains the `Radix` type: insertion with node splitting, prefix search with
//! ancestor fallback, exact removal with collapsing, and the unordered traversals.

use std::iter::FromIterator;

use crate::config::RadixConfig;
use crate::node::{Arena, Node, NodeId};
use crate::node_ref::NodeRef;
use crate::util::longest_common_prefix;

/// A mutable radix tree (PATRICIA trie) mapping byte-string keys to values.
///
/// Keys are raw byte sequences ordered by byte value. Nodes that only exist to share a common
/// prefix carry no value and are never reported as entries.
///
/// # Examples
///
/// ```
/// use radix_tree::Radix;
///
/// let mut tree = Radix::new();
/// tree.insert("test", 1);
/// tree.insert("team", 2);
///
/// let (node, exact) = tree.find("test");
/// assert!(exact);
/// assert_eq!(node.unwrap().value(), Some(&1));
///
/// // A miss degrades to the nearest stored ancestor
/// let (node, exact) = tree.find("testing");
/// assert!(!exact);
/// assert_eq!(node.unwrap().key(), b"test");
/// ```
#[derive(Debug)]
pub struct Radix<V> {
    pub(crate) nodes: Arena<V>,

    /// The root node; it never holds a value and is never removed
    pub(crate) root: NodeId,

    /// The number of values stored in the tree
    size: usize,

    config: RadixConfig,
}

/// What [`Radix::remove`] took out of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed<V> {
    /// Full key of the removed entry
    pub key: Vec<u8>,
    /// The value it held
    pub value: V,
}

impl<V> Radix<V> {
    /// Creates a new, empty tree with the default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_tree::Radix;
    ///
    /// let tree = Radix::<u32>::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_config(RadixConfig::default())
    }

    /// Creates a new, empty tree with the given configuration.
    pub fn with_config(config: RadixConfig) -> Self {
        let mut nodes = Arena::new();
        let root = nodes.alloc(Node::new(Vec::new(), None));
        Radix {
            nodes,
            root,
            size: 0,
            config,
        }
    }

    pub fn config(&self) -> &RadixConfig {
        &self.config
    }

    /// Returns the number of values stored in the tree. Branch nodes are not counted.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the tree contains no values.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of live nodes, including the root and branch nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.live()
    }

    /// A handle to the root node.
    pub fn root(&self) -> NodeRef<'_, V> {
        NodeRef::new(self, self.root)
    }

    /// Resolves an id handed out earlier. Returns `None` once the node has been removed.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, V>> {
        self.nodes.get(id).map(|_| NodeRef::new(self, id))
    }

    /// Inserts `value` under `key` and returns the id of the node holding it.
    ///
    /// Re-inserting an existing key overwrites its value. An empty key is a no-op and returns
    /// `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_tree::Radix;
    ///
    /// let mut tree = Radix::new();
    /// let id = tree.insert("hello", 1).unwrap();
    /// assert_eq!(tree.node(id).unwrap().key(), b"hello");
    ///
    /// tree.insert("hello", 2);
    /// assert_eq!(tree.len(), 1);
    /// assert_eq!(tree.get("hello"), Some(&2));
    ///
    /// assert_eq!(tree.insert("", 3), None);
    /// ```
    pub fn insert<K: AsRef<[u8]>>(&mut self, key: K, value: V) -> Option<NodeId> {
        let key = key.as_ref();
        if key.is_empty() {
            return None;
        }
        Some(self.insert_at(self.root, key, value))
    }

    fn insert_at(&mut self, mut current: NodeId, mut key: &[u8], value: V) -> NodeId {
        loop {
            let existing = self.nodes[current].children.get(&key[0]).copied();
            let child = match existing {
                Some(child) => child,
                None => {
                    let leaf = self
                        .nodes
                        .alloc(Node::with_value(key.to_vec(), value, current));
                    self.nodes[current].children.insert(key[0], leaf);
                    self.size += 1;
                    return leaf;
                }
            };

            if key == &self.nodes[child].key_fragment[..] {
                if self.nodes[child].value.replace(value).is_none() {
                    self.size += 1;
                }
                return child;
            }

            let (_, prefix_end) = longest_common_prefix(key, &self.nodes[child].key_fragment);

            if prefix_end == self.nodes[child].key_fragment.len() {
                trace_log!(depth_byte = key[0], consumed = prefix_end, "insert: descend");
                current = child;
                key = &key[prefix_end..];
                continue;
            }

            let branch = self.split(current, child, prefix_end);
            if prefix_end == key.len() {
                self.nodes[branch].value = Some(value);
                self.size += 1;
                return branch;
            }
            // The remainder diverges from the shortened child, so the next round adds a leaf
            current = branch;
            key = &key[prefix_end..];
        }
    }

    /// Interposes a branch node holding the first `at` bytes of `child`'s fragment between
    /// `parent` and `child`.
    fn split(&mut self, parent: NodeId, child: NodeId, at: usize) -> NodeId {
        let suffix = self.nodes[child].key_fragment.split_off(at);
        let prefix = std::mem::replace(&mut self.nodes[child].key_fragment, suffix);
        let slot = prefix[0];
        let child_slot = self.nodes[child].key_fragment[0];

        let mut branch = Node::new(prefix, Some(parent));
        branch.children.insert(child_slot, child);
        let branch = self.nodes.alloc(branch);

        self.nodes[parent].children.insert(slot, branch);
        self.nodes[child].parent = Some(branch);

        debug_log!(branch = ?branch, child = ?child, at, "split");
        branch
    }

    /// Looks up `key`.
    ///
    /// Returns the node and `true` on an exact hit. Otherwise returns the deepest node with a
    /// value along the matched path and `false`; `None` when no such ancestor exists or the key
    /// is empty.
    pub fn find<K: AsRef<[u8]>>(&self, key: K) -> (Option<NodeRef<'_, V>>, bool) {
        let (id, exact, _) = self.search(key.as_ref(), |_| false);
        (id.map(|id| NodeRef::new(self, id)), exact)
    }

    /// Like [`find`](Self::find), but every value met on the way down is first offered to
    /// `predicate`.
    ///
    /// The first node for which `predicate` returns `true` ends the search and is returned as
    /// `(node, false, true)`. Nodes offered are those whose key is a proper prefix of `key`;
    /// the node matching `key` exactly is reported as a plain hit. When the predicate never
    /// fires the result equals `find` with a trailing `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_tree::Radix;
    ///
    /// let mut tree = Radix::new();
    /// tree.insert("nl", "delegation");
    /// tree.insert("nl.miek.www", "address");
    ///
    /// let (node, exact, matched) = tree.find_func("nl.miek.www", |v| *v == "delegation");
    /// assert_eq!(node.unwrap().key(), b"nl");
    /// assert!(!exact);
    /// assert!(matched);
    /// ```
    pub fn find_func<K, F>(&self, key: K, predicate: F) -> (Option<NodeRef<'_, V>>, bool, bool)
    where
        K: AsRef<[u8]>,
        F: FnMut(&V) -> bool,
    {
        let (id, exact, matched) = self.search(key.as_ref(), predicate);
        (id.map(|id| NodeRef::new(self, id)), exact, matched)
    }

    fn search<F>(&self, key: &[u8], mut predicate: F) -> (Option<NodeId>, bool, bool)
    where
        F: FnMut(&V) -> bool,
    {
        if key.is_empty() {
            return (None, false, false);
        }

        let mut current = self.root;
        let mut key = key;
        loop {
            let node = &self.nodes[current];
            if let Some(value) = &node.value {
                if predicate(value) {
                    return (Some(current), false, true);
                }
            }

            let child = match node.children.get(&key[0]) {
                Some(&child) => child,
                None => return (self.value_or_ancestor(current), false, false),
            };
            let fragment = &self.nodes[child].key_fragment;

            if key == &fragment[..] {
                if self.nodes[child].value.is_some() {
                    return (Some(child), true, false);
                }
                return (self.value_or_ancestor(child), false, false);
            }

            let (_, prefix_end) = longest_common_prefix(key, fragment);
            if prefix_end != fragment.len() {
                // e.g. looking for "ab" under "abc"
                return (self.value_or_ancestor(current), false, false);
            }

            current = child;
            key = &key[prefix_end..];
        }
    }

    /// `id` itself if it holds a value, else its closest ancestor that does.
    pub(crate) fn value_or_ancestor(&self, id: NodeId) -> Option<NodeId> {
        let mut cursor = id;
        loop {
            let node = &self.nodes[cursor];
            if node.value.is_some() {
                return Some(cursor);
            }
            cursor = node.parent?;
        }
    }

    /// Locates the node whose full key is exactly `key`, valueless or not.
    fn locate(&self, key: &[u8]) -> Option<NodeId> {
        if key.is_empty() {
            return None;
        }

        let mut current = self.root;
        let mut key = key;
        loop {
            let child = *self.nodes[current].children.get(&key[0])?;
            let fragment = &self.nodes[child].key_fragment;

            if key == &fragment[..] {
                return Some(child);
            }
            let (_, prefix_end) = longest_common_prefix(key, fragment);
            if prefix_end != fragment.len() {
                return None;
            }
            current = child;
            key = &key[prefix_end..];
        }
    }

    /// Returns the value stored under exactly `key`.
    pub fn get<K: AsRef<[u8]>>(&self, key: K) -> Option<&V> {
        let id = self.locate(key.as_ref())?;
        self.nodes[id].value.as_ref()
    }

    /// Returns a mutable reference to the value stored under exactly `key`.
    pub fn get_mut<K: AsRef<[u8]>>(&mut self, key: K) -> Option<&mut V> {
        let id = self.locate(key.as_ref())?;
        self.nodes[id].value.as_mut()
    }

    pub fn contains_key<K: AsRef<[u8]>>(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Removes the entry stored under exactly `key`.
    ///
    /// Unlike [`find`](Self::find) there is no fallback: anything but an exact match leaves
    /// the tree untouched and returns `None`. The node is detached when it is a leaf, merged
    /// into its only child when it has one, and kept as a bare branch point otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_tree::Radix;
    ///
    /// let mut tree = Radix::new();
    /// tree.insert("test", "aa");
    /// tree.insert("slow", "bb");
    ///
    /// assert_eq!(tree.remove("slow").unwrap().value, "bb");
    /// assert!(tree.remove("slow").is_none());
    /// assert!(tree.find("test").1);
    /// ```
    pub fn remove<K: AsRef<[u8]>>(&mut self, key: K) -> Option<Removed<V>> {
        let target = self.locate(key.as_ref())?;
        let value = self.nodes[target].value.take()?;
        self.size -= 1;

        let removed = Removed {
            key: key.as_ref().to_vec(),
            value,
        };
        self.restructure(target);
        Some(removed)
    }

    /// Restores the tree shape around `id` after its value was taken away.
    ///
    /// A valueless leaf is detached and its parent re-examined; a valueless node with one child
    /// is merged with that child. Nodes with a value or several children stay.
    fn restructure(&mut self, id: NodeId) {
        let mut cursor = id;
        while cursor != self.root {
            let node = &self.nodes[cursor];
            if node.value.is_some() {
                return;
            }
            match node.children.len() {
                0 => {
                    let parent = match self.detach(cursor) {
                        Some(parent) => parent,
                        None => return,
                    };
                    cursor = parent;
                }
                1 => {
                    self.collapse(cursor);
                    return;
                }
                _ => {
                    debug_log!(node = ?cursor, "remove: value cleared, branch kept");
                    return;
                }
            }
        }
    }

    /// Unlinks the leaf `id` from its parent and frees it. Returns the parent.
    fn detach(&mut self, id: NodeId) -> Option<NodeId> {
        let node = self.nodes.free(id)?;
        let parent = node.parent?;
        if let Some(slot) = node.first_byte() {
            self.nodes[parent].children.remove(&slot);
        }
        debug_log!(node = ?id, parent = ?parent, "remove: leaf detached");
        Some(parent)
    }

    /// Splices the single-child node `id` out: its child takes over its slot in the parent,
    /// with `id`'s fragment prepended to its own.
    fn collapse(&mut self, id: NodeId) {
        let only = match self.nodes[id].children.values().next() {
            Some(&only) => only,
            None => return,
        };
        let node = match self.nodes.free(id) {
            Some(node) => node,
            None => return,
        };
        let parent = match node.parent {
            Some(parent) => parent,
            None => return,
        };

        let slot = node.key_fragment[0];
        let mut fragment = node.key_fragment;
        fragment.extend_from_slice(&self.nodes[only].key_fragment);

        let child = &mut self.nodes[only];
        child.key_fragment = fragment;
        child.parent = Some(parent);
        self.nodes[parent].children.insert(slot, only);

        debug_log!(removed = ?id, merged = ?only, "remove: collapsed into child");
    }

    /// Full key of `id`: the concatenated fragments from the root down.
    pub(crate) fn key_of(&self, id: NodeId) -> Vec<u8> {
        let mut fragments = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = &self.nodes[current];
            fragments.push(&node.key_fragment[..]);
            cursor = node.parent;
        }
        fragments.iter().rev().flat_map(|f| f.iter().copied()).collect()
    }

    /// Full keys of every node below the root, branch nodes included, in depth-first order.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_tree::Radix;
    ///
    /// let mut tree = Radix::new();
    /// tree.insert("tester", ());
    /// tree.insert("team", ());
    ///
    /// let mut keys = tree.keys();
    /// keys.sort();
    /// assert_eq!(keys, vec![b"te".to_vec(), b"team".to_vec(), b"tester".to_vec()]);
    /// ```
    pub fn keys(&self) -> Vec<Vec<u8>> {
        let mut keys = Vec::new();
        let mut stack: Vec<(NodeId, Vec<u8>)> = vec![(self.root, Vec::new())];

        while let Some((id, prefix)) = stack.pop() {
            for &child in self.nodes[id].children.values() {
                let mut key = prefix.clone();
                key.extend_from_slice(&self.nodes[child].key_fragment);
                keys.push(key.clone());
                stack.push((child, key));
            }
        }

        keys
    }

    /// Calls `f` on every stored value, in no particular order.
    pub fn for_each<F: FnMut(&V)>(&self, mut f: F) {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if let Some(value) = &node.value {
                f(value);
            }
            stack.extend(node.children.values().copied());
        }
    }

    /// Number of values stored in the subtree rooted at `id`, `id` included.
    pub(crate) fn subtree_size(&self, id: NodeId) -> usize {
        let mut count = 0;
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if node.value.is_some() {
                count += 1;
            }
            stack.extend(node.children.values().copied());
        }
        count
    }
}

impl<V> Default for Radix<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: AsRef<[u8]>, V> Extend<(K, V)> for Radix<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: AsRef<[u8]>, V> FromIterator<(K, V)> for Radix<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Radix::new();
        tree.extend(iter);
        tree
    }
}
