//! Red-black tree with a shared black sentinel.
//!
//! Nodes live in an arena and link to each other through [`NodeRef`] indices.
//! Slot 0 is the sentinel: every missing child and the root's parent point at
//! it, so rotations and fixups never special-case an absent node.

mod delete;
mod insert;
mod iter;
mod node;
mod rotate;
mod validate;

use std::fmt;

use log::debug;

use crate::OrderedMap;

pub use iter::Iter;
pub use node::{Color, NodeRef};
pub use validate::InvariantViolation;

use node::Node;

/// Ordered map backed by a red-black tree.
///
/// - Keys are unique; inserting an existing key replaces its value in place.
/// - Search, insert and delete are `O(log n)`; an insert performs at most two
///   rotations and a delete at most three.
#[derive(Clone)]
pub struct RbTreeMap<K, V> {
    nodes: Vec<Node<K, V>>,
    free: Vec<NodeRef>,
    root: NodeRef,
    len: usize,
    rotations: u64,
}

impl<K, V> RbTreeMap<K, V> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty map with room for `capacity` entries before the arena
    /// reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity + 1);
        nodes.push(Node::sentinel());
        Self {
            nodes,
            free: Vec::new(),
            root: NodeRef::SENTINEL,
            len: 0,
            rotations: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every entry but keeps the arena's allocation.
    pub fn clear(&mut self) {
        debug!("clearing {} entries", self.len);
        self.nodes.truncate(1);
        self.nodes[0] = Node::sentinel();
        self.free.clear();
        self.root = NodeRef::SENTINEL;
        self.len = 0;
    }

    /// Total number of rotations performed over the map's lifetime.
    pub fn rotations(&self) -> u64 {
        self.rotations
    }

    pub fn root(&self) -> Option<NodeRef> {
        Some(self.root).filter(|x| !x.is_sentinel())
    }

    /// Color of `node`. The sentinel is always black.
    pub fn color(&self, node: NodeRef) -> Color {
        self.node(node).color
    }

    /// Key and value stored at `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is the sentinel or a deleted node.
    pub fn key_value(&self, node: NodeRef) -> (&K, &V) {
        match &self.node(node).entry {
            Some((k, v)) => (k, v),
            None => panic!("{node:?} does not hold an entry"),
        }
    }

    fn value_mut(&mut self, node: NodeRef) -> &mut V {
        match &mut self.node_mut(node).entry {
            Some((_, v)) => v,
            None => panic!("{node:?} does not hold an entry"),
        }
    }

    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.root().map(|r| self.key_value(self.minimum(r)))
    }

    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.root().map(|r| self.key_value(self.maximum(r)))
    }
}

impl<K: Ord, V> RbTreeMap<K, V> {
    /// Finds the node holding `key`.
    pub fn search_node(&self, key: &K) -> Option<NodeRef> {
        let mut cur = self.root;
        while !cur.is_sentinel() {
            match key.cmp(self.key(cur)) {
                std::cmp::Ordering::Less => cur = self.left(cur),
                std::cmp::Ordering::Greater => cur = self.right(cur),
                std::cmp::Ordering::Equal => return Some(cur),
            }
        }
        None
    }

    pub fn search(&self, key: &K) -> Option<&V> {
        self.search_node(key).map(|x| self.key_value(x).1)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let x = self.search_node(key)?;
        Some(self.value_mut(x))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.search_node(key).is_some()
    }

    /// Smallest entry whose key is `>= key`.
    pub fn lower_bound(&self, key: &K) -> Option<(&K, &V)> {
        let mut cur = self.root;
        let mut candidate = None;
        while !cur.is_sentinel() {
            match key.cmp(self.key(cur)) {
                std::cmp::Ordering::Less | std::cmp::Ordering::Equal => {
                    candidate = Some(cur);
                    cur = self.left(cur);
                }
                std::cmp::Ordering::Greater => cur = self.right(cur),
            }
        }
        candidate.map(|x| self.key_value(x))
    }
}

impl<K, V> Default for RbTreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RbTreeMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> Extend<(K, V)> for RbTreeMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RbTreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity(iter.size_hint().0);
        map.extend(iter);
        map
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for RbTreeMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: Ord, V> OrderedMap for RbTreeMap<K, V> {
    type Key = K;
    type Value = V;

    fn new() -> Self {
        RbTreeMap::new()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, key: &Self::Key) -> Option<&Self::Value> {
        self.search(key)
    }

    fn insert(&mut self, key: Self::Key, value: Self::Value) -> Option<Self::Value> {
        RbTreeMap::insert(self, key, value)
    }

    fn remove(&mut self, key: &Self::Key) -> Option<Self::Value> {
        self.delete(key)
    }

    fn lower_bound(&self, key: &Self::Key) -> Option<(&Self::Key, &Self::Value)> {
        RbTreeMap::lower_bound(self, key)
    }
}
