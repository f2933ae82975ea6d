use std::iter::FusedIterator;

use super::RbTreeMap;
use super::node::{Dir, NodeRef};

impl<K, V> RbTreeMap<K, V> {
    fn extreme(&self, mut x: NodeRef, dir: Dir) -> NodeRef {
        if x.is_sentinel() {
            return x;
        }
        while !self.child(x, dir).is_sentinel() {
            x = self.child(x, dir);
        }
        x
    }

    /// Leftmost node of the subtree rooted at `node`. The sentinel maps to itself.
    pub fn minimum(&self, node: NodeRef) -> NodeRef {
        self.extreme(node, Dir::Left)
    }

    /// Rightmost node of the subtree rooted at `node`. The sentinel maps to itself.
    pub fn maximum(&self, node: NodeRef) -> NodeRef {
        self.extreme(node, Dir::Right)
    }

    /// In-order neighbour of `x` toward `dir`, or the sentinel.
    fn step(&self, mut x: NodeRef, dir: Dir) -> NodeRef {
        let sub = self.child(x, dir);
        if !sub.is_sentinel() {
            return self.extreme(sub, dir.flip());
        }
        let mut y = self.parent(x);
        while !y.is_sentinel() && x == self.child(y, dir) {
            x = y;
            y = self.parent(y);
        }
        y
    }

    pub fn successor(&self, node: NodeRef) -> Option<NodeRef> {
        Some(self.step(node, Dir::Right)).filter(|x| !x.is_sentinel())
    }

    pub fn predecessor(&self, node: NodeRef) -> Option<NodeRef> {
        Some(self.step(node, Dir::Left)).filter(|x| !x.is_sentinel())
    }

    /// Iterates over entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            map: self,
            front: self.minimum(self.root),
            back: self.maximum(self.root),
            remaining: self.len,
        }
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator + '_ {
        self.iter().map(|(_, v)| v)
    }
}

pub struct Iter<'a, K, V> {
    map: &'a RbTreeMap<K, V>,
    front: NodeRef,
    back: NodeRef,
    remaining: usize,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let x = self.front;
        self.front = self.map.step(x, Dir::Right);
        self.remaining -= 1;
        Some(self.map.key_value(x))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let x = self.back;
        self.back = self.map.step(x, Dir::Left);
        self.remaining -= 1;
        Some(self.map.key_value(x))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a RbTreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
