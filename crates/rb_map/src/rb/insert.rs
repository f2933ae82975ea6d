use log::trace;

use super::RbTreeMap;
use super::node::{Color, Dir, NodeRef};

impl<K: Ord, V> RbTreeMap<K, V> {
    /// Inserts `key` with `value`.
    ///
    /// An existing key keeps its node and only has its value replaced; the old
    /// value is returned and the shape of the tree is untouched.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(x) = self.search_node(&key) {
            return Some(std::mem::replace(self.value_mut(x), value));
        }

        let mut y = NodeRef::SENTINEL;
        let mut cur = self.root;
        while !cur.is_sentinel() {
            y = cur;
            cur = if key < *self.key(cur) {
                self.left(cur)
            } else {
                self.right(cur)
            };
        }

        let dir = if !y.is_sentinel() && key < *self.key(y) {
            Dir::Left
        } else {
            Dir::Right
        };
        let z = self.alloc(key, value);
        self.set_parent(z, y);
        if y.is_sentinel() {
            self.root = z;
        } else {
            self.set_child(y, dir, z);
        }
        self.len += 1;

        self.insert_fixup(z);
        #[cfg(test)]
        self.assert_valid();
        None
    }

    fn insert_fixup(&mut self, mut z: NodeRef) {
        while self.is_red(self.parent(z)) {
            let p = self.parent(z);
            let g = self.parent(p);
            let side = self.dir_of(p);
            let uncle = self.child(g, side.flip());

            if self.is_red(uncle) {
                trace!("insert fixup: red uncle {uncle:?}, recolor at {g:?}");
                self.set_color(p, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(g, Color::Red);
                z = g;
                continue;
            }

            if z == self.child(p, side.flip()) {
                trace!("insert fixup: inner child {z:?}, straighten at {p:?}");
                z = p;
                self.rotate(z, side);
            }

            trace!("insert fixup: outer child {z:?}, rotate at grandparent");
            let p = self.parent(z);
            let g = self.parent(p);
            self.set_color(p, Color::Black);
            self.set_color(g, Color::Red);
            self.rotate(g, side.flip());
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }
}
