use log::trace;

use super::RbTreeMap;
use super::node::{Color, Dir, NodeRef};

impl<K: Ord, V> RbTreeMap<K, V> {
    /// Removes `key` and returns its value. An absent key is a no-op.
    pub fn delete(&mut self, key: &K) -> Option<V> {
        let z = self.search_node(key)?;
        let mut y_original_color = self.color(z);
        let x;

        if self.left(z).is_sentinel() {
            x = self.right(z);
            self.transplant(z, x);
        } else if self.right(z).is_sentinel() {
            x = self.left(z);
            self.transplant(z, x);
        } else {
            let y = self.minimum(self.right(z));
            y_original_color = self.color(y);
            x = self.right(y);
            if self.parent(y) == z {
                // `x` may be the sentinel; its parent field anchors the fixup walk.
                self.set_parent(x, y);
            } else {
                self.transplant(y, x);
                let zr = self.right(z);
                self.set_child(y, Dir::Right, zr);
                self.set_parent(zr, y);
            }
            self.transplant(z, y);
            let zl = self.left(z);
            self.set_child(y, Dir::Left, zl);
            self.set_parent(zl, y);
            let z_color = self.color(z);
            self.set_color(y, z_color);
        }

        if y_original_color == Color::Black {
            self.delete_fixup(x);
        }
        self.set_parent(NodeRef::SENTINEL, NodeRef::SENTINEL);

        let (_, value) = self.release(z);
        self.len -= 1;
        #[cfg(test)]
        self.assert_valid();
        Some(value)
    }

    /// Replaces the subtree rooted at `u` with the one rooted at `v`.
    ///
    /// `v.parent` is written even when `v` is the sentinel.
    fn transplant(&mut self, u: NodeRef, v: NodeRef) {
        let p = self.parent(u);
        self.replace_child(p, u, v);
        self.set_parent(v, p);
    }

    fn delete_fixup(&mut self, mut x: NodeRef) {
        while x != self.root && !self.is_red(x) {
            let p = self.parent(x);
            let side = self.dir_of(x);
            let mut w = self.child(p, side.flip());

            if self.is_red(w) {
                trace!("delete fixup: red sibling {w:?}, rotate at {p:?}");
                self.set_color(w, Color::Black);
                self.set_color(p, Color::Red);
                self.rotate(p, side);
                w = self.child(p, side.flip());
            }

            let near = self.child(w, side);
            let far = self.child(w, side.flip());
            if !self.is_red(near) && !self.is_red(far) {
                trace!("delete fixup: black nephews, push deficit up from {p:?}");
                self.set_color(w, Color::Red);
                x = p;
                continue;
            }

            if !self.is_red(far) {
                trace!("delete fixup: red near nephew {near:?}, rotate at {w:?}");
                self.set_color(near, Color::Black);
                self.set_color(w, Color::Red);
                self.rotate(w, side.flip());
                w = self.child(p, side.flip());
            }

            trace!("delete fixup: red far nephew, rotate at {p:?}");
            let p_color = self.color(p);
            self.set_color(w, p_color);
            self.set_color(p, Color::Black);
            let far = self.child(w, side.flip());
            self.set_color(far, Color::Black);
            self.rotate(p, side);
            x = self.root;
        }
        self.set_color(x, Color::Black);
    }
}
