use log::trace;

use super::RbTreeMap;
use super::node::{Dir, NodeRef};

impl<K, V> RbTreeMap<K, V> {
    /// Rotates the subtree at `x` toward `dir`: the child on the opposite side
    /// takes `x`'s place and `x` becomes its `dir` child.
    ///
    /// `rotate(x, Dir::Left)` is the classic left rotation. A sentinel
    /// grandchild moved across never has its parent written.
    pub(super) fn rotate(&mut self, x: NodeRef, dir: Dir) {
        let y = self.child(x, dir.flip());
        debug_assert!(!x.is_sentinel());
        debug_assert!(!y.is_sentinel(), "rotation requires a child to promote");

        let inner = self.child(y, dir);
        self.set_child(x, dir.flip(), inner);
        if !inner.is_sentinel() {
            self.set_parent(inner, x);
        }

        let p = self.parent(x);
        self.set_parent(y, p);
        self.replace_child(p, x, y);

        self.set_child(y, dir, x);
        self.set_parent(x, y);

        self.rotations += 1;
        trace!("rotate {dir:?} at {x:?}, promoted {y:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::super::Color;
    use super::*;

    // Builds   2        as a plain BST with explicit links.
    //         / \
    //        1   4
    //           / \
    //          3   5
    fn sample() -> (RbTreeMap<u32, ()>, [NodeRef; 5]) {
        let mut map = RbTreeMap::new();
        let n: Vec<NodeRef> = (1..=5).map(|k| map.alloc(k, ())).collect();
        let [n1, n2, n3, n4, n5] = [n[0], n[1], n[2], n[3], n[4]];
        map.root = n2;
        map.set_child(n2, Dir::Left, n1);
        map.set_child(n2, Dir::Right, n4);
        map.set_parent(n1, n2);
        map.set_parent(n4, n2);
        map.set_child(n4, Dir::Left, n3);
        map.set_child(n4, Dir::Right, n5);
        map.set_parent(n3, n4);
        map.set_parent(n5, n4);
        map.len = 5;
        for x in [n1, n2, n3, n4, n5] {
            map.set_color(x, Color::Black);
        }
        (map, [n1, n2, n3, n4, n5])
    }

    #[test]
    fn left_rotate_promotes_right_child() {
        let (mut map, [n1, n2, n3, n4, n5]) = sample();
        map.rotate(n2, Dir::Left);
        assert_eq!(map.root, n4);
        assert!(map.parent(n4).is_sentinel());
        assert_eq!((map.left(n4), map.right(n4)), (n2, n5));
        assert_eq!((map.left(n2), map.right(n2)), (n1, n3));
        assert_eq!(map.parent(n3), n2);
        assert_eq!(map.parent(n2), n4);
        assert_eq!(map.rotations(), 1);
        let keys: Vec<u32> = map.keys().copied().collect();
        assert_eq!(keys, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn right_rotate_undoes_left_rotate() {
        let (mut map, [n1, n2, n3, n4, n5]) = sample();
        map.rotate(n2, Dir::Left);
        map.rotate(n4, Dir::Right);
        assert_eq!(map.root, n2);
        assert_eq!((map.left(n2), map.right(n2)), (n1, n4));
        assert_eq!((map.left(n4), map.right(n4)), (n3, n5));
        assert_eq!(map.parent(n3), n4);
        assert!(map.parent(NodeRef::SENTINEL).is_sentinel());
    }

    #[test]
    fn rotation_below_root_relinks_parent() {
        let (mut map, [_, n2, n3, n4, n5]) = sample();
        map.rotate(n4, Dir::Left);
        assert_eq!(map.right(n2), n5);
        assert_eq!(map.parent(n5), n2);
        assert_eq!(map.left(n5), n4);
        assert_eq!(map.left(n4), n3);
        assert!(map.right(n4).is_sentinel());
    }
}
