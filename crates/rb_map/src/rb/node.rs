use log::debug;

use super::RbTreeMap;

/// Stable handle to a node slot inside an [`RbTreeMap`].
///
/// Slot 0 is the sentinel shared by every external leaf and by the root's
/// parent edge. A handle is invalidated once its node is deleted.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeRef(u32);

impl NodeRef {
    pub const SENTINEL: Self = Self(0);

    #[inline(always)]
    pub fn is_sentinel(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub(super) fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Dir {
    Left = 0,
    Right = 1,
}

impl Dir {
    #[inline(always)]
    pub(super) fn flip(self) -> Self {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

#[derive(Clone, Debug)]
pub(super) struct Node<K, V> {
    /// `None` for the sentinel and for slots on the free list.
    pub(super) entry: Option<(K, V)>,
    pub(super) color: Color,
    pub(super) ch: [NodeRef; 2],
    pub(super) parent: NodeRef,
}

impl<K, V> Node<K, V> {
    pub(super) fn sentinel() -> Self {
        Self {
            entry: None,
            color: Color::Black,
            ch: [NodeRef::SENTINEL; 2],
            parent: NodeRef::SENTINEL,
        }
    }

    fn new(key: K, value: V) -> Self {
        Self {
            entry: Some((key, value)),
            color: Color::Red,
            ch: [NodeRef::SENTINEL; 2],
            parent: NodeRef::SENTINEL,
        }
    }
}

impl<K, V> RbTreeMap<K, V> {
    #[inline(always)]
    pub(super) fn node(&self, x: NodeRef) -> &Node<K, V> {
        debug_assert!(x.idx() < self.nodes.len());
        &self.nodes[x.idx()]
    }

    #[inline(always)]
    pub(super) fn node_mut(&mut self, x: NodeRef) -> &mut Node<K, V> {
        debug_assert!(x.idx() < self.nodes.len());
        &mut self.nodes[x.idx()]
    }

    #[inline(always)]
    pub(super) fn child(&self, x: NodeRef, dir: Dir) -> NodeRef {
        self.node(x).ch[dir as usize]
    }

    #[inline(always)]
    pub(super) fn set_child(&mut self, x: NodeRef, dir: Dir, c: NodeRef) {
        self.node_mut(x).ch[dir as usize] = c;
    }

    #[inline(always)]
    pub(super) fn left(&self, x: NodeRef) -> NodeRef {
        self.child(x, Dir::Left)
    }

    #[inline(always)]
    pub(super) fn right(&self, x: NodeRef) -> NodeRef {
        self.child(x, Dir::Right)
    }

    #[inline(always)]
    pub(super) fn parent(&self, x: NodeRef) -> NodeRef {
        self.node(x).parent
    }

    #[inline(always)]
    pub(super) fn set_parent(&mut self, x: NodeRef, p: NodeRef) {
        self.node_mut(x).parent = p;
    }

    #[inline(always)]
    pub(super) fn set_color(&mut self, x: NodeRef, color: Color) {
        debug_assert!(
            !x.is_sentinel() || color == Color::Black,
            "the sentinel must stay black"
        );
        self.node_mut(x).color = color;
    }

    #[inline(always)]
    pub(super) fn is_red(&self, x: NodeRef) -> bool {
        self.node(x).color == Color::Red
    }

    /// Which child slot of its parent `x` occupies.
    ///
    /// `x` may be the sentinel during delete-fixup; its sibling is then a
    /// real node, so the comparison against the left slot is unambiguous.
    #[inline(always)]
    pub(super) fn dir_of(&self, x: NodeRef) -> Dir {
        if self.left(self.parent(x)) == x {
            Dir::Left
        } else {
            Dir::Right
        }
    }

    /// Puts `new` into the child slot of `parent` that held `old`, or into
    /// the root slot when `parent` is the sentinel.
    pub(super) fn replace_child(&mut self, parent: NodeRef, old: NodeRef, new: NodeRef) {
        if parent.is_sentinel() {
            self.root = new;
        } else if self.left(parent) == old {
            self.set_child(parent, Dir::Left, new);
        } else {
            self.set_child(parent, Dir::Right, new);
        }
    }

    pub(super) fn key(&self, x: NodeRef) -> &K {
        &self.key_value(x).0
    }

    pub(super) fn alloc(&mut self, key: K, value: V) -> NodeRef {
        let node = Node::new(key, value);
        if let Some(x) = self.free.pop() {
            debug!("reusing freed slot {}", x.0);
            *self.node_mut(x) = node;
            return x;
        }
        debug_assert!(self.nodes.len() < u32::MAX as usize);
        let x = NodeRef(self.nodes.len() as u32);
        self.nodes.push(node);
        x
    }

    /// Moves the entry out of a detached node and puts its slot on the free list.
    pub(super) fn release(&mut self, x: NodeRef) -> (K, V) {
        debug_assert!(!x.is_sentinel());
        let node = self.node_mut(x);
        let entry = node.entry.take().expect("released slot holds an entry");
        node.color = Color::Black;
        node.ch = [NodeRef::SENTINEL; 2];
        node.parent = NodeRef::SENTINEL;
        self.free.push(x);
        entry
    }
}
