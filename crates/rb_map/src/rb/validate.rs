use thiserror::Error;

use super::RbTreeMap;
use super::node::{Color, NodeRef};

/// A broken red-black or search-tree invariant.
///
/// These indicate a defect in the tree code, never bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("sentinel is not black")]
    SentinelNotBlack,

    #[error("root {node:?} is red")]
    RedRoot { node: NodeRef },

    #[error("root {node:?} has parent {parent:?}")]
    RootHasParent { node: NodeRef, parent: NodeRef },

    #[error("red node {node:?} has red child {child:?}")]
    DoubleRed { node: NodeRef, child: NodeRef },

    #[error("black-height mismatch below {node:?}: left {left}, right {right}")]
    BlackHeightMismatch {
        node: NodeRef,
        left: usize,
        right: usize,
    },

    #[error("{child:?} is a child of {parent:?} but records parent {recorded:?}")]
    BrokenParentLink {
        parent: NodeRef,
        child: NodeRef,
        recorded: NodeRef,
    },

    #[error("keys out of order at in-order position {position}")]
    OutOfOrder { position: usize },

    #[error("{found} nodes reachable from the root, but len is {expected}")]
    LenMismatch { expected: usize, found: usize },
}

impl<K: Ord, V> RbTreeMap<K, V> {
    /// Checks every red-black and search-tree invariant.
    ///
    /// Returns the black-height of the root: the number of black nodes on any
    /// path from the root down to the sentinel, counting the sentinel and not
    /// the root. An empty tree has black-height 0.
    pub fn validate(&self) -> Result<usize, InvariantViolation> {
        if self.node(NodeRef::SENTINEL).color != Color::Black {
            return Err(InvariantViolation::SentinelNotBlack);
        }

        let root = self.root;
        if root.is_sentinel() {
            return match self.len {
                0 => Ok(0),
                expected => Err(InvariantViolation::LenMismatch { expected, found: 0 }),
            };
        }
        if self.is_red(root) {
            return Err(InvariantViolation::RedRoot { node: root });
        }
        let parent = self.parent(root);
        if !parent.is_sentinel() {
            return Err(InvariantViolation::RootHasParent { node: root, parent });
        }

        let mut found = 0;
        let height = self.check_subtree(root, &mut found)?;
        if found != self.len {
            return Err(InvariantViolation::LenMismatch {
                expected: self.len,
                found,
            });
        }

        // Parent links are sound at this point, so the in-order walk is safe.
        let mut keys = self.keys();
        if let Some(mut prev) = keys.next() {
            for (i, key) in keys.enumerate() {
                if prev >= key {
                    return Err(InvariantViolation::OutOfOrder { position: i + 1 });
                }
                prev = key;
            }
        }

        Ok(height - 1)
    }

    /// Panics with the first broken invariant. Test builds run this after
    /// every insert and delete.
    #[cfg(test)]
    pub(super) fn assert_valid(&self) {
        if let Err(violation) = self.validate() {
            panic!("red-black invariant violated: {violation}");
        }
    }

    /// Black node count from `x` down to the sentinel, both ends included.
    fn check_subtree(&self, x: NodeRef, found: &mut usize) -> Result<usize, InvariantViolation> {
        if x.is_sentinel() {
            return Ok(1);
        }
        *found += 1;
        if *found > self.len {
            // A cycle or a shared subtree; stop before walking forever.
            return Err(InvariantViolation::LenMismatch {
                expected: self.len,
                found: *found,
            });
        }

        let [l, r] = self.node(x).ch;
        for c in [l, r] {
            if c.is_sentinel() {
                continue;
            }
            let recorded = self.parent(c);
            if recorded != x {
                return Err(InvariantViolation::BrokenParentLink {
                    parent: x,
                    child: c,
                    recorded,
                });
            }
            if self.is_red(x) && self.is_red(c) {
                return Err(InvariantViolation::DoubleRed { node: x, child: c });
            }
        }

        let left = self.check_subtree(l, found)?;
        let right = self.check_subtree(r, found)?;
        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch { node: x, left, right });
        }
        Ok(left + usize::from(!self.is_red(x)))
    }
}
