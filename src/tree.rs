use std::cmp::Ordering;

use crate::{
    iter::{IntoIter, Iter},
    node::{self, AllocError, Direction, Node},
    visit::{self, TraversalOrder},
};

/// An ordered set of `i32` keys backed by an AVL-balanced binary search
/// tree.
#[derive(Debug, Clone, Default)]
pub struct AvlSet(Option<Box<Node>>);

impl AvlSet {
    /// Insert `value` into the set, rebalancing as needed.
    ///
    /// Returns true if the value was newly inserted, or false (leaving the
    /// tree untouched) if it was already present.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if storage for the new node cannot be
    /// allocated; the tree is unchanged.
    pub fn insert(&mut self, value: i32) -> Result<bool, AllocError> {
        let inserted = match self.0 {
            Some(_) => node::insert_balanced(&mut self.0, value)?,
            None => {
                self.0 = Some(Node::try_new(value)?);
                true
            }
        };

        // A completed insertion must leave the search order intact; a
        // violation here is a defect in the rotation surgery, not a caller
        // error.
        debug_assert!(self.is_bst());

        Ok(inserted)
    }

    /// Insert `value` without rebalancing, routing ties into the left
    /// subtree.
    ///
    /// Unlike [`insert`], duplicate values are stored. No height guarantee
    /// holds for trees built this way (sorted input produces a linked list),
    /// and ancestor balance tags are not maintained, so mixing this with
    /// [`insert`] on the same set is not supported. It exists to build
    /// reference trees that demonstrate what rebalancing buys.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if storage for the new node cannot be
    /// allocated; the tree is unchanged.
    ///
    /// [`insert`]: Self::insert
    pub fn insert_unbalanced(&mut self, value: i32) -> Result<(), AllocError> {
        node::insert_unbalanced(&mut self.0, value)
    }

    /// Returns true if `value` is in the set.
    pub fn contains(&self, value: i32) -> bool {
        let mut cur = self.0.as_deref();
        while let Some(node) = cur {
            cur = match value.cmp(&node.value()) {
                Ordering::Equal => return true,
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
            };
        }
        false
    }

    /// The height of the tree: -1 when empty, 0 for a single node.
    pub fn height(&self) -> i32 {
        node::height(self.0.as_deref())
    }

    /// Verify the search-order invariant across the whole tree.
    ///
    /// Always true for trees built through the public insertion methods; the
    /// checker exists so that callers (and tests) can assert it.
    pub fn is_bst(&self) -> bool {
        node::is_bst(self.0.as_deref(), i32::MIN, i32::MAX)
    }

    /// The number of nodes in the tree, counted by traversal in O(n).
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns true if the set holds no values.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// The root node, if any: the read-only entry point for walking the tree
    /// by hand or inspecting per-node balance factors.
    pub fn root(&self) -> Option<&Node> {
        self.0.as_deref()
    }

    /// Visit every node exactly once in the given order, passing each node
    /// and its depth (root = 0) to `visitor`.
    ///
    /// [`TraversalOrder::In`] visits values in ascending order;
    /// [`TraversalOrder::Post`] visits children before parents.
    pub fn traverse<F>(&self, order: TraversalOrder, mut visitor: F)
    where
        F: FnMut(&Node, usize),
    {
        if let Some(root) = self.0.as_deref() {
            visit::walk(root, order, 0, &mut visitor);
        }
    }

    /// Iterate over the values in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.iter().flat_map(|v| Iter::new(v)).map(|v| v.value())
    }

    /// Release every node, leaving the set empty and reusable.
    pub fn clear(&mut self) {
        // Unlink iteratively: dropping the root box directly recurses to the
        // tree height, which insert_unbalanced() does not bound.
        let mut stack = Vec::new();
        stack.extend(self.0.take());
        while let Some(mut n) = stack.pop() {
            stack.extend(n.link_mut(Direction::Left).take());
            stack.extend(n.link_mut(Direction::Right).take());
        }
    }
}

impl Drop for AvlSet {
    fn drop(&mut self) {
        self.clear();
    }
}

impl IntoIterator for AvlSet {
    type Item = i32;
    type IntoIter = IntoIter;

    fn into_iter(mut self) -> IntoIter {
        IntoIter::new(self.0.take())
    }
}
