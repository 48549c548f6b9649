//! An ordered set of `i32` keys backed by an AVL-balanced binary search
//! tree.
//!
//! Each node carries a balance factor (the height difference between its
//! right and left subtrees) instead of a height, and insertion rebalances by
//! tracking a single rebalancing pivot during descent: the deepest node on
//! the search path whose subtrees were not already of equal height. At most
//! one single or double rotation per insertion restores the tree to
//! tolerance, keeping lookups and inserts O(log n) with the classic AVL
//! worst-case height of ~1.44 log2(n).
//!
//! ```
//! use avlset::AvlSet;
//!
//! # fn main() -> Result<(), avlset::AllocError> {
//! let mut set = AvlSet::default();
//!
//! for v in [42, 22, 25] {
//!     set.insert(v)?;
//! }
//!
//! // Re-inserting an existing value is a no-op.
//! assert!(!set.insert(22)?);
//!
//! assert!(set.contains(25));
//! assert_eq!(set.iter().collect::<Vec<_>>(), vec![22, 25, 42]);
//! # Ok(())
//! # }
//! ```
//!
//! The set also exposes its structure read-only: [`AvlSet::traverse`] walks
//! the tree in pre/in/post order with node depths, [`AvlSet::root`] hands out
//! per-node balance factors, and [`AvlSet::height`] / [`AvlSet::is_bst`]
//! report the global shape. An unbalanced reference insertion
//! ([`AvlSet::insert_unbalanced`]) is included for building the degenerate
//! trees the rebalancing exists to prevent.

#![deny(rustdoc::broken_intra_doc_links, rust_2018_idioms)]
#![warn(missing_debug_implementations)]

mod iter;
mod node;
mod tree;
mod visit;


pub use iter::IntoIter;
pub use node::{AllocError, Node};
pub use tree::AvlSet;
pub use visit::TraversalOrder;
