//! Package implement ordered in-memory index on binary search trees.
//!
//! Three balancing disciplines share the same node model and the same
//! index API, refer to [`Tree`]:
//!
//! * [`UnbalancedTree`], plain binary search tree, baseline.
//! * [`AvlTree`], height balanced, every node keeps a balance-factor.
//! * [`RedBlackTree`], color balanced, every node keeps a color.
//!
//! ```
//! use bst_index::RedBlackTree;
//!
//! let mut index: RedBlackTree<u64, String> = RedBlackTree::new("users");
//! index.create(30, "jill".to_string()).unwrap();
//! index.create(10, "jack".to_string()).unwrap();
//! assert_eq!(index.get(&10), Some(&"jack".to_string()));
//! assert_eq!(index.keys().copied().collect::<Vec<u64>>(), vec![10, 30]);
//! assert!(index.validate().is_ok());
//! ```
//!
//! Build with feature `consistency_check` to validate the whole tree
//! after every mutation, validation failures panic.

mod avl;
mod depth;
mod error;
mod node;
mod rb;
mod strategy;
mod traverse;
mod tree;
mod unbalanced;

pub use crate::avl::Avl;
pub use crate::depth::Depth;
pub use crate::error::Error;
pub use crate::node::{Comparer, Direction, Key, Link, Node};
pub use crate::rb::{Color, RedBlack};
pub use crate::strategy::Strategy;
pub use crate::traverse::{InOrder, LevelOrder, PostOrder, PreOrder};
pub use crate::tree::{AvlTree, RedBlackTree, Stats, Tree, UnbalancedTree};
pub use crate::unbalanced::Unbalanced;

#[cfg(test)]
mod avl_test;
#[cfg(test)]
mod prop_test;
#[cfg(test)]
mod traverse_test;
