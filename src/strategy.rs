use std::cmp::Ordering;

use crate::depth::Depth;
use crate::error::Error;
use crate::node::{Comparer, Direction, Link, Node};

/// Strategy is a balancing discipline for [`Tree`](crate::Tree).
///
/// All routines are static and operate on the root link, which is
/// threaded down by mutable reference. Rotations replace the subtree held
/// by a link in place, so callers see the new subtree root without any
/// parent back-pointers.
pub trait Strategy {
    /// Per node balancing state.
    type Meta: Clone;

    /// Name of this discipline, used while logging.
    const NAME: &'static str;

    /// Whether the measure returned by [`Strategy::check`] is the
    /// black-height of the subtree, instead of its height.
    const BLACK_HEIGHT: bool = false;

    /// Insert a new entry under `root`. If key is already present,
    /// leave the tree untouched and hand the key back.
    fn insert<K, V>(
        root: &mut Link<K, V, Self::Meta>,
        key: K,
        value: V,
        cmp: Comparer<K>,
    ) -> Result<(), K>;

    /// Remove entry for `key` from `root` and return it. If key is not
    /// present, tree is left untouched.
    fn remove<K, V>(
        root: &mut Link<K, V, Self::Meta>,
        key: &K,
        cmp: Comparer<K>,
    ) -> Option<(K, V)>;

    /// Validate balancing state of `node`, given the measures computed for
    /// its left and right subtree, and return the measure for `node`.
    fn check<K, V>(
        node: &Node<K, V, Self::Meta>,
        left: usize,
        right: usize,
    ) -> Result<usize, Error<K, V>>
    where
        K: Clone,
        V: Clone;

    /// Validate rules that apply only to the root node.
    fn check_root<K, V>(_root: &Node<K, V, Self::Meta>) -> Result<(), Error<K, V>>
    where
        K: Clone,
        V: Clone,
    {
        Ok(())
    }
}

/// Book-keeping for a single validation pass.
pub(crate) struct Walk<K> {
    pub(crate) cmp: Comparer<K>,
    pub(crate) depths: Depth,
    pub(crate) count: usize,
}

impl<K> Walk<K> {
    pub(crate) fn new(cmp: Comparer<K>) -> Walk<K> {
        Walk {
            cmp,
            depths: Depth::new(),
            count: 0,
        }
    }
}

/// Recursively validate the subtree under `node`. Every key must lie
/// strictly between the keys of `low` and `high`, the nearest ancestors
/// whose right and left subtree, respectively, hold `node`.
pub(crate) fn validate_tree<K, V, S>(
    node: Option<&Node<K, V, S::Meta>>,
    low: Option<&Node<K, V, S::Meta>>,
    high: Option<&Node<K, V, S::Meta>>,
    depth: usize,
    walk: &mut Walk<K>,
) -> Result<usize, Error<K, V>>
where
    K: Clone,
    V: Clone,
    S: Strategy,
{
    let node = match node {
        Some(node) => node,
        None => {
            walk.depths.sample(depth);
            return Ok(0);
        }
    };
    walk.count += 1;

    if let Some(low) = low {
        if (walk.cmp)(&node.key, &low.key) != Ordering::Greater {
            return Err(sort_error(node, low));
        }
    }
    if let Some(high) = high {
        if (walk.cmp)(&node.key, &high.key) != Ordering::Less {
            return Err(sort_error(node, high));
        }
    }

    let (left, right) = (node.child(Direction::Left), node.child(Direction::Right));
    let lmeasure = validate_tree::<K, V, S>(left, low, Some(node), depth + 1, walk)?;
    let rmeasure = validate_tree::<K, V, S>(right, Some(node), high, depth + 1, walk)?;
    S::check(node, lmeasure, rmeasure)
}

fn sort_error<K, V, M>(node: &Node<K, V, M>, other: &Node<K, V, M>) -> Error<K, V>
where
    K: Clone,
    V: Clone,
{
    Error::SortError {
        key: node.key.clone(),
        value: node.value.clone(),
        other_key: other.key.clone(),
        other_value: other.value.clone(),
    }
}
