//! Height balanced discipline. Every node keeps its balance-factor,
//! height of right subtree minus height of left subtree, within -1..=1.

use std::cmp;

use crate::error::Error;
use crate::node::{self, Comparer, Direction, Link, Node, Seek};
use crate::strategy::Strategy;

const LEFT_HEAVY: i8 = -1;
const BALANCED: i8 = 0;
const RIGHT_HEAVY: i8 = 1;

/// AVL discipline, refer to [`AvlTree`](crate::AvlTree).
#[derive(Clone, Copy, Debug, Default)]
pub struct Avl;

// (key, value, height decreased)
type Delete<K, V> = Option<(K, V, bool)>;

impl Strategy for Avl {
    type Meta = i8;

    const NAME: &'static str = "avl";

    fn insert<K, V>(root: &mut Link<K, V, i8>, key: K, value: V, cmp: Comparer<K>) -> Result<(), K> {
        Avl::insert_at(root, key, value, cmp).map(|_| ())
    }

    fn remove<K, V>(root: &mut Link<K, V, i8>, key: &K, cmp: Comparer<K>) -> Option<(K, V)> {
        let (key, value, _) = Avl::remove_at(root, &Seek::Equals(key), cmp)?;
        Some((key, value))
    }

    fn check<K, V>(node: &Node<K, V, i8>, left: usize, right: usize) -> Result<usize, Error<K, V>>
    where
        K: Clone,
        V: Clone,
    {
        let height = right as isize - left as isize;
        if height < isize::from(LEFT_HEAVY) || height > isize::from(RIGHT_HEAVY) {
            return Err(Error::AvlImbalance {
                key: node.key.clone(),
                value: node.value.clone(),
                height,
            });
        }
        if height != isize::from(node.meta) {
            return Err(Error::BalanceMismatch {
                key: node.key.clone(),
                value: node.value.clone(),
                height,
                balance: node.meta,
            });
        }
        Ok(1 + cmp::max(left, right))
    }
}

impl Avl {
    // Return whether the subtree under `link` grew in height.
    fn insert_at<K, V>(
        link: &mut Link<K, V, i8>,
        key: K,
        value: V,
        cmp: Comparer<K>,
    ) -> Result<bool, K> {
        let node = match link {
            Some(node) => node,
            None => {
                *link = Some(Node::new(key, value, BALANCED));
                return Ok(true);
            }
        };

        let dir = match Direction::towards(cmp(&key, &node.key)) {
            Some(dir) => dir,
            None => return Err(key),
        };
        if !Avl::insert_at(node.link_mut(dir), key, value, cmp)? {
            return Ok(false);
        }

        node.meta += dir.sign();
        let balance = node.meta;
        match balance {
            BALANCED => Ok(false),
            LEFT_HEAVY | RIGHT_HEAVY => Ok(true),
            // rotation brings the subtree back to its height before insert.
            _ => Ok(!Avl::rebalance(link)),
        }
    }

    // Remove the node targeted by `seek`, return its entry and whether
    // the subtree under `link` shrank in height.
    fn remove_at<K, V>(link: &mut Link<K, V, i8>, seek: &Seek<K>, cmp: Comparer<K>) -> Delete<K, V> {
        let node = link.as_mut()?;
        match node.seek(seek, cmp) {
            Some(dir) => {
                let (key, value, shrunk) = Avl::remove_at(node.link_mut(dir), seek, cmp)?;
                Some((key, value, shrunk && Avl::shrink(link, dir)))
            }
            None if node.link(Direction::Left).is_some() && node.link(Direction::Right).is_some() => {
                // replace with in-order successor.
                let dir = Direction::Right;
                let (key, value, shrunk) =
                    Avl::remove_at(node.link_mut(dir), &Seek::SubtreeMinimum, cmp)?;
                let (key, value) = node.replace_entry(key, value);
                Some((key, value, shrunk && Avl::shrink(link, dir)))
            }
            None => {
                let mut node = link.take()?;
                *link = match node.take_child(Direction::Left) {
                    Some(left) => Some(left),
                    None => node.take_child(Direction::Right),
                };
                let (key, value) = node.into_entry();
                Some((key, value, true))
            }
        }
    }

    // Subtree in direction `dir` of `link` has shrunk by one, update
    // balance-factor and return whether `link` itself shrank.
    fn shrink<K, V>(link: &mut Link<K, V, i8>, dir: Direction) -> bool {
        let node = match link.as_mut() {
            Some(node) => node,
            None => return false,
        };
        node.meta -= dir.sign();
        let balance = node.meta;
        match balance {
            // was heavy on `dir` side.
            BALANCED => true,
            // was balanced, the other side still holds the height.
            LEFT_HEAVY | RIGHT_HEAVY => false,
            _ => Avl::rebalance(link),
        }
    }

    // Restore balance for a node whose balance-factor is +2 or -2. Return
    // true if the rotation decreased the subtree height, a single rotation
    // over a balanced child does not.
    fn rebalance<K, V>(link: &mut Link<K, V, i8>) -> bool {
        let (balance, child_balance) = match link.as_ref() {
            Some(node) if node.meta < LEFT_HEAVY => match node.child(Direction::Left) {
                Some(child) => (node.meta, child.meta),
                None => return false,
            },
            Some(node) if node.meta > RIGHT_HEAVY => match node.child(Direction::Right) {
                Some(child) => (node.meta, child.meta),
                None => return false,
            },
            _ => return false,
        };
        let heavy = if balance < 0 { Direction::Left } else { Direction::Right };
        let dir = heavy.opposite();

        if child_balance == -heavy.sign() {
            Avl::rotate_twice(link, dir);
            true
        } else {
            Avl::rotate_once(link, dir)
        }
    }

    // Single rotation towards `dir`, balance-factors of the two nodes
    // involved are recomputed in closed form. Return true if subtree
    // height decreased.
    pub(crate) fn rotate_once<K, V>(link: &mut Link<K, V, i8>, dir: Direction) -> bool {
        // normalise to a left rotation, s = +1, and mirror for right.
        let s = -dir.sign();
        let (a, b) = match link.as_ref() {
            Some(node) => match node.child(dir.opposite()) {
                Some(child) => (s * node.meta, s * child.meta),
                None => return false,
            },
            None => return false,
        };
        let shrinks = b != BALANCED;

        let a_new = a - 1 - cmp::max(b, 0);
        let b_new = b - 1 + cmp::min(a_new, 0);

        node::rotate(link, dir);
        if let Some(top) = link.as_mut() {
            top.meta = s * b_new;
            if let Some(down) = top.link_mut(dir).as_mut() {
                down.meta = s * a_new;
            }
        }
        shrinks
    }

    // Double rotation towards `dir`, the inner grandchild becomes the
    // subtree root and the three nodes end up balanced around it.
    pub(crate) fn rotate_twice<K, V>(link: &mut Link<K, V, i8>, dir: Direction) {
        let pivot = match link.as_ref() {
            Some(node) => node
                .child(dir.opposite())
                .and_then(|child| child.child(dir))
                .map(|grand| grand.meta),
            None => None,
        };
        let pivot = match pivot {
            Some(pivot) => pivot,
            None => panic!("rotate_twice(): missing inner grandchild ? Call the programmer"),
        };

        node::rotate_twice(link, dir);
        if let Some(top) = link.as_mut() {
            top.meta = BALANCED;
            if let Some(left) = top.link_mut(Direction::Left).as_mut() {
                left.meta = -cmp::max(pivot, 0);
            }
            if let Some(right) = top.link_mut(Direction::Right).as_mut() {
                right.meta = -cmp::min(pivot, 0);
            }
        }
    }
}
