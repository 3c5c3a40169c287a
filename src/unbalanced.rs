//! Plain binary search tree, no rebalancing. Baseline for the balanced
//! disciplines, its height is only bounded by the insertion order.

use std::cmp;

use crate::error::Error;
use crate::node::{Comparer, Direction, Link, Node};
use crate::strategy::Strategy;

/// Unbalanced discipline, refer to [`UnbalancedTree`](crate::UnbalancedTree).
#[derive(Clone, Copy, Debug, Default)]
pub struct Unbalanced;

impl Strategy for Unbalanced {
    type Meta = ();

    const NAME: &'static str = "unbalanced";

    fn insert<K, V>(root: &mut Link<K, V, ()>, key: K, value: V, cmp: Comparer<K>) -> Result<(), K> {
        // walk down until we hit an empty slot.
        let mut link = root;
        while let Some(node) = link {
            link = match Direction::towards(cmp(&key, &node.key)) {
                Some(dir) => node.link_mut(dir),
                None => return Err(key),
            };
        }
        *link = Some(Node::new(key, value, ()));
        Ok(())
    }

    fn remove<K, V>(link: &mut Link<K, V, ()>, key: &K, cmp: Comparer<K>) -> Option<(K, V)> {
        let node = link.as_mut()?;
        match Direction::towards(cmp(key, &node.key)) {
            Some(dir) => Unbalanced::remove(node.link_mut(dir), key, cmp),
            None => Unbalanced::unlink(link),
        }
    }

    fn check<K, V>(_node: &Node<K, V, ()>, left: usize, right: usize) -> Result<usize, Error<K, V>>
    where
        K: Clone,
        V: Clone,
    {
        Ok(1 + cmp::max(left, right))
    }
}

impl Unbalanced {
    // Detach the node held by `link` and return its entry.
    fn unlink<K, V>(link: &mut Link<K, V, ()>) -> Option<(K, V)> {
        let mut node = link.take()?;
        match node.take_child(Direction::Right) {
            // no right child, left child takes over.
            None => *link = node.take_child(Direction::Left),
            // right child has no left child, right child takes over.
            Some(mut right) if right.link(Direction::Left).is_none() => {
                *right.link_mut(Direction::Left) = node.take_child(Direction::Left);
                *link = Some(right);
            }
            // pull out the right subtree's minimum and move its entry here.
            Some(mut right) => {
                let min = Unbalanced::detach_min(right.link_mut(Direction::Left))?;
                let (key, value) = min.into_entry();
                let entry = node.replace_entry(key, value);
                *node.link_mut(Direction::Right) = Some(right);
                *link = Some(node);
                return Some(entry);
            }
        }
        Some(node.into_entry())
    }

    // Detach the leftmost node under `link`, its right subtree takes its
    // place.
    fn detach_min<K, V>(link: &mut Link<K, V, ()>) -> Option<Box<Node<K, V, ()>>> {
        let node = link.as_mut()?;
        if node.link(Direction::Left).is_some() {
            return Unbalanced::detach_min(node.link_mut(Direction::Left));
        }
        let mut min = link.take()?;
        *link = min.take_child(Direction::Right);
        Some(min)
    }
}
