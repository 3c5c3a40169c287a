//! Lazy traversals over an immutable [`Tree`]. Each iterator borrows the
//! tree for its lifetime, hence the tree cannot be mutated while a walk
//! is in progress.

use std::collections::VecDeque;

use crate::node::{Direction, Node};
use crate::strategy::Strategy;
use crate::tree::Tree;

/// Iterate entries in ascending key order, left subtree, node, right
/// subtree.
pub struct InOrder<'a, K, V, M> {
    stack: Vec<&'a Node<K, V, M>>,
    remaining: usize,
}

impl<'a, K, V, M> InOrder<'a, K, V, M> {
    pub fn new<S>(tree: &'a Tree<K, V, S>) -> InOrder<'a, K, V, M>
    where
        S: Strategy<Meta = M>,
    {
        let mut iter = InOrder {
            stack: vec![],
            remaining: tree.len(),
        };
        iter.push_lefts(tree.root());
        iter
    }

    fn push_lefts(&mut self, mut node: Option<&'a Node<K, V, M>>) {
        while let Some(nref) = node {
            self.stack.push(nref);
            node = nref.child(Direction::Left);
        }
    }
}

impl<'a, K, V, M> Iterator for InOrder<'a, K, V, M> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_lefts(node.child(Direction::Right));
        self.remaining = self.remaining.saturating_sub(1);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, M> ExactSizeIterator for InOrder<'a, K, V, M> {}

/// Iterate entries as node, left subtree, right subtree.
pub struct PreOrder<'a, K, V, M> {
    stack: Vec<&'a Node<K, V, M>>,
    remaining: usize,
}

impl<'a, K, V, M> PreOrder<'a, K, V, M> {
    pub fn new<S>(tree: &'a Tree<K, V, S>) -> PreOrder<'a, K, V, M>
    where
        S: Strategy<Meta = M>,
    {
        PreOrder {
            stack: tree.root().into_iter().collect(),
            remaining: tree.len(),
        }
    }
}

impl<'a, K, V, M> Iterator for PreOrder<'a, K, V, M> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // right goes first so that left pops first.
        self.stack.extend(node.child(Direction::Right));
        self.stack.extend(node.child(Direction::Left));
        self.remaining = self.remaining.saturating_sub(1);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, M> ExactSizeIterator for PreOrder<'a, K, V, M> {}

/// Iterate entries as left subtree, right subtree, node.
pub struct PostOrder<'a, K, V, M> {
    // second item is true once the node's children are on the stack.
    stack: Vec<(&'a Node<K, V, M>, bool)>,
    remaining: usize,
}

impl<'a, K, V, M> PostOrder<'a, K, V, M> {
    pub fn new<S>(tree: &'a Tree<K, V, S>) -> PostOrder<'a, K, V, M>
    where
        S: Strategy<Meta = M>,
    {
        PostOrder {
            stack: tree.root().into_iter().map(|node| (node, false)).collect(),
            remaining: tree.len(),
        }
    }
}

impl<'a, K, V, M> Iterator for PostOrder<'a, K, V, M> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, expanded) = self.stack.pop()?;
            if expanded {
                self.remaining = self.remaining.saturating_sub(1);
                break Some((&node.key, &node.value));
            }
            self.stack.push((node, true));
            if let Some(right) = node.child(Direction::Right) {
                self.stack.push((right, false));
            }
            if let Some(left) = node.child(Direction::Left) {
                self.stack.push((left, false));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, M> ExactSizeIterator for PostOrder<'a, K, V, M> {}

/// Iterate entries level by level from the root, left to right within
/// a level.
pub struct LevelOrder<'a, K, V, M> {
    queue: VecDeque<&'a Node<K, V, M>>,
    remaining: usize,
}

impl<'a, K, V, M> LevelOrder<'a, K, V, M> {
    pub fn new<S>(tree: &'a Tree<K, V, S>) -> LevelOrder<'a, K, V, M>
    where
        S: Strategy<Meta = M>,
    {
        LevelOrder {
            queue: tree.root().into_iter().collect(),
            remaining: tree.len(),
        }
    }
}

impl<'a, K, V, M> Iterator for LevelOrder<'a, K, V, M> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.child(Direction::Left));
        self.queue.extend(node.child(Direction::Right));
        self.remaining = self.remaining.saturating_sub(1);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, M> ExactSizeIterator for LevelOrder<'a, K, V, M> {}
