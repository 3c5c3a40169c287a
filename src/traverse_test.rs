use crate::strategy::Strategy;
use crate::tree::{AvlTree, RedBlackTree, Tree, UnbalancedTree};
use crate::{Avl, RedBlack, Unbalanced};

const KEYS: [i64; 7] = [13, 3, 20, 7, 15, 1, 4];

fn load<S: Strategy>() -> Tree<i64, i64, S> {
    let mut index: Tree<i64, i64, S> = Tree::new("test-traverse");
    for key in KEYS.iter() {
        index.create(*key, -key).unwrap();
    }
    index
}

fn collect<'a, I>(iter: I) -> Vec<i64>
where
    I: Iterator<Item = (&'a i64, &'a i64)>,
{
    iter.map(|(key, value)| {
        assert_eq!(*value, -key);
        *key
    })
    .collect()
}

fn do_orders<S: Strategy>() {
    let index = load::<S>();
    assert_eq!(collect(index.iter()), vec![1, 3, 4, 7, 13, 15, 20]);
    assert_eq!(collect(index.pre_order()), vec![13, 3, 1, 7, 4, 20, 15]);
    assert_eq!(collect(index.post_order()), vec![1, 4, 7, 3, 15, 20, 13]);
    assert_eq!(collect(index.level_order()), vec![13, 3, 20, 1, 7, 15, 4]);
}

#[test]
fn test_orders() {
    // no rotation is needed for this insert order.
    do_orders::<Unbalanced>();
    do_orders::<Avl>();
    do_orders::<RedBlack>();
}

#[test]
fn test_empty() {
    let index: AvlTree<i64, i64> = AvlTree::new("test-traverse");
    assert!(index.iter().next().is_none());
    assert!(index.pre_order().next().is_none());
    assert!(index.post_order().next().is_none());
    assert!(index.level_order().next().is_none());
}

#[test]
fn test_size_hint() {
    let index = load::<RedBlack>();
    let mut iter = index.level_order();
    assert_eq!(iter.len(), 7);
    iter.next();
    iter.next();
    assert_eq!(iter.size_hint(), (5, Some(5)));
    assert_eq!(index.post_order().count(), 7);
    assert_eq!(index.pre_order().len(), 7);
}

#[test]
fn test_into_iter() {
    let index: RedBlackTree<i64, i64> = load();
    let mut keys = vec![];
    for (key, _) in &index {
        keys.push(*key);
    }
    assert_eq!(keys, vec![1, 3, 4, 7, 13, 15, 20]);

    let values: Vec<i64> = index.values().copied().collect();
    assert_eq!(values, vec![-1, -3, -4, -7, -13, -15, -20]);
}

#[test]
fn test_skewed() {
    let mut index: UnbalancedTree<i64, i64> = UnbalancedTree::new("test-traverse");
    for key in (0..100).rev() {
        index.create(key, -key).unwrap();
    }
    let keys: Vec<i64> = (0..100).collect();
    assert_eq!(collect(index.iter()), keys);
    assert_eq!(collect(index.post_order()), keys);
    let keys: Vec<i64> = (0..100).rev().collect();
    assert_eq!(collect(index.pre_order()), keys);
    assert_eq!(collect(index.level_order()), keys);
}
