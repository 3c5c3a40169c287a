use std::time::{SystemTime, UNIX_EPOCH};

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::node::Direction;
use crate::tree::AvlTree;

fn load(keys: &[i64]) -> AvlTree<i64, i64> {
    let mut index: AvlTree<i64, i64> = AvlTree::new("test-avl");
    for key in keys.iter() {
        index.create(*key, *key * 10).unwrap();
    }
    index
}

fn levels(index: &AvlTree<i64, i64>) -> Vec<i64> {
    index.level_order().map(|(key, _)| *key).collect()
}

fn balance(index: &AvlTree<i64, i64>, key: i64) -> i8 {
    *index.search(&key).unwrap().meta()
}

#[test]
fn test_insert_single_rotation() {
    for keys in [[1, 2, 3], [3, 2, 1]].iter() {
        let index = load(keys);
        assert_eq!(levels(&index), vec![2, 1, 3]);
        for key in [1, 2, 3].iter() {
            assert_eq!(balance(&index, *key), 0);
        }
    }
}

#[test]
fn test_insert_double_rotation() {
    for keys in [[1, 3, 2], [3, 1, 2]].iter() {
        let index = load(keys);
        assert_eq!(levels(&index), vec![2, 1, 3]);
        for key in [1, 2, 3].iter() {
            assert_eq!(balance(&index, *key), 0);
        }
    }
}

#[test]
fn test_insert_double_rotation_heavy_pivot() {
    // 4 is left heavy when it becomes the pivot.
    let index = load(&[5, 2, 8, 1, 4, 3]);
    assert_eq!(levels(&index), vec![4, 2, 5, 1, 3, 8]);
    assert_eq!(balance(&index, 4), 0);
    assert_eq!(balance(&index, 2), 0);
    assert_eq!(balance(&index, 5), 1);

    // mirror image, 4 is right heavy.
    let index = load(&[3, 1, 6, 4, 7, 5]);
    assert_eq!(levels(&index), vec![4, 3, 6, 1, 5, 7]);
    assert_eq!(balance(&index, 4), 0);
    assert_eq!(balance(&index, 3), -1);
    assert_eq!(balance(&index, 6), 0);
}

#[test]
fn test_insert_sequential() {
    let mut index: AvlTree<i64, i64> = AvlTree::new("test-avl");
    for key in 1..=10 {
        index.create(key, key).unwrap();
        for k in 1..=key {
            let b = balance(&index, k);
            assert!(b >= -1 && b <= 1, "key {} balance {}", k, b);
        }
    }
    assert_eq!(index.height(), 4);
}

#[test]
fn test_delete_single_rotation() {
    let mut index = load(&[2, 1, 3, 4]);
    assert_eq!(index.height(), 3);
    assert_eq!(index.delete(&1), Some(10));
    assert_eq!(levels(&index), vec![3, 2, 4]);
    assert_eq!(index.height(), 2);
    for key in [2, 3, 4].iter() {
        assert_eq!(balance(&index, *key), 0);
    }
}

#[test]
fn test_delete_half_decrease() {
    // heavy child 4 is balanced, height does not change.
    let mut index = load(&[2, 1, 4, 3, 5]);
    assert_eq!(index.delete(&1), Some(10));
    assert_eq!(levels(&index), vec![4, 2, 5, 3]);
    assert_eq!(index.height(), 3);
    assert_eq!(balance(&index, 4), -1);
    assert_eq!(balance(&index, 2), 1);
    assert_eq!(balance(&index, 5), 0);

    // mirror image.
    let mut index = load(&[4, 5, 2, 1, 3]);
    assert_eq!(index.delete(&5), Some(50));
    assert_eq!(levels(&index), vec![2, 1, 4, 3]);
    assert_eq!(balance(&index, 2), 1);
    assert_eq!(balance(&index, 4), -1);
}

#[test]
fn test_delete_double_rotation() {
    let mut index = load(&[2, 1, 4, 3]);
    assert_eq!(index.delete(&1), Some(10));
    assert_eq!(levels(&index), vec![3, 2, 4]);
    for key in [2, 3, 4].iter() {
        assert_eq!(balance(&index, *key), 0);
    }
}

#[test]
fn test_delete_propagate() {
    // shrinking the right side of 8 propagates up to the root, which
    // rotates over its balanced left child.
    let keys = [8, 4, 12, 2, 6, 10, 14, 1, 3, 5, 7, 13, 15, 9];
    let mut index = load(&keys);
    assert_eq!(index.delete(&9), Some(90));
    assert_eq!(index.delete(&10), Some(100));
    assert_eq!(index.delete(&13), Some(130));
    assert_eq!(index.delete(&15), Some(150));
    assert_eq!(index.delete(&14), Some(140));
    assert_eq!(levels(&index), vec![4, 2, 8, 1, 3, 6, 12, 5, 7]);
    assert_eq!(balance(&index, 4), 1);
    assert_eq!(balance(&index, 8), -1);
}

#[test]
fn test_delete_successor() {
    let mut index = load(&[2, 1, 3]);
    assert_eq!(index.delete(&2), Some(20));
    assert_eq!(levels(&index), vec![3, 1]);
    assert_eq!(balance(&index, 3), -1);
}

#[test]
fn test_height_bound() {
    let seed = make_seed();
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut index: AvlTree<i64, i64> = AvlTree::new("test-avl");
    let mut n = 0;
    for key in 0..2000 {
        let key = if rng.gen::<bool>() { key } else { i64::from(rng.gen::<u32>()) };
        if index.create(key, key).is_ok() {
            n += 1;
        }
        let bound = 1.44 * ((n + 2) as f64).log2();
        assert!(index.height() as f64 <= bound, "seed {}", seed);
    }
}

#[test]
fn test_rotate_once() {
    use crate::avl::Avl;
    use crate::node::Node;

    // right heavy chain 1 -> 2 -> 3, rotate towards left.
    let mut link = Some(Node::new(1, 10, 2));
    if let Some(node) = link.as_mut() {
        let mut child = Node::new(2, 20, 1);
        *child.link_mut(Direction::Right) = Some(Node::new(3, 30, 0));
        *node.link_mut(Direction::Right) = Some(child);
    }
    assert!(Avl::rotate_once(&mut link, Direction::Left));

    let top = link.as_deref().unwrap();
    assert_eq!((top.key, top.meta), (2, 0));
    let left = top.child(Direction::Left).unwrap();
    assert_eq!((left.key, left.meta), (1, 0));
    let right = top.child(Direction::Right).unwrap();
    assert_eq!((right.key, right.meta), (3, 0));
}

include!("./ref_test.rs");
