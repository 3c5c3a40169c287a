use std::collections::BTreeMap;

use quickcheck::quickcheck;

use crate::strategy::Strategy;
use crate::tree::Tree;
use crate::{Avl, RedBlack, Unbalanced};

// load unique keys, later duplicates are rejected and must not disturb
// the index.
fn load<S: Strategy>(keys: &[i16]) -> (Tree<i16, u32, S>, BTreeMap<i16, u32>) {
    let mut index: Tree<i16, u32, S> = Tree::new("test-prop");
    let mut model = BTreeMap::new();
    for (i, key) in keys.iter().enumerate() {
        let value = i as u32;
        let res = index.create(*key, value);
        if model.contains_key(key) {
            assert!(res.is_err());
        } else {
            assert!(res.is_ok());
            model.insert(*key, value);
        }
    }
    (index, model)
}

fn ordered<S: Strategy>(keys: Vec<i16>) -> bool {
    let (index, model) = load::<S>(&keys);
    let ok = index.validate().is_ok() && index.len() == model.len();
    ok && index.iter().eq(model.iter())
}

fn round_trip<S: Strategy>(keys: Vec<i16>, removes: Vec<i16>) -> bool {
    let (mut index, mut model) = load::<S>(&keys);
    for key in removes.iter().chain(keys.iter()) {
        if index.delete(key) != model.remove(key) {
            return false;
        }
    }
    index.is_empty() && index.root().is_none() && index.validate().is_ok()
}

fn remove_some<S: Strategy>(keys: Vec<i16>, removes: Vec<i16>) -> bool {
    let (mut index, mut model) = load::<S>(&keys);
    for key in removes.iter() {
        if index.remove(key) != model.remove(key).is_some() {
            return false;
        }
    }
    index.validate().is_ok() && index.iter().eq(model.iter())
}

fn clone_independent<S: Strategy>(keys: Vec<i16>) -> bool {
    let (index, model) = load::<S>(&keys);
    let mut cloned = index.clone();
    if !cloned.pre_order().eq(index.pre_order()) {
        return false;
    }
    for key in keys.iter() {
        cloned.delete(key);
    }
    cloned.is_empty() && index.iter().eq(model.iter())
}

quickcheck! {
    fn qc_ordered_unbalanced(keys: Vec<i16>) -> bool {
        ordered::<Unbalanced>(keys)
    }

    fn qc_ordered_avl(keys: Vec<i16>) -> bool {
        ordered::<Avl>(keys)
    }

    fn qc_ordered_rb(keys: Vec<i16>) -> bool {
        ordered::<RedBlack>(keys)
    }

    fn qc_round_trip_avl(keys: Vec<i16>, removes: Vec<i16>) -> bool {
        round_trip::<Avl>(keys, removes)
    }

    fn qc_round_trip_rb(keys: Vec<i16>, removes: Vec<i16>) -> bool {
        round_trip::<RedBlack>(keys, removes)
    }

    fn qc_round_trip_unbalanced(keys: Vec<i16>, removes: Vec<i16>) -> bool {
        round_trip::<Unbalanced>(keys, removes)
    }

    fn qc_remove_some_avl(keys: Vec<i16>, removes: Vec<i16>) -> bool {
        remove_some::<Avl>(keys, removes)
    }

    fn qc_remove_some_rb(keys: Vec<i16>, removes: Vec<i16>) -> bool {
        remove_some::<RedBlack>(keys, removes)
    }

    fn qc_height_avl(keys: Vec<i16>) -> bool {
        let (index, model) = load::<Avl>(&keys);
        let bound = 1.44 * ((model.len() + 2) as f64).log2();
        index.height() as f64 <= bound
    }

    fn qc_height_rb(keys: Vec<i16>) -> bool {
        let (index, model) = load::<RedBlack>(&keys);
        let bound = 2.0 * ((model.len() + 1) as f64).log2();
        index.height() as f64 <= bound
    }

    fn qc_clone_avl(keys: Vec<i16>) -> bool {
        clone_independent::<Avl>(keys)
    }

    fn qc_clone_rb(keys: Vec<i16>) -> bool {
        clone_independent::<RedBlack>(keys)
    }
}
