use itertools::Itertools;
use ordered_float::OrderedFloat;
use rand::prelude::*;
use rand_pcg::Pcg64;
use std::collections::BTreeMap;

use ordtree::{AvlTree, Tree};

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_of<V>(tree: &AvlTree<u32, V>) -> Vec<u32> {
        tree.iter().map(|(k, _)| *k).collect()
    }

    // Every insertion order of 1..=7, then every single removal from each
    // resulting tree. Removals are where equal-height siblings show up, so
    // this covers the tie-break in the rotation choice for all small shapes.
    #[test]
    fn every_permutation_then_every_removal() {
        let mut shapes = 0;
        for order in (1..=7u32).permutations(7) {
            let tree = order.iter().map(|&k| (k, k * 10)).collect::<AvlTree<_, _>>();
            assert_eq!(tree.validate(), Ok(()), "after inserting {:?}", order);
            assert!(tree.height() <= 4);
            if tree.height() == 3 {
                shapes += 1;
            }
            for &gone in &order {
                let mut smaller = tree.clone();
                assert_eq!(smaller.remove(&gone), Some(gone * 10));
                assert_eq!(
                    smaller.validate(),
                    Ok(()),
                    "after inserting {:?} and removing {}",
                    order,
                    gone
                );
                assert!(smaller.is_balanced());
                let expected = (1..=7).filter(|&k| k != gone).collect::<Vec<_>>();
                assert_eq!(keys_of(&smaller), expected);
            }
        }
        assert!(shapes > 0);
    }

    #[test]
    fn drain_in_every_order_of_five() {
        for build in (1..=5u32).permutations(5) {
            for drain in (1..=5u32).permutations(5) {
                let mut tree = build.iter().map(|&k| (k, ())).collect::<AvlTree<_, _>>();
                for (i, k) in drain.iter().enumerate() {
                    tree.remove(k);
                    assert!(tree.is_balanced());
                    assert_eq!(tree.len(), 4 - i);
                }
                assert!(tree.is_empty());
            }
        }
    }

    #[test]
    fn seeded_random_workload() {
        let mut rng = Pcg64::seed_from_u64(5);
        let mut tree = AvlTree::new();
        let mut naive = BTreeMap::new();
        for step in 0..20_000 {
            let k = rng.random_range(0..2_000u32);
            if rng.random_ratio(3, 5) {
                assert_eq!(tree.insert(k, step), naive.insert(k, step));
            } else {
                assert_eq!(tree.remove(&k), naive.remove(&k));
            }
            if step % 1_000 == 0 {
                assert_eq!(tree.validate(), Ok(()));
            }
        }
        assert_eq!(tree.validate(), Ok(()));
        assert!(tree.iter().eq(naive.iter()));
    }

    #[test]
    fn shuffled_bulk_insert_then_half_removed() {
        let mut rng = Pcg64::seed_from_u64(11);
        let mut keys = (0..5_000u32).collect::<Vec<_>>();
        keys.shuffle(&mut rng);
        let mut tree = keys.iter().map(|&k| (k, ())).collect::<AvlTree<_, _>>();
        assert!(tree.height() <= 17);
        for k in keys.iter().step_by(2) {
            tree.remove(k);
        }
        assert_eq!(tree.len(), 2_500);
        assert_eq!(tree.validate(), Ok(()));
        assert!(tree
            .iter()
            .map(|(k, _)| *k)
            .tuple_windows()
            .all(|(a, b)| a < b));
    }

    #[test]
    fn float_keys_through_ordered_float() {
        let mut tree: Tree<OrderedFloat<f64>, &str> = Tree::new();
        tree.insert(OrderedFloat(2.5), "b");
        tree.insert(OrderedFloat(-1.0), "a");
        tree.insert(OrderedFloat(f64::INFINITY), "c");
        tree.insert(OrderedFloat(f64::NAN), "nan");
        let keys = tree.iter().map(|(k, _)| k.0).collect::<Vec<_>>();
        assert_eq!(&keys[..3], &[-1.0, 2.5, f64::INFINITY]);
        assert!(keys[3].is_nan());
        assert_eq!(tree.get(&OrderedFloat(f64::NAN)), Some(&"nan"));
        assert_eq!(tree.remove(&OrderedFloat(2.5)), Some("b"));
        assert!(tree.is_balanced());
    }
}
