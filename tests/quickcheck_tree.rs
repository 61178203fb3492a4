use itertools::Itertools;
use quickcheck::{Arbitrary, Gen, TestResult};
use quickcheck_macros::*;
use std::collections::{BTreeMap, BTreeSet};

use ordtree::{Avl, Balance, ConfigT, Tree, Unbalanced};

// Validates after every mutation without the stderr tracing of DebugConfig.
struct Checked {}

impl ConfigT for Checked {
    const DEBUG: bool = false;
    const CHECK_INVARIANTS: bool = true;
}

type CheckedTree<B> = Tree<u8, u32, B, Checked>;

#[derive(Clone, Debug)]
enum TreeOp {
    Insert(u8, u32),
    Remove(u8),
    Get(u8),
    Successor(u8),
}

impl Arbitrary for TreeOp {
    fn arbitrary(g: &mut Gen) -> Self {
        let op = usize::arbitrary(g) % 100;
        // a small key space so removals and overwrites actually hit
        let key = u8::arbitrary(g) % 64;
        match op {
            0..55 => TreeOp::Insert(key, u32::arbitrary(g)),
            55..85 => TreeOp::Remove(key),
            85..95 => TreeOp::Get(key),
            95..100 => TreeOp::Successor(key),
            _ => unreachable!(),
        }
    }
}

#[derive(Clone, Debug)]
struct Ops {
    ops: Vec<TreeOp>,
}

impl Arbitrary for Ops {
    fn arbitrary(g: &mut Gen) -> Self {
        let ops = Vec::<TreeOp>::arbitrary(g);
        Ops { ops }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum OpRes {
    Value(Option<u32>),
    Key(Option<u8>),
}

fn apply<B: Balance>(tree: &mut CheckedTree<B>, op: &TreeOp) -> OpRes {
    match op {
        TreeOp::Insert(k, v) => OpRes::Value(tree.insert(*k, *v)),
        TreeOp::Remove(k) => OpRes::Value(tree.remove(k)),
        TreeOp::Get(k) => OpRes::Value(tree.get(k).copied()),
        TreeOp::Successor(k) => {
            let mut cursor = tree.find(k);
            OpRes::Key(cursor.advance().key().copied())
        }
    }
}

fn apply_naive(map: &mut BTreeMap<u8, u32>, op: &TreeOp) -> OpRes {
    match op {
        TreeOp::Insert(k, v) => OpRes::Value(map.insert(*k, *v)),
        TreeOp::Remove(k) => OpRes::Value(map.remove(k)),
        TreeOp::Get(k) => OpRes::Value(map.get(k).copied()),
        TreeOp::Successor(k) => {
            let next = if map.contains_key(k) {
                map.range(*k..).nth(1).map(|(k, _)| *k)
            } else {
                None
            };
            OpRes::Key(next)
        }
    }
}

fn matches_naive<B: Balance>(ops: &Ops) -> TestResult {
    let mut tree = CheckedTree::<B>::new();
    let mut naive = BTreeMap::new();

    for op in &ops.ops {
        let res = apply(&mut tree, op);
        let res_naive = apply_naive(&mut naive, op);
        let entries = tree.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>();
        let entries_naive = naive.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>();
        if res != res_naive || entries != entries_naive || tree.len() != naive.len() {
            println!(
                "Failed on op: {:?}\ngood: {:?} ({:?})\nnaive: {:?} ({:?})",
                op, res, entries, res_naive, entries_naive
            );
            return TestResult::failed();
        }
        if B::BALANCED && !tree.is_balanced() {
            println!("Unbalanced after op: {:?}", op);
            return TestResult::failed();
        }
    }

    TestResult::passed()
}

#[quickcheck]
fn qc_avl_matches_btreemap(ops: Ops) -> TestResult {
    matches_naive::<Avl>(&ops)
}

#[quickcheck]
fn qc_bst_matches_btreemap(ops: Ops) -> TestResult {
    matches_naive::<Unbalanced>(&ops)
}

#[quickcheck]
fn qc_remove_subset(keys: Vec<u16>, removals: Vec<usize>) -> TestResult {
    if keys.is_empty() {
        return TestResult::discard();
    }
    let mut tree = Tree::<u16, usize, Avl, Checked>::new();
    for (i, &k) in keys.iter().enumerate() {
        tree.insert(k, i);
    }
    let removed = removals
        .iter()
        .map(|i| keys[i % keys.len()])
        .collect::<BTreeSet<_>>();
    for k in &removed {
        if tree.remove(k).is_none() {
            return TestResult::failed();
        }
        if !tree.is_balanced() {
            return TestResult::failed();
        }
    }
    let kept = keys.iter().copied().filter(|k| !removed.contains(k)).collect::<BTreeSet<_>>();
    let all_found = kept.iter().all(|k| !tree.find(k).is_end());
    let none_found = removed.iter().all(|k| tree.find(k).is_end());
    let in_order = tree.iter().map(|(k, _)| *k).tuple_windows().all(|(a, b)| a < b);
    TestResult::from_bool(all_found && none_found && in_order && tree.len() == kept.len())
}

#[quickcheck]
fn qc_height_within_avl_bound(keys: Vec<u32>) -> bool {
    let tree = keys.iter().map(|&k| (k, ())).collect::<Tree<u32, ()>>();
    let n = tree.len() as f64;
    (tree.height() as f64) <= 1.4405 * (n + 2.0).log2() - 0.3277
}

#[quickcheck]
fn qc_remove_absent_is_noop(keys: Vec<u8>, absent: u8) -> TestResult {
    if keys.contains(&absent) {
        return TestResult::discard();
    }
    let mut tree = keys.iter().map(|&k| (k, k)).collect::<Tree<u8, u8>>();
    let before = ordtree::print::render_heights(&tree);
    let removed = tree.remove(&absent);
    TestResult::from_bool(removed.is_none() && ordtree::print::render_heights(&tree) == before)
}
