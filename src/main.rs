use itertools::Itertools;
use rand::prelude::*;
use rand_pcg::Pcg64;

use ordtree::print;
use ordtree::trace::TraceBuffer;
use ordtree::{AvlTree, AvlTreeDebug, BinarySearchTree};

// Worst-case height of an AVL tree with n nodes is below 1.44 * log2(n + 2).
fn avl_height_bound(n: usize) -> f64 {
    1.4405 * ((n + 2) as f64).log2() - 0.3277
}

fn ascending() {
    let mut avl = AvlTree::new();
    let mut bst = BinarySearchTree::new();
    for k in 1..=7 {
        avl.insert(k, k * k);
        bst.insert(k, k * k);
    }
    println!("ascending 1..=7");
    println!("avl (height {}):\n{}", avl.height(), print::render(&avl));
    println!("plain bst (height {}):\n{}", bst.height(), print::render(&bst));
}

fn traced() {
    let trace = TraceBuffer::new();
    let mut tree = AvlTreeDebug::with_debug_writer(Box::new(trace.clone()));
    for k in [30, 10, 20, 40, 50, 5] {
        tree.insert(k, ());
    }
    tree.remove(&30);
    println!("trace:\n{}", trace.contents());
    println!("{}", print::render_heights(&tree));
}

fn random(n: usize, seed: u64) {
    let mut rng = Pcg64::seed_from_u64(seed);
    let mut keys = (0..n as u64).collect::<Vec<_>>();
    keys.shuffle(&mut rng);

    let mut tree = AvlTree::new();
    for &k in &keys {
        tree.insert(k, k.to_string());
    }
    let removed = keys
        .choose_multiple(&mut rng, n / 2)
        .copied()
        .collect::<Vec<_>>();
    for k in &removed {
        tree.remove(k);
    }
    println!(
        "random n={} seed={}: {} left, height {} (bound {:.2}), balanced: {}",
        n,
        seed,
        tree.len(),
        tree.height(),
        avl_height_bound(tree.len()),
        tree.is_balanced()
    );
    println!(
        "first keys: {}",
        tree.iter().take(10).map(|(k, _)| k).join(", ")
    );
}

pub fn main() {
    ascending();
    traced();
    random(1_000, 5);
    random(100_000, 7);
}
