use std::cmp::Ordering;

use crate::arena::NodeIdx;
use crate::config::ConfigT;
use crate::debug;
use crate::node::Side;
use crate::tree::{Balance, Tree};

/// AVL discipline: every node's subtrees differ in height by at most one.
pub struct Avl {}

/// Plain search tree: only heights are kept up to date.
pub struct Unbalanced {}

impl Balance for Avl {
    const BALANCED: bool = true;

    fn after_insert<K, V, Config: ConfigT>(tree: &mut Tree<K, V, Self, Config>, parent: NodeIdx) {
        tree.rebalance_after_insert(parent)
    }

    fn after_remove<K, V, Config: ConfigT>(
        tree: &mut Tree<K, V, Self, Config>,
        edit_point: Option<NodeIdx>,
    ) {
        tree.rebalance_after_remove(edit_point)
    }
}

impl Balance for Unbalanced {
    const BALANCED: bool = false;

    fn after_insert<K, V, Config: ConfigT>(tree: &mut Tree<K, V, Self, Config>, parent: NodeIdx) {
        tree.update_heights(Some(parent))
    }

    fn after_remove<K, V, Config: ConfigT>(
        tree: &mut Tree<K, V, Self, Config>,
        edit_point: Option<NodeIdx>,
    ) {
        tree.update_heights(edit_point)
    }
}

/// Shape formed by an unbalanced node `z`, its taller child `y` and `y`'s
/// taller child `x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    LeftLeft = 1,
    RightRight = 2,
    LeftRight = 3,
    RightLeft = 4,
}

impl Pattern {
    fn of(first: Side, second: Side) -> Pattern {
        match (first, second) {
            (Side::Left, Side::Left) => Pattern::LeftLeft,
            (Side::Right, Side::Right) => Pattern::RightRight,
            (Side::Left, Side::Right) => Pattern::LeftRight,
            (Side::Right, Side::Left) => Pattern::RightLeft,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Xyz {
    pub(crate) x: NodeIdx,
    pub(crate) y: NodeIdx,
    pub(crate) z: NodeIdx,
    pub(crate) pattern: Pattern,
}

impl<K, V, B: Balance, Config: ConfigT> Tree<K, V, B, Config> {
    fn is_unbalanced(&self, idx: NodeIdx) -> bool {
        self.balance_factor(idx).abs() >= 2
    }

    /// Classifies the rotation needed at the unbalanced node `z`. When `y`'s
    /// children are equally tall (only possible after a removal) `x` is taken
    /// on the same side as `y`, so a single rotation is used.
    pub(crate) fn find_xyz(&self, z: NodeIdx) -> Xyz {
        let taller = |idx: NodeIdx, tie: Side| {
            let node = self.node(idx);
            let side = match self.height_of(node.left).cmp(&self.height_of(node.right)) {
                Ordering::Greater => Side::Left,
                Ordering::Less => Side::Right,
                Ordering::Equal => tie,
            };
            match node.child(side) {
                Some(child) => (side, child),
                None => panic!("find_xyz: {} has no {:?} child", idx, side),
            }
        };
        let (first, y) = taller(z, Side::Right);
        let (second, x) = taller(y, first);
        Xyz {
            x,
            y,
            z,
            pattern: Pattern::of(first, second),
        }
    }

    /// Applies the rotations for `xyz` and repairs heights up to the root.
    /// Returns the new root of the rotated subtree.
    pub(crate) fn balance(&mut self, xyz: Xyz) -> NodeIdx {
        let Xyz { x, y, z, pattern } = xyz;
        debug!(
            self.debug_writer,
            "rebalance: {:?} at z={} y={} x={}", pattern, z, y, x
        );
        match pattern {
            Pattern::LeftLeft => self.right_rotate(z),
            Pattern::RightRight => self.left_rotate(z),
            Pattern::LeftRight => {
                self.left_rotate(y);
                self.right_rotate(z);
            }
            Pattern::RightLeft => {
                self.right_rotate(y);
                self.left_rotate(z);
            }
        }
        let top = match pattern {
            Pattern::LeftLeft | Pattern::RightRight => y,
            Pattern::LeftRight | Pattern::RightLeft => {
                self.fix_height(y);
                x
            }
        };
        self.fix_height(z);
        self.update_heights(Some(top));
        top
    }

    /// One fix at the lowest unbalanced ancestor is enough after an insert:
    /// it restores that subtree to its height before the insert.
    pub(crate) fn rebalance_after_insert(&mut self, parent: NodeIdx) {
        self.update_heights(Some(parent));
        let mut cur = Some(parent);
        while let Some(idx) = cur {
            if self.is_unbalanced(idx) {
                let xyz = self.find_xyz(idx);
                self.balance(xyz);
                return;
            }
            cur = self.node(idx).parent;
        }
    }

    /// A removal can shorten the fixed subtree, so every ancestor up to the
    /// root has to be checked.
    pub(crate) fn rebalance_after_remove(&mut self, edit_point: Option<NodeIdx>) {
        self.update_heights(edit_point);
        let mut cur = edit_point;
        while let Some(idx) = cur {
            let top = if self.is_unbalanced(idx) {
                let xyz = self.find_xyz(idx);
                self.balance(xyz)
            } else {
                idx
            };
            cur = self.node(top).parent;
        }
    }
}
