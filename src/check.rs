use std::cmp::max;
use std::fmt;

use crate::arena::NodeIdx;
use crate::config::ConfigT;
use crate::tree::{Balance, Tree};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantError {
    /// A key is not strictly between the bounds its ancestors impose.
    Order { at: NodeIdx },
    Height { at: NodeIdx, stored: usize, actual: usize },
    Imbalance { at: NodeIdx, left: usize, right: usize },
    /// A child's parent link does not point back at the node holding it.
    ParentLink { at: NodeIdx },
    Length { reachable: usize, tracked: usize },
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantError::Order { at } => write!(f, "key of {} is out of order", at),
            InvariantError::Height { at, stored, actual } => write!(
                f,
                "{} stores height {} but its subtree has height {}",
                at, stored, actual
            ),
            InvariantError::Imbalance { at, left, right } => write!(
                f,
                "{} has subtree heights {} and {}",
                at, left, right
            ),
            InvariantError::ParentLink { at } => {
                write!(f, "parent link of {} does not match its position", at)
            }
            InvariantError::Length { reachable, tracked } => write!(
                f,
                "{} nodes reachable from the root but {} allocated",
                reachable, tracked
            ),
        }
    }
}

impl std::error::Error for InvariantError {}

impl<K: Ord, V, B: Balance, Config: ConfigT> Tree<K, V, B, Config> {
    /// True if no node's subtrees differ in height by more than one. Heights
    /// are measured from scratch, not read from the nodes.
    pub fn is_balanced(&self) -> bool {
        self.measure_balanced(self.root).is_some()
    }

    fn measure_balanced(&self, idx: Option<NodeIdx>) -> Option<usize> {
        let Some(idx) = idx else {
            return Some(0);
        };
        let node = self.node(idx);
        let left = self.measure_balanced(node.left)?;
        let right = self.measure_balanced(node.right)?;
        (left.abs_diff(right) <= 1).then_some(max(left, right) + 1)
    }

    /// Checks key order, stored heights, parent links and the node count, and
    /// for balanced trees the AVL height invariant.
    pub fn validate(&self) -> Result<(), InvariantError> {
        if let Some(root) = self.root {
            if self.node(root).parent.is_some() {
                return Err(InvariantError::ParentLink { at: root });
            }
        }
        let mut reachable = 0;
        self.validate_subtree(self.root, None, None, &mut reachable)?;
        if reachable != self.len() {
            return Err(InvariantError::Length {
                reachable,
                tracked: self.len(),
            });
        }
        Ok(())
    }

    fn validate_subtree(
        &self,
        idx: Option<NodeIdx>,
        lower: Option<&K>,
        upper: Option<&K>,
        reachable: &mut usize,
    ) -> Result<usize, InvariantError> {
        let Some(idx) = idx else {
            return Ok(0);
        };
        *reachable += 1;
        let node = self.node(idx);
        if lower.is_some_and(|lo| *lo >= node.key) || upper.is_some_and(|hi| *hi <= node.key) {
            return Err(InvariantError::Order { at: idx });
        }
        for child in [node.left, node.right].into_iter().flatten() {
            if self.node(child).parent != Some(idx) {
                return Err(InvariantError::ParentLink { at: child });
            }
        }
        let left = self.validate_subtree(node.left, lower, Some(&node.key), reachable)?;
        let right = self.validate_subtree(node.right, Some(&node.key), upper, reachable)?;
        let actual = max(left, right) + 1;
        if node.height != actual {
            return Err(InvariantError::Height {
                at: idx,
                stored: node.height,
                actual,
            });
        }
        if B::BALANCED && left.abs_diff(right) > 1 {
            return Err(InvariantError::Imbalance { at: idx, left, right });
        }
        Ok(actual)
    }
}
