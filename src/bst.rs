use std::cmp::{max, Ordering};

use crate::arena::NodeIdx;
use crate::config::ConfigT;
use crate::debug;
use crate::node::{Node, Side};
use crate::tree::{Balance, Tree};

pub(crate) enum Inserted<V> {
    Attached(NodeIdx),
    Replaced(V),
}

// Node plumbing and height bookkeeping; none of it looks at keys.
impl<K, V, B: Balance, Config: ConfigT> Tree<K, V, B, Config> {
    pub(crate) fn node(&self, idx: NodeIdx) -> &Node<K, V> {
        self.nodes.get_exn(idx)
    }

    pub(crate) fn node_mut(&mut self, idx: NodeIdx) -> &mut Node<K, V> {
        self.nodes.get_mut_exn(idx)
    }

    pub(crate) fn height_of(&self, idx: Option<NodeIdx>) -> usize {
        idx.map_or(0, |i| self.node(i).height)
    }

    pub(crate) fn balance_factor(&self, idx: NodeIdx) -> isize {
        let node = self.node(idx);
        self.height_of(node.left) as isize - self.height_of(node.right) as isize
    }

    pub(crate) fn fix_height(&mut self, idx: NodeIdx) {
        let node = self.node(idx);
        let height = max(self.height_of(node.left), self.height_of(node.right)) + 1;
        self.node_mut(idx).height = height;
    }

    /// Recomputes heights from `start` up to the root.
    pub(crate) fn update_heights(&mut self, start: Option<NodeIdx>) {
        let mut cur = start;
        while let Some(idx) = cur {
            self.fix_height(idx);
            cur = self.node(idx).parent;
        }
    }

    /// Which child of its parent `idx` is; `None` for the root.
    pub(crate) fn side_of(&self, idx: NodeIdx) -> Option<Side> {
        let parent = self.node(idx).parent?;
        if self.node(parent).left == Some(idx) {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    /// Points whatever referenced `old` from above (its parent, or the root
    /// slot) at `new`. Does not touch `new`'s own parent link.
    pub(crate) fn replace_child(
        &mut self,
        parent: Option<NodeIdx>,
        old: NodeIdx,
        new: Option<NodeIdx>,
    ) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let node = self.node_mut(p);
                if node.left == Some(old) {
                    node.left = new;
                } else {
                    node.right = new;
                }
            }
        }
    }

    pub(crate) fn smallest(&self) -> Option<NodeIdx> {
        let mut cur = self.root?;
        while let Some(left) = self.node(cur).left {
            cur = left;
        }
        Some(cur)
    }

    /// Rightmost node of the left subtree. `None` when there is no left child.
    pub(crate) fn predecessor(&self, idx: NodeIdx) -> Option<NodeIdx> {
        let mut cur = self.node(idx).left?;
        while let Some(right) = self.node(cur).right {
            cur = right;
        }
        Some(cur)
    }

    /// Exchanges the positions of `a` and `b` in the tree, heights included.
    /// Keys and values stay with their node, so handles to either node keep
    /// naming the same entry.
    pub(crate) fn node_swap(&mut self, a: NodeIdx, b: NodeIdx) {
        if a == b {
            return;
        }
        // A link that pointed at one of the pair must point at the other
        // afterwards; this is what keeps the adjacent case intact.
        let swapped = move |link: Option<NodeIdx>| {
            link.map(|n| {
                if n == a {
                    b
                } else if n == b {
                    a
                } else {
                    n
                }
            })
        };
        let (a_side, b_side) = (self.side_of(a), self.side_of(b));
        let old_a = self.node(a);
        let (pa, la, ra, ha) = (old_a.parent, old_a.left, old_a.right, old_a.height);
        let old_b = self.node(b);
        let (pb, lb, rb, hb) = (old_b.parent, old_b.left, old_b.right, old_b.height);

        let node = self.node_mut(a);
        node.parent = swapped(pb);
        node.left = swapped(lb);
        node.right = swapped(rb);
        node.height = hb;
        let node = self.node_mut(b);
        node.parent = swapped(pa);
        node.left = swapped(la);
        node.right = swapped(ra);
        node.height = ha;

        let neighbours = [(b, pa, a_side, [la, ra]), (a, pb, b_side, [lb, rb])];
        for (other, parent, side, children) in neighbours {
            if let (Some(p), Some(side)) = (parent, side) {
                if p != other {
                    *self.node_mut(p).child_mut(side) = Some(other);
                }
            }
            for child in children.into_iter().flatten() {
                if child != other {
                    self.node_mut(child).parent = Some(other);
                }
            }
        }

        if self.root == Some(a) {
            self.root = Some(b);
        } else if self.root == Some(b) {
            self.root = Some(a);
        }
    }

    /// Unlinks a node with at most one child, lifting that child into its
    /// place. Returns the freed node and its former parent.
    fn splice_out(&mut self, idx: NodeIdx) -> (Node<K, V>, Option<NodeIdx>) {
        let node = self.node(idx);
        debug_assert!(node.left.is_none() || node.right.is_none());
        let (parent, child) = (node.parent, node.left.or(node.right));
        if let Some(child) = child {
            self.node_mut(child).parent = parent;
        }
        self.replace_child(parent, idx, child);
        match parent {
            Some(parent) => {
                debug!(self.debug_writer, "remove: unlinked {} from {}", idx, parent)
            }
            None => debug!(self.debug_writer, "remove: unlinked root {}", idx),
        }
        (self.nodes.free(idx), parent)
    }
}

impl<K: Ord, V, B: Balance, Config: ConfigT> Tree<K, V, B, Config> {
    pub(crate) fn internal_find(&self, key: &K) -> Option<NodeIdx> {
        let mut cur = self.root;
        while let Some(idx) = cur {
            let node = self.node(idx);
            cur = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(idx),
            };
        }
        None
    }

    /// Plain search-tree insert: overwrite on an equal key, otherwise hang a
    /// new leaf off the first empty child slot. Heights are left to the
    /// caller.
    pub(crate) fn insert_unbalanced(&mut self, key: K, value: V) -> Inserted<V> {
        let Some(mut cur) = self.root else {
            let idx = self.nodes.alloc(Node::leaf(key, value, None));
            self.root = Some(idx);
            debug!(self.debug_writer, "insert: {} is the new root", idx);
            return Inserted::Attached(idx);
        };
        loop {
            let node = self.node_mut(cur);
            let side = match key.cmp(&node.key) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    return Inserted::Replaced(std::mem::replace(&mut node.value, value));
                }
            };
            match node.child(side) {
                Some(next) => cur = next,
                None => {
                    let idx = self.nodes.alloc(Node::leaf(key, value, Some(cur)));
                    *self.node_mut(cur).child_mut(side) = Some(idx);
                    debug!(
                        self.debug_writer,
                        "insert: attached {} as {:?} child of {}", idx, side, cur
                    );
                    return Inserted::Attached(idx);
                }
            }
        }
    }

    /// Plain search-tree remove. A node with two children first trades places
    /// with its predecessor, so the node that gets unlinked always has at
    /// most one child. Returns the value and the parent of the unlinked
    /// position, which is where rebalancing has to start.
    pub(crate) fn remove_unbalanced(&mut self, key: &K) -> Option<(V, Option<NodeIdx>)> {
        let target = self.internal_find(key)?;
        if self.node(target).right.is_some() {
            if let Some(pred) = self.predecessor(target) {
                debug!(
                    self.debug_writer,
                    "remove: swapping {} with predecessor {}", target, pred
                );
                self.node_swap(target, pred);
            }
        }
        let (node, edit_point) = self.splice_out(target);
        Some((node.value, edit_point))
    }
}
