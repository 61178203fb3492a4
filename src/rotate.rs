use crate::arena::NodeIdx;
use crate::config::ConfigT;
use crate::node::Side;
use crate::tree::{Balance, Tree};

impl<K, V, B: Balance, Config: ConfigT> Tree<K, V, B, Config> {
    /// Promotes `node`'s right child into `node`'s place.
    pub(crate) fn left_rotate(&mut self, node: NodeIdx) {
        self.rotate(node, Side::Left)
    }

    /// Promotes `node`'s left child into `node`'s place.
    pub(crate) fn right_rotate(&mut self, node: NodeIdx) {
        self.rotate(node, Side::Right)
    }

    // `node` moves down to become the `dir` child of its child on the other
    // side. The pivot's inner subtree changes hands. Heights are not touched.
    fn rotate(&mut self, node: NodeIdx, dir: Side) {
        let Some(pivot) = self.node(node).child(dir.opposite()) else {
            panic!("{:?} rotation at {} without a pivot child", dir, node);
        };
        let inner = self.node(pivot).child(dir);
        let parent = self.node(node).parent;

        *self.node_mut(node).child_mut(dir.opposite()) = inner;
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(node);
        }
        self.replace_child(parent, node, Some(pivot));
        let pivot_node = self.node_mut(pivot);
        *pivot_node.child_mut(dir) = Some(node);
        pivot_node.parent = parent;
        self.node_mut(node).parent = Some(pivot);
    }
}
