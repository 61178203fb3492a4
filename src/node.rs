use crate::arena::{Arena, NodeIdx};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A tree node. Children are owned through the arena; `parent` is a plain
/// back-reference used for upward walks and never for ownership.
#[derive(Clone, Debug)]
pub struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) height: usize,
    pub(crate) parent: Option<NodeIdx>,
    pub(crate) left: Option<NodeIdx>,
    pub(crate) right: Option<NodeIdx>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn leaf(key: K, value: V, parent: Option<NodeIdx>) -> Self {
        Node {
            key,
            value,
            height: 1,
            parent,
            left: None,
            right: None,
        }
    }

    pub(crate) fn child(&self, side: Side) -> Option<NodeIdx> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn child_mut(&mut self, side: Side) -> &mut Option<NodeIdx> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Read-only view of a node, enough for an external printer to walk and
/// render the tree.
pub struct NodeRef<'a, K, V> {
    pub(crate) nodes: &'a Arena<Node<K, V>>,
    pub(crate) idx: NodeIdx,
}

impl<'a, K, V> Clone for NodeRef<'a, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K, V> Copy for NodeRef<'a, K, V> {}

impl<'a, K, V> NodeRef<'a, K, V> {
    fn node(&self) -> &'a Node<K, V> {
        self.nodes.get_exn(self.idx)
    }

    fn link(&self, idx: Option<NodeIdx>) -> Option<NodeRef<'a, K, V>> {
        idx.map(|idx| NodeRef {
            nodes: self.nodes,
            idx,
        })
    }

    pub fn idx(&self) -> NodeIdx {
        self.idx
    }

    pub fn key(&self) -> &'a K {
        &self.node().key
    }

    pub fn value(&self) -> &'a V {
        &self.node().value
    }

    /// Stored height: 1 for a leaf.
    pub fn height(&self) -> usize {
        self.node().height
    }

    pub fn parent(&self) -> Option<NodeRef<'a, K, V>> {
        self.link(self.node().parent)
    }

    pub fn left(&self) -> Option<NodeRef<'a, K, V>> {
        self.link(self.node().left)
    }

    pub fn right(&self) -> Option<NodeRef<'a, K, V>> {
        self.link(self.node().right)
    }

    pub fn child(&self, side: Side) -> Option<NodeRef<'a, K, V>> {
        self.link(self.node().child(side))
    }
}
