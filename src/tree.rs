use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;

use crate::arena::{Arena, NodeIdx};
use crate::avl::{Avl, Unbalanced};
use crate::bst::Inserted;
use crate::config::{ConfigT, DebugConfig, DefaultConfig};
use crate::node::{Node, NodeRef};

/// What happens after the base engine has changed the shape of the tree.
/// `parent` / `edit_point` is the parent of the node that was attached or
/// physically removed.
pub trait Balance: Sized {
    /// Whether `validate` should also demand the AVL height invariant.
    const BALANCED: bool;

    fn after_insert<K, V, Config: ConfigT>(tree: &mut Tree<K, V, Self, Config>, parent: NodeIdx);

    fn after_remove<K, V, Config: ConfigT>(
        tree: &mut Tree<K, V, Self, Config>,
        edit_point: Option<NodeIdx>,
    );
}

/// An ordered map stored as a binary search tree in a node arena.
///
/// `B` picks the balancing discipline: [`Avl`] keeps the height logarithmic,
/// [`Unbalanced`] is the plain search tree both variants are built on.
pub struct Tree<K, V, B: Balance = Avl, Config: ConfigT = DefaultConfig> {
    pub(crate) nodes: Arena<Node<K, V>>,
    pub(crate) root: Option<NodeIdx>,
    pub(crate) debug_writer: Option<RefCell<Box<dyn fmt::Write>>>,
    _strategy: PhantomData<(B, Config)>,
}

pub type AvlTree<K, V> = Tree<K, V, Avl, DefaultConfig>;
pub type AvlTreeDebug<K, V> = Tree<K, V, Avl, DebugConfig>;
pub type BinarySearchTree<K, V> = Tree<K, V, Unbalanced, DefaultConfig>;
pub type BinarySearchTreeDebug<K, V> = Tree<K, V, Unbalanced, DebugConfig>;

impl<K, V, B: Balance, Config: ConfigT> Tree<K, V, B, Config> {
    pub fn new() -> Self {
        Tree {
            nodes: Arena::new(),
            root: None,
            debug_writer: None,
            _strategy: PhantomData,
        }
    }

    /// Sends `debug!` output to `writer` instead of stderr. Only has an effect
    /// when `Config::DEBUG` is set.
    pub fn with_debug_writer(writer: Box<dyn fmt::Write>) -> Self {
        let mut tree = Self::new();
        tree.debug_writer = Some(RefCell::new(writer));
        tree
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the root, 0 for an empty tree.
    pub fn height(&self) -> usize {
        self.height_of(self.root)
    }

    pub fn root(&self) -> Option<NodeRef<'_, K, V>> {
        self.root.map(|idx| NodeRef {
            nodes: &self.nodes,
            idx,
        })
    }

    /// Drops every node. The debug writer is kept.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }
}

impl<K: Ord, V, B: Balance, Config: ConfigT> Tree<K, V, B, Config> {
    /// Inserts `key`, or overwrites its value in place if already present and
    /// returns the old value. Overwriting never changes the shape.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.insert_unbalanced(key, value) {
            Inserted::Replaced(old) => Some(old),
            Inserted::Attached(idx) => {
                if let Some(parent) = self.node(idx).parent {
                    B::after_insert(self, parent);
                }
                self.check_invariants("insert");
                None
            }
        }
    }

    /// Removes `key` and returns its value; a no-op if it is absent.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let (value, edit_point) = self.remove_unbalanced(key)?;
        B::after_remove(self, edit_point);
        self.check_invariants("remove");
        Some(value)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.internal_find(key).map(|idx| &self.node(idx).value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.internal_find(key)?;
        Some(&mut self.node_mut(idx).value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.internal_find(key).is_some()
    }

    fn check_invariants(&self, op: &str) {
        if Config::CHECK_INVARIANTS {
            if let Err(err) = self.validate() {
                panic!("invariant violated after {}: {}", op, err);
            }
        }
    }
}

impl<K, V, B: Balance, Config: ConfigT> Default for Tree<K, V, B, Config> {
    fn default() -> Self {
        Tree::new()
    }
}

impl<K: Clone, V: Clone, B: Balance, Config: ConfigT> Clone for Tree<K, V, B, Config> {
    /// The clone starts without a debug writer.
    fn clone(&self) -> Self {
        Tree {
            nodes: self.nodes.clone(),
            root: self.root,
            debug_writer: None,
            _strategy: PhantomData,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, B: Balance, Config: ConfigT> fmt::Debug
    for Tree<K, V, B, Config>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V, B: Balance, Config: ConfigT> Extend<(K, V)> for Tree<K, V, B, Config> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V, B: Balance, Config: ConfigT> FromIterator<(K, V)> for Tree<K, V, B, Config> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}
