use std::fmt;
use std::iter::FusedIterator;

use crate::arena::{Arena, NodeIdx};
use crate::config::ConfigT;
use crate::node::{Node, NodeRef};
use crate::tree::{Balance, Tree};

/// A position in the tree, or the past-the-end position. Holds a shared
/// borrow of the tree, so the tree cannot change underneath it.
pub struct Cursor<'a, K, V> {
    nodes: &'a Arena<Node<K, V>>,
    current: Option<NodeIdx>,
}

impl<'a, K, V> Clone for Cursor<'a, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K, V> Copy for Cursor<'a, K, V> {}

impl<'a, K, V> PartialEq for Cursor<'a, K, V> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.nodes, other.nodes) && self.current == other.current
    }
}

impl<'a, K, V> Eq for Cursor<'a, K, V> {}

impl<'a, K, V> fmt::Debug for Cursor<'a, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.current {
            Some(idx) => write!(f, "Cursor({})", idx),
            None => write!(f, "Cursor(end)"),
        }
    }
}

impl<'a, K, V> Cursor<'a, K, V> {
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    pub fn get(&self) -> Option<(&'a K, &'a V)> {
        let node = self.nodes.get_exn(self.current?);
        Some((&node.key, &node.value))
    }

    pub fn key(&self) -> Option<&'a K> {
        self.get().map(|(k, _)| k)
    }

    pub fn value(&self) -> Option<&'a V> {
        self.get().map(|(_, v)| v)
    }

    /// Panics on the end cursor.
    pub fn entry_exn(&self) -> (&'a K, &'a V) {
        match self.get() {
            Some(entry) => entry,
            None => panic!("dereferenced the end cursor"),
        }
    }

    pub fn node(&self) -> Option<NodeRef<'a, K, V>> {
        self.current.map(|idx| NodeRef {
            nodes: self.nodes,
            idx,
        })
    }

    /// Moves to the next key in ascending order. The end cursor stays put.
    pub fn advance(&mut self) -> &mut Self {
        let Some(mut cur) = self.current else {
            return self;
        };
        let nodes = self.nodes;
        if let Some(mut next) = nodes.get_exn(cur).right {
            while let Some(left) = nodes.get_exn(next).left {
                next = left;
            }
            self.current = Some(next);
            return self;
        }
        // climb while we are a right child; the first ancestor reached from
        // its left side is the successor
        while let Some(parent) = nodes.get_exn(cur).parent {
            if nodes.get_exn(parent).right != Some(cur) {
                break;
            }
            cur = parent;
        }
        self.current = nodes.get_exn(cur).parent;
        self
    }
}

/// Ascending `(key, value)` pairs.
pub struct Iter<'a, K, V> {
    cursor: Cursor<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.cursor.get()?;
        self.cursor.advance();
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

impl<K, V, B: Balance, Config: ConfigT> Tree<K, V, B, Config> {
    fn cursor_at(&self, current: Option<NodeIdx>) -> Cursor<'_, K, V> {
        Cursor {
            nodes: &self.nodes,
            current,
        }
    }

    /// Cursor at the smallest key, or `end()` if the tree is empty.
    pub fn begin(&self) -> Cursor<'_, K, V> {
        self.cursor_at(self.smallest())
    }

    pub fn end(&self) -> Cursor<'_, K, V> {
        self.cursor_at(None)
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            cursor: self.begin(),
            remaining: self.len(),
        }
    }
}

impl<K: Ord, V, B: Balance, Config: ConfigT> Tree<K, V, B, Config> {
    /// Cursor at `key`, or `end()` if it is absent.
    pub fn find(&self, key: &K) -> Cursor<'_, K, V> {
        self.cursor_at(self.internal_find(key))
    }
}

impl<'a, K, V, B: Balance, Config: ConfigT> IntoIterator for &'a Tree<K, V, B, Config> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
