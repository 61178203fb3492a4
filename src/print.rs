//! Sideways dump of a tree: one line per node in key order, indented by depth,
//! so the root sits in the leftmost column and left subtrees print above it.

use std::fmt::{Display, Write};

use crate::config::ConfigT;
use crate::node::NodeRef;
use crate::tree::{Balance, Tree};

pub fn render<K, V, B, Config>(tree: &Tree<K, V, B, Config>) -> String
where
    K: Display,
    V: Display,
    B: Balance,
    Config: ConfigT,
{
    render_with(tree, |node| format!("{}: {}", node.key(), node.value()))
}

/// Like [`render`], with heights, for eyeballing balance.
pub fn render_heights<K, V, B, Config>(tree: &Tree<K, V, B, Config>) -> String
where
    K: Display,
    B: Balance,
    Config: ConfigT,
{
    render_with(tree, |node| format!("{} (h={})", node.key(), node.height()))
}

pub fn render_with<K, V, B, Config, F>(tree: &Tree<K, V, B, Config>, label: F) -> String
where
    B: Balance,
    Config: ConfigT,
    F: Fn(NodeRef<'_, K, V>) -> String,
{
    fn traverse<K, V, F>(
        node: Option<NodeRef<'_, K, V>>,
        level: usize,
        label: &F,
        out: &mut String,
    ) where
        F: Fn(NodeRef<'_, K, V>) -> String,
    {
        if let Some(node) = node {
            traverse(node.left(), level + 1, label, out);
            writeln!(out, "{}{}", "  ".repeat(level), label(node))
                .expect("writing to String cannot fail");
            traverse(node.right(), level + 1, label, out);
        }
    }
    let mut out = String::new();
    traverse(tree.root(), 0, &label, &mut out);
    out
}
