pub mod config;

pub mod arena;
pub mod avl;
mod bst;
pub mod check;
pub mod cursor;
pub mod node;
pub mod print;
mod rotate;
pub mod trace;
pub mod tree;

pub use crate::avl::{Avl, Pattern, Unbalanced};
pub use crate::check::InvariantError;
pub use crate::config::{ConfigT, DebugConfig, DefaultConfig};
pub use crate::cursor::{Cursor, Iter};
pub use crate::node::{NodeRef, Side};
pub use crate::trace::TraceBuffer;
pub use crate::tree::{
    AvlTree, AvlTreeDebug, Balance, BinarySearchTree, BinarySearchTreeDebug, Tree,
};
