//! Arena-based AVL tree.
//!
//! Nodes live in a `Vec` owned by the tree; every link (`p` / `l` / `r`) is an
//! `Option<u32>` index into that arena, so parent links are plain
//! back-references. Each node carries a balance factor
//! `height(right) - height(left)` that the insert and remove fix-ups keep in
//! `-1..=1`.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | [`Node`] and [`KvNode`] traits |
//! | [`util`] | Plain binary-tree helpers: `find`, `first`, `next`, `prev`, `swap`, `equal_paths`, `swap_remove` |
//! | [`avl::util`] | Rotations, insert/remove fix-up, validation, debug print |
//! | [`avl`] | [`AvlMap`] and [`AvlSet`] |
//! | [`error`] | [`KeyNotFound`] and [`InvariantError`] |
//!
//! # Features
//!
//! - `tracing`: emit fix-up diagnostics through the `tracing` crate.
//! - `serde`: `Serialize` / `Deserialize` for [`AvlMap`] and [`AvlSet`].

mod tracing_helpers;

pub mod avl;
pub mod error;
pub mod types;
pub mod util;

pub use avl::{AvlMap, AvlNode, AvlNodeLike, AvlSet};
pub use error::{InvariantError, KeyNotFound};
pub use types::{KvNode, Node};
pub use util::{equal_paths, find, first, height, last, next, prev, size, swap, swap_remove};
