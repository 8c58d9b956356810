//! AVL tree: arena node type, rebalancing primitives and the map/set
//! built on top of them.

#[path = "AvlMap.rs"]
pub mod avl_map;
#[path = "AvlSet.rs"]
pub mod avl_set;
#[cfg(feature = "serde")]
mod serde_impl;
pub mod types;
pub mod util;

pub use avl_map::{AvlMap, Iter};
pub use avl_set::AvlSet;
pub use types::{AvlNode, AvlNodeLike};
