use thiserror::Error;

/// Lookup of a key that is not stored in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("key not found")]
pub struct KeyNotFound;

/// Structural defect reported by tree validation. Node ids are arena indices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("root node {0} has a parent")]
    RootHasParent(u32),
    #[error("node {child} does not link back to its parent {parent}")]
    BrokenParentLink { parent: u32, child: u32 },
    #[error("node {node} stores balance {actual}, subtree heights give {expected}")]
    BalanceMismatch { node: u32, expected: i32, actual: i8 },
    #[error("node {node} is out of balance ({balance})")]
    Unbalanced { node: u32, balance: i8 },
    #[error("keys out of order at node {0}")]
    OrderViolated(u32),
    #[error("{reachable} nodes reachable from the root, arena holds {allocated}")]
    LeakedNodes { reachable: usize, allocated: usize },
}
