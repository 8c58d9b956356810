//! Node trait definitions.
//!
//! Nodes live in a caller-owned arena (`Vec<N>`). Each "pointer" is an
//! `Option<u32>` index into that arena, so the parent link is a plain
//! back-reference and never participates in ownership. All tree-manipulation
//! functions take the arena as a slice and work with indices.

/// Binary-tree links (`p`, `l`, `r`).
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Key/value payload of a node.
pub trait KvNode<K, V>: Node {
    fn key(&self) -> &K;
    fn value(&self) -> &V;
    fn value_mut(&mut self) -> &mut V;
    fn set_value(&mut self, value: V);
}
