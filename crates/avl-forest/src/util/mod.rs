//! Plain binary-tree utilities over an arena of [`Node`]s.
//!
//! Nothing here looks at balance factors; the AVL layer in
//! [`crate::avl::util`] builds on these helpers.
//!
//! Key-based helpers take a `key_of` accessor closure so they work with any
//! node layout that carries a key.

pub mod swap;

use std::cmp::Ordering;

use crate::types::Node;

pub use swap::swap;

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

/// Points `parent`'s link that currently holds `old` at `new` instead.
/// With no parent, `new` becomes the root.
pub(crate) fn replace_child<N: Node>(
    arena: &mut [N],
    root: Option<u32>,
    parent: Option<u32>,
    old: u32,
    new: Option<u32>,
) -> Option<u32> {
    let Some(p) = parent else {
        return new;
    };
    if get_l(arena, p) == Some(old) {
        set_l(arena, p, new);
    } else {
        set_r(arena, p, new);
    }
    root
}

/// Leftmost node in the tree.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_l(arena, idx) {
            Some(l) => curr = Some(l),
            None => return Some(idx),
        }
    }
    curr
}

/// Rightmost node in the tree.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_r(arena, idx) {
            Some(r) => curr = Some(r),
            None => return Some(idx),
        }
    }
    curr
}

/// In-order successor.
pub fn next<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, curr) {
        return first(arena, Some(r));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor.
pub fn prev<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, curr) {
        return last(arena, Some(l));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

fn size_inner<N: Node>(arena: &[N], root: u32) -> usize {
    1 + get_l(arena, root).map_or(0, |l| size_inner(arena, l))
        + get_r(arena, root).map_or(0, |r| size_inner(arena, r))
}

/// Number of nodes under `root`.
pub fn size<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |r| size_inner(arena, r))
}

/// Height of the subtree under `root`; an empty tree has height 0 and a
/// single node height 1.
pub fn height<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    let Some(i) = root else {
        return 0;
    };
    1 + height(arena, get_l(arena, i)).max(height(arena, get_r(arena, i)))
}

/// Finds a node by key.
pub fn find<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> Option<u32>
where
    N: Node,
    K: ?Sized,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> Ordering,
{
    let mut curr = root;
    while let Some(i) = curr {
        curr = match comparator(key, key_of(&arena[i as usize])) {
            Ordering::Equal => return Some(i),
            Ordering::Less => get_l(arena, i),
            Ordering::Greater => get_r(arena, i),
        };
    }
    None
}

/// Whether every leaf sits at the same distance from the root.
///
/// A node with a single child only forwards its child's verdict; a node with
/// two children additionally requires both subtrees to have equal height.
/// An empty tree qualifies.
pub fn equal_paths<N: Node>(arena: &[N], root: Option<u32>) -> bool {
    fn leaf_height<N: Node>(arena: &[N], node: u32) -> Option<usize> {
        let l = get_l(arena, node);
        let r = get_r(arena, node);
        let h = match (l, r) {
            (None, None) => 0,
            (Some(c), None) | (None, Some(c)) => leaf_height(arena, c)?,
            (Some(l), Some(r)) => {
                let lh = leaf_height(arena, l)?;
                let rh = leaf_height(arena, r)?;
                if lh != rh {
                    return None;
                }
                lh
            }
        };
        Some(h + 1)
    }

    root.map_or(true, |r| leaf_height(arena, r).is_some())
}

/// Releases the arena slot of a detached node.
///
/// The last node in the arena is moved into the freed slot and its parent and
/// children are relinked to the new index. Returns the released node together
/// with the (possibly renumbered) root. Indices other than `idx` and the
/// former last index are unaffected.
pub fn swap_remove<N: Node>(arena: &mut Vec<N>, root: Option<u32>, idx: u32) -> (N, Option<u32>) {
    debug_assert!(get_p(arena, idx).is_none() && root != Some(idx));
    debug_assert!(get_l(arena, idx).is_none() && get_r(arena, idx).is_none());

    let moved = (arena.len() - 1) as u32;
    let removed = arena.swap_remove(idx as usize);
    if moved == idx {
        return (removed, root);
    }

    let p = get_p(arena, idx);
    let root = replace_child(arena, root, p, moved, Some(idx));
    if let Some(l) = get_l(arena, idx) {
        set_p(arena, l, Some(idx));
    }
    if let Some(r) = get_r(arena, idx) {
        set_p(arena, r, Some(idx));
    }
    (removed, root)
}
