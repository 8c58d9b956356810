use std::cmp::Ordering;
use std::fmt::Debug;

use crate::error::InvariantError;
use crate::tracing_helpers::trace_log;
use crate::types::{KvNode, Node};
use crate::util::{self, first, get_l, get_p, get_r, next, prev, replace_child, set_l, set_p, set_r};

use super::types::AvlNodeLike;

#[inline]
fn bf<N: AvlNodeLike>(arena: &[N], i: u32) -> i8 {
    arena[i as usize].bf()
}

#[inline]
fn set_bf<N: AvlNodeLike>(arena: &mut [N], i: u32, v: i8) {
    arena[i as usize].set_bf(v);
}

/// Side of a node: where a child hangs, or which subtree is too tall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Balance change when this side grows by one level.
    pub fn sign(self) -> i8 {
        match self {
            Side::Left => -1,
            Side::Right => 1,
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[inline]
fn child<N: Node>(arena: &[N], i: u32, side: Side) -> Option<u32> {
    match side {
        Side::Left => get_l(arena, i),
        Side::Right => get_r(arena, i),
    }
}

/// Balances `(outer, top)` after a double rotation.
///
/// `top` was too tall on the `heavy` side, `outer` is its child on that side
/// and the pivot is `outer`'s inner child, which ends up on top with
/// balance 0. The result depends only on the pivot's balance before rotating.
pub fn double_rotation_balances(heavy: Side, pivot: i8) -> (i8, i8) {
    match (heavy, pivot) {
        (Side::Left, -1) => (0, 1),
        (Side::Left, 1) => (-1, 0),
        (Side::Right, 1) => (0, -1),
        (Side::Right, -1) => (1, 0),
        _ => (0, 0),
    }
}

/// Right rotation around `z`.
///
/// `z`'s left child takes its place, `z` becomes that child's right child
/// and the child's former right subtree moves under `z`. Balance factors are
/// left untouched. No-op when `z` has no left child. Returns the new root.
pub fn rotate_right<N: Node>(arena: &mut [N], root: Option<u32>, z: u32) -> Option<u32> {
    let Some(y) = get_l(arena, z) else {
        return root;
    };
    let p = get_p(arena, z);
    let c = get_r(arena, y);

    set_l(arena, z, c);
    if let Some(c) = c {
        set_p(arena, c, Some(z));
    }
    set_r(arena, y, Some(z));
    set_p(arena, z, Some(y));
    set_p(arena, y, p);
    replace_child(arena, root, p, z, Some(y))
}

/// Left rotation around `z`. Mirror of [`rotate_right`].
pub fn rotate_left<N: Node>(arena: &mut [N], root: Option<u32>, z: u32) -> Option<u32> {
    let Some(y) = get_r(arena, z) else {
        return root;
    };
    let p = get_p(arena, z);
    let c = get_l(arena, y);

    set_r(arena, z, c);
    if let Some(c) = c {
        set_p(arena, c, Some(z));
    }
    set_l(arena, y, Some(z));
    set_p(arena, z, Some(y));
    set_p(arena, y, p);
    replace_child(arena, root, p, z, Some(y))
}

/// Lifts `z`'s child on `side` into `z`'s position.
#[inline]
fn lift<N: Node>(arena: &mut [N], root: Option<u32>, z: u32, side: Side) -> Option<u32> {
    match side {
        Side::Left => rotate_right(arena, root, z),
        Side::Right => rotate_left(arena, root, z),
    }
}

/// Exchanges the tree positions and balance factors of `x` and `y`.
pub fn swap<N: AvlNodeLike>(arena: &mut [N], root: Option<u32>, x: u32, y: u32) -> Option<u32> {
    let root = util::swap(arena, root, x, y);
    let (bx, by) = (bf(arena, x), bf(arena, y));
    set_bf(arena, x, by);
    set_bf(arena, y, bx);
    root
}

fn attach_leaf<N: AvlNodeLike>(
    arena: &mut [N],
    root: Option<u32>,
    n: u32,
    p: u32,
    side: Side,
) -> Option<u32> {
    set_p(arena, n, Some(p));
    set_bf(arena, n, 0);
    if bf(arena, p) != 0 {
        // Parent leaned the other way; its height is unchanged.
        set_bf(arena, p, 0);
        return root;
    }
    set_bf(arena, p, side.sign());
    insert_fix(arena, root, p, n)
}

/// Hangs leaf `n` as the left child of `p` and rebalances.
/// Returns the new root.
pub fn insert_left<N: AvlNodeLike>(
    arena: &mut [N],
    root: Option<u32>,
    n: u32,
    p: u32,
) -> Option<u32> {
    set_l(arena, p, Some(n));
    attach_leaf(arena, root, n, p, Side::Left)
}

/// Hangs leaf `n` as the right child of `p` and rebalances.
/// Returns the new root.
pub fn insert_right<N: AvlNodeLike>(
    arena: &mut [N],
    root: Option<u32>,
    n: u32,
    p: u32,
) -> Option<u32> {
    set_r(arena, p, Some(n));
    attach_leaf(arena, root, n, p, Side::Right)
}

/// Walks up from `p` (whose subtree just grew through its child `n`),
/// updating balances and rotating once some ancestor reaches ±2.
///
/// Stops as soon as an ancestor absorbs the growth or after any rotation,
/// since a rotation restores the subtree's height from before the insert.
pub fn insert_fix<N: AvlNodeLike>(
    arena: &mut [N],
    mut root: Option<u32>,
    mut p: u32,
    mut n: u32,
) -> Option<u32> {
    while let Some(g) = get_p(arena, p) {
        let side = if get_l(arena, g) == Some(p) {
            Side::Left
        } else {
            Side::Right
        };
        let gbf = bf(arena, g) + side.sign();
        set_bf(arena, g, gbf);
        trace_log!(node = g, balance = gbf, "insert fix-up");

        match gbf {
            0 => return root,
            -1 | 1 => {
                n = p;
                p = g;
            }
            _ => {
                if child(arena, p, side) == Some(n) {
                    trace_log!(node = g, "insert: single rotation");
                    root = lift(arena, root, g, side);
                    set_bf(arena, p, 0);
                    set_bf(arena, g, 0);
                } else {
                    trace_log!(node = g, pivot = n, "insert: double rotation");
                    let pivot = bf(arena, n);
                    root = lift(arena, root, p, side.opposite());
                    root = lift(arena, root, g, side);
                    let (outer, top) = double_rotation_balances(side, pivot);
                    set_bf(arena, p, outer);
                    set_bf(arena, g, top);
                    set_bf(arena, n, 0);
                }
                return root;
            }
        }
    }
    root
}

/// Unlinks `n` from the tree and rebalances.
///
/// A node with two children first trades places with its in-order
/// predecessor. Afterwards `n` is detached (no links, balance 0) but still
/// occupies its arena slot. Returns the new root.
pub fn remove<N: AvlNodeLike>(arena: &mut [N], mut root: Option<u32>, n: u32) -> Option<u32> {
    if get_l(arena, n).is_some() && get_r(arena, n).is_some() {
        let pred = prev(arena, n).expect("node with a left child has a predecessor");
        root = swap(arena, root, n, pred);
    }

    let p = get_p(arena, n);
    let diff = match p {
        Some(p) if get_l(arena, p) == Some(n) => 1,
        _ => -1,
    };
    let c = get_l(arena, n).or(get_r(arena, n));
    if let Some(c) = c {
        set_p(arena, c, p);
    }
    root = replace_child(arena, root, p, n, c);

    set_p(arena, n, None);
    set_l(arena, n, None);
    set_r(arena, n, None);
    set_bf(arena, n, 0);
    trace_log!(node = n, parent = ?p, diff, "unlinked node");

    remove_fix(arena, root, p, diff)
}

/// Walks up from `n`, one of whose subtrees just shrank by one level.
///
/// `diff` is `+1` when the left subtree shrank and `-1` when the right one
/// did. Continues while the subtree height keeps decreasing and stops once a
/// node absorbs the change.
pub fn remove_fix<N: AvlNodeLike>(
    arena: &mut [N],
    mut root: Option<u32>,
    mut n: Option<u32>,
    mut diff: i8,
) -> Option<u32> {
    while let Some(node) = n {
        // Captured before any rotation moves `node`.
        let p = get_p(arena, node);
        let next_diff = match p {
            Some(p) if get_l(arena, p) == Some(node) => 1,
            _ => -1,
        };

        let b = bf(arena, node) + diff;
        trace_log!(node, balance = b, diff, "remove fix-up");
        match b {
            -2 | 2 => {
                let heavy = if b < 0 { Side::Left } else { Side::Right };
                let c = child(arena, node, heavy).expect("heavy side has a child");
                let cbf = bf(arena, c);
                if cbf == heavy.sign() {
                    root = lift(arena, root, node, heavy);
                    set_bf(arena, node, 0);
                    set_bf(arena, c, 0);
                } else if cbf == 0 {
                    root = lift(arena, root, node, heavy);
                    set_bf(arena, node, heavy.sign());
                    set_bf(arena, c, -heavy.sign());
                    return root;
                } else {
                    let g = child(arena, c, heavy.opposite()).expect("inner grandchild exists");
                    let pivot = bf(arena, g);
                    root = lift(arena, root, c, heavy.opposite());
                    root = lift(arena, root, node, heavy);
                    let (outer, top) = double_rotation_balances(heavy, pivot);
                    set_bf(arena, c, outer);
                    set_bf(arena, node, top);
                    set_bf(arena, g, 0);
                }
            }
            -1 | 1 => {
                set_bf(arena, node, b);
                return root;
            }
            _ => set_bf(arena, node, 0),
        }

        n = p;
        diff = next_diff;
    }
    root
}

/// Checks links, balance factors and key order of the tree under `root`.
pub fn assert_avl_tree<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key_of: F,
    comparator: C,
) -> Result<(), InvariantError>
where
    N: AvlNodeLike,
    K: ?Sized,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> Ordering,
{
    let Some(root) = root else {
        return Ok(());
    };
    if get_p(arena, root).is_some() {
        return Err(InvariantError::RootHasParent(root));
    }

    // Returns the subtree height.
    fn validate<N: AvlNodeLike>(arena: &[N], node: u32) -> Result<i32, InvariantError> {
        let height_of = |c: Option<u32>| match c {
            None => Ok(0),
            Some(c) if get_p(arena, c) != Some(node) => Err(InvariantError::BrokenParentLink {
                parent: node,
                child: c,
            }),
            Some(c) => validate(arena, c),
        };
        let lh = height_of(get_l(arena, node))?;
        let rh = height_of(get_r(arena, node))?;

        let expected = rh - lh;
        let actual = bf(arena, node);
        if i32::from(actual) != expected {
            return Err(InvariantError::BalanceMismatch {
                node,
                expected,
                actual,
            });
        }
        if !(-1..=1).contains(&actual) {
            return Err(InvariantError::Unbalanced {
                node,
                balance: actual,
            });
        }
        Ok(1 + lh.max(rh))
    }

    validate(arena, root)?;

    let mut prev_node = first(arena, Some(root));
    let mut curr = prev_node.and_then(|i| next(arena, i));
    while let (Some(a), Some(b)) = (prev_node, curr) {
        if comparator(key_of(&arena[a as usize]), key_of(&arena[b as usize])) != Ordering::Less {
            return Err(InvariantError::OrderViolated(b));
        }
        prev_node = curr;
        curr = next(arena, b);
    }

    Ok(())
}

/// Debug dump of the subtree under `node`, one node per line.
pub fn print<K, V, N>(arena: &[N], node: Option<u32>, tab: &str) -> String
where
    K: Debug,
    V: Debug,
    N: AvlNodeLike + KvNode<K, V>,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let left = print::<K, V, N>(arena, n.l(), &format!("{tab}│  "));
            let right = print::<K, V, N>(arena, n.r(), &format!("{tab}   "));
            format!(
                "{:?} = {:?} [bf={:+}]\n{tab}├─ {left}\n{tab}└─ {right}",
                n.key(),
                n.value(),
                n.bf()
            )
        }
    }
}
