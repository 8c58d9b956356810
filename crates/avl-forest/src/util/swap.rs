use crate::types::Node;

use super::{get_l, get_p, get_r, set_l, set_p, set_r};

/// Parent of `i` and whether `i` is its left child.
fn attachment<N: Node>(arena: &[N], i: u32) -> Option<(u32, bool)> {
    get_p(arena, i).map(|p| (p, get_l(arena, p) == Some(i)))
}

fn attach<N: Node>(arena: &mut [N], parent: u32, left: bool, child: u32) {
    if left {
        set_l(arena, parent, Some(child));
    } else {
        set_r(arena, parent, Some(child));
    }
}

/// Exchanges the tree positions of `x` and `y`.
///
/// Only links move; each node keeps its own payload. Works when one node is
/// the direct parent of the other. Returns the new root.
pub fn swap<N: Node>(arena: &mut [N], mut root: Option<u32>, x: u32, y: u32) -> Option<u32> {
    if x == y {
        return root;
    }

    let (xp, xl, xr) = (get_p(arena, x), get_l(arena, x), get_r(arena, x));
    let (yp, yl, yr) = (get_p(arena, y), get_l(arena, y), get_r(arena, y));
    let x_at = attachment(arena, x);
    let y_at = attachment(arena, y);

    // A link to one of the pair becomes a link to the other.
    let flip = |v: Option<u32>| match v {
        Some(i) if i == x => Some(y),
        Some(i) if i == y => Some(x),
        v => v,
    };

    set_p(arena, x, flip(yp));
    set_l(arena, x, flip(yl));
    set_r(arena, x, flip(yr));
    set_p(arena, y, flip(xp));
    set_l(arena, y, flip(xl));
    set_r(arena, y, flip(xr));

    for node in [x, y] {
        if let Some(c) = get_l(arena, node) {
            set_p(arena, c, Some(node));
        }
        if let Some(c) = get_r(arena, node) {
            set_p(arena, c, Some(node));
        }
    }

    match x_at {
        Some((q, left)) if q != y => attach(arena, q, left, y),
        Some(_) => {}
        None => root = Some(y),
    }
    match y_at {
        Some((q, left)) if q != x => attach(arena, q, left, x),
        Some(_) => {}
        None => root = Some(x),
    }

    root
}
