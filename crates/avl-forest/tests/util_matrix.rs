use std::cmp::Ordering;

use avl_forest::types::Node;
use avl_forest::util::{equal_paths, find, first, height, last, next, prev, size, swap, swap_remove};

#[derive(Clone, Debug)]
struct TestNode {
    p: Option<u32>,
    l: Option<u32>,
    r: Option<u32>,
    k: i32,
}

impl TestNode {
    fn new(k: i32) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
        }
    }
}

impl Node for TestNode {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

fn key_of(node: &TestNode) -> &i32 {
    &node.k
}

fn cmp_i32(a: &i32, b: &i32) -> Ordering {
    a.cmp(b)
}

fn link(arena: &mut [TestNode], parent: u32, child: u32, left: bool) {
    if left {
        arena[parent as usize].l = Some(child);
    } else {
        arena[parent as usize].r = Some(child);
    }
    arena[child as usize].p = Some(parent);
}

fn inorder_keys(arena: &[TestNode], root: Option<u32>) -> Vec<i32> {
    let mut out = Vec::new();
    let mut curr = first(arena, root);
    while let Some(i) = curr {
        out.push(arena[i as usize].k);
        curr = next(arena, i);
    }
    out
}

fn fixture_tree() -> (Vec<TestNode>, Option<u32>) {
    //        10(0)
    //      /      \
    //    5(1)     20(2)
    //      \      /   \
    //      7(3) 15(4) 30(5)
    let mut arena: Vec<TestNode> = [10, 5, 20, 7, 15, 30].into_iter().map(TestNode::new).collect();
    link(&mut arena, 0, 1, true);
    link(&mut arena, 0, 2, false);
    link(&mut arena, 1, 3, false);
    link(&mut arena, 2, 4, true);
    link(&mut arena, 2, 5, false);
    (arena, Some(0))
}

fn assert_links_consistent(arena: &[TestNode], root: Option<u32>) {
    let root = root.unwrap();
    assert_eq!(arena[root as usize].p, None);
    let mut stack = vec![root];
    while let Some(i) = stack.pop() {
        for c in [arena[i as usize].l, arena[i as usize].r].into_iter().flatten() {
            assert_eq!(arena[c as usize].p, Some(i), "child {c} of {i}");
            stack.push(c);
        }
    }
}

#[test]
fn traversal_matrix() {
    let (arena, root) = fixture_tree();
    assert_eq!(inorder_keys(&arena, root), vec![5, 7, 10, 15, 20, 30]);
    assert_eq!(first(&arena, root), Some(1));
    assert_eq!(last(&arena, root), Some(5));
    assert_eq!(first(&arena, None), None);
    assert_eq!(last(&arena, None), None);

    assert_eq!(next(&arena, 3), Some(0));
    assert_eq!(next(&arena, 5), None);
    assert_eq!(prev(&arena, 0), Some(3));
    assert_eq!(prev(&arena, 4), Some(0));
    assert_eq!(prev(&arena, 1), None);
}

#[test]
fn find_size_height_matrix() {
    let (arena, root) = fixture_tree();
    assert_eq!(find(&arena, root, &15, key_of, cmp_i32), Some(4));
    assert_eq!(find(&arena, root, &10, key_of, cmp_i32), Some(0));
    assert_eq!(find(&arena, root, &16, key_of, cmp_i32), None);
    assert_eq!(find(&arena, None, &10, key_of, cmp_i32), None);

    assert_eq!(size(&arena, root), 6);
    assert_eq!(size(&arena, Some(2)), 3);
    assert_eq!(size(&arena, None), 0);
    assert_eq!(height(&arena, root), 3);
    assert_eq!(height(&arena, Some(3)), 1);
    assert_eq!(height(&arena, None), 0);
}

#[test]
fn swap_distant_nodes() {
    let (mut arena, root) = fixture_tree();
    let root = swap(&mut arena, root, 1, 5);
    assert_eq!(root, Some(0));
    assert_eq!(arena[0].l, Some(5));
    assert_eq!(arena[5].p, Some(0));
    assert_eq!(arena[5].r, Some(3));
    assert_eq!(arena[3].p, Some(5));
    assert_eq!(arena[2].r, Some(1));
    assert_eq!(arena[1].p, Some(2));
    assert_eq!((arena[1].l, arena[1].r), (None, None));
    assert_links_consistent(&arena, root);
}

#[test]
fn swap_parent_and_child() {
    for (x, y) in [(0, 2), (2, 0)] {
        let (mut arena, root) = fixture_tree();
        let root = swap(&mut arena, root, x, y);
        assert_eq!(root, Some(2));
        assert_eq!(arena[2].p, None);
        assert_eq!(arena[2].l, Some(1));
        assert_eq!(arena[2].r, Some(0));
        assert_eq!(arena[0].p, Some(2));
        assert_eq!(arena[0].l, Some(4));
        assert_eq!(arena[0].r, Some(5));
        assert_eq!(arena[1].p, Some(2));
        assert_links_consistent(&arena, root);
    }
}

#[test]
fn swap_leaf_with_its_parent() {
    let (mut arena, root) = fixture_tree();
    let root = swap(&mut arena, root, 3, 1);
    assert_eq!(root, Some(0));
    assert_eq!(arena[0].l, Some(3));
    assert_eq!(arena[3].r, Some(1));
    assert_eq!(arena[3].l, None);
    assert_eq!(arena[1].p, Some(3));
    assert_eq!((arena[1].l, arena[1].r), (None, None));
    assert_links_consistent(&arena, root);
}

#[test]
fn swap_siblings() {
    let (mut arena, root) = fixture_tree();
    let root = swap(&mut arena, root, 1, 2);
    assert_eq!(root, Some(0));
    assert_eq!(arena[0].l, Some(2));
    assert_eq!(arena[0].r, Some(1));
    assert_eq!(arena[2].r, Some(3));
    assert_eq!((arena[1].l, arena[1].r), (Some(4), Some(5)));
    assert_links_consistent(&arena, root);
}

#[test]
fn swap_with_self_is_noop() {
    let (mut arena, root) = fixture_tree();
    assert_eq!(swap(&mut arena, root, 2, 2), root);
    assert_eq!(inorder_keys(&arena, root), vec![5, 7, 10, 15, 20, 30]);
}

#[test]
fn swap_remove_relinks_moved_node() {
    let (mut arena, root) = fixture_tree();
    arena[2].l = None;
    arena[4].p = None;

    let (removed, root) = swap_remove(&mut arena, root, 4);
    assert_eq!(removed.k, 15);
    assert_eq!(arena.len(), 5);
    assert_eq!(arena[4].k, 30);
    assert_eq!(arena[2].r, Some(4));
    assert_eq!(arena[4].p, Some(2));
    assert_eq!(inorder_keys(&arena, root), vec![5, 7, 10, 20, 30]);
    assert_links_consistent(&arena, root);
}

#[test]
fn swap_remove_renumbers_root() {
    let mut arena: Vec<TestNode> = [1, 3, 2].into_iter().map(TestNode::new).collect();
    link(&mut arena, 2, 0, true);
    link(&mut arena, 2, 1, false);
    arena[2].l = None;
    arena[0].p = None;

    let (removed, root) = swap_remove(&mut arena, Some(2), 0);
    assert_eq!(removed.k, 1);
    assert_eq!(root, Some(0));
    assert_eq!(arena[0].k, 2);
    assert_eq!(arena[1].p, Some(0));
    assert_eq!(inorder_keys(&arena, root), vec![2, 3]);
}

#[test]
fn swap_remove_last_slot() {
    let (mut arena, root) = fixture_tree();
    arena[2].r = None;
    arena[5].p = None;

    let (removed, root) = swap_remove(&mut arena, root, 5);
    assert_eq!(removed.k, 30);
    assert_eq!(arena.len(), 5);
    assert_eq!(inorder_keys(&arena, root), vec![5, 7, 10, 15, 20]);
}

#[test]
fn equal_paths_matrix() {
    let (mut arena, root) = fixture_tree();
    assert!(equal_paths(&arena, None));
    assert!(equal_paths(&arena, Some(3)));
    assert!(equal_paths(&arena, root));

    // 6 hangs under 7: the left subtree of the root is now one level deeper.
    arena.push(TestNode::new(6));
    link(&mut arena, 3, 6, true);
    assert!(!equal_paths(&arena, root));
    assert!(equal_paths(&arena, Some(1)));
}

#[test]
fn equal_paths_single_child_chain() {
    let mut arena: Vec<TestNode> = [1, 2, 3].into_iter().map(TestNode::new).collect();
    link(&mut arena, 0, 1, false);
    link(&mut arena, 1, 2, false);
    assert!(equal_paths(&arena, Some(0)));

    arena.push(TestNode::new(0));
    link(&mut arena, 0, 3, true);
    assert!(!equal_paths(&arena, Some(0)));
}
