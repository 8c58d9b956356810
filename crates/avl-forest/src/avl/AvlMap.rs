use std::cmp::Ordering;
use std::fmt::{self, Debug};

use crate::error::{InvariantError, KeyNotFound};
use crate::tracing_helpers::debug_log;
use crate::types::KvNode;
use crate::util::{find, first, height, last, next, size, swap_remove};

use super::types::AvlNode;
use super::util;

fn default_comparator<K: Ord>(a: &K, b: &K) -> Ordering {
    a.cmp(b)
}

/// Ordered map backed by an AVL tree stored in a node arena.
///
/// Arena slots are compacted on removal, so node indices handed out by
/// [`AvlMap::find_index`] or [`AvlMap::root_index`] are only valid until the
/// next [`AvlMap::remove`].
pub struct AvlMap<K, V, C = fn(&K, &K) -> Ordering>
where
    C: Fn(&K, &K) -> Ordering,
{
    root: Option<u32>,
    comparator: C,
    arena: Vec<AvlNode<K, V>>,
}

impl<K, V> AvlMap<K, V, fn(&K, &K) -> Ordering>
where
    K: Ord,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K, V> Default for AvlMap<K, V, fn(&K, &K) -> Ordering>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            comparator,
            arena: Vec::new(),
        }
    }

    fn push_node(&mut self, key: K, value: V) -> u32 {
        self.arena.push(AvlNode::new(key, value));
        (self.arena.len() - 1) as u32
    }

    /// Inserts `key`, or overwrites the value of an existing equal key
    /// without touching the tree shape.
    pub fn insert(&mut self, key: K, value: V) {
        let Some(mut curr) = self.root else {
            self.root = Some(self.push_node(key, value));
            return;
        };

        loop {
            match (self.comparator)(&key, self.arena[curr as usize].key()) {
                Ordering::Equal => {
                    self.arena[curr as usize].set_value(value);
                    return;
                }
                Ordering::Less => match self.arena[curr as usize].l {
                    Some(l) => curr = l,
                    None => {
                        let idx = self.push_node(key, value);
                        self.root = util::insert_left(&mut self.arena, self.root, idx, curr);
                        return;
                    }
                },
                Ordering::Greater => match self.arena[curr as usize].r {
                    Some(r) => curr = r,
                    None => {
                        let idx = self.push_node(key, value);
                        self.root = util::insert_right(&mut self.arena, self.root, idx, curr);
                        return;
                    }
                },
            }
        }
    }

    /// Removes `key` and returns its value. Absent keys are a no-op.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let node = self.find_index(key)?;
        debug_log!(node, len = self.arena.len(), "removing node");
        self.root = util::remove(&mut self.arena, self.root, node);
        let (removed, root) = swap_remove(&mut self.arena, self.root, node);
        self.root = root;
        Some(removed.into_parts().1)
    }

    /// Arena index of the node holding `key`.
    pub fn find_index(&self, key: &K) -> Option<u32> {
        find(
            &self.arena,
            self.root,
            key,
            |n| n.key(),
            |a, b| (self.comparator)(a, b),
        )
    }

    /// Value stored under `key`.
    pub fn find(&self, key: &K) -> Result<&V, KeyNotFound> {
        self.get(key).ok_or(KeyNotFound)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find_index(key).map(|i| self.arena[i as usize].value())
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.find_index(key)?;
        Some(self.arena[idx as usize].value_mut())
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find_index(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        first(&self.arena, self.root).map(|i| self.entry(i))
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        last(&self.arena, self.root).map(|i| self.entry(i))
    }

    /// Number of levels; 0 for an empty map.
    pub fn height(&self) -> usize {
        height(&self.arena, self.root)
    }

    pub fn root_index(&self) -> Option<u32> {
        self.root
    }

    pub fn node(&self, idx: u32) -> &AvlNode<K, V> {
        &self.arena[idx as usize]
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    #[cfg(test)]
    pub(crate) fn raw_parts_mut(&mut self) -> (&mut [AvlNode<K, V>], &mut Option<u32>) {
        (&mut self.arena, &mut self.root)
    }

    fn entry(&self, idx: u32) -> (&K, &V) {
        let n = &self.arena[idx as usize];
        (&n.k, &n.v)
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            arena: &self.arena,
            curr: first(&self.arena, self.root),
            remaining: self.arena.len(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Checks links, balance factors, key order and that every arena slot
    /// is reachable from the root.
    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        util::assert_avl_tree(
            &self.arena,
            self.root,
            |n| &n.k,
            |a, b| (self.comparator)(a, b),
        )?;
        let reachable = size(&self.arena, self.root);
        if reachable != self.arena.len() {
            return Err(InvariantError::LeakedNodes {
                reachable,
                allocated: self.arena.len(),
            });
        }
        Ok(())
    }

    pub fn print(&self) -> String
    where
        K: Debug,
        V: Debug,
    {
        format!(
            "AvlMap\n└─ {}",
            util::print::<K, V, AvlNode<K, V>>(&self.arena, self.root, "   ")
        )
    }
}

/// In-order iterator over the entries of an [`AvlMap`].
pub struct Iter<'a, K, V> {
    arena: &'a [AvlNode<K, V>],
    curr: Option<u32>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.curr?;
        self.curr = next(self.arena, i);
        self.remaining -= 1;
        let n = &self.arena[i as usize];
        Some((&n.k, &n.v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V, C> IntoIterator for &'a AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C> Extend<(K, V)> for AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Debug, V: Debug, C> Debug for AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
