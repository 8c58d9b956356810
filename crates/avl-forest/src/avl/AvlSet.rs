use std::cmp::Ordering;

use crate::error::InvariantError;

use super::avl_map::AvlMap;

/// Ordered set backed by [`AvlMap<T, ()>`].
pub struct AvlSet<T, C = fn(&T, &T) -> Ordering>
where
    C: Fn(&T, &T) -> Ordering,
{
    inner: AvlMap<T, (), C>,
}

impl<T> AvlSet<T, fn(&T, &T) -> Ordering>
where
    T: Ord,
{
    pub fn new() -> Self {
        Self {
            inner: AvlMap::new(),
        }
    }
}

impl<T> Default for AvlSet<T, fn(&T, &T) -> Ordering>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> AvlSet<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            inner: AvlMap::with_comparator(comparator),
        }
    }

    /// Returns `false` when an equal value was already present.
    pub fn insert(&mut self, value: T) -> bool {
        if self.inner.contains_key(&value) {
            return false;
        }
        self.inner.insert(value, ());
        true
    }

    pub fn remove(&mut self, value: &T) -> bool {
        self.inner.remove(value).is_some()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.inner.contains_key(value)
    }

    pub fn clear(&mut self) {
        self.inner.clear()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn first(&self) -> Option<&T> {
        self.inner.first().map(|(k, _)| k)
    }

    pub fn last(&self) -> Option<&T> {
        self.inner.last().map(|(k, _)| k)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.inner.keys()
    }

    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        self.inner.assert_valid()
    }
}

impl<T, C> Extend<T> for AvlSet<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl<T: Ord> FromIterator<T> for AvlSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
