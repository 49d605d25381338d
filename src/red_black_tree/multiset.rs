use crate::red_black_tree::iter::{Cursor, IntoIter, Iter};
use crate::red_black_tree::policy::MultisetPolicy;
use crate::red_black_tree::tree::Tree;
use crate::red_black_tree::{Error, Result};
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;

/// An ordered multiset implemented using a red black tree.
///
/// Equal keys may be inserted any number of times. A newly inserted key is ordered after every
/// equal key already in the multiset, so equal keys iterate in insertion order.
///
/// # Examples
///
/// ```
/// use rb_collections::red_black_tree::RedBlackMultiset;
///
/// let mut multiset = RedBlackMultiset::new();
/// multiset.insert(2);
/// multiset.insert(2);
/// multiset.insert(1);
///
/// assert_eq!(multiset.len(), 3);
/// assert_eq!(multiset.count(&2), 2);
///
/// assert_eq!(multiset.remove(&2), Some(2));
/// assert_eq!(multiset.count(&2), 1);
/// ```
pub struct RedBlackMultiset<T>
where
    T: Ord,
{
    tree: Tree<MultisetPolicy<T>>,
}

impl<T> RedBlackMultiset<T>
where
    T: Ord,
{
    /// Constructs a new, empty `RedBlackMultiset<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let multiset: RedBlackMultiset<u32> = RedBlackMultiset::new();
    /// ```
    pub fn new() -> Self {
        RedBlackMultiset { tree: Tree::new() }
    }

    /// Constructs a new, empty `RedBlackMultiset<T>` whose nodes are allocated `chunk_size` at a
    /// time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        RedBlackMultiset {
            tree: Tree::with_chunk_size(chunk_size),
        }
    }

    /// Inserts a key into the multiset and returns a cursor to it. The insertion always succeeds.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let mut multiset = RedBlackMultiset::new();
    /// let first = multiset.insert(1);
    /// let second = multiset.insert(1);
    /// assert_ne!(first, second);
    /// assert_eq!(multiset.next(first), second);
    /// ```
    pub fn insert(&mut self, key: T) -> Cursor {
        let (node, _) = self.tree.insert(key);
        Cursor::new(Some(node))
    }

    /// Inserts every key of `iter` and returns a cursor to each inserted key in order.
    pub fn insert_many<I>(&mut self, iter: I) -> Vec<Cursor>
    where
        I: IntoIterator<Item = T>,
    {
        iter.into_iter().map(|key| self.insert(key)).collect()
    }

    /// Removes one occurrence of a key from the multiset and returns it. Returns `None` if the
    /// key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let mut multiset = RedBlackMultiset::new();
    /// multiset.insert(1);
    /// assert_eq!(multiset.remove(&1), Some(1));
    /// assert_eq!(multiset.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.remove(key)
    }

    /// Removes every occurrence of a key from the multiset and returns how many were removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let mut multiset: RedBlackMultiset<u32> = vec![1, 2, 2, 3].into_iter().collect();
    /// assert_eq!(multiset.remove_all(&2), 2);
    /// assert_eq!(multiset.len(), 2);
    /// ```
    pub fn remove_all<V>(&mut self, key: &V) -> usize
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let (mut curr, upper) = self.tree.equal_range(key);
        let mut removed = 0;
        while curr != upper {
            let node = match curr {
                Some(node) => node,
                None => break,
            };
            curr = self.tree.successor(node);
            self.tree.erase(node);
            removed += 1;
        }
        removed
    }

    /// Removes the key a cursor refers to and returns it. Returns `Error::InvalidCursor` if the
    /// cursor is the end position or does not refer to a key of this multiset.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::{Error, RedBlackMultiset};
    ///
    /// let mut multiset = RedBlackMultiset::new();
    /// let first = multiset.insert(1);
    /// let second = multiset.insert(1);
    /// assert_eq!(multiset.erase(second), Ok(1));
    /// assert_eq!(multiset.erase(second), Err(Error::InvalidCursor));
    /// assert_eq!(multiset.value_at(first), Some(&1));
    /// ```
    pub fn erase(&mut self, cursor: Cursor) -> Result<T> {
        let node = self.tree.resolve(cursor).ok_or(Error::InvalidCursor)?;
        Ok(self.tree.erase(node))
    }

    /// Checks if a key exists in the multiset.
    pub fn contains<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.search(key).is_some()
    }

    /// Returns a cursor to the first occurrence of a key, or the end cursor if the key does not
    /// exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let mut multiset = RedBlackMultiset::new();
    /// let first = multiset.insert(1);
    /// multiset.insert(1);
    /// assert_eq!(multiset.find(&1), first);
    /// assert!(multiset.find(&2).is_end());
    /// ```
    pub fn find<V>(&self, key: &V) -> Cursor
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        match self.tree.equal_range(key) {
            (lower, upper) if lower != upper => Cursor::new(lower),
            _ => Cursor::end(),
        }
    }

    /// Returns the number of occurrences of a key.
    pub fn count<V>(&self, key: &V) -> usize
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.count(key)
    }

    /// Returns a cursor to the first key that is not less than `key`.
    pub fn lower_bound<V>(&self, key: &V) -> Cursor
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        Cursor::new(self.tree.lower_bound(key))
    }

    /// Returns a cursor to the first key that is greater than `key`.
    pub fn upper_bound<V>(&self, key: &V) -> Cursor
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        Cursor::new(self.tree.upper_bound(key))
    }

    /// Returns the half-open cursor range of keys equal to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let multiset: RedBlackMultiset<u32> = vec![1, 2, 2, 2, 3].into_iter().collect();
    /// let (lower, upper) = multiset.equal_range(&2);
    /// assert_eq!(lower, multiset.lower_bound(&2));
    /// assert_eq!(multiset.value_at(upper), Some(&3));
    /// assert_eq!(multiset.range_iter(lower, upper).count(), 3);
    /// ```
    pub fn equal_range<V>(&self, key: &V) -> (Cursor, Cursor)
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let (lower, upper) = self.tree.equal_range(key);
        (Cursor::new(lower), Cursor::new(upper))
    }

    /// Returns the key a cursor refers to, or `None` for the end cursor and for cursors that do
    /// not refer to a key of this collection.
    pub fn value_at(&self, cursor: Cursor) -> Option<&T> {
        self.tree.resolve(cursor).and_then(|node| self.tree.value(node))
    }

    /// Returns a cursor to the minimum key, or the end cursor if the multiset is empty.
    pub fn begin(&self) -> Cursor {
        Cursor::new(self.tree.first())
    }

    /// Returns the past-the-end cursor.
    pub fn end(&self) -> Cursor {
        Cursor::end()
    }

    /// Returns a cursor to the maximum key, the first position of a descending traversal.
    pub fn rbegin(&self) -> Cursor {
        Cursor::new(self.tree.last())
    }

    /// Returns the end cursor of a descending traversal.
    pub fn rend(&self) -> Cursor {
        Cursor::end()
    }

    /// Returns the cursor after `cursor` in ascending order.
    pub fn next(&self, cursor: Cursor) -> Cursor {
        self.tree.advance(cursor)
    }

    /// Returns the cursor before `cursor` in ascending order.
    pub fn prev(&self, cursor: Cursor) -> Cursor {
        self.tree.retreat(cursor)
    }

    /// Returns the number of elements in the multiset, counting duplicates.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the multiset is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the largest number of elements the multiset could theoretically hold.
    pub fn max_size(&self) -> usize {
        self.tree.max_size()
    }

    /// Clears the multiset, removing all values.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Exchanges the contents of two multisets. Cursors follow their elements into the other
    /// multiset.
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    /// Moves every key of `other` into this multiset, leaving `other` empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let mut a: RedBlackMultiset<u32> = vec![1, 3].into_iter().collect();
    /// let mut b: RedBlackMultiset<u32> = vec![3, 4].into_iter().collect();
    /// b.merge(&mut a);
    /// assert!(a.is_empty());
    /// assert_eq!(b.iter().collect::<Vec<&u32>>(), vec![&1, &3, &3, &4]);
    /// ```
    pub fn merge(&mut self, other: &mut Self) {
        self.tree.merge(&mut other.tree);
    }

    /// Returns the minimum key of the multiset. Returns `None` if the multiset is empty.
    pub fn min(&self) -> Option<&T> {
        self.tree.first().and_then(|node| self.tree.value(node))
    }

    /// Returns the maximum key of the multiset. Returns `None` if the multiset is empty.
    pub fn max(&self) -> Option<&T> {
        self.tree.last().and_then(|node| self.tree.value(node))
    }

    /// Returns an iterator over the multiset. The iterator will yield keys using in-order
    /// traversal; reverse it for descending order.
    pub fn iter(&self) -> RedBlackMultisetIter<'_, T> {
        RedBlackMultisetIter {
            iter: self.tree.iter(),
        }
    }

    /// Returns an iterator over the half-open cursor range `[lower, upper)`.
    pub fn range_iter(&self, lower: Cursor, upper: Cursor) -> RedBlackMultisetIter<'_, T> {
        RedBlackMultisetIter {
            iter: self.tree.range(lower, upper),
        }
    }
}

impl<T> IntoIterator for RedBlackMultiset<T>
where
    T: Ord,
{
    type IntoIter = RedBlackMultisetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            iter: self.tree.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a RedBlackMultiset<T>
where
    T: 'a + Ord,
{
    type IntoIter = RedBlackMultisetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `RedBlackMultiset<T>`.
///
/// This iterator traverses the elements of the multiset in-order and yields owned keys.
pub struct RedBlackMultisetIntoIter<T>
where
    T: Ord,
{
    iter: IntoIter<MultisetPolicy<T>>,
}

impl<T> Iterator for RedBlackMultisetIntoIter<T>
where
    T: Ord,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T> DoubleEndedIterator for RedBlackMultisetIntoIter<T>
where
    T: Ord,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back()
    }
}

/// An iterator for `RedBlackMultiset<T>`.
///
/// This iterator traverses the elements of the multiset in-order and yields immutable
/// references.
pub struct RedBlackMultisetIter<'a, T> {
    iter: Iter<'a, T>,
}

impl<'a, T> Iterator for RedBlackMultisetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
}

impl<'a, T> DoubleEndedIterator for RedBlackMultisetIter<'a, T>
where
    T: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back()
    }
}

impl<T> Default for RedBlackMultiset<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for RedBlackMultiset<T>
where
    T: Clone + Ord,
{
    fn clone(&self) -> Self {
        RedBlackMultiset {
            tree: self.tree.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.tree.clone_from(&source.tree);
    }
}

impl<T> FromIterator<T> for RedBlackMultiset<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut multiset = RedBlackMultiset::new();
        multiset.extend(iter);
        multiset
    }
}

impl<T> Extend<T> for RedBlackMultiset<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T> PartialEq for RedBlackMultiset<T>
where
    T: Ord,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for RedBlackMultiset<T> where T: Ord {}

impl<T> fmt::Debug for RedBlackMultiset<T>
where
    T: fmt::Debug + Ord,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
