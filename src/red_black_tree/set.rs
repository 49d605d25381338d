use crate::red_black_tree::iter::{Cursor, IntoIter, Iter};
use crate::red_black_tree::policy::SetPolicy;
use crate::red_black_tree::tree::Tree;
use crate::red_black_tree::{Error, Result};
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;

/// An ordered set implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree that colors each node red or black.
/// No red node has a red child and every path from the root to a leaf crosses the same number of
/// black nodes, which bounds the height of the tree by twice the logarithm of its size.
///
/// Positions in the set are exposed as `Cursor`s, which stay valid until the element they refer
/// to is erased.
///
/// # Examples
///
/// ```
/// use rb_collections::red_black_tree::RedBlackSet;
///
/// let mut set = RedBlackSet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
///
/// assert_eq!(set.min(), Some(&0));
/// assert_eq!(set.value_at(set.lower_bound(&2)), Some(&3));
///
/// assert_eq!(set.remove(&0), Some(0));
/// assert_eq!(set.remove(&1), None);
/// ```
pub struct RedBlackSet<T>
where
    T: Ord,
{
    tree: Tree<SetPolicy<T>>,
}

impl<T> RedBlackSet<T>
where
    T: Ord,
{
    /// Constructs a new, empty `RedBlackSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// ```
    pub fn new() -> Self {
        RedBlackSet { tree: Tree::new() }
    }

    /// Constructs a new, empty `RedBlackSet<T>` whose nodes are allocated `chunk_size` at a time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        RedBlackSet {
            tree: Tree::with_chunk_size(chunk_size),
        }
    }

    /// Inserts a key into the set. Returns a cursor to the key in the set and `true` if the key
    /// was inserted. If an equal key already exists, the set is left unchanged and the cursor
    /// refers to the existing key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// let (cursor, inserted) = set.insert(1);
    /// assert!(inserted);
    /// assert_eq!(set.insert(1), (cursor, false));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> (Cursor, bool) {
        let (node, rejected) = self.tree.insert(key);
        (Cursor::new(Some(node)), rejected.is_none())
    }

    /// Inserts every key of `iter` and returns the result of each insertion in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// let results = set.insert_many(vec![2, 1, 2]);
    /// assert_eq!(
    ///     results.iter().map(|pair| pair.1).collect::<Vec<bool>>(),
    ///     vec![true, true, false],
    /// );
    /// assert_eq!(results[0].0, results[2].0);
    /// ```
    pub fn insert_many<I>(&mut self, iter: I) -> Vec<(Cursor, bool)>
    where
        I: IntoIterator<Item = T>,
    {
        iter.into_iter().map(|key| self.insert(key)).collect()
    }

    /// Removes a key from the set. If the key exists in the set, it will return the associated
    /// key. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.remove(key)
    }

    /// Removes the key a cursor refers to and returns it. Returns `Error::InvalidCursor` if the
    /// cursor is the end position or does not refer to a key of this set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::{Error, RedBlackSet};
    ///
    /// let mut set = RedBlackSet::new();
    /// let (cursor, _) = set.insert(1);
    /// assert_eq!(set.erase(cursor), Ok(1));
    /// assert_eq!(set.erase(set.end()), Err(Error::InvalidCursor));
    /// ```
    pub fn erase(&mut self, cursor: Cursor) -> Result<T> {
        let node = self.tree.resolve(cursor).ok_or(Error::InvalidCursor)?;
        Ok(self.tree.erase(node))
    }

    /// Checks if a key exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.search(key).is_some()
    }

    /// Returns a cursor to a key, or the end cursor if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.value_at(set.find(&1)), Some(&1));
    /// assert!(set.find(&2).is_end());
    /// ```
    pub fn find<V>(&self, key: &V) -> Cursor
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        Cursor::new(self.tree.search(key))
    }

    /// Returns the number of keys equal to `key`, which is either zero or one.
    pub fn count<V>(&self, key: &V) -> usize
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.count(key)
    }

    /// Returns a cursor to the first key that is not less than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = vec![1, 3, 5].into_iter().collect();
    /// assert_eq!(set.value_at(set.lower_bound(&3)), Some(&3));
    /// assert_eq!(set.value_at(set.lower_bound(&4)), Some(&5));
    /// assert!(set.lower_bound(&6).is_end());
    /// ```
    pub fn lower_bound<V>(&self, key: &V) -> Cursor
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        Cursor::new(self.tree.lower_bound(key))
    }

    /// Returns a cursor to the first key that is greater than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = vec![1, 3, 5].into_iter().collect();
    /// assert_eq!(set.value_at(set.upper_bound(&3)), Some(&5));
    /// assert!(set.upper_bound(&5).is_end());
    /// ```
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
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = vec![1, 3, 5].into_iter().collect();
    /// let (lower, upper) = set.equal_range(&3);
    /// assert_eq!(set.range_iter(lower, upper).collect::<Vec<&u32>>(), vec![&3]);
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

    /// Returns a cursor to the minimum key, or the end cursor if the set is empty.
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
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = vec![1, 2].into_iter().collect();
    /// let mut cursor = set.begin();
    /// assert_eq!(set.value_at(cursor), Some(&1));
    /// cursor = set.next(cursor);
    /// assert_eq!(set.value_at(cursor), Some(&2));
    /// cursor = set.next(cursor);
    /// assert_eq!(cursor, set.end());
    /// ```
    pub fn next(&self, cursor: Cursor) -> Cursor {
        self.tree.advance(cursor)
    }

    /// Returns the cursor before `cursor` in ascending order.
    pub fn prev(&self, cursor: Cursor) -> Cursor {
        self.tree.retreat(cursor)
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the largest number of elements the set could theoretically hold.
    pub fn max_size(&self) -> usize {
        self.tree.max_size()
    }

    /// Clears the set, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Exchanges the contents of two sets. Cursors follow their elements into the other set.
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    /// Moves every key of `other` that is not already in this set into this set. Keys that
    /// collide stay in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut a: RedBlackSet<u32> = vec![1, 3, 5].into_iter().collect();
    /// let mut b: RedBlackSet<u32> = vec![2, 3, 4].into_iter().collect();
    /// b.merge(&mut a);
    /// assert_eq!(b.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3, &4, &5]);
    /// assert_eq!(a.iter().collect::<Vec<&u32>>(), vec![&3]);
    /// ```
    pub fn merge(&mut self, other: &mut Self) {
        self.tree.merge(&mut other.tree);
    }

    /// Returns the minimum key of the set. Returns `None` if the set is empty.
    pub fn min(&self) -> Option<&T> {
        self.tree.first().and_then(|node| self.tree.value(node))
    }

    /// Returns the maximum key of the set. Returns `None` if the set is empty.
    pub fn max(&self) -> Option<&T> {
        self.tree.last().and_then(|node| self.tree.value(node))
    }

    /// Returns an iterator over the set. The iterator will yield keys using in-order traversal;
    /// reverse it for descending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// assert_eq!(set.iter().rev().collect::<Vec<&u32>>(), vec![&3, &1]);
    /// ```
    pub fn iter(&self) -> RedBlackSetIter<'_, T> {
        RedBlackSetIter {
            iter: self.tree.iter(),
        }
    }

    /// Returns an iterator over the half-open cursor range `[lower, upper)`.
    pub fn range_iter(&self, lower: Cursor, upper: Cursor) -> RedBlackSetIter<'_, T> {
        RedBlackSetIter {
            iter: self.tree.range(lower, upper),
        }
    }
}

impl<T> IntoIterator for RedBlackSet<T>
where
    T: Ord,
{
    type IntoIter = RedBlackSetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            iter: self.tree.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a RedBlackSet<T>
where
    T: 'a + Ord,
{
    type IntoIter = RedBlackSetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `RedBlackSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields owned keys.
pub struct RedBlackSetIntoIter<T>
where
    T: Ord,
{
    iter: IntoIter<SetPolicy<T>>,
}

impl<T> Iterator for RedBlackSetIntoIter<T>
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

impl<T> DoubleEndedIterator for RedBlackSetIntoIter<T>
where
    T: Ord,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back()
    }
}

/// An iterator for `RedBlackSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct RedBlackSetIter<'a, T> {
    iter: Iter<'a, T>,
}

impl<'a, T> Iterator for RedBlackSetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
}

impl<'a, T> DoubleEndedIterator for RedBlackSetIter<'a, T>
where
    T: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back()
    }
}

impl<T> Default for RedBlackSet<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for RedBlackSet<T>
where
    T: Clone + Ord,
{
    fn clone(&self) -> Self {
        RedBlackSet {
            tree: self.tree.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.tree.clone_from(&source.tree);
    }
}

impl<T> FromIterator<T> for RedBlackSet<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = RedBlackSet::new();
        set.extend(iter);
        set
    }
}

impl<T> Extend<T> for RedBlackSet<T>
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

impl<T> PartialEq for RedBlackSet<T>
where
    T: Ord,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for RedBlackSet<T> where T: Ord {}

impl<T> fmt::Debug for RedBlackSet<T>
where
    T: fmt::Debug + Ord,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::RedBlackSet;
    use crate::red_black_tree::Error;

    #[test]
    fn test_len_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert!(set.is_empty());
        assert_eq!(set.begin(), set.end());
        assert_eq!(set.rbegin(), set.rend());
    }

    #[test]
    fn test_min_max_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert_eq!(set.min(), None);
        assert_eq!(set.max(), None);
    }

    #[test]
    fn test_insert() {
        let mut set = RedBlackSet::new();
        let (cursor, inserted) = set.insert(1);
        assert!(inserted);
        assert!(set.contains(&1));
        assert_eq!(set.value_at(cursor), Some(&1));
    }

    #[test]
    fn test_insert_duplicate() {
        let mut set = RedBlackSet::new();
        let (cursor, _) = set.insert(1);
        assert_eq!(set.insert(1), (cursor, false));
        assert_eq!(set.len(), 1);
        assert_eq!(set.count(&1), 1);
    }

    #[test]
    fn test_remove() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        assert_eq!(set.remove(&1), Some(1));
        assert!(!set.contains(&1));
    }

    #[test]
    fn test_erase() {
        let mut set = RedBlackSet::new();
        let (one, _) = set.insert(1);
        let (two, _) = set.insert(2);
        let (three, _) = set.insert(3);

        assert_eq!(set.erase(two), Ok(2));
        assert_eq!(set.erase(two), Err(Error::InvalidCursor));
        assert_eq!(set.erase(set.end()), Err(Error::InvalidCursor));
        assert_eq!(set.value_at(one), Some(&1));
        assert_eq!(set.value_at(three), Some(&3));
        assert_eq!(set.next(one), three);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_erase_foreign_cursor() {
        let mut set = RedBlackSet::new();
        let mut other = RedBlackSet::new();
        set.insert(20);
        let (cursor, _) = other.insert(10);

        assert_eq!(set.value_at(cursor), None);
        assert_eq!(set.erase(cursor), Err(Error::InvalidCursor));
        assert_eq!(set.next(cursor), set.end());
        assert_eq!(set.range_iter(cursor, set.end()).count(), 0);
        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&20]);
        assert_eq!(other.erase(cursor), Ok(10));
    }

    #[test]
    fn test_erase_stale_cursor() {
        let mut set = RedBlackSet::new();
        let (one, _) = set.insert(1);
        set.insert(2);
        assert_eq!(set.erase(one), Ok(1));
        let (five, _) = set.insert(5);

        assert_ne!(one, five);
        assert_eq!(set.value_at(one), None);
        assert_eq!(set.erase(one), Err(Error::InvalidCursor));
        assert_eq!(set.next(one), set.end());
        assert_eq!(set.prev(one), set.end());
        assert_eq!(set.range_iter(one, set.end()).count(), 0);
        assert_eq!(set.value_at(five), Some(&5));
        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&2, &5]);
    }

    #[test]
    fn test_clear_invalidates_cursors() {
        let mut set: RedBlackSet<u32> = vec![1, 2].into_iter().collect();
        let cursor = set.find(&1);
        set.clear();
        set.insert(1);
        assert_eq!(set.value_at(cursor), None);
        assert_eq!(set.erase(cursor), Err(Error::InvalidCursor));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_min_max() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(3);
        set.insert(5);

        assert_eq!(set.min(), Some(&1));
        assert_eq!(set.max(), Some(&5));
    }

    #[test]
    fn test_bounds() {
        let set: RedBlackSet<u32> = vec![1, 3, 5].into_iter().collect();

        assert_eq!(set.value_at(set.lower_bound(&0)), Some(&1));
        assert_eq!(set.value_at(set.lower_bound(&2)), Some(&3));
        assert_eq!(set.value_at(set.upper_bound(&3)), Some(&5));
        assert!(set.upper_bound(&5).is_end());

        let (lower, upper) = set.equal_range(&2);
        assert_eq!(lower, upper);
        assert_eq!(set.count(&2), 0);
    }

    #[test]
    fn test_reverse_cursor_walk() {
        let set: RedBlackSet<u32> = vec![2, 1, 3].into_iter().collect();
        let mut cursor = set.rbegin();
        let mut values = Vec::new();
        while cursor != set.rend() {
            values.push(*set.value_at(cursor).unwrap());
            cursor = set.prev(cursor);
        }
        assert_eq!(values, vec![3, 2, 1]);
        assert_eq!(set.prev(set.end()), set.end());
    }

    #[test]
    fn test_clone() {
        let mut set: RedBlackSet<u32> = (0..10).collect();
        let copy = set.clone();
        set.remove(&0);
        assert_eq!(copy.len(), 10);
        assert_eq!(set.len(), 9);

        let mut target = RedBlackSet::new();
        target.insert(100);
        target.clone_from(&copy);
        assert_eq!(target, copy);
    }

    #[test]
    fn test_swap() {
        let mut a: RedBlackSet<u32> = vec![1].into_iter().collect();
        let mut b: RedBlackSet<u32> = vec![2, 3].into_iter().collect();
        let cursor = b.find(&2);
        a.swap(&mut b);
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 1);
        assert_eq!(a.value_at(cursor), Some(&2));
    }

    #[test]
    fn test_into_iter() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.into_iter().rev().collect::<Vec<u32>>(), vec![5, 3, 1]);
    }

    #[test]
    fn test_iter() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
        assert_eq!(format!("{:?}", set), "{1, 3, 5}");
    }
}
