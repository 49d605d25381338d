use crate::entry::Entry;
use crate::red_black_tree::iter::{Cursor, IntoIter, Iter};
use crate::red_black_tree::policy::MapPolicy;
use crate::red_black_tree::tree::Tree;
use crate::red_black_tree::{Error, Result};
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;
use std::ops::{Index, IndexMut};

/// An ordered map implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree that colors each node red or black so
/// that the height of the tree stays logarithmic in its size. Each key appears at most once.
///
/// # Examples
///
/// ```
/// use rb_collections::red_black_tree::RedBlackMap;
///
/// let mut map = RedBlackMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min(), Some(&0));
/// assert_eq!(map.entry_at(map.lower_bound(&2)), Some((&3, &4)));
///
/// map[&0] = 2;
/// assert_eq!(map.remove(&0), Some((0, 2)));
/// assert_eq!(map.remove(&1), None);
/// ```
pub struct RedBlackMap<T, U>
where
    T: Ord,
{
    tree: Tree<MapPolicy<T, U>>,
}

impl<T, U> RedBlackMap<T, U>
where
    T: Ord,
{
    /// Constructs a new, empty `RedBlackMap<T, U>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::new();
    /// ```
    pub fn new() -> Self {
        RedBlackMap { tree: Tree::new() }
    }

    /// Constructs a new, empty `RedBlackMap<T, U>` whose nodes are allocated `chunk_size` at a
    /// time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        RedBlackMap {
            tree: Tree::with_chunk_size(chunk_size),
        }
    }

    /// Inserts a key-value pair into the map. Returns a cursor to the entry with the key and
    /// `true` if the pair was inserted. If the key already exists, the existing entry is left
    /// untouched and the given pair is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// let (cursor, inserted) = map.insert(1, 1);
    /// assert!(inserted);
    /// assert_eq!(map.insert(1, 2), (cursor, false));
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> (Cursor, bool) {
        let (node, rejected) = self.tree.insert(Entry::new(key, value));
        (Cursor::new(Some(node)), rejected.is_none())
    }

    /// Inserts a key-value pair into the map. If the key already exists, its value is overwritten
    /// in place and `false` is returned alongside the cursor.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// let (cursor, _) = map.insert(1, 1);
    /// assert_eq!(map.insert_or_assign(1, 2), (cursor, false));
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert_or_assign(&mut self, key: T, value: U) -> (Cursor, bool) {
        let (node, rejected) = self.tree.insert(Entry::new(key, value));
        let inserted = match rejected {
            Some(entry) => {
                if let Some(existing) = self.tree.value_mut(node) {
                    existing.value = entry.value;
                }
                false
            },
            None => true,
        };
        (Cursor::new(Some(node)), inserted)
    }

    /// Inserts every key-value pair of `iter` and returns the result of each insertion in order.
    pub fn insert_many<I>(&mut self, iter: I) -> Vec<(Cursor, bool)>
    where
        I: IntoIterator<Item = (T, U)>,
    {
        iter.into_iter()
            .map(|(key, value)| self.insert(key, value))
            .collect()
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated key-value pair. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<(T, U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.remove(key).map(Entry::into_pair)
    }

    /// Removes the entry a cursor refers to and returns it. Returns `Error::InvalidCursor` if the
    /// cursor is the end position or does not refer to an entry of this map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::{Error, RedBlackMap};
    ///
    /// let mut map = RedBlackMap::new();
    /// let (cursor, _) = map.insert(1, 2);
    /// assert_eq!(map.erase(cursor), Ok((1, 2)));
    /// assert_eq!(map.erase(map.end()), Err(Error::InvalidCursor));
    /// ```
    pub fn erase(&mut self, cursor: Cursor) -> Result<(T, U)> {
        let node = self.tree.resolve(cursor).ok_or(Error::InvalidCursor)?;
        Ok(self.tree.erase(node).into_pair())
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.search(key).is_some()
    }

    /// Returns a cursor to the entry with a key, or the end cursor if the key does not exist.
    pub fn find<V>(&self, key: &V) -> Cursor
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        Cursor::new(self.tree.search(key))
    }

    /// Returns the number of entries with a key, which is either zero or one.
    pub fn count<V>(&self, key: &V) -> usize
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.count(key)
    }

    /// Returns an immutable reference to the value associated with a particular key. It will
    /// return `None` if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get<V>(&self, key: &V) -> Option<&U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let node = self.tree.search(key)?;
        self.tree.value(node).map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut<V>(&mut self, key: &V) -> Option<&mut U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let node = self.tree.search(key)?;
        self.tree.value_mut(node).map(|entry| &mut entry.value)
    }

    /// Returns an immutable reference to the value associated with a key, or
    /// `Error::KeyNotFound` if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::{Error, RedBlackMap};
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.at(&1), Ok(&1));
    /// assert_eq!(map.at(&2), Err(Error::KeyNotFound));
    /// ```
    pub fn at<V>(&self, key: &V) -> Result<&U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value associated with a key, or
    /// `Error::KeyNotFound` if the key does not exist.
    pub fn at_mut<V>(&mut self, key: &V) -> Result<&mut U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value associated with a key, inserting the default
    /// value first if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map: RedBlackMap<&str, u32> = RedBlackMap::new();
    /// *map.get_or_insert_default("a") += 1;
    /// *map.get_or_insert_default("a") += 1;
    /// assert_eq!(map.get("a"), Some(&2));
    /// ```
    pub fn get_or_insert_default(&mut self, key: T) -> &mut U
    where
        U: Default,
    {
        let node = match self.tree.search(&key) {
            Some(node) => node,
            None => self.tree.insert(Entry::new(key, U::default())).0,
        };
        let entry = self
            .tree
            .value_mut(node)
            .expect("Expected node to be allocated.");
        &mut entry.value
    }

    /// Returns the key and value a cursor refers to, or `None` for the end cursor and for
    /// cursors that do not refer to an entry of this map.
    pub fn entry_at(&self, cursor: Cursor) -> Option<(&T, &U)> {
        self.tree
            .resolve(cursor)
            .and_then(|node| self.tree.value(node))
            .map(|entry| (&entry.key, &entry.value))
    }

    /// Returns a mutable reference to the value a cursor refers to, or `None` for the end
    /// cursor and for cursors that do not refer to an entry of this map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map: RedBlackMap<u32, u32> = vec![(1, 1), (2, 2)].into_iter().collect();
    /// let mut cursor = map.begin();
    /// while !cursor.is_end() {
    ///     *map.value_at_mut(cursor).unwrap() *= 10;
    ///     cursor = map.next(cursor);
    /// }
    /// assert_eq!(map.values().collect::<Vec<&u32>>(), vec![&10, &20]);
    /// ```
    pub fn value_at_mut(&mut self, cursor: Cursor) -> Option<&mut U> {
        let node = self.tree.resolve(cursor)?;
        self.tree.value_mut(node).map(|entry| &mut entry.value)
    }

    /// Returns a cursor to the first entry whose key is not less than `key`.
    pub fn lower_bound<V>(&self, key: &V) -> Cursor
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        Cursor::new(self.tree.lower_bound(key))
    }

    /// Returns a cursor to the first entry whose key is greater than `key`.
    pub fn upper_bound<V>(&self, key: &V) -> Cursor
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        Cursor::new(self.tree.upper_bound(key))
    }

    /// Returns the half-open cursor range of entries whose key equals `key`.
    pub fn equal_range<V>(&self, key: &V) -> (Cursor, Cursor)
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let (lower, upper) = self.tree.equal_range(key);
        (Cursor::new(lower), Cursor::new(upper))
    }

    /// Returns a cursor to the entry with the minimum key, or the end cursor if the map is empty.
    pub fn begin(&self) -> Cursor {
        Cursor::new(self.tree.first())
    }

    /// Returns the past-the-end cursor.
    pub fn end(&self) -> Cursor {
        Cursor::end()
    }

    /// Returns a cursor to the entry with the maximum key.
    pub fn rbegin(&self) -> Cursor {
        Cursor::new(self.tree.last())
    }

    /// Returns the end cursor of a descending traversal.
    pub fn rend(&self) -> Cursor {
        Cursor::end()
    }

    /// Returns the cursor after `cursor` in ascending key order.
    pub fn next(&self, cursor: Cursor) -> Cursor {
        self.tree.advance(cursor)
    }

    /// Returns the cursor before `cursor` in ascending key order.
    pub fn prev(&self, cursor: Cursor) -> Cursor {
        self.tree.retreat(cursor)
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the largest number of elements the map could theoretically hold.
    pub fn max_size(&self) -> usize {
        self.tree.max_size()
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Exchanges the contents of two maps. Cursors follow their entries into the other map.
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    /// Moves every entry of `other` whose key is not in this map into this map. Entries whose
    /// keys collide stay in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut a: RedBlackMap<u32, &str> = vec![(1, "a"), (2, "a")].into_iter().collect();
    /// let mut b: RedBlackMap<u32, &str> = vec![(2, "b")].into_iter().collect();
    /// b.merge(&mut a);
    /// assert_eq!(b.get(&1), Some(&"a"));
    /// assert_eq!(b.get(&2), Some(&"b"));
    /// assert_eq!(a.get(&2), Some(&"a"));
    /// ```
    pub fn merge(&mut self, other: &mut Self) {
        self.tree.merge(&mut other.tree);
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty.
    pub fn min(&self) -> Option<&T> {
        self.tree
            .first()
            .and_then(|node| self.tree.value(node))
            .map(|entry| &entry.key)
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty.
    pub fn max(&self) -> Option<&T> {
        self.tree
            .last()
            .and_then(|node| self.tree.value(node))
            .map(|entry| &entry.key)
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal; reverse it for descending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackMapIter<'_, T, U> {
        RedBlackMapIter {
            iter: self.tree.iter(),
        }
    }

    /// Returns an iterator over the half-open cursor range `[lower, upper)`.
    pub fn range_iter(&self, lower: Cursor, upper: Cursor) -> RedBlackMapIter<'_, T, U> {
        RedBlackMapIter {
            iter: self.tree.range(lower, upper),
        }
    }

    /// Returns an iterator over the keys of the map in ascending order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values of the map in ascending key order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &U> {
        self.iter().map(|(_, value)| value)
    }
}

impl<T, U> IntoIterator for RedBlackMap<T, U>
where
    T: Ord,
{
    type IntoIter = RedBlackMapIntoIter<T, U>;
    type Item = (T, U);

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            iter: self.tree.into_iter(),
        }
    }
}

impl<'a, T, U> IntoIterator for &'a RedBlackMap<T, U>
where
    T: 'a + Ord,
    U: 'a,
{
    type IntoIter = RedBlackMapIter<'a, T, U>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `RedBlackMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields owned entries.
pub struct RedBlackMapIntoIter<T, U>
where
    T: Ord,
{
    iter: IntoIter<MapPolicy<T, U>>,
}

impl<T, U> Iterator for RedBlackMapIntoIter<T, U>
where
    T: Ord,
{
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(Entry::into_pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T, U> DoubleEndedIterator for RedBlackMapIntoIter<T, U>
where
    T: Ord,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(Entry::into_pair)
    }
}

/// An iterator for `RedBlackMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields immutable references.
pub struct RedBlackMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    iter: Iter<'a, Entry<T, U>>,
}

impl<'a, T, U> Iterator for RedBlackMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|entry| (&entry.key, &entry.value))
    }
}

impl<'a, T, U> DoubleEndedIterator for RedBlackMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|entry| (&entry.key, &entry.value))
    }
}

impl<T, U> Default for RedBlackMap<T, U>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, U> Clone for RedBlackMap<T, U>
where
    T: Clone + Ord,
    U: Clone,
{
    fn clone(&self) -> Self {
        RedBlackMap {
            tree: self.tree.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.tree.clone_from(&source.tree);
    }
}

impl<T, U> FromIterator<(T, U)> for RedBlackMap<T, U>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (T, U)>,
    {
        let mut map = RedBlackMap::new();
        map.extend(iter);
        map
    }
}

impl<T, U> Extend<(T, U)> for RedBlackMap<T, U>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (T, U)>,
    {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<T, U> PartialEq for RedBlackMap<T, U>
where
    T: Ord,
    U: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, U> Eq for RedBlackMap<T, U>
where
    T: Ord,
    U: Eq,
{
}

impl<T, U> fmt::Debug for RedBlackMap<T, U>
where
    T: fmt::Debug + Ord,
    U: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, T, U, V> Index<&'a V> for RedBlackMap<T, U>
where
    T: Borrow<V> + Ord,
    V: Ord + ?Sized,
{
    type Output = U;

    fn index(&self, key: &V) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, T, U, V> IndexMut<&'a V> for RedBlackMap<T, U>
where
    T: Borrow<V> + Ord,
    V: Ord + ?Sized,
{
    fn index_mut(&mut self, key: &V) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}

#[cfg(test)]
mod tests {
    use super::RedBlackMap;
    use crate::red_black_tree::Error;

    #[test]
    fn test_len_empty() {
        let map: RedBlackMap<u32, u32> = RedBlackMap::new();
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let map: RedBlackMap<u32, u32> = RedBlackMap::new();
        assert!(map.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let map: RedBlackMap<u32, u32> = RedBlackMap::new();
        assert_eq!(map.min(), None);
        assert_eq!(map.max(), None);
    }

    #[test]
    fn test_insert() {
        let mut map = RedBlackMap::new();
        let (cursor, inserted) = map.insert(1, 1);
        assert!(inserted);
        assert!(map.contains_key(&1));
        assert_eq!(map.get(&1), Some(&1));
        assert_eq!(map.entry_at(cursor), Some((&1, &1)));
    }

    #[test]
    fn test_insert_keeps_existing() {
        let mut map = RedBlackMap::new();
        let (cursor, _) = map.insert(1, 1);
        assert_eq!(map.insert(1, 3), (cursor, false));
        assert_eq!(map.get(&1), Some(&1));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_insert_or_assign() {
        let mut map = RedBlackMap::new();
        assert!(map.insert_or_assign(1, 1).1);
        let (cursor, inserted) = map.insert_or_assign(1, 3);
        assert!(!inserted);
        assert_eq!(map.entry_at(cursor), Some((&1, &3)));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_insert_many() {
        let mut map = RedBlackMap::new();
        let results = map.insert_many(vec![(1, 'a'), (2, 'b'), (1, 'c')]);
        assert_eq!(
            results.iter().map(|pair| pair.1).collect::<Vec<bool>>(),
            vec![true, true, false],
        );
        assert_eq!(results[0].0, results[2].0);
        assert_eq!(map.get(&1), Some(&'a'));
    }

    #[test]
    fn test_remove() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        assert_eq!(map.remove(&1), Some((1, 1)));
        assert!(!map.contains_key(&1));
    }

    #[test]
    fn test_erase() {
        let mut map = RedBlackMap::new();
        let (cursor, _) = map.insert(1, 1);
        map.insert(2, 2);
        assert_eq!(map.erase(cursor), Ok((1, 1)));
        assert_eq!(map.erase(cursor), Err(Error::InvalidCursor));
        assert_eq!(map.erase(map.end()), Err(Error::InvalidCursor));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_erase_stale_cursor() {
        let mut map = RedBlackMap::new();
        let (one, _) = map.insert(1, 1);
        map.insert(2, 2);
        assert_eq!(map.erase(one), Ok((1, 1)));
        map.insert(5, 5);

        assert_eq!(map.entry_at(one), None);
        assert_eq!(map.value_at_mut(one), None);
        assert_eq!(map.erase(one), Err(Error::InvalidCursor));
        assert_eq!(map.iter().collect::<Vec<(&u32, &u32)>>(), vec![(&2, &2), (&5, &5)]);
    }

    #[test]
    fn test_erase_foreign_cursor() {
        let mut map = RedBlackMap::new();
        let mut other = RedBlackMap::new();
        map.insert(20, 2);
        let (cursor, _) = other.insert(10, 1);

        assert_eq!(map.entry_at(cursor), None);
        assert_eq!(map.value_at_mut(cursor), None);
        assert_eq!(map.erase(cursor), Err(Error::InvalidCursor));
        assert_eq!(map.get(&20), Some(&2));
        assert_eq!(other.entry_at(cursor), Some((&10, &1)));
    }

    #[test]
    fn test_at() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        assert_eq!(map.at(&1), Ok(&1));
        assert_eq!(map.at(&0), Err(Error::KeyNotFound));

        *map.at_mut(&1).unwrap() = 2;
        assert_eq!(map.at(&1), Ok(&2));
        assert!(map.at_mut(&0).is_err());
    }

    #[test]
    fn test_get_or_insert_default() {
        let mut map: RedBlackMap<u32, Vec<u32>> = RedBlackMap::new();
        map.get_or_insert_default(1).push(1);
        map.get_or_insert_default(1).push(2);
        assert_eq!(map.get(&1), Some(&vec![1, 2]));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_min_max() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        map.insert(3, 3);
        map.insert(5, 5);

        assert_eq!(map.min(), Some(&1));
        assert_eq!(map.max(), Some(&5));
    }

    #[test]
    fn test_get_mut() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        {
            let value = map.get_mut(&1);
            *value.unwrap() = 3;
        }
        assert_eq!(map.get(&1), Some(&3));
    }

    #[test]
    fn test_bounds() {
        let map: RedBlackMap<u32, u32> = vec![(1, 1), (3, 3), (5, 5)].into_iter().collect();
        assert_eq!(map.entry_at(map.lower_bound(&3)), Some((&3, &3)));
        assert_eq!(map.entry_at(map.upper_bound(&3)), Some((&5, &5)));
        assert_eq!(map.entry_at(map.upper_bound(&5)), None);

        let (lower, upper) = map.equal_range(&3);
        assert_eq!(map.range_iter(lower, upper).collect::<Vec<_>>(), vec![(&3, &3)]);
        assert_eq!(map.count(&3), 1);
        assert_eq!(map.count(&4), 0);
    }

    #[test]
    fn test_cursor_walk() {
        let map: RedBlackMap<u32, u32> = vec![(2, 2), (1, 1), (3, 3)].into_iter().collect();
        let mut keys = Vec::new();
        let mut cursor = map.rbegin();
        while cursor != map.rend() {
            keys.push(*map.entry_at(cursor).unwrap().0);
            cursor = map.prev(cursor);
        }
        assert_eq!(keys, vec![3, 2, 1]);
        assert_eq!(map.next(map.find(&1)), map.find(&2));
    }

    #[test]
    fn test_into_iter() {
        let mut map = RedBlackMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        assert_eq!(
            map.into_iter().collect::<Vec<(u32, u32)>>(),
            vec![(1, 2), (3, 4), (5, 6)],
        );
    }

    #[test]
    fn test_iter() {
        let mut map = RedBlackMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        assert_eq!(
            map.iter().rev().collect::<Vec<(&u32, &u32)>>(),
            vec![(&5, &6), (&3, &4), (&1, &2)],
        );
        assert_eq!(map.keys().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
        assert_eq!(format!("{:?}", map), "{1: 2, 3: 4, 5: 6}");
    }

    #[test]
    fn test_clone_and_swap() {
        let mut map: RedBlackMap<u32, u32> = (0..10).map(|key| (key, key)).collect();
        let copy = map.clone();
        assert_eq!(copy, map);

        let mut other = RedBlackMap::new();
        other.insert(100, 100);
        map.swap(&mut other);
        assert_eq!(map.len(), 1);
        assert_eq!(other, copy);
    }

    #[test]
    fn test_index() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        map[&1] = 2;
        assert_eq!(map[&1], 2);
    }

    #[test]
    #[should_panic]
    fn test_index_missing() {
        let map: RedBlackMap<u32, u32> = RedBlackMap::new();
        let _value = map[&1];
    }
}
