use crate::entry::Entry;
use std::marker::PhantomData;

/// Configures a `Tree` with a key projection and a duplicate-key policy.
///
/// Both are resolved at compile time, so a single tree engine serves maps, sets and multisets
/// without any dynamic dispatch on the comparison path.
pub trait KeyPolicy {
    /// The type stored in each node.
    type Value;

    /// The type the tree is ordered by.
    type Key: Ord;

    /// `true` if equal keys may coexist in the tree. Ties descend to the right, so a newly
    /// inserted duplicate is ordered after the existing ones.
    const MULTI: bool;

    /// Projects the ordering key out of a stored value.
    fn key(value: &Self::Value) -> &Self::Key;
}

/// Unique keys, each associated with a mapped value.
pub enum MapPolicy<K, V> {
    #[doc(hidden)]
    _Marker(PhantomData<fn() -> (K, V)>),
}

impl<K, V> KeyPolicy for MapPolicy<K, V>
where
    K: Ord,
{
    type Value = Entry<K, V>;
    type Key = K;
    const MULTI: bool = false;

    fn key(value: &Entry<K, V>) -> &K {
        &value.key
    }
}

/// Unique values that are their own keys.
pub enum SetPolicy<T> {
    #[doc(hidden)]
    _Marker(PhantomData<fn() -> T>),
}

impl<T> KeyPolicy for SetPolicy<T>
where
    T: Ord,
{
    type Value = T;
    type Key = T;
    const MULTI: bool = false;

    fn key(value: &T) -> &T {
        value
    }
}

/// Values that are their own keys, duplicates allowed.
pub enum MultisetPolicy<T> {
    #[doc(hidden)]
    _Marker(PhantomData<fn() -> T>),
}

impl<T> KeyPolicy for MultisetPolicy<T>
where
    T: Ord,
{
    type Value = T;
    type Key = T;
    const MULTI: bool = true;

    fn key(value: &T) -> &T {
        value
    }
}
