use crate::red_black_tree::{RedBlackMap, RedBlackMultiset, RedBlackSet};
use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;
use std::marker::PhantomData;

impl<T, U> Serialize for RedBlackMap<T, U>
where
    T: Ord + Serialize,
    U: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, T, U> Deserialize<'de> for RedBlackMap<T, U>
where
    T: Ord + Deserialize<'de>,
    U: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<RedBlackMap<T, U>, D::Error> {
        deserializer.deserialize_map(RedBlackMapVisitor {
            phantom: PhantomData,
        })
    }
}

struct RedBlackMapVisitor<T, U> {
    phantom: PhantomData<(T, U)>,
}

impl<'de, T, U> Visitor<'de> for RedBlackMapVisitor<T, U>
where
    T: Ord + Deserialize<'de>,
    U: Deserialize<'de>,
{
    type Value = RedBlackMap<T, U>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    // a repeated key keeps its first value
    fn visit_map<A>(self, mut access: A) -> Result<RedBlackMap<T, U>, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = RedBlackMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

// Sets and multisets share the sequence encoding; only the insertion policy differs.
macro_rules! impl_seq_serde {
    ($collection:ident, $visitor:ident, $expecting:expr) => {
        impl<T> Serialize for $collection<T>
        where
            T: Ord + Serialize,
        {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut seq = serializer.serialize_seq(Some(self.len()))?;
                for key in self {
                    seq.serialize_element(key)?;
                }
                seq.end()
            }
        }

        impl<'de, T> Deserialize<'de> for $collection<T>
        where
            T: Ord + Deserialize<'de>,
        {
            fn deserialize<D: Deserializer<'de>>(
                deserializer: D,
            ) -> Result<$collection<T>, D::Error> {
                deserializer.deserialize_seq($visitor {
                    phantom: PhantomData,
                })
            }
        }

        struct $visitor<T> {
            phantom: PhantomData<T>,
        }

        impl<'de, T> Visitor<'de> for $visitor<T>
        where
            T: Ord + Deserialize<'de>,
        {
            type Value = $collection<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str($expecting)
            }

            fn visit_seq<A>(self, mut access: A) -> Result<$collection<T>, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut collection = $collection::new();
                while let Some(key) = access.next_element()? {
                    collection.insert(key);
                }
                Ok(collection)
            }
        }
    };
}

impl_seq_serde!(RedBlackSet, RedBlackSetVisitor, "a set");
impl_seq_serde!(RedBlackMultiset, RedBlackMultisetVisitor, "a multiset");
