//! Self-balancing binary search tree that uses a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions.
//!
//! Every container in this module is a thin adapter over one tree engine. The engine stores its
//! nodes in an arena, keeps parent links for cursor navigation, and is specialized at compile
//! time with a key projection and a duplicate-key policy.

mod iter;
mod map;
mod multiset;
mod node;
mod policy;
mod serialize;
mod set;
mod tree;

pub use self::iter::Cursor;
pub use self::map::{RedBlackMap, RedBlackMapIntoIter, RedBlackMapIter};
pub use self::multiset::{RedBlackMultiset, RedBlackMultisetIntoIter, RedBlackMultisetIter};
pub use self::set::{RedBlackSet, RedBlackSetIntoIter, RedBlackSetIter};
pub use self::tree::DEFAULT_CHUNK_SIZE;

use std::error;
use std::fmt;
use std::result;

/// Errors returned by the fallible operations of the red black tree containers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// A strict lookup was given a key that is not in the container.
    KeyNotFound,
    /// A cursor was the past-the-end position or did not refer to an element of the container.
    InvalidCursor,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::KeyNotFound => write!(f, "key does not exist"),
            Error::InvalidCursor => write!(f, "cursor does not refer to an element"),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
