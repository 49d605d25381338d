//! Ordered associative containers backed by a red black tree.
//!
//! `RedBlackMap`, `RedBlackSet` and `RedBlackMultiset` share a single tree engine whose nodes are
//! allocated from a `TypedArena` and linked to their parents, so positions in a container can be
//! held as `Cursor`s and stepped in both directions without borrowing the container.

mod entry;
pub mod arena;
pub mod red_black_tree;
