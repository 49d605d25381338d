//! Fast, but limited allocator for tree nodes.

use std::mem;
use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::vec::Vec;

static NEXT_ARENA_ID: AtomicUsize = AtomicUsize::new(0);

/// A stable handle to an object allocated in a `TypedArena<T>`.
///
/// A handle stays valid until the object it refers to is freed. Each handle records the arena
/// that issued it and the generation of its slot, so a handle whose object was freed, or that was
/// issued by another arena, never refers to a live object even after its slot is reused.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    arena_id: usize,
    chunk_index: usize,
    block_index: usize,
    generation: usize,
}

enum Block<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

// `generation` is bumped every time the slot is freed
struct Slot<T> {
    generation: usize,
    block: Block<T>,
}

/// A fast, but limited allocator that only allocates a single type of object.
///
/// Objects are allocated one at a time and addressed by `Handle`s, which do not borrow the arena.
/// Deallocated slots are threaded onto a free list and reused by later allocations. The
/// underlying storage is a list of fixed-capacity `Vec` chunks, so growing the arena never moves
/// existing objects and never reallocates a chunk.
///
/// # Examples
///
/// ```
/// use rb_collections::arena::TypedArena;
///
/// let mut arena = TypedArena::new(1024);
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(&x), 2);
/// assert!(arena.get(&x).is_none());
///
/// // the slot is reused, but the old handle stays dead
/// let y = arena.allocate(3);
/// assert_ne!(x, y);
/// assert!(arena.get(&x).is_none());
/// ```
pub struct TypedArena<T> {
    id: usize,
    head: Option<Handle>,
    chunks: Vec<Vec<Slot<T>>>,
    chunk_size: usize,
    len: usize,
    capacity: usize,
}

impl<T> TypedArena<T> {
    fn is_valid_handle(&self, handle: &Handle) -> bool {
        handle.arena_id == self.id
            && handle.chunk_index < self.chunks.len()
            && handle.block_index < self.chunks[handle.chunk_index].len()
            && self.chunks[handle.chunk_index][handle.block_index].generation == handle.generation
    }

    /// Constructs a new, empty `TypedArena<T>` with a specific number of objects per chunk. No
    /// memory is allocated until the first object is.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// // creates a new TypedArena<T> that contains a maximum of 1024 u32's per chunk
    /// let arena: TypedArena<u32> = TypedArena::new(1024);
    /// ```
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "Error: chunk size must be positive.");
        TypedArena {
            id: NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed),
            head: None,
            chunks: Vec::new(),
            chunk_size,
            len: 0,
            capacity: 0,
        }
    }

    /// Returns the number of objects per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the number of live objects in the arena.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// arena.allocate(1);
    /// arena.free(&x);
    /// assert_eq!(arena.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocates an object in the typed arena and returns its handle. The handle can later be used
    /// to retrieve mutable and immutable references to the object, and to deallocate it.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// ```
    pub fn allocate(&mut self, value: T) -> Handle {
        if self.len == self.capacity {
            self.chunks.push(Vec::with_capacity(self.chunk_size));
            self.capacity += self.chunk_size;
        }
        self.len += 1;

        match self.head.take() {
            None => {
                let chunk_count = self.chunks.len();
                let last_chunk = &mut self.chunks[chunk_count - 1];
                last_chunk.push(Slot {
                    generation: 0,
                    block: Block::Occupied(value),
                });
                Handle {
                    arena_id: self.id,
                    chunk_index: chunk_count - 1,
                    block_index: last_chunk.len() - 1,
                    generation: 0,
                }
            },
            Some(handle) => {
                let slot = &mut self.chunks[handle.chunk_index][handle.block_index];
                let vacant_block = mem::replace(&mut slot.block, Block::Occupied(value));

                match vacant_block {
                    Block::Vacant(next_handle) => {
                        self.head = next_handle;
                        Handle {
                            generation: slot.generation,
                            ..handle
                        }
                    },
                    Block::Occupied(_) => panic!("Expected a vacant block."),
                }
            },
        }
    }

    /// Deallocates an object in the typed arena and returns the object.
    ///
    /// # Panics
    ///
    /// Panics if the handle corresponds to an invalid or vacant slot, or was issued by another
    /// arena.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(&x), 0);
    /// ```
    pub fn free(&mut self, handle: &Handle) -> T {
        if !self.is_valid_handle(handle) {
            panic!("Error: attempting to free invalid block.");
        }
        let head = self.head;
        let slot = &mut self.chunks[handle.chunk_index][handle.block_index];
        let old_block = mem::replace(&mut slot.block, Block::Vacant(head));
        match old_block {
            Block::Vacant(next_handle) => {
                slot.block = Block::Vacant(next_handle);
                panic!("Error: attempting to free vacant block.");
            },
            Block::Occupied(value) => {
                slot.generation = slot.generation.wrapping_add(1);
                self.len -= 1;
                self.head = Some(*handle);
                value
            },
        }
    }

    /// Returns an immutable reference to an object in the typed arena. Returns `None` if the
    /// handle does not correspond to a live object of this arena.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(&x), Some(&0));
    /// ```
    pub fn get(&self, handle: &Handle) -> Option<&T> {
        if !self.is_valid_handle(handle) {
            return None;
        }
        match self.chunks[handle.chunk_index][handle.block_index].block {
            Block::Occupied(ref value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Returns a mutable reference to an object in the typed arena. Returns `None` if the handle
    /// does not correspond to a live object of this arena.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get_mut(&x), Some(&mut 0));
    /// ```
    pub fn get_mut(&mut self, handle: &Handle) -> Option<&mut T> {
        if !self.is_valid_handle(handle) {
            return None;
        }
        match self.chunks[handle.chunk_index][handle.block_index].block {
            Block::Occupied(ref mut value) => Some(value),
            Block::Vacant(_) => None,
        }
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(&handle).expect("Error: handle out of bounds.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(&handle).expect("Error: handle out of bounds.")
    }
}

#[cfg(test)]
mod tests {
    use super::Handle;
    use super::TypedArena;

    #[test]
    #[should_panic]
    fn test_free_invalid_block() {
        let mut arena: TypedArena<u32> = TypedArena::new(1024);
        let handle = Handle {
            arena_id: arena.id,
            chunk_index: 0,
            block_index: 0,
            generation: 0,
        };
        arena.free(&handle);
    }

    #[test]
    #[should_panic]
    fn test_free_vacant_block() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(0);
        arena.free(&x);
        arena.free(&x);
    }

    #[test]
    #[should_panic]
    fn test_free_foreign_handle() {
        let mut arena = TypedArena::new(1024);
        let mut other = TypedArena::new(1024);
        arena.allocate(0);
        let x = other.allocate(1);
        arena.free(&x);
    }

    #[test]
    #[should_panic]
    fn test_zero_chunk_size() {
        let _: TypedArena<u32> = TypedArena::new(0);
    }

    #[test]
    fn test_allocate_multiple_chunks() {
        let mut arena = TypedArena::new(2);
        arena.allocate(0);
        arena.allocate(1);
        let x = arena.allocate(2);
        assert_eq!((x.chunk_index, x.block_index, x.generation), (1, 0, 0));
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_free_reuses_slots_last_in_first_out() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(0);
        let y = arena.allocate(1);
        assert_eq!(arena.free(&x), 0);
        assert_eq!(arena.free(&y), 1);
        assert!(arena.is_empty());

        let new_y = arena.allocate(2);
        let new_x = arena.allocate(3);
        assert_eq!((new_y.chunk_index, new_y.block_index), (y.chunk_index, y.block_index));
        assert_eq!((new_x.chunk_index, new_x.block_index), (x.chunk_index, x.block_index));
        assert_eq!(new_x.generation, x.generation + 1);
        assert_eq!(arena[new_x], 3);
        assert_eq!(arena[new_y], 2);
    }

    #[test]
    fn test_get_reused_slot() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(0);
        arena.free(&x);
        let y = arena.allocate(1);
        assert_ne!(x, y);
        assert_eq!(arena.get(&x), None);
        assert_eq!(arena.get_mut(&x), None);
        assert_eq!(arena.get(&y), Some(&1));
    }

    #[test]
    fn test_get_foreign_handle() {
        let mut arena = TypedArena::new(1024);
        let mut other = TypedArena::new(1024);
        let x = arena.allocate(0);
        let y = other.allocate(1);
        assert_eq!((x.chunk_index, x.block_index), (y.chunk_index, y.block_index));
        assert_eq!(arena.get(&y), None);
        assert_eq!(other.get_mut(&x), None);
    }

    #[test]
    fn test_get_vacant_block() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(0);
        arena.free(&x);
        assert_eq!(arena.get(&x), None);
        assert_eq!(arena.get_mut(&x), None);
    }

    #[test]
    fn test_get_invalid_block() {
        let arena: TypedArena<u32> = TypedArena::new(1024);
        let handle = Handle {
            arena_id: arena.id,
            chunk_index: 0,
            block_index: 0,
            generation: 0,
        };
        assert_eq!(arena.get(&handle), None);
    }

    #[test]
    fn test_get_mut() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(0);
        *arena.get_mut(&x).unwrap() = 1;
        assert_eq!(arena.get(&x), Some(&1));
    }
}
