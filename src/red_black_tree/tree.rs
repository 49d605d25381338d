use crate::arena::Handle;
use crate::red_black_tree::iter::{self, Cursor, IntoIter, Iter};
use crate::red_black_tree::node::{self, Color, Node, NodeArena};
use crate::red_black_tree::policy::KeyPolicy;
use log::{debug, trace};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

/// The number of nodes allocated at once when a tree runs out of room.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// The red black tree engine shared by every container in this module.
///
/// Nodes live in an arena and refer to each other through handles: `left` and `right` own their
/// subtrees, `parent` is a plain back-reference. Ordering and the duplicate policy come from `P`.
pub struct Tree<P>
where
    P: KeyPolicy,
{
    nodes: NodeArena<P::Value>,
    root: Option<Handle>,
    len: usize,
}

impl<P> Tree<P>
where
    P: KeyPolicy,
{
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Tree {
            nodes: NodeArena::new(chunk_size),
            root: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn max_size(&self) -> usize {
        isize::max_value() as usize / mem::size_of::<Node<P::Value>>().max(1)
    }

    pub fn value(&self, node: Handle) -> Option<&P::Value> {
        self.nodes.get(&node).map(|node| &node.value)
    }

    // callers must not change the key of the value
    pub fn value_mut(&mut self, node: Handle) -> Option<&mut P::Value> {
        self.nodes.get_mut(&node).map(|node| &mut node.value)
    }

    fn key(&self, node: Handle) -> &P::Key {
        P::key(&self.nodes[node].value)
    }

    fn compare<V>(&self, key: &V, node: Handle) -> Ordering
    where
        P::Key: Borrow<V>,
        V: Ord + ?Sized,
    {
        key.cmp(self.key(node).borrow())
    }

    fn rotate_left(&mut self, node: Handle) {
        let child = self.nodes[node]
            .right
            .expect("Expected right child node to be `Some`.");
        let parent = self.nodes[node].parent;
        node::replace_child(&mut self.nodes, parent, node, Some(child));
        self.nodes[child].parent = parent;

        let grandchild = self.nodes[child].left;
        node::set_right(&mut self.nodes, node, grandchild);
        node::set_left(&mut self.nodes, child, Some(node));

        if parent.is_none() {
            self.root = Some(child);
            self.nodes[child].color = Color::Black;
        }
    }

    fn rotate_right(&mut self, node: Handle) {
        let child = self.nodes[node]
            .left
            .expect("Expected left child node to be `Some`.");
        let parent = self.nodes[node].parent;
        node::replace_child(&mut self.nodes, parent, node, Some(child));
        self.nodes[child].parent = parent;

        let grandchild = self.nodes[child].right;
        node::set_left(&mut self.nodes, node, grandchild);
        node::set_right(&mut self.nodes, child, Some(node));

        if parent.is_none() {
            self.root = Some(child);
            self.nodes[child].color = Color::Black;
        }
    }

    /// Links a detached node into the tree and rebalances. In unique mode an equal key aborts the
    /// insertion without touching the tree and the existing node is returned as the error; the
    /// detached node is left to the caller.
    pub fn insert_node(&mut self, new_node: Handle) -> Result<(), Handle> {
        let mut curr = match self.root {
            Some(root) => root,
            None => {
                self.nodes[new_node].color = Color::Black;
                self.root = Some(new_node);
                self.len = 1;
                return Ok(());
            },
        };

        loop {
            let ordering = self.key(new_node).cmp(self.key(curr));
            let next = match ordering {
                Ordering::Less => self.nodes[curr].left,
                Ordering::Equal if !P::MULTI => return Err(curr),
                _ => self.nodes[curr].right,
            };

            match next {
                Some(next) => curr = next,
                None => {
                    if ordering == Ordering::Less {
                        node::set_left(&mut self.nodes, curr, Some(new_node));
                    } else {
                        node::set_right(&mut self.nodes, curr, Some(new_node));
                    }
                    break;
                },
            }
        }

        self.len += 1;
        self.insert_fixup(new_node);
        Ok(())
    }

    fn insert_fixup(&mut self, mut node: Handle) {
        loop {
            let parent = match self.nodes[node].parent {
                Some(parent) if self.nodes[parent].color == Color::Red => parent,
                _ => break,
            };
            let grandparent = node::grandparent(&self.nodes, node)
                .expect("Expected a red node to have a parent.");

            let uncle = node::uncle(&self.nodes, node)
                .filter(|&uncle| self.nodes[uncle].color == Color::Red);
            if let Some(uncle) = uncle {
                trace!("insert fixup: recoloring red uncle");
                self.nodes[parent].color = Color::Black;
                self.nodes[uncle].color = Color::Black;
                if !self.nodes[grandparent].is_root() {
                    self.nodes[grandparent].color = Color::Red;
                }
                node = grandparent;
                continue;
            }

            let parent_is_left = node::is_left_child(&self.nodes, parent);
            let node_is_left = node::is_left_child(&self.nodes, node);
            if parent_is_left && !node_is_left {
                trace!("insert fixup: straightening left-right zig-zag");
                self.rotate_left(parent);
                node = parent;
            } else if !parent_is_left && node_is_left {
                trace!("insert fixup: straightening right-left zig-zag");
                self.rotate_right(parent);
                node = parent;
            }

            trace!("insert fixup: rotating straight line");
            let parent = self.nodes[node]
                .parent
                .expect("Expected a red node to have a parent.");
            self.nodes[parent].color = Color::Black;
            self.nodes[grandparent].color = Color::Red;
            if parent_is_left {
                self.rotate_right(grandparent);
            } else {
                self.rotate_left(grandparent);
            }
            break;
        }
    }

    /// Allocates a node for `value` and inserts it. Returns the handle of the new node, or in
    /// unique mode of the node already holding an equal key together with the rejected value.
    pub fn insert(&mut self, value: P::Value) -> (Handle, Option<P::Value>) {
        let new_node = self.nodes.allocate(Node::new(value));
        match self.insert_node(new_node) {
            Ok(()) => (new_node, None),
            Err(existing) => {
                let Node { value, .. } = self.nodes.free(&new_node);
                (existing, Some(value))
            },
        }
    }

    /// Removes `node` from the tree, rebalances, and returns it fully detached and reset. The
    /// node is still allocated and owned by the caller.
    pub fn take(&mut self, node: Handle) -> Handle {
        let replacement = match (self.nodes[node].left, self.nodes[node].right) {
            (Some(left), _) => Some(node::max(&self.nodes, left)),
            (None, Some(right)) => Some(node::min(&self.nodes, right)),
            (None, None) => None,
        };
        if let Some(replacement) = replacement {
            node::swap_positions(&mut self.nodes, replacement, node);
            if self.root == Some(node) {
                self.root = Some(replacement);
            }
        }

        let child = self.nodes[node].left.or(self.nodes[node].right);
        let is_black = self.nodes[node].color == Color::Black;
        match child {
            Some(child) => {
                let parent = self.nodes[node].parent;
                node::replace_child(&mut self.nodes, parent, node, Some(child));
                self.nodes[child].parent = parent;
                if parent.is_none() {
                    self.root = Some(child);
                }

                if is_black {
                    if self.nodes[child].color == Color::Red {
                        self.nodes[child].color = Color::Black;
                    } else {
                        self.delete_fixup(child);
                    }
                }
            },
            // the node itself stands in for the missing child while rebalancing
            None if is_black => self.delete_fixup(node),
            None => {},
        }

        if self.root == Some(node) {
            self.root = None;
        }
        node::reset(&mut self.nodes, node);
        debug_assert!(self.nodes[node].is_root() && self.nodes[node].is_leaf());
        if let Some(root) = self.root {
            self.nodes[root].color = Color::Black;
        }
        self.len -= 1;
        node
    }

    // `node` roots a subtree whose black-height is one less than its sibling's
    fn delete_fixup(&mut self, mut node: Handle) {
        while let Some(parent) = self.nodes[node].parent {
            let node_is_left = self.nodes[parent].left == Some(node);
            let mut sibling = node::sibling(&self.nodes, node)
                .expect("Expected a black-deficient node to have a sibling.");

            if self.nodes[sibling].color == Color::Red {
                trace!("delete fixup: rotating red sibling");
                self.nodes[parent].color = Color::Red;
                self.nodes[sibling].color = Color::Black;
                if node_is_left {
                    self.rotate_left(parent);
                } else {
                    self.rotate_right(parent);
                }
                sibling = node::sibling(&self.nodes, node)
                    .expect("Expected a black-deficient node to have a sibling.");
            }

            let (near, far) = if node_is_left {
                (self.nodes[sibling].left, self.nodes[sibling].right)
            } else {
                (self.nodes[sibling].right, self.nodes[sibling].left)
            };

            if node::is_black(&self.nodes, near) && node::is_black(&self.nodes, far) {
                self.nodes[sibling].color = Color::Red;
                if self.nodes[parent].color == Color::Black {
                    trace!("delete fixup: propagating deficiency upward");
                    node = parent;
                    continue;
                }
                trace!("delete fixup: absorbing deficiency in red parent");
                self.nodes[parent].color = Color::Black;
                break;
            }

            if node::is_black(&self.nodes, far) {
                trace!("delete fixup: rotating red near nephew outward");
                let near = near.expect("Expected near nephew node to be `Some`.");
                self.nodes[sibling].color = Color::Red;
                self.nodes[near].color = Color::Black;
                if node_is_left {
                    self.rotate_right(sibling);
                } else {
                    self.rotate_left(sibling);
                }
                sibling = near;
            }

            trace!("delete fixup: rotating red far nephew");
            let far = if node_is_left {
                self.nodes[sibling].right
            } else {
                self.nodes[sibling].left
            };
            let far = far.expect("Expected far nephew node to be `Some`.");
            self.nodes[sibling].color = self.nodes[parent].color;
            self.nodes[parent].color = Color::Black;
            self.nodes[far].color = Color::Black;
            if node_is_left {
                self.rotate_left(parent);
            } else {
                self.rotate_right(parent);
            }
            break;
        }
    }

    /// Removes `node` from the tree and deallocates it, returning its value.
    pub fn erase(&mut self, node: Handle) -> P::Value {
        let node = self.take(node);
        self.nodes.free(&node).value
    }

    pub fn search<V>(&self, key: &V) -> Option<Handle>
    where
        P::Key: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root;
        while let Some(node) = curr {
            curr = match self.compare(key, node) {
                Ordering::Less => self.nodes[node].left,
                Ordering::Greater => self.nodes[node].right,
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    pub fn remove<V>(&mut self, key: &V) -> Option<P::Value>
    where
        P::Key: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.search(key).map(|node| self.erase(node))
    }

    /// Returns `true` if `node` is a live node of this tree. Walks parent links up to the root.
    pub fn contains_node(&self, node: Handle) -> bool {
        if self.nodes.get(&node).is_none() {
            return false;
        }

        let mut curr = node;
        while let Some(parent) = self.nodes[curr].parent {
            curr = parent;
        }
        self.root == Some(curr)
    }

    fn is_live(&self, cursor: Cursor) -> bool {
        cursor.node.map_or(true, |node| self.nodes.get(&node).is_some())
    }

    /// Returns the node a cursor refers to if it is a live node of this tree.
    pub fn resolve(&self, cursor: Cursor) -> Option<Handle> {
        cursor.node.filter(|&node| self.contains_node(node))
    }

    /// Moves a cursor one step forward. The end cursor and stale cursors move to the end.
    pub fn advance(&self, cursor: Cursor) -> Cursor {
        match cursor.node {
            Some(node) if self.is_live(cursor) => Cursor::new(self.successor(node)),
            _ => Cursor::end(),
        }
    }

    /// Moves a cursor one step backward. The end cursor and stale cursors move to the end.
    pub fn retreat(&self, cursor: Cursor) -> Cursor {
        match cursor.node {
            Some(node) if self.is_live(cursor) => Cursor::new(self.predecessor(node)),
            _ => Cursor::end(),
        }
    }

    pub fn min(&self, node: Handle) -> Handle {
        node::min(&self.nodes, node)
    }

    pub fn max(&self, node: Handle) -> Handle {
        node::max(&self.nodes, node)
    }

    pub fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.min(root))
    }

    pub fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.max(root))
    }

    pub fn successor(&self, node: Handle) -> Option<Handle> {
        iter::successor(&self.nodes, node)
    }

    pub fn predecessor(&self, node: Handle) -> Option<Handle> {
        iter::predecessor(&self.nodes, node)
    }

    /// Returns the first node whose key is not less than `key`.
    pub fn lower_bound<V>(&self, key: &V) -> Option<Handle>
    where
        P::Key: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root;
        let mut ret = None;
        while let Some(node) = curr {
            if self.compare(key, node) == Ordering::Greater {
                curr = self.nodes[node].right;
            } else {
                ret = Some(node);
                curr = self.nodes[node].left;
            }
        }
        ret
    }

    /// Returns the first node whose key is greater than `key`.
    pub fn upper_bound<V>(&self, key: &V) -> Option<Handle>
    where
        P::Key: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root;
        let mut ret = None;
        while let Some(node) = curr {
            if self.compare(key, node) == Ordering::Less {
                ret = Some(node);
                curr = self.nodes[node].left;
            } else {
                curr = self.nodes[node].right;
            }
        }
        ret
    }

    /// Returns the half-open range of nodes whose keys equal `key`.
    ///
    /// The first descent finds the lower bound and remembers the first node greater than `key`
    /// on the way down. The upper bound is either that node or lies in its left subtree, so the
    /// second descent starts there instead of at the root.
    pub fn equal_range<V>(&self, key: &V) -> (Option<Handle>, Option<Handle>)
    where
        P::Key: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root;
        let mut lower = None;
        let mut upper = None;
        while let Some(node) = curr {
            let ordering = self.compare(key, node);
            if ordering == Ordering::Greater {
                curr = self.nodes[node].right;
            } else {
                if upper.is_none() && ordering == Ordering::Less {
                    upper = Some(node);
                }
                lower = Some(node);
                curr = self.nodes[node].left;
            }
        }

        curr = match upper {
            Some(node) => self.nodes[node].left,
            None => self.root,
        };
        while let Some(node) = curr {
            if self.compare(key, node) == Ordering::Less {
                upper = Some(node);
                curr = self.nodes[node].left;
            } else {
                curr = self.nodes[node].right;
            }
        }

        (lower, upper)
    }

    pub fn count<V>(&self, key: &V) -> usize
    where
        P::Key: Borrow<V>,
        V: Ord + ?Sized,
    {
        let (lower, upper) = self.equal_range(key);
        self.range(Cursor::new(lower), Cursor::new(upper)).count()
    }

    /// Moves every node of `other` into this tree. In unique mode a node whose key is already
    /// present stays in `other`, and cursors to it remain valid.
    pub fn merge(&mut self, other: &mut Tree<P>) {
        let mut moved = 0;
        let mut rejected = 0;
        let mut curr = other.first();
        while let Some(node) = curr {
            curr = other.successor(node);
            if !P::MULTI && self.search(other.key(node)).is_some() {
                rejected += 1;
                continue;
            }
            let value = other.erase(node);
            self.insert(value);
            moved += 1;
        }
        debug!("merged {} nodes, {} rejected as duplicates", moved, rejected);
    }

    pub fn swap(&mut self, other: &mut Tree<P>) {
        mem::swap(self, other);
    }

    /// Deallocates every node, children before parents.
    pub fn clear(&mut self) {
        let cleared = self.len;
        let mut stack: Vec<Handle> = self.root.take().into_iter().collect();
        while let Some(&node) = stack.last() {
            if let Some(left) = self.nodes[node].left.take() {
                stack.push(left);
            } else if let Some(right) = self.nodes[node].right.take() {
                stack.push(right);
            } else {
                stack.pop();
                self.nodes.free(&node);
            }
        }
        self.len = 0;
        if cleared > 0 {
            debug!("cleared {} nodes", cleared);
        }
    }

    pub fn pop_first(&mut self) -> Option<P::Value> {
        self.first().map(|node| self.erase(node))
    }

    pub fn pop_last(&mut self) -> Option<P::Value> {
        self.last().map(|node| self.erase(node))
    }

    pub fn iter(&self) -> Iter<'_, P::Value> {
        Iter::new(&self.nodes, self.first(), self.last())
    }

    /// Returns an iterator over the half-open range `[lower, upper)`. `upper` must not precede
    /// `lower`.
    pub fn range(&self, lower: Cursor, upper: Cursor) -> Iter<'_, P::Value> {
        if lower == upper || lower.is_end() || !self.is_live(lower) || !self.is_live(upper) {
            return Iter::new(&self.nodes, None, None);
        }
        let back = match upper.node {
            Some(node) => self.predecessor(node),
            None => self.last(),
        };
        Iter::new(&self.nodes, lower.node, back)
    }

    fn copy_node(&mut self, node: &Node<P::Value>) -> Handle
    where
        P::Value: Clone,
    {
        let mut copy = Node::new(node.value.clone());
        copy.color = node.color;
        self.nodes.allocate(copy)
    }

    // precondition: the tree is empty
    fn copy_from(&mut self, other: &Tree<P>)
    where
        P::Value: Clone,
    {
        let root = match other.root {
            Some(root) => root,
            None => return,
        };

        let new_root = self.copy_node(&other.nodes[root]);
        self.root = Some(new_root);
        let mut stack = vec![(root, new_root)];
        while let Some((from, to)) = stack.pop() {
            if let Some(left) = other.nodes[from].left {
                let copy = self.copy_node(&other.nodes[left]);
                node::set_left(&mut self.nodes, to, Some(copy));
                stack.push((left, copy));
            }
            if let Some(right) = other.nodes[from].right {
                let copy = self.copy_node(&other.nodes[right]);
                node::set_right(&mut self.nodes, to, Some(copy));
                stack.push((right, copy));
            }
        }
        self.len = other.len;
        debug!("copied {} nodes", self.len);
    }
}

impl<P> Clone for Tree<P>
where
    P: KeyPolicy,
    P::Value: Clone,
{
    fn clone(&self) -> Self {
        let mut tree = Tree::with_chunk_size(self.nodes.chunk_size());
        tree.copy_from(self);
        tree
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.copy_from(source);
    }
}

impl<P> Default for Tree<P>
where
    P: KeyPolicy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P> IntoIterator for Tree<P>
where
    P: KeyPolicy,
{
    type IntoIter = IntoIter<P>;
    type Item = P::Value;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}
