use crate::arena::Handle;
use crate::red_black_tree::node::{self, NodeArena};
use crate::red_black_tree::policy::KeyPolicy;
use crate::red_black_tree::tree::Tree;

/// A position in an ordered container: either a node or the end of the sequence.
///
/// A cursor does not borrow its container. It is moved with the container's `next` and `prev`
/// methods and dereferenced with the container's `*_at` accessors. Two cursors are equal if they
/// refer to the same node. Erasing the node a cursor refers to invalidates that cursor only;
/// cursors to every other node remain valid.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Cursor {
    pub(crate) node: Option<Handle>,
}

impl Cursor {
    pub(crate) fn new(node: Option<Handle>) -> Self {
        Cursor { node }
    }

    /// Returns the past-the-end cursor, which is shared by every container.
    pub fn end() -> Self {
        Cursor { node: None }
    }

    /// Returns `true` if the cursor is the past-the-end position.
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }
}

/// Returns the in-order successor of `node`, or `None` if `node` is the maximum.
pub fn successor<V>(nodes: &NodeArena<V>, node: Handle) -> Option<Handle> {
    if let Some(right) = nodes[node].right {
        return Some(node::min(nodes, right));
    }

    let mut curr = node;
    while let Some(parent) = nodes[curr].parent {
        if nodes[parent].right != Some(curr) {
            return Some(parent);
        }
        curr = parent;
    }
    None
}

/// Returns the in-order predecessor of `node`, or `None` if `node` is the minimum.
pub fn predecessor<V>(nodes: &NodeArena<V>, node: Handle) -> Option<Handle> {
    if let Some(left) = nodes[node].left {
        return Some(node::max(nodes, left));
    }

    let mut curr = node;
    while let Some(parent) = nodes[curr].parent {
        if nodes[parent].left != Some(curr) {
            return Some(parent);
        }
        curr = parent;
    }
    None
}

/// A double-ended iterator over a contiguous run of nodes. Each step follows node links only.
pub struct Iter<'a, V> {
    nodes: &'a NodeArena<V>,
    front: Option<Handle>,
    back: Option<Handle>,
}

impl<'a, V> Iter<'a, V> {
    // `front` and `back` are both inclusive; either both are `Some` or both are `None`
    pub(crate) fn new(nodes: &'a NodeArena<V>, front: Option<Handle>, back: Option<Handle>) -> Self {
        Iter { nodes, front, back }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        let curr = self.front?;
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.front = successor(self.nodes, curr);
        }
        Some(&self.nodes[curr].value)
    }
}

impl<'a, V> DoubleEndedIterator for Iter<'a, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let curr = self.back?;
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.back = predecessor(self.nodes, curr);
        }
        Some(&self.nodes[curr].value)
    }
}

impl<'a, V> Clone for Iter<'a, V> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
        }
    }
}

/// An owning iterator that drains a tree in order.
pub struct IntoIter<P>
where
    P: KeyPolicy,
{
    tree: Tree<P>,
}

impl<P> IntoIter<P>
where
    P: KeyPolicy,
{
    pub(crate) fn new(tree: Tree<P>) -> Self {
        IntoIter { tree }
    }
}

impl<P> Iterator for IntoIter<P>
where
    P: KeyPolicy,
{
    type Item = P::Value;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.len(), Some(self.tree.len()))
    }
}

impl<P> DoubleEndedIterator for IntoIter<P>
where
    P: KeyPolicy,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.tree.pop_last()
    }
}

impl<P> ExactSizeIterator for IntoIter<P> where P: KeyPolicy {}
