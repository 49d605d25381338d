use crate::arena::{Handle, TypedArena};

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// A struct representing an internal node of a red black tree.
///
/// `left` and `right` own their subtrees. `parent` is only a back-reference used for navigation
/// and rebalancing.
#[derive(Debug)]
pub struct Node<V> {
    pub value: V,
    pub color: Color,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
    pub parent: Option<Handle>,
}

pub type NodeArena<V> = TypedArena<Node<V>>;

impl<V> Node<V> {
    pub fn new(value: V) -> Self {
        Node {
            value,
            color: Color::Red,
            left: None,
            right: None,
            parent: None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

// absent children count as black leaves
pub fn is_red<V>(nodes: &NodeArena<V>, node: Option<Handle>) -> bool {
    match node {
        None => false,
        Some(node) => nodes[node].color == Color::Red,
    }
}

pub fn is_black<V>(nodes: &NodeArena<V>, node: Option<Handle>) -> bool {
    !is_red(nodes, node)
}

pub fn is_left_child<V>(nodes: &NodeArena<V>, node: Handle) -> bool {
    match nodes[node].parent {
        None => false,
        Some(parent) => nodes[parent].left == Some(node),
    }
}

pub fn grandparent<V>(nodes: &NodeArena<V>, node: Handle) -> Option<Handle> {
    nodes[node].parent.and_then(|parent| nodes[parent].parent)
}

pub fn sibling<V>(nodes: &NodeArena<V>, node: Handle) -> Option<Handle> {
    nodes[node].parent.and_then(|parent| {
        if nodes[parent].left == Some(node) {
            nodes[parent].right
        } else {
            nodes[parent].left
        }
    })
}

pub fn uncle<V>(nodes: &NodeArena<V>, node: Handle) -> Option<Handle> {
    nodes[node].parent.and_then(|parent| sibling(nodes, parent))
}

pub fn set_left<V>(nodes: &mut NodeArena<V>, node: Handle, child: Option<Handle>) {
    nodes[node].left = child;
    if let Some(child) = child {
        nodes[child].parent = Some(node);
    }
}

pub fn set_right<V>(nodes: &mut NodeArena<V>, node: Handle, child: Option<Handle>) {
    nodes[node].right = child;
    if let Some(child) = child {
        nodes[child].parent = Some(node);
    }
}

/// Points the parent-side slot that holds `node` at `replacement` instead. Does nothing if `node`
/// has no parent.
pub fn replace_child<V>(
    nodes: &mut NodeArena<V>,
    parent: Option<Handle>,
    node: Handle,
    replacement: Option<Handle>,
) {
    if let Some(parent) = parent {
        if nodes[parent].left == Some(node) {
            nodes[parent].left = replacement;
        } else if nodes[parent].right == Some(node) {
            nodes[parent].right = replacement;
        }
    }
}

pub fn detach_from_parent<V>(nodes: &mut NodeArena<V>, node: Handle) {
    let parent = nodes[node].parent.take();
    replace_child(nodes, parent, node, None);
}

/// Unlinks `node` from its parent and children and colors it red, as if it had just been
/// allocated. A child's back-reference is only cleared if it still points at `node`.
pub fn reset<V>(nodes: &mut NodeArena<V>, node: Handle) {
    for child in [nodes[node].left.take(), nodes[node].right.take()].iter().flatten() {
        if nodes[*child].parent == Some(node) {
            nodes[*child].parent = None;
        }
    }
    detach_from_parent(nodes, node);
    nodes[node].color = Color::Red;
}

/// Exchanges the tree positions of `a` and `b`: their colors, their children and the slot each
/// occupies in its parent. Values stay where they are, so handles keep referring to the same
/// values. `a` and `b` may be adjacent.
///
/// The caller is responsible for updating the root if either node was the root.
pub fn swap_positions<V>(nodes: &mut NodeArena<V>, a: Handle, b: Handle) {
    if a == b {
        return;
    }

    let remap = |link: Option<Handle>| match link {
        Some(node) if node == a => Some(b),
        Some(node) if node == b => Some(a),
        link => link,
    };

    let (a_parent, a_left, a_right, a_color) = {
        let node = &nodes[a];
        (node.parent, node.left, node.right, node.color)
    };
    let (b_parent, b_left, b_right, b_color) = {
        let node = &nodes[b];
        (node.parent, node.left, node.right, node.color)
    };

    // the parent slots have to be rewired before the links are overwritten
    let a_was_left = is_left_child(nodes, a);
    let b_was_left = is_left_child(nodes, b);
    if let Some(parent) = a_parent.filter(|&parent| parent != b) {
        if a_was_left {
            nodes[parent].left = Some(b);
        } else {
            nodes[parent].right = Some(b);
        }
    }
    if let Some(parent) = b_parent.filter(|&parent| parent != a) {
        if b_was_left {
            nodes[parent].left = Some(a);
        } else {
            nodes[parent].right = Some(a);
        }
    }

    {
        let node = &mut nodes[a];
        node.parent = remap(b_parent);
        node.left = remap(b_left);
        node.right = remap(b_right);
        node.color = b_color;
    }
    {
        let node = &mut nodes[b];
        node.parent = remap(a_parent);
        node.left = remap(a_left);
        node.right = remap(a_right);
        node.color = a_color;
    }

    for &node in &[a, b] {
        let (left, right) = (nodes[node].left, nodes[node].right);
        for child in [left, right].iter().flatten() {
            nodes[*child].parent = Some(node);
        }
    }
}

pub fn min<V>(nodes: &NodeArena<V>, mut node: Handle) -> Handle {
    while let Some(left) = nodes[node].left {
        node = left;
    }
    node
}

pub fn max<V>(nodes: &NodeArena<V>, mut node: Handle) -> Handle {
    while let Some(right) = nodes[node].right {
        node = right;
    }
    node
}
