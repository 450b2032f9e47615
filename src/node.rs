use std::fmt;

use crate::iter::{Order, Traverse};

/// Color of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::Red => write!(f, "Red"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Link to a node, as an index into the tree's node arena.
pub(crate) type Link = Option<usize>;

/// Node corresponds to a single entry in RbTree instance.
///
/// `left` and `right` are the owning links, every node is reachable from
/// exactly one child slot or from the root slot. `parent` is a back link,
/// used only to walk upward during fixups.
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) color: Color,
    pub(crate) left: Link,   // store: left child
    pub(crate) right: Link,  // store: right child
    pub(crate) parent: Link, // back link
}

impl<T> Node<T> {
    pub(crate) fn new(value: T, color: Color, parent: Link) -> Node<T> {
        Node {
            value,
            color,
            left: None,
            right: None,
            parent,
        }
    }

    /// Clear all links, must be called before a node leaves the tree.
    #[inline]
    pub(crate) fn detach(&mut self) {
        self.parent = None;
        self.left = None;
        self.right = None;
    }

    #[inline]
    pub(crate) fn set_red(&mut self) {
        self.color = Color::Red
    }

    #[inline]
    pub(crate) fn set_black(&mut self) {
        self.color = Color::Black
    }

    #[inline]
    pub(crate) fn is_black(&self) -> bool {
        self.color == Color::Black
    }
}

/// Read only handle to a node inside a [RbTree].
///
/// A handle borrows the tree, hence it cannot outlive a mutation.
///
/// [RbTree]: crate::RbTree
pub struct NodeRef<'a, T> {
    nodes: &'a [Node<T>],
    id: usize,
}

impl<'a, T> Clone for NodeRef<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for NodeRef<'a, T> {}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(nodes: &'a [Node<T>], id: usize) -> NodeRef<'a, T> {
        NodeRef { nodes, id }
    }

    #[inline]
    fn node(&self) -> &'a Node<T> {
        &self.nodes[self.id]
    }

    #[inline]
    fn to_ref(&self, link: Link) -> Option<NodeRef<'a, T>> {
        link.map(|id| NodeRef::new(self.nodes, id))
    }

    pub fn value(&self) -> &'a T {
        &self.node().value
    }

    pub fn color(&self) -> Color {
        self.node().color
    }

    pub fn is_red(&self) -> bool {
        self.node().color == Color::Red
    }

    pub fn is_black(&self) -> bool {
        self.node().is_black()
    }

    pub fn left(&self) -> Option<NodeRef<'a, T>> {
        self.to_ref(self.node().left)
    }

    pub fn right(&self) -> Option<NodeRef<'a, T>> {
        self.to_ref(self.node().right)
    }

    /// Return the parent node, None for root.
    pub fn parent(&self) -> Option<NodeRef<'a, T>> {
        self.to_ref(self.node().parent)
    }

    /// Return an iterator over nodes of the sub-tree rooted at this node.
    pub fn traverse(&self, order: Order) -> Traverse<'a, T> {
        Traverse::new(self.nodes, Some(self.id), order)
    }
}

impl<'a, T> PartialEq for NodeRef<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.nodes, other.nodes) && self.id == other.id
    }
}

impl<'a, T> fmt::Display for NodeRef<'a, T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({} : {})", self.value(), self.color())
    }
}

impl<'a, T> fmt::Debug for NodeRef<'a, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({:?} : {})", self.value(), self.color())
    }
}
