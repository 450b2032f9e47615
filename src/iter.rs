//! Module implement lazy traversal over a [RbTree].
//!
//! Traversals use an explicit stack of path fragments, they never recurse
//! and never mutate the tree. Each call to [RbTree::traverse] or
//! [RbTree::iter] starts a fresh sequence with its own position state, so
//! any number of traversals can be in flight over the same tree.
//!
//! [RbTree]: crate::RbTree
//! [RbTree::traverse]: crate::RbTree::traverse
//! [RbTree::iter]: crate::RbTree::iter

use crate::node::{Link, Node, NodeRef};

/// Visit order for [Traverse].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    /// Left subtree, node, right subtree. Yields values in ascending order.
    InOrder,
    /// Node, left subtree, right subtree.
    PreOrder,
    /// Left subtree, right subtree, node.
    PostOrder,
}

/// Iterator over nodes of a sub-tree, in the requested [Order].
pub struct Traverse<'a, T> {
    nodes: &'a [Node<T>],
    order: Order,
    paths: Vec<Fragment>,
}

impl<'a, T> Traverse<'a, T> {
    pub(crate) fn new(nodes: &'a [Node<T>], start: Link, order: Order) -> Traverse<'a, T> {
        let mut iter = Traverse {
            nodes,
            order,
            paths: Vec::default(),
        };
        match order {
            Order::InOrder | Order::PostOrder => iter.build_iter(start),
            Order::PreOrder => {
                if let Some(id) = start {
                    iter.paths.push(Fragment { flag: IFlag::Left, id })
                }
            }
        }
        iter
    }

    // push the left spine starting from `node`.
    fn build_iter(&mut self, mut node: Link) {
        while let Some(id) = node {
            self.paths.push(Fragment { flag: IFlag::Left, id });
            node = self.nodes[id].left;
        }
    }

    fn next_in_order(&mut self) -> Option<usize> {
        loop {
            let path = self.paths.last_mut()?;
            match path.flag {
                IFlag::Left => {
                    path.flag = IFlag::Center;
                    break Some(path.id);
                }
                IFlag::Center => {
                    path.flag = IFlag::Right;
                    let right = self.nodes[path.id].right;
                    self.build_iter(right)
                }
                IFlag::Right => {
                    self.paths.pop();
                }
            }
        }
    }

    fn next_pre_order(&mut self) -> Option<usize> {
        let path = self.paths.pop()?;
        let node = &self.nodes[path.id];
        for child in [node.right, node.left].iter() {
            if let Some(id) = *child {
                self.paths.push(Fragment { flag: IFlag::Left, id })
            }
        }
        Some(path.id)
    }

    fn next_post_order(&mut self) -> Option<usize> {
        loop {
            let path = self.paths.last_mut()?;
            match path.flag {
                IFlag::Left | IFlag::Center => {
                    path.flag = IFlag::Right;
                    let right = self.nodes[path.id].right;
                    self.build_iter(right)
                }
                IFlag::Right => break self.paths.pop().map(|path| path.id),
            }
        }
    }
}

impl<'a, T> Iterator for Traverse<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = match self.order {
            Order::InOrder => self.next_in_order(),
            Order::PreOrder => self.next_pre_order(),
            Order::PostOrder => self.next_post_order(),
        }?;
        Some(NodeRef::new(self.nodes, id))
    }
}

/// Iterator over values in ascending order.
pub struct Iter<'a, T> {
    inner: Traverse<'a, T>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(nodes: &'a [Node<T>], root: Link) -> Iter<'a, T> {
        Iter {
            inner: Traverse::new(nodes, root, Order::InOrder),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|node| node.value())
    }
}

#[derive(Copy, Clone)]
enum IFlag {
    Left,
    Center,
    Right,
}

struct Fragment {
    flag: IFlag,
    id: usize,
}

#[cfg(test)]
#[path = "iter_test.rs"]
mod iter_test;
