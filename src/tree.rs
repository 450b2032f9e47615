//! Module provide the ordered set implemented by [RbTree] type.
//!
//! RbTree is a classic [red-black tree][wiki-rbt] with parent links:
//!
//! - Insert is a plain binary-search-tree insert followed by a bottom-up
//!   fixup loop.
//! - Delete splices out the node, or its in-order successor when it has
//!   two children, followed by a bottom-up double-black fixup loop.
//! - Rotations re-link three nodes in O(1) and leave colors alone.
//!
//! After every completed public operation:
//!
//! * Values are in strictly ascending comparator order, in-order.
//! * Root, if present, is black.
//! * No red node has a red child.
//! * Every path from a node to an absent child has the same number
//!   of black nodes.
//!
//! Nodes are kept in a per-tree arena and linked by index. The arena is
//! kept dense, removing a node moves the last node into its slot.
//!
//! [wiki-rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree

use log::{debug, error, trace};
use rand::Rng;

use std::{cmp::Ordering, fmt};

use crate::{
    cmp::{Comparator, Natural},
    iter::{Iter, Order, Traverse},
    node::{Color, Link, Node, NodeRef},
    Error, Result,
};

// Log and compose an InvariantViolation error.
macro_rules! fatal {
    ($($arg:expr),+) => {{
        let msg = format!($($arg),+);
        error!("{}", msg);
        err_at!(InvariantViolation, msg: "{}", msg)
    }};
}

/// RbTree manage a single instance of in-memory ordered set using
/// [red-black][rbt] tree.
///
/// [rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
pub struct RbTree<T, C = Natural> {
    nodes: Vec<Node<T>>,
    root: Link,
    n_count: usize, // number of entries in the tree.
    cmp: C,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    fn flip(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

enum Search {
    Found(usize),
    Vacant(Link, Side), // parent and the child slot to link into.
}

impl<T, C> Default for RbTree<T, C>
where
    C: Default,
{
    fn default() -> RbTree<T, C> {
        RbTree::new(C::default())
    }
}

impl<T, C> RbTree<T, C> {
    /// Create an empty instance of RbTree, ordered by `cmp`.
    pub fn new(cmp: C) -> RbTree<T, C> {
        RbTree {
            nodes: Vec::default(),
            root: None,
            n_count: Default::default(),
            cmp,
        }
    }
}

/// Maintenance API.
impl<T, C> RbTree<T, C> {
    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_count == 0
    }

    /// Return the root node, None if tree is empty.
    pub fn root(&self) -> Option<NodeRef<T>> {
        self.root.map(|id| NodeRef::new(&self.nodes, id))
    }

    /// Release all entries. Handles obtained earlier borrow the tree, so
    /// none of them can survive this call.
    pub fn clear(&mut self) {
        debug!("clear {} entries", self.n_count);
        self.nodes.clear();
        self.root = None;
        self.n_count = 0;
    }
}

/// Read API.
impl<T, C> RbTree<T, C> {
    /// Return an iterator over all values in ascending order.
    pub fn iter(&self) -> Iter<T> {
        Iter::new(&self.nodes, self.root)
    }

    /// Return an iterator over all nodes in the requested order.
    pub fn traverse(&self, order: Order) -> Traverse<T> {
        Traverse::new(&self.nodes, self.root, order)
    }

    /// Return the smallest value.
    pub fn first(&self) -> Option<&T> {
        self.root.map(|id| &self.nodes[self.spine(id, Side::Left)].value)
    }

    /// Return the largest value.
    pub fn last(&self) -> Option<&T> {
        self.root.map(|id| &self.nodes[self.spine(id, Side::Right)].value)
    }

    /// Return a random entry from this index.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Option<&T> {
        let mut id = self.root?;

        let mut at_depth = rng.gen::<u8>() % 40;

        loop {
            let next = match rng.gen::<u8>() % 2 {
                0 => self.nodes[id].left,
                _ => self.nodes[id].right,
            };
            match next {
                Some(next) if at_depth > 0 => {
                    at_depth -= 1;
                    id = next;
                }
                _ => break Some(&self.nodes[id].value),
            }
        }
    }
}

/// CRUD API.
impl<T, C> RbTree<T, C>
where
    C: Comparator<T>,
{
    /// Insert value into the tree. Return false, without touching the
    /// tree, if an equal value is already present.
    pub fn insert(&mut self, value: T) -> Result<bool> {
        let (parent, side) = match self.search(&value)? {
            Search::Found(_) => return Ok(false),
            Search::Vacant(parent, side) => (parent, side),
        };

        let id = self.nodes.len();
        match parent {
            None => {
                self.nodes.push(Node::new(value, Color::Black, None));
                self.root = Some(id);
                self.n_count += 1;
            }
            Some(parent) => {
                self.nodes.push(Node::new(value, Color::Red, Some(parent)));
                self.set_child(parent, side, Some(id));
                self.n_count += 1;
                self.insert_fixup(id)?;
            }
        }

        Ok(true)
    }

    /// Same as insert, but fail with `DuplicateKey` if an equal value is
    /// already present.
    pub fn create(&mut self, value: T) -> Result<()> {
        match self.insert(value)? {
            true => Ok(()),
            false => err_at!(DuplicateKey, msg: "create(): value already present"),
        }
    }

    /// Delete the entry equal to key and return its value. If key is
    /// not present, then delete is effectively a no-op.
    pub fn delete(&mut self, key: &T) -> Result<Option<T>> {
        let z = match self.search(key)? {
            Search::Found(z) => z,
            Search::Vacant(_, _) => return Ok(None),
        };

        let (x, x_parent, removed) = self.splice_out(z);

        // z is unlinked now, move the last node of the arena into its slot.
        let last = self.nodes.len() - 1;
        let remap = |link: Link| if link == Some(last) { Some(z) } else { link };
        let (x, x_parent) = (remap(x), remap(x_parent));
        let value = self.release(z);
        self.n_count -= 1;

        if removed == Color::Black {
            self.delete_fixup(x, x_parent)?;
        }

        Ok(Some(value))
    }

    /// Same as delete, but fail with `KeyNotFound` if key is not present.
    pub fn remove(&mut self, key: &T) -> Result<T> {
        match self.delete(key)? {
            Some(value) => Ok(value),
            None => err_at!(KeyNotFound, msg: "remove(): no such key"),
        }
    }

    /// Find the node holding a value equal to key.
    pub fn find(&self, key: &T) -> Result<Option<NodeRef<T>>> {
        match self.search(key)? {
            Search::Found(id) => Ok(Some(NodeRef::new(&self.nodes, id))),
            Search::Vacant(_, _) => Ok(None),
        }
    }

    /// Get the stored value equal to key.
    pub fn get(&self, key: &T) -> Result<Option<&T>> {
        match self.search(key)? {
            Search::Found(id) => Ok(Some(&self.nodes[id].value)),
            Search::Vacant(_, _) => Ok(None),
        }
    }

    /// Check whether a value equal to key is present.
    pub fn contains(&self, key: &T) -> Result<bool> {
        Ok(matches!(self.search(key)?, Search::Found(_)))
    }

    /// Validate RbTree with following rules:
    ///
    /// * Root, if present, is black and has no parent.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Number of blacks should be same under left child and right child.
    /// * Every parent link points back to the node holding the child.
    /// * Make sure values are in strictly ascending order.
    /// * Entry count matches the number of reachable nodes.
    pub fn validate(&self) -> Result<()> {
        if let Some(root) = self.root {
            if self.nodes[root].parent.is_some() {
                return fatal!("root {} has a parent", root);
            }
            if !self.nodes[root].is_black() {
                return fatal!("root {} is red", root);
            }
        }

        let (_, n) = self.validate_tree(self.root, None, false)?;
        if n != self.n_count || n != self.nodes.len() {
            return fatal!("count {} reachable {} arena {}", self.n_count, n, self.nodes.len());
        }

        let mut iter = self.iter();
        let mut prev = match iter.next() {
            Some(value) => value,
            None => return Ok(()),
        };
        for value in iter {
            if self.cmp.compare(prev, value)? != Ordering::Less {
                return fatal!("values out of order");
            }
            prev = value;
        }

        Ok(())
    }
}

impl<T, C> RbTree<T, C>
where
    C: Comparator<T>,
{
    fn search(&self, key: &T) -> Result<Search> {
        let (mut parent, mut side, mut node) = (None, Side::Left, self.root);
        while let Some(id) = node {
            let nref = &self.nodes[id];
            side = match self.cmp.compare(key, &nref.value)? {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Ok(Search::Found(id)),
            };
            parent = Some(id);
            node = self.child(id, side);
        }
        Ok(Search::Vacant(parent, side))
    }

    // Return black-height and number of nodes in sub-tree.
    fn validate_tree(&self, node: Link, parent: Link, fromred: bool) -> Result<(usize, usize)> {
        let id = match node {
            Some(id) => id,
            None => return Ok((0, 0)),
        };
        let nref = &self.nodes[id];

        if nref.parent != parent {
            return fatal!("node {} parent {:?} expected {:?}", id, nref.parent, parent);
        }

        let red = !nref.is_black();
        if fromred && red {
            return fatal!("consecutive reds at {}", id);
        }

        let (lblacks, ln) = self.validate_tree(nref.left, node, red)?;
        let (rblacks, rn) = self.validate_tree(nref.right, node, red)?;
        if lblacks != rblacks {
            return fatal!("unbalanced blacks {} {} at {}", lblacks, rblacks, id);
        }

        let blacks = if red { lblacks } else { lblacks + 1 };
        Ok((blacks, ln + rn + 1))
    }
}

//--------- insert and delete pipelines ----------------

impl<T, C> RbTree<T, C> {
    // Restore red-black rules after linking red node `n` as a leaf.
    fn insert_fixup(&mut self, mut n: usize) -> Result<()> {
        loop {
            let parent = match self.nodes[n].parent {
                Some(parent) => parent,
                None => {
                    trace!("insert fixup at {}: root", n);
                    self.nodes[n].set_black();
                    break Ok(());
                }
            };
            if self.nodes[parent].is_black() {
                trace!("insert fixup at {}: black parent", n);
                break Ok(());
            }

            // red parent is never the root.
            let grand = match self.nodes[parent].parent {
                Some(grand) => grand,
                None => break fatal!("insert_fixup(): red root {}", parent),
            };
            let parent_side = self.side_of(parent, grand);
            let uncle = self.child(grand, parent_side.flip());

            if let Some(uncle) = uncle.filter(|uncle| !self.nodes[*uncle].is_black()) {
                trace!("insert fixup at {}: red uncle", n);
                self.nodes[parent].set_black();
                self.nodes[uncle].set_black();
                self.nodes[grand].set_red();
                n = grand;
            } else if self.side_of(n, parent) != parent_side {
                trace!("insert fixup at {}: inner grandchild", n);
                self.rotate(parent, parent_side)?;
                n = parent;
            } else {
                trace!("insert fixup at {}: outer grandchild", n);
                self.nodes[parent].set_black();
                self.nodes[grand].set_red();
                self.rotate(grand, parent_side.flip())?;
                break Ok(());
            }
        }
    }

    // Unlink `z` from the tree. Return the node now occupying the spliced
    // position, its parent, and the color that left the tree.
    fn splice_out(&mut self, z: usize) -> (Link, Link, Color) {
        let (left, right) = (self.nodes[z].left, self.nodes[z].right);
        let (parent, color) = (self.nodes[z].parent, self.nodes[z].color);

        let res = match (left, right) {
            (None, child) | (child, None) => {
                self.transplant(z, child);
                (child, parent, color)
            }
            (Some(left), Some(right)) => {
                let y = self.spine(right, Side::Left);
                let (x, y_color) = (self.nodes[y].right, self.nodes[y].color);
                let x_parent = if y == right {
                    Some(y)
                } else {
                    let x_parent = self.nodes[y].parent;
                    self.transplant(y, x);
                    self.nodes[y].right = Some(right);
                    self.nodes[right].parent = Some(y);
                    x_parent
                };
                self.transplant(z, Some(y));
                self.nodes[y].left = Some(left);
                self.nodes[left].parent = Some(y);
                self.nodes[y].color = color;
                (x, x_parent, y_color)
            }
        };

        self.nodes[z].detach();
        res
    }

    // Resolve the missing black at `x`, whose parent is `parent`. `x` may be
    // an absent child.
    fn delete_fixup(&mut self, mut x: Link, mut parent: Link) -> Result<()> {
        while x != self.root && !self.is_red(x) {
            let p = match parent {
                Some(p) => p,
                None => return fatal!("delete_fixup(): {:?} has no parent", x),
            };
            let side = if self.nodes[p].left == x {
                Side::Left
            } else {
                Side::Right
            };
            let far = side.flip();

            let mut w = self.sibling(p, far)?;
            if !self.nodes[w].is_black() {
                trace!("delete fixup at {}: red sibling", p);
                self.nodes[w].set_black();
                self.nodes[p].set_red();
                self.rotate(p, side)?;
                w = self.sibling(p, far)?;
            }

            let (near_child, far_child) = (self.child(w, side), self.child(w, far));
            if !self.is_red(near_child) && !self.is_red(far_child) {
                trace!("delete fixup at {}: black nephews", p);
                self.nodes[w].set_red();
                x = Some(p);
                parent = self.nodes[p].parent;
                continue;
            }

            if !self.is_red(far_child) {
                trace!("delete fixup at {}: red near nephew", p);
                if let Some(near_child) = near_child {
                    self.nodes[near_child].set_black();
                }
                self.nodes[w].set_red();
                self.rotate(w, far)?;
                w = self.sibling(p, far)?;
            }

            trace!("delete fixup at {}: red far nephew", p);
            self.nodes[w].color = self.nodes[p].color;
            self.nodes[p].set_black();
            if let Some(far_child) = self.child(w, far) {
                self.nodes[far_child].set_black();
            }
            self.rotate(p, side)?;
            x = self.root;
            parent = None;
        }

        if let Some(x) = x {
            self.nodes[x].set_black();
        }
        Ok(())
    }

    // Remove unlinked node `z` from the arena. The last node in the arena
    // takes over slot `z` and its neighbours are re-pointed.
    fn release(&mut self, z: usize) -> T {
        let last = self.nodes.len() - 1;
        let node = self.nodes.swap_remove(z);
        if z != last {
            let (parent, left, right) = {
                let moved = &self.nodes[z];
                (moved.parent, moved.left, moved.right)
            };
            self.replace_child(parent, last, Some(z));
            for child in [left, right].iter().flatten() {
                self.nodes[*child].parent = Some(z);
            }
        }
        node.value
    }
}

//--------- rotation primitives ----------------

impl<T, C> RbTree<T, C> {
    #[inline]
    fn rotate(&mut self, pivot: usize, dir: Side) -> Result<()> {
        match dir {
            Side::Left => self.rotate_left(pivot),
            Side::Right => self.rotate_right(pivot),
        }
    }

    //              (i)                       (i)
    //               |                         |
    //             pivot                    promoted
    //             /  \                      /  \
    //            /    \                    /    \
    //           /      \                  /      \
    //         left   promoted          pivot      pr
    //                  / \              /  \
    //                pl   pr         left   pl
    //
    fn rotate_left(&mut self, pivot: usize) -> Result<()> {
        let promoted = match self.nodes[pivot].right {
            Some(promoted) => promoted,
            None => return fatal!("rotate_left(): pivot {} has no right child", pivot),
        };

        let inner = self.nodes[promoted].left;
        self.nodes[pivot].right = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(pivot);
        }

        let parent = self.nodes[pivot].parent;
        self.nodes[promoted].parent = parent;
        self.replace_child(parent, pivot, Some(promoted));

        self.nodes[promoted].left = Some(pivot);
        self.nodes[pivot].parent = Some(promoted);
        Ok(())
    }

    //              (i)                       (i)
    //               |                         |
    //             pivot                    promoted
    //             /  \                      /  \
    //            /    \                    /    \
    //           /      \                  /      \
    //       promoted  right             pl      pivot
    //         / \                               /  \
    //       pl   pr                           pr   right
    //
    fn rotate_right(&mut self, pivot: usize) -> Result<()> {
        let promoted = match self.nodes[pivot].left {
            Some(promoted) => promoted,
            None => return fatal!("rotate_right(): pivot {} has no left child", pivot),
        };

        let inner = self.nodes[promoted].right;
        self.nodes[pivot].left = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(pivot);
        }

        let parent = self.nodes[pivot].parent;
        self.nodes[promoted].parent = parent;
        self.replace_child(parent, pivot, Some(promoted));

        self.nodes[promoted].right = Some(pivot);
        self.nodes[pivot].parent = Some(promoted);
        Ok(())
    }
}

//--------- link helpers ----------------

impl<T, C> RbTree<T, C> {
    #[inline]
    fn child(&self, id: usize, side: Side) -> Link {
        match side {
            Side::Left => self.nodes[id].left,
            Side::Right => self.nodes[id].right,
        }
    }

    #[inline]
    fn set_child(&mut self, id: usize, side: Side, child: Link) {
        match side {
            Side::Left => self.nodes[id].left = child,
            Side::Right => self.nodes[id].right = child,
        }
    }

    #[inline]
    fn is_red(&self, link: Link) -> bool {
        link.map_or(false, |id| !self.nodes[id].is_black())
    }

    fn side_of(&self, child: usize, parent: usize) -> Side {
        if self.nodes[parent].left == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    // Sibling of a double-black position always exists, its side of the
    // parent carries at least one black.
    fn sibling(&self, parent: usize, side: Side) -> Result<usize> {
        match self.child(parent, side) {
            Some(w) => Ok(w),
            None => fatal!("delete_fixup(): missing sibling under {}", parent),
        }
    }

    // Follow `side` links down to the last node.
    fn spine(&self, mut id: usize, side: Side) -> usize {
        while let Some(next) = self.child(id, side) {
            id = next;
        }
        id
    }

    // Point the slot in `parent` (or the root slot) holding `old` to `new`.
    fn replace_child(&mut self, parent: Link, old: usize, new: Link) {
        match parent {
            None => self.root = new,
            Some(p) if self.nodes[p].left == Some(old) => self.nodes[p].left = new,
            Some(p) => self.nodes[p].right = new,
        }
    }

    // Put sub-tree `v` in the position of `u`.
    fn transplant(&mut self, u: usize, v: Link) {
        let parent = self.nodes[u].parent;
        self.replace_child(parent, u, v);
        if let Some(v) = v {
            self.nodes[v].parent = parent;
        }
    }
}

impl<'a, T, C> IntoIterator for &'a RbTree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, C> fmt::Display for RbTree<T, C>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, node) in self.traverse(Order::InOrder).enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", node)?;
        }
        write!(f, "}}")
    }
}

impl<T, C> fmt::Debug for RbTree<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;
