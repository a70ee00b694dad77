//! An arena-backed BST. Nodes live in a flat vector of slots and refer to
//! their children by index, so the splice in the two-child deletion case is
//! a value copy plus one link rewrite instead of an ownership transfer, and
//! dropping the tree never recurses.
//!
//! Slots freed by [`Tree::remove`] go on a free list and are reused by
//! later [`Tree::add`]s, so storage stays proportional to the live size.
//!
//! # Examples
//!
//! ```
//! use bstree::arena::{Tree, TraversalOrder};
//!
//! let mut tree = Tree::new();
//! assert!(tree.is_empty());
//!
//! assert!(tree.add(2));
//! assert!(tree.add(1));
//! assert!(tree.add(3));
//!
//! // Duplicates are rejected, not overwritten.
//! assert!(!tree.add(2));
//! assert_eq!(tree.size(), 3);
//!
//! let ascending: Vec<i32> = tree.traverse(TraversalOrder::InOrder).copied().collect();
//! assert_eq!(ascending, [1, 2, 3]);
//!
//! assert!(tree.remove(&2));
//! assert!(!tree.contains(&2));
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::iter::FromIterator;

/// Index of a node's slot in the arena.
type NodeId = u32;

#[derive(Clone)]
struct Node<T> {
    data: T,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// A Binary Search Tree holding each value at most once, ordered by `T`'s
/// `Ord`. Insertion, removal, and membership are `O(height)`; the tree is
/// never rebalanced, so the height is only bounded by the number of values.
///
/// The `Ord` given for `T` must be a total order (which every well-behaved
/// `Ord` impl is). The tree does nothing with values besides comparing and
/// moving them.
#[derive(Clone)]
pub struct Tree<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<NodeId>,
    root: Option<NodeId>,
    node_count: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Tree {
            slots: Vec::new(),
            free: Vec::new(),
            root: None,
            node_count: 0,
        }
    }

    /// The number of values in the tree. `O(1)`: the count is maintained
    /// by `add` and `remove`, never recomputed by walking.
    pub fn size(&self) -> usize {
        self.node_count
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Whether `elem` is in the tree. `O(height)`, no side effects.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::arena::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(1);
    ///
    /// assert!(tree.contains(&1));
    /// assert!(!tree.contains(&42));
    /// ```
    pub fn contains(&self, elem: &T) -> bool
    where
        T: Ord,
    {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            match elem.cmp(&node.data) {
                Ordering::Less => current = node.left,
                Ordering::Equal => return true,
                Ordering::Greater => current = node.right,
            }
        }
        false
    }

    /// Inserts `elem`, returning whether it was inserted. A value already
    /// in the tree is left alone and `false` is returned; rejecting
    /// duplicates is the contract, not an error.
    ///
    /// The descent is iterative and touches only the path to the first
    /// absent child slot; nothing above the new leaf is mutated.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::arena::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.add(1));
    /// assert!(!tree.add(1));
    /// assert_eq!(tree.size(), 1);
    /// ```
    pub fn add(&mut self, elem: T) -> bool
    where
        T: Ord,
    {
        let mut current = match self.root {
            Some(root) => root,
            None => {
                let root = self.alloc(elem);
                self.root = Some(root);
                self.node_count += 1;
                return true;
            }
        };

        loop {
            match elem.cmp(&self.node(current).data) {
                Ordering::Equal => return false,
                Ordering::Less => match self.node(current).left {
                    Some(left) => current = left,
                    None => {
                        let leaf = self.alloc(elem);
                        self.node_mut(current).left = Some(leaf);
                        self.node_count += 1;
                        return true;
                    }
                },
                Ordering::Greater => match self.node(current).right {
                    Some(right) => current = right,
                    None => {
                        let leaf = self.alloc(elem);
                        self.node_mut(current).right = Some(leaf);
                        self.node_count += 1;
                        return true;
                    }
                },
            }
        }
    }

    /// Removes `elem` from the tree, returning whether it was present.
    ///
    /// A node with at most one child is replaced by that child. A node with
    /// two children takes the value of its in-order successor (the leftmost
    /// node of its right subtree, holding the unique smallest value greater
    /// than the removed one) and the successor's node, which has no left
    /// child by construction, is spliced out instead. The BST order
    /// invariant holds throughout and no value is ever duplicated.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::arena::Tree;
    ///
    /// let mut tree: Tree<i32> = [2, 1, 3].iter().copied().collect();
    ///
    /// assert!(tree.remove(&2));
    /// assert!(!tree.remove(&2));
    /// assert_eq!(tree.size(), 2);
    /// ```
    pub fn remove(&mut self, elem: &T) -> bool
    where
        T: Ord,
    {
        // Locate the node holding `elem` along with its parent.
        let mut parent = None;
        let mut current = self.root;
        let target = loop {
            let id = match current {
                Some(id) => id,
                None => return false,
            };
            match elem.cmp(&self.node(id).data) {
                Ordering::Less => {
                    parent = Some(id);
                    current = self.node(id).left;
                }
                Ordering::Greater => {
                    parent = Some(id);
                    current = self.node(id).right;
                }
                Ordering::Equal => break id,
            }
        };

        let (left, right) = {
            let node = self.node(target);
            (node.left, node.right)
        };
        match (left, right) {
            // At most one child: promote it (or nothing) into the slot.
            (None, child) | (child, None) => {
                self.replace_child(parent, target, child);
                self.release(target);
            }
            // Two children: copy the in-order successor's value here and
            // splice the successor out one level down.
            (Some(_), Some(right)) => {
                let mut succ_parent = target;
                let mut succ = right;
                while let Some(left) = self.node(succ).left {
                    succ_parent = succ;
                    succ = left;
                }
                let succ_right = self.node(succ).right;
                self.replace_child(Some(succ_parent), succ, succ_right);
                let succ_node = self.release(succ);
                self.node_mut(target).data = succ_node.data;
            }
        }
        self.node_count -= 1;
        true
    }

    /// The height of the tree: 0 when empty, otherwise 1 + the height of
    /// the taller subtree. Recomputed on every call in `O(n)` by counting
    /// breadth-first levels, so even a chain-shaped tree costs no call
    /// stack.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::arena::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.height(), 0);
    ///
    /// // Sorted insertion builds a chain: height == size.
    /// for x in 1..=4 {
    ///     tree.add(x);
    /// }
    /// assert_eq!(tree.height(), 4);
    /// ```
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut frontier: Vec<NodeId> = self.root.into_iter().collect();
        let mut next = Vec::new();
        while !frontier.is_empty() {
            height += 1;
            for id in frontier.drain(..) {
                let node = self.node(id);
                next.extend(node.left);
                next.extend(node.right);
            }
            std::mem::swap(&mut frontier, &mut next);
        }
        height
    }

    /// Lazily visits every value in the given order. Each call builds a
    /// fresh, independent [`Traversal`], so traversals can be partially
    /// consumed, abandoned, and restarted at will. An empty tree yields an
    /// empty sequence.
    ///
    /// The language-independent contract leaves mutation during a traversal
    /// undefined; here the shared borrow makes it unrepresentable instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::arena::{Tree, TraversalOrder};
    ///
    /// let tree: Tree<i32> = [2, 1, 3].iter().copied().collect();
    ///
    /// let pre: Vec<i32> = tree.traverse(TraversalOrder::PreOrder).copied().collect();
    /// assert_eq!(pre, [2, 1, 3]);
    ///
    /// // Partially consuming one traversal doesn't disturb the next.
    /// let mut partial = tree.traverse(TraversalOrder::InOrder);
    /// assert_eq!(partial.next(), Some(&1));
    /// drop(partial);
    /// assert_eq!(tree.traverse(TraversalOrder::InOrder).count(), 3);
    /// ```
    pub fn traverse(&self, order: TraversalOrder) -> Traversal<'_, T> {
        let frontier = match order {
            TraversalOrder::PreOrder => Frontier::Pre(self.root.into_iter().collect()),
            TraversalOrder::InOrder => Frontier::In {
                stack: Vec::new(),
                current: self.root,
            },
            TraversalOrder::PostOrder => {
                Frontier::Post(self.root.map(|root| (root, false)).into_iter().collect())
            }
            TraversalOrder::LevelOrder => Frontier::Level(self.root.into_iter().collect()),
        };
        Traversal {
            tree: self,
            frontier,
        }
    }

    /// Visits every value in ascending order. Shorthand for an in-order
    /// [`traverse`](Self::traverse).
    pub fn iter(&self) -> Traversal<'_, T> {
        self.traverse(TraversalOrder::InOrder)
    }

    fn node(&self, id: NodeId) -> &Node<T> {
        self.slots[id as usize]
            .as_ref()
            .expect("live node id points at a vacant slot")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.slots[id as usize]
            .as_mut()
            .expect("live node id points at a vacant slot")
    }

    fn alloc(&mut self, data: T) -> NodeId {
        let node = Node {
            data,
            left: None,
            right: None,
        };
        match self.free.pop() {
            Some(id) => {
                debug_assert!(self.slots[id as usize].is_none());
                self.slots[id as usize] = Some(node);
                id
            }
            None => {
                let id = self.slots.len() as NodeId;
                self.slots.push(Some(node));
                id
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Node<T> {
        let node = self.slots[id as usize]
            .take()
            .expect("releasing a vacant slot");
        self.free.push(id);
        node
    }

    /// Rewrites the link from `parent` (the root handle when `None`) that
    /// points at `child` to point at `with`.
    fn replace_child(&mut self, parent: Option<NodeId>, child: NodeId, with: Option<NodeId>) {
        match parent {
            None => self.root = with,
            Some(id) => {
                let parent = self.node_mut(id);
                if parent.left == Some(child) {
                    parent.left = with;
                } else {
                    debug_assert_eq!(parent.right, Some(child));
                    parent.right = with;
                }
            }
        }
    }
}

impl<T: Ord> Extend<T> for Tree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.add(elem);
        }
    }
}

impl<T: Ord> FromIterator<T> for Tree<T> {
    /// Builds a tree by `add`ing each value in order; duplicates in the
    /// input are silently dropped.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Traversal<'a, T>;

    fn into_iter(self) -> Traversal<'a, T> {
        self.iter()
    }
}

/// The four visitation orders understood by [`Tree::traverse`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Node, then left subtree, then right subtree.
    PreOrder,
    /// Left subtree, then node, then right subtree. Yields values in
    /// ascending order.
    InOrder,
    /// Left subtree, then right subtree, then node.
    PostOrder,
    /// Breadth-first: every node at depth `d` before any node at depth
    /// `d + 1`, left to right within a depth.
    LevelOrder,
}

/// Pending-node state per order. Pre and post order carry an explicit
/// stack, in order descends left as it yields, and level order carries a
/// queue, so no traversal recurses and a chain-shaped tree cannot overflow
/// the call stack.
enum Frontier {
    Pre(Vec<NodeId>),
    In {
        stack: Vec<NodeId>,
        current: Option<NodeId>,
    },
    /// The flag records whether the node's subtrees have already been
    /// pushed; a node is yielded the second time it is popped.
    Post(Vec<(NodeId, bool)>),
    Level(VecDeque<NodeId>),
}

/// A lazy traversal over a tree's values, returned by [`Tree::traverse`].
///
/// The traversal borrows the tree, so the tree cannot be mutated while any
/// traversal is alive. Dropping a partially consumed `Traversal` abandons
/// it; a later `traverse` call starts over from the root.
pub struct Traversal<'a, T> {
    tree: &'a Tree<T>,
    frontier: Frontier,
}

impl<'a, T> Iterator for Traversal<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let tree = self.tree;
        match &mut self.frontier {
            Frontier::Pre(stack) => {
                let id = stack.pop()?;
                let node = tree.node(id);
                // Right goes under left so the left subtree is visited first.
                stack.extend(node.right);
                stack.extend(node.left);
                Some(&node.data)
            }
            Frontier::In { stack, current } => {
                while let Some(id) = *current {
                    stack.push(id);
                    *current = tree.node(id).left;
                }
                let id = stack.pop()?;
                let node = tree.node(id);
                *current = node.right;
                Some(&node.data)
            }
            Frontier::Post(stack) => loop {
                let (id, expanded) = stack.pop()?;
                let node = tree.node(id);
                if expanded {
                    return Some(&node.data);
                }
                stack.push((id, true));
                stack.extend(node.right.map(|right| (right, false)));
                stack.extend(node.left.map(|left| (left, false)));
            },
            Frontier::Level(queue) => {
                let id = queue.pop_front()?;
                let node = tree.node(id);
                queue.extend(node.left);
                queue.extend(node.right);
                Some(&node.data)
            }
        }
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a `BTreeSet`. This way we
    /// can ensure that after a random smattering of adds and removes both
    /// hold the same values in the same order.
    fn do_ops(ops: &[Op<i8>], tree: &mut Tree<i8>, set: &mut BTreeSet<i8>) {
        for op in ops {
            match op {
                Op::Add(x) => assert_eq!(tree.add(*x), set.insert(*x)),
                Op::Remove(x) => assert_eq!(tree.remove(x), set.remove(x)),
                Op::Contains(x) => assert_eq!(tree.contains(x), set.contains(x)),
            }
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set);
            tree.size() == set.len() && tree.iter().eq(set.iter())
        }
    }

    quickcheck::quickcheck! {
        fn in_order_is_strictly_ascending(xs: Vec<i8>) -> bool {
            let tree: Tree<i8> = xs.into_iter().collect();
            let values: Vec<i8> = tree.iter().copied().collect();

            values.windows(2).all(|w| w[0] < w[1])
        }
    }

    quickcheck::quickcheck! {
        fn every_order_visits_every_value_once(xs: Vec<i8>) -> bool {
            let tree: Tree<i8> = xs.iter().copied().collect();

            [TraversalOrder::PreOrder, TraversalOrder::PostOrder, TraversalOrder::LevelOrder]
                .iter()
                .all(|&order| {
                    let mut seen: Vec<i8> = tree.traverse(order).copied().collect();
                    seen.sort_unstable();
                    seen.iter().eq(tree.iter())
                })
        }
    }

    quickcheck::quickcheck! {
        fn size_tracks_successful_operations(xs: Vec<i8>, removes: Vec<i8>) -> bool {
            let mut tree = Tree::new();
            let mut expected = 0usize;

            for x in &xs {
                if tree.add(*x) {
                    expected += 1;
                }
            }
            for x in &removes {
                if tree.remove(x) {
                    expected -= 1;
                }
            }

            tree.size() == expected
        }
    }

    quickcheck::quickcheck! {
        fn removing_everything_empties_the_tree(xs: Vec<i8>) -> bool {
            let mut tree: Tree<i8> = xs.iter().copied().collect();

            let mut unique = xs;
            unique.sort_unstable();
            unique.dedup();
            for x in &unique {
                if !tree.remove(x) {
                    return false;
                }
            }

            tree.is_empty() && tree.height() == 0
        }
    }
}
