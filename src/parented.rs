//! A BST whose nodes know their parent. Nodes live in a [`Forest`] and are referenced by
//! [`NodeId`] handles so the parent link never owns anything and can't form a cycle.
//!
//! There is no separate tree header: the caller keeps the [`NodeId`] of each root. A `Forest`
//! can hold several trees at once and any node without a parent is the root of one of them.
//!
//! Values equal to a node's value are always routed to its right subtree, so duplicates are
//! allowed and traversals stay deterministic.
//!
//! # Examples
//!
//! ```
//! use linked_bst::parented::Forest;
//!
//! let mut forest = Forest::new();
//! let root = forest.new_node(10);
//! for value in [20, 5, 21, 8, 4] {
//!     forest.insert(root, value).unwrap();
//! }
//!
//! assert_eq!(forest.in_order(root).copied().collect::<Vec<_>>(), [4, 5, 8, 10, 20, 21]);
//! assert_eq!(forest.height(root), Some(2));
//!
//! let four = forest.search(root, &4).unwrap();
//! assert_eq!(forest.depth(four), Some(2));
//! assert_eq!(forest.search(root, &1), None);
//!
//! // Deleting the root hands back the node that took its place.
//! let removed = forest.delete(root).unwrap();
//! assert_eq!(removed.value, 10);
//! let root = removed.replacement.unwrap();
//! assert_eq!(forest.value(root), Some(&20));
//! ```

use std::fmt;

use log::{debug, trace, warn};

use crate::error::Error;
use crate::{arena::Arena, NodeId};

/// A single value in a [`Forest`] along with its links.
#[derive(Clone, Debug)]
pub struct Node<T> {
    value: T,
    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Option<NodeId>,
}

impl<T> Node<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
            parent: None,
        }
    }

    /// The value stored in this node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The root of this node's left subtree, if any.
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// The root of this node's right subtree, if any.
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// The node this one hangs below. `None` for a root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Whether this node is the root of its tree.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// What [`Forest::delete`] hands back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Removed<T> {
    /// The value of the deleted node.
    pub value: T,
    /// The node that now sits where the deleted node used to be. When a root was deleted this is
    /// the new root, and `None` means the tree is now empty.
    pub replacement: Option<NodeId>,
}

/// Owner of the nodes of any number of parent-linked binary search trees.
#[derive(Clone)]
pub struct Forest<T> {
    nodes: Arena<Node<T>>,
}

impl<T> Default for Forest<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Forest<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Forest")
            .field("len", &self.len())
            .field("roots", &self.roots().collect::<Vec<_>>())
            .finish()
    }
}

impl<T> Forest<T> {
    /// Generates a new, empty `Forest`.
    pub fn new() -> Self {
        Self { nodes: Arena::new() }
    }

    /// Generates a new, empty `Forest` with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
        }
    }

    /// The number of live nodes across all trees.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the forest holds no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every node. Every handle issued so far becomes stale.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Whether `id` names a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(id)
    }

    /// The node behind `id`, or `None` when the handle is stale.
    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id)
    }

    /// The value behind `id`, or `None` when the handle is stale.
    pub fn value(&self, id: NodeId) -> Option<&T> {
        self.get(id).map(Node::value)
    }

    /// Every root in the forest, in no particular order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, node)| node.is_root())
            .map(|(id, _)| id)
    }

    /// Creates a detached node: the root of a new single-node tree.
    pub fn new_node(&mut self, value: T) -> NodeId {
        let id = self.nodes.alloc(Node::new(value));
        trace!("created detached node {id:?}");
        id
    }

    /// Follows parent links from `id` up to the root of its tree.
    pub fn root_of(&self, id: NodeId) -> Option<NodeId> {
        let mut current = id;
        let mut node = self.get(id)?;
        while let Some(parent) = node.parent {
            current = parent;
            node = self.node(parent);
        }
        Some(current)
    }

    /// The number of parent links between `id` and the root of its tree. Roots have depth 0.
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        let mut node = self.get(id)?;
        let mut depth = 0;
        while let Some(parent) = node.parent {
            depth += 1;
            node = self.node(parent);
        }
        Some(depth)
    }

    /// The number of edges on the longest path from `from` down to a leaf. A leaf has height 0.
    pub fn height(&self, from: NodeId) -> Option<usize> {
        self.get(from)?;

        let mut height = 0;
        let mut stack = vec![(from, 0)];
        while let Some((id, level)) = stack.pop() {
            height = height.max(level);
            let node = self.node(id);
            stack.extend(
                [node.left, node.right]
                    .into_iter()
                    .flatten()
                    .map(|child| (child, level + 1)),
            );
        }
        Some(height)
    }

    /// The node holding the smallest value in the subtree rooted at `from`.
    pub fn minimum(&self, from: NodeId) -> Option<NodeId> {
        self.contains(from).then(|| self.minimum_of(from))
    }

    /// The node holding the largest value in the subtree rooted at `from`.
    pub fn maximum(&self, from: NodeId) -> Option<NodeId> {
        self.contains(from).then(|| self.maximum_of(from))
    }

    /// The smallest value in the subtree rooted at `from`.
    pub fn minimum_value(&self, from: NodeId) -> Option<&T> {
        self.minimum(from).map(|id| &self.node(id).value)
    }

    /// The largest value in the subtree rooted at `from`.
    pub fn maximum_value(&self, from: NodeId) -> Option<&T> {
        self.maximum(from).map(|id| &self.node(id).value)
    }

    /// Removes `id` from its tree and returns its value.
    ///
    /// A node with two children is replaced by its in-order successor, a node with one child by
    /// that child, and a leaf simply disappears. [`Removed::replacement`] names the node that now
    /// occupies the deleted node's position, which is how a caller learns the new root after
    /// deleting one.
    ///
    /// Deleting through a stale handle fails with [`Error::StaleNode`].
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::{error::Error, parented::Forest};
    ///
    /// let mut forest = Forest::new();
    /// let root = forest.new_node(2);
    /// let three = forest.insert(root, 3).unwrap();
    ///
    /// let removed = forest.delete(three).unwrap();
    /// assert_eq!(removed.value, 3);
    /// assert_eq!(removed.replacement, None);
    /// assert_eq!(forest.delete(three), Err(Error::StaleNode));
    /// ```
    pub fn delete(&mut self, id: NodeId) -> Result<Removed<T>, Error> {
        let node = self.get(id).ok_or(Error::StaleNode)?;
        let replacement = match (node.left, node.right) {
            (Some(left), Some(right)) => {
                let successor = self.minimum_of(right);
                debug!("deleting {id:?} with two children, successor is {successor:?}");

                // The successor has no left child so splicing it out is the one-child case.
                let successor_right = self.node(successor).right;
                self.replace_in_parent(successor, successor_right);

                // If the successor was our right child, our right slot now holds its old right
                // subtree, which it keeps.
                let right = self.node(id).right;
                let successor_node = self.node_mut(successor);
                successor_node.left = Some(left);
                successor_node.right = right;
                self.node_mut(left).parent = Some(successor);
                if let Some(right) = right {
                    self.node_mut(right).parent = Some(successor);
                }

                self.replace_in_parent(id, Some(successor));
                Some(successor)
            }
            (Some(child), None) | (None, Some(child)) => {
                debug!("deleting {id:?} by splicing in its only child {child:?}");
                self.replace_in_parent(id, Some(child));
                Some(child)
            }
            (None, None) => {
                debug!("deleting leaf {id:?}");
                self.replace_in_parent(id, None);
                None
            }
        };

        let value = self
            .nodes
            .take(id)
            .expect("Deleting a node implies it was live")
            .value;

        if cfg!(debug_assertions) {
            if let Some(replacement) = replacement {
                self.assert_links(replacement);
            }
        }

        Ok(Removed { value, replacement })
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<T> {
        self.nodes.live(id)
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.nodes.live_mut(id)
    }

    fn minimum_of(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left {
            id = left;
        }
        id
    }

    fn maximum_of(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.node(id).right {
            id = right;
        }
        id
    }

    /// Points whatever referenced `old` (its parent's child slot, if it has a parent) at `new`
    /// instead, and gives `new` the parent `old` had. `old`'s own links are left untouched.
    fn replace_in_parent(&mut self, old: NodeId, new: Option<NodeId>) {
        let parent = self.node(old).parent;
        if let Some(new) = new {
            self.node_mut(new).parent = parent;
        }

        let Some(parent) = parent else {
            trace!("{new:?} replaces root {old:?}");
            return;
        };
        let parent_node = self.node_mut(parent);
        if parent_node.left == Some(old) {
            parent_node.left = new;
        } else {
            debug_assert_eq!(parent_node.right, Some(old));
            parent_node.right = new;
        }
        trace!("relinked {parent:?} from {old:?} to {new:?}");
    }

    /// Asserts parent consistency between `id`, its children and its parent.
    fn assert_links(&self, id: NodeId) {
        let node = self.node(id);
        for child in [node.left, node.right].into_iter().flatten() {
            assert_eq!(self.node(child).parent, Some(id));
        }
        if let Some(parent) = node.parent {
            let parent = self.node(parent);
            assert!(parent.left == Some(id) || parent.right == Some(id));
        }
    }
}

impl<T> Forest<T>
where
    T: Ord,
{
    /// Builds a node from `value` with the given trees as its subtrees.
    ///
    /// Both subtrees must be roots of different trees, every value in `left` must be smaller than
    /// `value`, and every value in `right` must be at least `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::{error::Error, parented::Forest};
    ///
    /// let mut forest = Forest::new();
    /// let one = forest.new_node(1);
    /// let three = forest.new_node(3);
    /// assert_eq!(forest.join(0, Some(one), None), Err(Error::OrderViolation));
    ///
    /// let two = forest.join(2, Some(one), Some(three)).unwrap();
    /// assert_eq!(forest.in_order(two).copied().collect::<Vec<_>>(), [1, 2, 3]);
    /// assert_eq!(forest.get(one).unwrap().parent(), Some(two));
    /// ```
    pub fn join(
        &mut self,
        value: T,
        left: Option<NodeId>,
        right: Option<NodeId>,
    ) -> Result<NodeId, Error> {
        for child in [left, right].into_iter().flatten() {
            if !self.get(child).ok_or(Error::StaleNode)?.is_root() {
                return Err(Error::AlreadyAttached);
            }
        }
        if left.is_some() && left == right {
            return Err(Error::AlreadyAttached);
        }
        if let Some(left) = left {
            if self.node(self.maximum_of(left)).value >= value {
                return Err(Error::OrderViolation);
            }
        }
        if let Some(right) = right {
            if self.node(self.minimum_of(right)).value < value {
                return Err(Error::OrderViolation);
            }
        }

        let id = self.nodes.alloc(Node {
            value,
            left,
            right,
            parent: None,
        });
        for child in [left, right].into_iter().flatten() {
            self.node_mut(child).parent = Some(id);
        }
        trace!("joined {left:?} and {right:?} below {id:?}");
        Ok(id)
    }

    /// Inserts `value` as a new leaf of the tree rooted at `root` and returns the leaf.
    ///
    /// Smaller values go left and everything else, including equal values, goes right.
    /// Calling this on a node that has a parent fails with [`Error::NotRoot`] and leaves the tree
    /// untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::{error::Error, parented::Forest};
    ///
    /// let mut forest = Forest::new();
    /// let root = forest.new_node(1);
    /// let two = forest.insert(root, 2).unwrap();
    ///
    /// assert_eq!(forest.get(two).unwrap().parent(), Some(root));
    /// assert_eq!(forest.insert(two, 3), Err(Error::NotRoot));
    /// ```
    pub fn insert(&mut self, root: NodeId, value: T) -> Result<NodeId, Error> {
        if !self.get(root).ok_or(Error::StaleNode)?.is_root() {
            warn!("refusing to insert below {root:?} which is not a root");
            return Err(Error::NotRoot);
        }

        let mut current = root;
        loop {
            let node = self.node(current);
            let goes_left = value < node.value;
            let next = if goes_left { node.left } else { node.right };
            match next {
                Some(next) => current = next,
                None => {
                    let mut leaf = Node::new(value);
                    leaf.parent = Some(current);
                    let id = self.nodes.alloc(leaf);
                    let parent = self.node_mut(current);
                    if goes_left {
                        parent.left = Some(id);
                    } else {
                        parent.right = Some(id);
                    }
                    trace!("inserted {id:?} below {current:?}");

                    if cfg!(debug_assertions) {
                        let parent = self.node(current);
                        if let Some(left) = parent.left {
                            assert!(self.node(left).value < parent.value);
                        }
                        if let Some(right) = parent.right {
                            assert!(self.node(right).value >= parent.value);
                        }
                        self.assert_links(id);
                    }
                    return Ok(id);
                }
            }
        }
    }

    /// Finds the first node on the search path from `from` whose value equals `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::parented::Forest;
    ///
    /// let mut forest = Forest::new();
    /// let root = forest.new_node(1);
    /// let two = forest.insert(root, 2).unwrap();
    ///
    /// assert_eq!(forest.search(root, &2), Some(two));
    /// assert_eq!(forest.search(root, &42), None);
    /// ```
    pub fn search(&self, from: NodeId, value: &T) -> Option<NodeId> {
        let mut current = from;
        loop {
            let node = self.get(current)?;
            if *value == node.value {
                return Some(current);
            }
            let next = if *value < node.value {
                node.left
            } else {
                node.right
            };
            current = next?;
        }
    }

    /// Checks the ordering and parent links of the whole subtree rooted at `root`.
    pub fn validate(&self, root: NodeId) -> Result<(), Error> {
        self.get(root).ok_or(Error::StaleNode)?;

        // Bounds are an inclusive lower and an exclusive upper limit inherited from ancestors.
        let mut stack: Vec<(NodeId, Option<&T>, Option<&T>)> = vec![(root, None, None)];
        while let Some((id, lower, upper)) = stack.pop() {
            let node = self.node(id);
            if lower.is_some_and(|lower| node.value < *lower)
                || upper.is_some_and(|upper| node.value >= *upper)
            {
                return Err(Error::OrderViolation);
            }

            for (child, bounds) in [
                (node.left, (lower, Some(&node.value))),
                (node.right, (Some(&node.value), upper)),
            ] {
                let Some(child) = child else {
                    continue;
                };
                if self.get(child).map(Node::parent) != Some(Some(id)) {
                    return Err(Error::BrokenParentLink);
                }
                stack.push((child, bounds.0, bounds.1));
            }
        }
        Ok(())
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::test::quick::Op;

    /// Applies `ops` to a tree and to a multiset of expected values, returning the tree's root.
    fn do_ops<T>(
        ops: &[Op<T>],
        forest: &mut Forest<T>,
        expected: &mut BTreeMap<T, usize>,
    ) -> Option<NodeId>
    where
        T: Ord + Clone + fmt::Debug,
    {
        let mut root = None;
        for op in ops {
            match op {
                Op::Insert(value) => {
                    match root {
                        Some(root) => {
                            forest.insert(root, value.clone()).unwrap();
                        }
                        None => root = Some(forest.new_node(value.clone())),
                    }
                    *expected.entry(value.clone()).or_default() += 1;
                }
                Op::Delete(value) => {
                    let Some(found) = root.and_then(|root| forest.search(root, value)) else {
                        assert!(!expected.contains_key(value));
                        continue;
                    };
                    let removed = forest.delete(found).unwrap();
                    assert_eq!(&removed.value, value);
                    if root == Some(found) {
                        root = removed.replacement;
                    }
                    let count = expected.get_mut(value).unwrap();
                    *count -= 1;
                    if *count == 0 {
                        expected.remove(value);
                    }
                }
                Op::Validate => {
                    if let Some(root) = root {
                        assert_eq!(forest.validate(root), Ok(()));
                    }
                }
            }
        }
        root
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut forest = Forest::new();
            let mut expected = BTreeMap::new();

            let root = do_ops(&ops, &mut forest, &mut expected);
            let sorted: Vec<i8> = expected
                .iter()
                .flat_map(|(value, count)| std::iter::repeat(*value).take(*count))
                .collect();
            let traversed: Vec<i8> = root
                .map(|root| forest.in_order(root).copied().collect())
                .unwrap_or_default();

            forest.len() == sorted.len()
                && traversed == sorted
                && root.map_or(true, |root| forest.validate(root).is_ok())
        }
    }

    quickcheck::quickcheck! {
        fn every_node_round_trips_to_its_parent(ops: Vec<Op<i8>>) -> bool {
            let mut forest = Forest::new();
            do_ops(&ops, &mut forest, &mut BTreeMap::new());

            let consistent = forest.nodes.iter().all(|(id, node)| match node.parent() {
                Some(parent) => {
                    let parent = forest.node(parent);
                    parent.left() == Some(id) || parent.right() == Some(id)
                }
                None => true,
            });
            consistent
        }
    }
}
