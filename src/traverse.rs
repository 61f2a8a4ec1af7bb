//! Depth-first walks over a subtree of a [`Forest`].
//!
//! Every walk is a lazy iterator driven by an explicit stack, so even a completely unbalanced
//! tree (e.g. one built from sorted input) can't overflow the call stack. Each call produces a
//! fresh iterator; a walk from a stale handle yields nothing.

use std::iter::FusedIterator;

use crate::{parented::Forest, NodeId};

/// Which order a walk visits a node relative to its subtrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    /// Left subtree, node, right subtree. Yields values in sorted order.
    InOrder,
    /// Node, left subtree, right subtree.
    PreOrder,
    /// Left subtree, right subtree, node.
    PostOrder,
}

impl<T> Forest<T> {
    /// Values of the subtree rooted at `from`, smallest first.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::parented::Forest;
    ///
    /// let mut forest = Forest::new();
    /// let root = forest.new_node(2);
    /// forest.insert(root, 3).unwrap();
    /// forest.insert(root, 1).unwrap();
    ///
    /// assert_eq!(forest.in_order(root).collect::<Vec<_>>(), [&1, &2, &3]);
    /// ```
    pub fn in_order(&self, from: NodeId) -> InOrder<'_, T> {
        InOrder {
            forest: self,
            stack: Vec::new(),
            current: self.contains(from).then_some(from),
        }
    }

    /// Values of the subtree rooted at `from`, each node before its subtrees.
    pub fn pre_order(&self, from: NodeId) -> PreOrder<'_, T> {
        PreOrder {
            forest: self,
            stack: self.contains(from).then_some(from).into_iter().collect(),
        }
    }

    /// Values of the subtree rooted at `from`, each node after its subtrees.
    pub fn post_order(&self, from: NodeId) -> PostOrder<'_, T> {
        PostOrder {
            forest: self,
            stack: self
                .contains(from)
                .then_some((from, false))
                .into_iter()
                .collect(),
        }
    }

    /// Walks the subtree rooted at `from` in the given `order`.
    pub fn traverse(&self, from: NodeId, order: Order) -> Traversal<'_, T> {
        match order {
            Order::InOrder => Traversal::InOrder(self.in_order(from)),
            Order::PreOrder => Traversal::PreOrder(self.pre_order(from)),
            Order::PostOrder => Traversal::PostOrder(self.post_order(from)),
        }
    }
}

/// Iterator returned by [`Forest::in_order`].
pub struct InOrder<'a, T> {
    forest: &'a Forest<T>,
    /// Nodes whose left subtree is being walked.
    stack: Vec<NodeId>,
    /// Root of the next subtree to descend into.
    current: Option<NodeId>,
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.current {
            self.stack.push(id);
            self.current = self.forest.node(id).left();
        }

        let node = self.forest.node(self.stack.pop()?);
        self.current = node.right();
        Some(node.value())
    }
}

impl<T> FusedIterator for InOrder<'_, T> {}

/// Iterator returned by [`Forest::pre_order`].
pub struct PreOrder<'a, T> {
    forest: &'a Forest<T>,
    stack: Vec<NodeId>,
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.forest.node(self.stack.pop()?);
        // Right first so the left subtree comes off the stack first.
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        Some(node.value())
    }
}

impl<T> FusedIterator for PreOrder<'_, T> {}

/// Iterator returned by [`Forest::post_order`].
pub struct PostOrder<'a, T> {
    forest: &'a Forest<T>,
    /// The flag is set once a node's children have been pushed.
    stack: Vec<(NodeId, bool)>,
}

impl<'a, T> Iterator for PostOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (id, expanded) = self.stack.pop()?;
            let node = self.forest.node(id);
            if expanded {
                return Some(node.value());
            }

            self.stack.push((id, true));
            self.stack.extend(node.right().map(|right| (right, false)));
            self.stack.extend(node.left().map(|left| (left, false)));
        }
    }
}

impl<T> FusedIterator for PostOrder<'_, T> {}

/// Iterator returned by [`Forest::traverse`].
pub enum Traversal<'a, T> {
    /// See [`Forest::in_order`].
    InOrder(InOrder<'a, T>),
    /// See [`Forest::pre_order`].
    PreOrder(PreOrder<'a, T>),
    /// See [`Forest::post_order`].
    PostOrder(PostOrder<'a, T>),
}

impl<'a, T> Iterator for Traversal<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::InOrder(walk) => walk.next(),
            Self::PreOrder(walk) => walk.next(),
            Self::PostOrder(walk) => walk.next(),
        }
    }
}

impl<T> FusedIterator for Traversal<'_, T> {}
