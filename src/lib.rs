//! This crate exposes a Binary Search Tree (BST) whose nodes keep a link back to their parent,
//! mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than or equal to its own value. Equal values always go right
//!    so duplicates are allowed.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is defined as
//! the longest path from the root `Node` to a leaf `Node`). This tree does no
//! rebalancing, so inserting sorted input gives a tree whose height is `O(N)`.
//!
//! ## Parent links
//!
//! Every `Node` here also knows its parent. That makes it possible to compute a
//! node's depth and to delete a node given only a handle to it, relinking its parent
//! to whatever takes its place. The parent link must never own its target, so nodes
//! live in an arena (a [`Forest`][parented::Forest]) and all links are [`NodeId`]
//! handles into it. The third invariant is then:
//!
//! 3. A node `C` names `P` as its parent exactly when `P` names `C` as its left or
//!    right child.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod arena;
pub mod error;
pub mod parented;
mod print;
pub mod traverse;

pub use arena::NodeId;
