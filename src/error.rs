//! Errors returned by the mutating operations of [`Forest`][crate::parented::Forest].
//!
//! Absence is never an error here: a search that finds nothing returns `None`.
//! These variants are reserved for calls that break a precondition.

use thiserror::Error;

/// A precondition violation reported by a [`Forest`][crate::parented::Forest] operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// `insert` was called on a node that has a parent. Inserting below an interior node could
    /// break the ordering of the ancestors, so only roots accept inserts.
    #[error("values can only be inserted from the root of a tree")]
    NotRoot,
    /// The handle does not name a live node. Either the node was deleted or the forest was
    /// cleared.
    #[error("node handle is stale")]
    StaleNode,
    /// A subtree passed to `join` already hangs below some parent, or the same subtree was
    /// passed twice.
    #[error("subtree is already attached to a parent")]
    AlreadyAttached,
    /// A left subtree holds a value that isn't strictly smaller than its parent's, or a right
    /// subtree holds one that is smaller.
    #[error("binary search tree ordering violated")]
    OrderViolation,
    /// A node's parent link and its parent's child link disagree.
    #[error("parent and child links disagree")]
    BrokenParentLink,
}
