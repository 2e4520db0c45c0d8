//! Wishlist Domain Layer - Pure Business Logic
//!
//! This crate contains the pure domain logic for the gift registry:
//! wishlists, the items on them, and reservation/purchase transactions
//! against those items.
//!
//! A central privacy requirement shapes several invariants: purchase and
//! reservation activity is hidden from list owners. Owner-driven edits are
//! therefore validated without re-checking committed inventory, and reducing
//! an item's total quantity unconditionally prunes its reservations so the
//! owner cannot reverse-engineer purchase counts.
//!
//! ## Architecture
//!
//! Following Clean Architecture principles:
//! - **Value Objects**: Immutable, validated domain concepts (ids, priority,
//!   visibility/participation)
//! - **Entities**: Domain objects with identity (`WishlistItem`)
//! - **Aggregates**: Consistency boundaries (`Wishlist`, `Transaction`)
//! - **Ports**: Repository contracts implemented by infrastructure adapters
//!
//! Every mutator returns a brand-new instance; nothing in the core is mutated
//! in place and nothing performs I/O. Concurrency control lives entirely at
//! the persistence boundary.

#![warn(missing_docs)]

pub mod aggregates;
pub mod entities;
pub mod ports;
pub mod validation;
pub mod value_objects;

// Re-export core types
pub use aggregates::{Transaction, TransactionStatus, Wishlist};
pub use entities::WishlistItem;
pub use validation::ValidationMode;
pub use value_objects::{
    ItemId, ItemPriority, Participation, TransactionId, UserId, Visibility, WishlistId,
};

/// Domain Result type
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-specific errors
///
/// A closed taxonomy: every failure the core can produce maps onto exactly
/// one of these kinds. All are synchronous and unrecoverable within the core
/// itself; propagation to user-facing messages is the orchestration layer's
/// responsibility.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DomainError {
    /// Structural or content rule violated, or an attempt to mutate an
    /// identity/restricted field. Never retried.
    #[error("Invalid attribute: {0}")]
    InvalidAttribute(String),

    /// A reserve/purchase would exceed available capacity. A business
    /// conflict, not a bug; the caller should reload and may retry.
    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    /// An operation is not legal from the current state (over-cancel a
    /// purchase, confirm a non-reserved transaction, consume more reserved
    /// stock than exists).
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// The per-list item ceiling would be exceeded by `create`/`add_item`
    /// (never by `reconstitute`).
    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),

    /// Target entity not found, duplicate add, or cross-aggregate ownership
    /// mismatch.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl DomainError {
    /// Create an invalid attribute error
    pub fn invalid_attribute(message: impl Into<String>) -> Self {
        Self::InvalidAttribute(message.into())
    }

    /// Create an insufficient stock error
    pub fn insufficient_stock(message: impl Into<String>) -> Self {
        Self::InsufficientStock(message.into())
    }

    /// Create an invalid transition error
    pub fn invalid_transition(message: impl Into<String>) -> Self {
        Self::InvalidTransition(message.into())
    }

    /// Create a limit exceeded error
    pub fn limit_exceeded(message: impl Into<String>) -> Self {
        Self::LimitExceeded(message.into())
    }

    /// Create an invalid operation error
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation(message.into())
    }
}
