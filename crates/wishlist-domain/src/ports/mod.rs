//! Repository ports for data persistence
//!
//! These ports define the domain's requirements for storage and identity
//! lookup, allowing infrastructure adapters to implement various backends.
//! The core itself performs no I/O; orchestration loads a snapshot through a
//! port, calls a behavior method and persists the returned instance.
//! Optimistic concurrency and retry policy live behind these contracts, not
//! in the aggregates.

use crate::{
    DomainResult,
    aggregates::{Transaction, Wishlist},
    value_objects::{ItemId, TransactionId, UserId, WishlistId},
};
use async_trait::async_trait;

/// Store for wishlist aggregates
#[async_trait]
pub trait WishlistRepository: Send + Sync {
    /// Find a wishlist by id
    async fn find_by_id(&self, id: WishlistId) -> DomainResult<Option<Wishlist>>;

    /// Find all wishlists owned by a user
    async fn find_by_owner(&self, owner_id: UserId) -> DomainResult<Vec<Wishlist>>;

    /// Persist a wishlist snapshot
    async fn save(&self, wishlist: Wishlist) -> DomainResult<()>;

    /// Delete a wishlist and its items
    async fn delete(&self, id: WishlistId) -> DomainResult<()>;
}

/// Store for reservation/purchase transactions
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Find a transaction by id
    async fn find_by_id(&self, id: TransactionId) -> DomainResult<Option<Transaction>>;

    /// Find all transactions against an item
    async fn find_by_item(&self, item_id: ItemId) -> DomainResult<Vec<Transaction>>;

    /// Persist a transaction snapshot
    async fn save(&self, transaction: Transaction) -> DomainResult<()>;

    /// Cancel every open reservation against an item, returning how many
    /// were cancelled. Used when an item is removed from its list.
    async fn cancel_reservations_for_item(&self, item_id: ItemId) -> DomainResult<u64>;
}

/// Lookup for the acting identity
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The current user's id, or `None` for anonymous guests
    async fn current_user_id(&self) -> DomainResult<Option<UserId>>;
}
