//! Domain Value Objects
//!
//! Immutable objects that represent concepts in the domain
//! with no conceptual identity, only defined by their attributes.

mod audience;
mod id;
mod priority;

pub use audience::{Participation, Visibility};
pub use id::{
    Id, IdMarker, ItemId, ItemMarker, TransactionId, TransactionMarker, UserId, UserMarker,
    WishlistId, WishlistMarker,
};
pub use priority::ItemPriority;
