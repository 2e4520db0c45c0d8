//! Aggregates - consistency boundaries whose invariants are enforced as a unit

pub mod transaction;
pub mod wishlist;

pub use transaction::{Transaction, TransactionProps, TransactionStatus};
pub use wishlist::{NewWishlist, Wishlist, WishlistProps, WishlistUpdate};
