//! Domain entities - objects with persistent identity across mutations

pub mod wishlist_item;

pub use wishlist_item::{NewWishlistItem, WishlistItem, WishlistItemProps, WishlistItemUpdate};
