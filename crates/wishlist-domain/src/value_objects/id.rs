//! Generic UUID-based Identifier Value Object
//!
//! Type-safe identifier using phantom types for compile-time differentiation.
//! Uses sealed trait pattern to prevent external marker implementations.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// Sealed trait module preventing external implementations
mod private {
    pub trait Sealed {}
}

/// Marker trait for type-safe ID differentiation.
///
/// This trait is sealed - external crates cannot implement it.
/// Only marker types defined in this module are valid.
pub trait IdMarker: private::Sealed + Send + Sync + 'static {}

/// Marker type for wishlist identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WishlistMarker;

/// Marker type for wishlist item identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemMarker;

/// Marker type for user identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserMarker;

/// Marker type for transaction identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionMarker;

impl private::Sealed for WishlistMarker {}
impl private::Sealed for ItemMarker {}
impl private::Sealed for UserMarker {}
impl private::Sealed for TransactionMarker {}

impl IdMarker for WishlistMarker {}
impl IdMarker for ItemMarker {}
impl IdMarker for UserMarker {}
impl IdMarker for TransactionMarker {}

/// Generic UUID-based identifier with phantom type safety.
///
/// Provides compile-time type differentiation between different ID types
/// (e.g., `WishlistId` vs `ItemId`) while sharing a single implementation.
///
/// # Type Safety
///
/// The phantom type parameter `T` ensures that different ID types cannot
/// be accidentally mixed:
///
/// ```compile_fail
/// # use wishlist_domain::value_objects::{WishlistId, ItemId};
/// let wishlist_id: WishlistId = WishlistId::new();
/// let item_id: ItemId = wishlist_id;  // Compile error!
/// ```
///
/// # Zero-Cost Abstraction
///
/// `PhantomData<T>` is a zero-sized type, so `Id<T>` has the same memory
/// layout as a plain `Uuid`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id<T: IdMarker> {
    value: Uuid,
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    /// Create new random identifier
    #[must_use]
    pub fn new() -> Self {
        Self {
            value: Uuid::new_v4(),
            _marker: PhantomData,
        }
    }

    /// Create identifier from existing UUID
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            value: uuid,
            _marker: PhantomData,
        }
    }

    /// Create identifier from string representation
    ///
    /// # Errors
    ///
    /// Returns `uuid::Error` if the string is not a valid UUID.
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self::from_uuid)
    }

    /// Get underlying UUID value
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.value
    }

    /// Get string representation
    #[must_use]
    pub fn as_str(&self) -> String {
        self.value.to_string()
    }

    /// Whether the underlying UUID is a version 4 (random) UUID.
    ///
    /// Structural validation requires v4 identities; anything else in a
    /// persisted record is treated as corruption.
    #[must_use]
    pub fn is_v4(&self) -> bool {
        self.value.get_version_num() == 4
    }
}

impl<T: IdMarker> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: IdMarker> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(std::any::type_name::<Self>())
            .field(&self.value)
            .finish()
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T: IdMarker> From<Uuid> for Id<T> {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl<T: IdMarker> From<Id<T>> for Uuid {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T: IdMarker> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, T: IdMarker> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Uuid::deserialize(deserializer).map(Self::from_uuid)
    }
}

/// Type alias for wishlist identifier
pub type WishlistId = Id<WishlistMarker>;

/// Type alias for wishlist item identifier
pub type ItemId = Id<ItemMarker>;

/// Type alias for user identifier
pub type UserId = Id<UserMarker>;

/// Type alias for transaction identifier
pub type TransactionId = Id<TransactionMarker>;
