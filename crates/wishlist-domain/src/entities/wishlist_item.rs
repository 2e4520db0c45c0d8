//! Wishlist item entity with its inventory state machine
//!
//! An item tracks three quantities: the total the owner wants, the amount
//! currently reserved by gift-givers, and the amount already purchased.
//! Owners never see the latter two; that privacy requirement is why owner
//! edits are validated without the inventory tier and why shrinking
//! `total_quantity` wipes reservations instead of reconciling them.

use crate::{
    DomainError, DomainResult,
    validation::ValidationMode,
    value_objects::{ItemId, ItemPriority, WishlistId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Custom serde for ItemPriority within snapshots (ordinal form)
mod serde_priority {
    use crate::value_objects::ItemPriority;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(priority: &ItemPriority, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        priority.ordinal().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<ItemPriority, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        ItemPriority::from_ordinal(value).map_err(serde::de::Error::custom)
    }
}

/// Input for [`WishlistItem::create`].
///
/// Committed quantities are absent on purpose: a freshly authored item has
/// nothing reserved or purchased against it.
#[derive(Debug, Clone, Default)]
pub struct NewWishlistItem {
    /// Item identity (caller-generated, UUID v4)
    pub id: ItemId,
    /// Owning wishlist
    pub wishlist_id: WishlistId,
    /// Display name, 3-100 chars after trimming
    pub name: String,
    /// Optional description, at most 200 chars
    pub description: Option<String>,
    /// Priority; defaults to `Medium` when omitted
    pub priority: Option<ItemPriority>,
    /// Optional price; must be finite and non-negative
    pub price: Option<f64>,
    /// Currency code; required exactly when a price is set
    pub currency: Option<String>,
    /// Optional product link
    pub url: Option<String>,
    /// Optional image link
    pub image_url: Option<String>,
    /// Unlimited items ignore capacity checks
    pub is_unlimited: bool,
    /// Desired quantity, at least 1
    pub total_quantity: u32,
}

/// Snapshot of a [`WishlistItem`], used to persist state and to reconstitute
/// previously persisted (possibly non-compliant) records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItemProps {
    /// Item identity
    pub id: ItemId,
    /// Owning wishlist
    pub wishlist_id: WishlistId,
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Priority, serialized as its ordinal (1-4)
    #[serde(with = "serde_priority")]
    pub priority: ItemPriority,
    /// Optional price
    pub price: Option<f64>,
    /// Currency code
    pub currency: Option<String>,
    /// Optional product link
    pub url: Option<String>,
    /// Optional image link
    pub image_url: Option<String>,
    /// Unlimited items ignore capacity checks
    pub is_unlimited: bool,
    /// Desired quantity
    pub total_quantity: u32,
    /// Quantity currently held by reservations
    pub reserved_quantity: u32,
    /// Quantity already purchased
    pub purchased_quantity: u32,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last mutation time
    pub updated_at: DateTime<Utc>,
}

/// Partial update for [`WishlistItem::update`].
///
/// Identity, `wishlist_id` and the committed quantities are deliberately not
/// representable here; reassignment goes through
/// [`WishlistItem::update_wishlist_id`] and committed quantities only move
/// through the reserve/purchase operations.
///
/// `None` leaves a field untouched; for optional fields, `Some(None)` clears
/// the current value.
#[derive(Debug, Clone, Default)]
pub struct WishlistItemUpdate {
    /// New display name
    pub name: Option<String>,
    /// New description (`Some(None)` clears it)
    pub description: Option<Option<String>>,
    /// New priority
    pub priority: Option<ItemPriority>,
    /// New price (`Some(None)` clears it)
    pub price: Option<Option<f64>>,
    /// New currency (`Some(None)` clears it)
    pub currency: Option<Option<String>>,
    /// New product link (`Some(None)` clears it)
    pub url: Option<Option<String>>,
    /// New image link (`Some(None)` clears it)
    pub image_url: Option<Option<String>>,
    /// Toggle unlimited capacity
    pub is_unlimited: Option<bool>,
    /// New desired quantity; reducing it prunes all reservations
    pub total_quantity: Option<u32>,
}

/// A single entry on a wishlist, with its inventory lifecycle.
///
/// Immutable: every operation returns a brand-new instance.
#[derive(Debug, Clone, PartialEq)]
pub struct WishlistItem {
    id: ItemId,
    wishlist_id: WishlistId,
    name: String,
    description: Option<String>,
    priority: ItemPriority,
    price: Option<f64>,
    currency: Option<String>,
    url: Option<String>,
    image_url: Option<String>,
    is_unlimited: bool,
    total_quantity: u32,
    reserved_quantity: u32,
    purchased_quantity: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl WishlistItem {
    /// Minimum name length after trimming
    pub const NAME_MIN: usize = 3;
    /// Maximum name length
    pub const NAME_MAX: usize = 100;
    /// Maximum description length
    pub const DESCRIPTION_MAX: usize = 200;

    /// Create a new item with full (strict) validation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAttribute` when any structural, content
    /// or inventory rule is violated.
    pub fn create(props: NewWishlistItem) -> DomainResult<Self> {
        let now = Utc::now();
        let item = Self {
            id: props.id,
            wishlist_id: props.wishlist_id,
            name: props.name.trim().to_string(),
            description: props.description,
            priority: props.priority.unwrap_or_default(),
            price: props.price,
            currency: props.currency,
            url: props.url,
            image_url: props.image_url,
            is_unlimited: props.is_unlimited,
            total_quantity: props.total_quantity,
            reserved_quantity: 0,
            purchased_quantity: 0,
            created_at: now,
            updated_at: now,
        };
        item.validate(ValidationMode::Strict)?;
        Ok(item)
    }

    /// Rebuild an item from a persisted snapshot.
    ///
    /// Only structural rules apply: legacy records that no longer satisfy
    /// current content rules, or that are over-committed, must stay loadable.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAttribute` for structurally corrupt data.
    pub fn reconstitute(props: WishlistItemProps) -> DomainResult<Self> {
        let item = Self {
            id: props.id,
            wishlist_id: props.wishlist_id,
            name: props.name,
            description: props.description,
            priority: props.priority,
            price: props.price,
            currency: props.currency,
            url: props.url,
            image_url: props.image_url,
            is_unlimited: props.is_unlimited,
            total_quantity: props.total_quantity,
            reserved_quantity: props.reserved_quantity,
            purchased_quantity: props.purchased_quantity,
            created_at: props.created_at,
            updated_at: props.updated_at,
        };
        item.validate(ValidationMode::Structural)?;
        Ok(item)
    }

    /// Item identity
    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Owning wishlist
    #[must_use]
    pub fn wishlist_id(&self) -> WishlistId {
        self.wishlist_id
    }

    /// Display name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional description
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Priority
    #[must_use]
    pub fn priority(&self) -> ItemPriority {
        self.priority
    }

    /// Optional price
    #[must_use]
    pub fn price(&self) -> Option<f64> {
        self.price
    }

    /// Currency code, present exactly when a price is set on valid records
    #[must_use]
    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    /// Product link
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Image link
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Whether capacity checks are skipped for this item
    #[must_use]
    pub fn is_unlimited(&self) -> bool {
        self.is_unlimited
    }

    /// Desired quantity
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.total_quantity
    }

    /// Quantity currently held by reservations
    #[must_use]
    pub fn reserved_quantity(&self) -> u32 {
        self.reserved_quantity
    }

    /// Quantity already purchased
    #[must_use]
    pub fn purchased_quantity(&self) -> u32 {
        self.purchased_quantity
    }

    /// Creation time
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last mutation time
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Quantity still open for reservation or purchase.
    ///
    /// Never negative: over-committed legacy records clamp to zero.
    #[must_use]
    pub fn available_quantity(&self) -> u32 {
        self.total_quantity
            .saturating_sub(self.reserved_quantity.saturating_add(self.purchased_quantity))
    }

    /// Reserve `amount` units for a gift-giver.
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidAttribute` when `amount` is zero.
    /// - `DomainError::InsufficientStock` when the item is not unlimited and
    ///   `amount` exceeds the available quantity.
    pub fn reserve(&self, amount: u32) -> DomainResult<Self> {
        if amount == 0 {
            return Err(DomainError::invalid_attribute(
                "reservation amount must be a positive integer",
            ));
        }
        if !self.is_unlimited && amount > self.available_quantity() {
            return Err(DomainError::insufficient_stock(format!(
                "requested {amount}, available {}",
                self.available_quantity()
            )));
        }

        let next = Self {
            reserved_quantity: self.reserved_quantity.saturating_add(amount),
            updated_at: Utc::now(),
            ..self.clone()
        };
        next.validate(ValidationMode::Transaction)?;
        Ok(next)
    }

    /// Release up to `amount` reserved units.
    ///
    /// Over-cancellation clamps silently to zero rather than erroring:
    /// releasing a hold must never fail on stale counts. Reducing commitment
    /// is always safe, so only structural validation applies.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAttribute` when `amount` is zero.
    pub fn cancel_reservation(&self, amount: u32) -> DomainResult<Self> {
        if amount == 0 {
            return Err(DomainError::invalid_attribute(
                "cancellation amount must be a positive integer",
            ));
        }

        let next = Self {
            reserved_quantity: self.reserved_quantity.saturating_sub(amount),
            updated_at: Utc::now(),
            ..self.clone()
        };
        next.validate(ValidationMode::Structural)?;
        Ok(next)
    }

    /// Record a purchase of `total_amount` units, converting
    /// `consume_from_reserved` of them from an existing reservation.
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidAttribute` when `total_amount` is zero.
    /// - `DomainError::InvalidTransition` when `consume_from_reserved`
    ///   exceeds the reserved quantity or `total_amount`.
    /// - `DomainError::InsufficientStock` when the non-reserved remainder
    ///   exceeds the available quantity (unless unlimited).
    pub fn purchase(&self, total_amount: u32, consume_from_reserved: u32) -> DomainResult<Self> {
        if total_amount == 0 {
            return Err(DomainError::invalid_attribute(
                "purchase amount must be a positive integer",
            ));
        }
        if consume_from_reserved > self.reserved_quantity {
            return Err(DomainError::invalid_transition(format!(
                "cannot consume {consume_from_reserved} reserved units, only {} reserved",
                self.reserved_quantity
            )));
        }
        if consume_from_reserved > total_amount {
            return Err(DomainError::invalid_transition(
                "reserved consumption cannot exceed the purchase amount",
            ));
        }

        let remainder = total_amount - consume_from_reserved;
        if !self.is_unlimited && remainder > self.available_quantity() {
            return Err(DomainError::insufficient_stock(format!(
                "requested {remainder} beyond reservation, available {}",
                self.available_quantity()
            )));
        }

        let next = Self {
            purchased_quantity: self.purchased_quantity.saturating_add(total_amount),
            reserved_quantity: self.reserved_quantity - consume_from_reserved,
            updated_at: Utc::now(),
            ..self.clone()
        };
        next.validate(ValidationMode::Transaction)?;
        Ok(next)
    }

    /// Undo a purchase of `amount` units.
    ///
    /// Does not restore any reservation; re-reserving is a separate explicit
    /// [`WishlistItem::reserve`] call.
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidAttribute` when `amount` is zero.
    /// - `DomainError::InvalidTransition` when `amount` exceeds the
    ///   purchased quantity.
    pub fn cancel_purchase(&self, amount: u32) -> DomainResult<Self> {
        if amount == 0 {
            return Err(DomainError::invalid_attribute(
                "cancellation amount must be a positive integer",
            ));
        }
        if amount > self.purchased_quantity {
            return Err(DomainError::invalid_transition(format!(
                "cannot cancel {amount} purchased units, only {} purchased",
                self.purchased_quantity
            )));
        }

        let next = Self {
            purchased_quantity: self.purchased_quantity - amount,
            updated_at: Utc::now(),
            ..self.clone()
        };
        next.validate(ValidationMode::Structural)?;
        Ok(next)
    }

    /// Apply an owner-driven edit.
    ///
    /// Validated in evolutive mode: content rules apply, but the inventory
    /// invariant is not re-checked. An item may therefore end up
    /// over-committed after its total shrinks, which is accepted to keep
    /// hidden purchase counts hidden.
    ///
    /// Shrinking `total_quantity` resets `reserved_quantity` to zero
    /// unconditionally, so the owner cannot infer purchase counts from
    /// reservation pruning math.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAttribute` when a content rule is
    /// violated by the edited item.
    pub fn update(&self, update: WishlistItemUpdate) -> DomainResult<Self> {
        let mut next = self.clone();
        if let Some(name) = update.name {
            next.name = name.trim().to_string();
        }
        if let Some(description) = update.description {
            next.description = description;
        }
        if let Some(priority) = update.priority {
            next.priority = priority;
        }
        if let Some(price) = update.price {
            next.price = price;
        }
        if let Some(currency) = update.currency {
            next.currency = currency;
        }
        if let Some(url) = update.url {
            next.url = url;
        }
        if let Some(image_url) = update.image_url {
            next.image_url = image_url;
        }
        if let Some(is_unlimited) = update.is_unlimited {
            next.is_unlimited = is_unlimited;
        }
        if let Some(total) = update.total_quantity {
            if total < next.total_quantity {
                next.reserved_quantity = 0;
            }
            next.total_quantity = total;
        }
        next.updated_at = Utc::now();

        next.validate(ValidationMode::Evolutive)?;
        Ok(next)
    }

    /// Reassign the item to another wishlist.
    ///
    /// Returns an unchanged clone when the target equals the current owner.
    /// Only structural validation applies, so over-committed items can still
    /// be moved between lists.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAttribute` for structurally invalid ids.
    pub fn update_wishlist_id(&self, new_id: WishlistId) -> DomainResult<Self> {
        if new_id == self.wishlist_id {
            return Ok(self.clone());
        }

        let next = Self {
            wishlist_id: new_id,
            updated_at: Utc::now(),
            ..self.clone()
        };
        next.validate(ValidationMode::Structural)?;
        Ok(next)
    }

    /// Snapshot of the current state for persistence.
    #[must_use]
    pub fn props(&self) -> WishlistItemProps {
        WishlistItemProps {
            id: self.id,
            wishlist_id: self.wishlist_id,
            name: self.name.clone(),
            description: self.description.clone(),
            priority: self.priority,
            price: self.price,
            currency: self.currency.clone(),
            url: self.url.clone(),
            image_url: self.image_url.clone(),
            is_unlimited: self.is_unlimited,
            total_quantity: self.total_quantity,
            reserved_quantity: self.reserved_quantity,
            purchased_quantity: self.purchased_quantity,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn validate(&self, mode: ValidationMode) -> DomainResult<()> {
        // Structural tier: always enforced
        if !self.id.is_v4() {
            return Err(DomainError::invalid_attribute("item id must be a UUID v4"));
        }
        if !self.wishlist_id.is_v4() {
            return Err(DomainError::invalid_attribute(
                "wishlist id must be a UUID v4",
            ));
        }

        if mode.checks_content() {
            self.validate_content()?;
        }

        if mode.checks_inventory() && !self.is_unlimited {
            let committed =
                u64::from(self.reserved_quantity) + u64::from(self.purchased_quantity);
            if u64::from(self.total_quantity) < committed {
                return Err(DomainError::insufficient_stock(format!(
                    "total quantity {} below committed quantity {committed}",
                    self.total_quantity
                )));
            }
        }

        Ok(())
    }

    fn validate_content(&self) -> DomainResult<()> {
        let name_len = self.name.trim().chars().count();
        if name_len < Self::NAME_MIN || name_len > Self::NAME_MAX {
            return Err(DomainError::invalid_attribute(format!(
                "name must be {}-{} characters, got {name_len}",
                Self::NAME_MIN,
                Self::NAME_MAX
            )));
        }

        if let Some(description) = &self.description {
            if description.chars().count() > Self::DESCRIPTION_MAX {
                return Err(DomainError::invalid_attribute(format!(
                    "description must be at most {} characters",
                    Self::DESCRIPTION_MAX
                )));
            }
        }

        match (&self.price, &self.currency) {
            (Some(price), Some(currency)) => {
                if !price.is_finite() || *price < 0.0 {
                    return Err(DomainError::invalid_attribute(
                        "price must be a finite, non-negative number",
                    ));
                }
                if currency.trim().is_empty() {
                    return Err(DomainError::invalid_attribute("currency must not be empty"));
                }
            }
            (Some(_), None) => {
                return Err(DomainError::invalid_attribute(
                    "currency is required when a price is set",
                ));
            }
            (None, Some(_)) => {
                return Err(DomainError::invalid_attribute(
                    "currency without a price is not allowed",
                ));
            }
            (None, None) => {}
        }

        for (field, value) in [("url", &self.url), ("image_url", &self.image_url)] {
            if let Some(value) = value {
                if Url::parse(value).is_err() {
                    return Err(DomainError::invalid_attribute(format!(
                        "{field} must be a valid URL"
                    )));
                }
            }
        }

        if self.total_quantity < 1 {
            return Err(DomainError::invalid_attribute(
                "total quantity must be at least 1",
            ));
        }

        Ok(())
    }
}
