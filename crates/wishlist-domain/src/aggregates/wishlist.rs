//! Wishlist aggregate
//!
//! Owns an ordered collection of items, enforces membership/ownership and the
//! per-list ceiling, and exposes cascading operations that delegate into item
//! behavior and splice the result back in.

use crate::{
    DomainError, DomainResult,
    entities::{WishlistItem, WishlistItemProps, WishlistItemUpdate},
    validation::ValidationMode,
    value_objects::{ItemId, Participation, UserId, Visibility, WishlistId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Input for [`Wishlist::create`].
///
/// `visibility` and `participation` are required explicitly; the aggregate
/// does not guess defaults for them.
#[derive(Debug, Clone)]
pub struct NewWishlist {
    /// Wishlist identity (caller-generated, UUID v4)
    pub id: WishlistId,
    /// Owning user
    pub owner_id: UserId,
    /// Title, 3-100 chars after trimming
    pub title: String,
    /// Optional description, at most 500 chars
    pub description: Option<String>,
    /// Who can view the list
    pub visibility: Visibility,
    /// Who can reserve or purchase against it
    pub participation: Participation,
    /// Seeded items; claimed by this list and counted against the ceiling
    pub items: Vec<WishlistItem>,
}

/// Snapshot of a [`Wishlist`] for persistence and reconstitution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistProps {
    /// Wishlist identity
    pub id: WishlistId,
    /// Owning user
    pub owner_id: UserId,
    /// Title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Who can view the list
    pub visibility: Visibility,
    /// Who can reserve or purchase against it
    pub participation: Participation,
    /// Contained items, in order
    pub items: Vec<WishlistItemProps>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last mutation time
    pub updated_at: DateTime<Utc>,
}

/// Partial update for [`Wishlist::update`].
///
/// Identity and `owner_id` are not representable here; only the four
/// owner-editable fields are.
#[derive(Debug, Clone, Default)]
pub struct WishlistUpdate {
    /// New title
    pub title: Option<String>,
    /// New description (`Some(None)` clears it)
    pub description: Option<Option<String>>,
    /// New visibility
    pub visibility: Option<Visibility>,
    /// New participation policy
    pub participation: Option<Participation>,
}

/// A gift registry list owned by a single user.
///
/// Immutable: every operation returns a brand-new instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Wishlist {
    id: WishlistId,
    owner_id: UserId,
    title: String,
    description: Option<String>,
    visibility: Visibility,
    participation: Participation,
    items: Vec<WishlistItem>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Wishlist {
    /// Maximum number of items enforced on `create`/`add_item`
    pub const MAX_ITEMS: usize = 100;
    /// Minimum title length after trimming
    pub const TITLE_MIN: usize = 3;
    /// Maximum title length
    pub const TITLE_MAX: usize = 100;
    /// Maximum description length
    pub const DESCRIPTION_MAX: usize = 500;

    /// Create a new wishlist with full (strict) validation.
    ///
    /// Seeded items are forcibly claimed by this list.
    ///
    /// # Errors
    ///
    /// - `DomainError::LimitExceeded` when more than
    ///   [`Wishlist::MAX_ITEMS`] items are seeded.
    /// - `DomainError::InvalidOperation` on duplicate seeded item ids.
    /// - `DomainError::InvalidAttribute` when a structural or content rule
    ///   is violated.
    pub fn create(props: NewWishlist) -> DomainResult<Self> {
        if props.items.len() > Self::MAX_ITEMS {
            return Err(DomainError::limit_exceeded(format!(
                "wishlist cannot hold more than {} items",
                Self::MAX_ITEMS
            )));
        }

        let mut items: Vec<WishlistItem> = Vec::with_capacity(props.items.len());
        for item in props.items {
            let claimed = item.update_wishlist_id(props.id)?;
            if items.iter().any(|existing| existing.id() == claimed.id()) {
                return Err(DomainError::invalid_operation(format!(
                    "item {} already exists in wishlist",
                    claimed.id()
                )));
            }
            items.push(claimed);
        }

        let now = Utc::now();
        let wishlist = Self {
            id: props.id,
            owner_id: props.owner_id,
            title: props.title.trim().to_string(),
            description: props.description,
            visibility: props.visibility,
            participation: props.participation,
            items,
            created_at: now,
            updated_at: now,
        };
        wishlist.validate(ValidationMode::Strict)?;
        Ok(wishlist)
    }

    /// Rebuild a wishlist from a persisted snapshot.
    ///
    /// The item ceiling and title/description length rules are not applied,
    /// so legacy lists that already exceed them stay loadable. The ownership
    /// invariant (every item's `wishlist_id` equals this list's id) is still
    /// enforced; a mismatch is corruption, not legacy drift.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAttribute` for structurally corrupt data.
    pub fn reconstitute(props: WishlistProps) -> DomainResult<Self> {
        let items = props
            .items
            .into_iter()
            .map(WishlistItem::reconstitute)
            .collect::<DomainResult<Vec<_>>>()?;

        let wishlist = Self {
            id: props.id,
            owner_id: props.owner_id,
            title: props.title,
            description: props.description,
            visibility: props.visibility,
            participation: props.participation,
            items,
            created_at: props.created_at,
            updated_at: props.updated_at,
        };
        wishlist.validate(ValidationMode::Structural)?;
        Ok(wishlist)
    }

    /// Wishlist identity
    #[must_use]
    pub fn id(&self) -> WishlistId {
        self.id
    }

    /// Owning user
    #[must_use]
    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Optional description
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Who can view the list
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Who can reserve or purchase against it
    #[must_use]
    pub fn participation(&self) -> Participation {
        self.participation
    }

    /// Contained items, in order
    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    /// Look up a contained item by id
    #[must_use]
    pub fn item(&self, item_id: ItemId) -> Option<&WishlistItem> {
        self.items.iter().find(|item| item.id() == item_id)
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

    /// Add an item, forcibly claiming it for this list.
    ///
    /// Item-level rules were already checked when the item was built, so the
    /// result is validated structurally.
    ///
    /// # Errors
    ///
    /// - `DomainError::LimitExceeded` when the list already holds
    ///   [`Wishlist::MAX_ITEMS`] items.
    /// - `DomainError::InvalidOperation` when an item with the same id is
    ///   already present.
    pub fn add_item(&self, item: WishlistItem) -> DomainResult<Self> {
        if self.items.len() >= Self::MAX_ITEMS {
            return Err(DomainError::limit_exceeded(format!(
                "wishlist cannot hold more than {} items",
                Self::MAX_ITEMS
            )));
        }

        let claimed = item.update_wishlist_id(self.id)?;
        if self.items.iter().any(|existing| existing.id() == claimed.id()) {
            return Err(DomainError::invalid_operation(format!(
                "item {} already exists in wishlist",
                claimed.id()
            )));
        }

        let mut items = self.items.clone();
        items.push(claimed);
        let next = Self {
            items,
            updated_at: Utc::now(),
            ..self.clone()
        };
        next.validate(ValidationMode::Structural)?;
        Ok(next)
    }

    /// Remove an item by id.
    ///
    /// Idempotent: when the id is absent, returns an unchanged clone and
    /// `None` instead of erroring.
    #[must_use]
    pub fn remove_item(&self, item_id: ItemId) -> (Self, Option<WishlistItem>) {
        let Some(index) = self.items.iter().position(|item| item.id() == item_id) else {
            return (self.clone(), None);
        };

        let mut items = self.items.clone();
        let removed = items.remove(index);
        let next = Self {
            items,
            updated_at: Utc::now(),
            ..self.clone()
        };
        (next, Some(removed))
    }

    /// Apply an owner-driven edit to a contained item.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidOperation` when the item is absent; otherwise
    /// whatever [`WishlistItem::update`] returns.
    pub fn update_item(&self, item_id: ItemId, update: WishlistItemUpdate) -> DomainResult<Self> {
        self.with_item(item_id, |item| item.update(update))
    }

    /// Reserve quantity against a contained item.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidOperation` when the item is absent; otherwise
    /// whatever [`WishlistItem::reserve`] returns.
    pub fn reserve_item(&self, item_id: ItemId, amount: u32) -> DomainResult<Self> {
        self.with_item(item_id, |item| item.reserve(amount))
    }

    /// Record a purchase against a contained item.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidOperation` when the item is absent; otherwise
    /// whatever [`WishlistItem::purchase`] returns.
    pub fn purchase_item(
        &self,
        item_id: ItemId,
        total_amount: u32,
        consume_from_reserved: u32,
    ) -> DomainResult<Self> {
        self.with_item(item_id, |item| item.purchase(total_amount, consume_from_reserved))
    }

    /// Release reserved quantity on a contained item.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidOperation` when the item is absent; otherwise
    /// whatever [`WishlistItem::cancel_reservation`] returns.
    pub fn cancel_item_reservation(&self, item_id: ItemId, amount: u32) -> DomainResult<Self> {
        self.with_item(item_id, |item| item.cancel_reservation(amount))
    }

    /// Undo purchased quantity on a contained item.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidOperation` when the item is absent; otherwise
    /// whatever [`WishlistItem::cancel_purchase`] returns.
    pub fn cancel_item_purchase(&self, item_id: ItemId, amount: u32) -> DomainResult<Self> {
        self.with_item(item_id, |item| item.cancel_purchase(amount))
    }

    /// Apply an owner-driven edit to the list itself.
    ///
    /// Only title, description, visibility and participation are mutable.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAttribute` when a content rule is
    /// violated by the edited list.
    pub fn update(&self, update: WishlistUpdate) -> DomainResult<Self> {
        let mut next = self.clone();
        if let Some(title) = update.title {
            next.title = title.trim().to_string();
        }
        if let Some(description) = update.description {
            next.description = description;
        }
        if let Some(visibility) = update.visibility {
            next.visibility = visibility;
        }
        if let Some(participation) = update.participation {
            next.participation = participation;
        }
        next.updated_at = Utc::now();

        next.validate(ValidationMode::Strict)?;
        Ok(next)
    }

    /// Snapshot of the current state for persistence.
    #[must_use]
    pub fn props(&self) -> WishlistProps {
        WishlistProps {
            id: self.id,
            owner_id: self.owner_id,
            title: self.title.clone(),
            description: self.description.clone(),
            visibility: self.visibility,
            participation: self.participation,
            items: self.items.iter().map(WishlistItem::props).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn with_item<F>(&self, item_id: ItemId, op: F) -> DomainResult<Self>
    where
        F: FnOnce(&WishlistItem) -> DomainResult<WishlistItem>,
    {
        let index = self
            .items
            .iter()
            .position(|item| item.id() == item_id)
            .ok_or_else(|| DomainError::invalid_operation("item not found"))?;

        let updated = op(&self.items[index])?;
        let mut items = self.items.clone();
        items[index] = updated;
        Ok(Self {
            items,
            updated_at: Utc::now(),
            ..self.clone()
        })
    }

    fn validate(&self, mode: ValidationMode) -> DomainResult<()> {
        // Structural tier: always enforced
        if !self.id.is_v4() {
            return Err(DomainError::invalid_attribute(
                "wishlist id must be a UUID v4",
            ));
        }
        if !self.owner_id.is_v4() {
            return Err(DomainError::invalid_attribute("owner id must be a UUID v4"));
        }
        for item in &self.items {
            if item.wishlist_id() != self.id {
                return Err(DomainError::invalid_operation(format!(
                    "item {} belongs to another wishlist",
                    item.id()
                )));
            }
        }

        if mode.checks_content() {
            let title_len = self.title.trim().chars().count();
            if title_len < Self::TITLE_MIN || title_len > Self::TITLE_MAX {
                return Err(DomainError::invalid_attribute(format!(
                    "title must be {}-{} characters, got {title_len}",
                    Self::TITLE_MIN,
                    Self::TITLE_MAX
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
        }

        Ok(())
    }
}
