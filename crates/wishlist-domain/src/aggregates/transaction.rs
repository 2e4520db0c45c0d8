//! Transaction aggregate - reservation/purchase lifecycle
//!
//! A transaction records a hold (reservation) or a committed consumption
//! (purchase) of quantity against an item, by either a registered user or an
//! anonymous guest session. It references the item and the identity by id
//! only; after a soft delete of either, those references go null and the
//! record becomes orphaned but must remain cancellable.

use crate::{
    DomainError, DomainResult,
    validation::ValidationMode,
    value_objects::{ItemId, TransactionId, UserId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a transaction.
///
/// `Reserved -> Purchased` via `confirm_purchase`; `Reserved`/`Purchased`
/// `-> Cancelled` via `cancel`. `Cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// A hold on quantity, not yet a purchase
    Reserved,
    /// Committed consumption of quantity
    Purchased,
    /// Terminal: the hold or purchase was undone
    Cancelled,
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reserved => write!(f, "RESERVED"),
            Self::Purchased => write!(f, "PURCHASED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Snapshot of a [`Transaction`] for persistence and reconstitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionProps {
    /// Transaction identity
    pub id: TransactionId,
    /// Target item; `None` after the item was soft-deleted
    pub item_id: Option<ItemId>,
    /// Registered holder, if any
    pub user_id: Option<UserId>,
    /// Guest session holder, if any
    pub guest_session_id: Option<String>,
    /// Lifecycle state
    pub status: TransactionStatus,
    /// Quantity held or consumed
    pub quantity: u32,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last transition time
    pub updated_at: DateTime<Utc>,
}

/// A reservation or purchase of quantity against an item.
///
/// Immutable: every transition returns a brand-new instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    id: TransactionId,
    item_id: Option<ItemId>,
    user_id: Option<UserId>,
    guest_session_id: Option<String>,
    status: TransactionStatus,
    quantity: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a reservation. Only registered users can reserve, so the
    /// holder is a mandatory `UserId`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAttribute` when `quantity` is zero or a
    /// structural rule is violated.
    pub fn create_reservation(
        item_id: ItemId,
        user_id: UserId,
        quantity: u32,
    ) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::invalid_attribute(
                "reservation quantity must be a positive integer",
            ));
        }

        let now = Utc::now();
        let transaction = Self {
            id: TransactionId::new(),
            item_id: Some(item_id),
            user_id: Some(user_id),
            guest_session_id: None,
            status: TransactionStatus::Reserved,
            quantity,
            created_at: now,
            updated_at: now,
        };
        transaction.validate(ValidationMode::Strict)?;
        Ok(transaction)
    }

    /// Create a direct purchase, by either a registered user or a guest
    /// session - exactly one of the two.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAttribute` when both or neither identity
    /// is given, when a present guest session id is empty, or when
    /// `quantity` is zero.
    pub fn create_purchase(
        item_id: ItemId,
        user_id: Option<UserId>,
        guest_session_id: Option<String>,
        quantity: u32,
    ) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::invalid_attribute(
                "purchase quantity must be a positive integer",
            ));
        }

        let now = Utc::now();
        let transaction = Self {
            id: TransactionId::new(),
            item_id: Some(item_id),
            user_id,
            guest_session_id,
            status: TransactionStatus::Purchased,
            quantity,
            created_at: now,
            updated_at: now,
        };
        transaction.validate(ValidationMode::Strict)?;
        Ok(transaction)
    }

    /// Rebuild a transaction from a persisted snapshot.
    ///
    /// The identity XOR rule is partially relaxed here: a soft-deleted user
    /// may leave both holder fields null, and such records must stay
    /// loadable. Both fields set is still rejected as corrupt.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAttribute` for structurally corrupt data.
    pub fn reconstitute(props: TransactionProps) -> DomainResult<Self> {
        let transaction = Self {
            id: props.id,
            item_id: props.item_id,
            user_id: props.user_id,
            guest_session_id: props.guest_session_id,
            status: props.status,
            quantity: props.quantity,
            created_at: props.created_at,
            updated_at: props.updated_at,
        };
        transaction.validate(ValidationMode::Structural)?;
        Ok(transaction)
    }

    /// Transaction identity
    #[must_use]
    pub fn id(&self) -> TransactionId {
        self.id
    }

    /// Target item; `None` after the item was soft-deleted
    #[must_use]
    pub fn item_id(&self) -> Option<ItemId> {
        self.item_id
    }

    /// Registered holder, if any
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    /// Guest session holder, if any
    #[must_use]
    pub fn guest_session_id(&self) -> Option<&str> {
        self.guest_session_id.as_deref()
    }

    /// Lifecycle state
    #[must_use]
    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    /// Quantity held or consumed
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Creation time
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last transition time
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether no further transition is possible
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status == TransactionStatus::Cancelled
    }

    /// Convert a reservation into a purchase.
    ///
    /// Orphaned records (null `item_id` or `user_id`) cannot be confirmed;
    /// there is nothing left to purchase against.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` when the transaction is not
    /// `Reserved` or is orphaned.
    pub fn confirm_purchase(&self) -> DomainResult<Self> {
        if self.status != TransactionStatus::Reserved {
            return Err(DomainError::invalid_transition(format!(
                "{} -> PURCHASED",
                self.status
            )));
        }
        if self.item_id.is_none() || self.user_id.is_none() {
            return Err(DomainError::invalid_transition(
                "cannot confirm an orphaned reservation",
            ));
        }

        let next = Self {
            status: TransactionStatus::Purchased,
            updated_at: Utc::now(),
            ..self.clone()
        };
        next.validate(ValidationMode::Structural)?;
        Ok(next)
    }

    /// Cancel a reservation or purchase.
    ///
    /// Succeeds on orphaned records: a hold against a deleted item must
    /// always be releasable. Who is allowed to cancel is an orchestration
    /// policy, not enforced here.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` when the transaction is
    /// already `Cancelled`.
    pub fn cancel(&self) -> DomainResult<Self> {
        if self.status == TransactionStatus::Cancelled {
            return Err(DomainError::invalid_transition("CANCELLED -> CANCELLED"));
        }

        let next = Self {
            status: TransactionStatus::Cancelled,
            updated_at: Utc::now(),
            ..self.clone()
        };
        next.validate(ValidationMode::Structural)?;
        Ok(next)
    }

    /// Snapshot of the current state for persistence.
    #[must_use]
    pub fn props(&self) -> TransactionProps {
        TransactionProps {
            id: self.id,
            item_id: self.item_id,
            user_id: self.user_id,
            guest_session_id: self.guest_session_id.clone(),
            status: self.status,
            quantity: self.quantity,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn validate(&self, mode: ValidationMode) -> DomainResult<()> {
        // Structural tier: always enforced
        if !self.id.is_v4() {
            return Err(DomainError::invalid_attribute(
                "transaction id must be a UUID v4",
            ));
        }
        if let Some(item_id) = self.item_id {
            if !item_id.is_v4() {
                return Err(DomainError::invalid_attribute("item id must be a UUID v4"));
            }
        }
        if let Some(user_id) = self.user_id {
            if !user_id.is_v4() {
                return Err(DomainError::invalid_attribute("user id must be a UUID v4"));
            }
        }
        if self.quantity == 0 {
            return Err(DomainError::invalid_attribute(
                "quantity must be a positive integer",
            ));
        }
        // Both holders set is corruption, not legacy drift: soft deletes only
        // null identities out, nothing ever writes both
        if self.user_id.is_some() && self.guest_session_id.is_some() {
            return Err(DomainError::invalid_attribute(
                "exactly one of user id and guest session id must be set",
            ));
        }

        if mode.checks_content() {
            match (&self.user_id, &self.guest_session_id) {
                (None, None) => {
                    return Err(DomainError::invalid_attribute(
                        "either a user id or a guest session id is required",
                    ));
                }
                (None, Some(guest)) => {
                    if guest.trim().is_empty() {
                        return Err(DomainError::invalid_attribute(
                            "guest session id must not be empty",
                        ));
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }
}
