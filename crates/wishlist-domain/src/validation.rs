//! Validation-mode framework
//!
//! Every entity and aggregate in this crate owns a private `validate(mode)`
//! routine that partitions its checks into three tiers:
//!
//! - **structural** — type/shape/UUID well-formedness. Always enforced, even
//!   on reconstitution, so corrupt data is always rejected.
//! - **content** — length limits, price/currency pairing, URL parseability.
//!   Enforced on fresh creation and on owner-driven edits, skipped on
//!   reconstitution so legacy records remain loadable.
//! - **inventory** — `total >= reserved + purchased` (unless unlimited).
//!   Enforced on creation and on any operation that changes committed
//!   quantities, but deliberately skipped right after an owner reduces
//!   `total_quantity`, to avoid revealing hidden purchase/reservation counts.
//!
//! The mode is passed as data, not modelled as subclasses: a closed enum is
//! all the dispatch this needs.

/// Which invariant subset a `validate` call enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationMode {
    /// Structural tier only. Used when reconstituting persisted, possibly
    /// non-compliant data: "can this be loaded" stays independent from
    /// "is this currently business-valid".
    Structural,

    /// All three tiers. Used for fresh creation.
    Strict,

    /// Structural + content, no inventory. Used for owner-driven edits,
    /// where re-checking committed quantities would leak hidden activity.
    Evolutive,

    /// Structural + inventory, no content. Used for reserve/purchase
    /// operations, which must respect capacity but must not reject an item
    /// whose descriptive fields predate current content rules.
    Transaction,
}

impl ValidationMode {
    /// Whether this mode enforces the content/business tier.
    #[must_use]
    pub fn checks_content(self) -> bool {
        matches!(self, Self::Strict | Self::Evolutive)
    }

    /// Whether this mode enforces the inventory tier.
    #[must_use]
    pub fn checks_inventory(self) -> bool {
        matches!(self, Self::Strict | Self::Transaction)
    }
}
