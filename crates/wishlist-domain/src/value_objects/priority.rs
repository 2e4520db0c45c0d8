//! Item priority value object

use crate::{DomainError, DomainResult};

/// Ordinal priority of a wishlist item.
///
/// Serialized as its ordinal (1-4) in snapshots; `Medium` is the default for
/// freshly created items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum ItemPriority {
    /// Nice to have
    Low = 1,
    /// Ordinary priority
    #[default]
    Medium = 2,
    /// Important to the owner
    High = 3,
    /// Needed as soon as possible
    Urgent = 4,
}

impl ItemPriority {
    /// Get the ordinal value (1-4)
    #[must_use]
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Create a priority from its ordinal value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAttribute` if the ordinal is outside 1-4.
    pub fn from_ordinal(value: u8) -> DomainResult<Self> {
        match value {
            1 => Ok(Self::Low),
            2 => Ok(Self::Medium),
            3 => Ok(Self::High),
            4 => Ok(Self::Urgent),
            other => Err(DomainError::invalid_attribute(format!(
                "priority ordinal must be 1-4, got {other}"
            ))),
        }
    }
}

impl std::fmt::Display for ItemPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Urgent => write!(f, "URGENT"),
        }
    }
}
