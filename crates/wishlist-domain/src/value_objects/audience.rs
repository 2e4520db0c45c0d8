//! Who can see a wishlist and who can act on it

use serde::{Deserialize, Serialize};

/// Who can view a wishlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    /// Anyone holding the share link can view
    Link,
    /// Only the owner can view
    Private,
}

/// Who can reserve or purchase items on a wishlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Participation {
    /// Anyone, including anonymous guests
    Anyone,
    /// Registered users only
    Registered,
    /// The owner's contacts only
    Contacts,
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Link => write!(f, "LINK"),
            Self::Private => write!(f, "PRIVATE"),
        }
    }
}

impl std::fmt::Display for Participation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anyone => write!(f, "ANYONE"),
            Self::Registered => write!(f, "REGISTERED"),
            Self::Contacts => write!(f, "CONTACTS"),
        }
    }
}
