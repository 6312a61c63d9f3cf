//! Catalog membership status and listing modes.

use super::ParseCatalogStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Membership status of a technician or component.
///
/// Entries are never hard-deleted; retiring one hides it from selection
/// lists while historical records keep referencing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogStatus {
    /// The entry can be chosen for new records.
    Active,
    /// The entry has been retired and is excluded from selection lists.
    Retired,
}

impl CatalogStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Retired => "retired",
        }
    }

    /// Sort rank used by historical listings: active entries first.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Active => 0,
            Self::Retired => 1,
        }
    }
}

impl fmt::Display for CatalogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for CatalogStatus {
    type Error = ParseCatalogStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "active" => Ok(Self::Active),
            "retired" => Ok(Self::Retired),
            _ => Err(ParseCatalogStatusError(value.to_owned())),
        }
    }
}

/// Listing mode for technicians and components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Listing {
    /// Active entries only, ordered by name, for "choose one" inputs.
    Selectable,
    /// Every entry, active first and then by name, for reporting and admin.
    Historical,
}

impl Listing {
    /// Returns `true` when an entry with `status` belongs in this listing.
    #[must_use]
    pub const fn admits(self, status: CatalogStatus) -> bool {
        match self {
            Self::Selectable => matches!(status, CatalogStatus::Active),
            Self::Historical => true,
        }
    }
}
