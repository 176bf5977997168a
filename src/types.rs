//! Shared primitive IDs and catalogue-related enums.

use std::{fmt, str::FromStr};


/// Stable product identifier assigned by the content API.
pub type ProductId = u64;
/// Price in minor currency units (thousandths of the display unit).
pub type PriceMinor = u64;

/// Price ordering applied to the derived view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Keep source order.
    #[default]
    None,
    /// Cheapest first.
    Ascending,
    /// Most expensive first.
    Descending,
}

/// Error returned when a sort order token is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort order '{0}' (expected '', 'asc' or 'desc')")]
pub struct ParseSortOrderError(pub String);

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(Self::None),
            "asc" => Ok(Self::Ascending),
            "desc" => Ok(Self::Descending),
            other => Err(ParseSortOrderError(other.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Ascending => "asc",
            Self::Descending => "desc",
        })
    }
}

/// Lifecycle of the one-shot catalogue fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CatalogueStatus {
    /// Initial fetch has not resolved yet.
    #[default]
    Loading,
    /// Source collection is loaded.
    Ready,
    /// Initial fetch failed; only a full reload recovers.
    Unavailable,
}
