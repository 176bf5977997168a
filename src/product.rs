//! Product domain record and display helpers.

use serde::{Deserialize, Serialize};

use crate::types::{PriceMinor, ProductId};

/// Minor units per display currency unit.
pub const MINOR_PER_UNIT: PriceMinor = 1000;

const THOUSANDS_SEPARATOR: char = '\u{202f}';

/// Immutable product record as fetched from the content API.
///
/// Also the snapshot type stored in the wishlist slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Stable product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Brand label, matched exactly by the brand filter.
    pub brand: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Price in minor units.
    pub price_minor: PriceMinor,
    /// Relative image path; `None` renders a placeholder.
    #[serde(default)]
    pub image_path: Option<String>,
}

impl Product {
    /// Returns true when name, brand, or description contains `term_lower`.
    ///
    /// `term_lower` must already be lowercased; callers lowercase once per derivation.
    pub fn matches_term(&self, term_lower: &str) -> bool {
        self.name.to_lowercase().contains(term_lower)
            || self.brand.to_lowercase().contains(term_lower)
            || self.description.to_lowercase().contains(term_lower)
    }

    /// Absolute image URL under `media_base`, or `None` when the product has no image.
    pub fn image_url(&self, media_base: &str) -> Option<String> {
        let path = self.image_path.as_deref()?;
        let base = media_base.trim_end_matches('/');
        if path.starts_with('/') {
            Some(format!("{base}{path}"))
        } else {
            Some(format!("{base}/{path}"))
        }
    }

    /// Renders the price as `1 234,5 €` style text.
    pub fn display_price(&self) -> String {
        format!("{} €", format_minor(self.price_minor))
    }
}

/// Formats minor units with French digit grouping and up to three decimals.
pub fn format_minor(price_minor: PriceMinor) -> String {
    let whole = price_minor / MINOR_PER_UNIT;
    let frac = price_minor % MINOR_PER_UNIT;

    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(ch);
    }

    if frac > 0 {
        let frac_text = format!("{frac:03}");
        out.push(',');
        out.push_str(frac_text.trim_end_matches('0'));
    }
    out
}
