//! Product domain model and pure search helpers.

pub mod catalog;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tri-state halal compliance classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compliance {
    /// Verified compliant.
    Halal,
    /// Verified non-compliant.
    Haram,
    /// Unverified or conflicting information.
    Doubtful,
}

/// Certification metadata attached to a verified or partially verified
/// product. Never present on a `Haram` classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    pub body: String,
    #[serde(default)]
    pub expires_on: Option<NaiveDate>,
}

/// A scannable product.
///
/// Identity is the (id, barcode) pair; scan-history deduplication keys on
/// `id`. For products synthesized from an unknown barcode the id is derived
/// deterministically from the barcode, so rescanning the same unknown code
/// resolves to the same identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub barcode: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    pub compliance: Compliance,
    #[serde(default)]
    pub certification: Option<Certification>,
}

impl Product {
    /// Builds the placeholder entry for a barcode absent from every catalog.
    ///
    /// The id is a UUID v5 of the barcode, not a fresh random id, so repeated
    /// scans of the same unknown barcode deduplicate exactly like known
    /// products.
    pub fn unknown(barcode: &str) -> Self {
        let id = Uuid::new_v5(&Uuid::NAMESPACE_OID, barcode.as_bytes());
        Self {
            id: format!("unknown-{id}"),
            barcode: barcode.to_string(),
            name: "Unknown Product".to_string(),
            brand: "Unknown".to_string(),
            category: "uncategorized".to_string(),
            description: None,
            compliance: Compliance::Doubtful,
            certification: None,
        }
    }

    /// Drops certification metadata when the classification forbids it.
    pub fn normalized(mut self) -> Self {
        if self.compliance == Compliance::Haram {
            self.certification = None;
        }
        self
    }
}

/// A report a user files against a product (wrong classification, missing
/// data). Submitted through the backend; fire-and-forget from the client's
/// point of view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductReport {
    pub barcode: String,
    pub reason: String,
    #[serde(default)]
    pub details: Option<String>,
}

/// Case-insensitive substring search over name, brand, and category.
///
/// An empty or whitespace-only query returns an empty result, never the full
/// input slice.
pub fn search<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&query)
                || p.brand.to_lowercase().contains(&query)
                || p.category.to_lowercase().contains(&query)
        })
        .collect()
}
