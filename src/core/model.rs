// PriceLens - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::util::error::RecordError;
use serde::Serialize;

// =============================================================================
// Price record (normalised output of parsing)
// =============================================================================

/// A single price-list row, normalised across all column layouts.
///
/// Fields are private so the derived `unit_price` can never drift from
/// `price / weight` once the record exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRecord {
    name: String,
    price: f64,
    weight: f64,
    source_file: String,
    unit_price: f64,
}

impl PriceRecord {
    /// Build a record and derive its unit price.
    ///
    /// Rejects non-finite values, a negative price, a weight that is not
    /// strictly positive, and a unit price that overflows.
    pub fn new(
        name: impl Into<String>,
        price: f64,
        weight: f64,
        source_file: impl Into<String>,
    ) -> Result<Self, RecordError> {
        if !price.is_finite() {
            return Err(RecordError::NonFinite { field: "price" });
        }
        if !weight.is_finite() {
            return Err(RecordError::NonFinite { field: "weight" });
        }
        if price < 0.0 {
            return Err(RecordError::NegativePrice { price });
        }
        if weight == 0.0 {
            return Err(RecordError::ZeroWeight);
        }
        if weight < 0.0 {
            return Err(RecordError::NegativeWeight { weight });
        }

        // A tiny weight can still overflow the division.
        let unit_price = price / weight;
        if !unit_price.is_finite() {
            return Err(RecordError::NonFinite {
                field: "unit_price",
            });
        }

        Ok(Self {
            name: name.into(),
            price,
            weight,
            source_file: source_file.into(),
            unit_price,
        })
    }

    /// Product label exactly as it appeared in the source cell.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Package price in the source currency unit.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Package weight in kilograms.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// File name the record was read from.
    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    /// Price per kilogram.
    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Every record ingested during the current run, in file order then row order.
///
/// A catalog is assembled once by the loader and offers no mutating API
/// afterwards, so search and export can share it freely by reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    records: Vec<PriceRecord>,
}

impl Catalog {
    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PriceRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<PriceRecord>> for Catalog {
    fn from(records: Vec<PriceRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a PriceRecord;
    type IntoIter = std::slice::Iter<'a, PriceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// =============================================================================
// Row policy
// =============================================================================

/// How a malformed data row affects the file it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowPolicy {
    /// The first malformed row rejects the whole file.
    #[default]
    Strict,
    /// Malformed rows are skipped; the rest of the file is kept.
    Lenient,
}

impl RowPolicy {
    /// Parse the config spelling ("strict" / "lenient"), case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "lenient" => Some(Self::Lenient),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        }
    }
}

impl std::fmt::Display for RowPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
