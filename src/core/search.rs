// PriceLens - core/search.rs
//
// Product-name search over a loaded catalog.
// Core layer: pure logic, no I/O.

use crate::core::model::{Catalog, PriceRecord};

/// Find records whose name contains `query`, ignoring case.
///
/// Results are ordered by ascending unit price; records with equal unit
/// prices keep their catalog order. An empty query matches nothing.
pub fn find<'a>(catalog: &'a Catalog, query: &str) -> Vec<&'a PriceRecord> {
    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    let mut matches: Vec<&PriceRecord> = catalog
        .iter()
        .filter(|record| record.name().to_lowercase().contains(&needle))
        .collect();

    matches.sort_by(|a, b| a.unit_price().total_cmp(&b.unit_price()));

    tracing::debug!(query, matches = matches.len(), "Search complete");
    matches
}
