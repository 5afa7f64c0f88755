// PriceLens - core/headers.rs
//
// Maps a header row onto the product-name, price, and weight columns.
// Core layer: pure logic, no I/O.

/// Header spellings recognised for the product-name column.
pub const NAME_HEADERS: &[&str] = &["название", "продукт", "товар", "наименование"];

/// Header spellings recognised for the price column.
pub const PRICE_HEADERS: &[&str] = &["цена", "розница"];

/// Header spellings recognised for the weight (kg) column.
pub const WEIGHT_HEADERS: &[&str] = &["вес", "масса", "фасовка"];

/// Zero-based column positions found in a header row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub name: Option<usize>,
    pub price: Option<usize>,
    pub weight: Option<usize>,
}

/// Column positions of a file in which every required column was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub name: usize,
    pub price: usize,
    pub weight: usize,
}

impl ResolvedColumns {
    /// All three positions, or `None` when any column is unresolved.
    pub fn complete(&self) -> Option<ColumnLayout> {
        Some(ColumnLayout {
            name: self.name?,
            price: self.price?,
            weight: self.weight?,
        })
    }

    /// Labels of the columns that were not found.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.is_none() {
            missing.push("name");
        }
        if self.price.is_none() {
            missing.push("price");
        }
        if self.weight.is_none() {
            missing.push("weight");
        }
        missing
    }
}

/// Resolve the name, price, and weight columns of a header row.
///
/// Headers are lower-cased and compared exactly against the synonym sets;
/// surrounding whitespace and punctuation are significant. The scan runs left
/// to right, so when several headers name the same column the last one wins.
pub fn resolve<I, S>(headers: I) -> ResolvedColumns
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut columns = ResolvedColumns::default();

    for (index, header) in headers.into_iter().enumerate() {
        let lowered = header.as_ref().to_lowercase();
        let lowered = lowered.as_str();
        if NAME_HEADERS.contains(&lowered) {
            columns.name = Some(index);
        } else if PRICE_HEADERS.contains(&lowered) {
            columns.price = Some(index);
        } else if WEIGHT_HEADERS.contains(&lowered) {
            columns.weight = Some(index);
        }
    }

    columns
}
