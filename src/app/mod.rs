// PriceLens - app/mod.rs
//
// Application layer: catalog loading, report writing, interactive search.
// Dependencies: core and platform layers.

pub mod ingest;
pub mod prompt;
pub mod report;
