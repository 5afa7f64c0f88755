// PriceLens - core/mod.rs
//
// Core business logic layer: header resolution, parsing, search, rendering.
// Must NOT depend on: platform or app.

pub mod discovery;
pub mod export;
pub mod headers;
pub mod model;
pub mod parser;
pub mod search;
