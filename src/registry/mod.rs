//! View registry
//!
//! This module provides:
//! - `ViewRegistry`, the dataset -> view -> references index
//! - The loader that builds it from the bigquery-etl generated-sql archive

pub mod archive;
pub mod types;

pub use archive::parse_metadata_entry;
pub use types::*;
