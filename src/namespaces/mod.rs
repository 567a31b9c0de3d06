//! Namespaces
//!
//! This module provides:
//! - The output types (`Namespace`, `TableEntry`)
//! - The builder that groups app listings into namespaces
//! - Merging of custom overrides and writing `namespaces.yaml`

pub mod builder;
pub mod emit;
pub mod types;

pub use builder::{build_namespaces, is_ping_table, BuildOptions};
pub use emit::{
    load_custom_namespaces, merge_custom, parse_custom_namespaces, to_document, to_yaml,
    write_atomically, NamespacesDocument,
};
pub use types::*;
