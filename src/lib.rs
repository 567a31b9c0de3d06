//! namespaces-generator - builds `namespaces.yaml` for the LookML generator
//!
//! The generator joins two external metadata sources:
//! - the bigquery-etl `generated-sql` tarball, which lists every view and the
//!   tables each view selects from
//! - the probeinfo Glean app listings, which map applications and channels to
//!   BigQuery dataset families
//!
//! For every application it records the views that exist, classifies the ones
//! that pass straight through to a stable ping table, and derives explore
//! definitions from them. User-supplied overrides replace generated entries.
//!
//! ## Pipeline
//! archive bytes -> ViewRegistry
//! listing bytes -> AppListings -> grouped by app -> Namespace (views + explores)
//! -> merged with custom namespaces -> YAML
//!
//! ```rust,no_run
//! use namespaces_generator::{pipeline, GeneratorConfig};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = GeneratorConfig::default();
//! pipeline::run(&config, None).await?;
//! # Ok(())
//! # }
//! ```

// Core error handling
pub mod error;

// Defaults and run options
pub mod config;

// HTTP access to the metadata sources
pub mod fetch;

// Loaders for the two metadata sources
pub mod listings;
pub mod registry;

// Namespace assembly, overrides and output
pub mod explores;
pub mod namespaces;

// End-to-end run
pub mod pipeline;

pub use config::GeneratorConfig;
pub use error::{GeneratorError, Result};
pub use explores::{generate_explores, Explore, ExploreDict, ExploreType};
pub use listings::{load_app_listings, AppListing};
pub use namespaces::{build_namespaces, merge_custom, BuildOptions, Namespace, TableEntry};
pub use registry::{ViewReference, ViewRegistry};
