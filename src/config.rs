//! Run configuration
//!
//! Defaults match the production metadata sources. Tests and the CLI override
//! individual fields.

use std::collections::BTreeSet;
use std::path::PathBuf;

/// bigquery-etl `generated-sql` branch as a gzipped tarball
pub const DEFAULT_GENERATED_SQL_URI: &str =
    "https://github.com/mozilla/bigquery-etl/archive/generated-sql.tar.gz";

/// probeinfo v2 Glean app listings
pub const DEFAULT_APP_LISTINGS_URI: &str =
    "https://probeinfo.telemetry.mozilla.org/v2/glean/app-listings";

/// Host of the probeinfo service; requests to it get a cache-busting query param
pub const PROBE_INFO_HOST: &str = "probeinfo.telemetry.mozilla.org";

/// Only views defined in this project are registered
pub const PRODUCTION_PROJECT: &str = "moz-fx-data-shared-prod";

/// Project prefix used for user-facing table names in the output
pub const TABLE_PROJECT: &str = "mozdata";

/// Views never exposed in any namespace
pub const OMIT_VIEWS: &[&str] = &["deletion_request"];

/// Output file, relative to the working directory
pub const OUTPUT_PATH: &str = "namespaces.yaml";

/// Configuration for a single generator run
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// URI of the generated-sql tarball
    pub generated_sql_uri: String,
    /// URI of the app listings endpoint
    pub app_listings_uri: String,
    /// Project whose views are registered; others are skipped
    pub production_project: String,
    /// Project written into `TableEntry::table`
    pub table_project: String,
    /// View ids excluded from every namespace
    pub omit_views: BTreeSet<String>,
    /// Where `namespaces.yaml` is written
    pub output_path: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            generated_sql_uri: DEFAULT_GENERATED_SQL_URI.to_string(),
            app_listings_uri: DEFAULT_APP_LISTINGS_URI.to_string(),
            production_project: PRODUCTION_PROJECT.to_string(),
            table_project: TABLE_PROJECT.to_string(),
            omit_views: OMIT_VIEWS.iter().map(|v| v.to_string()).collect(),
            output_path: PathBuf::from(OUTPUT_PATH),
        }
    }
}

impl GeneratorConfig {
    /// Override the generated-sql archive URI
    pub fn with_generated_sql_uri(mut self, uri: impl Into<String>) -> Self {
        self.generated_sql_uri = uri.into();
        self
    }

    /// Override the app listings URI
    pub fn with_app_listings_uri(mut self, uri: impl Into<String>) -> Self {
        self.app_listings_uri = uri.into();
        self
    }

    /// Override the output path
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.generated_sql_uri, DEFAULT_GENERATED_SQL_URI);
        assert_eq!(config.app_listings_uri, DEFAULT_APP_LISTINGS_URI);
        assert_eq!(config.output_path, PathBuf::from("namespaces.yaml"));
        assert!(config.omit_views.contains("deletion_request"));
    }

    #[test]
    fn test_overrides() {
        let config = GeneratorConfig::default()
            .with_generated_sql_uri("file:///tmp/sql.tar.gz")
            .with_app_listings_uri("http://localhost:8000/listings")
            .with_output_path("/tmp/out.yaml");
        assert_eq!(config.generated_sql_uri, "file:///tmp/sql.tar.gz");
        assert_eq!(config.app_listings_uri, "http://localhost:8000/listings");
        assert_eq!(config.output_path, PathBuf::from("/tmp/out.yaml"));
        assert_eq!(config.production_project, PRODUCTION_PROJECT);
    }
}
