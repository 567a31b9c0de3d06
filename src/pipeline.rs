//! End-to-end generation
//!
//! `generate` is the pure part of a run (bytes in, document out) and is what
//! the integration tests drive. `run` adds fetching and writing.

use std::path::Path;

use chrono::Utc;
use tracing::info;

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::fetch::{app_listings_request_uri, MetadataClient};
use crate::listings::load_app_listings;
use crate::namespaces::{
    build_namespaces, load_custom_namespaces, merge_custom, to_document, to_yaml,
    write_atomically, BuildOptions, NamespacesDocument,
};
use crate::registry::ViewRegistry;

/// Build the final namespaces document from raw source bytes
pub fn generate(
    config: &GeneratorConfig,
    archive: &[u8],
    app_listings: &[u8],
    custom: Option<NamespacesDocument>,
) -> Result<NamespacesDocument> {
    let listings = load_app_listings(app_listings)?;
    let registry = ViewRegistry::from_archive(archive, &config.production_project)?;

    let namespaces = build_namespaces(&registry, &listings, &BuildOptions::from(config));
    let generated = to_document(&namespaces)?;

    Ok(match custom {
        Some(custom) => merge_custom(generated, custom),
        None => generated,
    })
}

/// Fetch both sources, generate, and overwrite `config.output_path`
pub async fn run(config: &GeneratorConfig, custom_namespaces: Option<&Path>) -> Result<()> {
    let custom = custom_namespaces
        .map(load_custom_namespaces)
        .transpose()?;

    let client = MetadataClient::new()?;
    let listings_uri = app_listings_request_uri(&config.app_listings_uri, Utc::now())?;
    let app_listings = client.fetch(&listings_uri).await?;
    let archive = client.fetch(&config.generated_sql_uri).await?;

    let document = generate(config, &archive, &app_listings, custom)?;
    let yaml = to_yaml(&document)?;
    write_atomically(&config.output_path, &yaml)?;

    info!(
        "Generated {} namespaces into {:?}",
        document.len(),
        config.output_path
    );
    Ok(())
}
