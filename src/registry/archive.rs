//! Generated-sql archive loader
//!
//! The archive mirrors the bigquery-etl `sql/` tree:
//! `<root>/sql/<project>/<dataset_id>/<view_id>/metadata.yaml`. A view's
//! metadata lists the tables its SQL selects from under
//! `references."view.sql"`.
//!
//! Individual entries that do not fit that shape are skipped; only a corrupt
//! gzip/tar stream fails the load.

use std::collections::BTreeMap;
use std::io::Read;

use flate2::read::GzDecoder;
use serde::Deserialize;
use tracing::{debug, info, trace};

use super::types::{ViewReference, ViewRegistry};
use crate::error::{GeneratorError, Result};

const METADATA_FILE: &str = "metadata.yaml";
const VIEW_REFERENCES_KEY: &str = "view.sql";

/// The subset of `metadata.yaml` the registry needs
#[derive(Debug, Default, Deserialize)]
struct TableMetadata {
    #[serde(default)]
    references: Option<BTreeMap<String, serde_yaml::Value>>,
}

/// A view extracted from a single archive entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedView {
    pub dataset_id: String,
    pub view_id: String,
    pub references: Vec<ViewReference>,
}

impl ViewRegistry {
    /// Build a registry from gzipped tar bytes, keeping views of `production_project` only
    pub fn from_archive(bytes: &[u8], production_project: &str) -> Result<Self> {
        let mut registry = ViewRegistry::new();
        let mut archive = tar::Archive::new(GzDecoder::new(bytes));
        let metadata_suffix = format!("/{}", METADATA_FILE);
        let mut skipped = 0usize;

        for entry in archive.entries().map_err(GeneratorError::Archive)? {
            let mut entry = entry.map_err(GeneratorError::Archive)?;
            let path = String::from_utf8_lossy(&entry.path_bytes()).into_owned();

            if !path.ends_with(&metadata_suffix) {
                continue;
            }

            let mut contents = Vec::new();
            entry
                .read_to_end(&mut contents)
                .map_err(GeneratorError::Archive)?;

            match parse_metadata_entry(&path, &contents, production_project) {
                Some(view) => registry.insert(view.dataset_id, view.view_id, view.references),
                None => skipped += 1,
            }
        }

        info!(
            "Loaded {} views across {} datasets ({} metadata files skipped)",
            registry.view_count(),
            registry.dataset_count(),
            skipped
        );

        Ok(registry)
    }
}

/// Extract a view from one `metadata.yaml` entry.
///
/// Returns `None` when the document has no `view.sql` references, the path is
/// too short to name a project, dataset and view, or the project is not
/// `production_project`.
pub fn parse_metadata_entry(
    path: &str,
    contents: &[u8],
    production_project: &str,
) -> Option<ParsedView> {
    let metadata: TableMetadata = match serde_yaml::from_slice(contents) {
        Ok(Some(metadata)) => metadata,
        Ok(None) => TableMetadata::default(),
        Err(e) => {
            debug!("Skipping {}: unreadable metadata: {}", path, e);
            return None;
        }
    };

    let Some(raw_references) = metadata
        .references
        .and_then(|mut refs| refs.remove(VIEW_REFERENCES_KEY))
    else {
        trace!("Skipping {}: no {} references", path, VIEW_REFERENCES_KEY);
        return None;
    };

    let (project, dataset_id, view_id) = split_view_path(path)?;
    if project != production_project {
        trace!("Skipping {}: project {} is not {}", path, project, production_project);
        return None;
    }

    let references: Vec<String> = match serde_yaml::from_value(raw_references) {
        Ok(references) => references,
        Err(e) => {
            debug!("Skipping {}: malformed {} references: {}", path, VIEW_REFERENCES_KEY, e);
            return None;
        }
    };

    Some(ParsedView {
        dataset_id: dataset_id.to_string(),
        view_id: view_id.to_string(),
        references: references
            .iter()
            .map(|r| ViewReference::from_dotted(r))
            .collect(),
    })
}

/// `(project, dataset_id, view_id)`: the three segments before the file name
fn split_view_path(path: &str) -> Option<(&str, &str, &str)> {
    let mut segments = path.rsplit('/').skip(1);
    match (segments.next(), segments.next(), segments.next()) {
        (Some(view_id), Some(dataset_id), Some(project)) => Some((project, dataset_id, view_id)),
        _ => {
            debug!("Skipping {}: unexpected path shape", path);
            None
        }
    }
}
