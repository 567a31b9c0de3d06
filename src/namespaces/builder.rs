//! Namespace builder
//!
//! Groups app listings by `app_name` and cross-references each channel's
//! dataset against the view registry.
//!
//! Classification rules:
//! - deprecated listings are ignored entirely
//! - the release channel's canonical name wins, otherwise the first listing's
//! - a view is a ping table when it references exactly one table in
//!   `<dataset>_stable`
//! - non-release channels only contribute ping tables

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use super::types::{Namespace, TableEntry, Views};
use crate::config::GeneratorConfig;
use crate::explores::generate_explores;
use crate::listings::AppListing;
use crate::registry::{ViewReference, ViewRegistry};

/// Options for namespace assembly
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// View ids never added to a namespace
    pub omit_views: BTreeSet<String>,
    /// Project prefix of `TableEntry::table`
    pub table_project: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::from(&GeneratorConfig::default())
    }
}

impl From<&GeneratorConfig> for BuildOptions {
    fn from(config: &GeneratorConfig) -> Self {
        Self {
            omit_views: config.omit_views.clone(),
            table_project: config.table_project.clone(),
        }
    }
}

/// True when `references` is a single table in the `<dataset_id>_stable` dataset
pub fn is_ping_table(dataset_id: &str, references: &[ViewReference]) -> bool {
    match references {
        [only] => only
            .dataset_id()
            .and_then(|d| d.strip_suffix("_stable"))
            .is_some_and(|base| base == dataset_id),
        _ => false,
    }
}

/// Build one namespace per distinct `app_name`.
///
/// `listings` must be sorted by `app_name` (as returned by
/// [`load_app_listings`](crate::listings::load_app_listings)); channels of an
/// app are processed in the order given.
pub fn build_namespaces(
    registry: &ViewRegistry,
    listings: &[AppListing],
    options: &BuildOptions,
) -> BTreeMap<String, Namespace> {
    let namespaces: BTreeMap<String, Namespace> = listings
        .chunk_by(|a, b| a.app_name == b.app_name)
        .map(|group| {
            let app_name = group[0].app_name.clone();
            (app_name, build_namespace(registry, group, options))
        })
        .collect();

    info!("Built {} namespaces", namespaces.len());
    namespaces
}

fn build_namespace(
    registry: &ViewRegistry,
    group: &[AppListing],
    options: &BuildOptions,
) -> Namespace {
    let mut views = Views::new();
    let mut canonical_app_name: Option<String> = None;

    for app in group {
        if app.deprecated {
            debug!(
                "Skipping deprecated listing {} ({:?})",
                app.app_name, app.app_channel
            );
            continue;
        }

        let is_release = app.is_release();
        if canonical_app_name.is_none() || is_release {
            canonical_app_name = Some(app.canonical_app_name.clone());
        }

        let dataset_id = app.bq_dataset_family.as_str();
        for (view_id, references) in registry.views_for(dataset_id) {
            if options.omit_views.contains(view_id) {
                continue;
            }

            let mut table =
                TableEntry::new(format!("{}.{}.{}", options.table_project, dataset_id, view_id));
            table.channel = app.app_channel.clone();

            if is_ping_table(dataset_id, references) {
                table.is_ping_table = true;
            } else if !is_release {
                continue;
            }

            views.entry(view_id.to_string()).or_default().push(table);
        }
    }

    let explores = generate_explores(&views);
    Namespace {
        canonical_app_name,
        explores,
        views,
    }
}
