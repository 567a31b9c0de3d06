//! Glean app listings
//!
//! The probeinfo service returns a gzipped JSON array with one record per
//! application channel. Records are returned sorted by `app_name` so that
//! all channels of an application are adjacent; filtering is left to the
//! namespace builder.
//!
//! `deprecated` may be missing or `null`, both meaning active. Deprecated
//! records are skipped later, so they may also lack `canonical_app_name` and
//! `bq_dataset_family`; an active record without either is rejected.

use std::io::Read;

use flate2::read::GzDecoder;
use serde::Deserialize;
use tracing::info;

use crate::error::{ListingsError, Result};

pub const RELEASE_CHANNEL: &str = "release";

/// One application channel from the app listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppListing {
    pub app_name: String,
    pub canonical_app_name: String,
    pub app_channel: Option<String>,
    pub bq_dataset_family: String,
    pub deprecated: bool,
}

/// A listing record as it appears on the wire
#[derive(Deserialize)]
struct RawAppListing {
    app_name: String,
    #[serde(default)]
    canonical_app_name: Option<String>,
    #[serde(default)]
    app_channel: Option<String>,
    #[serde(default)]
    bq_dataset_family: Option<String>,
    #[serde(default)]
    deprecated: Option<bool>,
}

impl TryFrom<RawAppListing> for AppListing {
    type Error = ListingsError;

    fn try_from(raw: RawAppListing) -> std::result::Result<Self, Self::Error> {
        let deprecated = raw.deprecated.unwrap_or(false);
        let required = |value: Option<String>, field: &'static str| match value {
            Some(value) => Ok(value),
            None if deprecated => Ok(String::new()),
            None => Err(ListingsError::MissingField {
                app_name: raw.app_name.clone(),
                field,
            }),
        };

        Ok(AppListing {
            canonical_app_name: required(raw.canonical_app_name, "canonical_app_name")?,
            bq_dataset_family: required(raw.bq_dataset_family, "bq_dataset_family")?,
            app_name: raw.app_name,
            app_channel: raw.app_channel,
            deprecated,
        })
    }
}

impl AppListing {
    pub fn is_release(&self) -> bool {
        self.app_channel.as_deref() == Some(RELEASE_CHANNEL)
    }
}

/// Decode gzipped JSON app listings, stable-sorted by `app_name`
pub fn load_app_listings(bytes: &[u8]) -> Result<Vec<AppListing>> {
    let mut json = Vec::new();
    GzDecoder::new(bytes)
        .read_to_end(&mut json)
        .map_err(ListingsError::Decompress)?;

    let raw: Vec<RawAppListing> = serde_json::from_slice(&json).map_err(ListingsError::from)?;
    let mut listings = raw
        .into_iter()
        .map(AppListing::try_from)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    listings.sort_by(|a, b| a.app_name.cmp(&b.app_name));

    info!("Loaded {} app listings", listings.len());
    Ok(listings)
}
