//! Metadata source access
//!
//! This module provides:
//! - An HTTP client for anonymous GETs of the archive and app listings
//! - The cache-busting rule for probeinfo requests

pub mod client;

pub use client::{app_listings_request_uri, MetadataClient};
