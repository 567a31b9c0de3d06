//! Namespace output types
//!
//! Field order follows the serialized key order so the YAML output is sorted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::explores::ExploreDict;

/// View id -> one table entry per contributing channel
pub type Views = BTreeMap<String, Vec<TableEntry>>;

/// A table backing a view for one app channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// The view passes through a single stable ping table
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_ping_table: bool,
    /// Fully qualified `project.dataset.view`
    pub table: String,
}

impl TableEntry {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            channel: None,
            is_ping_table: false,
            table: table.into(),
        }
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn ping_table(mut self) -> Self {
        self.is_ping_table = true;
        self
    }
}

/// Generated configuration for one application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    /// `None` only when every listing of the app is deprecated
    pub canonical_app_name: Option<String>,
    pub explores: BTreeMap<String, ExploreDict>,
    pub views: Views,
}
