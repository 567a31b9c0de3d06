//! Ping explores: one per view backed by a stable ping table

use super::{Explore, ExploreType};
use crate::namespaces::Views;

pub(super) fn from_views(views: &Views) -> Vec<Explore> {
    views
        .iter()
        .filter(|(_, tables)| tables.iter().any(|t| t.is_ping_table))
        .map(|(view_id, _)| Explore::new(view_id.as_str(), ExploreType::Ping, view_id.as_str()))
        .collect()
}
