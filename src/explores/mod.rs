//! Explore generation
//!
//! Each explore type inspects a namespace's views and emits zero or more
//! explores. The set of types is closed; `ExploreType::REGISTRY` fixes the
//! order in which they run, and when two types emit the same explore id the
//! later one wins.
//!
//! # Output
//!
//! ```yaml
//! baseline:
//!   type: ping_explore
//!   views:
//!     base_view: baseline
//! ```

mod growth_accounting;
mod ping;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::namespaces::Views;

/// Known explore types, in registry order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExploreType {
    Ping,
    GrowthAccounting,
}

impl ExploreType {
    /// Generators run in this order; later entries overwrite earlier ones on id collisions
    pub const REGISTRY: [ExploreType; 2] = [ExploreType::Ping, ExploreType::GrowthAccounting];

    /// Tag written to the `type` field of the explore
    pub fn type_tag(self) -> &'static str {
        match self {
            ExploreType::Ping => "ping_explore",
            ExploreType::GrowthAccounting => "growth_accounting_explore",
        }
    }

    /// Explores of this type for a namespace's views
    pub fn from_views(self, views: &Views) -> Vec<Explore> {
        match self {
            ExploreType::Ping => ping::from_views(views),
            ExploreType::GrowthAccounting => growth_accounting::from_views(views),
        }
    }
}

impl fmt::Display for ExploreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_tag())
    }
}

/// A filter users must keep on the explore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlwaysFilter {
    pub filters: BTreeMap<String, String>,
}

/// A view joined onto the explore's base view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExploreJoin {
    pub view: String,
    pub relationship: String,
    pub sql_on: String,
}

/// Serialized form of an explore, as written under `explores.<id>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExploreDict {
    #[serde(rename = "type")]
    pub explore_type: String,
    pub views: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub always_filter: Option<AlwaysFilter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub joins: Vec<ExploreJoin>,
}

/// A generated explore
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explore {
    pub name: String,
    pub explore_type: ExploreType,
    /// Role -> view name, e.g. `base_view -> baseline`
    pub views: BTreeMap<String, String>,
    pub always_filter: Option<AlwaysFilter>,
    pub joins: Vec<ExploreJoin>,
}

impl Explore {
    /// Explore over a single base view
    pub fn new(
        name: impl Into<String>,
        explore_type: ExploreType,
        base_view: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            explore_type,
            views: BTreeMap::from([("base_view".to_string(), base_view.into())]),
            always_filter: None,
            joins: Vec::new(),
        }
    }

    pub fn to_dict(&self) -> BTreeMap<String, ExploreDict> {
        BTreeMap::from([(
            self.name.clone(),
            ExploreDict {
                explore_type: self.explore_type.type_tag().to_string(),
                views: self.views.clone(),
                always_filter: self.always_filter.clone(),
                joins: self.joins.clone(),
            },
        )])
    }
}

/// Run every registered explore type over `views` and merge the results
pub fn generate_explores(views: &Views) -> BTreeMap<String, ExploreDict> {
    let mut explores = BTreeMap::new();

    for explore_type in ExploreType::REGISTRY {
        for explore in explore_type.from_views(views) {
            for (id, dict) in explore.to_dict() {
                if let Some(previous) = explores.insert(id.clone(), dict) {
                    debug!(
                        "Explore '{}' from {} replaces one from {}",
                        id, explore_type, previous.explore_type
                    );
                }
            }
        }
    }

    explores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespaces::TableEntry;

    fn views(entries: &[(&str, TableEntry)]) -> Views {
        let mut views = Views::new();
        for (view_id, entry) in entries {
            views
                .entry(view_id.to_string())
                .or_default()
                .push(entry.clone());
        }
        views
    }

    #[test]
    fn test_registry_order_and_tags() {
        assert_eq!(
            ExploreType::REGISTRY,
            [ExploreType::Ping, ExploreType::GrowthAccounting]
        );
        assert_eq!(ExploreType::Ping.type_tag(), "ping_explore");
        assert_eq!(
            ExploreType::GrowthAccounting.to_string(),
            "growth_accounting_explore"
        );
    }

    #[test]
    fn test_to_dict() {
        let explore = Explore::new("baseline", ExploreType::Ping, "baseline");
        let dict = explore.to_dict();
        assert_eq!(dict.len(), 1);
        assert_eq!(dict["baseline"].explore_type, "ping_explore");
        assert_eq!(dict["baseline"].views["base_view"], "baseline");
    }

    #[test]
    fn test_explore_dict_yaml_shape() {
        let explore = Explore::new("metrics", ExploreType::Ping, "metrics");
        let yaml = serde_yaml::to_string(&explore.to_dict()).unwrap();
        assert_eq!(
            yaml,
            "metrics:\n  type: ping_explore\n  views:\n    base_view: metrics\n"
        );
    }

    #[test]
    fn test_generate_explores_combines_types() {
        let views = views(&[
            (
                "baseline",
                TableEntry::new("mozdata.app1.baseline")
                    .with_channel("release")
                    .ping_table(),
            ),
            (
                "baseline_clients_last_seen",
                TableEntry::new("mozdata.app1.baseline_clients_last_seen").with_channel("release"),
            ),
        ]);

        let explores = generate_explores(&views);
        let ids: Vec<_> = explores.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["baseline", "growth_accounting"]);
        assert_eq!(explores["growth_accounting"].explore_type, "growth_accounting_explore");
    }

    #[test]
    fn test_generate_explores_empty_views() {
        assert!(generate_explores(&Views::new()).is_empty());
    }

    #[test]
    fn test_later_registry_entry_wins_on_collision() {
        // A ping view named like the growth accounting explore collides with it
        let views = views(&[
            (
                "growth_accounting",
                TableEntry::new("mozdata.app1.growth_accounting").ping_table(),
            ),
            (
                "baseline_clients_last_seen",
                TableEntry::new("mozdata.app1.baseline_clients_last_seen").with_channel("release"),
            ),
        ]);

        let explores = generate_explores(&views);
        assert_eq!(explores.len(), 1);
        assert_eq!(explores["growth_accounting"].explore_type, "growth_accounting_explore");
    }
}
