//! Growth accounting explore
//!
//! Built on the per-client last-seen table, which carries 28-day activity
//! bit patterns. When the app also has a `baseline` ping view it is joined
//! per client and day so retention can be sliced by ping fields.

use std::collections::BTreeMap;

use super::{AlwaysFilter, Explore, ExploreJoin, ExploreType};
use crate::namespaces::Views;

const EXPLORE_NAME: &str = "growth_accounting";
const LAST_SEEN_VIEW: &str = "baseline_clients_last_seen";
const BASELINE_VIEW: &str = "baseline";

/// Activity window of the last-seen bit patterns
const RETENTION_WINDOW: &str = "28 days";

pub(super) fn from_views(views: &Views) -> Vec<Explore> {
    if !views.contains_key(LAST_SEEN_VIEW) {
        return Vec::new();
    }

    let mut explore = Explore::new(EXPLORE_NAME, ExploreType::GrowthAccounting, LAST_SEEN_VIEW);
    explore.always_filter = Some(AlwaysFilter {
        filters: BTreeMap::from([(
            "submission_date".to_string(),
            RETENTION_WINDOW.to_string(),
        )]),
    });

    let baseline_is_ping = views
        .get(BASELINE_VIEW)
        .is_some_and(|tables| tables.iter().any(|t| t.is_ping_table));
    if baseline_is_ping {
        explore.joins.push(ExploreJoin {
            view: BASELINE_VIEW.to_string(),
            relationship: "one_to_many".to_string(),
            sql_on: format!(
                "${{{last_seen}.client_id}} = ${{{baseline}.client_info__client_id}} \
                 AND ${{{last_seen}.submission_date}} = ${{{baseline}.submission_date}}",
                last_seen = LAST_SEEN_VIEW,
                baseline = BASELINE_VIEW,
            ),
        });
    }

    vec![explore]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespaces::TableEntry;

    fn last_seen() -> (String, Vec<TableEntry>) {
        (
            LAST_SEEN_VIEW.to_string(),
            vec![TableEntry::new("mozdata.app1.baseline_clients_last_seen").with_channel("release")],
        )
    }

    #[test]
    fn test_requires_last_seen_view() {
        let mut views = Views::new();
        views.insert(
            BASELINE_VIEW.into(),
            vec![TableEntry::new("mozdata.app1.baseline").ping_table()],
        );
        assert!(from_views(&views).is_empty());
    }

    #[test]
    fn test_without_baseline_has_no_join() {
        let views: Views = [last_seen()].into_iter().collect();
        let explores = from_views(&views);

        assert_eq!(explores.len(), 1);
        let explore = &explores[0];
        assert_eq!(explore.name, "growth_accounting");
        assert_eq!(explore.views["base_view"], LAST_SEEN_VIEW);
        assert_eq!(
            explore.always_filter.as_ref().unwrap().filters["submission_date"],
            "28 days"
        );
        assert!(explore.joins.is_empty());
    }

    #[test]
    fn test_joins_baseline_ping_view() {
        let mut views: Views = [last_seen()].into_iter().collect();
        views.insert(
            BASELINE_VIEW.into(),
            vec![TableEntry::new("mozdata.app1.baseline").ping_table()],
        );

        let explore = from_views(&views).remove(0);
        assert_eq!(explore.joins.len(), 1);
        assert_eq!(explore.joins[0].view, "baseline");
        assert_eq!(
            explore.joins[0].sql_on,
            "${baseline_clients_last_seen.client_id} = ${baseline.client_info__client_id} \
             AND ${baseline_clients_last_seen.submission_date} = ${baseline.submission_date}"
        );
    }
}
