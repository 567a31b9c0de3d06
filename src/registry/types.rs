//! Registry types

use std::collections::BTreeMap;

/// A table referenced from a view's SQL, split on `.`
///
/// Normally `project.dataset.table`; the components are kept verbatim so a
/// reference with an unusual shape still classifies the same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewReference {
    parts: Vec<String>,
}

impl ViewReference {
    /// Split a dotted reference such as `moz-fx-data-shared-prod.app1_stable.baseline_v1`
    pub fn from_dotted(reference: &str) -> Self {
        Self {
            parts: reference.split('.').map(str::to_string).collect(),
        }
    }

    pub fn from_parts<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// Dataset holding the referenced table (second-to-last component)
    pub fn dataset_id(&self) -> Option<&str> {
        self.nth_from_end(2)
    }

    fn nth_from_end(&self, n: usize) -> Option<&str> {
        self.parts
            .len()
            .checked_sub(n)
            .map(|i| self.parts[i].as_str())
    }
}

/// Views of the production project, indexed by dataset then view id
///
/// Built once per run from the generated-sql archive and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewRegistry {
    datasets: BTreeMap<String, BTreeMap<String, Vec<ViewReference>>>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a view; a later insert for the same dataset and view replaces the earlier one
    pub fn insert(
        &mut self,
        dataset_id: impl Into<String>,
        view_id: impl Into<String>,
        references: Vec<ViewReference>,
    ) {
        self.datasets
            .entry(dataset_id.into())
            .or_default()
            .insert(view_id.into(), references);
    }

    #[cfg(test)]
    pub(crate) fn get(&self, dataset_id: &str, view_id: &str) -> Option<&[ViewReference]> {
        self.datasets
            .get(dataset_id)
            .and_then(|views| views.get(view_id))
            .map(Vec::as_slice)
    }

    /// Views of a dataset; empty when the dataset is unknown
    pub fn views_for<'a>(
        &'a self,
        dataset_id: &str,
    ) -> impl Iterator<Item = (&'a str, &'a [ViewReference])> + 'a {
        self.datasets
            .get(dataset_id)
            .into_iter()
            .flat_map(|views| views.iter())
            .map(|(view_id, refs)| (view_id.as_str(), refs.as_slice()))
    }

    pub fn dataset_count(&self) -> usize {
        self.datasets.len()
    }

    pub fn view_count(&self) -> usize {
        self.datasets.values().map(BTreeMap::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_components() {
        let r = ViewReference::from_dotted("moz-fx-data-shared-prod.app1_stable.baseline_v1");
        assert_eq!(r.dataset_id(), Some("app1_stable"));
        assert_eq!(
            r,
            ViewReference::from_parts(["moz-fx-data-shared-prod", "app1_stable", "baseline_v1"])
        );
    }

    #[test]
    fn test_short_reference() {
        let r = ViewReference::from_dotted("app1_stable.baseline_v1");
        assert_eq!(r.dataset_id(), Some("app1_stable"));

        let r = ViewReference::from_dotted("baseline_v1");
        assert_eq!(r.dataset_id(), None);
    }

    #[test]
    fn test_last_insert_wins() {
        let mut registry = ViewRegistry::new();
        registry.insert("app1", "baseline", vec![ViewReference::from_dotted("a.b.c")]);
        registry.insert("app1", "baseline", vec![ViewReference::from_dotted("x.y.z")]);

        assert_eq!(registry.view_count(), 1);
        assert_eq!(
            registry.get("app1", "baseline"),
            Some(&[ViewReference::from_dotted("x.y.z")][..])
        );
    }

    #[test]
    fn test_views_for_unknown_dataset_is_empty() {
        let mut registry = ViewRegistry::new();
        registry.insert("app1", "baseline", vec![]);
        assert_eq!(registry.views_for("missing").count(), 0);
        assert_eq!(registry.views_for("app1").count(), 1);
    }
}
