use atria_common::value::FeatureRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strum::VariantNames;

/// The attribute currently driving the layer's colors.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VizStyle {
    #[default]
    White,
    Usage,
    Tenancy,
    Area,
    Floor,
    Status,
    LeaseExpiry,
    ReviewDate,
}

/// Current highlight selection: a named scope plus the object ids it
/// covers, `None` meaning the whole city/portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub name: String,
    pub features: Option<Vec<i64>>,
}

impl Default for Highlight {
    fn default() -> Self {
        Self {
            name: "city".to_string(),
            features: None,
        }
    }
}

/// Per-facet filter results as object-id sets. `None` means the facet is
/// inactive (no restriction).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    pub usage: Option<Vec<i64>>,
    pub area: Option<Vec<i64>>,
    pub floor: Option<Vec<i64>>,
    pub tenancy: Option<Vec<i64>>,
    pub status: Option<Vec<i64>>,
    pub lease_expiry: Option<Vec<i64>>,
    pub review_date: Option<Vec<i64>>,
    pub review_type: Option<Vec<i64>>,
    pub vacancy: Option<Vec<i64>>,
}

impl FilterSet {
    fn active(&self) -> Vec<&Vec<i64>> {
        [
            &self.usage,
            &self.area,
            &self.floor,
            &self.tenancy,
            &self.status,
            &self.lease_expiry,
            &self.review_date,
            &self.review_type,
            &self.vacancy,
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.active().is_empty()
    }

    /// Intersects every active facet over the full feature set, preserving
    /// feature order. `None` when no facet is active.
    pub fn combine(&self, all_features: &[FeatureRecord]) -> Option<Vec<i64>> {
        let active = self.active();
        if active.is_empty() {
            return None;
        }
        let sets: Vec<HashSet<i64>> = active
            .iter()
            .map(|ids| ids.iter().copied().collect())
            .collect();

        Some(
            all_features
                .iter()
                .map(|f| f.object_id)
                .filter(|id| sets.iter().all(|set| set.contains(id)))
                .collect(),
        )
    }
}

/// Session-scoped selection state: highlight, visualization mode, active
/// filters, and the combined filter result. Created at session start,
/// mutated by user interaction, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    pub highlight: Highlight,
    pub viz: VizStyle,
    pub filters: FilterSet,
    pub combined_filtered_features: Option<Vec<i64>>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes the combined filter result after a facet changed.
    pub fn refresh_combined(&mut self, all_features: &[FeatureRecord]) {
        self.combined_filtered_features = self.filters.combine(all_features);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(ids: &[i64]) -> Vec<FeatureRecord> {
        ids.iter().map(|id| FeatureRecord::new(*id)).collect()
    }

    #[test]
    fn test_initial_state() {
        let state = SelectionState::new();
        assert_eq!(state.highlight.name, "city");
        assert_eq!(state.viz, VizStyle::White);
        assert!(state.filters.is_empty());
        assert!(state.combined_filtered_features.is_none());
    }

    #[test]
    fn test_combine_intersects_active_facets() {
        let all = features(&[1, 2, 3, 4, 5]);
        let mut state = SelectionState::new();
        state.filters.usage = Some(vec![1, 2, 3, 4]);
        state.filters.area = Some(vec![2, 4, 5]);
        state.refresh_combined(&all);
        assert_eq!(state.combined_filtered_features, Some(vec![2, 4]));
    }

    #[test]
    fn test_combine_no_active_facets_is_none() {
        let all = features(&[1, 2]);
        let mut state = SelectionState::new();
        state.refresh_combined(&all);
        assert!(state.combined_filtered_features.is_none());
    }

    #[test]
    fn test_combine_disjoint_facets_is_empty() {
        let all = features(&[1, 2, 3]);
        let mut state = SelectionState::new();
        state.filters.tenancy = Some(vec![1]);
        state.filters.vacancy = Some(vec![3]);
        state.refresh_combined(&all);
        assert_eq!(state.combined_filtered_features, Some(vec![]));
    }
}
