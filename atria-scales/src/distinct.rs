use atria_common::value::{AttrValue, FeatureRecord};
use indexmap::IndexSet;

/// Lexicographically sorted unique non-null values of a field, rendered as
/// text. An empty feature set yields an empty sequence.
pub fn distinct_values(features: &[FeatureRecord], field: &str) -> Vec<String> {
    let mut values: Vec<String> = features
        .iter()
        .filter_map(|f| f.value(field).as_text())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect();
    values.sort();
    values
}

/// Unique non-null values of a field in first-seen order, untyped.
pub fn distinct_attr_values(features: &[FeatureRecord], field: &str) -> Vec<AttrValue> {
    features
        .iter()
        .map(|f| f.value(field))
        .filter(|v| !v.is_null())
        .cloned()
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}
