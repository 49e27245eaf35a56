use crate::category::{categorize, CategoryDatum};
use atria_common::color::{ColorRamp, Rgba};
use atria_common::config::FieldSpec;
use atria_common::time::parse_date;
use atria_common::value::{AttrValue, FeatureRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Sentinel category reported as "most common" when the summed area across
/// all categories is zero, i.e. there is no real answer. The literal
/// spelling is preserved from the upstream data product.
pub const ZERO_AREA_SENTINEL: &str = "0ther";

/// Comparator used for the next-expiry statistic. The upstream pipeline
/// ordered date objects with a default (string) sort; `Lexicographic`
/// reproduces that, `Chronological` is the corrected ordering.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpirySort {
    #[default]
    Lexicographic,
    Chronological,
}

/// Per-field summary statistics over a feature set. Absent data degrades to
/// `None`/zero; computing over an empty set is not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Unique building-id values, not the raw feature count.
    pub unit_count: usize,
    pub whole_building_count: usize,
    pub most_common_usage: Option<CategoryDatum>,
    pub most_common_tenancy: Option<CategoryDatum>,
    pub total_area: f64,
    pub average_area: Option<f64>,
    pub area_max: Option<f64>,
    pub floor_max: Option<f64>,
    pub average_floor: Option<f64>,
    pub next_expiry: Option<String>,
}

/// Statistics Aggregator: computes [`SummaryStats`] for a feature set under
/// a [`FieldSpec`].
#[derive(Debug, Clone)]
pub struct StatsAggregator<'a> {
    fields: &'a FieldSpec,
    ramp: ColorRamp,
    expiry_sort: ExpirySort,
}

impl<'a> StatsAggregator<'a> {
    pub fn new(fields: &'a FieldSpec) -> Self {
        Self {
            fields,
            ramp: ColorRamp::category_default(),
            expiry_sort: ExpirySort::default(),
        }
    }

    /// Ramp used to color the per-category data behind "most common".
    pub fn ramp(mut self, ramp: ColorRamp) -> Self {
        self.ramp = ramp;
        self
    }

    pub fn expiry_sort(mut self, sort: ExpirySort) -> Self {
        self.expiry_sort = sort;
        self
    }

    pub fn summarize(&self, features: &[FeatureRecord]) -> SummaryStats {
        let fields = self.fields;

        let areas: Vec<f64> = features
            .iter()
            .filter_map(|f| f.value(&fields.area).as_f64())
            .collect();

        // Floors arrive as numbers or numeric strings; non-numeric text
        // coerces to NaN and is zeroed by the NaN-safe sum below.
        let floors: Vec<f64> = features
            .iter()
            .filter_map(|f| f.value(&fields.floor).coerce_f64())
            .collect();

        let stats = SummaryStats {
            unit_count: self.unique_count(features, &fields.building_id),
            whole_building_count: self.unique_count(features, &fields.whole_building),
            most_common_usage: self.most_common(features, &fields.usage),
            most_common_tenancy: self.most_common(features, &fields.tenancy),
            total_area: nan_safe_sum(&areas).round(),
            average_area: legacy_average(&areas),
            area_max: scan_max(&areas).map(f64::round),
            floor_max: scan_max(&floors).map(f64::round),
            average_floor: legacy_average(&floors),
            next_expiry: self.next_expiry(features),
        };
        debug!(
            unit_count = stats.unit_count,
            whole_building_count = stats.whole_building_count,
            "summarized feature set"
        );
        stats
    }

    fn unique_count(&self, features: &[FeatureRecord], field: &str) -> usize {
        features
            .iter()
            .map(|f| f.value(field))
            .filter(|v| !v.is_null())
            .collect::<HashSet<&AttrValue>>()
            .len()
    }

    /// Category with the largest summed area: ascending stable sort by area,
    /// take the last. Ties therefore resolve to the later-inserted category.
    /// A zero area sum across the board reports the sentinel instead.
    fn most_common(&self, features: &[FeatureRecord], field: &str) -> Option<CategoryDatum> {
        let mut data = categorize(features, field, &self.fields.area, &self.ramp);
        if data.is_empty() {
            return None;
        }
        data.sort_by(|a, b| a.area.total_cmp(&b.area));

        let area_sum: f64 = data.iter().map(|d| d.area).sum();
        if area_sum == 0.0 {
            return Some(CategoryDatum {
                category: ZERO_AREA_SENTINEL.to_string(),
                count: 0,
                area: 0.0,
                color: Rgba::neutral_gray(),
            });
        }
        data.last().cloned()
    }

    fn next_expiry(&self, features: &[FeatureRecord]) -> Option<String> {
        let dates: Vec<String> = features
            .iter()
            .filter_map(|f| f.value(&self.fields.exact_expiry_date).as_text())
            .collect();

        match self.expiry_sort {
            ExpirySort::Lexicographic => dates.into_iter().min(),
            ExpirySort::Chronological => dates
                .into_iter()
                .min_by_key(|d| (parse_date(d).is_none(), parse_date(d), d.clone())),
        }
    }
}

/// Sum treating NaN terms as zero.
fn nan_safe_sum(values: &[f64]) -> f64 {
    values
        .iter()
        .map(|v| if v.is_nan() { 0.0 } else { *v })
        .sum()
}

/// The legacy average: NaN-safe sum divided by `n - 1`, rounded. A single
/// value short-circuits to itself, which also avoids the zero denominator.
/// The off-by-one denominator is long-standing reported behavior and is
/// kept as-is.
fn legacy_average(values: &[f64]) -> Option<f64> {
    match values.len() {
        0 => None,
        1 => Some(values[0]),
        n => Some((nan_safe_sum(values) / (n - 1) as f64).round()),
    }
}

/// Maximum by linear scan; NaN loses every comparison.
fn scan_max(values: &[f64]) -> Option<f64> {
    let mut iter = values.iter().filter(|v| !v.is_nan());
    let first = *iter.next()?;
    Some(iter.fold(first, |max, v| if *v > max { *v } else { max }))
}
