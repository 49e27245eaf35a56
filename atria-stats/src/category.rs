use atria_common::color::{ColorRamp, Rgba};
use atria_common::value::FeatureRecord;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Per-category accumulation over a categorical field: record count plus
/// the summed area of the matching records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDatum {
    pub category: String,
    pub count: u32,
    pub area: f64,
    pub color: Rgba,
}

/// Groups features by the distinct values of `field` in first-seen order,
/// counting records and summing `area_field` per category. Null areas
/// contribute zero; null categories are skipped.
pub fn categorize(
    features: &[FeatureRecord],
    field: &str,
    area_field: &str,
    ramp: &ColorRamp,
) -> Vec<CategoryDatum> {
    let mut grouped: IndexMap<String, (u32, f64)> = IndexMap::new();

    for feature in features {
        let Some(category) = feature.value(field).as_text() else {
            continue;
        };
        let area = feature
            .value(area_field)
            .as_f64()
            .filter(|a| a.is_finite())
            .unwrap_or(0.0);
        let entry = grouped.entry(category).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += area;
    }

    grouped
        .into_iter()
        .enumerate()
        .map(|(i, (category, (count, area)))| CategoryDatum {
            category,
            count,
            area,
            color: ramp.color_at(i),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn feature(id: i64, usage: &str, area: f64) -> FeatureRecord {
        FeatureRecord::new(id)
            .with_attr("Use_", usage)
            .with_attr("sq_m", area)
    }

    #[test]
    fn test_categorize_counts_and_sums() {
        let features = vec![
            feature(0, "Office", 100.0),
            feature(1, "Retail", 40.0),
            feature(2, "Office", 60.0),
        ];
        let ramp = ColorRamp::category_default();
        let data = categorize(&features, "Use_", "sq_m", &ramp);

        assert_eq!(data.len(), 2);
        assert_eq!(data[0].category, "Office");
        assert_eq!(data[0].count, 2);
        assert_approx_eq!(f64, data[0].area, 160.0);
        assert_eq!(data[1].category, "Retail");
        assert_eq!(data[0].color, ramp.color_at(0));
    }

    #[test]
    fn test_null_area_contributes_zero() {
        let features = vec![
            feature(0, "Office", 100.0),
            FeatureRecord::new(1).with_attr("Use_", "Office"),
        ];
        let data = categorize(&features, "Use_", "sq_m", &ColorRamp::category_default());
        assert_eq!(data[0].count, 2);
        assert_approx_eq!(f64, data[0].area, 100.0);
    }

    #[test]
    fn test_empty_features() {
        assert!(categorize(&[], "Use_", "sq_m", &ColorRamp::category_default()).is_empty());
    }
}
