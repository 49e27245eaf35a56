use atria_common::color::{ColorRamp, Rgba};
use atria_common::time::{year_of, EPOCH_SENTINEL_YEAR};
use atria_common::value::FeatureRecord;
use serde::{Deserialize, Serialize};

/// One category of the year histogram: a calendar year with the number of
/// records expiring in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearBin {
    pub year: i32,
    pub count: u32,
    pub color: Rgba,
}

impl YearBin {
    pub fn label(&self) -> String {
        self.year.to_string()
    }
}

/// Ascending unique years of a date-valued field, with the 1970 epoch
/// sentinel excluded.
pub fn unique_years(features: &[FeatureRecord], field: &str) -> Vec<i32> {
    let mut years: Vec<i32> = features
        .iter()
        .filter_map(|f| year_of(f.value(field)))
        .filter(|y| *y != EPOCH_SENTINEL_YEAR)
        .collect();
    years.sort_unstable();
    years.dedup();
    years
}

/// Year-valued variant of the histogram binner: one category per observed
/// year rather than a computed numeric width.
#[derive(Debug, Clone)]
pub struct YearBinner {
    field: String,
}

impl YearBinner {
    pub fn new(field: &str) -> Self {
        Self {
            field: field.to_string(),
        }
    }

    pub fn build(&self, features: &[FeatureRecord]) -> Vec<YearBin> {
        let years: Vec<i32> = features
            .iter()
            .filter_map(|f| year_of(f.value(&self.field)))
            .collect();
        let unique = unique_years(features, &self.field);
        let ramp = ColorRamp::chart_ramp(unique.len());

        unique
            .into_iter()
            .enumerate()
            .map(|(i, year)| YearBin {
                year,
                count: years.iter().filter(|y| **y == year).count() as u32,
                color: ramp.color_at(i),
            })
            .collect()
    }
}
