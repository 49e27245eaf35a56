use crate::error::AtriaScaleError;
use atria_common::color::{ColorRamp, Rgba};
use atria_common::value::FeatureRecord;
use serde::{Deserialize, Serialize};

/// One contiguous histogram bin. The upper bound is inclusive and the lower
/// bound exclusive, except that the first bin also admits its lower bound so
/// no observed value is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub min: f64,
    pub max: f64,
    pub count: u32,
    pub color: Rgba,
}

impl Bin {
    /// Chart category label, e.g. `"200m2 - 400m2"`.
    pub fn label(&self) -> String {
        format!("{}m2 - {}m2", self.min.round(), self.max.round())
    }
}

/// Adaptive histogram binner: partitions a numeric field's observed range
/// into human-legible bins by snapping the raw bin width to a "nice"
/// granularity, at the cost of hitting the requested bin count exactly.
#[derive(Debug, Clone)]
pub struct HistogramBinner {
    field: String,
    requested: usize,
}

impl HistogramBinner {
    pub fn new(field: &str) -> Self {
        Self {
            field: field.to_string(),
            requested: 5,
        }
    }

    /// Target bin count. The actual count after width snapping may differ.
    pub fn bins(mut self, requested: usize) -> Self {
        self.requested = requested;
        self
    }

    pub fn build(&self, features: &[FeatureRecord]) -> Result<Vec<Bin>, AtriaScaleError> {
        if self.requested == 0 {
            return Err(AtriaScaleError::InvalidBinCount);
        }

        let values: Vec<f64> = features
            .iter()
            .filter_map(|f| f.value(&self.field).as_f64())
            .collect();
        if values.is_empty() {
            return Ok(Vec::new());
        }

        // Linear scan for the range; NaN loses every comparison and is
        // skipped implicitly.
        let mut max = values[0];
        for v in &values {
            if *v > max {
                max = *v;
            }
        }
        let mut min = max;
        for v in &values {
            if *v < min {
                min = *v;
            }
        }

        // Degenerate range: a single bin spanning the point.
        if values.len() == 1 || max == min {
            return Ok(vec![Bin {
                min,
                max,
                count: values.len() as u32,
                color: ColorRamp::chart_ramp(1).color_at(0),
            }]);
        }

        let mut requested = self.requested;
        if requested > values.len() {
            requested = values.len() - 1;
        }

        // Near-zero minima are treated as zero-based ranges.
        if min.round() == 1.0 {
            min = 0.0;
        }

        let raw = (max - min) / requested as f64;
        let width = snap_width(raw);

        // Snap the range start down to a multiple of the width.
        let mut lo = width * (min / width).round();
        if lo > min {
            lo -= width;
        }

        let bin_count = ((max - lo) / width).ceil().max(1.0) as usize;
        let ramp = ColorRamp::chart_ramp(bin_count);

        let mut bins: Vec<Bin> = Vec::with_capacity(bin_count);
        let mut edge = lo;
        for i in 0..bin_count {
            bins.push(Bin {
                min: edge,
                max: edge + width,
                count: 0,
                color: ramp.color_at(i),
            });
            edge += width;
        }

        // Boundary values belong to the lower bin; the first bin keeps its
        // own lower bound so sum(count) equals the non-null value count.
        for v in &values {
            for (i, bin) in bins.iter_mut().enumerate() {
                let above_lower = *v > bin.min || (i == 0 && *v == bin.min);
                if above_lower && *v <= bin.max {
                    bin.count += 1;
                    break;
                }
            }
        }

        Ok(bins)
    }
}

/// Snaps a raw bin width to the nearest "nice" granularity. Widths exactly
/// on a tier boundary fall through to integer rounding.
fn snap_width(raw: f64) -> f64 {
    let snapped = if raw > 1000.0 {
        500.0 * (raw / 500.0).round()
    } else if raw < 1000.0 && raw > 500.0 {
        250.0 * (raw / 250.0).round()
    } else if raw < 500.0 && raw > 200.0 {
        100.0 * (raw / 100.0).round()
    } else if raw < 200.0 && raw > 100.0 {
        50.0 * (raw / 50.0).round()
    } else if raw < 100.0 && raw > 50.0 {
        10.0 * (raw / 10.0).round()
    } else if raw < 50.0 && raw > 10.0 {
        5.0 * (raw / 5.0).round()
    } else {
        raw.round()
    };
    // Sub-unit widths round to zero; lift them so binning stays finite.
    if snapped <= 0.0 {
        1.0
    } else {
        snapped
    }
}
