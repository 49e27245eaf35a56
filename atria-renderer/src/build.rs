use crate::error::AtriaRendererError;
use crate::spec::{
    OpacityStop, OpacityVariable, RendererSpec, SimpleRenderer, Stop, UniqueValueRenderer,
    ValueInfo, VisualVariableRenderer, NO_MATCH_LABEL,
};
use atria_common::color::{ColorRamp, Rgba};
use atria_common::value::FeatureRecord;
use atria_scales::year::unique_years;

/// Single-symbol renderer in the given color.
pub fn simple(color: Rgba) -> RendererSpec {
    RendererSpec::Simple(SimpleRenderer { color })
}

/// Discrete categorical renderer: one entry per value with positional ramp
/// colors, plus the gray "no match" default.
pub fn unique_values(field: &str, values: &[String], ramp: &ColorRamp) -> RendererSpec {
    let value_infos = values
        .iter()
        .enumerate()
        .map(|(i, value)| ValueInfo {
            value: value.clone(),
            label: value.clone(),
            color: ramp.color_at(i),
        })
        .collect();

    RendererSpec::Unique(UniqueValueRenderer {
        field: field.to_string(),
        default_color: Rgba::neutral_gray(),
        default_label: NO_MATCH_LABEL.to_string(),
        value_infos,
    })
}

/// As [`unique_values`], but with an explicit color per value. The color
/// list must match the value list in length.
pub fn unique_values_with_colors(
    field: &str,
    values: &[String],
    colors: &[Rgba],
) -> Result<RendererSpec, AtriaRendererError> {
    if values.len() != colors.len() {
        return Err(AtriaRendererError::ValueColorMismatch {
            value_len: values.len(),
            color_len: colors.len(),
        });
    }
    Ok(unique_values(field, values, &ColorRamp::new(colors.to_vec())))
}

/// Overview renderer for a numeric field: a two-stop gradient from the
/// floor of the observed minimum to the ceiling of the maximum. Returns
/// `None` when the field has no non-null values.
pub fn overview(field: &str, features: &[FeatureRecord]) -> Option<RendererSpec> {
    let values: Vec<f64> = features
        .iter()
        .filter_map(|f| f.value(field).as_f64())
        .filter(|v| v.is_finite())
        .collect();
    let min = values.iter().cloned().reduce(f64::min)?.floor();
    let max = values.iter().cloned().reduce(f64::max)?.ceil();

    Some(gradient(field, min, max))
}

/// Overview renderer for a date-valued field: the two-stop gradient spans
/// the unique-year range, with the 1970 sentinel excluded.
pub fn overview_years(field: &str, features: &[FeatureRecord]) -> Option<RendererSpec> {
    let years = unique_years(features, field);
    let min = *years.first()? as f64;
    let max = *years.last()? as f64;

    Some(gradient(field, min, max))
}

fn gradient(field: &str, min: f64, max: f64) -> RendererSpec {
    RendererSpec::Visual(VisualVariableRenderer {
        field: field.to_string(),
        default_color: Rgba::white(),
        stops: vec![
            Stop {
                value: min,
                color: Rgba::gradient_low(),
            },
            Stop {
                value: max,
                color: Rgba::gradient_high(),
            },
        ],
    })
}

/// Drill-down renderer highlighting one bin: the bin keeps its color while
/// everything outside `[min, max]` fades to gray, via four sentinel stops.
pub fn highlight_range(field: &str, min: f64, max: f64, color: Rgba) -> RendererSpec {
    let gray = Rgba::neutral_gray();
    RendererSpec::Visual(VisualVariableRenderer {
        field: field.to_string(),
        default_color: gray,
        stops: vec![
            Stop {
                value: min - 1.0,
                color: gray,
            },
            Stop { value: min, color },
            Stop { value: max, color },
            Stop {
                value: max + 1.0,
                color: gray,
            },
        ],
    })
}

/// Drill-down renderer highlighting a single year category with three
/// stops: the neighboring years anchor the gray falloff.
pub fn highlight_year(field: &str, year: i32, color: Rgba) -> RendererSpec {
    let gray = Rgba::neutral_gray();
    RendererSpec::Visual(VisualVariableRenderer {
        field: field.to_string(),
        default_color: gray,
        stops: vec![
            Stop {
                value: (year - 1) as f64,
                color: gray,
            },
            Stop {
                value: year as f64,
                color,
            },
            Stop {
                value: (year + 1) as f64,
                color: gray,
            },
        ],
    })
}

/// Opacity visual variable over explicit value/alpha pairs.
pub fn opacity_variable(
    field: &str,
    values: &[f64],
    alphas: &[f32],
) -> Result<OpacityVariable, AtriaRendererError> {
    if values.len() != alphas.len() {
        return Err(AtriaRendererError::ValueColorMismatch {
            value_len: values.len(),
            color_len: alphas.len(),
        });
    }
    Ok(OpacityVariable {
        field: field.to_string(),
        stops: values
            .iter()
            .zip(alphas)
            .map(|(value, opacity)| OpacityStop {
                value: *value,
                opacity: *opacity,
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_unique_values_three_entries_plus_default() {
        let values = vec!["Office".to_string(), "Retail".to_string(), "Vacant".to_string()];
        let ramp = ColorRamp::new(vec![
            Rgba::from_rgb8(255, 0, 0),
            Rgba::from_rgb8(0, 255, 0),
            Rgba::from_rgb8(0, 0, 255),
        ]);
        let RendererSpec::Unique(renderer) = unique_values("Use_", &values, &ramp) else {
            panic!("expected unique-value renderer");
        };

        assert_eq!(renderer.value_infos.len(), 3);
        assert_eq!(renderer.value_infos[1].value, "Retail");
        assert_eq!(renderer.value_infos[1].color, ramp.color_at(1));
        assert_eq!(renderer.default_label, NO_MATCH_LABEL);
        assert_eq!(renderer.default_color, Rgba::neutral_gray());
    }

    #[test]
    fn test_unique_values_with_mismatched_colors() {
        let values = vec!["a".to_string(), "b".to_string()];
        let colors = vec![Rgba::white()];
        assert_eq!(
            unique_values_with_colors("Use_", &values, &colors),
            Err(AtriaRendererError::ValueColorMismatch {
                value_len: 2,
                color_len: 1,
            })
        );
    }

    #[test]
    fn test_overview_two_stop_gradient() {
        let features = vec![
            FeatureRecord::new(0).with_attr("sq_m", 10.4),
            FeatureRecord::new(1).with_attr("sq_m", 99.2),
        ];
        let RendererSpec::Visual(renderer) = overview("sq_m", &features).unwrap() else {
            panic!("expected visual-variable renderer");
        };

        assert_eq!(renderer.stops.len(), 2);
        assert_approx_eq!(f64, renderer.stops[0].value, 10.0);
        assert_approx_eq!(f64, renderer.stops[1].value, 100.0);
        assert_eq!(renderer.stops[0].color, Rgba::gradient_low());
        assert_eq!(renderer.stops[1].color, Rgba::gradient_high());
        assert_eq!(renderer.default_color, Rgba::white());
    }

    #[test]
    fn test_overview_empty_field() {
        assert!(overview("sq_m", &[]).is_none());
        assert!(overview_years("Lease_Expiry_Year", &[]).is_none());
    }

    #[test]
    fn test_overview_years_spans_unique_year_range() {
        let features = vec![
            FeatureRecord::new(0).with_attr("Lease_Expiry_Year", "2030-01-01"),
            FeatureRecord::new(1).with_attr("Lease_Expiry_Year", "2022-06-01"),
            FeatureRecord::new(2).with_attr("Lease_Expiry_Year", "bad date"),
        ];
        let RendererSpec::Visual(renderer) =
            overview_years("Lease_Expiry_Year", &features).unwrap()
        else {
            panic!("expected visual-variable renderer");
        };
        assert_approx_eq!(f64, renderer.stops[0].value, 2022.0);
        assert_approx_eq!(f64, renderer.stops[1].value, 2030.0);
    }

    #[test]
    fn test_highlight_range_four_stops() {
        let color = Rgba::from_hex("#0093B2").unwrap();
        let RendererSpec::Visual(renderer) = highlight_range("sq_m", 200.0, 400.0, color) else {
            panic!("expected visual-variable renderer");
        };

        let values: Vec<f64> = renderer.stops.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![199.0, 200.0, 400.0, 401.0]);
        assert_eq!(renderer.stops[0].color, Rgba::neutral_gray());
        assert_eq!(renderer.stops[1].color, color);
        assert_eq!(renderer.stops[2].color, color);
        assert_eq!(renderer.stops[3].color, Rgba::neutral_gray());
    }

    #[test]
    fn test_highlight_year_three_stops() {
        let color = Rgba::from_hex("#E4002B").unwrap();
        let RendererSpec::Visual(renderer) = highlight_year("Lease_Expiry_Year", 2025, color)
        else {
            panic!("expected visual-variable renderer");
        };

        let values: Vec<f64> = renderer.stops.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![2024.0, 2025.0, 2026.0]);
        assert_eq!(renderer.stops[1].color, color);
    }

    #[test]
    fn test_opacity_variable_pairs() {
        let var = opacity_variable("Floor", &[0.0, 10.0], &[0.2, 1.0]).unwrap();
        assert_eq!(var.stops.len(), 2);
        assert_approx_eq!(f32, var.stops[0].opacity, 0.2);
        assert!(opacity_variable("Floor", &[0.0], &[]).is_err());
    }

    #[test]
    fn test_simple_renderer_field() {
        let spec = simple(Rgba::from_hex("#3399FF").unwrap());
        assert_eq!(spec.field(), None);
    }
}
