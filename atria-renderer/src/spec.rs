use atria_common::color::Rgba;
use serde::{Deserialize, Serialize};

/// Label attached to the default "no match" symbol.
pub const NO_MATCH_LABEL: &str = "N.A.";

/// A renderer specification applied to a named layer of the external
/// render surface: either a discrete value → color table or a continuous
/// color gradient over one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RendererSpec {
    Simple(SimpleRenderer),
    Unique(UniqueValueRenderer),
    Visual(VisualVariableRenderer),
}

impl RendererSpec {
    /// Field the renderer is keyed on; a simple renderer has none.
    pub fn field(&self) -> Option<&str> {
        match self {
            RendererSpec::Simple(_) => None,
            RendererSpec::Unique(r) => Some(&r.field),
            RendererSpec::Visual(r) => Some(&r.field),
        }
    }
}

/// Single-symbol renderer, used for undifferentiated background layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleRenderer {
    pub color: Rgba,
}

/// Discrete value → color table plus a default entry for unmatched or
/// null values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniqueValueRenderer {
    pub field: String,
    pub default_color: Rgba,
    pub default_label: String,
    pub value_infos: Vec<ValueInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueInfo {
    pub value: String,
    pub label: String,
    pub color: Rgba,
}

/// Continuous color gradient over a numeric (or year-valued) field,
/// expressed as ordered stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualVariableRenderer {
    pub field: String,
    pub default_color: Rgba,
    pub stops: Vec<Stop>,
}

/// One control point of a continuous gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub value: f64,
    pub color: Rgba,
}

/// Opacity visual variable: per-value alpha stops, applied alongside a
/// renderer rather than replacing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpacityVariable {
    pub field: String,
    pub stops: Vec<OpacityStop>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpacityStop {
    pub value: f64,
    pub opacity: f32,
}
