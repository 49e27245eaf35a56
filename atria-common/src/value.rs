use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A single attribute value on a feature record. Numeric strings are kept
/// as text; callers that need a number use the coercion helpers below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Null,
    Number(f64),
    Text(String),
}

impl Eq for AttrValue {}

impl Hash for AttrValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            AttrValue::Null => state.write_u8(0),
            AttrValue::Number(n) => OrderedFloat::from(*n).hash(state),
            AttrValue::Text(s) => s.hash(state),
        }
    }
}

impl AttrValue {
    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }

    /// Numeric view of the value. Numeric strings parse; anything else is `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Null => None,
            AttrValue::Number(n) => Some(*n),
            AttrValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// Lossy numeric coercion: non-numeric text becomes NaN rather than
    /// absent, so it participates in NaN-safe reductions as zero.
    pub fn coerce_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Null => None,
            AttrValue::Number(n) => Some(*n),
            AttrValue::Text(s) => Some(s.trim().parse::<f64>().unwrap_or(f64::NAN)),
        }
    }

    /// Text rendering of the value, `None` for null. Whole numbers render
    /// without a fractional part.
    pub fn as_text(&self) -> Option<String> {
        match self {
            AttrValue::Null => None,
            AttrValue::Number(n) => Some(fmt_number(*n)),
            AttrValue::Text(s) => Some(s.clone()),
        }
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Number(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

fn fmt_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

static NULL_VALUE: AttrValue = AttrValue::Null;

/// One spatial feature: an object id plus a field-name → value mapping.
/// Owned by the feature-source collaborator and read-only to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub object_id: i64,
    pub attributes: IndexMap<String, AttrValue>,
}

impl FeatureRecord {
    pub fn new(object_id: i64) -> Self {
        Self {
            object_id,
            attributes: IndexMap::new(),
        }
    }

    /// Builder-style attribute assignment, mostly for tests and fixtures.
    pub fn with_attr(mut self, field: &str, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(field.to_string(), value.into());
        self
    }

    /// Value of a field; a missing field reads as null rather than erroring.
    pub fn value(&self, field: &str) -> &AttrValue {
        self.attributes.get(field).unwrap_or(&NULL_VALUE)
    }
}
