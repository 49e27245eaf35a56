use crate::color::ColorRamp;
use serde::{Deserialize, Serialize};

/// Role → attribute-field-name mapping, supplied once per session.
///
/// Every engine computation resolves its fields through this struct; a
/// role whose field is absent from the records simply yields null/empty
/// output for that computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub usage: String,
    pub tenancy: String,
    pub floor: String,
    pub status: String,
    /// Lease expiry year field (numeric or date-string).
    pub lease_expiry: String,
    /// Exact expiry date field used for the next-expiry statistic.
    pub exact_expiry_date: String,
    pub review_date: String,
    pub review_type: String,
    pub object_id: String,
    /// Building part id; unique values give the unit count.
    pub building_id: String,
    /// Whole-building id; unique values give the whole-building count.
    pub whole_building: String,
    pub area: String,
}

impl FieldSpec {
    /// Field names of the demo portfolio layer.
    pub fn demo() -> Self {
        Self {
            usage: "Use_".to_string(),
            tenancy: "Tenant".to_string(),
            floor: "Floor".to_string(),
            status: "Status".to_string(),
            lease_expiry: "Lease_Expiry_Year".to_string(),
            exact_expiry_date: "Lease_Expiry_Date".to_string(),
            review_date: "Next_Review_Date_Year".to_string(),
            review_type: "Review_Type".to_string(),
            object_id: "OBJECTID".to_string(),
            building_id: "BuildID".to_string(),
            whole_building: "Building_No_".to_string(),
            area: "sq_m".to_string(),
        }
    }
}

/// Per-session configuration: the active layer, the field mapping, and the
/// categorical color ramp as `[r, g, b, a]` rows (rgb 0–255, alpha 0–1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub name: String,
    pub layer: String,
    pub fields: FieldSpec,
    #[serde(default)]
    pub color: Vec<[f32; 4]>,
}

impl SessionConfig {
    pub fn demo() -> Self {
        Self {
            name: "Liffey Campus".to_string(),
            layer: "units".to_string(),
            fields: FieldSpec::demo(),
            color: Vec::new(),
        }
    }

    /// Ramp for categorical renderers: the configured rows, or the built-in
    /// 18-entry default when the config carries none.
    pub fn category_ramp(&self) -> ColorRamp {
        if self.color.is_empty() {
            ColorRamp::category_default()
        } else {
            ColorRamp::from_rows(&self.color)
        }
    }
}
