//! Mechanical properties entity

use serde::{Deserialize, Serialize};

/// Mechanical properties of a material. All columns are nullable legacy
/// text; tensile_strength carries a semicolon/slash-encoded table parsed
/// by [`crate::parse::strength`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MechanicalProperties {
    pub id: i64,
    pub material_id: i64,

    /// Legacy encoded tensile-strength table (МПа)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tensile_strength: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yield_strength: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elongation_at_break: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_narrowing: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_strength: Option<String>,
}

/// Partial update for mechanical properties; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct MechanicalUpdate {
    pub tensile_strength: Option<String>,
    pub yield_strength: Option<String>,
    pub elongation_at_break: Option<String>,
    pub relative_narrowing: Option<String>,
    pub impact_strength: Option<String>,
}

impl MechanicalUpdate {
    pub fn is_empty(&self) -> bool {
        self.tensile_strength.is_none()
            && self.yield_strength.is_none()
            && self.elongation_at_break.is_none()
            && self.relative_narrowing.is_none()
            && self.impact_strength.is_none()
    }
}
