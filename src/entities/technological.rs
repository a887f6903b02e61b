//! Technological properties entity

use serde::{Deserialize, Serialize};

/// Technological properties: weldability, flock sensitivity and temper
/// brittleness, as free-text descriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnologicalProperties {
    pub id: i64,
    pub material_id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weldability: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flock_sensitivity: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temper_brittleness: Option<String>,
}

/// Partial update for technological properties
#[derive(Debug, Clone, Default)]
pub struct TechnologicalUpdate {
    pub weldability: Option<String>,
    pub flock_sensitivity: Option<String>,
    pub temper_brittleness: Option<String>,
}

impl TechnologicalUpdate {
    pub fn is_empty(&self) -> bool {
        self.weldability.is_none()
            && self.flock_sensitivity.is_none()
            && self.temper_brittleness.is_none()
    }
}
