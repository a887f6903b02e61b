//! Material characteristics entity

use serde::{Deserialize, Serialize};

/// Descriptive characteristics: classification, application area, foreign
/// analogs, free-form notes and possible replacements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Characteristics {
    pub id: i64,
    pub material_id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_analogs: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
}

/// Partial update for characteristics
#[derive(Debug, Clone, Default)]
pub struct CharacteristicsUpdate {
    pub classification: Option<String>,
    pub application: Option<String>,
    pub foreign_analogs: Option<String>,
    pub additional_info: Option<String>,
    pub replacement: Option<String>,
}

impl CharacteristicsUpdate {
    pub fn is_empty(&self) -> bool {
        self.classification.is_none()
            && self.application.is_none()
            && self.foreign_analogs.is_none()
            && self.additional_info.is_none()
            && self.replacement.is_none()
    }
}
