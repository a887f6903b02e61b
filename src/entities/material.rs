//! Material entity - the root record every property table hangs off

use serde::{Deserialize, Serialize};

/// A material row: brand plus its class/subclass designation.
///
/// The brand is the lookup key for every accessor in the crate
/// (e.g. "20", "30ХМА", "07Х17Н16ТЛ").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    /// Database row id
    pub id: i64,

    /// Brand / trade designation (unique)
    pub brand: String,

    /// Material class (e.g. "Сталь для отливок")
    pub class: String,

    /// Optional subclass refining the class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subclass: Option<String>,
}

/// Fields for creating a new material
#[derive(Debug, Clone, Default)]
pub struct NewMaterial {
    pub brand: String,
    pub class: String,
    pub subclass: Option<String>,
    /// Legacy numeric class index (0..=11), stored in its own table
    pub class_index: Option<i64>,
}

/// Partial update of a material; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct MaterialUpdate {
    pub class: Option<String>,
    pub subclass: Option<Option<String>>,
    pub class_index: Option<Option<i64>>,
}

impl MaterialUpdate {
    pub fn is_empty(&self) -> bool {
        self.class.is_none() && self.subclass.is_none() && self.class_index.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_serialization_skips_empty_subclass() {
        let mat = Material {
            id: 1,
            brand: "20".to_string(),
            class: "Сталь конструкционная".to_string(),
            subclass: None,
        };
        let json = serde_json::to_string(&mat).unwrap();
        assert!(!json.contains("subclass"));
    }

    #[test]
    fn test_update_is_empty() {
        assert!(MaterialUpdate::default().is_empty());
        let upd = MaterialUpdate {
            subclass: Some(None),
            ..Default::default()
        };
        assert!(!upd.is_empty());
    }
}
