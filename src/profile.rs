//! Composite material profile: the record consumers actually want
//!
//! Pulls every property table together for one brand, decoding the legacy
//! hardness and tensile-strength text along the way. The listers filter
//! assembled profiles by class, subclass or legacy class index.

use std::collections::BTreeMap;

use miette::{miette, IntoDiagnostic, Result};
use serde::Serialize;

use crate::db::AlloyDb;
use crate::entities::{Characteristics, MechanicalProperties, TechnologicalProperties};
use crate::parse::range::mean_of;
use crate::parse::{hardness, strength, HardnessRow, StrengthRow};

/// Assembled engineering properties of one material
#[derive(Debug, Clone, Serialize)]
pub struct MaterialProfile {
    pub brand: String,
    pub class: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subclass: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_index: Option<i64>,

    /// Non-empty element contents, keyed by chemical symbol
    pub chemical_composition: BTreeMap<String, String>,

    /// Parsed hardness table (condition → MPa)
    pub hardness: Vec<HardnessRow>,

    /// Mean hardness over the table, MPa
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardness_mpa: Option<f64>,

    /// Parsed tensile-strength table (condition → MPa)
    pub tensile_strength: Vec<StrengthRow>,

    /// Mean tensile strength over the table, MPa
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tensile_strength_mpa: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mechanical: Option<MechanicalProperties>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub technological: Option<TechnologicalProperties>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub characteristics: Option<Characteristics>,

    /// Standard designations recorded for this material
    pub standards: Vec<String>,
}

impl MaterialProfile {
    /// A profile carrying nothing but the brand
    pub fn empty(brand: &str) -> Self {
        Self {
            brand: brand.to_string(),
            class: String::new(),
            subclass: None,
            class_index: None,
            chemical_composition: BTreeMap::new(),
            hardness: Vec::new(),
            hardness_mpa: None,
            tensile_strength: Vec::new(),
            tensile_strength_mpa: None,
            mechanical: None,
            technological: None,
            characteristics: None,
            standards: Vec::new(),
        }
    }

    /// Assemble the full profile for a brand.
    ///
    /// Missing property rows leave their section empty; an unknown brand
    /// or undecodable legacy text is an error.
    pub fn assemble(db: &AlloyDb, brand: &str) -> Result<Self> {
        let material = db
            .material_by_brand(brand)
            .ok_or_else(|| miette!("no material found for brand '{}'", brand))?;

        let class_index = db.class_index_for(material.id);

        let chemical_composition = db
            .chemical_by_brand(brand)
            .map(|comp| {
                comp.entries()
                    .into_iter()
                    .map(|(symbol, content)| (symbol.to_string(), content.to_string()))
                    .collect()
            })
            .unwrap_or_default();

        let (hardness_rows, hardness_mpa) = match db.hardness_by_brand(brand) {
            Some(record) => {
                let rows = hardness::parse_table(brand, &record.hardness).into_diagnostic()?;
                let means: Vec<_> = rows.iter().map(|r| r.mpa).collect();
                (rows, mean_of(&means))
            }
            None => (Vec::new(), None),
        };

        let mechanical = db.mechanical_by_brand(brand);
        let (strength_rows, strength_mpa) =
            match mechanical.as_ref().and_then(|m| m.tensile_strength.as_deref()) {
                Some(text) => {
                    let rows = strength::parse_table(brand, text).into_diagnostic()?;
                    let means: Vec<_> = rows.iter().map(|r| r.mpa).collect();
                    (rows, mean_of(&means))
                }
                None => (Vec::new(), None),
            };

        let standards = db
            .standards_for(brand)
            .into_iter()
            .map(|s| s.standard)
            .collect();

        Ok(Self {
            brand: material.brand,
            class: material.class,
            subclass: material.subclass,
            class_index,
            chemical_composition,
            hardness: hardness_rows,
            hardness_mpa,
            tensile_strength: strength_rows,
            tensile_strength_mpa: strength_mpa,
            mechanical,
            technological: db.technological_by_brand(brand),
            characteristics: db.characteristics_by_brand(brand),
            standards,
        })
    }
}

/// Profiles of every material, sorted by brand
pub fn all_profiles(db: &AlloyDb) -> Result<Vec<MaterialProfile>> {
    assemble_brands(db, db.list_materials(&Default::default()).into_iter().map(|m| m.brand))
}

/// Profiles of every material in a class
pub fn profiles_by_class(db: &AlloyDb, class: &str) -> Result<Vec<MaterialProfile>> {
    assemble_brands(db, db.brands_by_class(class))
}

/// Profiles of every material in a subclass
pub fn profiles_by_subclass(db: &AlloyDb, subclass: &str) -> Result<Vec<MaterialProfile>> {
    assemble_brands(db, db.brands_by_subclass(subclass))
}

/// Profiles of every material under a legacy class index
pub fn profiles_by_index(db: &AlloyDb, class_index: i64) -> Result<Vec<MaterialProfile>> {
    assemble_brands(db, db.brands_by_index(class_index))
}

fn assemble_brands(
    db: &AlloyDb,
    brands: impl IntoIterator<Item = String>,
) -> Result<Vec<MaterialProfile>> {
    brands
        .into_iter()
        .map(|brand| MaterialProfile::assemble(db, &brand))
        .collect()
}
