//! Read-side finders, keyed by brand
//!
//! Lookup misses (unknown brand, missing property row) come back as
//! `None`/empty rather than errors; deciding whether a miss is fatal is
//! the caller's business.

use std::collections::BTreeMap;

use rusqlite::{params, OptionalExtension, Row};

use crate::entities::{
    Characteristics, ChemicalComposition, Element, Hardness, Material, MechanicalProperties,
    Standard, TechnologicalProperties,
};

use super::AlloyDb;

/// Filter for listing materials
#[derive(Debug, Default)]
pub struct MaterialFilter {
    pub class: Option<String>,
    pub subclass: Option<String>,
    pub class_index: Option<i64>,
    /// Substring match against brand and class
    pub search: Option<String>,
    pub limit: Option<usize>,
}

/// A class with the number of materials in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassCount {
    pub class: String,
    pub count: usize,
}

fn map_material(row: &Row) -> rusqlite::Result<Material> {
    Ok(Material {
        id: row.get(0)?,
        brand: row.get(1)?,
        class: row.get(2)?,
        subclass: row.get(3)?,
    })
}

fn map_hardness(row: &Row) -> rusqlite::Result<Hardness> {
    Ok(Hardness {
        id: row.get(0)?,
        material_id: row.get(1)?,
        hardness: row.get(2)?,
    })
}

fn map_mechanical(row: &Row) -> rusqlite::Result<MechanicalProperties> {
    Ok(MechanicalProperties {
        id: row.get(0)?,
        material_id: row.get(1)?,
        tensile_strength: row.get(2)?,
        yield_strength: row.get(3)?,
        elongation_at_break: row.get(4)?,
        relative_narrowing: row.get(5)?,
        impact_strength: row.get(6)?,
    })
}

fn map_technological(row: &Row) -> rusqlite::Result<TechnologicalProperties> {
    Ok(TechnologicalProperties {
        id: row.get(0)?,
        material_id: row.get(1)?,
        weldability: row.get(2)?,
        flock_sensitivity: row.get(3)?,
        temper_brittleness: row.get(4)?,
    })
}

fn map_characteristics(row: &Row) -> rusqlite::Result<Characteristics> {
    Ok(Characteristics {
        id: row.get(0)?,
        material_id: row.get(1)?,
        classification: row.get(2)?,
        application: row.get(3)?,
        foreign_analogs: row.get(4)?,
        additional_info: row.get(5)?,
        replacement: row.get(6)?,
    })
}

fn map_standard(row: &Row) -> rusqlite::Result<Standard> {
    Ok(Standard {
        id: row.get(0)?,
        material_name: row.get(1)?,
        standard: row.get(2)?,
    })
}

fn map_chemical(row: &Row) -> rusqlite::Result<ChemicalComposition> {
    let mut elements = BTreeMap::new();
    for (i, el) in Element::all().iter().enumerate() {
        if let Some(content) = row.get::<_, Option<String>>(3 + i)? {
            let content = content.trim().to_string();
            if !content.is_empty() {
                elements.insert(*el, content);
            }
        }
    }
    Ok(ChemicalComposition {
        id: row.get(0)?,
        material_id: row.get(1)?,
        standard_id: row.get(2)?,
        elements,
    })
}

fn chemical_columns() -> String {
    Element::all()
        .iter()
        .map(|el| format!("cc.{}", el.column()))
        .collect::<Vec<_>>()
        .join(", ")
}

impl AlloyDb {
    /// Get a material by brand
    pub fn material_by_brand(&self, brand: &str) -> Option<Material> {
        self.conn
            .query_row(
                "SELECT id, brand, class, subclass FROM materials WHERE brand = ?1",
                params![brand],
                map_material,
            )
            .optional()
            .ok()
            .flatten()
    }

    /// Get a material by row id
    pub fn material_by_id(&self, id: i64) -> Option<Material> {
        self.conn
            .query_row(
                "SELECT id, brand, class, subclass FROM materials WHERE id = ?1",
                params![id],
                map_material,
            )
            .optional()
            .ok()
            .flatten()
    }

    /// Legacy class index for a material, if recorded
    pub fn class_index_for(&self, material_id: i64) -> Option<i64> {
        self.conn
            .query_row(
                "SELECT class_index FROM material_class_index WHERE material_id = ?1",
                params![material_id],
                |row| row.get(0),
            )
            .optional()
            .ok()
            .flatten()
    }

    /// Raw hardness record for a brand
    pub fn hardness_by_brand(&self, brand: &str) -> Option<Hardness> {
        self.conn
            .query_row(
                r#"SELECT h.id, h.material_id, h.hardness
               FROM hardness h
               JOIN materials m ON h.material_id = m.id
               WHERE m.brand = ?1"#,
                params![brand],
                map_hardness,
            )
            .optional()
            .ok()
            .flatten()
    }

    pub fn hardness_by_id(&self, id: i64) -> Option<Hardness> {
        self.conn
            .query_row(
                "SELECT id, material_id, hardness FROM hardness WHERE id = ?1",
                params![id],
                map_hardness,
            )
            .optional()
            .ok()
            .flatten()
    }

    /// Chemical composition for a brand (non-empty columns only)
    pub fn chemical_by_brand(&self, brand: &str) -> Option<ChemicalComposition> {
        let sql = format!(
            r#"SELECT cc.id, cc.material_id, cc.standard_id, {}
               FROM chemical_composition cc
               JOIN materials m ON cc.material_id = m.id
               WHERE m.brand = ?1"#,
            chemical_columns()
        );
        self.conn
            .query_row(&sql, params![brand], map_chemical)
            .optional()
            .ok()
            .flatten()
    }

    pub fn chemical_by_id(&self, id: i64) -> Option<ChemicalComposition> {
        let sql = format!(
            "SELECT cc.id, cc.material_id, cc.standard_id, {} FROM chemical_composition cc WHERE cc.id = ?1",
            chemical_columns()
        );
        self.conn
            .query_row(&sql, params![id], map_chemical)
            .optional()
            .ok()
            .flatten()
    }

    /// Mechanical properties for a brand
    pub fn mechanical_by_brand(&self, brand: &str) -> Option<MechanicalProperties> {
        self.conn
            .query_row(
                r#"SELECT p.id, p.material_id, p.tensile_strength, p.yield_strength,
                      p.elongation_at_break, p.relative_narrowing, p.impact_strength
               FROM mechanical_properties p
               JOIN materials m ON p.material_id = m.id
               WHERE m.brand = ?1"#,
                params![brand],
                map_mechanical,
            )
            .optional()
            .ok()
            .flatten()
    }

    pub fn mechanical_by_id(&self, id: i64) -> Option<MechanicalProperties> {
        self.conn
            .query_row(
                r#"SELECT id, material_id, tensile_strength, yield_strength,
                      elongation_at_break, relative_narrowing, impact_strength
               FROM mechanical_properties WHERE id = ?1"#,
                params![id],
                map_mechanical,
            )
            .optional()
            .ok()
            .flatten()
    }

    /// Technological properties for a brand
    pub fn technological_by_brand(&self, brand: &str) -> Option<TechnologicalProperties> {
        self.conn
            .query_row(
                r#"SELECT p.id, p.material_id, p.weldability, p.flock_sensitivity, p.temper_brittleness
               FROM technological_properties p
               JOIN materials m ON p.material_id = m.id
               WHERE m.brand = ?1"#,
                params![brand],
                map_technological,
            )
            .optional()
            .ok()
            .flatten()
    }

    pub fn technological_by_id(&self, id: i64) -> Option<TechnologicalProperties> {
        self.conn
            .query_row(
                r#"SELECT id, material_id, weldability, flock_sensitivity, temper_brittleness
               FROM technological_properties WHERE id = ?1"#,
                params![id],
                map_technological,
            )
            .optional()
            .ok()
            .flatten()
    }

    /// Descriptive characteristics for a brand
    pub fn characteristics_by_brand(&self, brand: &str) -> Option<Characteristics> {
        self.conn
            .query_row(
                r#"SELECT c.id, c.material_id, c.classification, c.application,
                      c.foreign_analogs, c.additional_info, c.replacement
               FROM characteristics c
               JOIN materials m ON c.material_id = m.id
               WHERE m.brand = ?1"#,
                params![brand],
                map_characteristics,
            )
            .optional()
            .ok()
            .flatten()
    }

    pub fn characteristics_by_id(&self, id: i64) -> Option<Characteristics> {
        self.conn
            .query_row(
                r#"SELECT id, material_id, classification, application,
                      foreign_analogs, additional_info, replacement
               FROM characteristics WHERE id = ?1"#,
                params![id],
                map_characteristics,
            )
            .optional()
            .ok()
            .flatten()
    }

    /// Standards recorded for a material name
    pub fn standards_for(&self, material_name: &str) -> Vec<Standard> {
        let mut stmt = match self.conn.prepare(
            "SELECT id, material_name, standard FROM standards WHERE material_name = ?1 ORDER BY standard",
        ) {
            Ok(s) => s,
            Err(_) => return vec![],
        };
        let rows = match stmt.query_map(params![material_name], map_standard) {
            Ok(r) => r,
            Err(_) => return vec![],
        };
        rows.filter_map(|r| r.ok()).collect()
    }

    pub fn standard_by_id(&self, id: i64) -> Option<Standard> {
        self.conn
            .query_row(
                "SELECT id, material_name, standard FROM standards WHERE id = ?1",
                params![id],
                map_standard,
            )
            .optional()
            .ok()
            .flatten()
    }

    /// All standards, ordered by material name
    pub fn list_standards(&self) -> Vec<Standard> {
        let mut stmt = match self.conn.prepare(
            "SELECT id, material_name, standard FROM standards ORDER BY material_name, standard",
        ) {
            Ok(s) => s,
            Err(_) => return vec![],
        };
        let rows = match stmt.query_map([], map_standard) {
            Ok(r) => r,
            Err(_) => return vec![],
        };
        rows.filter_map(|r| r.ok()).collect()
    }

    /// List materials with filters, ordered by brand
    pub fn list_materials(&self, filter: &MaterialFilter) -> Vec<Material> {
        let mut sql = String::from(
            r#"SELECT m.id, m.brand, m.class, m.subclass
               FROM materials m
               LEFT JOIN material_class_index ci ON ci.material_id = m.id
               WHERE 1=1"#,
        );
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = vec![];

        if let Some(ref class) = filter.class {
            sql.push_str(" AND m.class = ?");
            params_vec.push(Box::new(class.clone()));
        }

        if let Some(ref subclass) = filter.subclass {
            sql.push_str(" AND m.subclass = ?");
            params_vec.push(Box::new(subclass.clone()));
        }

        if let Some(index) = filter.class_index {
            sql.push_str(" AND ci.class_index = ?");
            params_vec.push(Box::new(index));
        }

        if let Some(ref search) = filter.search {
            sql.push_str(" AND (m.brand LIKE ? OR m.class LIKE ?)");
            let pattern = format!("%{}%", search);
            params_vec.push(Box::new(pattern.clone()));
            params_vec.push(Box::new(pattern));
        }

        sql.push_str(" ORDER BY m.brand ASC");

        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        let mut stmt = match self.conn.prepare(&sql) {
            Ok(s) => s,
            Err(_) => return vec![],
        };

        let params_refs: Vec<&dyn rusqlite::ToSql> =
            params_vec.iter().map(|p| p.as_ref()).collect();

        let rows = match stmt.query_map(params_refs.as_slice(), map_material) {
            Ok(r) => r,
            Err(_) => return vec![],
        };

        rows.filter_map(|r| r.ok()).collect()
    }

    /// Sorted brand list for a class
    pub fn brands_by_class(&self, class: &str) -> Vec<String> {
        self.list_materials(&MaterialFilter {
            class: Some(class.to_string()),
            ..Default::default()
        })
        .into_iter()
        .map(|m| m.brand)
        .collect()
    }

    /// Sorted brand list for a subclass
    pub fn brands_by_subclass(&self, subclass: &str) -> Vec<String> {
        self.list_materials(&MaterialFilter {
            subclass: Some(subclass.to_string()),
            ..Default::default()
        })
        .into_iter()
        .map(|m| m.brand)
        .collect()
    }

    /// Sorted brand list for a legacy class index
    pub fn brands_by_index(&self, class_index: i64) -> Vec<String> {
        self.list_materials(&MaterialFilter {
            class_index: Some(class_index),
            ..Default::default()
        })
        .into_iter()
        .map(|m| m.brand)
        .collect()
    }

    /// Distinct classes with material counts
    pub fn classes(&self) -> Vec<ClassCount> {
        let mut stmt = match self
            .conn
            .prepare("SELECT class, COUNT(*) FROM materials GROUP BY class ORDER BY class")
        {
            Ok(s) => s,
            Err(_) => return vec![],
        };
        let rows = match stmt.query_map([], |row| {
            Ok(ClassCount {
                class: row.get(0)?,
                count: row.get::<_, i64>(1)? as usize,
            })
        }) {
            Ok(r) => r,
            Err(_) => return vec![],
        };
        rows.filter_map(|r| r.ok()).collect()
    }
}
