//! Write-side CRUD operations

use std::collections::BTreeMap;

use miette::{miette, IntoDiagnostic, Result};
use rusqlite::{params, params_from_iter, ErrorCode};

use crate::entities::{
    CharacteristicsUpdate, Element, MaterialUpdate, MechanicalUpdate, NewMaterial,
    TechnologicalUpdate,
};

use super::AlloyDb;

impl AlloyDb {
    /// Row id for a brand, or an error naming the brand
    pub fn material_id_of(&self, brand: &str) -> Result<i64> {
        self.material_by_brand(brand)
            .map(|m| m.id)
            .ok_or_else(|| miette!("no material found for brand '{}'", brand))
    }

    /// Insert a material (and its class index row, when given).
    ///
    /// Returns the new row id; a duplicate brand is an error.
    pub fn create_material(&self, new: &NewMaterial) -> Result<i64> {
        let inserted = self.conn.execute(
            "INSERT INTO materials (brand, class, subclass) VALUES (?1, ?2, ?3)",
            params![new.brand, new.class, new.subclass],
        );

        match inserted {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                return Err(miette!("material '{}' already exists", new.brand));
            }
            Err(e) => return Err(e).into_diagnostic(),
        }

        let material_id = self.conn.last_insert_rowid();

        if let Some(index) = new.class_index {
            self.conn
                .execute(
                    "INSERT INTO material_class_index (material_id, class_index) VALUES (?1, ?2)",
                    params![material_id, index],
                )
                .into_diagnostic()?;
        }

        Ok(material_id)
    }

    /// Apply a partial update to a material. Returns false for an unknown
    /// brand, true when anything was written.
    pub fn update_material(&self, brand: &str, update: &MaterialUpdate) -> Result<bool> {
        let Some(material) = self.material_by_brand(brand) else {
            return Ok(false);
        };

        if let Some(ref class) = update.class {
            self.conn
                .execute(
                    "UPDATE materials SET class = ?1 WHERE id = ?2",
                    params![class, material.id],
                )
                .into_diagnostic()?;
        }

        if let Some(ref subclass) = update.subclass {
            self.conn
                .execute(
                    "UPDATE materials SET subclass = ?1 WHERE id = ?2",
                    params![subclass, material.id],
                )
                .into_diagnostic()?;
        }

        if let Some(index) = update.class_index {
            match index {
                Some(value) => {
                    self.conn
                        .execute(
                            r#"INSERT INTO material_class_index (material_id, class_index)
                           VALUES (?1, ?2)
                           ON CONFLICT(material_id) DO UPDATE SET class_index = ?2"#,
                            params![material.id, value],
                        )
                        .into_diagnostic()?;
                }
                None => {
                    self.conn
                        .execute(
                            "DELETE FROM material_class_index WHERE material_id = ?1",
                            params![material.id],
                        )
                        .into_diagnostic()?;
                }
            }
        }

        Ok(true)
    }

    /// Delete a material and, through FK cascade, every property row
    pub fn delete_material(&self, brand: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM materials WHERE brand = ?1", params![brand])
            .into_diagnostic()?;
        Ok(deleted > 0)
    }

    /// Store (or replace) the legacy hardness text for a brand
    pub fn set_hardness(&self, brand: &str, text: &str) -> Result<()> {
        let material_id = self.material_id_of(brand)?;
        self.conn
            .execute(
                r#"INSERT INTO hardness (material_id, hardness) VALUES (?1, ?2)
               ON CONFLICT(material_id) DO UPDATE SET hardness = ?2"#,
                params![material_id, text],
            )
            .into_diagnostic()?;
        Ok(())
    }

    pub fn clear_hardness(&self, brand: &str) -> Result<bool> {
        let material_id = self.material_id_of(brand)?;
        let deleted = self
            .conn
            .execute(
                "DELETE FROM hardness WHERE material_id = ?1",
                params![material_id],
            )
            .into_diagnostic()?;
        Ok(deleted > 0)
    }

    /// Store (or replace) the chemical composition of a brand.
    ///
    /// `standard`, when given, is recorded in the standards table and
    /// linked via standard_id. Replacement is whole-row: elements absent
    /// from the map end up NULL.
    pub fn set_chemical(
        &self,
        brand: &str,
        standard: Option<&str>,
        elements: &BTreeMap<Element, String>,
    ) -> Result<()> {
        let material_id = self.material_id_of(brand)?;
        let standard_id = match standard {
            Some(designation) => Some(self.add_standard(brand, designation)?),
            None => None,
        };

        self.conn
            .execute(
                "DELETE FROM chemical_composition WHERE material_id = ?1",
                params![material_id],
            )
            .into_diagnostic()?;

        let columns = Element::all()
            .iter()
            .map(|el| el.column())
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (3..3 + Element::all().len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO chemical_composition (material_id, standard_id, {columns}) VALUES (?1, ?2, {placeholders})"
        );

        let mut values: Vec<Box<dyn rusqlite::ToSql>> =
            vec![Box::new(material_id), Box::new(standard_id)];
        for el in Element::all() {
            values.push(Box::new(elements.get(el).cloned()));
        }

        self.conn
            .execute(&sql, params_from_iter(values.iter().map(|v| v.as_ref())))
            .into_diagnostic()?;
        Ok(())
    }

    pub fn clear_chemical(&self, brand: &str) -> Result<bool> {
        let material_id = self.material_id_of(brand)?;
        let deleted = self
            .conn
            .execute(
                "DELETE FROM chemical_composition WHERE material_id = ?1",
                params![material_id],
            )
            .into_diagnostic()?;
        Ok(deleted > 0)
    }

    /// Merge mechanical property fields; unset fields keep their value
    pub fn set_mechanical(&self, brand: &str, update: &MechanicalUpdate) -> Result<()> {
        let material_id = self.material_id_of(brand)?;
        let existing = self.mechanical_by_brand(brand).unwrap_or_default();

        let tensile = update
            .tensile_strength
            .clone()
            .or(existing.tensile_strength);
        let yield_s = update.yield_strength.clone().or(existing.yield_strength);
        let elongation = update
            .elongation_at_break
            .clone()
            .or(existing.elongation_at_break);
        let narrowing = update
            .relative_narrowing
            .clone()
            .or(existing.relative_narrowing);
        let impact = update.impact_strength.clone().or(existing.impact_strength);

        self.conn
            .execute(
                r#"INSERT INTO mechanical_properties
                   (material_id, tensile_strength, yield_strength,
                    elongation_at_break, relative_narrowing, impact_strength)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6)
               ON CONFLICT(material_id) DO UPDATE SET
                   tensile_strength = ?2, yield_strength = ?3,
                   elongation_at_break = ?4, relative_narrowing = ?5,
                   impact_strength = ?6"#,
                params![material_id, tensile, yield_s, elongation, narrowing, impact],
            )
            .into_diagnostic()?;
        Ok(())
    }

    pub fn clear_mechanical(&self, brand: &str) -> Result<bool> {
        let material_id = self.material_id_of(brand)?;
        let deleted = self
            .conn
            .execute(
                "DELETE FROM mechanical_properties WHERE material_id = ?1",
                params![material_id],
            )
            .into_diagnostic()?;
        Ok(deleted > 0)
    }

    /// Merge technological property fields
    pub fn set_technological(&self, brand: &str, update: &TechnologicalUpdate) -> Result<()> {
        let material_id = self.material_id_of(brand)?;
        let existing = self.technological_by_brand(brand).unwrap_or_default();

        let weldability = update.weldability.clone().or(existing.weldability);
        let flock = update
            .flock_sensitivity
            .clone()
            .or(existing.flock_sensitivity);
        let temper = update
            .temper_brittleness
            .clone()
            .or(existing.temper_brittleness);

        self.conn
            .execute(
                r#"INSERT INTO technological_properties
                   (material_id, weldability, flock_sensitivity, temper_brittleness)
               VALUES (?1, ?2, ?3, ?4)
               ON CONFLICT(material_id) DO UPDATE SET
                   weldability = ?2, flock_sensitivity = ?3, temper_brittleness = ?4"#,
                params![material_id, weldability, flock, temper],
            )
            .into_diagnostic()?;
        Ok(())
    }

    pub fn clear_technological(&self, brand: &str) -> Result<bool> {
        let material_id = self.material_id_of(brand)?;
        let deleted = self
            .conn
            .execute(
                "DELETE FROM technological_properties WHERE material_id = ?1",
                params![material_id],
            )
            .into_diagnostic()?;
        Ok(deleted > 0)
    }

    /// Merge characteristics fields
    pub fn set_characteristics(&self, brand: &str, update: &CharacteristicsUpdate) -> Result<()> {
        let material_id = self.material_id_of(brand)?;
        let existing = self.characteristics_by_brand(brand).unwrap_or_default();

        let classification = update.classification.clone().or(existing.classification);
        let application = update.application.clone().or(existing.application);
        let analogs = update.foreign_analogs.clone().or(existing.foreign_analogs);
        let info = update.additional_info.clone().or(existing.additional_info);
        let replacement = update.replacement.clone().or(existing.replacement);

        self.conn
            .execute(
                r#"INSERT INTO characteristics
                   (material_id, classification, application, foreign_analogs,
                    additional_info, replacement)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6)
               ON CONFLICT(material_id) DO UPDATE SET
                   classification = ?2, application = ?3, foreign_analogs = ?4,
                   additional_info = ?5, replacement = ?6"#,
                params![
                    material_id,
                    classification,
                    application,
                    analogs,
                    info,
                    replacement
                ],
            )
            .into_diagnostic()?;
        Ok(())
    }

    pub fn clear_characteristics(&self, brand: &str) -> Result<bool> {
        let material_id = self.material_id_of(brand)?;
        let deleted = self
            .conn
            .execute(
                "DELETE FROM characteristics WHERE material_id = ?1",
                params![material_id],
            )
            .into_diagnostic()?;
        Ok(deleted > 0)
    }

    /// Record a standard for a material name; returns the row id whether
    /// freshly inserted or already present
    pub fn add_standard(&self, material_name: &str, standard: &str) -> Result<i64> {
        self.conn
            .execute(
                "INSERT OR IGNORE INTO standards (material_name, standard) VALUES (?1, ?2)",
                params![material_name, standard],
            )
            .into_diagnostic()?;
        self.conn
            .query_row(
                "SELECT id FROM standards WHERE material_name = ?1 AND standard = ?2",
                params![material_name, standard],
                |row| row.get(0),
            )
            .into_diagnostic()
    }

    pub fn delete_standard(&self, id: i64) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM standards WHERE id = ?1", params![id])
            .into_diagnostic()?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MaterialFilter;

    fn steel20() -> NewMaterial {
        NewMaterial {
            brand: "20".to_string(),
            class: "Сталь конструкционная".to_string(),
            subclass: Some("углеродистая качественная".to_string()),
            class_index: Some(2),
        }
    }

    #[test]
    fn test_create_and_find_material() {
        let db = AlloyDb::open_in_memory().unwrap();
        let id = db.create_material(&steel20()).unwrap();

        let found = db.material_by_brand("20").unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.class, "Сталь конструкционная");
        assert_eq!(db.class_index_for(id), Some(2));
        assert_eq!(db.material_by_id(id).unwrap().brand, "20");
    }

    #[test]
    fn test_duplicate_brand_is_error() {
        let db = AlloyDb::open_in_memory().unwrap();
        db.create_material(&steel20()).unwrap();
        let err = db.create_material(&steel20()).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_update_material() {
        let db = AlloyDb::open_in_memory().unwrap();
        db.create_material(&steel20()).unwrap();

        let touched = db
            .update_material(
                "20",
                &MaterialUpdate {
                    class: Some("Сталь для отливок".to_string()),
                    subclass: Some(None),
                    class_index: Some(Some(4)),
                },
            )
            .unwrap();
        assert!(touched);

        let mat = db.material_by_brand("20").unwrap();
        assert_eq!(mat.class, "Сталь для отливок");
        assert_eq!(mat.subclass, None);
        assert_eq!(db.class_index_for(mat.id), Some(4));

        assert!(!db.update_material("нет", &MaterialUpdate::default()).unwrap());
    }

    #[test]
    fn test_clear_class_index() {
        let db = AlloyDb::open_in_memory().unwrap();
        let id = db.create_material(&steel20()).unwrap();
        db.update_material(
            "20",
            &MaterialUpdate {
                class_index: Some(None),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(db.class_index_for(id), None);
    }

    #[test]
    fn test_delete_cascades_to_properties() {
        let db = AlloyDb::open_in_memory().unwrap();
        db.create_material(&steel20()).unwrap();
        db.set_hardness("20", "Твердость 20 ,/HB 10 -1 = 163 МПа;")
            .unwrap();
        db.set_technological(
            "20",
            &TechnologicalUpdate {
                weldability: Some("без ограничений".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        assert!(db.delete_material("20").unwrap());
        assert!(db.material_by_brand("20").is_none());
        assert!(db.hardness_by_brand("20").is_none());
        assert!(db.technological_by_brand("20").is_none());
        assert!(!db.delete_material("20").unwrap());
    }

    #[test]
    fn test_set_hardness_requires_material() {
        let db = AlloyDb::open_in_memory().unwrap();
        assert!(db.set_hardness("20", "whatever").is_err());
    }

    #[test]
    fn test_set_hardness_replaces() {
        let db = AlloyDb::open_in_memory().unwrap();
        db.create_material(&steel20()).unwrap();
        db.set_hardness("20", "первый").unwrap();
        db.set_hardness("20", "второй").unwrap();
        assert_eq!(db.hardness_by_brand("20").unwrap().hardness, "второй");
        assert!(db.clear_hardness("20").unwrap());
        assert!(db.hardness_by_brand("20").is_none());
    }

    #[test]
    fn test_set_chemical_and_standard_link() {
        let db = AlloyDb::open_in_memory().unwrap();
        db.create_material(&steel20()).unwrap();

        let mut elements = BTreeMap::new();
        elements.insert(Element::C, "0.17 - 0.24".to_string());
        elements.insert(Element::Si, "0.17 - 0.37".to_string());
        db.set_chemical("20", Some("ГОСТ 1050 - 2013"), &elements)
            .unwrap();

        let comp = db.chemical_by_brand("20").unwrap();
        assert_eq!(comp.content(Element::C), Some("0.17 - 0.24"));
        assert_eq!(comp.content(Element::Mn), None);
        assert_eq!(comp.elements.len(), 2);

        let standard = db.standard_by_id(comp.standard_id.unwrap()).unwrap();
        assert_eq!(standard.standard, "ГОСТ 1050 - 2013");
        assert_eq!(db.standards_for("20").len(), 1);
        assert_eq!(db.chemical_by_id(comp.id).unwrap().id, comp.id);
    }

    #[test]
    fn test_set_chemical_is_whole_row_replace() {
        let db = AlloyDb::open_in_memory().unwrap();
        db.create_material(&steel20()).unwrap();

        let mut first = BTreeMap::new();
        first.insert(Element::C, "0.2".to_string());
        db.set_chemical("20", None, &first).unwrap();

        let mut second = BTreeMap::new();
        second.insert(Element::Mn, "0.35 - 0.65".to_string());
        db.set_chemical("20", None, &second).unwrap();

        let comp = db.chemical_by_brand("20").unwrap();
        assert_eq!(comp.content(Element::C), None);
        assert_eq!(comp.content(Element::Mn), Some("0.35 - 0.65"));
    }

    #[test]
    fn test_set_mechanical_merges() {
        let db = AlloyDb::open_in_memory().unwrap();
        db.create_material(&steel20()).unwrap();

        db.set_mechanical(
            "20",
            &MechanicalUpdate {
                tensile_strength: Some("410".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        db.set_mechanical(
            "20",
            &MechanicalUpdate {
                yield_strength: Some("245".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        let mech = db.mechanical_by_brand("20").unwrap();
        assert_eq!(mech.tensile_strength.as_deref(), Some("410"));
        assert_eq!(mech.yield_strength.as_deref(), Some("245"));
        assert_eq!(db.mechanical_by_id(mech.id).unwrap(), mech);
    }

    #[test]
    fn test_set_characteristics_merges() {
        let db = AlloyDb::open_in_memory().unwrap();
        db.create_material(&steel20()).unwrap();
        db.set_characteristics(
            "20",
            &CharacteristicsUpdate {
                application: Some("валы, оси".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        let chars = db.characteristics_by_brand("20").unwrap();
        assert_eq!(chars.application.as_deref(), Some("валы, оси"));
        assert!(db.clear_characteristics("20").unwrap());
    }

    #[test]
    fn test_add_standard_is_idempotent() {
        let db = AlloyDb::open_in_memory().unwrap();
        let a = db.add_standard("20", "ГОСТ 1050 - 2013").unwrap();
        let b = db.add_standard("20", "ГОСТ 1050 - 2013").unwrap();
        assert_eq!(a, b);
        assert_eq!(db.list_standards().len(), 1);
        assert!(db.delete_standard(a).unwrap());
        assert!(db.list_standards().is_empty());
    }

    #[test]
    fn test_list_and_class_queries() {
        let db = AlloyDb::open_in_memory().unwrap();
        db.create_material(&steel20()).unwrap();
        db.create_material(&NewMaterial {
            brand: "07Х17Н16ТЛ".to_string(),
            class: "Сталь для отливок".to_string(),
            subclass: None,
            class_index: Some(4),
        })
        .unwrap();
        db.create_material(&NewMaterial {
            brand: "110Г13Л".to_string(),
            class: "Сталь для отливок".to_string(),
            subclass: None,
            class_index: Some(4),
        })
        .unwrap();

        assert_eq!(
            db.brands_by_class("Сталь для отливок"),
            vec!["07Х17Н16ТЛ", "110Г13Л"]
        );
        assert_eq!(db.brands_by_index(4).len(), 2);
        assert_eq!(
            db.brands_by_subclass("углеродистая качественная"),
            vec!["20"]
        );

        let classes = db.classes();
        assert_eq!(classes.len(), 2);
        let cast = classes
            .iter()
            .find(|c| c.class == "Сталь для отливок")
            .unwrap();
        assert_eq!(cast.count, 2);

        let limited = db.list_materials(&MaterialFilter {
            limit: Some(1),
            ..Default::default()
        });
        assert_eq!(limited.len(), 1);

        let searched = db.list_materials(&MaterialFilter {
            search: Some("Х17".to_string()),
            ..Default::default()
        });
        assert_eq!(searched.len(), 1);
        assert_eq!(searched[0].brand, "07Х17Н16ТЛ");
    }
}
