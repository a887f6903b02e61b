//! Database schema initialization

use miette::{IntoDiagnostic, Result};
use rusqlite::params;

use crate::entities::Element;

use super::{AlloyDb, SCHEMA_VERSION};

impl AlloyDb {
    /// Initialize the database schema
    pub(super) fn init_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(
                r#"
            -- Schema version tracking
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            );

            -- Materials: the root table, one row per brand
            CREATE TABLE IF NOT EXISTS materials (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                brand TEXT NOT NULL UNIQUE,
                class TEXT NOT NULL,
                subclass TEXT
            );
            CREATE INDEX IF NOT EXISTS idx_materials_class ON materials(class);
            CREATE INDEX IF NOT EXISTS idx_materials_subclass ON materials(subclass);

            -- Legacy numeric class index (0..=11), one-to-one with materials
            CREATE TABLE IF NOT EXISTS material_class_index (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                material_id INTEGER NOT NULL UNIQUE
                    REFERENCES materials(id) ON DELETE CASCADE,
                class_index INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_class_index_value
                ON material_class_index(class_index);

            -- Hardness: the legacy encoded table text, verbatim
            CREATE TABLE IF NOT EXISTS hardness (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                material_id INTEGER NOT NULL UNIQUE
                    REFERENCES materials(id) ON DELETE CASCADE,
                hardness TEXT NOT NULL
            );

            -- Standards (GOST/TU designations), keyed by material name
            CREATE TABLE IF NOT EXISTS standards (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                material_name TEXT NOT NULL,
                standard TEXT NOT NULL,
                UNIQUE (material_name, standard)
            );
            CREATE INDEX IF NOT EXISTS idx_standards_material
                ON standards(material_name);

            -- Mechanical properties, legacy text columns
            CREATE TABLE IF NOT EXISTS mechanical_properties (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                material_id INTEGER NOT NULL UNIQUE
                    REFERENCES materials(id) ON DELETE CASCADE,
                tensile_strength TEXT,
                yield_strength TEXT,
                elongation_at_break TEXT,
                relative_narrowing TEXT,
                impact_strength TEXT
            );

            -- Technological properties
            CREATE TABLE IF NOT EXISTS technological_properties (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                material_id INTEGER NOT NULL UNIQUE
                    REFERENCES materials(id) ON DELETE CASCADE,
                weldability TEXT,
                flock_sensitivity TEXT,
                temper_brittleness TEXT
            );

            -- Descriptive characteristics
            CREATE TABLE IF NOT EXISTS characteristics (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                material_id INTEGER NOT NULL UNIQUE
                    REFERENCES materials(id) ON DELETE CASCADE,
                classification TEXT,
                application TEXT,
                foreign_analogs TEXT,
                additional_info TEXT,
                replacement TEXT
            );
            "#,
            )
            .into_diagnostic()?;

        // The chemical composition table carries one TEXT column per element;
        // the column list is derived from Element so the two cannot drift.
        self.conn
            .execute_batch(&chemical_composition_ddl())
            .into_diagnostic()?;

        self.conn
            .execute(
                "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
                params![SCHEMA_VERSION],
            )
            .into_diagnostic()?;

        Ok(())
    }
}

fn chemical_composition_ddl() -> String {
    let element_columns = Element::all()
        .iter()
        .map(|el| format!("                {} TEXT", el.column()))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        r#"
            CREATE TABLE IF NOT EXISTS chemical_composition (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                material_id INTEGER NOT NULL UNIQUE
                    REFERENCES materials(id) ON DELETE CASCADE,
                standard_id INTEGER REFERENCES standards(id),
{element_columns}
            );
            "#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chemical_ddl_lists_every_element() {
        let ddl = chemical_composition_ddl();
        for el in Element::all() {
            assert!(
                ddl.contains(&format!("{} TEXT", el.column())),
                "missing column {}",
                el.column()
            );
        }
    }
}
