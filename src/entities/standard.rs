//! Standard entity - GOST/TU designations applying to a material

use serde::{Deserialize, Serialize};

/// A standard row, keyed by material name rather than material id: the
/// source data records standards before materials are cross-linked, and
/// chemical compositions reference these rows by `standard_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standard {
    pub id: i64,

    /// Material the standard applies to (matches `materials.brand`)
    pub material_name: String,

    /// Standard designation, e.g. "ГОСТ 977 - 88"
    pub standard: String,
}
