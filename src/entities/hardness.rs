//! Hardness entity - the raw legacy record
//!
//! The hardness column holds the scraped text verbatim, e.g.
//! `"Твердость 20 горячекатанного, /HB 10 -1 = 143 МПа;"`. Parsing into
//! condition/value rows lives in [`crate::parse::hardness`].

use serde::{Deserialize, Serialize};

/// A raw hardness row as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hardness {
    pub id: i64,
    pub material_id: i64,

    /// Legacy semicolon/slash-delimited hardness text
    pub hardness: String,
}
