//! Parsers for legacy text-encoded property columns
//!
//! The source database stores hardness and tensile-strength tables as
//! semicolon/slash-delimited strings scraped from reference books, e.g.
//!
//! ```text
//! Твердость 20 горячекатанного, /HB 10 -1 = 143 МПа;
//! ```
//!
//! These modules reconstruct the condition → value tables from that text.

pub mod hardness;
pub mod range;
pub mod strength;

pub use hardness::HardnessRow;
pub use range::ValueRange;
pub use strength::StrengthRow;

use thiserror::Error;

/// Errors raised while decoding legacy property text
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("value range '{0}' is malformed (expected '2.3-2.9', '2, 5.6' or a single number)")]
    BadRange(String),

    #[error("unexpected token in legacy hardness text: '{0}'")]
    UnexpectedToken(String),

    #[error("legacy field for '{0}' contains no values")]
    NoValues(String),
}
