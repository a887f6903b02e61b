//! Chemical composition entity
//!
//! The legacy table carries one TEXT column per element (52 of them,
//! including combined columns like Cu+Ag and the catch-alls "Other",
//! "Impurities" and rare-earth elements). Contents are range strings as
//! scraped ("0.17 - 0.24", "до 0.3", ...), kept verbatim.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An element column of the chemical composition table
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Element {
    Ag,
    Al,
    AlMg,
    As,
    B,
    Ba,
    Be,
    Bi,
    C,
    Ca,
    Cd,
    Ce,
    Co,
    Cr,
    Cu,
    CuAg,
    CuP,
    F,
    Fe,
    Ga,
    Hf,
    La,
    Li,
    Mg,
    Mn,
    Mo,
    N,
    Na,
    Nb,
    Ni,
    NiCo,
    O,
    Other,
    P,
    Pb,
    S,
    Sb,
    Sc,
    Se,
    Si,
    Sn,
    Sr,
    Ta,
    Te,
    Ti,
    V,
    W,
    Y,
    Zn,
    Zr,
    Impurities,
    RareEarth,
}

impl Element {
    /// Chemical symbol as shown to the user
    pub fn symbol(&self) -> &'static str {
        match self {
            Element::Ag => "Ag",
            Element::Al => "Al",
            Element::AlMg => "Al+Mg",
            Element::As => "As",
            Element::B => "B",
            Element::Ba => "Ba",
            Element::Be => "Be",
            Element::Bi => "Bi",
            Element::C => "C",
            Element::Ca => "Ca",
            Element::Cd => "Cd",
            Element::Ce => "Ce",
            Element::Co => "Co",
            Element::Cr => "Cr",
            Element::Cu => "Cu",
            Element::CuAg => "Cu+Ag",
            Element::CuP => "Cu+P",
            Element::F => "F",
            Element::Fe => "Fe",
            Element::Ga => "Ga",
            Element::Hf => "Hf",
            Element::La => "La",
            Element::Li => "Li",
            Element::Mg => "Mg",
            Element::Mn => "Mn",
            Element::Mo => "Mo",
            Element::N => "N",
            Element::Na => "Na",
            Element::Nb => "Nb",
            Element::Ni => "Ni",
            Element::NiCo => "Ni+Co",
            Element::O => "O",
            Element::Other => "Other",
            Element::P => "P",
            Element::Pb => "Pb",
            Element::S => "S",
            Element::Sb => "Sb",
            Element::Sc => "Sc",
            Element::Se => "Se",
            Element::Si => "Si",
            Element::Sn => "Sn",
            Element::Sr => "Sr",
            Element::Ta => "Ta",
            Element::Te => "Te",
            Element::Ti => "Ti",
            Element::V => "V",
            Element::W => "W",
            Element::Y => "Y",
            Element::Zn => "Zn",
            Element::Zr => "Zr",
            Element::Impurities => "Impurities",
            Element::RareEarth => "REM",
        }
    }

    /// Column name in the chemical_composition table
    pub fn column(&self) -> &'static str {
        match self {
            Element::Ag => "ag",
            Element::Al => "al",
            Element::AlMg => "al_and_mg",
            Element::As => "arsenicum",
            Element::B => "b",
            Element::Ba => "ba",
            Element::Be => "be",
            Element::Bi => "bi",
            Element::C => "c",
            Element::Ca => "ca",
            Element::Cd => "cd",
            Element::Ce => "ce",
            Element::Co => "co",
            Element::Cr => "cr",
            Element::Cu => "cu",
            Element::CuAg => "cu_and_ag",
            Element::CuP => "cu_and_p",
            Element::F => "f",
            Element::Fe => "fe",
            Element::Ga => "ga",
            Element::Hf => "hf",
            Element::La => "la",
            Element::Li => "li",
            Element::Mg => "mg",
            Element::Mn => "mn",
            Element::Mo => "mo",
            Element::N => "n",
            Element::Na => "na",
            Element::Nb => "nb",
            Element::Ni => "ni",
            Element::NiCo => "ni_and_co",
            Element::O => "o",
            Element::Other => "other",
            Element::P => "p",
            Element::Pb => "pb",
            Element::S => "s",
            Element::Sb => "sb",
            Element::Sc => "sc",
            Element::Se => "se",
            Element::Si => "si",
            Element::Sn => "sn",
            Element::Sr => "sr",
            Element::Ta => "ta",
            Element::Te => "te",
            Element::Ti => "ti",
            Element::V => "v",
            Element::W => "w",
            Element::Y => "y",
            Element::Zn => "zn",
            Element::Zr => "zr",
            Element::Impurities => "impurities",
            Element::RareEarth => "rare_earth",
        }
    }

    /// All element columns in table order
    pub fn all() -> &'static [Element] {
        use Element::*;
        &[
            Ag, Al, AlMg, As, B, Ba, Be, Bi, C, Ca, Cd, Ce, Co, Cr, Cu, CuAg, CuP, F, Fe,
            Ga, Hf, La, Li, Mg, Mn, Mo, N, Na, Nb, Ni, NiCo, O, Other, P, Pb, S, Sb, Sc,
            Se, Si, Sn, Sr, Ta, Te, Ti, V, W, Y, Zn, Zr, Impurities, RareEarth,
        ]
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Unknown element name in user input
#[derive(Debug, Error)]
#[error("unknown element: '{0}' (use chemical symbols like C, Si, Mn, or Cu+Ag, Impurities, REM)")]
pub struct UnknownElement(pub String);

impl FromStr for Element {
    type Err = UnknownElement;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        // Symbols first ("C" vs column "c" is case-sensitive for single
        // letters, so try an exact match before falling back to columns)
        for el in Element::all() {
            if el.symbol().eq_ignore_ascii_case(wanted) {
                return Ok(*el);
            }
        }
        for el in Element::all() {
            if el.column().eq_ignore_ascii_case(wanted) {
                return Ok(*el);
            }
        }
        Err(UnknownElement(wanted.to_string()))
    }
}

/// A chemical composition row: per-element content strings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChemicalComposition {
    pub id: i64,
    pub material_id: i64,

    /// Standard the composition was taken from, if recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_id: Option<i64>,

    /// Only elements with content; empty columns are not represented
    pub elements: BTreeMap<Element, String>,
}

impl ChemicalComposition {
    /// Content of one element, if present
    pub fn content(&self, el: Element) -> Option<&str> {
        self.elements.get(&el).map(|s| s.as_str())
    }

    /// Non-empty entries as (symbol, content) pairs in table order
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        Element::all()
            .iter()
            .filter_map(|el| self.elements.get(el).map(|v| (el.symbol(), v.as_str())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_roundtrip_all() {
        for el in Element::all() {
            assert_eq!(el.symbol().parse::<Element>().unwrap(), *el);
            assert_eq!(el.column().parse::<Element>().unwrap(), *el);
        }
    }

    #[test]
    fn test_element_count() {
        assert_eq!(Element::all().len(), 52);
    }

    #[test]
    fn test_element_parse_combined() {
        assert_eq!("Cu+Ag".parse::<Element>().unwrap(), Element::CuAg);
        assert_eq!("ni_and_co".parse::<Element>().unwrap(), Element::NiCo);
        assert_eq!("rem".parse::<Element>().unwrap(), Element::RareEarth);
        assert!("Xx".parse::<Element>().is_err());
    }

    #[test]
    fn test_entries_in_table_order() {
        let mut comp = ChemicalComposition::default();
        comp.elements.insert(Element::Si, "0.17 - 0.37".to_string());
        comp.elements.insert(Element::C, "0.17 - 0.24".to_string());
        let entries = comp.entries();
        assert_eq!(entries[0].0, "C");
        assert_eq!(entries[1].0, "Si");
    }

    #[test]
    fn test_content_lookup() {
        let mut comp = ChemicalComposition::default();
        comp.elements.insert(Element::Mn, "0.35 - 0.65".to_string());
        assert_eq!(comp.content(Element::Mn), Some("0.35 - 0.65"));
        assert_eq!(comp.content(Element::Cr), None);
    }
}
