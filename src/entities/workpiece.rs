//! Workpiece state: heat treatment, surface kind, post-treatment hardness
//!
//! The legacy data addresses heat treatments and workpiece surfaces either
//! by name or by a small numeric index; both spellings are accepted here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::profile::MaterialProfile;

/// Invalid workpiece parameter
#[derive(Debug, Error)]
pub enum WorkpieceError {
    #[error("unknown heat treatment: '{0}' (use normalizing, annealing, quench-and-temper or an index 0..=2)")]
    UnknownHeatTreatment(String),

    #[error("unknown workpiece surface: '{0}' (use clean, rolled, forged, casting, dirty-casting, non-ferrous or an index 0..=5)")]
    UnknownSurface(String),

    #[error("hrc hardness must be non-negative, got {0}")]
    NegativeHrc(f64),
}

/// Heat treatment applied to the workpiece (legacy indices 0..=2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeatTreatment {
    Normalizing,
    Annealing,
    QuenchAndTemper,
}

impl HeatTreatment {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeatTreatment::Normalizing => "normalizing",
            HeatTreatment::Annealing => "annealing",
            HeatTreatment::QuenchAndTemper => "quench-and-temper",
        }
    }

    /// Legacy numeric index
    pub fn index(&self) -> i64 {
        match self {
            HeatTreatment::Normalizing => 0,
            HeatTreatment::Annealing => 1,
            HeatTreatment::QuenchAndTemper => 2,
        }
    }

    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(HeatTreatment::Normalizing),
            1 => Some(HeatTreatment::Annealing),
            2 => Some(HeatTreatment::QuenchAndTemper),
            _ => None,
        }
    }
}

impl fmt::Display for HeatTreatment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HeatTreatment {
    type Err = WorkpieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v = s.trim();
        if let Ok(index) = v.parse::<i64>() {
            return Self::from_index(index)
                .ok_or_else(|| WorkpieceError::UnknownHeatTreatment(v.to_string()));
        }
        match v.to_lowercase().as_str() {
            "normalizing" | "normalization" => Ok(HeatTreatment::Normalizing),
            "annealing" => Ok(HeatTreatment::Annealing),
            "quench-and-temper" | "quench_and_temper" | "improvement" => {
                Ok(HeatTreatment::QuenchAndTemper)
            }
            _ => Err(WorkpieceError::UnknownHeatTreatment(v.to_string())),
        }
    }
}

/// Surface condition of the workpiece blank (legacy indices 0..=5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SurfaceKind {
    /// No scale
    Clean,
    /// Rolled stock with scale
    Rolled,
    /// Forging with scale
    Forged,
    /// Casting with normal scale
    Casting,
    /// Casting with contaminated scale
    DirtyCasting,
    /// Copper and aluminum alloys with scale
    NonFerrous,
}

impl SurfaceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceKind::Clean => "clean",
            SurfaceKind::Rolled => "rolled",
            SurfaceKind::Forged => "forged",
            SurfaceKind::Casting => "casting",
            SurfaceKind::DirtyCasting => "dirty-casting",
            SurfaceKind::NonFerrous => "non-ferrous",
        }
    }

    /// Legacy numeric index
    pub fn index(&self) -> i64 {
        match self {
            SurfaceKind::Clean => 0,
            SurfaceKind::Rolled => 1,
            SurfaceKind::Forged => 2,
            SurfaceKind::Casting => 3,
            SurfaceKind::DirtyCasting => 4,
            SurfaceKind::NonFerrous => 5,
        }
    }

    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(SurfaceKind::Clean),
            1 => Some(SurfaceKind::Rolled),
            2 => Some(SurfaceKind::Forged),
            3 => Some(SurfaceKind::Casting),
            4 => Some(SurfaceKind::DirtyCasting),
            5 => Some(SurfaceKind::NonFerrous),
            _ => None,
        }
    }
}

impl Default for SurfaceKind {
    fn default() -> Self {
        SurfaceKind::Clean
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SurfaceKind {
    type Err = WorkpieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v = s.trim();
        if let Ok(index) = v.parse::<i64>() {
            return Self::from_index(index)
                .ok_or_else(|| WorkpieceError::UnknownSurface(v.to_string()));
        }
        match v.to_lowercase().as_str() {
            "clean" => Ok(SurfaceKind::Clean),
            "rolled" => Ok(SurfaceKind::Rolled),
            "forged" => Ok(SurfaceKind::Forged),
            "casting" => Ok(SurfaceKind::Casting),
            "dirty-casting" | "dirty_casting" => Ok(SurfaceKind::DirtyCasting),
            "non-ferrous" | "non_ferrous" => Ok(SurfaceKind::NonFerrous),
            _ => Err(WorkpieceError::UnknownSurface(v.to_string())),
        }
    }
}

/// A material profile extended with the machining state of a blank
#[derive(Debug, Clone, Serialize)]
pub struct WorkpieceMaterial {
    #[serde(flatten)]
    pub profile: MaterialProfile,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub heat_treatment: Option<HeatTreatment>,

    pub surface: SurfaceKind,

    /// Hardness after heat treatment (HRC scale)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hrc: Option<f64>,
}

impl WorkpieceMaterial {
    pub fn new(profile: MaterialProfile) -> Self {
        Self {
            profile,
            heat_treatment: None,
            surface: SurfaceKind::default(),
            hrc: None,
        }
    }

    pub fn with_heat_treatment(mut self, ht: HeatTreatment) -> Self {
        self.heat_treatment = Some(ht);
        self
    }

    pub fn with_surface(mut self, surface: SurfaceKind) -> Self {
        self.surface = surface;
        self
    }

    pub fn with_hrc(mut self, hrc: f64) -> Result<Self, WorkpieceError> {
        if hrc < 0.0 {
            return Err(WorkpieceError::NegativeHrc(hrc));
        }
        self.hrc = Some(hrc);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heat_treatment_by_name_and_index() {
        assert_eq!(
            "normalizing".parse::<HeatTreatment>().unwrap(),
            HeatTreatment::Normalizing
        );
        assert_eq!(
            "2".parse::<HeatTreatment>().unwrap(),
            HeatTreatment::QuenchAndTemper
        );
        assert!("3".parse::<HeatTreatment>().is_err());
        assert!("tempering".parse::<HeatTreatment>().is_err());
    }

    #[test]
    fn test_surface_by_name_and_index() {
        assert_eq!("rolled".parse::<SurfaceKind>().unwrap(), SurfaceKind::Rolled);
        assert_eq!("5".parse::<SurfaceKind>().unwrap(), SurfaceKind::NonFerrous);
        assert!("6".parse::<SurfaceKind>().is_err());
    }

    #[test]
    fn test_index_roundtrip() {
        for i in 0..=2 {
            assert_eq!(HeatTreatment::from_index(i).unwrap().index(), i);
        }
        for i in 0..=5 {
            assert_eq!(SurfaceKind::from_index(i).unwrap().index(), i);
        }
    }

    #[test]
    fn test_negative_hrc_rejected() {
        let wp = WorkpieceMaterial::new(MaterialProfile::empty("20"));
        let err = wp.with_hrc(-1.0).unwrap_err();
        assert!(matches!(err, WorkpieceError::NegativeHrc(_)));
    }

    #[test]
    fn test_builder_chain() {
        let wp = WorkpieceMaterial::new(MaterialProfile::empty("40Х"))
            .with_heat_treatment(HeatTreatment::QuenchAndTemper)
            .with_surface(SurfaceKind::Forged)
            .with_hrc(50.5)
            .unwrap();
        assert_eq!(wp.hrc, Some(50.5));
        assert_eq!(wp.surface, SurfaceKind::Forged);
    }
}
