//! Entity types - typed rows of the reference database

pub mod characteristics;
pub mod chemical;
pub mod hardness;
pub mod material;
pub mod mechanical;
pub mod standard;
pub mod technological;
pub mod workpiece;

pub use characteristics::{Characteristics, CharacteristicsUpdate};
pub use chemical::{ChemicalComposition, Element};
pub use hardness::Hardness;
pub use material::{Material, MaterialUpdate, NewMaterial};
pub use mechanical::{MechanicalProperties, MechanicalUpdate};
pub use standard::Standard;
pub use technological::{TechnologicalProperties, TechnologicalUpdate};
pub use workpiece::{HeatTreatment, SurfaceKind, WorkpieceMaterial};
