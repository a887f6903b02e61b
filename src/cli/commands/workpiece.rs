//! `alloyref workpiece` command - profile plus machining state
//!
//! Heat treatment and surface accept either the name or the legacy
//! numeric index ("quench-and-temper" or "2").

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::workpiece::WorkpieceMaterial;
use crate::entities::{HeatTreatment, SurfaceKind};
use crate::profile::MaterialProfile;

#[derive(clap::Args, Debug)]
pub struct WorkpieceArgs {
    /// Brand to look up
    pub brand: String,

    /// Heat treatment: normalizing, annealing, quench-and-temper, or 0..=2
    #[arg(long)]
    pub heat_treatment: Option<String>,

    /// Surface kind: clean, rolled, forged, casting, dirty-casting,
    /// non-ferrous, or 0..=5
    #[arg(long)]
    pub surface: Option<String>,

    /// Hardness after heat treatment (HRC)
    #[arg(long)]
    pub hrc: Option<f64>,
}

pub fn run(args: WorkpieceArgs, global: &GlobalOpts) -> Result<()> {
    let db = super::open_db(global)?;

    let profile = MaterialProfile::assemble(&db, &args.brand)?;
    let mut workpiece = WorkpieceMaterial::new(profile);

    if let Some(ref ht) = args.heat_treatment {
        let treatment: HeatTreatment = ht.parse().into_diagnostic()?;
        workpiece = workpiece.with_heat_treatment(treatment);
    }
    if let Some(ref surface) = args.surface {
        let kind: SurfaceKind = surface.parse().into_diagnostic()?;
        workpiece = workpiece.with_surface(kind);
    }
    if let Some(hrc) = args.hrc {
        workpiece = workpiece.with_hrc(hrc).into_diagnostic()?;
    }

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&workpiece).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&workpiece).into_diagnostic()?);
        }
        _ => {
            println!("{}", style("─".repeat(60)).dim());
            println!(
                "{}: {}",
                style("Workpiece").bold(),
                style(&workpiece.profile.brand).cyan()
            );
            println!("{}: {}", style("Class").bold(), workpiece.profile.class);
            println!(
                "{}: {}",
                style("Heat treatment").bold(),
                workpiece
                    .heat_treatment
                    .map(|ht| ht.to_string())
                    .unwrap_or_else(|| "none".to_string())
            );
            println!("{}: {}", style("Surface").bold(), workpiece.surface);
            if let Some(hrc) = workpiece.hrc {
                println!("{}: {}", style("HRC").bold(), style(hrc).yellow());
            }
            println!("{}", style("─".repeat(60)).dim());

            if let Some(mean) = workpiece.profile.hardness_mpa {
                println!("{}: {} МПа", style("Hardness (mean)").dim(), mean);
            }
            if let Some(mean) = workpiece.profile.tensile_strength_mpa {
                println!("{}: {} МПа", style("Tensile strength (mean)").dim(), mean);
            }
        }
    }

    Ok(())
}
