//! `alloyref mech` command - Mechanical properties by brand

use clap::Subcommand;
use console::style;
use miette::{miette, IntoDiagnostic, Result};

use crate::cli::helpers::or_dash;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::MechanicalUpdate;

#[derive(Subcommand, Debug)]
pub enum MechCommands {
    /// Show the mechanical properties of a material
    Show(ShowArgs),

    /// Record mechanical property fields (unset fields keep their value)
    Set(SetArgs),

    /// Remove the mechanical properties of a material
    Clear(ClearArgs),
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Brand to look up
    pub brand: String,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Brand to record properties for
    pub brand: String,

    /// Legacy encoded tensile-strength table (МПа)
    #[arg(long)]
    pub tensile_strength: Option<String>,

    /// Yield strength (МПа)
    #[arg(long)]
    pub yield_strength: Option<String>,

    /// Elongation at break (%)
    #[arg(long)]
    pub elongation: Option<String>,

    /// Relative narrowing (%)
    #[arg(long)]
    pub narrowing: Option<String>,

    /// Impact strength (кДж/м²)
    #[arg(long)]
    pub impact: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ClearArgs {
    /// Brand to clear
    pub brand: String,
}

pub fn run(cmd: MechCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        MechCommands::Show(args) => run_show(args, global),
        MechCommands::Set(args) => run_set(args, global),
        MechCommands::Clear(args) => run_clear(args, global),
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let db = super::open_db(global)?;
    db.material_id_of(&args.brand)?;

    let mech = db
        .mechanical_by_brand(&args.brand)
        .ok_or_else(|| miette!("no mechanical properties recorded for brand '{}'", args.brand))?;

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&mech).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&mech).into_diagnostic()?);
        }
        _ => {
            println!(
                "{} {}",
                style("Mechanical properties of").bold(),
                style(&args.brand).cyan()
            );
            println!();
            println!(
                "  {}: {}",
                style("Tensile strength").dim(),
                or_dash(mech.tensile_strength.as_deref())
            );
            println!(
                "  {}: {}",
                style("Yield strength").dim(),
                or_dash(mech.yield_strength.as_deref())
            );
            println!(
                "  {}: {}",
                style("Elongation at break").dim(),
                or_dash(mech.elongation_at_break.as_deref())
            );
            println!(
                "  {}: {}",
                style("Relative narrowing").dim(),
                or_dash(mech.relative_narrowing.as_deref())
            );
            println!(
                "  {}: {}",
                style("Impact strength").dim(),
                or_dash(mech.impact_strength.as_deref())
            );
        }
    }

    Ok(())
}

fn run_set(args: SetArgs, global: &GlobalOpts) -> Result<()> {
    let db = super::open_db(global)?;

    let update = MechanicalUpdate {
        tensile_strength: args.tensile_strength,
        yield_strength: args.yield_strength,
        elongation_at_break: args.elongation,
        relative_narrowing: args.narrowing,
        impact_strength: args.impact,
    };

    if update.is_empty() {
        return Err(miette!("nothing to set (pass at least one property flag)"));
    }

    db.set_mechanical(&args.brand, &update)?;

    if !global.quiet {
        println!(
            "{} Recorded mechanical properties for {}",
            style("✓").green(),
            style(&args.brand).cyan()
        );
    }
    Ok(())
}

fn run_clear(args: ClearArgs, global: &GlobalOpts) -> Result<()> {
    let db = super::open_db(global)?;

    if !db.clear_mechanical(&args.brand)? {
        return Err(miette!(
            "no mechanical properties recorded for brand '{}'",
            args.brand
        ));
    }

    if !global.quiet {
        println!(
            "{} Cleared mechanical properties for {}",
            style("✓").green(),
            style(&args.brand).cyan()
        );
    }
    Ok(())
}
