//! `alloyref tech` command - Technological properties by brand

use clap::Subcommand;
use console::style;
use miette::{miette, IntoDiagnostic, Result};

use crate::cli::helpers::or_dash;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::TechnologicalUpdate;

#[derive(Subcommand, Debug)]
pub enum TechCommands {
    /// Show the technological properties of a material
    Show(ShowArgs),

    /// Record technological property fields (unset fields keep their value)
    Set(SetArgs),

    /// Remove the technological properties of a material
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

    /// Weldability description
    #[arg(long)]
    pub weldability: Option<String>,

    /// Flock sensitivity description
    #[arg(long)]
    pub flock_sensitivity: Option<String>,

    /// Temper brittleness description
    #[arg(long)]
    pub temper_brittleness: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ClearArgs {
    /// Brand to clear
    pub brand: String,
}

pub fn run(cmd: TechCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        TechCommands::Show(args) => run_show(args, global),
        TechCommands::Set(args) => run_set(args, global),
        TechCommands::Clear(args) => run_clear(args, global),
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let db = super::open_db(global)?;
    db.material_id_of(&args.brand)?;

    let tech = db.technological_by_brand(&args.brand).ok_or_else(|| {
        miette!(
            "no technological properties recorded for brand '{}'",
            args.brand
        )
    })?;

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&tech).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&tech).into_diagnostic()?);
        }
        _ => {
            println!(
                "{} {}",
                style("Technological properties of").bold(),
                style(&args.brand).cyan()
            );
            println!();
            println!(
                "  {}: {}",
                style("Weldability").dim(),
                or_dash(tech.weldability.as_deref())
            );
            println!(
                "  {}: {}",
                style("Flock sensitivity").dim(),
                or_dash(tech.flock_sensitivity.as_deref())
            );
            println!(
                "  {}: {}",
                style("Temper brittleness").dim(),
                or_dash(tech.temper_brittleness.as_deref())
            );
        }
    }

    Ok(())
}

fn run_set(args: SetArgs, global: &GlobalOpts) -> Result<()> {
    let db = super::open_db(global)?;

    let update = TechnologicalUpdate {
        weldability: args.weldability,
        flock_sensitivity: args.flock_sensitivity,
        temper_brittleness: args.temper_brittleness,
    };

    if update.is_empty() {
        return Err(miette!("nothing to set (pass at least one property flag)"));
    }

    db.set_technological(&args.brand, &update)?;

    if !global.quiet {
        println!(
            "{} Recorded technological properties for {}",
            style("✓").green(),
            style(&args.brand).cyan()
        );
    }
    Ok(())
}

fn run_clear(args: ClearArgs, global: &GlobalOpts) -> Result<()> {
    let db = super::open_db(global)?;

    if !db.clear_technological(&args.brand)? {
        return Err(miette!(
            "no technological properties recorded for brand '{}'",
            args.brand
        ));
    }

    if !global.quiet {
        println!(
            "{} Cleared technological properties for {}",
            style("✓").green(),
            style(&args.brand).cyan()
        );
    }
    Ok(())
}
