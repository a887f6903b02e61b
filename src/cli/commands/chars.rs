//! `alloyref chars` command - Descriptive characteristics by brand

use clap::Subcommand;
use console::style;
use miette::{miette, IntoDiagnostic, Result};

use crate::cli::helpers::or_dash;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::CharacteristicsUpdate;

#[derive(Subcommand, Debug)]
pub enum CharsCommands {
    /// Show the characteristics of a material
    Show(ShowArgs),

    /// Record characteristic fields (unset fields keep their value)
    Set(SetArgs),

    /// Remove the characteristics of a material
    Clear(ClearArgs),
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Brand to look up
    pub brand: String,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Brand to record characteristics for
    pub brand: String,

    /// Classification, e.g. "Сталь конструкционная углеродистая качественная"
    #[arg(long)]
    pub classification: Option<String>,

    /// Application area
    #[arg(long)]
    pub application: Option<String>,

    /// Foreign analog designations
    #[arg(long)]
    pub foreign_analogs: Option<String>,

    /// Additional free-form notes
    #[arg(long)]
    pub info: Option<String>,

    /// Possible replacement brands
    #[arg(long)]
    pub replacement: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ClearArgs {
    /// Brand to clear
    pub brand: String,
}

pub fn run(cmd: CharsCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        CharsCommands::Show(args) => run_show(args, global),
        CharsCommands::Set(args) => run_set(args, global),
        CharsCommands::Clear(args) => run_clear(args, global),
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let db = super::open_db(global)?;
    db.material_id_of(&args.brand)?;

    let chars = db
        .characteristics_by_brand(&args.brand)
        .ok_or_else(|| miette!("no characteristics recorded for brand '{}'", args.brand))?;

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&chars).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&chars).into_diagnostic()?);
        }
        _ => {
            println!(
                "{} {}",
                style("Characteristics of").bold(),
                style(&args.brand).cyan()
            );
            println!();
            println!(
                "  {}: {}",
                style("Classification").dim(),
                or_dash(chars.classification.as_deref())
            );
            println!(
                "  {}: {}",
                style("Application").dim(),
                or_dash(chars.application.as_deref())
            );
            println!(
                "  {}: {}",
                style("Foreign analogs").dim(),
                or_dash(chars.foreign_analogs.as_deref())
            );
            println!(
                "  {}: {}",
                style("Additional info").dim(),
                or_dash(chars.additional_info.as_deref())
            );
            println!(
                "  {}: {}",
                style("Replacement").dim(),
                or_dash(chars.replacement.as_deref())
            );
        }
    }

    Ok(())
}

fn run_set(args: SetArgs, global: &GlobalOpts) -> Result<()> {
    let db = super::open_db(global)?;

    let update = CharacteristicsUpdate {
        classification: args.classification,
        application: args.application,
        foreign_analogs: args.foreign_analogs,
        additional_info: args.info,
        replacement: args.replacement,
    };

    if update.is_empty() {
        return Err(miette!("nothing to set (pass at least one field flag)"));
    }

    db.set_characteristics(&args.brand, &update)?;

    if !global.quiet {
        println!(
            "{} Recorded characteristics for {}",
            style("✓").green(),
            style(&args.brand).cyan()
        );
    }
    Ok(())
}

fn run_clear(args: ClearArgs, global: &GlobalOpts) -> Result<()> {
    let db = super::open_db(global)?;

    if !db.clear_characteristics(&args.brand)? {
        return Err(miette!(
            "no characteristics recorded for brand '{}'",
            args.brand
        ));
    }

    if !global.quiet {
        println!(
            "{} Cleared characteristics for {}",
            style("✓").green(),
            style(&args.brand).cyan()
        );
    }
    Ok(())
}
