//! `alloyref hardness` command - hardness table by brand
//!
//! Show re-parses the legacy text into condition → MPa rows; `--raw`
//! prints the stored field untouched.

use clap::Subcommand;
use console::style;
use miette::{miette, IntoDiagnostic, Result};

use crate::cli::helpers::{escape_csv, escape_md, or_dash};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::parse::range::mean_of;
use crate::parse::{hardness, HardnessRow};

#[derive(Subcommand, Debug)]
pub enum HardnessCommands {
    /// Show the parsed hardness table of a material
    Show(ShowArgs),

    /// Store the legacy hardness text for a material
    Set(SetArgs),

    /// Remove the hardness record of a material
    Clear(ClearArgs),
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Brand to look up
    pub brand: String,

    /// Print the stored text instead of the parsed table
    #[arg(long)]
    pub raw: bool,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Brand to record hardness for
    pub brand: String,

    /// Legacy hardness text, e.g. "Твердость 20 ,/HB 10 -1 = 163 МПа;"
    pub text: String,
}

#[derive(clap::Args, Debug)]
pub struct ClearArgs {
    /// Brand to clear
    pub brand: String,
}

pub fn run(cmd: HardnessCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        HardnessCommands::Show(args) => run_show(args, global),
        HardnessCommands::Set(args) => run_set(args, global),
        HardnessCommands::Clear(args) => run_clear(args, global),
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let db = super::open_db(global)?;
    db.material_id_of(&args.brand)?;

    let record = db
        .hardness_by_brand(&args.brand)
        .ok_or_else(|| miette!("no hardness recorded for brand '{}'", args.brand))?;

    if args.raw {
        println!("{}", record.hardness);
        return Ok(());
    }

    let rows = hardness::parse_table(&args.brand, &record.hardness).into_diagnostic()?;
    let means: Vec<_> = rows.iter().map(|r| r.mpa).collect();
    print_rows(&args.brand, &rows, mean_of(&means), global)
}

fn print_rows(
    brand: &str,
    rows: &[HardnessRow],
    mean: Option<f64>,
    global: &GlobalOpts,
) -> Result<()> {
    match global.format.or(OutputFormat::Tsv) {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "brand": brand,
                "rows": rows,
                "mean_mpa": mean,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&value).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&rows).into_diagnostic()?);
        }
        OutputFormat::Csv => {
            println!("condition,min_mpa,max_mpa");
            for row in rows {
                println!(
                    "{},{},{}",
                    escape_csv(or_dash(row.condition.as_deref())),
                    row.mpa.min,
                    row.mpa.max
                );
            }
        }
        OutputFormat::Md => {
            println!("| Condition | HB 10-1 (МПа) |");
            println!("|---|---|");
            for row in rows {
                println!(
                    "| {} | {} |",
                    escape_md(or_dash(row.condition.as_deref())),
                    row.mpa
                );
            }
        }
        _ => {
            println!(
                "{:<42} {}",
                style("CONDITION").bold(),
                style("HB 10-1 (МПа)").bold()
            );
            println!("{}", "-".repeat(60));
            for row in rows {
                println!("{:<42} {}", or_dash(row.condition.as_deref()), row.mpa);
            }
            if let Some(mean) = mean {
                println!();
                println!(
                    "{} mean hardness: {} МПа",
                    style("→").blue(),
                    style(mean).yellow()
                );
            }
        }
    }
    Ok(())
}

fn run_set(args: SetArgs, global: &GlobalOpts) -> Result<()> {
    let db = super::open_db(global)?;

    // Refuse text the parser cannot decode; the table would be dead weight
    hardness::parse_table(&args.brand, &args.text).into_diagnostic()?;
    db.set_hardness(&args.brand, &args.text)?;

    if !global.quiet {
        println!(
            "{} Recorded hardness for {}",
            style("✓").green(),
            style(&args.brand).cyan()
        );
    }
    Ok(())
}

fn run_clear(args: ClearArgs, global: &GlobalOpts) -> Result<()> {
    let db = super::open_db(global)?;

    if !db.clear_hardness(&args.brand)? {
        return Err(miette!("no hardness recorded for brand '{}'", args.brand));
    }

    if !global.quiet {
        println!(
            "{} Cleared hardness for {}",
            style("✓").green(),
            style(&args.brand).cyan()
        );
    }
    Ok(())
}
