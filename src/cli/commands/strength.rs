//! `alloyref strength` command - tensile-strength table by brand
//!
//! The table lives in the tensile_strength column of the mechanical
//! properties row; writing it goes through `alloyref mech set`.

use console::style;
use miette::{miette, IntoDiagnostic, Result};

use crate::cli::helpers::{escape_csv, escape_md, or_dash};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::parse::range::mean_of;
use crate::parse::strength;

#[derive(clap::Args, Debug)]
pub struct StrengthArgs {
    /// Brand to look up
    pub brand: String,

    /// Print the stored text instead of the parsed table
    #[arg(long)]
    pub raw: bool,
}

pub fn run(args: StrengthArgs, global: &GlobalOpts) -> Result<()> {
    let db = super::open_db(global)?;
    db.material_id_of(&args.brand)?;

    let text = db
        .mechanical_by_brand(&args.brand)
        .and_then(|m| m.tensile_strength)
        .ok_or_else(|| miette!("no tensile strength recorded for brand '{}'", args.brand))?;

    if args.raw {
        println!("{}", text);
        return Ok(());
    }

    let rows = strength::parse_table(&args.brand, &text).into_diagnostic()?;
    let means: Vec<_> = rows.iter().map(|r| r.mpa).collect();
    let mean = mean_of(&means);

    match global.format.or(OutputFormat::Tsv) {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "brand": args.brand,
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
            for row in &rows {
                println!(
                    "{},{},{}",
                    escape_csv(or_dash(row.condition.as_deref())),
                    row.mpa.min,
                    row.mpa.max
                );
            }
        }
        OutputFormat::Md => {
            println!("| Condition | σв (МПа) |");
            println!("|---|---|");
            for row in &rows {
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
                style("σв (МПа)").bold()
            );
            println!("{}", "-".repeat(60));
            for row in &rows {
                println!("{:<42} {}", or_dash(row.condition.as_deref()), row.mpa);
            }
            if let Some(mean) = mean {
                println!();
                println!(
                    "{} mean tensile strength: {} МПа",
                    style("→").blue(),
                    style(mean).yellow()
                );
            }
        }
    }

    Ok(())
}
