//! `alloyref standard` command - GOST/TU designations

use clap::Subcommand;
use console::style;
use miette::{miette, IntoDiagnostic, Result};

use crate::cli::helpers::{escape_csv, escape_md};
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum StandardCommands {
    /// List standards, optionally for one material
    List(ListArgs),

    /// Record a standard for a material name
    Add(AddArgs),

    /// Remove a standard by row id
    Remove(RemoveArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only standards for this material name
    #[arg(long, short = 'm')]
    pub material: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Material name the standard applies to
    pub material: String,

    /// Standard designation, e.g. "ГОСТ 977 - 88"
    pub standard: String,
}

#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Row id (see `standard list`)
    pub id: i64,
}

pub fn run(cmd: StandardCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        StandardCommands::List(args) => run_list(args, global),
        StandardCommands::Add(args) => run_add(args, global),
        StandardCommands::Remove(args) => run_remove(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let db = super::open_db(global)?;

    let standards = match args.material {
        Some(ref name) => db.standards_for(name),
        None => db.list_standards(),
    };

    if standards.is_empty() {
        println!("No standards found.");
        return Ok(());
    }

    match global.format.or(OutputFormat::Tsv) {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&standards).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&standards).into_diagnostic()?);
        }
        OutputFormat::Csv => {
            println!("id,material,standard");
            for s in &standards {
                println!(
                    "{},{},{}",
                    s.id,
                    escape_csv(&s.material_name),
                    escape_csv(&s.standard)
                );
            }
        }
        OutputFormat::Md => {
            println!("| ID | Material | Standard |");
            println!("|---|---|---|");
            for s in &standards {
                println!(
                    "| {} | {} | {} |",
                    s.id,
                    escape_md(&s.material_name),
                    escape_md(&s.standard)
                );
            }
        }
        _ => {
            println!(
                "{:<6} {:<16} {}",
                style("ID").bold(),
                style("MATERIAL").bold(),
                style("STANDARD").bold()
            );
            println!("{}", "-".repeat(50));
            for s in &standards {
                println!(
                    "{:<6} {:<16} {}",
                    style(s.id).dim(),
                    style(&s.material_name).cyan(),
                    s.standard
                );
            }
            if !global.quiet {
                println!();
                println!("{} standard(s) found.", style(standards.len()).cyan());
            }
        }
    }

    Ok(())
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let db = super::open_db(global)?;
    db.add_standard(&args.material, &args.standard)?;

    if !global.quiet {
        println!(
            "{} Recorded {} for {}",
            style("✓").green(),
            style(&args.standard).yellow(),
            style(&args.material).cyan()
        );
    }
    Ok(())
}

fn run_remove(args: RemoveArgs, global: &GlobalOpts) -> Result<()> {
    let db = super::open_db(global)?;

    if !db.delete_standard(args.id)? {
        return Err(miette!("no standard with id {}", args.id));
    }

    if !global.quiet {
        println!("{} Removed standard {}", style("✓").green(), args.id);
    }
    Ok(())
}
