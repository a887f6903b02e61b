//! `alloyref chem` command - Chemical composition by brand

use std::collections::BTreeMap;

use clap::Subcommand;
use console::style;
use miette::{miette, IntoDiagnostic, Result};

use crate::cli::helpers::{escape_csv, escape_md};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::Element;

#[derive(Subcommand, Debug)]
pub enum ChemCommands {
    /// Show the chemical composition of a material
    Show(ShowArgs),

    /// Record the chemical composition of a material (whole-row replace)
    Set(SetArgs),

    /// Remove the chemical composition of a material
    Clear(ClearArgs),
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Brand to look up
    pub brand: String,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Brand to record composition for
    pub brand: String,

    /// Element contents as SYMBOL=VALUE pairs, e.g. C=0.17-0.24 Mn="0.35 - 0.65"
    #[arg(required = true)]
    pub entries: Vec<String>,

    /// Standard the composition is taken from (e.g. "ГОСТ 1050 - 2013")
    #[arg(long)]
    pub standard: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ClearArgs {
    /// Brand to clear
    pub brand: String,
}

pub fn run(cmd: ChemCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ChemCommands::Show(args) => run_show(args, global),
        ChemCommands::Set(args) => run_set(args, global),
        ChemCommands::Clear(args) => run_clear(args, global),
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let db = super::open_db(global)?;
    db.material_id_of(&args.brand)?;

    let comp = db.chemical_by_brand(&args.brand).ok_or_else(|| {
        miette!(
            "no chemical composition recorded for brand '{}'",
            args.brand
        )
    })?;

    let standard = comp
        .standard_id
        .and_then(|id| db.standard_by_id(id))
        .map(|s| s.standard);

    match global.format.or(OutputFormat::Tsv) {
        OutputFormat::Json => {
            let map: BTreeMap<&str, &str> = comp.entries().into_iter().collect();
            let value = serde_json::json!({
                "brand": args.brand,
                "standard": standard,
                "elements": map,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&value).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            let map: BTreeMap<&str, &str> = comp.entries().into_iter().collect();
            print!("{}", serde_yml::to_string(&map).into_diagnostic()?);
        }
        OutputFormat::Csv => {
            println!("element,content");
            for (symbol, content) in comp.entries() {
                println!("{},{}", symbol, escape_csv(content));
            }
        }
        OutputFormat::Md => {
            println!("| Element | Content |");
            println!("|---|---|");
            for (symbol, content) in comp.entries() {
                println!("| {} | {} |", symbol, escape_md(content));
            }
        }
        _ => {
            println!(
                "{} {}",
                style("Chemical composition of").bold(),
                style(&args.brand).cyan()
            );
            if let Some(ref standard) = standard {
                println!("{}: {}", style("Standard").dim(), standard);
            }
            println!();
            for (symbol, content) in comp.entries() {
                println!("  {:<12} {}", style(symbol).dim(), content);
            }
        }
    }

    Ok(())
}

fn run_set(args: SetArgs, global: &GlobalOpts) -> Result<()> {
    let db = super::open_db(global)?;

    let mut elements = BTreeMap::new();
    for entry in &args.entries {
        let (symbol, content) = entry
            .split_once('=')
            .ok_or_else(|| miette!("malformed entry '{}' (expected SYMBOL=VALUE)", entry))?;
        let element: Element = symbol.parse().into_diagnostic()?;
        let content = content.trim();
        if content.is_empty() {
            return Err(miette!("empty content for element '{}'", symbol));
        }
        elements.insert(element, content.to_string());
    }

    db.set_chemical(&args.brand, args.standard.as_deref(), &elements)?;

    if !global.quiet {
        println!(
            "{} Recorded {} element(s) for {}",
            style("✓").green(),
            style(elements.len()).cyan(),
            style(&args.brand).cyan()
        );
    }
    Ok(())
}

fn run_clear(args: ClearArgs, global: &GlobalOpts) -> Result<()> {
    let db = super::open_db(global)?;

    if !db.clear_chemical(&args.brand)? {
        return Err(miette!(
            "no chemical composition recorded for brand '{}'",
            args.brand
        ));
    }

    if !global.quiet {
        println!(
            "{} Cleared chemical composition for {}",
            style("✓").green(),
            style(&args.brand).cyan()
        );
    }
    Ok(())
}
