//! `alloyref mat` command - Material management

use clap::Subcommand;
use console::style;
use miette::{miette, IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::helpers::{escape_csv, escape_md, or_dash, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::db::MaterialFilter;
use crate::entities::{MaterialUpdate, NewMaterial};
use crate::profile::MaterialProfile;

#[derive(Subcommand, Debug)]
pub enum MatCommands {
    /// List materials with filtering
    List(ListArgs),

    /// Add a new material
    New(NewArgs),

    /// Show the assembled property profile of a material
    Show(ShowArgs),

    /// Update a material's classification
    Update(UpdateArgs),

    /// Delete a material and all its property rows
    Delete(DeleteArgs),

    /// List material classes with counts
    Classes,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by class name
    #[arg(long, short = 'c')]
    pub class: Option<String>,

    /// Filter by subclass
    #[arg(long, short = 's')]
    pub subclass: Option<String>,

    /// Filter by legacy class index (0..=11)
    #[arg(long, short = 'i')]
    pub index: Option<i64>,

    /// Search in brand and class
    #[arg(long)]
    pub search: Option<String>,

    /// Limit number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Brand / trade designation
    pub brand: String,

    /// Material class
    #[arg(long, short = 'c')]
    pub class: String,

    /// Material subclass
    #[arg(long, short = 's')]
    pub subclass: Option<String>,

    /// Legacy class index (0..=11)
    #[arg(long, short = 'i')]
    pub index: Option<i64>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Brand to look up
    pub brand: String,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Brand to update
    pub brand: String,

    /// New class
    #[arg(long, short = 'c')]
    pub class: Option<String>,

    /// New subclass
    #[arg(long, short = 's', conflicts_with = "clear_subclass")]
    pub subclass: Option<String>,

    /// Remove the subclass
    #[arg(long)]
    pub clear_subclass: bool,

    /// New legacy class index
    #[arg(long, short = 'i', conflicts_with = "clear_index")]
    pub index: Option<i64>,

    /// Remove the legacy class index
    #[arg(long)]
    pub clear_index: bool,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Brand to delete
    pub brand: String,
}

/// Flat row used for structured list output
#[derive(Serialize)]
struct MaterialRow {
    brand: String,
    class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    subclass: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    class_index: Option<i64>,
}

/// Run a material subcommand
pub fn run(cmd: MatCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        MatCommands::List(args) => run_list(args, global),
        MatCommands::New(args) => run_new(args, global),
        MatCommands::Show(args) => run_show(args, global),
        MatCommands::Update(args) => run_update(args, global),
        MatCommands::Delete(args) => run_delete(args, global),
        MatCommands::Classes => run_classes(global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let db = super::open_db(global)?;

    let filter = MaterialFilter {
        class: args.class,
        subclass: args.subclass,
        class_index: args.index,
        search: args.search,
        limit: args.limit,
    };
    let materials = db.list_materials(&filter);

    if args.count {
        println!("{}", materials.len());
        return Ok(());
    }

    if materials.is_empty() {
        println!("No materials found.");
        return Ok(());
    }

    let rows: Vec<MaterialRow> = materials
        .into_iter()
        .map(|m| {
            let class_index = db.class_index_for(m.id);
            MaterialRow {
                brand: m.brand,
                class: m.class,
                subclass: m.subclass,
                class_index,
            }
        })
        .collect();

    match global.format.or(OutputFormat::Tsv) {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&rows).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&rows).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Csv => {
            println!("brand,class,subclass,class_index");
            for row in &rows {
                println!(
                    "{},{},{},{}",
                    escape_csv(&row.brand),
                    escape_csv(&row.class),
                    escape_csv(row.subclass.as_deref().unwrap_or("")),
                    row.class_index.map(|i| i.to_string()).unwrap_or_default()
                );
            }
        }
        OutputFormat::Md => {
            println!("| Brand | Class | Subclass | Index |");
            println!("|---|---|---|---|");
            for row in &rows {
                println!(
                    "| {} | {} | {} | {} |",
                    escape_md(&row.brand),
                    escape_md(&row.class),
                    escape_md(or_dash(row.subclass.as_deref())),
                    row.class_index
                        .map(|i| i.to_string())
                        .unwrap_or_else(|| "-".to_string())
                );
            }
        }
        OutputFormat::Brand => {
            for row in &rows {
                println!("{}", row.brand);
            }
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            println!(
                "{:<14} {:<34} {:<30} {:<5}",
                style("BRAND").bold(),
                style("CLASS").bold(),
                style("SUBCLASS").bold(),
                style("IDX").bold()
            );
            println!("{}", "-".repeat(86));
            for row in &rows {
                println!(
                    "{:<14} {:<34} {:<30} {:<5}",
                    style(truncate_str(&row.brand, 12)).cyan(),
                    truncate_str(&row.class, 32),
                    truncate_str(or_dash(row.subclass.as_deref()), 28),
                    row.class_index
                        .map(|i| i.to_string())
                        .unwrap_or_else(|| "-".to_string())
                );
            }
            if !global.quiet {
                println!();
                println!("{} material(s) found.", style(rows.len()).cyan());
            }
        }
    }

    Ok(())
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let db = super::open_db(global)?;

    db.create_material(&NewMaterial {
        brand: args.brand.clone(),
        class: args.class.clone(),
        subclass: args.subclass.clone(),
        class_index: args.index,
    })?;

    if !global.quiet {
        println!(
            "{} Created material {}",
            style("✓").green(),
            style(&args.brand).cyan()
        );
        println!(
            "   Class: {}{}",
            style(&args.class).yellow(),
            args.subclass
                .as_deref()
                .map(|s| format!(" / {}", s))
                .unwrap_or_default()
        );
    }
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let db = super::open_db(global)?;
    let profile = MaterialProfile::assemble(&db, &args.brand)?;

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&profile).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&profile).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Brand => {
            println!("{}", profile.brand);
        }
        _ => print_profile(&profile),
    }

    Ok(())
}

fn print_profile(profile: &MaterialProfile) {
    println!("{}", style("─".repeat(60)).dim());
    println!(
        "{}: {}",
        style("Brand").bold(),
        style(&profile.brand).cyan()
    );
    println!("{}: {}", style("Class").bold(), profile.class);
    if let Some(ref subclass) = profile.subclass {
        println!("{}: {}", style("Subclass").bold(), subclass);
    }
    if let Some(index) = profile.class_index {
        println!("{}: {}", style("Class index").bold(), index);
    }
    println!("{}", style("─".repeat(60)).dim());

    if !profile.chemical_composition.is_empty() {
        println!();
        println!("{}", style("Chemical composition:").bold());
        for (symbol, content) in &profile.chemical_composition {
            println!("  {:<12} {}", style(symbol).dim(), content);
        }
    }

    if !profile.hardness.is_empty() {
        println!();
        println!("{}", style("Hardness (HB 10-1, МПа):").bold());
        for row in &profile.hardness {
            println!("  {:<40} {}", or_dash(row.condition.as_deref()), row.mpa);
        }
        if let Some(mean) = profile.hardness_mpa {
            println!("  {:<40} {}", style("mean").dim(), style(mean).yellow());
        }
    }

    if !profile.tensile_strength.is_empty() {
        println!();
        println!("{}", style("Tensile strength (МПа):").bold());
        for row in &profile.tensile_strength {
            println!("  {:<40} {}", or_dash(row.condition.as_deref()), row.mpa);
        }
        if let Some(mean) = profile.tensile_strength_mpa {
            println!("  {:<40} {}", style("mean").dim(), style(mean).yellow());
        }
    }

    if let Some(ref mech) = profile.mechanical {
        println!();
        println!("{}", style("Mechanical properties:").bold());
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

    if let Some(ref tech) = profile.technological {
        println!();
        println!("{}", style("Technological properties:").bold());
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

    if let Some(ref chars) = profile.characteristics {
        println!();
        println!("{}", style("Characteristics:").bold());
        if let Some(ref v) = chars.classification {
            println!("  {}: {}", style("Classification").dim(), v);
        }
        if let Some(ref v) = chars.application {
            println!("  {}: {}", style("Application").dim(), v);
        }
        if let Some(ref v) = chars.foreign_analogs {
            println!("  {}: {}", style("Foreign analogs").dim(), v);
        }
        if let Some(ref v) = chars.additional_info {
            println!("  {}: {}", style("Additional info").dim(), v);
        }
        if let Some(ref v) = chars.replacement {
            println!("  {}: {}", style("Replacement").dim(), v);
        }
    }

    if !profile.standards.is_empty() {
        println!();
        println!(
            "{}: {}",
            style("Standards").bold(),
            profile.standards.join(", ")
        );
    }
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let db = super::open_db(global)?;

    let update = MaterialUpdate {
        class: args.class,
        subclass: if args.clear_subclass {
            Some(None)
        } else {
            args.subclass.map(Some)
        },
        class_index: if args.clear_index {
            Some(None)
        } else {
            args.index.map(Some)
        },
    };

    if update.is_empty() {
        return Err(miette!(
            "nothing to update (use --class, --subclass, --index or the --clear-* flags)"
        ));
    }

    if !db.update_material(&args.brand, &update)? {
        return Err(miette!("no material found for brand '{}'", args.brand));
    }

    if !global.quiet {
        println!(
            "{} Updated material {}",
            style("✓").green(),
            style(&args.brand).cyan()
        );
    }
    Ok(())
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let db = super::open_db(global)?;

    if !db.delete_material(&args.brand)? {
        return Err(miette!("no material found for brand '{}'", args.brand));
    }

    if !global.quiet {
        println!(
            "{} Deleted material {} and its property rows",
            style("✓").green(),
            style(&args.brand).cyan()
        );
    }
    Ok(())
}

fn run_classes(global: &GlobalOpts) -> Result<()> {
    let db = super::open_db(global)?;
    let classes = db.classes();

    if classes.is_empty() {
        println!("No materials found.");
        return Ok(());
    }

    match global.format.or(OutputFormat::Tsv) {
        OutputFormat::Csv => {
            println!("class,count");
            for c in &classes {
                println!("{},{}", escape_csv(&c.class), c.count);
            }
        }
        OutputFormat::Md => {
            println!("| Class | Count |");
            println!("|---|---|");
            for c in &classes {
                println!("| {} | {} |", escape_md(&c.class), c.count);
            }
        }
        OutputFormat::Json => {
            let rows: Vec<serde_json::Value> = classes
                .iter()
                .map(|c| serde_json::json!({"class": c.class, "count": c.count}))
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&rows).into_diagnostic()?
            );
        }
        _ => {
            println!(
                "{:<40} {:>5}",
                style("CLASS").bold(),
                style("COUNT").bold()
            );
            println!("{}", "-".repeat(46));
            for c in &classes {
                println!("{:<40} {:>5}", c.class, style(c.count).cyan());
            }
        }
    }

    Ok(())
}
