//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    chars::CharsCommands,
    chem::ChemCommands,
    completions::CompletionsArgs,
    hardness::HardnessCommands,
    init::InitArgs,
    mat::MatCommands,
    mech::MechCommands,
    standard::StandardCommands,
    strength::StrengthArgs,
    tech::TechCommands,
    workpiece::WorkpieceArgs,
};

#[derive(Parser)]
#[command(name = "alloyref")]
#[command(author, version, about = "Metal alloy engineering-properties reference")]
#[command(
    long_about = "A reference database of metal alloys: chemical composition, hardness, \
tensile strength, technological and mechanical properties, looked up by brand."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to the reference database (default: from config, then ./alloyref.db)
    #[arg(long, global = true, env = "ALLOYREF_DB")]
    pub db: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty reference database
    Init(InitArgs),

    /// Material management (brand, class, subclass, class index)
    #[command(subcommand)]
    Mat(MatCommands),

    /// Chemical composition by brand
    #[command(subcommand)]
    Chem(ChemCommands),

    /// Hardness table by brand (parsed from the legacy encoding)
    #[command(subcommand)]
    Hardness(HardnessCommands),

    /// Tensile-strength table by brand (parsed from the legacy encoding)
    Strength(StrengthArgs),

    /// Mechanical properties by brand
    #[command(subcommand)]
    Mech(MechCommands),

    /// Technological properties by brand
    #[command(subcommand)]
    Tech(TechCommands),

    /// Descriptive characteristics by brand
    #[command(subcommand)]
    Chars(CharsCommands),

    /// Standards (GOST/TU designations)
    #[command(subcommand)]
    Standard(StandardCommands),

    /// Assemble a workpiece material record (profile + machining state)
    Workpiece(WorkpieceArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically pick (pretty for show, tsv for lists)
    #[default]
    Auto,
    /// Tab-separated values (for piping)
    Tsv,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// JSON format (for programming)
    Json,
    /// YAML format
    Yaml,
    /// Just brands, one per line
    Brand,
}

impl OutputFormat {
    /// Resolve Auto to a concrete format
    pub fn or(self, fallback: OutputFormat) -> OutputFormat {
        match self {
            OutputFormat::Auto => fallback,
            other => other,
        }
    }
}
