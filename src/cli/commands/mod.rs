//! CLI command implementations

pub mod chars;
pub mod chem;
pub mod completions;
pub mod hardness;
pub mod init;
pub mod mat;
pub mod mech;
pub mod standard;
pub mod strength;
pub mod tech;
pub mod workpiece;

use std::path::PathBuf;

use console::style;
use miette::Result;

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::db::AlloyDb;

/// Resolve the database path from the --db flag and config layers
pub(crate) fn database_path(global: &GlobalOpts) -> PathBuf {
    Config::load().database_path(global.db.as_deref())
}

/// Open the reference database for a command
pub(crate) fn open_db(global: &GlobalOpts) -> Result<AlloyDb> {
    let path = database_path(global);
    if global.verbose && !global.quiet {
        eprintln!("{} using database {}", style("→").blue(), path.display());
    }
    AlloyDb::open(&path)
}
