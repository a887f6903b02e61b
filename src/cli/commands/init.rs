//! `alloyref init` - create an empty reference database

use console::style;
use miette::Result;

use crate::cli::GlobalOpts;
use crate::db::AlloyDb;

#[derive(clap::Args, Debug)]
pub struct InitArgs {}

pub fn run(_args: InitArgs, global: &GlobalOpts) -> Result<()> {
    let path = super::database_path(global);
    let existed = path.exists();

    AlloyDb::open(&path)?;

    if !global.quiet {
        if existed {
            println!(
                "{} Reference database already present at {}",
                style("•").dim(),
                style(path.display()).cyan()
            );
        } else {
            println!(
                "{} Created reference database {}",
                style("✓").green(),
                style(path.display()).cyan()
            );
        }
    }
    Ok(())
}
