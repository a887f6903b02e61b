use alloyref::cli::{Cli, Commands};
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper
    // Unix piping; without this, `alloyref mat list | head` panics.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Init(args) => alloyref::cli::commands::init::run(args, &global),
        Commands::Mat(cmd) => alloyref::cli::commands::mat::run(cmd, &global),
        Commands::Chem(cmd) => alloyref::cli::commands::chem::run(cmd, &global),
        Commands::Hardness(cmd) => alloyref::cli::commands::hardness::run(cmd, &global),
        Commands::Strength(args) => alloyref::cli::commands::strength::run(args, &global),
        Commands::Mech(cmd) => alloyref::cli::commands::mech::run(cmd, &global),
        Commands::Tech(cmd) => alloyref::cli::commands::tech::run(cmd, &global),
        Commands::Chars(cmd) => alloyref::cli::commands::chars::run(cmd, &global),
        Commands::Standard(cmd) => alloyref::cli::commands::standard::run(cmd, &global),
        Commands::Workpiece(args) => alloyref::cli::commands::workpiece::run(args, &global),
        Commands::Completions(args) => alloyref::cli::commands::completions::run(args),
    }
}
