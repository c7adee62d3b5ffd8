//! # stdfn CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// stdfn — validated functions over standard schemas.
///
/// Validates documents against JSON Schema and demonstrates validated
/// task creation.
#[derive(Parser, Debug)]
#[command(name = "stdfn", version, about)]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate a document against a JSON Schema.
    Check(stdfn_cli::check::CheckArgs),
    /// Create a task through the validated todo function.
    Todo(stdfn_cli::todo::TodoArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    stdfn_cli::init_tracing(cli.log_json);

    match cli.command {
        Commands::Check(args) => stdfn_cli::check::run(&args),
        Commands::Todo(args) => stdfn_cli::todo::run(&args),
    }
}
