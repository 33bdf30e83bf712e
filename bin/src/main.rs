//! rekline CLI - Resample Binance 1-minute klines into phase-shifted N-minute klines.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod display;
mod logging;
mod options;
mod pipeline;

use options::{ComposeArgs, SourceArgs};

#[derive(Parser)]
#[command(name = "rekline")]
#[command(
    about = "Resample 1-minute klines into N-minute klines for every phase offset",
    long_about = None
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose N-minute klines for every ticker and phase offset
    Compose {
        #[command(flatten)]
        args: ComposeArgs,
    },

    /// Show which archives exist and which outputs would be written
    Plan {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet)?;

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Compose { args } => commands::compose::compose(args, cli.quiet).await,
        Commands::Plan { source } => commands::plan::plan(&source),
    }
}
