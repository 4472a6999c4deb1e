//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use args::{OutputFormat, ParseArgs};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mdcontent")]
#[command(about = "Parse markdown content files into structured content", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a content file and print its structure
    Parse {
        #[command(flatten)]
        args: ParseArgs,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Commands::Parse { args, format } => commands::parse::run(args, format),
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
