//! Guardgen command-line interface
//!
//! Generates TypeScript typeguard functions from a declaration module
//! and prints them or writes them to a `.guards.ts` file.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod diagnostics;
mod generate;
mod paths;

#[derive(Parser)]
#[command(name = "guardgen")]
#[command(about = "Typeguard generator for TypeScript declaration files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate guards from the given declaration file
    #[command(alias = "gen")]
    Generate {
        /// Input declaration file
        file: PathBuf,
        /// Embed code that warns about failing fields
        #[arg(short, long)]
        warners: bool,
        /// Print the parsed module as JSON to stderr
        #[arg(short, long)]
        debug: bool,
        /// Put a .guards.ts file next to the input
        #[arg(short, long)]
        guards_file: bool,
        /// Path of the file to generate (a directory gets the derived name)
        #[arg(short, long)]
        outfile: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            file,
            warners,
            debug,
            guards_file,
            outfile,
        } => {
            init_tracing(debug);
            generate::execute(&file, warners, debug, guards_file, outfile.as_deref())
        }
    }
}

/// Initialize logging on stderr, keeping stdout free for guard output.
///
/// `--debug` turns on debug-level logging for the guardgen crates;
/// otherwise `RUST_LOG` applies with a `warn` fallback.
fn init_tracing(debug: bool) {
    let filter = if debug {
        tracing_subscriber::EnvFilter::new(
            "warn,guardgen_cli=debug,guardgen_parser=debug,guardgen_core=debug",
        )
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into())
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
