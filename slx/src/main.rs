//! slx: CLI for streaming XML user records through a DuckDB store.

use clap::{Parser, Subcommand};

use sluice::Error;

mod commands;

#[derive(Parser)]
#[command(name = "slx")]
#[command(about = "Import XML user records into DuckDB and export filtered results")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the store and default config under SLUICE_ROOT
    Init,

    /// Import user records from an XML source file
    Import {
        /// Path to the source XML document
        source: String,
    },

    /// Export records matching a filter expression as an XML document
    Filter {
        /// Filter expression, e.g. "age btw 20 45" or "age >= 30"
        #[arg(short = 'e', long = "expression")]
        expression: String,

        /// Path of the XML document to write
        #[arg(short = 't', long = "target")]
        target: String,
    },

    /// Generate a sample source document with random users
    Generate {
        /// Path of the XML document to write
        target: String,

        /// Number of users to generate
        #[arg(short = 'n', long = "count", default_value = "250")]
        count: u64,

        /// Pretty-print the generated document
        #[arg(long = "pretty")]
        pretty: bool,
    },

    /// Delete all imported records
    Clean,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init(),
        Commands::Import { source } => commands::import(&source),
        Commands::Filter { expression, target } => commands::filter(&expression, &target),
        Commands::Generate { target, count, pretty } => {
            commands::generate(&target, count, pretty)
        }
        Commands::Clean => commands::clean(),
    };

    if let Err(e) = result {
        match e {
            Error::ConstraintViolation(_) => {
                eprintln!("Error: some records were already imported; run 'slx clean' first");
            }
            other => eprintln!("Error: {}", other),
        }
        std::process::exit(1);
    }
}
