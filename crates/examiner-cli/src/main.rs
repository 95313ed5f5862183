//! examiner CLI — take and inspect timed vocabulary exams.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod render;

#[derive(Parser)]
#[command(name = "examiner", version, about = "Timed vocabulary exams in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take an exam interactively
    Take {
        /// Catalog file, or exam name looked up in the catalog directory
        #[arg(long)]
        catalog: Option<String>,

        /// Practice mode: whole deck, no pass/fail, first timeout ends the session
        #[arg(long)]
        practice: bool,

        /// Seed for the question order (random if omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Milliseconds per tick (overrides the config file)
        #[arg(long)]
        tick_millis: Option<u64>,

        /// Save the JSON report to the output directory
        #[arg(long)]
        save: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Run a scripted exam without waiting on the clock
    Simulate {
        /// Catalog file, or exam name looked up in the catalog directory
        #[arg(long)]
        catalog: Option<String>,

        /// Practice mode
        #[arg(long)]
        practice: bool,

        /// Seed for the question order and the scripted answers
        #[arg(long)]
        seed: Option<u64>,

        /// Percent of questions answered correctly
        #[arg(long, default_value = "90")]
        accuracy: u8,

        /// Ticks to wait after a question appears before answering
        #[arg(long, default_value = "1")]
        answer_after: u32,

        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate exam catalog files
    Validate {
        /// Path to a catalog file or directory
        #[arg(long)]
        catalog: PathBuf,
    },

    /// List exams in the catalog directory
    List {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print a saved exam report
    Show {
        /// Report JSON file
        #[arg(long)]
        report: PathBuf,
    },

    /// Create a starter config and example exam
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("examiner=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take {
            catalog,
            practice,
            seed,
            tick_millis,
            save,
            config,
        } => commands::take::execute(catalog, practice, seed, tick_millis, save, config).await,
        Commands::Simulate {
            catalog,
            practice,
            seed,
            accuracy,
            answer_after,
            json,
            config,
        } => commands::simulate::execute(
            catalog,
            practice,
            seed,
            accuracy,
            answer_after,
            json,
            config,
        ),
        Commands::Validate { catalog } => commands::validate::execute(catalog),
        Commands::List { config } => commands::list::execute(config),
        Commands::Show { report } => commands::show::execute(report),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
