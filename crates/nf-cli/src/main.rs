//! CLI frontend for the Ninefold check engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "nf",
    about = "Ninefold: exploding-d10 check resolver",
    version,
    propagate_version = true
)]
struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll the exploding d10 once and show every face
    Roll {
        /// Spend a hero point (start with two dice)
        #[arg(long)]
        hero: bool,

        /// RNG seed for a reproducible roll
        #[arg(short, long)]
        seed: Option<u64>,

        /// JSON file overriding the dice rules
        #[arg(short, long)]
        rules: Option<PathBuf>,
    },

    /// Resolve a check request read from a JSON file
    Check {
        /// Path to the request JSON
        request: PathBuf,

        /// RNG seed for a reproducible roll
        #[arg(short, long)]
        seed: Option<u64>,

        /// JSON file overriding the dice rules
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Print the result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the save outcome for every raw roll against a lethality
    SaveTable {
        /// Lethality after armor and shield
        #[arg(short, long, allow_negative_numbers = true)]
        lethality: i32,

        /// Trait level added to each roll
        #[arg(short, long = "trait", default_value = "0", allow_negative_numbers = true)]
        trait_level: i32,
    },
}

fn main() {
    let cli = Cli::parse();
    commands::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Roll { hero, seed, rules } => commands::roll::run(hero, seed, rules.as_deref()),
        Commands::Check {
            request,
            seed,
            rules,
            json,
        } => commands::check::run(&request, seed, rules.as_deref(), json),
        Commands::SaveTable {
            lethality,
            trait_level,
        } => commands::save_table::run(lethality, trait_level),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
