mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "dermaiq",
    version,
    about = "Ingredient scoring tool for cosmetic product analysis"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a classified ingredient list (JSON from the risk classifier)
    Score {
        /// Path to classified input JSON file
        input_file: PathBuf,

        /// Custom JSON policy file
        #[arg(short = 'P', long = "policy", value_name = "FILE")]
        policy: Option<PathBuf>,

        /// Predefined policy: eu (default)
        #[arg(short, long = "preset", value_name = "NAME", default_value = "eu")]
        preset: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Show all ingredients, not just penalized ones
        #[arg(long)]
        show_all: bool,

        /// Show detailed per-ingredient reasoning
        #[arg(long)]
        verbose: bool,

        /// Include a full scoring trace (json output only)
        #[arg(long)]
        trace: bool,
    },
    /// Validate and display a classified input file (without scoring)
    Inspect {
        /// Path to classified input JSON file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Manage and inspect scoring policies
    Policy {
        #[command(subcommand)]
        action: PolicyAction,
    },
}

#[derive(Subcommand)]
enum PolicyAction {
    /// List predefined policies
    List,
    /// Explain a policy in plain language
    Explain {
        /// Preset name (e.g., "eu")
        preset: String,
    },
    /// Print the JSON schema with field descriptions and example
    Schema,
    /// Validate a custom policy file
    Validate {
        /// Path to JSON policy file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            input_file,
            policy,
            preset,
            output,
            show_all,
            verbose,
            trace,
        } => commands::score::run(input_file, policy, &preset, &output, show_all, verbose, trace),
        Commands::Inspect { input_file, output } => commands::inspect::run(input_file, &output),
        Commands::Policy { action } => match action {
            PolicyAction::List => commands::policy::list(),
            PolicyAction::Explain { preset } => commands::policy::explain(&preset),
            PolicyAction::Schema => commands::policy::schema(),
            PolicyAction::Validate { file } => commands::policy::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
