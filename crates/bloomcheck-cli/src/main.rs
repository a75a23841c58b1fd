//! bloomcheck CLI: classify questions against Bloom's taxonomy.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "bloomcheck",
    version,
    about = "Bloom's taxonomy cognitive-level classifier for questions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single question against a target level
    Classify {
        /// Question text
        #[arg(long)]
        question: String,

        /// Target level (name, code such as "analyze", or 1-6)
        #[arg(long)]
        target: String,

        /// Source document (UTF-8 text file)
        #[arg(long)]
        document: Option<PathBuf>,

        /// Output format: text, json (default from config)
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Classify every question in a question set and write an agreement report
    Batch {
        /// Path to .toml question set or directory
        #[arg(long)]
        question_set: PathBuf,

        /// Output directory (default from config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: text, json (default from config)
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question set TOML files
    Validate {
        /// Path to question set file or directory
        #[arg(long)]
        question_set: PathBuf,
    },

    /// Show the active level profiles
    Levels {
        /// Print the registry as an editable TOML profile table
        #[arg(long)]
        export: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example question set
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bloomcheck=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Classify {
            question,
            target,
            document,
            format,
            config,
        } => commands::classify::execute(question, target, document, format, config),
        Commands::Batch {
            question_set,
            output,
            format,
            config,
        } => commands::batch::execute(question_set, output, format, config),
        Commands::Validate { question_set } => commands::validate::execute(question_set),
        Commands::Levels { export, config } => commands::levels::execute(export, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
