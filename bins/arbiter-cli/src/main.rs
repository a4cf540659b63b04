mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "arbiter")]
#[command(about = "Arbiter - grade practice-problem submissions against test cases", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a submission against a test-case file and print verdicts
    Run {
        /// Path to the submitted source file
        #[arg(short, long)]
        source: String,

        /// Declared language (javascript, typescript, python, java, cpp, csharp, go, rust)
        #[arg(short, long)]
        language: String,

        /// Path to a JSON file holding an array of {"input", "expected"} pairs
        #[arg(short, long)]
        tests: String,

        /// Path to a harness config JSON file (timeout, node command, ...)
        #[arg(short, long)]
        config: Option<String>,

        /// Per-case execution bound in milliseconds (overrides the config file)
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Emit the raw batch result as JSON instead of the verdict table
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Validate a submission without executing it
    Check {
        /// Path to the submitted source file
        #[arg(short, long)]
        source: String,

        /// Declared language
        #[arg(short, long)]
        language: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            source,
            language,
            tests,
            config,
            timeout_ms,
            json,
        } => {
            let all_passed =
                commands::run(&source, &language, &tests, config.as_deref(), timeout_ms, json)
                    .await?;
            if !all_passed {
                std::process::exit(1);
            }
        }
        Commands::Check { source, language } => {
            commands::check(&source, &language)?;
        }
    }

    Ok(())
}
