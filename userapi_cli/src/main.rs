mod commands;
mod ui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;
use userapi_harness::FailureScenario;

#[derive(Parser)]
#[command(name = "userapi")]
#[command(about = "Demo user API and the test harness that gates its pipeline", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = 3000)]
        port: u16,

        /// Environment label [default: development]; only an explicit
        /// "development" exposes error details
        #[arg(short, long, env = "APP_ENV")]
        environment: Option<String>,
    },

    /// Boot the service on a test port and assert on its responses
    Test {
        /// Contract file (YAML, TOML, or JSON)
        #[arg(short, long, conflicts_with = "scenario")]
        contract: Option<PathBuf>,

        /// Run one known-failing scenario (version, status-code, security)
        #[arg(short, long)]
        scenario: Option<FailureScenario>,

        /// Port for the test server (0 picks a free one)
        #[arg(short, long, env = "TEST_PORT", default_value_t = 3001)]
        port: u16,

        /// Wait after starting the server before the first request
        #[arg(short, long, default_value = "1s", value_parser = parse_duration)]
        grace: Duration,

        /// Environment label passed to the test server
        #[arg(short, long, default_value = "test")]
        environment: String,

        /// Write the run report as JSON
        #[arg(long)]
        output_json: Option<PathBuf>,

        /// Write the run report as Markdown
        #[arg(short = 'm', long)]
        output_markdown: Option<PathBuf>,
    },

    /// Validate a contract file
    Validate {
        /// Path to contract file
        contract_file: PathBuf,
    },

    /// List available checks and failure scenarios
    List,
}

fn parse_duration(s: &str) -> Result<Duration, humantime::DurationError> {
    humantime::parse_duration(s)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { port, environment } => {
            commands::serve::execute(port, environment).await?;
        }

        Commands::Test {
            contract,
            scenario,
            port,
            grace,
            environment,
            output_json,
            output_markdown,
        } => {
            commands::test::execute(
                contract,
                scenario,
                port,
                grace,
                environment,
                output_json,
                output_markdown,
            )
            .await?;
        }

        Commands::Validate { contract_file } => {
            commands::validate::execute(contract_file).await?;
        }

        Commands::List => {
            commands::list::execute().await?;
        }
    }

    Ok(())
}
