//! makearch CLI - turn automation ideas into Make scenarios with AI steps

mod backend;
mod catalog;
mod messages;
mod render;
mod shell;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use backend::{LocalBackend, RemoteBackend, ScenarioBackend};
use makearch_ai::{AiConfig, ScenarioGenerator};
use messages::Locale;
use shell::{Shell, ShellState};

#[derive(Parser)]
#[command(name = "makearch")]
#[command(about = "Make.com scenario architect - describe a need, get an AI-powered automation")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use a running makearch server instead of calling the LLM directly
    #[arg(long, global = true, env = "MAKEARCH_SERVER_URL")]
    server: Option<String>,

    /// Language of the interface
    #[arg(long, global = true, value_enum, default_value_t = Locale::Fr)]
    lang: Locale,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell (default)
    Shell,

    /// Generate a single scenario
    Generate {
        /// Description of the automation need
        #[arg(short, long)]
        input: String,

        /// Print the scenario as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// List the example automation needs
    Examples,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with rendered scenarios
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let command = cli.command.unwrap_or(Commands::Shell);

    let succeeded = match cli.server.as_deref() {
        Some(url) => run(RemoteBackend::new(url)?, cli.lang, command).await?,
        None => {
            let generator = ScenarioGenerator::from_config(AiConfig::from_env()?);
            run(LocalBackend::new(generator), cli.lang, command).await?
        }
    };

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}

/// Returns whether the command produced what was asked for.
async fn run<B: ScenarioBackend>(backend: B, locale: Locale, command: Commands) -> Result<bool> {
    match command {
        Commands::Shell => {
            let mut shell = Shell::new(backend, locale, std::io::stdout());
            shell.run(BufReader::new(tokio::io::stdin())).await?;
            Ok(true)
        }
        Commands::Generate { input, json: true } => {
            // Shell output on stderr, only the JSON scenario on stdout
            let mut shell = Shell::new(backend, locale, std::io::stderr());
            shell.set_input(input);
            shell.submit().await?;
            match shell.state() {
                ShellState::ShowingScenario(scenario) => {
                    println!("{}", serde_json::to_string_pretty(scenario)?);
                    Ok(true)
                }
                _ => Ok(false),
            }
        }
        Commands::Generate { input, json: false } => {
            let mut shell = Shell::new(backend, locale, std::io::stdout());
            shell.set_input(input);
            shell.submit().await?;
            Ok(matches!(shell.state(), ShellState::ShowingScenario(_)))
        }
        Commands::Examples => {
            let mut shell = Shell::new(backend, locale, std::io::stdout());
            shell.show_examples()?;
            Ok(true)
        }
    }
}
