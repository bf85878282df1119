/// Duet Demo - drive several independent players from a script
use anyhow::Context;
use clap::{Parser, Subcommand};
use duet_demo::{config::PageConfig, page::Page, script::parse_script};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "duet-demo")]
#[command(about = "Headless page with independent audio players", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mount the page, run a script and print the rendered controls
    Run {
        /// Configuration file path
        #[arg(short, long, env = "DUET_CONFIG")]
        config: Option<PathBuf>,
        /// Comma-separated steps, e.g. "first:play,tick:5,second:seek:0.5"
        #[arg(short, long, default_value = "")]
        script: String,
    },
    /// Print the effective page configuration
    ShowConfig {
        /// Configuration file path
        #[arg(short, long, env = "DUET_CONFIG")]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "duet_demo=info,duet_playback=info,duet_controls=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, script } => {
            run(config, &script)?;
        }
        Commands::ShowConfig { config } => {
            let config = PageConfig::load(config.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn run(config_path: Option<PathBuf>, script: &str) -> anyhow::Result<()> {
    let config = PageConfig::load(config_path.as_deref()).context("Failed to load page configuration")?;
    let steps = parse_script(script)?;

    tracing::info!("Mounting {} players", config.players.len());
    let mut page = Page::mount(&config);

    page.run(&steps).context("Script failed")?;
    tracing::info!("Ran {} steps", steps.len());

    println!("{}", serde_json::to_string_pretty(&page.snapshot())?);

    page.unmount();
    Ok(())
}
