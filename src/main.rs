use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use yt_extract::{create_platform, Config, YouTubeExtractor};

#[derive(Parser)]
#[command(name = "yt-extract")]
#[command(version, about = "Extract captions, topics and playlist listings from YouTube")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./yt-extract.toml or ./config/yt-extract.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the cleaned caption text of a video
    Captions {
        /// Video URL
        url: String,
        /// Preferred caption language (e.g. "en", "es")
        #[arg(long)]
        lang: Option<String>,
    },
    /// Extract topics from a video description
    Topics {
        /// Video URL
        url: String,
    },
    /// List the videos of a playlist
    Playlist {
        /// Playlist URL containing a `list=` parameter
        url: String,
    },
    /// Print the effective configuration
    Config {
        /// Also write it to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.verbose, std::io::stderr)?;

    init_logging(&config, cli.verbose);
    debug!("{}", config.summary());

    if let Commands::Config { save } = &cli.command {
        println!("{}", config.to_toml_redacted()?);
        if let Some(path) = save {
            config.save(path)?;
        }
        return Ok(());
    }

    config.validate()?;
    let platform = create_platform(&config)?;
    let extractor = YouTubeExtractor::new(platform, &config);

    info!("🚀 yt-extract starting");

    match cli.command {
        Commands::Captions { url, lang } => {
            print_json(&extractor.extract_captions(&url, lang.as_deref()).await)?;
        }
        Commands::Topics { url } => {
            print_json(&extractor.extract_topics(&url).await)?;
        }
        Commands::Playlist { url } => {
            print_json(&extractor.extract_playlist(&url).await)?;
        }
        Commands::Config { .. } => {}
    }

    Ok(())
}

/// The configured level is not known yet while loading, so a subscriber at
/// `info` is scoped to the load and its messages are not lost.
fn load_config<W>(path: Option<&Path>, verbose: bool, writer: W) -> Result<Config>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(log_filter("info", verbose))
        .with_writer(writer)
        .finish();

    tracing::subscriber::with_default(subscriber, || Config::load(path))
}

/// Logs go to stderr so stdout carries only the JSON result.
fn init_logging(config: &Config, verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&config.logging.log_level, verbose))
        .with_writer(std::io::stderr)
        .init();
}

/// RUST_LOG takes precedence over `level`
fn log_filter(level: &str, verbose: bool) -> EnvFilter {
    let level = if verbose { "debug" } else { level };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("yt_extract={},warn", level)))
}

fn print_json<T: Serialize>(result: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}
