use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use textsim::auth::{AuthService, JsonFileStore};
use textsim::config::Config;
use textsim::output::terminal;
use textsim::TextComparer;

/// textsim: compare two texts by style, vocabulary overlap, and TF-IDF.
#[derive(Parser)]
#[command(name = "textsim", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two texts and print all three similarity scores
    Compare {
        /// First file to compare (takes precedence over --text1)
        file1: Option<PathBuf>,

        /// Second file to compare (takes precedence over --text2)
        file2: Option<PathBuf>,

        /// Literal text for the first side
        #[arg(long)]
        text1: Option<String>,

        /// Literal text for the second side
        #[arg(long)]
        text2: Option<String>,

        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Also show both stylistic fingerprints
        #[arg(long)]
        details: bool,
    },

    /// Add a user to the credential store
    Register {
        /// Email address (the user id)
        email: String,

        /// Password (falls back to the TEXTSIM_PASSWORD env var)
        #[arg(long, env = "TEXTSIM_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Serve the JSON API
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (overrides TEXTSIM_PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (overrides TEXTSIM_BIND)
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("textsim=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compare {
            file1,
            file2,
            text1,
            text2,
            json,
            details,
        } => {
            let (text1, label1) = resolve_side(file1.as_deref(), text1, "text 1")?;
            let (text2, label2) = resolve_side(file2.as_deref(), text2, "text 2")?;

            let report = TextComparer::new(&text1, &text2).report().stamped();

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                terminal::display_report(&report, [&label1, &label2], details);
            }
        }

        Commands::Register { email, password } => {
            let config = Config::load()?;
            let store = JsonFileStore::open(&config.users_path).await?;
            let auth = AuthService::new(Arc::new(store));

            if auth.register(email.trim(), &password).await? {
                println!(
                    "{} Registered {} in {}",
                    "✓".green(),
                    email.trim().bold(),
                    config.users_path.display()
                );
            } else {
                anyhow::bail!("User already exists: {}", email.trim());
            }
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let mut config = Config::load()?;
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(bind) = bind {
                config.bind = bind;
            }
            config.require_session_secret()?;

            let store = JsonFileStore::open(&config.users_path).await?;
            info!(users_path = %config.users_path.display(), "Opened credential store");
            let auth = AuthService::new(Arc::new(store));

            textsim::web::run_server(config, auth).await?;
        }
    }

    Ok(())
}

/// Pick one side of a comparison: the file if given, else the literal text,
/// else empty. Returns the text and a display label.
fn resolve_side(
    file: Option<&Path>,
    text: Option<String>,
    fallback_label: &str,
) -> Result<(String, String)> {
    match (file, text) {
        (Some(path), _) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            // Invalid UTF-8 is replaced rather than rejected
            let text = String::from_utf8_lossy(&bytes).into_owned();
            info!(path = %path.display(), bytes = bytes.len(), "Loaded input file");
            Ok((text, path.display().to_string()))
        }
        (None, Some(text)) => Ok((text, fallback_label.to_string())),
        (None, None) => Ok((String::new(), format!("{fallback_label} (empty)"))),
    }
}
