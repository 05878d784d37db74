use anyhow::Context;
use clap::{Parser, Subcommand};
use drape::document::RequestDocument;
use drape::{EngineConfig, TemplateCatalog};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Deterministic outfit recommendations from a wardrobe
#[derive(Parser, Debug)]
#[command(name = "drape")]
#[command(about = "Outfit recommendation engine", long_about = None)]
struct Args {
    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate an outfit from a request document and print it as JSON
    Recommend {
        /// Request document: user, wardrobe items, optional catalog and profile
        #[arg(short, long)]
        request: PathBuf,

        /// Engine configuration (JSON); defaults apply to missing fields
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Also rank replacements for this slot of the generated outfit
        #[arg(long)]
        alternatives: Option<String>,

        /// Maximum number of alternatives
        #[arg(long, default_value_t = 5)]
        max_alternatives: usize,
    },
    /// List the outfit templates
    Templates,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so stdout stays valid JSON
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Recommend {
            request,
            config,
            alternatives,
            max_alternatives,
        } => recommend(request, config, alternatives, max_alternatives),
        Command::Templates => templates(),
    }
}

fn recommend(
    request_path: PathBuf,
    config_path: Option<PathBuf>,
    alternatives_slot: Option<String>,
    max_alternatives: usize,
) -> anyhow::Result<()> {
    let config = match &config_path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            EngineConfig::from_json_str(&json)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    let document = RequestDocument::from_path(&request_path)
        .with_context(|| format!("loading request {}", request_path.display()))?;
    info!(
        "Loaded request for '{}': {} wardrobe items, {} catalog items",
        document.request.user_id,
        document.items.len(),
        document.catalog.len()
    );

    let (recommender, request) = document.into_recommender(TemplateCatalog::standard(), config)?;
    let recommendation = recommender
        .generate(&request)
        .context("cannot generate outfit")?;

    let output = match alternatives_slot {
        Some(slot) => {
            let alternatives = recommender.alternatives(
                &recommendation.user_id,
                &recommendation.outfit_id,
                &slot,
                max_alternatives,
            )?;
            serde_json::json!({
                "recommendation": recommendation,
                "alternatives": alternatives,
            })
        }
        None => serde_json::to_value(&recommendation)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn templates() -> anyhow::Result<()> {
    let catalog = TemplateCatalog::standard();
    let templates = catalog
        .ids()
        .into_iter()
        .map(|id| catalog.get(id))
        .collect::<drape::Result<Vec<_>>>()?;
    println!("{}", serde_json::to_string_pretty(&templates)?);
    Ok(())
}
