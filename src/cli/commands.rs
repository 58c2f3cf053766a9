//! CLI commands implementation.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use console::style;

use crate::client::HttpBackend;
use crate::config::{load_settings, Settings};
use crate::controller::{MapController, SearchOutcome};
use crate::geo::LatLon;
use crate::models::FilterTag;
use crate::surface::{HeadlessSurface, MapSurface, STREET_ZOOM};

use super::explore;

#[derive(Parser)]
#[command(name = "waymark")]
#[command(about = "Interactive landmark map controller")]
#[command(version)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive map session (search, filters, routes, chat commands)
    Explore {
        /// User position as "lat,lon" (overrides config)
        #[arg(long, env = "WAYMARK_POSITION")]
        at: Option<String>,
    },

    /// List landmarks visible from a viewpoint
    Landmarks {
        /// Viewpoint latitude
        lat: f64,
        /// Viewpoint longitude
        lon: f64,
        /// Zoom level for the viewport
        #[arg(short, long, default_value_t = STREET_ZOOM)]
        zoom: u8,
        /// Comma-separated filter tags (default: all)
        #[arg(short, long)]
        filters: Option<String>,
    },

    /// Resolve a place name to coordinates
    Search {
        /// Free-text query
        query: String,
    },
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Explore { at } => explore::cmd_explore(&settings, at.as_deref()).await,
        Commands::Landmarks {
            lat,
            lon,
            zoom,
            filters,
        } => cmd_landmarks(&settings, LatLon::new(lat, lon), zoom, filters.as_deref()).await,
        Commands::Search { query } => cmd_search(&settings, &query).await,
    }
}

/// Build the backend client from settings.
pub(super) fn backend(settings: &Settings) -> anyhow::Result<Arc<HttpBackend>> {
    Ok(Arc::new(HttpBackend::new(
        &settings.backend.base_url,
        settings.backend.timeout(),
        &settings.backend.user_agent,
    )?))
}

/// Parse a comma-separated filter list, rejecting unknown tags.
fn parse_filters(raw: &str) -> anyhow::Result<BTreeSet<FilterTag>> {
    let mut tags = BTreeSet::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let tag = FilterTag::from_str(part)
            .ok_or_else(|| anyhow::anyhow!("unknown filter tag: {part}"))?;
        tags.insert(tag);
    }
    Ok(tags)
}

async fn cmd_landmarks(
    settings: &Settings,
    center: LatLon,
    zoom: u8,
    filters: Option<&str>,
) -> anyhow::Result<()> {
    let surface = HeadlessSurface::new(center, zoom);
    let mut controller = MapController::new(surface, backend(settings)?);
    if let Some(raw) = filters {
        controller.replace_filters(parse_filters(raw)?);
    }

    controller.sync_landmarks().await;

    let landmarks: Vec<_> = controller.landmarks().cloned().collect();
    if landmarks.is_empty() {
        println!("{} No landmarks in view.", style("!").yellow());
        return Ok(());
    }

    println!("\n{}", style(format!("Landmarks around {center}")).bold());
    println!("{}", "-".repeat(60));
    for (index, landmark) in landmarks.iter().enumerate() {
        println!(
            "{:>3}. {} {}",
            index + 1,
            landmark.title,
            style(format!("[{}]", landmark.kind)).dim()
        );
    }

    Ok(())
}

async fn cmd_search(settings: &Settings, query: &str) -> anyhow::Result<()> {
    let surface = HeadlessSurface::world();
    let mut controller = MapController::new(surface, backend(settings)?);

    match controller.search(query).await {
        SearchOutcome::Recentered { display_name } => {
            let center = controller.surface().center();
            match display_name {
                Some(name) => println!("{} {} ({center})", style("✓").green(), name),
                None => println!("{} {center}", style("✓").green()),
            }
            println!(
                "{} landmarks in view",
                controller.landmarks().count()
            );
        }
        SearchOutcome::NotFound => {
            println!(
                "{} Location not found. Please try a different search term.",
                style("!").yellow()
            );
        }
        SearchOutcome::Failed => {
            println!(
                "{} An error occurred while searching. Please try again.",
                style("✗").red()
            );
        }
        SearchOutcome::Empty => {}
    }

    Ok(())
}
