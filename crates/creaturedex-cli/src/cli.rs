//! Command-line argument parsing.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use creaturedex_core::CreatureId;

/// Browse the creature catalog - works offline
#[derive(Parser)]
#[command(name = "creaturedex")]
#[command(about = "Browse mystical creatures, keep favorites, and attach photos", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Catalog endpoint (overrides config and $CREATUREDEX_CATALOG_URL)
    #[arg(long, global = true)]
    pub catalog_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List creatures
    List {
        /// Only show favorites
        #[arg(long)]
        favorites: bool,
    },

    /// Show one creature
    Show { id: CreatureId },

    /// Toggle a creature's favorite flag
    Favorite { id: CreatureId },

    /// Attach a picture to a creature (asks for the capture PIN first)
    Photo {
        id: CreatureId,

        /// Image file standing in for the camera
        #[arg(long)]
        file: PathBuf,
    },

    /// Show map region and markers
    Map {
        /// Focus the map on this creature
        #[arg(long)]
        focus: Option<CreatureId>,
    },

    /// Show or change the theme
    Theme { mode: Option<ThemeMode> },

    /// Report favorites and pictures for creatures no longer in the catalog
    Stale,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeMode {
    Dark,
    Light,
    Toggle,
}
