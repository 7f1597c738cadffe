use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use indexmap::IndexMap;

#[derive(Debug, Parser, Clone)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// The Fontello configuration file
    #[arg(short, long)]
    pub config: PathBuf,
    /// The export directory
    #[arg(short, long)]
    pub out: PathBuf,
    /// Fill colors for the exported SVG paths.
    /// Syntax: --fill-colors "black:rgb(0,0,0) | red:rgb(255,0,0)"
    #[arg(short, long, value_parser = parse_fill_colors)]
    pub fill_colors: Option<IndexMap<String, String>>,
    /// URL prefix for the stylesheet's background images
    #[arg(short = 'p', long)]
    pub css_path: Option<String>,
    /// Override the default filename. Slots: {0} collection, {1} name, {2} color.
    /// Syntax: --file-format "{0}-{1}-{2}.svg"
    #[arg(long)]
    pub file_format: Option<String>,
    /// Substitute shape database (JSON, uid to SVG data)
    #[arg(long)]
    pub glyph_data: Option<PathBuf>,
    /// Do not create the CSS file
    #[arg(long)]
    pub no_css: bool,
    /// Do not skip existing files
    #[arg(long)]
    pub no_skip: bool,
    /// Do not add a fill attribute to the exported SVGs
    #[arg(long, conflicts_with = "fill_colors")]
    pub no_fill_colors: bool,
    /// Fetch each glyph's SVG from its upstream collection instead of
    /// rendering it from shape data
    #[arg(long)]
    pub classic: bool,
    /// Verbose output
    #[arg(long)]
    pub verbose: bool,
}

impl CliArgs {
    /// The requested fill colors. Defaults to plain black; `--no-fill-colors`
    /// collapses to a single unnamed, empty color so filenames still resolve
    /// but no fill attribute is emitted.
    pub fn colors(&self) -> IndexMap<String, String> {
        if self.no_fill_colors {
            return IndexMap::from([(String::new(), String::new())]);
        }

        self.fill_colors
            .clone()
            .unwrap_or_else(|| IndexMap::from([("black".to_string(), "#000000".to_string())]))
    }
}

/// Parses the cli arguments
pub fn init_cli() -> anyhow::Result<CliArgs> {
    CliArgs::try_parse().context("Failed to parse CLI arguments")
}

fn parse_fill_colors(raw: &str) -> Result<IndexMap<String, String>, String> {
    raw.split('|')
        .map(|pair| {
            pair.split_once(':')
                .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
                .ok_or_else(|| format!("Expected a name:value pair, found {pair:?}"))
        })
        .collect()
}
