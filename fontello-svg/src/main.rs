mod catalog;
mod cli;
mod database;
mod glyph;
mod manifest;
mod output;
mod render;

use std::collections::HashSet;

use anyhow::Context;
use log::{debug, error, info};
use tokio::sync::mpsc;

use crate::{cli::CliArgs, database::GlyphDatabase, output::Event};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::init_cli()?;

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    run(args).await
}

async fn run(args: CliArgs) -> anyhow::Result<()> {
    let manifest = manifest::load(&args.config).await?;
    let database = match &args.glyph_data {
        Some(path) => GlyphDatabase::load(path).await?,
        None => GlyphDatabase::bundled().clone(),
    };

    let colors = args.colors();
    let file_format = args
        .file_format
        .as_deref()
        .unwrap_or(glyph::DEFAULT_FILE_FORMAT);
    let glyphs = catalog::build(
        &manifest,
        &colors,
        file_format,
        &database,
        glyph::COLLECTION_FILTERS,
    );
    debug!("Catalog holds {} glyphs", glyphs.len());

    tokio::fs::create_dir_all(&args.out)
        .await
        .with_context(|| format!("Failed to create export directory {:?}", args.out))?;

    let (events, event_log) = mpsc::unbounded_channel();
    let logger = tokio::spawn(log_events(event_log));

    let selected = if args.no_skip {
        glyphs.clone()
    } else {
        let missing = output::missing_glyphs(glyphs.clone(), &args.out).await;
        let missing_ids = missing
            .iter()
            .map(|glyph| glyph.id.clone())
            .collect::<HashSet<_>>();
        for glyph in glyphs.iter().filter(|glyph| !missing_ids.contains(&glyph.id)) {
            let _ = events.send(Event::Skipped {
                name: glyph.name.clone(),
                collection: glyph.collection.clone(),
            });
        }
        missing
    };

    if args.classic {
        output::fetch_svgs(selected, &args.out, &events).await?;
    } else {
        output::write_svgs(&selected, &args.out, &events).await?;
    }

    // The stylesheet covers the whole catalog, skipped glyphs included
    if !args.no_css {
        let css_prefix = manifest
            .css_prefix_text
            .as_deref()
            .unwrap_or(glyph::DEFAULT_CSS_PREFIX);
        let url_path = args.css_path.as_deref().unwrap_or_default();
        let sheet = render::stylesheet(&glyphs, url_path, css_prefix);

        let css_path = args.out.join("index.css");
        tokio::fs::write(&css_path, sheet)
            .await
            .with_context(|| format!("Failed to write stylesheet at {css_path:?}"))?;
        info!("Saved {}", css_path.display());
    }

    drop(events);
    logger.await.context("Event logger task failed")?;

    Ok(())
}

async fn log_events(mut event_log: mpsc::UnboundedReceiver<Event>) {
    while let Some(event) = event_log.recv().await {
        match event {
            Event::SvgWritten(path) => info!("Saved {}", path.display()),
            Event::FetchFailed(url) => error!("Download failed: {url}"),
            Event::Skipped { name, collection } => {
                debug!("Skipped existing SVG: {name}-{collection}");
            }
        }
    }
}
