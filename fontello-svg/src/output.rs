use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::{sync::mpsc::UnboundedSender, task::JoinSet};

use crate::{glyph::Glyph, render};

/// Progress reported while exporting. Consumed for logging only; no event
/// ever feeds back into control flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SvgWritten(PathBuf),
    FetchFailed(String),
    Skipped { name: String, collection: String },
}

/// Returns the glyphs with at least one expected output file missing under
/// `svg_dir`. A glyph counts as present only when every color variant's file
/// exists. Checks run concurrently across glyphs and across one glyph's
/// files; the result is a duplicate-free subset in no particular order.
pub async fn missing_glyphs(glyphs: Vec<Glyph>, svg_dir: &Path) -> Vec<Glyph> {
    let mut checks = JoinSet::new();

    for glyph in glyphs {
        let svg_dir = svg_dir.to_path_buf();
        checks.spawn(async move {
            let mut files = JoinSet::new();
            for filename in glyph.filenames() {
                let path = svg_dir.join(filename);
                files.spawn(async move { matches!(tokio::fs::try_exists(&path).await, Ok(true)) });
            }

            let mut present = true;
            while let Some(exists) = files.join_next().await {
                present &= exists.unwrap_or(false);
            }

            (!present).then_some(glyph)
        });
    }

    let mut missing = Vec::new();
    while let Some(result) = checks.join_next().await {
        if let Ok(Some(glyph)) = result {
            missing.push(glyph);
        }
    }

    missing
}

/// Renders and writes every glyph's color variants. Writes fan out with no
/// ordering between them; any write failure aborts the run.
pub async fn write_svgs(
    glyphs: &[Glyph],
    svg_dir: &Path,
    events: &UnboundedSender<Event>,
) -> anyhow::Result<()> {
    let mut writes = JoinSet::new();

    for glyph in glyphs {
        for (color, fill_color) in &glyph.colors {
            let document = render::svg_document(glyph, fill_color);
            let path = svg_dir.join(glyph.filename(color));
            let events = events.clone();
            writes.spawn(async move {
                tokio::fs::write(&path, document)
                    .await
                    .with_context(|| format!("Failed to write SVG at {path:?}"))?;
                let _ = events.send(Event::SvgWritten(path));

                Ok::<_, anyhow::Error>(())
            });
        }
    }

    while let Some(result) = writes.join_next().await {
        result.context("SVG write task failed")??;
    }

    Ok(())
}

/// Fetches each glyph's SVG from its upstream collection and writes the body
/// once per color variant. A failed fetch is reported for that glyph alone
/// and never aborts its siblings; write failures still do.
pub async fn fetch_svgs(
    glyphs: Vec<Glyph>,
    svg_dir: &Path,
    events: &UnboundedSender<Event>,
) -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    let mut fetches = JoinSet::new();

    for glyph in glyphs {
        // Custom icons only exist inline, there is nothing to fetch
        let Some(url) = glyph.url.clone() else {
            continue;
        };

        let client = client.clone();
        let svg_dir = svg_dir.to_path_buf();
        let events = events.clone();
        fetches.spawn(async move {
            let response = match client.get(&url).send().await {
                Ok(response) if response.status().is_success() => response,
                Ok(_) | Err(_) => {
                    let _ = events.send(Event::FetchFailed(url));
                    return Ok(());
                }
            };
            let body = match response.text().await {
                Ok(body) => body,
                Err(_) => {
                    let _ = events.send(Event::FetchFailed(url));
                    return Ok(());
                }
            };

            for color in glyph.colors.keys() {
                let path = svg_dir.join(glyph.filename(color));
                tokio::fs::write(&path, &body)
                    .await
                    .with_context(|| format!("Failed to write SVG at {path:?}"))?;
                let _ = events.send(Event::SvgWritten(path));
            }

            Ok::<_, anyhow::Error>(())
        });
    }

    while let Some(result) = fetches.join_next().await {
        result.context("SVG fetch task failed")??;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use tokio::sync::mpsc;

    use crate::glyph::COLLECTION_FILTERS;

    use super::*;

    fn glyph(name: &str, colors: &[&str]) -> Glyph {
        let colors = colors
            .iter()
            .map(|color| (color.to_string(), format!("#{color}")))
            .collect::<IndexMap<_, _>>();
        Glyph::new(name, "fontawesome", name, colors, COLLECTION_FILTERS)
    }

    #[tokio::test]
    async fn missing_glyphs_empty_dir_returns_all() {
        let dir = tempfile::tempdir().unwrap();
        let glyphs = vec![glyph("search", &["black"]), glyph("heart", &["black"])];

        let missing = missing_glyphs(glyphs.clone(), dir.path()).await;

        assert_eq!(missing.len(), 2);
        for glyph in &glyphs {
            assert_eq!(missing.iter().filter(|m| m.id == glyph.id).count(), 1);
        }
    }

    #[tokio::test]
    async fn missing_glyphs_skips_fully_present() {
        let dir = tempfile::tempdir().unwrap();
        let present = glyph("search", &["black", "red"]);
        for filename in present.filenames() {
            std::fs::write(dir.path().join(filename), "<svg/>").unwrap();
        }

        let missing = missing_glyphs(vec![present, glyph("heart", &["black"])], dir.path()).await;

        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].id, "heart");
    }

    // A glyph with only some of its color variants on disk is still missing
    #[tokio::test]
    async fn missing_glyphs_partial_presence_counts_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let partial = glyph("search", &["black", "red"]);
        std::fs::write(dir.path().join(partial.filename("black")), "<svg/>").unwrap();

        let missing = missing_glyphs(vec![partial], dir.path()).await;

        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].id, "search");
    }

    #[tokio::test]
    async fn write_svgs_one_file_per_color() {
        let dir = tempfile::tempdir().unwrap();
        let glyph = glyph("search", &["black", "red"]);
        let (events, mut event_log) = mpsc::unbounded_channel();

        write_svgs(&[glyph.clone()], dir.path(), &events).await.unwrap();
        drop(events);

        let mut written = Vec::new();
        while let Some(event) = event_log.recv().await {
            match event {
                Event::SvgWritten(path) => written.push(path),
                other => panic!("unexpected event: {other:?}"),
            }
        }
        written.sort_unstable();

        assert_eq!(
            written,
            [
                dir.path().join("fontawesome-search-black.svg"),
                dir.path().join("fontawesome-search-red.svg"),
            ]
        );
        for filename in glyph.filenames() {
            let document = std::fs::read_to_string(dir.path().join(filename)).unwrap();
            assert!(document.starts_with("<svg"));
        }
    }

    #[tokio::test]
    async fn write_svgs_fails_on_unwritable_dir() {
        let glyph = glyph("search", &["black"]);
        let (events, _event_log) = mpsc::unbounded_channel();

        let result = write_svgs(&[glyph], Path::new("/nonexistent/output"), &events).await;
        assert!(result.is_err());
    }
}
