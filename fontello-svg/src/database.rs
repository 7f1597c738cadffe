use std::{path::Path, sync::LazyLock};

use anyhow::Context;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::glyph::GlyphShape;

/// The shape table extracted from Fontello's server configuration. Only
/// covers the stock collections; `--glyph-data` substitutes a regenerated
/// table for newer configurations.
static BUNDLED: LazyLock<GlyphDatabase> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../data/server-config.json"))
        .expect("bundled shape database is valid JSON")
});

/// Read-only uid to shape lookup table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct GlyphDatabase {
    uids: IndexMap<String, DatabaseEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct DatabaseEntry {
    svg: DatabaseShape,
}

#[derive(Debug, Clone, Deserialize)]
struct DatabaseShape {
    width: f64,
    d: String,
}

impl GlyphDatabase {
    pub fn bundled() -> &'static Self {
        &BUNDLED
    }

    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read shape database at {path:?}"))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse shape database at {path:?}"))
    }

    pub fn lookup(&self, uid: &str) -> Option<GlyphShape> {
        self.uids.get(uid).map(|entry| GlyphShape {
            width: entry.svg.width,
            path: entry.svg.d.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_hit_and_miss() {
        let database = serde_json::from_str::<GlyphDatabase>(
            r#"{"9fd48fedad098c53th61a3ba92cb8a11": {"svg": {"width": 786, "d": "M10 20Z"}}}"#,
        )
        .unwrap();

        assert_eq!(
            database.lookup("9fd48fedad098c53th61a3ba92cb8a11"),
            Some(GlyphShape {
                width: 786.0,
                path: "M10 20Z".to_string(),
            })
        );
        assert_eq!(database.lookup("0000"), None);
    }

    #[test]
    fn bundled_parses() {
        // Forces the `LazyLock` and with it the JSON parse
        assert!(
            GlyphDatabase::bundled()
                .lookup("12f4cd9e78ad4ae0bcb011d314f498fd")
                .is_some()
        );
    }
}
