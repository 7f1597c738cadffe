use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// The Fontello build configuration (`config.json`). Top-level fields we
/// don't use (hinting, ascent, units per em, ...) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub glyphs: Vec<RawGlyph>,
    /// Selector prefix for the generated stylesheet.
    #[serde(default)]
    pub css_prefix_text: Option<String>,
}

/// One glyph entry, straight from the Fontello JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawGlyph {
    /// The CSS name. May carry a numeric disambiguation suffix added by
    /// Fontello when two collections share an icon name.
    pub css: String,
    /// The source collection, or `"custom_icons"` for inline glyphs.
    pub src: String,
    #[serde(default)]
    pub selected: Option<bool>,
    /// Fontello-wide unique id, the key into the shape database.
    #[serde(default)]
    pub uid: Option<String>,
    /// Inline shape data, only present on custom icons.
    #[serde(default)]
    pub svg: Option<InlineSvg>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InlineSvg {
    pub width: f64,
    pub path: String,
}

pub async fn load(path: &Path) -> anyhow::Result<Manifest> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read Fontello configuration at {path:?}"))?;
    let manifest = serde_json::from_str::<Manifest>(&raw)
        .with_context(|| format!("Failed to parse Fontello configuration at {path:?}"))?;

    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use serde_test::{Token, assert_de_tokens};

    use super::*;

    #[test]
    fn manifest_de_example() {
        let raw = r#"{
            "name": "icons",
            "css_prefix_text": "icon-",
            "css_use_suffix": false,
            "hinting": true,
            "units_per_em": 1000,
            "ascent": 850,
            "glyphs": [
                {
                    "uid": "12f4cd9e78ad4ae0bcb011d314f498fd",
                    "css": "search",
                    "code": 59392,
                    "src": "fontawesome"
                },
                {
                    "uid": "43faa39d9bfbd46a9e4b3c3cd25frf1e",
                    "css": "heart",
                    "code": 59393,
                    "src": "custom_icons",
                    "selected": true,
                    "svg": {
                        "path": "M100 200L300 400Z",
                        "width": 1000
                    }
                }
            ]
        }"#;

        let manifest = serde_json::from_str::<Manifest>(raw).unwrap();

        assert_eq!(manifest.css_prefix_text.as_deref(), Some("icon-"));
        assert_eq!(manifest.glyphs.len(), 2);
        assert_eq!(manifest.glyphs[0].css, "search");
        assert_eq!(manifest.glyphs[0].src, "fontawesome");
        assert_eq!(manifest.glyphs[0].selected, None);
        assert_eq!(manifest.glyphs[0].svg, None);
        assert_eq!(
            manifest.glyphs[1].svg,
            Some(InlineSvg {
                width: 1000.0,
                path: "M100 200L300 400Z".to_string(),
            })
        );
    }

    // A manifest without a `glyphs` list is a precondition violation and
    // must fail to parse.
    #[test]
    fn manifest_de_missing_glyphs() {
        let result = serde_json::from_str::<Manifest>(r#"{"css_prefix_text": "icon-"}"#);
        assert!(result.is_err());
    }

    // Optional fields default to `None`
    #[test]
    fn raw_glyph_de_minimal() {
        assert_de_tokens(
            &RawGlyph {
                css: "search".to_string(),
                src: "fontawesome".to_string(),
                selected: None,
                uid: None,
                svg: None,
            },
            &[
                Token::Struct {
                    name: "RawGlyph",
                    len: 2,
                },
                Token::Str("css"),
                Token::Str("search"),
                Token::Str("src"),
                Token::Str("fontawesome"),
                Token::StructEnd,
            ],
        );
    }
}
