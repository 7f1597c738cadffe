use indexmap::IndexMap;
use log::warn;

use crate::{database::GlyphDatabase, manifest::RawGlyph};

pub const DEFAULT_FILE_FORMAT: &str = "{0}-{1}-{2}.svg";
pub const DEFAULT_CSS_PREFIX: &str = "icon-";

const CUSTOM_ICONS: &str = "custom_icons";

/// Fontello keeps every collection in its own repository, and a few
/// repository names don't match the collection name in the configuration.
/// First match wins.
pub const COLLECTION_FILTERS: &[(Pattern, Replacement)] = &[
    (Pattern::Exact("fontawesome"), Replacement::Literal("awesome-uni.font")),
    (Pattern::Exact("entypo"), Replacement::Literal("entypo")),
    (Pattern::Exact("iconic"), Replacement::Literal("iconic-uni.font")),
    (Pattern::Exact("websymbols"), Replacement::Literal("websymbols-uni.font")),
    (Pattern::Any, Replacement::Suffix(".font")),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Exact(&'static str),
    Any,
}

impl Pattern {
    fn matches(&self, collection: &str) -> bool {
        match self {
            Self::Exact(name) => *name == collection,
            Self::Any => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replacement {
    /// Replaces the collection name outright.
    Literal(&'static str),
    /// Appends to the collection name.
    Suffix(&'static str),
}

impl Replacement {
    fn apply(&self, collection: &str) -> String {
        match self {
            Self::Literal(repository) => (*repository).to_string(),
            Self::Suffix(suffix) => format!("{collection}{suffix}"),
        }
    }
}

/// Returns the URL of a glyph's upstream SVG.
pub fn svg_url(name: &str, collection: &str, filters: &[(Pattern, Replacement)]) -> String {
    let repository = filters
        .iter()
        .find(|(pattern, _)| pattern.matches(collection))
        .map(|(_, replacement)| replacement.apply(collection))
        .unwrap_or_else(|| collection.to_string());

    format!("https://raw.github.com/fontello/{repository}/master/src/svg/{name}.svg")
}

/// Path data for one glyph. Heights are normalized to 1000 units; only the
/// width varies per glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphShape {
    pub width: f64,
    pub path: String,
}

/// A fully resolved glyph. Immutable once built; every downstream step
/// (existence checks, SVG and CSS rendering) is a pure function over it.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// Unique within one catalog.
    pub id: String,
    pub name: String,
    pub collection: String,
    /// Upstream SVG location. `None` for custom icons, which only exist
    /// inline in the configuration.
    pub url: Option<String>,
    /// `None` when the shape database has no entry for the glyph's uid.
    pub shape: Option<GlyphShape>,
    /// Fill variants, color name to color value. Never empty; iteration
    /// order is declaration order.
    pub colors: IndexMap<String, String>,
    /// Output filename template. `{0}` collection, `{1}` name, `{2}` color.
    pub file_format: String,
}

impl Glyph {
    /// Builds an ad-hoc glyph with an unresolved shape.
    pub fn new(
        name: impl Into<String>,
        collection: impl Into<String>,
        id: impl Into<String>,
        colors: IndexMap<String, String>,
        filters: &[(Pattern, Replacement)],
    ) -> Self {
        let name = name.into();
        let collection = collection.into();
        let url = svg_url(&name, &collection, filters);

        Self {
            id: id.into(),
            name,
            collection,
            url: Some(url),
            shape: None,
            colors,
            file_format: DEFAULT_FILE_FORMAT.to_string(),
        }
    }

    /// Builds a glyph from one configuration entry. Returns `None` for
    /// custom icons that aren't selected; every other entry produces a
    /// glyph, even when its uid is missing from the shape database.
    pub fn from_raw(
        raw: &RawGlyph,
        id: String,
        colors: &IndexMap<String, String>,
        file_format: &str,
        database: &GlyphDatabase,
        filters: &[(Pattern, Replacement)],
    ) -> Option<Self> {
        if raw.src == CUSTOM_ICONS && raw.selected != Some(true) {
            return None;
        }

        let (url, shape) = if raw.src == CUSTOM_ICONS {
            let shape = raw.svg.as_ref().map(|svg| GlyphShape {
                width: svg.width,
                path: svg.path.clone(),
            });
            (None, shape)
        } else {
            let shape = raw.uid.as_deref().and_then(|uid| database.lookup(uid));
            if shape.is_none() {
                warn!(
                    "No shape data for {}:{} [{}]",
                    raw.src,
                    raw.css,
                    raw.uid.as_deref().unwrap_or("missing uid"),
                );
            }
            (Some(svg_url(&raw.css, &raw.src, filters)), shape)
        };

        Some(Self {
            id,
            name: raw.css.clone(),
            collection: raw.src.clone(),
            url,
            shape,
            colors: colors.clone(),
            file_format: file_format.to_string(),
        })
    }

    /// Resolves a requested color against the declared variants. Undeclared
    /// colors fall back to the first declared one.
    pub fn valid_color<'a>(&'a self, color: &'a str) -> &'a str {
        if self.colors.contains_key(color) {
            color
        } else {
            self.colors
                .keys()
                .next()
                .map(String::as_str)
                .unwrap_or_default()
        }
    }

    /// The output filename for one color variant.
    pub fn filename(&self, color: &str) -> String {
        let color = self.valid_color(color);
        self.file_format
            .replace("{0}", &self.collection)
            .replace("{1}", &self.name)
            .replace("{2}", color)
    }

    /// The output filenames for every color variant.
    pub fn filenames(&self) -> Vec<String> {
        self.colors.keys().map(|color| self.filename(color)).collect()
    }

    /// The CSS class selector for one color variant.
    pub fn css_name(&self, color: &str, prefix: &str) -> String {
        let color = self.valid_color(color);
        format!(".{prefix}{}-{color}", self.id)
    }
}
