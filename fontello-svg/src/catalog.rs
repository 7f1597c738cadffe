use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::{
    database::GlyphDatabase,
    glyph::{Glyph, Pattern, Replacement},
    manifest::{Manifest, RawGlyph},
};

/// Strips accidental numeric suffixes from glyph names.
///
/// A name can end with a counter (`search-2`) for two reasons: the number is
/// part of the pictogram's identity (`progress-5`), or Fontello appended it
/// because another collection already owned the name. Only the second kind is
/// removed, recognized by the stripped base name belonging to some other
/// entry. Every decision reads the original names, so the pass is order
/// independent and idempotent.
pub fn fix_names(raw_glyphs: &[RawGlyph]) -> Vec<RawGlyph> {
    let originals = raw_glyphs
        .iter()
        .map(|raw| raw.css.as_str())
        .collect::<HashSet<_>>();

    raw_glyphs
        .iter()
        .map(|raw| {
            let mut raw = raw.clone();
            if let Some(base) = strip_count_suffix(&raw.css)
                && originals.contains(base)
            {
                raw.css = base.to_string();
            }
            raw
        })
        .collect()
}

/// Returns the name without its trailing `-<count>` suffix, or `None` when
/// there is no such suffix. Counts never have leading zeros, so
/// `progress-05` is a name, not a counter.
fn strip_count_suffix(name: &str) -> Option<&str> {
    let (base, suffix) = name.rsplit_once('-')?;

    if !suffix.is_empty()
        && !suffix.starts_with('0')
        && suffix.bytes().all(|byte| byte.is_ascii_digit())
    {
        Some(base)
    } else {
        None
    }
}

/// Hands out catalog-unique glyph ids. The first request for a name returns
/// it unchanged; repeats get a counter appended, starting at 2. Every issued
/// id is remembered, so a counter can never recreate an id another name
/// already received.
#[derive(Debug, Default)]
pub struct IdAllocator {
    issued: HashSet<String>,
    counts: HashMap<String, u32>,
}

impl IdAllocator {
    pub fn allocate(&mut self, name: &str) -> String {
        let count = self.counts.entry(name.to_string()).or_insert(0);
        *count += 1;

        let mut id = if *count == 1 {
            name.to_string()
        } else {
            format!("{name}-{count}")
        };

        while !self.issued.insert(id.clone()) {
            *count += 1;
            id = format!("{name}-{count}");
        }

        id
    }
}

/// Derives the glyph catalog from a configuration, in configuration order.
/// Unselected custom icons contribute no glyph but still consume an id, so
/// ids are stable when icons are toggled on and off.
pub fn build(
    manifest: &Manifest,
    colors: &IndexMap<String, String>,
    file_format: &str,
    database: &GlyphDatabase,
    filters: &[(Pattern, Replacement)],
) -> Vec<Glyph> {
    let raw_glyphs = fix_names(&manifest.glyphs);
    let mut allocator = IdAllocator::default();

    raw_glyphs
        .iter()
        .filter_map(|raw| {
            let id = allocator.allocate(&raw.css);
            Glyph::from_raw(raw, id, colors, file_format, database, filters)
        })
        .collect()
}
