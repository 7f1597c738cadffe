use crate::glyph::Glyph;

/// Width used when a glyph has no shape data. Fontello normalizes glyph
/// heights to 1000 units, so a square canvas is the least wrong guess.
const FALLBACK_WIDTH: f64 = 1000.0;

/// Renders a standalone SVG document for one fill color. An empty fill
/// omits the attribute entirely. A glyph without shape data renders as an
/// empty path; the catalog already warned about it.
pub fn svg_document(glyph: &Glyph, fill_color: &str) -> String {
    let (width, path) = match &glyph.shape {
        Some(shape) => (shape.width, shape.path.as_str()),
        None => (FALLBACK_WIDTH, ""),
    };

    let mut document = format!(
        r#"<svg height="1000" width="{width}" viewBox="0 0 {width} 1000" xmlns="http://www.w3.org/2000/svg"><path"#
    );
    if !fill_color.is_empty() {
        document.push_str(&format!(r#" fill="{fill_color}""#));
    }
    document.push_str(&format!(r#" d="{path}"/></svg>"#));

    document
}

/// Renders the aggregate stylesheet, one rule per glyph and color variant.
/// Rule order follows catalog order, then color declaration order.
pub fn stylesheet(glyphs: &[Glyph], url_path: &str, css_prefix: &str) -> String {
    let mut sheet = String::new();

    for glyph in glyphs {
        for color in glyph.colors.keys() {
            sheet.push_str(&format!(
                "{} {{ background-image: url({url_path}{}) }}\n",
                glyph.css_name(color, css_prefix),
                glyph.filename(color),
            ));
        }
    }

    sheet
}
