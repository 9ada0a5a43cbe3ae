//! Mutable per-icon SVG document model.
//!
//! A deliberately small parser: it pulls the root `<svg>` element apart
//! into an ordered attribute list and an opaque content string. That is
//! all composition needs (dimension access, root-attribute mutation,
//! padding via the viewBox, identifier namespacing, re-serialization).
//! Inner elements are never interpreted.

use regex_lite::Regex;
use thiserror::Error;

/// Error raised by document parsing or mutation.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct SvgError(pub String);

/// Declared pixel size of a document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

/// One parsed SVG document.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    id: String,
    attrs: Vec<(String, String)>,
    content: String,
}

impl SvgDocument {
    /// Parse cleaned SVG text into a document.
    ///
    /// Expects optimizer output: no comments, doctypes or processing
    /// instructions ahead of the root element.
    pub fn parse(id: impl Into<String>, source: &str) -> Result<Self, SvgError> {
        let start = find_root_start(source)
            .ok_or_else(|| SvgError("no <svg> root element".to_string()))?;
        let tag_rest = &source[start + 4..];

        let (attrs, consumed, self_closing) = parse_attrs(tag_rest)?;

        let content = if self_closing {
            String::new()
        } else {
            let body = &tag_rest[consumed..];
            let end = body
                .rfind("</svg>")
                .ok_or_else(|| SvgError("unclosed <svg> root element".to_string()))?;
            body[..end].to_string()
        };

        Ok(Self {
            id: id.into(),
            attrs,
            content,
        })
    }

    /// The icon identifier this document was created for.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Inner markup of the root element.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Look up a root attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set a root attribute, updating in place or appending.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    /// Remove a root attribute if present.
    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(n, _)| n != name);
    }

    /// Declared size: `width`/`height` attributes first, the viewBox as
    /// the fallback geometry.
    pub fn dimensions(&self) -> Option<Dimensions> {
        let width = self.attr("width").and_then(parse_length);
        let height = self.attr("height").and_then(parse_length);
        if let (Some(width), Some(height)) = (width, height) {
            return Some(Dimensions { width, height });
        }
        self.view_box().map(|vb| Dimensions {
            width: vb[2],
            height: vb[3],
        })
    }

    /// Parse the viewBox attribute into `[min-x, min-y, width, height]`.
    pub fn view_box(&self) -> Option<[f64; 4]> {
        let raw = self.attr("viewBox")?;
        let parts: Vec<f64> = raw
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse().ok())
            .collect();
        parts.try_into().ok()
    }

    /// Ensure the document has usable pixel dimensions, scaling down
    /// proportionally when it exceeds the configured ceiling. Never
    /// scales up. A viewBox is materialized first so the declared size
    /// drives content scaling.
    pub fn normalize_dimensions(&mut self, max_width: u32, max_height: u32) -> Result<(), SvgError> {
        let dims = self.dimensions().ok_or_else(|| {
            SvgError("no width/height attributes and no viewBox to derive them from".to_string())
        })?;
        if dims.width <= 0.0 || dims.height <= 0.0 {
            return Err(SvgError(format!(
                "declared size {}x{} is not positive",
                fmt_number(dims.width),
                fmt_number(dims.height)
            )));
        }

        if self.view_box().is_none() {
            self.set_attr(
                "viewBox",
                format!("0 0 {} {}", fmt_number(dims.width), fmt_number(dims.height)),
            );
        }

        let scale = (max_width as f64 / dims.width)
            .min(max_height as f64 / dims.height)
            .min(1.0);
        let (width, height) = (dims.width * scale, dims.height * scale);

        self.set_attr("width", fmt_number(width));
        self.set_attr("height", fmt_number(height));
        Ok(())
    }

    /// Inset the visible content by `padding` pixels on every side,
    /// growing the declared size by twice the padding per axis. Requires
    /// normalized dimensions.
    pub fn apply_padding(&mut self, padding: u32) -> Result<(), SvgError> {
        if padding == 0 {
            return Ok(());
        }
        let dims = self
            .dimensions()
            .ok_or_else(|| SvgError("padding requires normalized dimensions".to_string()))?;
        let [min_x, min_y, vb_w, vb_h] = self
            .view_box()
            .ok_or_else(|| SvgError("padding requires a viewBox".to_string()))?;

        // Padding is given in device pixels; convert into viewBox units so
        // the inset stays exactly `padding` pixels after scaling.
        let pad = padding as f64;
        let unit_x = pad * vb_w / dims.width;
        let unit_y = pad * vb_h / dims.height;

        self.set_attr(
            "viewBox",
            format!(
                "{} {} {} {}",
                fmt_number(min_x - unit_x),
                fmt_number(min_y - unit_y),
                fmt_number(vb_w + 2.0 * unit_x),
                fmt_number(vb_h + 2.0 * unit_y)
            ),
        );
        self.set_attr("width", fmt_number(dims.width + 2.0 * pad));
        self.set_attr("height", fmt_number(dims.height + 2.0 * pad));
        Ok(())
    }

    /// Prefix every internal identifier and identifier reference so the
    /// document can be merged into a sprite without id collisions.
    ///
    /// Rewrites `id` attributes, `url(#...)` references and
    /// `href`/`xlink:href` fragment references.
    pub fn namespace_ids(&mut self, prefix: &str) {
        let id_dq = Regex::new(r#"\bid="([^"]*)""#).expect("static pattern");
        let id_sq = Regex::new(r"\bid='([^']*)'").expect("static pattern");
        let url = Regex::new(r#"url\(#([^)'"]+)\)"#).expect("static pattern");
        let href_dq = Regex::new(r##"href="#([^"]*)""##).expect("static pattern");
        let href_sq = Regex::new(r"href='#([^']*)'").expect("static pattern");

        let mut content = std::mem::take(&mut self.content);
        content = id_dq
            .replace_all(&content, format!("id=\"{}$1\"", prefix))
            .into_owned();
        content = id_sq
            .replace_all(&content, format!("id='{}$1'", prefix))
            .into_owned();
        content = url
            .replace_all(&content, format!("url(#{}$1)", prefix))
            .into_owned();
        content = href_dq
            .replace_all(&content, format!("href=\"#{}$1\"", prefix))
            .into_owned();
        content = href_sq
            .replace_all(&content, format!("href='#{}$1'", prefix))
            .into_owned();
        self.content = content;

        // Root attributes can reference internal ids too, e.g. a filter
        // or clip-path applied to the whole document.
        for (name, value) in &mut self.attrs {
            if name == "id" {
                *value = format!("{}{}", prefix, value);
            } else if value.contains("url(#") {
                *value = url
                    .replace_all(value, format!("url(#{}$1)", prefix))
                    .into_owned();
            } else if name.ends_with("href") && value.starts_with('#') {
                *value = format!("#{}{}", prefix, &value[1..]);
            }
        }
    }

    /// Serialize the document.
    ///
    /// `standalone` emits an XML declaration and guarantees namespace
    /// declarations on the root. A non-standalone fragment drops both,
    /// since the sprite root provides them.
    pub fn serialize(&self, standalone: bool) -> String {
        let mut out = String::new();
        let mut attrs: Vec<(String, String)> = Vec::with_capacity(self.attrs.len() + 2);

        if standalone {
            out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>");
            if self.attr("xmlns").is_none() {
                attrs.push(("xmlns".to_string(), "http://www.w3.org/2000/svg".to_string()));
            }
            if self.attr("xmlns:xlink").is_none() && self.content.contains("xlink:") {
                attrs.push((
                    "xmlns:xlink".to_string(),
                    "http://www.w3.org/1999/xlink".to_string(),
                ));
            }
            attrs.extend(self.attrs.iter().cloned());
        } else {
            attrs.extend(
                self.attrs
                    .iter()
                    .filter(|(n, _)| n != "xmlns" && !n.starts_with("xmlns:"))
                    .cloned(),
            );
        }

        out.push_str("<svg");
        for (name, value) in &attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }

        if self.content.is_empty() {
            out.push_str("/>");
        } else {
            out.push('>');
            out.push_str(&self.content);
            out.push_str("</svg>");
        }
        out
    }
}

/// Find the byte offset of the root `<svg` tag.
fn find_root_start(source: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(pos) = source[from..].find("<svg") {
        let start = from + pos;
        match source[start + 4..].chars().next() {
            Some(c) if c.is_whitespace() || c == '>' || c == '/' => return Some(start),
            _ => from = start + 4,
        }
    }
    None
}

/// Parse the attribute list of the root tag.
///
/// Returns the attributes, the byte count consumed (through the closing
/// `>`), and whether the tag was self-closing.
#[allow(clippy::type_complexity)]
fn parse_attrs(rest: &str) -> Result<(Vec<(String, String)>, usize, bool), SvgError> {
    let bytes = rest.as_bytes();
    let mut attrs = Vec::new();
    let mut i = 0;

    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            return Err(SvgError("unclosed <svg> tag".to_string()));
        }
        match bytes[i] {
            b'>' => return Ok((attrs, i + 1, false)),
            b'/' if bytes.get(i + 1) == Some(&b'>') => return Ok((attrs, i + 2, true)),
            _ => {}
        }

        let name_start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() && !matches!(bytes[i], b'=' | b'>' | b'/') {
            i += 1;
        }
        let name = rest[name_start..i].to_string();
        if name.is_empty() {
            return Err(SvgError("malformed attribute in <svg> tag".to_string()));
        }

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if bytes.get(i) != Some(&b'=') {
            // Bare attribute with no value.
            attrs.push((name, String::new()));
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let quote = match bytes.get(i) {
            Some(&q @ (b'"' | b'\'')) => q,
            _ => return Err(SvgError(format!("unquoted value for attribute \"{}\"", name))),
        };
        i += 1;
        let value_start = i;
        while i < bytes.len() && bytes[i] != quote {
            i += 1;
        }
        if i >= bytes.len() {
            return Err(SvgError(format!("unterminated value for attribute \"{}\"", name)));
        }
        attrs.push((name, rest[value_start..i].to_string()));
        i += 1;
    }
}

/// Parse a CSS-ish length: a plain number, optionally with a `px` unit.
/// Percentages and other units have no pixel meaning here.
fn parse_length(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    if number.is_empty() || number.ends_with('%') {
        return None;
    }
    number.parse().ok()
}

/// Format a number for attribute output, dropping a zero fraction.
pub fn fmt_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < (i64::MAX as f64) {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(source: &str) -> SvgDocument {
        SvgDocument::parse("test", source).unwrap()
    }

    #[test]
    fn test_parse_attrs_and_content() {
        let d = doc("<svg width=\"10\" height=\"20\"><path d=\"M0 0\"/></svg>");
        assert_eq!(d.attr("width"), Some("10"));
        assert_eq!(d.attr("height"), Some("20"));
        assert_eq!(d.content(), "<path d=\"M0 0\"/>");
    }

    #[test]
    fn test_parse_self_closing_root() {
        let d = doc("<svg width=\"4\" height=\"4\"/>");
        assert_eq!(d.content(), "");
    }

    #[test]
    fn test_parse_rejects_non_svg() {
        assert!(SvgDocument::parse("x", "<div>hi</div>").is_err());
        assert!(SvgDocument::parse("x", "<svg width=\"1\">").is_err());
    }

    #[test]
    fn test_parse_skips_lookalike_tags() {
        let d = SvgDocument::parse("x", "<svgfoo/><svg width=\"1\" height=\"1\"/>").unwrap();
        assert_eq!(d.attr("width"), Some("1"));
    }

    #[test]
    fn test_dimensions_from_attributes() {
        let d = doc("<svg width=\"10px\" height=\"20\"></svg>");
        assert_eq!(
            d.dimensions(),
            Some(Dimensions {
                width: 10.0,
                height: 20.0
            })
        );
    }

    #[test]
    fn test_dimensions_fall_back_to_viewbox() {
        let d = doc("<svg viewBox=\"0 0 24 16\"></svg>");
        assert_eq!(
            d.dimensions(),
            Some(Dimensions {
                width: 24.0,
                height: 16.0
            })
        );
    }

    #[test]
    fn test_dimensions_missing() {
        let d = doc("<svg><path/></svg>");
        assert_eq!(d.dimensions(), None);
    }

    #[test]
    fn test_percentage_lengths_are_ignored() {
        let d = doc("<svg width=\"100%\" height=\"100%\" viewBox=\"0 0 8 8\"></svg>");
        let dims = d.dimensions().unwrap();
        assert_eq!(dims.width, 8.0);
    }

    #[test]
    fn test_normalize_materializes_viewbox() {
        let mut d = doc("<svg width=\"10\" height=\"20\"><path/></svg>");
        d.normalize_dimensions(1000, 1000).unwrap();
        assert_eq!(d.attr("viewBox"), Some("0 0 10 20"));
        assert_eq!(d.attr("width"), Some("10"));
    }

    #[test]
    fn test_normalize_scales_down_proportionally() {
        let mut d = doc("<svg width=\"2000\" height=\"1000\"><path/></svg>");
        d.normalize_dimensions(1000, 1000).unwrap();
        assert_eq!(d.attr("width"), Some("1000"));
        assert_eq!(d.attr("height"), Some("500"));
        // Content keeps its coordinate system.
        assert_eq!(d.attr("viewBox"), Some("0 0 2000 1000"));
    }

    #[test]
    fn test_normalize_never_scales_up() {
        let mut d = doc("<svg width=\"10\" height=\"10\"><path/></svg>");
        d.normalize_dimensions(1000, 1000).unwrap();
        assert_eq!(d.attr("width"), Some("10"));
        assert_eq!(d.attr("height"), Some("10"));
    }

    #[test]
    fn test_normalize_strips_px_units() {
        let mut d = doc("<svg width=\"10px\" height=\"20px\"><path/></svg>");
        d.normalize_dimensions(1000, 1000).unwrap();
        assert_eq!(d.attr("width"), Some("10"));
        assert_eq!(d.attr("height"), Some("20"));
    }

    #[test]
    fn test_normalize_fails_without_geometry() {
        let mut d = doc("<svg><path/></svg>");
        assert!(d.normalize_dimensions(1000, 1000).is_err());
    }

    #[test]
    fn test_padding_grows_declared_size() {
        let mut d = doc("<svg width=\"10\" height=\"20\"><path/></svg>");
        d.normalize_dimensions(1000, 1000).unwrap();
        d.apply_padding(2).unwrap();
        assert_eq!(d.attr("width"), Some("14"));
        assert_eq!(d.attr("height"), Some("24"));
        assert_eq!(d.attr("viewBox"), Some("-2 -2 14 24"));
    }

    #[test]
    fn test_padding_respects_viewbox_scale() {
        // 100 viewBox units across 10 pixels: 1px of padding is 10 units.
        let mut d = doc("<svg width=\"10\" height=\"10\" viewBox=\"0 0 100 100\"><path/></svg>");
        d.normalize_dimensions(1000, 1000).unwrap();
        d.apply_padding(1).unwrap();
        assert_eq!(d.attr("width"), Some("12"));
        assert_eq!(d.attr("viewBox"), Some("-10 -10 120 120"));
    }

    #[test]
    fn test_zero_padding_is_a_no_op() {
        let mut d = doc("<svg width=\"10\" height=\"20\"><path/></svg>");
        let before = d.clone();
        d.apply_padding(0).unwrap();
        assert_eq!(d, before);
    }

    #[test]
    fn test_namespace_rewrites_ids_and_references() {
        let mut d = doc(concat!(
            "<svg width=\"10\" height=\"10\">",
            "<linearGradient id=\"grad\"/>",
            "<rect fill=\"url(#grad)\"/>",
            "<use xlink:href=\"#grad\"/>",
            "<use href='#grad'/>",
            "</svg>"
        ));
        d.namespace_ids("aa");
        let content = d.content();
        assert!(content.contains("id=\"aagrad\""));
        assert!(content.contains("url(#aagrad)"));
        assert!(content.contains("xlink:href=\"#aagrad\""));
        assert!(content.contains("href='#aagrad'"));
    }

    #[test]
    fn test_namespace_rewrites_root_references() {
        let mut d = doc("<svg width=\"1\" height=\"1\" clip-path=\"url(#c)\"><clipPath id=\"c\"/></svg>");
        d.namespace_ids("b");
        assert_eq!(d.attr("clip-path"), Some("url(#bc)"));
        assert!(d.content().contains("id=\"bc\""));
    }

    #[test]
    fn test_namespace_leaves_unrelated_attributes_alone() {
        let mut d = doc("<svg width=\"1\" height=\"1\"><rect data-grid=\"4\" width=\"1\"/></svg>");
        d.namespace_ids("a");
        assert!(d.content().contains("data-grid=\"4\""));
    }

    #[test]
    fn test_serialize_fragment_drops_xmlns() {
        let mut d = doc("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"10\" height=\"20\"><path/></svg>");
        d.set_attr("id", "arrow");
        d.set_attr("y", "35");
        let fragment = d.serialize(false);
        assert!(!fragment.contains("xmlns"));
        assert!(fragment.starts_with("<svg"));
        assert!(fragment.contains("id=\"arrow\""));
        assert!(fragment.contains("y=\"35\""));
        assert!(fragment.ends_with("</svg>"));
    }

    #[test]
    fn test_serialize_standalone_has_declaration_and_xmlns() {
        let d = doc("<svg width=\"10\" height=\"20\"><use xlink:href=\"#a\"/></svg>");
        let standalone = d.serialize(true);
        assert!(standalone.starts_with("<?xml"));
        assert!(standalone.contains("xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(standalone.contains("xmlns:xlink=\"http://www.w3.org/1999/xlink\""));
    }

    #[test]
    fn test_set_attr_updates_in_place() {
        let mut d = doc("<svg width=\"10\" height=\"20\"></svg>");
        d.set_attr("width", "30");
        assert_eq!(d.attr("width"), Some("30"));
        // Order preserved: width is still first.
        assert!(d.serialize(false).starts_with("<svg width=\"30\""));
    }

    #[test]
    fn test_fmt_number() {
        assert_eq!(fmt_number(10.0), "10");
        assert_eq!(fmt_number(-20.0), "-20");
        assert_eq!(fmt_number(10.5), "10.5");
    }
}
