//! Document cleanup ahead of composition.
//!
//! The composition engine only sees cleaned markup. Cleanup is behind the
//! [`Optimizer`] trait so a heavier external minifier can be slotted in;
//! the built-in [`Scrubber`] strips the noise that breaks merging
//! (comments, doctypes, processing instructions, metadata elements) and
//! collapses inter-tag whitespace.

use regex_lite::Regex;
use thiserror::Error;

/// Error raised by an optimizer implementation.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct OptimizeError(pub String);

/// A document cleaner invoked once per input file, before parsing.
///
/// Implementations must be `Sync`: the composition fan-out shares one
/// optimizer across worker threads.
pub trait Optimizer: Sync {
    fn optimize(&self, source: &str) -> Result<String, OptimizeError>;
}

/// Cleanup switches for the built-in scrubber.
///
/// Every switch defaults to on; turning one off keeps the matching
/// construct in the cleaned output.
#[derive(Debug, Clone)]
pub struct CleanConfig {
    pub remove_comments: bool,
    pub remove_doctype: bool,
    pub remove_proc_inst: bool,
    /// Strip `<metadata>`, `<title>` and `<desc>` elements.
    pub remove_metadata: bool,
    pub collapse_whitespace: bool,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            remove_comments: true,
            remove_doctype: true,
            remove_proc_inst: true,
            remove_metadata: true,
            collapse_whitespace: true,
        }
    }
}

/// The built-in optimizer.
pub struct Scrubber {
    config: CleanConfig,
    inter_tag: Regex,
}

impl Scrubber {
    pub fn new(config: CleanConfig) -> Self {
        Self {
            config,
            inter_tag: Regex::new(r">\s+<").expect("static pattern"),
        }
    }
}

impl Default for Scrubber {
    fn default() -> Self {
        Self::new(CleanConfig::default())
    }
}

impl Optimizer for Scrubber {
    fn optimize(&self, source: &str) -> Result<String, OptimizeError> {
        let mut text = source.trim_start_matches('\u{feff}').to_string();

        if self.config.remove_comments {
            text = remove_delimited(&text, "<!--", "-->", "comment")?;
        }
        if self.config.remove_proc_inst {
            text = remove_delimited(&text, "<?", "?>", "processing instruction")?;
        }
        if self.config.remove_doctype {
            text = remove_doctype(&text)?;
        }
        if self.config.remove_metadata {
            for tag in ["metadata", "title", "desc"] {
                text = remove_element(&text, tag)?;
            }
        }
        if self.config.collapse_whitespace {
            text = self.inter_tag.replace_all(&text, "><").trim().to_string();
        }

        Ok(text)
    }
}

/// Remove every `open ... close` span from the text.
fn remove_delimited(
    text: &str,
    open: &str,
    close: &str,
    what: &str,
) -> Result<String, OptimizeError> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(open) {
        out.push_str(&rest[..start]);
        let after = &rest[start + open.len()..];
        let end = after
            .find(close)
            .ok_or_else(|| OptimizeError(format!("unterminated {}", what)))?;
        rest = &after[end + close.len()..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Remove `<!DOCTYPE ...>` declarations, including internal subsets.
fn remove_doctype(text: &str) -> Result<String, OptimizeError> {
    let Some(start) = text.find("<!DOCTYPE").or_else(|| text.find("<!doctype")) else {
        return Ok(text.to_string());
    };

    let after = &text[start..];
    let subset = after.find('[');
    let gt = after.find('>');
    let end = match (subset, gt) {
        // Internal subset: the declaration closes with "]>".
        (Some(s), Some(g)) if s < g => after
            .find("]>")
            .map(|i| i + 2)
            .ok_or_else(|| OptimizeError("unterminated doctype".to_string()))?,
        (_, Some(g)) => g + 1,
        (_, None) => return Err(OptimizeError("unterminated doctype".to_string())),
    };

    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..start]);
    out.push_str(&after[end..]);
    Ok(out)
}

/// Remove every `<tag ...>...</tag>` or `<tag .../>` element.
fn remove_element(text: &str, tag: &str) -> Result<String, OptimizeError> {
    let open = format!("<{}", tag);
    let close = format!("</{}>", tag);
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    loop {
        let Some(start) = find_element_start(rest, &open) else {
            out.push_str(rest);
            return Ok(out);
        };
        out.push_str(&rest[..start]);

        let after = &rest[start..];
        let gt = after
            .find('>')
            .ok_or_else(|| OptimizeError(format!("unterminated <{}> element", tag)))?;
        if after[..gt].ends_with('/') {
            rest = &after[gt + 1..];
            continue;
        }
        let end = after
            .find(&close)
            .ok_or_else(|| OptimizeError(format!("unterminated <{}> element", tag)))?;
        rest = &after[end + close.len()..];
    }
}

/// Find `<tag` followed by a name boundary, so `<title` does not match
/// `<titlePath`.
fn find_element_start(text: &str, open: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(pos) = text[from..].find(open) {
        let start = from + pos;
        let next = text[start + open.len()..].chars().next();
        match next {
            Some(c) if c.is_ascii_alphanumeric() || c == '-' => from = start + open.len(),
            _ => return Some(start),
        }
    }
    None
}
