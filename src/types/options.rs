//! Sprite composition options.
//!
//! Options bundle the composition settings (layout, padding, scale bounds,
//! selector prefixes) that a run is frozen against. Manifest values and CLI
//! flags feed a builder; validation happens once in `build()`, before any
//! file processing starts.
//!
//! # Example
//!
//! ```yaml
//! sprite:
//!   name: sprite
//!   prefix: icon
//!   layout: diagonal
//!   padding: 2
//!   dims: true
//! ```

use std::path::PathBuf;

use crate::error::{Result, SpriteError};

/// Geometric rule governing where each icon lands in the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Icons stacked top to bottom (default).
    #[default]
    Vertical,
    /// Icons placed left to right.
    Horizontal,
    /// Icons along the diagonal; both canvas axes grow per icon.
    Diagonal,
}

impl Layout {
    /// Parse a layout name, falling back to `Vertical` for unrecognized
    /// values. Use [`Layout::try_parse`] when the caller wants to warn.
    pub fn parse(s: &str) -> Layout {
        Self::try_parse(s).unwrap_or_default()
    }

    /// Parse a layout name, returning `None` for unrecognized values.
    pub fn try_parse(s: &str) -> Option<Layout> {
        match s.trim().to_lowercase().as_str() {
            "vertical" => Some(Layout::Vertical),
            "horizontal" => Some(Layout::Horizontal),
            "diagonal" => Some(Layout::Diagonal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Vertical => "vertical",
            Layout::Horizontal => "horizontal",
            Layout::Diagonal => "diagonal",
        }
    }
}

/// Default ceiling for proportional down-scaling, in pixels per axis.
pub const DEFAULT_MAX_DIMENSION: u32 = 1000;

/// Frozen configuration for one composition run.
#[derive(Debug, Clone)]
pub struct SpriteOptions {
    /// Subdirectory (below the output root) the sprite document lands in.
    pub sprite_dir: PathBuf,
    /// Base name of the sprite document (without extension).
    pub sprite_name: String,
    /// Selector class prefix, e.g. "icon" yields `.icon-home`.
    pub prefix: String,
    /// Optional shared class applied to every icon rule.
    pub common: Option<String>,
    /// Scale ceiling; declared sizes above this shrink proportionally.
    pub max_width: u32,
    pub max_height: u32,
    /// Pixel inset added around each icon's content.
    pub padding: u32,
    /// Placement strategy.
    pub layout: Layout,
    /// Separator marking a pseudo-class segment in an icon id.
    pub pseudo: String,
    /// Emit per-icon dimension selectors in rendered templates.
    pub dims: bool,
    /// Diagnostic detail, 0-3. No effect on composed output.
    pub verbose: u8,
}

impl Default for SpriteOptions {
    fn default() -> Self {
        Self {
            sprite_dir: PathBuf::from("svg"),
            sprite_name: "sprite".to_string(),
            prefix: "svg".to_string(),
            common: None,
            max_width: DEFAULT_MAX_DIMENSION,
            max_height: DEFAULT_MAX_DIMENSION,
            padding: 0,
            layout: Layout::Vertical,
            pseudo: "~".to_string(),
            dims: false,
            verbose: 0,
        }
    }
}

impl SpriteOptions {
    /// Selector prefix the data model exposes: the common class wins over
    /// the plain prefix when both are set.
    pub fn effective_prefix(&self) -> &str {
        self.common.as_deref().unwrap_or(&self.prefix)
    }

    /// Relative path of the sprite document, e.g. `svg/sprite.svg`.
    pub fn sprite_path(&self) -> PathBuf {
        self.sprite_dir.join(format!("{}.svg", self.sprite_name))
    }
}

/// Builder for composition options.
///
/// All setters take the raw, possibly-untrimmed values from the manifest
/// or CLI; `build()` normalizes and validates them in one place.
#[derive(Debug, Clone, Default)]
pub struct SpriteOptionsBuilder {
    sprite_dir: Option<PathBuf>,
    sprite_name: Option<String>,
    prefix: Option<String>,
    common: Option<String>,
    max_width: Option<u32>,
    max_height: Option<u32>,
    padding: Option<u32>,
    layout: Option<Layout>,
    pseudo: Option<String>,
    dims: Option<bool>,
    verbose: Option<u8>,
}

impl SpriteOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sprite_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.sprite_dir = Some(dir.into());
        self
    }

    pub fn sprite_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.sprite_name = Some(name.into());
        self
    }

    pub fn prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn common(&mut self, common: impl Into<String>) -> &mut Self {
        self.common = Some(common.into());
        self
    }

    pub fn max_width(&mut self, max: u32) -> &mut Self {
        self.max_width = Some(max);
        self
    }

    pub fn max_height(&mut self, max: u32) -> &mut Self {
        self.max_height = Some(max);
        self
    }

    pub fn padding(&mut self, padding: u32) -> &mut Self {
        self.padding = Some(padding);
        self
    }

    pub fn layout(&mut self, layout: Layout) -> &mut Self {
        self.layout = Some(layout);
        self
    }

    pub fn pseudo(&mut self, pseudo: impl Into<String>) -> &mut Self {
        self.pseudo = Some(pseudo.into());
        self
    }

    pub fn dims(&mut self, dims: bool) -> &mut Self {
        self.dims = Some(dims);
        self
    }

    pub fn verbose(&mut self, verbose: u8) -> &mut Self {
        self.verbose = Some(verbose);
        self
    }

    /// Normalize and validate into a frozen `SpriteOptions`.
    pub fn build(&self) -> Result<SpriteOptions> {
        let sprite_dir = match &self.sprite_dir {
            Some(dir) if dir.as_os_str().is_empty() => PathBuf::from("."),
            Some(dir) => dir.clone(),
            None => PathBuf::from("svg"),
        };

        let sprite_name = non_empty(self.sprite_name.as_deref(), "sprite");
        let prefix = non_empty(self.prefix.as_deref(), "svg");
        let common = self
            .common
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let max_width = self.max_width.unwrap_or(DEFAULT_MAX_DIMENSION);
        let max_height = self.max_height.unwrap_or(DEFAULT_MAX_DIMENSION);
        if max_width == 0 || max_height == 0 {
            return Err(SpriteError::Config {
                message: "max_width and max_height must be positive".to_string(),
                help: Some(format!(
                    "Omit them to use the default of {} pixels",
                    DEFAULT_MAX_DIMENSION
                )),
            });
        }

        let pseudo = self.pseudo.as_deref().map(str::trim).unwrap_or("~");
        if pseudo.is_empty() {
            return Err(SpriteError::Config {
                message: "pseudo separator must not be empty".to_string(),
                help: Some("The default separator is \"~\", as in button~hover.svg".to_string()),
            });
        }

        Ok(SpriteOptions {
            sprite_dir,
            sprite_name,
            prefix,
            common,
            max_width,
            max_height,
            padding: self.padding.unwrap_or(0),
            layout: self.layout.unwrap_or_default(),
            pseudo: pseudo.to_string(),
            dims: self.dims.unwrap_or(false),
            verbose: self.verbose.unwrap_or(0).min(3),
        })
    }
}

fn non_empty(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}
