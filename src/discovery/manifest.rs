//! Project manifest (svgstack.yaml) parsing.
//!
//! The manifest defines source paths, the output directory and the sprite
//! composition options. Unknown keys are rejected up front, and the
//! option names retired by older sprite tools get a pointed error rather
//! than a warning, so a stale manifest fails loudly before any file
//! processing starts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpriteError};
use crate::types::{Layout, SpriteOptions, SpriteOptionsBuilder};

/// Option names from earlier sprite generators, each with its
/// replacement. Presence in a manifest is a configuration error.
const DEPRECATED_KEYS: &[(&str, &str)] = &[
    ("css", "render a stylesheet with `svgstack build` (on by default)"),
    ("sass", "use `svgstack build --template <file>` with an SCSS template"),
    ("sassout", "use `svgstack build --template <file>` with an SCSS template"),
    ("less", "use `svgstack build --template <file>` with a LESS template"),
    ("lessout", "use `svgstack build --template <file>` with a LESS template"),
    ("cleanwith", "the built-in scrubber is always used"),
    ("keep", "re-run the optimizer separately to keep cleaned singles"),
];

/// Project manifest loaded from svgstack.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    /// Source directories to scan for SVG inputs.
    /// Defaults to the project root if empty.
    pub sources: Vec<String>,

    /// Output directory for the sprite and rendered templates.
    pub output: PathBuf,

    /// Patterns to exclude from discovery.
    pub excludes: Vec<String>,

    /// Sprite composition options.
    pub sprite: SpriteSection,
}

/// The `sprite:` section, mapping 1:1 onto `SpriteOptions`.
///
/// Everything is optional; the options builder fills in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpriteSection {
    pub dir: Option<String>,
    pub name: Option<String>,
    pub prefix: Option<String>,
    pub common: Option<String>,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub padding: Option<u32>,
    pub layout: Option<String>,
    pub pseudo: Option<String>,
    pub dims: Option<bool>,
    pub verbose: Option<u8>,
}

fn default_output() -> PathBuf {
    PathBuf::from("dist")
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            sources: vec![],
            output: default_output(),
            excludes: vec![],
            sprite: SpriteSection::default(),
        }
    }
}

impl Manifest {
    /// Load manifest from a svgstack.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SpriteError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML text.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        reject_deprecated_keys(content)?;

        serde_yaml::from_str(content).map_err(|e| SpriteError::Config {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check svgstack.yaml against the documented keys".to_string()),
        })
    }

    /// Source paths to scan; the project root when none are configured.
    pub fn effective_sources(&self) -> Vec<String> {
        if self.sources.is_empty() {
            vec![".".to_string()]
        } else {
            self.sources.clone()
        }
    }

    /// Build the composition options from the sprite section.
    pub fn sprite_options(&self) -> Result<SpriteOptions> {
        self.sprite_options_builder().build()
    }

    /// Builder seeded from the sprite section, for CLI overrides.
    pub fn sprite_options_builder(&self) -> SpriteOptionsBuilder {
        let mut builder = SpriteOptionsBuilder::new();
        let section = &self.sprite;

        if let Some(dir) = &section.dir {
            builder.sprite_dir(dir);
        }
        if let Some(name) = &section.name {
            builder.sprite_name(name);
        }
        if let Some(prefix) = &section.prefix {
            builder.prefix(prefix);
        }
        if let Some(common) = &section.common {
            builder.common(common);
        }
        if let Some(max) = section.max_width {
            builder.max_width(max);
        }
        if let Some(max) = section.max_height {
            builder.max_height(max);
        }
        if let Some(padding) = section.padding {
            builder.padding(padding);
        }
        if let Some(layout) = &section.layout {
            builder.layout(Layout::parse(layout));
        }
        if let Some(pseudo) = &section.pseudo {
            builder.pseudo(pseudo);
        }
        if let Some(dims) = section.dims {
            builder.dims(dims);
        }
        if let Some(verbose) = section.verbose {
            builder.verbose(verbose);
        }
        builder
    }

    /// Check if a path should be excluded based on exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.excludes
            .iter()
            .any(|pattern| matches_pattern(&path_str, pattern))
    }
}

/// Scan the raw YAML mapping for retired option names before the typed
/// parse, so the error can name the replacement.
fn reject_deprecated_keys(content: &str) -> Result<()> {
    let value: serde_yaml::Value = match serde_yaml::from_str(content) {
        Ok(value) => value,
        // Let the typed parse report syntax errors.
        Err(_) => return Ok(()),
    };
    let Some(mapping) = value.as_mapping() else {
        return Ok(());
    };

    for (key, replacement) in DEPRECATED_KEYS {
        if mapping.contains_key(&serde_yaml::Value::from(*key)) {
            return Err(SpriteError::Config {
                message: format!("The \"{}\" option is no longer supported", key),
                help: Some(format!("Instead, {}", replacement)),
            });
        }
    }
    Ok(())
}

/// Minimal glob matching for exclude patterns: `*.ext` suffixes,
/// `**/dir/*` anywhere-in-path directories, everything else a substring.
fn matches_pattern(path: &str, pattern: &str) -> bool {
    if let Some(rest) = pattern.strip_prefix("**/") {
        if let Some(dir) = rest.strip_suffix("/*") {
            return path.contains(&format!("/{}/", dir)) || path.starts_with(&format!("{}/", dir));
        }
        return path.contains(rest);
    }
    if let Some(suffix) = pattern.strip_prefix('*') {
        return path.ends_with(suffix);
    }
    path.contains(pattern)
}
