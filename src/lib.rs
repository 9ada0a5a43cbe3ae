//! svgstack - SVG sprite generator
//!
//! A library for composing sets of SVG icon documents into a single
//! sprite document plus a data model for stylesheet rendering.

pub mod cli;
pub mod discovery;
pub mod error;
pub mod output;
pub mod render;
pub mod sprite;
pub mod svg;
pub mod types;
pub mod validation;

pub use discovery::{discover, discover_paths, DiscoveryResult, Manifest, ScanResult};
pub use error::{Result, SpriteError};
pub use render::TemplateRenderer;
pub use sprite::{compose, compose_with, icon_id, normalize_file, NormalizedIcon};
pub use svg::{CleanConfig, Optimizer, Scrubber, SvgDocument};
pub use types::{
    IconRecord, Layout, Selector, Sprite, SpriteData, SpriteOptions, SpriteOptionsBuilder,
};
pub use validation::{validate_inputs, Diagnostic, Severity, ValidationResult};
