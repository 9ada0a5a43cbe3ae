//! Core data types for svgstack.

mod data;
mod options;

pub use data::{DimensionInfo, IconRecord, Selector, Sprite, SpriteData};
pub use options::{Layout, SpriteOptions, SpriteOptionsBuilder, DEFAULT_MAX_DIMENSION};
