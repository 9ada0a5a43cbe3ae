//! SVG document model and cleanup.
//!
//! This module owns everything that touches raw SVG text: the optimizer
//! that cleans a document before composition, and the per-icon document
//! model the composition engine mutates.

mod document;
mod optimizer;

pub use document::{fmt_number, Dimensions, SvgDocument, SvgError};
pub use optimizer::{CleanConfig, OptimizeError, Optimizer, Scrubber};
