//! Placement arithmetic for the sprite canvas.
//!
//! A sequential fold over the sorted icon list. Accumulating axes round
//! up after every step so offsets stay on whole pixels; the max axis
//! keeps the raw maximum. Offsets used as background positions are the
//! negation of these placements.

use crate::types::Layout;

/// Canvas placement of one icon's root element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
}

/// Result of the layout fold.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    /// Placements aligned with the input order.
    pub placements: Vec<Placement>,
    /// Aggregate canvas size.
    pub width: f64,
    pub height: f64,
}

/// Fold the ordered icon sizes into placements and a canvas size.
///
/// The input order must already be the final sorted order: placements are
/// index-dependent and reproducibility hangs on a stable input.
pub fn place(sizes: &[(f64, f64)], layout: Layout) -> LayoutResult {
    let mut placements = Vec::with_capacity(sizes.len());
    let mut width = 0.0f64;
    let mut height = 0.0f64;

    for &(w, h) in sizes {
        match layout {
            Layout::Vertical => {
                placements.push(Placement { x: 0.0, y: height });
                width = width.max(w);
                height = (height + h).ceil();
            }
            Layout::Horizontal => {
                placements.push(Placement { x: width, y: 0.0 });
                width = (width + w).ceil();
                height = height.max(h);
            }
            Layout::Diagonal => {
                placements.push(Placement {
                    x: width,
                    y: height,
                });
                width = (width + w).ceil();
                height = (height + h).ceil();
            }
        }
    }

    LayoutResult {
        placements,
        width,
        height,
    }
}
