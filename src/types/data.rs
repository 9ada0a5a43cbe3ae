//! The frozen data model handed to template rendering.
//!
//! Field names here are the template contract: built-in and user-supplied
//! templates address these exact names. Numeric fields serialize as
//! integers when they carry no fractional part so rendered CSS stays
//! clean (`20` rather than `20.0`).

use serde::{Serialize, Serializer};

/// One CSS selector descriptor for an icon.
///
/// `expression` and `raw` differ only in the escaping of the pseudo-class
/// separator (`\:` vs `:`): the first slots into a stylesheet, the second
/// is for consumers that want the unescaped form. `first`/`last` let
/// templates place separators between descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selector {
    pub expression: String,
    pub raw: String,
    pub first: bool,
    pub last: bool,
}

/// Dimension-rule metadata for one icon, emitted when `dims` is enabled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionInfo {
    pub selectors: Vec<Selector>,
    #[serde(serialize_with = "trim_number")]
    pub width: f64,
    #[serde(serialize_with = "trim_number")]
    pub height: f64,
}

/// Per-icon render record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IconRecord {
    /// Icon id derived from the source path.
    pub name: String,
    /// Visible width/height: the padded document size minus twice the
    /// configured padding.
    #[serde(serialize_with = "trim_number")]
    pub width: f64,
    #[serde(serialize_with = "trim_number")]
    pub height: f64,
    /// True for exactly one record: the final icon in sorted order.
    pub last: bool,
    pub selectors: Vec<Selector>,
    /// `background-position` value; nonzero offsets carry a `px` unit.
    pub position: String,
    #[serde(serialize_with = "trim_number")]
    pub position_x: f64,
    #[serde(serialize_with = "trim_number")]
    pub position_y: f64,
    pub dimensions: DimensionInfo,
    /// The icon's namespaced SVG fragment as placed in the sprite.
    pub markup: String,
}

/// The aggregate data model for one composition run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpriteData {
    /// Shared class applied to every icon rule, when configured.
    pub common: Option<String>,
    /// Selector prefix (the common class when set, the plain prefix
    /// otherwise).
    pub prefix: String,
    /// Relative path of the sprite document, for `url(...)` references.
    pub sprite: String,
    /// Whether templates should emit dimension rules.
    pub dims: bool,
    pub padding: u32,
    /// Aggregate canvas size.
    #[serde(serialize_with = "trim_number")]
    pub width: f64,
    #[serde(serialize_with = "trim_number")]
    pub height: f64,
    /// Per-icon records, sorted by `name` ascending.
    pub icons: Vec<IconRecord>,
}

/// Result of one composition run: the composite document plus its model.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Complete sprite SVG markup.
    pub markup: String,
    pub data: SpriteData,
}

/// Serialize a float as an integer when it has no fractional part.
fn trim_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < (i64::MAX as f64) {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
