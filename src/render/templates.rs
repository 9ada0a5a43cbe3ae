//! Built-in templates.
//!
//! These render the frozen sprite data model; the field names they use
//! are the contract documented on `SpriteData`. User templates loaded via
//! `--template` see exactly the same model.

/// Default stylesheet template.
///
/// Emits one rule per selector group, a shared rule when a common class
/// is configured, and per-icon dimension rules when `dims` is on.
pub const CSS_TEMPLATE: &str = "\
{{#if common}}.{{common}} {
\tbackground-image: url(\"{{sprite}}\");
\tbackground-repeat: no-repeat;
}

{{/if}}\
{{#each icons}}\
{{#each selectors}}.{{expression}}{{#unless last}},
{{/unless}}{{/each}} {
{{#unless @root.common}}\tbackground-image: url(\"{{@root.sprite}}\");
\tbackground-repeat: no-repeat;
{{/unless}}\
\tbackground-position: {{position}};
}

{{#if @root.dims}}\
{{#each dimensions.selectors}}.{{expression}}{{#unless last}},
{{/unless}}{{/each}} {
\twidth: {{dimensions.width}}px;
\theight: {{dimensions.height}}px;
}

{{/if}}\
{{/each}}";

/// Inline-SVG template, registered as the `inline` partial.
///
/// Re-assembles the composite document from the per-icon fragments so
/// HTML templates can embed the sprite directly.
pub const INLINE_SVG_TEMPLATE: &str = "\
<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
width=\"{{width}}\" height=\"{{height}}\" viewBox=\"0 0 {{width}} {{height}}\">\
{{#each icons}}{{{markup}}}{{/each}}</svg>";
