//! Top-level sprite composition.
//!
//! Fans the per-file normalizer out across a thread pool, joins, sorts
//! the results by icon id, then drives the layout engine and selector
//! derivation to build the composite document and its data model. The
//! sort after the join is the single determinism point: output is
//! byte-identical regardless of which file finishes first.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{Result, SpriteError};
use crate::sprite::layout::{place, Placement};
use crate::sprite::normalize::{icon_id, normalize_file, NormalizedIcon};
use crate::sprite::{namespace, selector};
use crate::svg::{fmt_number, Optimizer, Scrubber};
use crate::types::{DimensionInfo, IconRecord, Layout, Sprite, SpriteData, SpriteOptions};

/// Compose a sprite from the given input files with the built-in
/// optimizer.
///
/// `root` anchors icon-id derivation; pass the scan root so nested files
/// get path-qualified ids.
pub fn compose(files: &[PathBuf], root: Option<&Path>, options: &SpriteOptions) -> Result<Sprite> {
    compose_with(files, root, options, &Scrubber::default())
}

/// Compose a sprite using a caller-supplied optimizer.
///
/// All-or-nothing: the first per-file failure observed at the join aborts
/// the run and no partial sprite is produced.
pub fn compose_with(
    files: &[PathBuf],
    root: Option<&Path>,
    options: &SpriteOptions,
    optimizer: &dyn Optimizer,
) -> Result<Sprite> {
    let ids = derive_ids(files, root)?;
    let total = files.len();

    // Fan out one normalization task per file. Each task owns its file's
    // document and a namespace prefix precomputed from (index, total);
    // nothing is shared mutably. collect() is the join barrier: the
    // first error wins and sibling results are dropped.
    let mut icons: Vec<NormalizedIcon> = ids
        .par_iter()
        .enumerate()
        .map(|(index, (id, path))| {
            let prefix = namespace::allocate(index, total);
            normalize_file(path, id, &prefix, options, optimizer)
        })
        .collect::<Result<_>>()?;

    // The determinism point: completion order no longer matters.
    icons.sort_by(|a, b| a.id.cmp(&b.id));

    let pseudo_map = selector::pseudo_map(icons.iter().map(|i| i.id.as_str()), &options.pseudo);

    let sizes: Vec<(f64, f64)> = icons.iter().map(|i| (i.width, i.height)).collect();
    let layout = place(&sizes, options.layout);

    let last_index = icons.len().saturating_sub(1);
    let mut fragments = Vec::with_capacity(icons.len());
    let mut records = Vec::with_capacity(icons.len());

    for (index, mut icon) in icons.into_iter().enumerate() {
        let placement = layout.placements[index];
        let fragment = place_fragment(&mut icon, placement, options);
        records.push(build_record(
            &icon,
            placement,
            &fragment,
            index == last_index,
            &pseudo_map,
            options,
        ));
        fragments.push(fragment);
    }

    let markup = sprite_markup(&fragments, layout.width, layout.height);
    let data = SpriteData {
        common: options.common.clone(),
        prefix: options.effective_prefix().to_string(),
        sprite: options.sprite_path().display().to_string(),
        dims: options.dims,
        padding: options.padding,
        width: layout.width,
        height: layout.height,
        icons: records,
    };

    Ok(Sprite { markup, data })
}

/// Derive icon ids for every input and reject duplicates up front.
fn derive_ids(files: &[PathBuf], root: Option<&Path>) -> Result<Vec<(String, PathBuf)>> {
    let mut seen: BTreeMap<String, PathBuf> = BTreeMap::new();
    let mut ids = Vec::with_capacity(files.len());

    for path in files {
        let id = icon_id(path, root);
        if let Some(first) = seen.get(&id) {
            return Err(SpriteError::Collision {
                id,
                first: first.clone(),
                second: path.clone(),
            });
        }
        seen.insert(id.clone(), path.clone());
        ids.push((id, path.clone()));
    }
    Ok(ids)
}

/// Stamp the icon's root with its id and canvas position, then serialize
/// the fragment.
fn place_fragment(icon: &mut NormalizedIcon, placement: Placement, options: &SpriteOptions) -> String {
    let document = &mut icon.document;
    document.set_attr("id", icon.id.clone());
    match options.layout {
        Layout::Vertical => {
            document.set_attr("y", fmt_number(placement.y));
        }
        Layout::Horizontal => {
            document.set_attr("x", fmt_number(placement.x));
        }
        Layout::Diagonal => {
            document.set_attr("x", fmt_number(placement.x));
            document.set_attr("y", fmt_number(placement.y));
        }
    }
    document.serialize(false)
}

/// Build the per-icon render record.
fn build_record(
    icon: &NormalizedIcon,
    placement: Placement,
    fragment: &str,
    last: bool,
    pseudo_map: &BTreeMap<String, bool>,
    options: &SpriteOptions,
) -> IconRecord {
    let base = icon
        .id
        .split(&options.pseudo)
        .next()
        .unwrap_or(&icon.id)
        .to_string();
    let has_pseudo_sibling = pseudo_map.get(&base).copied().unwrap_or(false);

    let position_x = -placement.x;
    let position_y = -placement.y;
    let padding = options.padding as f64;

    IconRecord {
        name: icon.id.clone(),
        width: icon.width - 2.0 * padding,
        height: icon.height - 2.0 * padding,
        last,
        selectors: selector::derive(&icon.id, &options.pseudo, &options.prefix, has_pseudo_sibling),
        position: format!("{} {}", add_unit(position_x), add_unit(position_y)),
        position_x,
        position_y,
        dimensions: DimensionInfo {
            selectors: selector::dimension_selectors(&icon.id, &options.pseudo, &options.prefix),
            width: icon.width,
            height: icon.height,
        },
        markup: fragment.to_string(),
    }
}

/// Wrap the placed fragments in the sprite root element.
fn sprite_markup(fragments: &[String], width: f64, height: f64) -> String {
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = fmt_number(width),
        h = fmt_number(height),
    ));
    for fragment in fragments {
        svg.push_str(fragment);
    }
    svg.push_str("</svg>");
    svg
}

/// Append a `px` unit to nonzero coordinates; zero stays unitless.
fn add_unit(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}px", fmt_number(value))
    }
}
