//! Project discovery for svgstack.
//!
//! Finds SVG inputs either through a `svgstack.yaml` manifest or by
//! convention-scanning a directory tree.
//!
//! # Example
//!
//! ```ignore
//! use svgstack::discovery::discover;
//!
//! let result = discover("./my-project")?;
//! println!("Found {} icons", result.scan.total());
//! ```

mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::SpriteOptions;

pub use manifest::{Manifest, SpriteSection};
pub use scanner::{is_svg_file, scan_directory, scan_sources, ScanResult};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "svgstack.yaml";

/// Result of discovering SVG inputs in a project.
#[derive(Debug)]
pub struct DiscoveryResult {
    /// The project root directory.
    pub root: PathBuf,

    /// The loaded manifest (default if no svgstack.yaml was found).
    pub manifest: Manifest,

    /// Whether a svgstack.yaml manifest was found.
    pub has_manifest: bool,

    /// Discovered SVG files.
    pub scan: ScanResult,
}

impl DiscoveryResult {
    /// Composition options from the manifest's sprite section.
    pub fn sprite_options(&self) -> Result<SpriteOptions> {
        self.manifest.sprite_options()
    }

    /// The resolved output directory, relative paths anchored at the root.
    pub fn output_dir(&self) -> PathBuf {
        if self.manifest.output.is_absolute() {
            self.manifest.output.clone()
        } else {
            self.root.join(&self.manifest.output)
        }
    }
}

/// Discover SVG inputs in a project directory.
///
/// Looks for a `svgstack.yaml` manifest in the root. If found, scans the
/// manifest's source paths; otherwise the whole tree. The output
/// directory is always skipped.
pub fn discover(root: impl AsRef<Path>) -> Result<DiscoveryResult> {
    let root = root.as_ref().to_path_buf();

    let manifest_path = root.join(MANIFEST_FILENAME);
    let (manifest, has_manifest) = if manifest_path.exists() {
        (Manifest::load(&manifest_path)?, true)
    } else {
        (Manifest::default(), false)
    };

    let sources = manifest.effective_sources();
    let output = if manifest.output.is_absolute() {
        manifest.output.clone()
    } else {
        root.join(&manifest.output)
    };
    let scan = scan_sources(&sources, &root, &manifest, Some(&output));

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest,
        scan,
    })
}

/// Discover SVG inputs from explicit paths (no manifest lookup).
pub fn discover_paths(paths: &[PathBuf]) -> Result<DiscoveryResult> {
    let manifest = Manifest::default();
    let mut scan = ScanResult::new();

    for path in paths {
        if path.is_dir() {
            scan.merge(scan_directory(path, &manifest, None));
        } else if path.is_file() && is_svg_file(path) {
            scan.svgs.push(path.clone());
        }
    }

    let root = paths
        .first()
        .and_then(|p| p.parent())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest: false,
        scan,
    })
}
