//! Init command implementation.
//!
//! Generates a `svgstack.yaml` manifest from discovered SVG inputs.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::discovery::{discover, MANIFEST_FILENAME};
use crate::error::{Result, SpriteError};
use crate::output::{display_path, plural, Printer};

/// Initialize a svgstack project by generating a svgstack.yaml manifest
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to scan (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing svgstack.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let printer = Printer::new(1);
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(SpriteError::Config {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    printer.status("Scanning", &display_path(&args.path));
    let discovery = discover(&args.path)?;

    // Collect unique parent directories (relative to the project root).
    let mut source_dirs = BTreeSet::new();
    for file in &discovery.scan.svgs {
        if let Some(parent) = file.parent() {
            let relative = parent.strip_prefix(&discovery.root).unwrap_or(parent);
            let dir = if relative == std::path::Path::new("") {
                ".".to_string()
            } else {
                format!("{}/", relative.display())
            };
            source_dirs.insert(dir);
        }
    }

    // Build YAML manually for clean formatting.
    let mut yaml = String::new();
    if !(source_dirs.is_empty() || (source_dirs.len() == 1 && source_dirs.contains("."))) {
        yaml.push_str("sources:\n");
        for dir in &source_dirs {
            yaml.push_str(&format!("  - \"{}\"\n", dir));
        }
    }
    yaml.push_str("output: dist\n");
    yaml.push_str("sprite:\n");
    yaml.push_str("  name: sprite\n");
    yaml.push_str("  prefix: svg\n");

    fs::write(&manifest_path, &yaml).map_err(|e| SpriteError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    let total = discovery.scan.total();
    if !source_dirs.is_empty() {
        let dirs: Vec<&str> = source_dirs.iter().map(|s| s.as_str()).collect();
        printer.status("Discovered", &dirs.join(", "));
    }
    printer.success(
        "Created",
        &format!(
            "{} ({} found)",
            MANIFEST_FILENAME,
            plural(total, "icon", "icons")
        ),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_manifest() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("arrow.svg"), "<svg/>").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        run(args).unwrap();

        let content = fs::read_to_string(dir.path().join(MANIFEST_FILENAME)).unwrap();
        assert!(content.contains("output: dist"));
        assert!(content.contains("prefix: svg"));
    }

    #[test]
    fn test_init_errors_if_manifest_exists() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILENAME), "output: build").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        assert!(run(args).is_err());
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILENAME), "output: build").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: true,
        };
        run(args).unwrap();

        let content = fs::read_to_string(dir.path().join(MANIFEST_FILENAME)).unwrap();
        assert!(content.contains("output: dist"));
    }

    #[test]
    fn test_init_lists_source_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("icons/nav")).unwrap();
        fs::write(dir.path().join("icons/logo.svg"), "<svg/>").unwrap();
        fs::write(dir.path().join("icons/nav/arrow.svg"), "<svg/>").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        run(args).unwrap();

        let content = fs::read_to_string(dir.path().join(MANIFEST_FILENAME)).unwrap();
        assert!(content.contains("sources:"));
        assert!(content.contains("icons/"));
        assert!(content.contains("icons/nav/"));
    }

    #[test]
    fn test_init_empty_directory_skips_sources() {
        let dir = tempdir().unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        run(args).unwrap();

        let content = fs::read_to_string(dir.path().join(MANIFEST_FILENAME)).unwrap();
        assert!(!content.contains("sources:"));
    }
}
