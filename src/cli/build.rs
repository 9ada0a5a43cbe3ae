//! Build command implementation.
//!
//! Discovers SVG inputs, composes the sprite, and writes the sprite
//! document plus rendered stylesheet (and optionally the raw data model)
//! to the output directory. `--watch` keeps rebuilding on input changes.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use clap::Args;
use notify::{RecursiveMode, Watcher};

use crate::discovery::{discover, discover_paths, DiscoveryResult, MANIFEST_FILENAME};
use crate::error::{Result, SpriteError};
use crate::output::{bytes_to_size, display_path, plural, Printer};
use crate::render::TemplateRenderer;
use crate::sprite::compose;
use crate::svg::{Optimizer, Scrubber};
use crate::types::{Layout, Sprite, SpriteOptions};

/// Compose SVG inputs into a sprite and render its stylesheet
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Input files or directories (default: discover via svgstack.yaml)
    pub inputs: Vec<PathBuf>,

    /// Project root used when no inputs are given
    #[arg(long, default_value = ".")]
    pub project: PathBuf,

    /// Output directory (overrides the manifest)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Sprite base name (overrides the manifest)
    #[arg(long)]
    pub name: Option<String>,

    /// Selector class prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Shared class applied to every icon rule
    #[arg(long)]
    pub common: Option<String>,

    /// Layout strategy: vertical, horizontal or diagonal
    #[arg(long)]
    pub layout: Option<String>,

    /// Padding around each icon, in pixels
    #[arg(long)]
    pub padding: Option<u32>,

    /// Emit per-icon dimension rules
    #[arg(long)]
    pub dims: bool,

    /// Custom stylesheet template file
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Also write the sprite data model as JSON
    #[arg(long)]
    pub data: bool,

    /// Validate inputs before composing; abort on errors
    #[arg(long)]
    pub validate: bool,

    /// Rebuild whenever inputs change
    #[arg(long)]
    pub watch: bool,

    /// Increase diagnostic detail (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

pub fn run(args: BuildArgs) -> Result<()> {
    let outcome = build_once(&args)?;

    if args.watch {
        watch(&args, &outcome)?;
    }
    Ok(())
}

/// Paths a completed build resolved, reused by the watch loop.
struct BuildOutcome {
    root: PathBuf,
    output_dir: PathBuf,
}

fn build_once(args: &BuildArgs) -> Result<BuildOutcome> {
    let discovery = if args.inputs.is_empty() {
        discover(&args.project)?
    } else {
        discover_paths(&args.inputs)?
    };

    let options = resolve_options(args, &discovery)?;
    let printer = Printer::new(options.verbose);
    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| discovery.output_dir());

    let files = &discovery.scan.svgs;
    if files.is_empty() {
        printer.warning("Empty", "no SVG inputs found");
    }

    if args.validate {
        let result = crate::validation::validate_inputs(
            files,
            Some(&discovery.root),
            &discovery.manifest,
            &options,
        );
        if !result.is_ok() {
            crate::validation::print_diagnostics(&result, &printer);
        }
        if result.has_errors() {
            return Err(SpriteError::Validation {
                message: format!(
                    "{} in the input set",
                    plural(result.error_count(), "error", "errors")
                ),
                help: Some("Fix the reported inputs and rebuild".to_string()),
            });
        }
    }

    printer.status(
        "Composing",
        &format!(
            "{} ({} layout)",
            plural(files.len(), "icon", "icons"),
            options.layout.as_str()
        ),
    );
    for file in files {
        printer.detail("Processing", &display_path(file));
    }
    if printer.verbosity() >= 3 {
        trace_optimizer_savings(files, &printer);
    }

    let sprite = compose(files, Some(&discovery.root), &options)?;
    write_outputs(args, &options, &output_dir, &sprite, &printer)?;

    Ok(BuildOutcome {
        root: discovery.root,
        output_dir,
    })
}

/// Manifest options with CLI overrides applied.
fn resolve_options(args: &BuildArgs, discovery: &DiscoveryResult) -> Result<SpriteOptions> {
    let mut builder = discovery.manifest.sprite_options_builder();

    if let Some(name) = &args.name {
        builder.sprite_name(name);
    }
    if let Some(prefix) = &args.prefix {
        builder.prefix(prefix);
    }
    if let Some(common) = &args.common {
        builder.common(common);
    }
    if let Some(layout) = &args.layout {
        builder.layout(Layout::parse(layout));
    }
    if let Some(padding) = args.padding {
        builder.padding(padding);
    }
    if args.dims {
        builder.dims(true);
    }
    if args.verbose > 0 {
        builder.verbose(args.verbose);
    }
    builder.build()
}

fn write_outputs(
    args: &BuildArgs,
    options: &SpriteOptions,
    output_dir: &Path,
    sprite: &Sprite,
    printer: &Printer,
) -> Result<()> {
    let sprite_path = output_dir.join(options.sprite_path());
    if let Some(parent) = sprite_path.parent() {
        fs::create_dir_all(parent).map_err(|e| SpriteError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }
    write_file(&sprite_path, &sprite.markup)?;
    printer.status("Writing", &display_path(&sprite_path));

    let renderer = TemplateRenderer::new()?;
    let (stylesheet, extension) = match &args.template {
        Some(template_path) => {
            let template = fs::read_to_string(template_path).map_err(|e| SpriteError::Io {
                path: template_path.clone(),
                message: format!("Failed to read template: {}", e),
            })?;
            let extension = template_path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("css")
                .to_string();
            (renderer.render_str(&template, &sprite.data)?, extension)
        }
        None => (renderer.render_css(&sprite.data)?, "css".to_string()),
    };
    let stylesheet_path = output_dir.join(format!("{}.{}", options.sprite_name, extension));
    write_file(&stylesheet_path, &stylesheet)?;
    printer.status("Writing", &display_path(&stylesheet_path));

    if args.data {
        let json = serde_json::to_string_pretty(&sprite.data).map_err(|e| SpriteError::Render {
            message: format!("Failed to serialize sprite data: {}", e),
            help: None,
        })?;
        let data_path = output_dir.join(format!("{}.json", options.sprite_name));
        write_file(&data_path, &json)?;
        printer.status("Writing", &display_path(&data_path));
    }

    printer.success(
        "Finished",
        &format!(
            "{} ({}x{})",
            plural(sprite.data.icons.len(), "icon", "icons"),
            sprite.data.width,
            sprite.data.height
        ),
    );
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| SpriteError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write file: {}", e),
    })
}

/// Report per-file optimizer savings; diagnostics only, the composition
/// runs its own cleanup.
fn trace_optimizer_savings(files: &[PathBuf], printer: &Printer) {
    let scrubber = Scrubber::default();
    for file in files {
        let Ok(raw) = fs::read_to_string(file) else {
            continue;
        };
        if let Ok(cleaned) = scrubber.optimize(&raw) {
            let saved = raw.len().saturating_sub(cleaned.len());
            let percent = if raw.is_empty() {
                0
            } else {
                100 * saved / raw.len()
            };
            printer.trace(
                "Optimized",
                &format!(
                    "{} {}",
                    display_path(file),
                    printer.dim(&format!("(saved {} / {}%)", bytes_to_size(saved), percent))
                ),
            );
        }
    }
}

/// Rebuild whenever a relevant file below the project root changes.
fn watch(args: &BuildArgs, outcome: &BuildOutcome) -> Result<()> {
    let printer = Printer::new(args.verbose.max(1));
    let (tx, rx) = mpsc::channel();

    // Watch and compare canonical paths; event paths arrive absolute.
    let root = fs::canonicalize(&outcome.root).unwrap_or_else(|_| outcome.root.clone());
    let output_dir =
        fs::canonicalize(&outcome.output_dir).unwrap_or_else(|_| outcome.output_dir.clone());

    let mut watcher = notify::recommended_watcher(tx).map_err(|e| SpriteError::Io {
        path: root.clone(),
        message: format!("Failed to start watcher: {}", e),
    })?;
    watcher
        .watch(&root, RecursiveMode::Recursive)
        .map_err(|e| SpriteError::Io {
            path: root.clone(),
            message: format!("Failed to watch directory: {}", e),
        })?;

    printer.status("Watching", &display_path(&root));

    for event in rx {
        let Ok(event) = event else { continue };
        if !event
            .paths
            .iter()
            .any(|p| relevant_change(p, &output_dir))
        {
            continue;
        }
        printer.status("Rebuilding", &display_path(&root));
        if let Err(e) = build_once(args) {
            // Keep watching; the next save can fix the input.
            printer.error("Error", &e.to_string());
        }
    }
    Ok(())
}

/// SVG inputs and the manifest trigger rebuilds; our own output never
/// does.
fn relevant_change(path: &Path, output_dir: &Path) -> bool {
    if path.starts_with(output_dir) {
        return false;
    }
    crate::discovery::is_svg_file(path)
        || path.file_name().and_then(|n| n.to_str()) == Some(MANIFEST_FILENAME)
}
