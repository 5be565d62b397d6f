//! symdoc — generate documentation from extracted symbol records.
//!
//! Reads the JSON record files produced by an upstream source-code extractor
//! and renders one documentation page per module. Supports two modes:
//!
//! - **stdin mode**: `symdoc < module.json`
//! - **file mode**: `symdoc -o docs records/*.json`

mod comment;
mod keys;
mod markdown;
mod model;
mod parser;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use render::RenderOptions;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "symdoc",
    about = "Generate documentation from extracted symbol records"
)]
struct Cli {
    /// Input record files (glob patterns supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory (required when files are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: markdown (default), json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// Language tag for declaration and code listing fences
    #[arg(short = 'l', long, default_value = "swift")]
    language: String,

    /// Path prefix stripped from source locations in json output
    #[arg(long, default_value = "")]
    strip_prefix: String,
}

impl Cli {
    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            language: self.language.clone(),
            strip_prefix: self.strip_prefix.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.files.is_empty() {
        return stdin_mode(&cli);
    }

    file_mode(&cli)
}

/// stdin mode: read one record file from stdin, write the rendered page to
/// stdout.
fn stdin_mode(cli: &Cli) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let doc = parser::parse_records(&input)?;
    let renderer = render::create_renderer(&cli.format, cli.render_options())?;
    print!("{}", renderer.render(&doc));
    Ok(())
}

/// file mode: process multiple record files, write one page per module to
/// the output directory.
fn file_mode(cli: &Cli) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when files are given")?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    let input_files = expand_globs(&cli.files)?;
    let renderer = render::create_renderer(&cli.format, cli.render_options())?;
    let ext = renderer.file_extension();

    for path in &input_files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut doc = match parser::parse_records(&content) {
            Ok(doc) => doc,
            Err(e) => {
                eprintln!("warning: skipping {}: {}", path.display(), e);
                continue;
            }
        };
        // Skip modules with no extracted symbols.
        if doc.symbols.is_empty() {
            continue;
        }

        let name = derive_output_name(&path.to_string_lossy());
        doc.name = Some(name.clone());

        let out_path = output_dir.join(format!("{}.{}", name, ext));
        fs::write(&out_path, renderer.render(&doc))
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }

    Ok(())
}

/// File extensions recognized as extractor output.
const SUPPORTED_EXTENSIONS: &[&str] = &["json"];

/// Expand glob patterns into a list of real file paths. Also handles bare
/// directory paths by scanning for supported file types.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() {
                    if let Some(ext) = p.extension().and_then(|e| e.to_str()) {
                        if SUPPORTED_EXTENSIONS.contains(&ext) {
                            files.push(p);
                        }
                    }
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            eprintln!("warning: no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

/// Derive the output file name (without extension) from a source path.
/// "records/Greeter.json" → "Greeter"
fn derive_output_name(source: &str) -> String {
    let filename = source.rsplit('/').next().unwrap_or(source);
    filename
        .strip_suffix(".json")
        .unwrap_or(filename)
        .to_string()
}
