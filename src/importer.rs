// Import driver: resolve extensions, scan, filter and upload each candidate
// one after another. Per-file failures are reported and skipped; only a scan
// failure aborts the run.

use crate::api::ApiClient;
use crate::extensions::ExtensionConfig;
use crate::scanner::scan_directory;
use anyhow::{Context, Result};
use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Inputs of one import run, as given on the command line.
#[derive(Debug, Clone)]
pub struct ImportArgs {
    pub project_id: String,
    pub documents_dir: PathBuf,
    pub extensions: Option<String>,
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub total_files: usize,
    pub candidates: usize,
    pub uploaded: usize,
    pub failed: usize,
}

/// Run a whole import. Returns an error only when the directory cannot be
/// scanned; upload failures are counted in the summary.
pub fn run(args: &ImportArgs, api: &ApiClient) -> Result<ImportSummary> {
    let config = ExtensionConfig::parse(args.extensions.as_deref());
    println!("{}", config);

    println!("scanning directory: {}", args.documents_dir.display());
    let all_files = scan_directory(&args.documents_dir)?;

    let candidates: Vec<&PathBuf> = all_files
        .iter()
        .filter(|path| {
            let ok = config.accepts(path);
            if !ok {
                debug!("skipping unsupported file {}", path.display());
            }
            ok
        })
        .collect();

    let mut summary = ImportSummary {
        total_files: all_files.len(),
        candidates: candidates.len(),
        ..Default::default()
    };

    if candidates.is_empty() {
        println!(
            "no supported files found. currently supported: {}",
            config.accepted().join(", ")
        );
        return Ok(summary);
    }

    println!(
        "found {} supported files ({} files in total)",
        summary.candidates, summary.total_files
    );

    // Draws to stderr and stays hidden when that is not a terminal.
    let pb = ProgressBar::new(candidates.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let colour = std::io::stdout().is_tty();
    for path in candidates {
        let display_name = file_name_of(path);
        pb.set_message(display_name.clone());
        match upload_one(api, &config, &args.project_id, path, &pb) {
            Ok(_) => {
                summary.uploaded += 1;
                let label = "✅ uploaded:";
                let label = if colour { label.green().to_string() } else { label.to_string() };
                pb.suspend(|| println!("{} {}", label, display_name));
            }
            Err(e) => {
                summary.failed += 1;
                let label = "❌ upload failed";
                let label = if colour { label.red().to_string() } else { label.to_string() };
                pb.suspend(|| println!("{} {}: {}", label, display_name, describe(&e)));
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!(
        "\nbulk import finished: {}/{} files uploaded",
        summary.uploaded, summary.candidates
    );
    Ok(summary)
}

/// Upload a single file, renaming its extension in the advertised name when
/// the configuration maps it. The file on disk is only read.
pub fn upload_one(
    api: &ApiClient,
    config: &ExtensionConfig,
    project_id: &str,
    path: &Path,
    pb: &ProgressBar,
) -> Result<Value> {
    let file_name = file_name_of(path);
    let upload_name = config.upload_name(path);
    if upload_name != file_name {
        pb.suspend(|| println!("mapping: {} -> {}", file_name, upload_name));
    }

    let content =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    pb.suspend(|| {
        println!(
            "uploading: {} ({:.2} KB)",
            file_name,
            content.len() as f64 / 1024.0
        )
    });

    api.upload_file(project_id, &upload_name, content)
}

/// Outer message plus root cause. reqwest's intermediate sources repeat the
/// root cause, so the full `{:#}` chain is too noisy for a per-file line.
pub fn describe(err: &anyhow::Error) -> String {
    let top = err.to_string();
    let root = err.root_cause().to_string();
    if top == root {
        top
    } else {
        format!("{}: {}", top, root)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
