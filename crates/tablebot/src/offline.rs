//! Offline commands: the bot's ingest, stats and plot pipeline on local files

use std::path::Path;

use anyhow::Context;
use tablecore::{ingest, plot, stats};

/// File name part of `path`, used for format detection
fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn load_table(path: &Path) -> anyhow::Result<tablecore::Table> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let table = ingest::parse_upload(&file_name(path), &bytes)?;
    log::info!(
        "Loaded {}: {} rows, {} columns",
        path.display(),
        table.row_count(),
        table.column_count()
    );
    Ok(table)
}

/// Statistics table for the file at `path`, as printed by `tablebot stats`
pub fn stats_markdown(path: &Path) -> anyhow::Result<String> {
    let table = load_table(path)?;
    Ok(stats::describe(&table)?.to_markdown())
}

/// Renders the file at `path` and writes the PNG to `output`
pub fn write_plot(path: &Path, output: &Path) -> anyhow::Result<()> {
    let table = load_table(path)?;
    let png = plot::render_bar_chart(&table)?;
    std::fs::write(output, &png).with_context(|| format!("Failed to write {}", output.display()))?;
    log::info!("Wrote {} ({} bytes)", output.display(), png.len());
    Ok(())
}
