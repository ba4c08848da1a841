use anyhow::Context;
use arboard::Clipboard;
use shared::types::Result;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn copy_to_clipboard(svg: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("clipboard unavailable")?;
    clipboard
        .set_text(svg.to_string())
        .context("failed to write to clipboard")?;
    Ok(())
}

pub fn export_filename(unix_millis: i64) -> String {
    format!("icon-{}.svg", unix_millis)
}

/// Writes the document verbatim to `dir/icon-<unix millis>.svg`.
pub fn write_svg(dir: &Path, svg: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("cannot create export directory {:?}", dir))?;
    let path = dir.join(export_filename(chrono::Utc::now().timestamp_millis()));
    std::fs::write(&path, svg).with_context(|| format!("failed to write {:?}", path))?;
    info!(path = %path.display(), "svg exported");
    Ok(path)
}
