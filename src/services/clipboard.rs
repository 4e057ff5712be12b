//! System clipboard access
//!
//! Copy failures are recoverable: the caller surfaces them as a status-bar
//! message and the app stays interactive.

use anyhow::{Context, Result};

/// Write the given text to the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("clipboard is not available")?;
    clipboard
        .set_text(text.to_string())
        .context("failed to write to clipboard")?;
    Ok(())
}
