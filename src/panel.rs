//! The 16x2 text display seam.

use core::fmt::{self, Write};

use heapless::String;

use crate::Result;

/// Characters per display row.
pub const PANEL_COLUMNS: usize = 16;

/// One row's worth of text.
pub type PanelLine = String<PANEL_COLUMNS>;

/// A character display that can be cleared, addressed, and printed to.
pub trait TextPanel {
    async fn clear(&mut self);

    /// Move the cursor. Column first, like the HD44780 docs.
    async fn set_cursor(&mut self, column: u8, row: u8);

    async fn print(&mut self, text: &str);
}

/// Format into a fixed-capacity line.
///
/// # Errors
///
/// Returns [`crate::Error::FormatError`] if the text does not fit on one row.
pub fn format_line(args: fmt::Arguments<'_>) -> Result<PanelLine> {
    let mut line = PanelLine::new();
    line.write_fmt(args)?;
    Ok(line)
}

/// Clear the panel and write up to two rows.
pub async fn show_lines(panel: &mut impl TextPanel, top: &str, bottom: &str) {
    panel.clear().await;
    panel.set_cursor(0, 0).await;
    panel.print(top).await;
    if !bottom.is_empty() {
        panel.set_cursor(0, 1).await;
        panel.print(bottom).await;
    }
}
