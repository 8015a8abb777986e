//! Helpers shared by the rendering tests.

use ratatui::buffer::{Buffer, Cell};

/// Dumps `buf` one row per line with trailing blanks trimmed, so snapshots
/// and `contains` checks do not depend on the render width.
#[must_use]
pub(crate) fn buffer_to_string(buf: &Buffer) -> String {
    let width = usize::from(buf.area.width).max(1);
    buf.content
        .chunks(width)
        .fold(String::new(), |mut out, row| {
            let line: String = row.iter().map(Cell::symbol).collect();
            out.push_str(line.trim_end_matches(' '));
            out.push('\n');
            out
        })
}
