//! Row inspection: depth and payload of a single grid row.

/// One spreadsheet row: cells in column order.
pub type Row = Vec<String>;

/// Ragged grid of rows as exported from a spreadsheet range.
pub type Grid = Vec<Row>;

/// Depth and payload of a non-blank row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowPayload<'a> {
    /// Number of leading blank cells
    pub depth: usize,
    /// Text of the first non-blank cell
    pub text: &'a str,
}

/// A cell is blank only when it is the empty string.
pub fn is_blank(cell: &str) -> bool {
    cell.is_empty()
}

/// Locate the first non-blank cell of a row.
///
/// Returns `None` for rows that are empty or contain only blank cells;
/// such rows carry no outline information.
pub fn locate_payload<S: AsRef<str>>(cells: &[S]) -> Option<RowPayload<'_>> {
    cells
        .iter()
        .position(|cell| !is_blank(cell.as_ref()))
        .map(|depth| RowPayload {
            depth,
            text: cells[depth].as_ref(),
        })
}

/// Split a payload into `(topic, content)` at the first line break.
///
/// Text after the first `\n` is kept verbatim, further line breaks included.
/// Without a line break the topic is empty and the whole payload is content.
pub fn split_payload(payload: &str) -> (&str, &str) {
    match payload.split_once('\n') {
        Some((topic, content)) => (topic, content),
        None => ("", payload),
    }
}
