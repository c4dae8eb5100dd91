//! Column alignment for declaration lists.

/// Pad every column but the last so that columns line up across rows.
///
/// Rows may have different lengths; a row only pads the columns it has.
/// Width is measured in characters.
///
/// ```
/// use repogen_codegen::align_columns;
///
/// let lines = align_columns(&[
///     vec!["Id".to_string(), "int64".to_string()],
///     vec!["CreatedAt".to_string(), "time.Time".to_string()],
/// ]);
/// assert_eq!(lines, vec!["Id        int64", "CreatedAt time.Time"]);
/// ```
pub fn align_columns(rows: &[Vec<String>]) -> Vec<String> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in rows {
        // The last cell of a row never drives padding.
        for (i, cell) in row.iter().enumerate().take(row.len().saturating_sub(1)) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    rows.iter()
        .map(|row| {
            let mut line = String::new();
            for (i, cell) in row.iter().enumerate() {
                line.push_str(cell);
                if i + 1 < row.len() {
                    let pad = widths[i] - cell.chars().count();
                    line.push_str(&" ".repeat(pad + 1));
                }
            }
            line
        })
        .collect()
}
