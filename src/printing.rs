use std::io::{self, Write};

use crate::constants::printing::COLUMN_SEPARATOR;
use crate::types::Row;

/// Writes a header line followed by one line per row, fields separated by
/// the column separator. Both the screen and file destinations of the
/// interactive driver use this format.
pub fn write_table<W: Write>(out: &mut W, columns: &[String], rows: &[Row]) -> io::Result<()> {
    let separator = COLUMN_SEPARATOR.to_string();
    writeln!(out, "{}", columns.join(&separator))?;
    for row in rows {
        writeln!(out, "{}", row.join(&separator))?;
    }
    Ok(())
}
