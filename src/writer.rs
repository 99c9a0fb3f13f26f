use std::fs::File;
use std::io::{BufWriter, Write};
use std::iter;
use std::path::Path;

use crate::error::Result;
use crate::samples::{FinalTable, INDEX_COLUMN};
use crate::types::Value;

/// Write `table` as CSV: an unnamed, 0-based index column followed by every column of the table.
pub fn write_csv<W: Write>(table: &FinalTable, writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(iter::once(INDEX_COLUMN).chain(table.columns().iter().map(String::as_str)))?;
    for (i, row) in table.rows().iter().enumerate() {
        out.write_record(iter::once(i.to_string()).chain(row.iter().map(Value::to_string)))?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_path<P: AsRef<Path>>(table: &FinalTable, path: P) -> Result<()> {
    let file = File::create(path)?;
    write_csv(table, BufWriter::new(file))
}
