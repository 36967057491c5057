//! CSV writer

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use cf_core::data::{DataError, DataView, SeriesValue};
use csv::{Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};

use crate::{Result, separator_byte};

/// CSV writing options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvWriteOptions {
    pub separator: char,
    /// End records with `\r\n` instead of `\n`
    pub use_crlf: bool,
}

impl Default for CsvWriteOptions {
    fn default() -> Self {
        Self {
            separator: ',',
            use_crlf: false,
        }
    }
}

/// Write a frame as CSV: a header of column names, then one record per row.
///
/// Missing markers are written as empty fields. A frame without columns
/// writes nothing.
pub fn write_csv<W, V>(writer: W, frame: &V, options: &CsvWriteOptions) -> Result<()>
where
    W: Write,
    V: DataView + ?Sized,
{
    let terminator = if options.use_crlf {
        Terminator::CRLF
    } else {
        Terminator::Any(b'\n')
    };
    let mut writer = WriterBuilder::new()
        .delimiter(separator_byte(options.separator)?)
        .terminator(terminator)
        .from_writer(writer);

    let (nrows, ncols) = frame.shape();
    if ncols == 0 {
        return Ok(());
    }

    writer.write_record(frame.column_names())?;
    for row in 0..nrows {
        let record = (0..ncols)
            .map(|col| field(frame, row, col))
            .collect::<Option<Vec<String>>>()
            .ok_or(DataError::IndexOutOfBounds {
                index: row,
                len: nrows,
            })?;
        writer.write_record(&record)?;
    }
    writer.flush()?;

    log::debug!("wrote csv: {} rows × {} cols", nrows, ncols);
    Ok(())
}

fn field<V: DataView + ?Sized>(frame: &V, row: usize, col: usize) -> Option<String> {
    match frame.cell_value(row, col)? {
        SeriesValue::Null => Some(String::new()),
        _ => frame.cell_text(row, col),
    }
}

/// Write a frame to a CSV file, creating or truncating it
pub fn write_csv_path<P, V>(path: P, frame: &V, options: &CsvWriteOptions) -> Result<()>
where
    P: AsRef<Path>,
    V: DataView + ?Sized,
{
    let path = path.as_ref();
    log::debug!("writing csv to {}", path.display());
    let mut file = BufWriter::new(File::create(path)?);
    write_csv(&mut file, frame, options)?;
    file.flush()?;
    Ok(())
}

/// Render a frame as CSV text
pub fn write_csv_string<V: DataView + ?Sized>(frame: &V, options: &CsvWriteOptions) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, frame, options)?;
    Ok(String::from_utf8(buf)?)
}
