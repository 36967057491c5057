//! CSV reader

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use cf_core::data::{DataFrame, InferConfig, SeriesValue, read_columns_with};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

use crate::{IoError, Result, separator_byte};

/// CSV reading options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvReadOptions {
    /// Field separator; must be a single-byte ASCII character
    pub separator: char,
    /// Treat the first record as data and name columns by position
    pub no_header: bool,
    /// Skip whitespace at the start of every field. A quote following the
    /// whitespace still opens a quoted field.
    pub trim_leading_space: bool,
    /// Reject quotes inside unquoted fields and stray quotes inside quoted
    /// fields. Otherwise such quotes are kept as text.
    pub always_quotes: bool,
    pub infer: InferConfig,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            separator: ',',
            no_header: false,
            trim_leading_space: false,
            always_quotes: false,
            infer: InferConfig::default(),
        }
    }
}

/// Read a CSV stream into a dynamic frame.
///
/// The whole stream is buffered before parsing. Input that is not UTF-8
/// fails with [`IoError::Utf8`].
pub fn read_csv<R: Read>(mut reader: R, options: &CsvReadOptions) -> Result<DataFrame<SeriesValue>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let input = String::from_utf8(bytes)?;
    read_csv_str(&input, options)
}

/// Read a CSV file into a dynamic frame
pub fn read_csv_path<P: AsRef<Path>>(
    path: P,
    options: &CsvReadOptions,
) -> Result<DataFrame<SeriesValue>> {
    let path = path.as_ref();
    log::debug!("reading csv from {}", path.display());
    read_csv(BufReader::new(File::open(path)?), options)
}

/// Read CSV text into a dynamic frame.
///
/// Every record must have as many fields as the first one. Empty input
/// yields an empty frame.
pub fn read_csv_str(input: &str, options: &CsvReadOptions) -> Result<DataFrame<SeriesValue>> {
    let separator = separator_byte(options.separator)?;
    if options.always_quotes {
        check_quotes(input, options.separator, options.trim_leading_space)?;
    }

    let input = if options.trim_leading_space {
        Cow::Owned(strip_leading_space(input, options.separator))
    } else {
        Cow::Borrowed(input)
    };

    let mut reader = ReaderBuilder::new()
        .delimiter(separator)
        .has_headers(false)
        .flexible(true)
        .from_reader(input.as_bytes());

    let mut columns: Vec<Vec<String>> = Vec::new();
    for (n, record) in reader.records().enumerate() {
        let record = record?;
        if n == 0 {
            columns = vec![Vec::new(); record.len()];
        } else if record.len() != columns.len() {
            return Err(IoError::RaggedRow {
                line: record.position().map_or(n as u64 + 1, |p| p.line()),
                expected: columns.len(),
                actual: record.len(),
            });
        }

        for (column, field) in columns.iter_mut().zip(record.iter()) {
            column.push(field.to_string());
        }
    }

    if columns.is_empty() {
        log::debug!("csv input is empty");
        return Ok(DataFrame::empty());
    }

    let df = read_columns_with(&columns, !options.no_header, &options.infer)?;
    log::debug!("read csv: {} rows × {} cols", df.nrows(), df.ncols());
    Ok(df)
}

// Whitespace that may be skipped at a field start
fn is_blank(c: char, separator: char) -> bool {
    c.is_whitespace() && c != '\n' && c != '\r' && c != separator
}

// Drop blanks at field starts outside quoted fields, so the parser sees a
// quote right after the separator.
fn strip_leading_space(input: &str, separator: char) -> String {
    let mut out = String::with_capacity(input.len());
    let mut field_start = true;
    let mut quoted = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if quoted {
            out.push(c);
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    out.push('"');
                } else {
                    quoted = false;
                }
            }
            continue;
        }

        if field_start && is_blank(c, separator) {
            continue;
        }
        quoted = field_start && c == '"';
        field_start = c == separator || c == '\n' || c == '\r';
        out.push(c);
    }
    out
}

// Strict quoting: a quote may only open a field, and inside a quoted field
// a quote must be doubled or close the field.
fn check_quotes(input: &str, separator: char, skip_leading_space: bool) -> Result<()> {
    let mut line = 1u64;
    let mut field_start = true;
    let mut quoted = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if quoted {
            match c {
                '"' => match chars.peek() {
                    Some('"') => {
                        chars.next();
                    }
                    Some(&next) if next != separator && next != '\n' && next != '\r' => {
                        return Err(IoError::Quote { line });
                    }
                    _ => quoted = false,
                },
                '\n' => line += 1,
                _ => {}
            }
            continue;
        }

        match c {
            '"' if field_start => {
                quoted = true;
                field_start = false;
            }
            '"' => return Err(IoError::Quote { line }),
            '\n' => {
                line += 1;
                field_start = true;
            }
            c if field_start && skip_leading_space && is_blank(c, separator) => {}
            c if c == separator => field_start = true,
            _ => field_start = false,
        }
    }

    if quoted {
        return Err(IoError::Quote { line });
    }
    Ok(())
}
