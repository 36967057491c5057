//! CSV reading and writing for ColFrame data frames
//!
//! Reading buffers the whole input, splits it into records with the `csv`
//! crate and hands the column-major text to
//! [`cf_core::data::read_columns_with`], so every column goes through the
//! same type inference as in-memory text. Writing stringifies cells through
//! [`cf_core::data::DataView`] and accepts a frame of any element type.

pub mod error;
pub mod read;
pub mod write;


pub use error::IoError;
pub use read::{CsvReadOptions, read_csv, read_csv_path, read_csv_str};
pub use write::{CsvWriteOptions, write_csv, write_csv_path, write_csv_string};

/// Result type for CSV operations
pub type Result<T> = std::result::Result<T, IoError>;

// The csv crate only takes single-byte delimiters.
pub(crate) fn separator_byte(separator: char) -> Result<u8> {
    u8::try_from(separator)
        .ok()
        .filter(u8::is_ascii)
        .ok_or(IoError::InvalidSeparator(separator))
}
