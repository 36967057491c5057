//! ColFrame core: typed series, data frames, location selectors and type
//! inference from raw text.
//!
//! ```
//! use cf_core::data::{SeriesValue, read_map};
//!
//! let df = read_map(vec![
//!     ("id", vec!["1", "2", "3"]),
//!     ("score", vec!["1.5", "", "3"]),
//! ])
//! .unwrap();
//!
//! assert_eq!(df.shape(), (3, 2));
//! assert_eq!(df.val(0, "id").unwrap(), &SeriesValue::Int(1));
//! let sub = df.location("1:", ":").unwrap();
//! assert_eq!(sub.shape(), (2, 2));
//! ```

pub mod data;
pub mod error;

pub use data::{DataError, DataFrame, Series, SeriesValue};
pub use error::ColFrameError;
