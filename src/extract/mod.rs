//! Record decoding for delimited sales input
//!
//! Parses untrusted tabular input (delimited text with a header row) into
//! a sequence of untyped [`RawRow`]s. Decoding is all-or-nothing: any
//! structural problem aborts before anything reaches the later stages.

mod error;
mod reader;

pub use error::DecodeError;
pub use reader::{CsvDecoder, REQUIRED_COLUMNS, RawRow};
