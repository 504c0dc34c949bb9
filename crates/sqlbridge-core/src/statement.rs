//! The write-side collaborator contract.

use crate::error::Result;
use crate::lob::{ByteStream, CharStream};
use crate::value::Value;
use crate::wire::WireType;

/// A prepared statement accepting parameter binds, as exposed by a driver.
///
/// Binds are side effects on the statement; execution happens in the
/// surrounding layer. Parameter indices are 0-based.
pub trait Statement {
    /// Generic bind: the driver picks the representation for `value`.
    fn bind_value(&mut self, index: usize, value: &Value) -> Result<()>;

    /// Bind an explicitly typed NULL. Some drivers reject an untyped one.
    fn bind_null(&mut self, index: usize, wire_type: WireType) -> Result<()>;

    /// Bind binary content streamed from `stream`, `len` bytes long.
    fn bind_binary_stream(&mut self, index: usize, stream: ByteStream, len: u64) -> Result<()>;

    /// Bind character content streamed from `stream`, `len` characters long.
    fn bind_character_stream(&mut self, index: usize, stream: CharStream, len: u64) -> Result<()>;

    /// Bind a date (days since epoch).
    fn bind_date(&mut self, index: usize, days: i32) -> Result<()>;

    /// Bind a time of day (microseconds since midnight).
    fn bind_time(&mut self, index: usize, micros: i64) -> Result<()>;

    /// Bind a timestamp (microseconds since epoch).
    fn bind_timestamp(&mut self, index: usize, micros: i64) -> Result<()>;

    /// Bind a timestamp together with its calendar's UTC offset.
    fn bind_zoned_timestamp(&mut self, index: usize, micros: i64, offset_secs: i32) -> Result<()>;
}
