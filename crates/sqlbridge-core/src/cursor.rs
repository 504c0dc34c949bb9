//! The read-side collaborator contract.

use crate::error::Result;
use crate::lob::{Blob, ByteStream, CharStream, Clob};
use crate::value::Value;

/// A positioned result cursor as exposed by a driver.
///
/// One accessor per representation the conversion layer may ask for.
/// Every accessor may fail with a driver-reported access error; real
/// drivers routinely support only a subset of these, which is exactly the
/// unreliability the conversion layer papers over. Absent (NULL) values
/// read as `None`, except for the generic accessor which reads them as
/// [`Value::Null`].
///
/// Column indices are 0-based.
pub trait Cursor {
    /// Generic value accessor: the driver's own best-effort representation.
    fn value(&mut self, index: usize) -> Result<Value>;

    /// Timestamp accessor (microseconds since epoch), keeping time-of-day.
    fn timestamp(&mut self, index: usize) -> Result<Option<i64>>;

    /// Time-of-day accessor (microseconds since midnight).
    fn time(&mut self, index: usize) -> Result<Option<i64>>;

    /// Native binary large-object handle.
    fn blob(&mut self, index: usize) -> Result<Option<Blob>>;

    /// Native character large-object handle.
    fn clob(&mut self, index: usize) -> Result<Option<Clob>>;

    /// Raw binary stream over the column content.
    fn binary_stream(&mut self, index: usize) -> Result<Option<ByteStream>>;

    /// Raw character stream over the column content.
    fn character_stream(&mut self, index: usize) -> Result<Option<CharStream>>;

    /// String accessor.
    fn string(&mut self, index: usize) -> Result<Option<String>>;

    /// Raw bytes accessor.
    fn bytes(&mut self, index: usize) -> Result<Option<Vec<u8>>>;
}
