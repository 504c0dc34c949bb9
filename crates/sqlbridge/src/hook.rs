//! Vendor conversion overrides.

use sqlbridge_core::cursor::Cursor;
use sqlbridge_core::error::Result;
use sqlbridge_core::statement::Statement;
use sqlbridge_core::value::Value;
use sqlbridge_core::wire::WireType;

/// An injected strategy consulted before every default conversion branch.
///
/// Vendor adapters that need to take over specific conversions implement
/// this trait and install it on the adapter at construction time. Each
/// method returns `Some(result)` to short-circuit the default dispatch, or
/// `None` to decline and leave the default branch in control.
pub trait ConversionHook {
    /// Take over reading one column, or decline.
    fn read_column(
        &self,
        cursor: &mut dyn Cursor,
        index: usize,
        wire_type: WireType,
    ) -> Option<Result<Value>> {
        let _ = (cursor, index, wire_type);
        None
    }

    /// Take over binding one parameter, or decline.
    fn bind_param(
        &self,
        statement: &mut dyn Statement,
        index: usize,
        value: &Value,
    ) -> Option<Result<()>> {
        let _ = (statement, index, value);
        None
    }
}
