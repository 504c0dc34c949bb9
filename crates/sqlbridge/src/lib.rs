//! sqlbridge - driver-tolerant conversion between SQL wire types and
//! native values.
//!
//! The nominal protocol contract says "read by declared type, the driver
//! returns a value". Real drivers misreport types, fail on the first
//! access attempt, or downgrade large-object handles to other
//! representations. This crate sits between a generic relational access
//! layer and the driver and provides:
//!
//! - a column reader with a deterministic fallback ordering per wire type
//! - a parameter writer dispatching on the runtime variant of the value
//! - scope-bound tracking and release of every streaming resource opened
//!   while materializing large objects
//!
//! # Example
//!
//! ```ignore
//! use sqlbridge::{QuirkRegistry, TypeConverter, WireType};
//!
//! let registry = QuirkRegistry::builtin();
//! let mut converter = TypeConverter::for_driver(&registry, "sqlite");
//!
//! // once per column while looping a result set
//! let value = converter.read(&mut cursor, 0, WireType::Clob)?;
//!
//! // once per parameter before executing a statement
//! converter.write(&mut statement, 0, &value)?;
//!
//! // end of row / end of execution unit
//! converter.release_resources();
//! ```

pub mod convert;
pub mod hook;
pub mod quirks;

pub use convert::TypeConverter;
pub use hook::ConversionHook;
pub use quirks::{QuirkProfile, QuirkRegistry};

// Re-export the core vocabulary so adapter users need a single crate.
pub use sqlbridge_core::{
    Blob, ByteStream, CharStream, Clob, ConfigError, Cursor, DriverError, DriverErrorKind, Error,
    LobFactory, MemoryLobs, Resource, Result, Statement, StreamSource, TypeError, Value, WireType,
};
