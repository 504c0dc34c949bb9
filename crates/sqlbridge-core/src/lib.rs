//! Core types and collaborator traits for sqlbridge.
//!
//! This crate provides the foundational abstractions the conversion
//! adapter is built on:
//!
//! - `Value` dynamic native value union
//! - `WireType` protocol-level type tags
//! - `Blob`/`Clob` large-object handles and their streaming resources
//! - `Cursor` / `Statement` collaborator contracts
//! - `LobFactory` for driver-supplied large-object handles

pub mod cursor;
pub mod error;
pub mod lob;
pub mod statement;
pub mod value;
pub mod wire;

pub use cursor::Cursor;
pub use error::{ConfigError, DriverError, DriverErrorKind, Error, Result, TypeError};
pub use lob::{Blob, ByteStream, CharStream, Clob, LobFactory, MemoryLobs, Resource, StreamSource};
pub use statement::Statement;
pub use value::Value;
pub use wire::WireType;
