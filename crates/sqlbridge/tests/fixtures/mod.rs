//! Mock collaborators shared by the adapter integration tests.
//!
//! `MockCursor` scripts per-column accessor behavior: an accessor that was
//! not configured for a column fails with a driver error, which is exactly
//! how partial driver implementations behave. `MockStatement` records every
//! bind it receives.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{self, Read};

use sqlbridge::{
    Blob, ByteStream, CharStream, Clob, Cursor, DriverError, DriverErrorKind, Error, Result,
    Statement, StreamSource, Value, WireType,
};

pub fn access_denied(what: &str) -> Error {
    Error::Driver(DriverError::new(
        DriverErrorKind::ColumnAccess,
        format!("{what} accessor not supported"),
    ))
}

pub fn bind_rejected(what: &str) -> Error {
    Error::Driver(DriverError::new(
        DriverErrorKind::ParameterBind,
        format!("{what} bind rejected"),
    ))
}

/// Scripted behavior for one column of a `MockCursor`.
#[derive(Default)]
pub struct ColumnFixture {
    pub value: Option<Value>,
    pub timestamp: Option<Option<i64>>,
    pub time: Option<Option<i64>>,
    pub blob: Option<Option<Blob>>,
    pub clob: Option<Option<Clob>>,
    pub clob_fails: bool,
    pub string: Option<Option<String>>,
    pub string_fails: bool,
    pub bytes: Option<Option<Vec<u8>>>,
    pub bytes_fails: bool,
    pub binary_stream: Option<Option<ByteStream>>,
    pub character_stream: Option<Option<CharStream>>,
}

#[derive(Default)]
pub struct MockCursor {
    columns: HashMap<usize, ColumnFixture>,
}

impl MockCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column(mut self, index: usize, fixture: ColumnFixture) -> Self {
        self.columns.insert(index, fixture);
        self
    }

    fn column(&self, index: usize, what: &str) -> Result<&ColumnFixture> {
        self.columns.get(&index).ok_or_else(|| access_denied(what))
    }
}

impl Cursor for MockCursor {
    fn value(&mut self, index: usize) -> Result<Value> {
        self.column(index, "generic")?
            .value
            .clone()
            .ok_or_else(|| access_denied("generic"))
    }

    fn timestamp(&mut self, index: usize) -> Result<Option<i64>> {
        self.column(index, "timestamp")?
            .timestamp
            .ok_or_else(|| access_denied("timestamp"))
    }

    fn time(&mut self, index: usize) -> Result<Option<i64>> {
        self.column(index, "time")?
            .time
            .ok_or_else(|| access_denied("time"))
    }

    fn blob(&mut self, index: usize) -> Result<Option<Blob>> {
        self.column(index, "blob")?
            .blob
            .clone()
            .ok_or_else(|| access_denied("blob"))
    }

    fn clob(&mut self, index: usize) -> Result<Option<Clob>> {
        let column = self.column(index, "clob")?;
        if column.clob_fails {
            return Err(access_denied("clob"));
        }
        column.clob.clone().ok_or_else(|| access_denied("clob"))
    }

    fn binary_stream(&mut self, index: usize) -> Result<Option<ByteStream>> {
        self.column(index, "binary stream")?
            .binary_stream
            .clone()
            .ok_or_else(|| access_denied("binary stream"))
    }

    fn character_stream(&mut self, index: usize) -> Result<Option<CharStream>> {
        self.column(index, "character stream")?
            .character_stream
            .clone()
            .ok_or_else(|| access_denied("character stream"))
    }

    fn string(&mut self, index: usize) -> Result<Option<String>> {
        let column = self.column(index, "string")?;
        if column.string_fails {
            return Err(access_denied("string"));
        }
        column.string.clone().ok_or_else(|| access_denied("string"))
    }

    fn bytes(&mut self, index: usize) -> Result<Option<Vec<u8>>> {
        let column = self.column(index, "bytes")?;
        if column.bytes_fails {
            return Err(access_denied("bytes"));
        }
        column.bytes.clone().ok_or_else(|| access_denied("bytes"))
    }
}

/// Everything a `MockStatement` was asked to bind, in order.
#[derive(Debug, PartialEq)]
pub enum Bind {
    Value(usize, Value),
    Null(usize, WireType),
    BinaryStream {
        index: usize,
        stream: ByteStream,
        len: u64,
    },
    CharacterStream {
        index: usize,
        stream: CharStream,
        len: u64,
    },
    Date(usize, i32),
    Time(usize, i64),
    Timestamp(usize, i64),
    ZonedTimestamp {
        index: usize,
        micros: i64,
        offset_secs: i32,
    },
}

#[derive(Default)]
pub struct MockStatement {
    pub binds: Vec<Bind>,
    /// Reject every generic bind, as drivers that need typed NULLs do.
    pub reject_generic: bool,
    /// Reject typed NULL binds as well.
    pub reject_null: bool,
}

impl MockStatement {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Statement for MockStatement {
    fn bind_value(&mut self, index: usize, value: &Value) -> Result<()> {
        if self.reject_generic {
            return Err(bind_rejected("generic"));
        }
        self.binds.push(Bind::Value(index, value.clone()));
        Ok(())
    }

    fn bind_null(&mut self, index: usize, wire_type: WireType) -> Result<()> {
        if self.reject_null {
            return Err(bind_rejected("null"));
        }
        self.binds.push(Bind::Null(index, wire_type));
        Ok(())
    }

    fn bind_binary_stream(&mut self, index: usize, stream: ByteStream, len: u64) -> Result<()> {
        self.binds.push(Bind::BinaryStream { index, stream, len });
        Ok(())
    }

    fn bind_character_stream(&mut self, index: usize, stream: CharStream, len: u64) -> Result<()> {
        self.binds
            .push(Bind::CharacterStream { index, stream, len });
        Ok(())
    }

    fn bind_date(&mut self, index: usize, days: i32) -> Result<()> {
        self.binds.push(Bind::Date(index, days));
        Ok(())
    }

    fn bind_time(&mut self, index: usize, micros: i64) -> Result<()> {
        self.binds.push(Bind::Time(index, micros));
        Ok(())
    }

    fn bind_timestamp(&mut self, index: usize, micros: i64) -> Result<()> {
        self.binds.push(Bind::Timestamp(index, micros));
        Ok(())
    }

    fn bind_zoned_timestamp(&mut self, index: usize, micros: i64, offset_secs: i32) -> Result<()> {
        self.binds.push(Bind::ZonedTimestamp {
            index,
            micros,
            offset_secs,
        });
        Ok(())
    }
}

/// A stream source whose close always fails, for release-suppression tests.
pub struct FailingCloseSource(pub io::Cursor<Vec<u8>>);

impl Read for FailingCloseSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl StreamSource for FailingCloseSource {
    fn close(&mut self) -> io::Result<()> {
        Err(io::Error::other("close failed"))
    }
}
