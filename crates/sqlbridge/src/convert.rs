//! Bidirectional conversion between wire-typed driver values and native
//! values.
//!
//! Configuration by exception is the general philosophy here: most values
//! pass straight through the driver's generic accessor/binder, and custom
//! handling exists only where drivers are known to get it wrong (temporal
//! precision, large objects, NULL binds).

use sqlbridge_core::cursor::Cursor;
use sqlbridge_core::error::{Error, Result};
use sqlbridge_core::lob::{Blob, ByteStream, CharStream, Clob, LobFactory, MemoryLobs, Resource};
use sqlbridge_core::statement::Statement;
use sqlbridge_core::value::Value;
use sqlbridge_core::wire::WireType;

use crate::hook::ConversionHook;
use crate::quirks::{QuirkProfile, QuirkRegistry};

/// Converts result-set columns and statement parameters, tracking every
/// streaming resource opened along the way.
///
/// One converter is scoped to a statement-execution unit. The caller reads
/// columns and/or binds parameters, then signals scope end with
/// [`release_resources`](Self::release_resources); after that the converter
/// can be reused for the next unit.
pub struct TypeConverter {
    quirks: QuirkProfile,
    lobs: Box<dyn LobFactory>,
    hook: Option<Box<dyn ConversionHook>>,
    // Streaming resources tracked for the current scope. Lazily allocated;
    // drained (not dropped) on release so reuse does not reallocate.
    resources: Option<Vec<Box<dyn Resource>>>,
}

impl TypeConverter {
    /// A converter with the given quirk profile and the in-memory lob
    /// factory.
    pub fn new(quirks: QuirkProfile) -> Self {
        Self {
            quirks,
            lobs: Box::new(MemoryLobs),
            hook: None,
            resources: None,
        }
    }

    /// A converter for the named driver, resolving its quirk profile from
    /// `registry` once, up front.
    pub fn for_driver(registry: &QuirkRegistry, driver_id: &str) -> Self {
        Self::new(registry.resolve(driver_id))
    }

    /// Replace the large-object factory.
    pub fn with_lob_factory(mut self, lobs: Box<dyn LobFactory>) -> Self {
        self.lobs = lobs;
        self
    }

    /// Install a vendor conversion hook, consulted before every default
    /// branch.
    pub fn with_hook(mut self, hook: Box<dyn ConversionHook>) -> Self {
        self.hook = Some(hook);
        self
    }

    /// The quirk profile this converter was built with.
    pub fn quirks(&self) -> &QuirkProfile {
        &self.quirks
    }

    /// Number of streaming resources awaiting release in the current scope.
    pub fn tracked_count(&self) -> usize {
        self.resources.as_ref().map_or(0, Vec::len)
    }

    /// Read the column at `index` according to its declared `wire_type`.
    pub fn read(
        &mut self,
        cursor: &mut dyn Cursor,
        index: usize,
        wire_type: WireType,
    ) -> Result<Value> {
        if let Some(hook) = self.hook.as_deref() {
            if let Some(result) = hook.read_column(cursor, index, wire_type) {
                return result;
            }
        }
        match wire_type {
            // For date/timestamp use the timestamp accessor to keep
            // time-of-day where the driver stores it under a DATE tag.
            WireType::Date | WireType::Timestamp => {
                Ok(match cursor.timestamp(index)? {
                    Some(micros) => Value::Timestamp(micros),
                    None => Value::Null,
                })
            }
            WireType::Time => Ok(match cursor.time(index)? {
                Some(micros) => Value::Time(micros),
                None => Value::Null,
            }),
            WireType::Blob => Ok(match cursor.blob(index)? {
                Some(blob) => Value::Blob(blob),
                None => Value::Null,
            }),
            WireType::Clob => self.read_clob(cursor, index),
            WireType::LongVarBinary => match cursor.binary_stream(index)? {
                Some(stream) => Ok(Value::Blob(self.to_blob(stream))),
                None => Ok(Value::Null),
            },
            WireType::LongVarChar => match cursor.character_stream(index)? {
                Some(stream) => Ok(Value::Clob(self.to_clob(stream))),
                None => Ok(Value::Null),
            },
            WireType::Char
            | WireType::VarChar
            | WireType::Numeric
            | WireType::Decimal
            | WireType::Bit
            | WireType::TinyInt
            | WireType::SmallInt
            | WireType::Integer
            | WireType::BigInt
            | WireType::Real
            | WireType::Float
            | WireType::Double
            | WireType::Binary
            | WireType::VarBinary => cursor.value(index),
            WireType::NChar | WireType::NVarChar | WireType::NClob | WireType::Other(_) => {
                if self.quirks.bridge_fallbacks {
                    self.read_bridge(cursor, index, wire_type)
                } else {
                    cursor.value(index)
                }
            }
        }
    }

    /// Bind `value` as the parameter at `index`, dispatching on its
    /// runtime variant. First matching case wins.
    pub fn write(
        &mut self,
        statement: &mut dyn Statement,
        index: usize,
        value: &Value,
    ) -> Result<()> {
        if let Some(hook) = self.hook.as_deref() {
            if let Some(result) = hook.bind_param(statement, index, value) {
                return result;
            }
        }
        match value {
            // Unreliable native Clob binding: trade memory for correctness
            // by binding the full content as text.
            Value::Clob(clob) if self.quirks.clob_bind_as_text => {
                let text = clob.read_all()?;
                statement.bind_value(index, &Value::Text(text))
            }
            Value::BinaryStream(stream) => {
                let blob = self.to_blob(stream.clone());
                self.bind_blob(statement, index, &blob)
            }
            Value::CharacterStream(stream) => {
                let clob = self.to_clob(stream.clone());
                self.bind_clob(statement, index, &clob)
            }
            Value::Blob(blob) => self.bind_blob(statement, index, blob),
            Value::Clob(clob) => self.bind_clob(statement, index, clob),
            Value::ZonedTimestamp { micros, offset_secs } => {
                statement.bind_zoned_timestamp(index, *micros, *offset_secs)
            }
            Value::Date(days) => statement.bind_date(index, *days),
            Value::Time(micros) => statement.bind_time(index, *micros),
            Value::Timestamp(micros) => statement.bind_timestamp(index, *micros),
            other => match statement.bind_value(index, other) {
                Ok(()) => Ok(()),
                // Some drivers require the type of a NULL parameter.
                Err(err) if other.is_null() => {
                    tracing::debug!(
                        index,
                        error = %err,
                        wire_type = ?self.quirks.null_bind_type,
                        "untyped null bind rejected; retrying as typed null"
                    );
                    statement.bind_null(index, self.quirks.null_bind_type)
                }
                Err(err) => Err(err),
            },
        }
    }

    /// Release every streaming resource tracked during the current scope.
    ///
    /// Close failures are logged and suppressed: a failed close must not
    /// mask the outcome of the operation that opened the resource. Safe to
    /// call with nothing tracked, and idempotent.
    pub fn release_resources(&mut self) {
        if let Some(resources) = self.resources.as_mut() {
            for resource in resources.drain(..) {
                if let Err(err) = resource.close() {
                    tracing::warn!(error = %err, "failed to close streaming resource");
                }
            }
        }
    }

    fn read_clob(&mut self, cursor: &mut dyn Cursor, index: usize) -> Result<Value> {
        match cursor.clob(index) {
            Ok(Some(clob)) => Ok(Value::Clob(clob)),
            Ok(None) => Ok(Value::Null),
            // Some drivers expose CLOB-tagged columns only through the
            // string accessor.
            Err(Error::Driver(err)) => {
                tracing::debug!(
                    index,
                    error = %err,
                    "clob accessor failed; falling back to string read"
                );
                Ok(match cursor.string(index)? {
                    Some(text) => Value::Text(text),
                    None => Value::Null,
                })
            }
            Err(other) => Err(other),
        }
    }

    /// Legacy-bridge read ladder for tags the main dispatch does not cover.
    fn read_bridge(
        &mut self,
        cursor: &mut dyn Cursor,
        index: usize,
        wire_type: WireType,
    ) -> Result<Value> {
        match wire_type {
            WireType::NChar | WireType::NVarChar => match cursor.string(index) {
                Ok(Some(text)) => Ok(Value::Text(text)),
                Ok(None) => Ok(Value::Null),
                Err(Error::Driver(_)) => match cursor.bytes(index) {
                    Ok(Some(bytes)) => Ok(Value::Bytes(bytes)),
                    Ok(None) => Ok(Value::Null),
                    Err(Error::Driver(_)) => Ok(Value::Null),
                    Err(other) => Err(other),
                },
                Err(other) => Err(other),
            },
            WireType::NClob => self.read_clob(cursor, index),
            _ => Ok(match cursor.string(index)? {
                Some(text) => Value::Text(text),
                None => Value::Null,
            }),
        }
    }

    // Length first: on a stream-backed handle with no declared length it
    // materializes the content, and only then can a readable stream be
    // extracted for the bind.
    fn bind_blob(
        &mut self,
        statement: &mut dyn Statement,
        index: usize,
        blob: &Blob,
    ) -> Result<()> {
        let len = blob.length()?;
        let stream = blob.binary_stream()?;
        statement.bind_binary_stream(index, stream.clone(), len)?;
        self.track(Box::new(stream));
        Ok(())
    }

    fn bind_clob(
        &mut self,
        statement: &mut dyn Statement,
        index: usize,
        clob: &Clob,
    ) -> Result<()> {
        let len = clob.length()?;
        let stream = clob.character_stream()?;
        statement.bind_character_stream(index, stream.clone(), len)?;
        self.track(Box::new(stream));
        Ok(())
    }

    fn to_blob(&mut self, stream: ByteStream) -> Blob {
        let blob = self.lobs.blob(stream);
        self.track(Box::new(blob.clone()));
        blob
    }

    fn to_clob(&mut self, stream: CharStream) -> Clob {
        let clob = self.lobs.clob(stream);
        self.track(Box::new(clob.clone()));
        clob
    }

    fn track(&mut self, resource: Box<dyn Resource>) {
        self.resources.get_or_insert_with(Vec::new).push(resource);
    }
}

impl Default for TypeConverter {
    fn default() -> Self {
        Self::new(QuirkProfile::default())
    }
}

impl std::fmt::Debug for TypeConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeConverter")
            .field("quirks", &self.quirks)
            .field("tracked", &self.tracked_count())
            .finish()
    }
}
