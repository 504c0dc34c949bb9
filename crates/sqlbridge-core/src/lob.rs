//! Large-object handles and the streaming resources behind them.
//!
//! `Blob` and `Clob` are owned handles over binary/character large-object
//! content, backed either by in-memory content or by a not-yet-consumed
//! stream. `ByteStream` and `CharStream` are shareable handles over a raw
//! driver stream with close-once semantics: the adapter keeps a clone for
//! scope-end release while the statement holds another for deferred reads.
//!
//! Closing is deliberately separate from dropping so release failures can be
//! observed and logged instead of vanishing in a destructor.

use std::fmt;
use std::io::{self, Read};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{Error, Result, TypeError};

/// A closeable handle accumulated by a conversion scope.
///
/// Implementations must tolerate repeated closes: the first call releases
/// the underlying handle, later calls are no-ops.
pub trait Resource {
    fn close(&self) -> io::Result<()>;
}

/// Source of raw stream data.
///
/// `close` defaults to a no-op for sources with nothing to release
/// (in-memory buffers); driver-backed sources override it.
pub trait StreamSource: Read + Send {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl StreamSource for io::Cursor<Vec<u8>> {}

struct ReaderSource<R>(R);

impl<R: Read + Send> Read for ReaderSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl<R: Read + Send> StreamSource for ReaderSource<R> {}

struct StreamState {
    source: Option<Box<dyn StreamSource>>,
}

/// Shared close-once stream state behind `ByteStream` and `CharStream`.
#[derive(Clone)]
struct SharedStream {
    state: Arc<Mutex<StreamState>>,
    declared_len: Option<u64>,
}

impl SharedStream {
    fn new(source: Box<dyn StreamSource>, declared_len: Option<u64>) -> Self {
        Self {
            state: Arc::new(Mutex::new(StreamState {
                source: Some(source),
            })),
            declared_len,
        }
    }

    fn lock(&self) -> MutexGuard<'_, StreamState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drain the remaining stream content. The source stays in place so a
    /// later `close` still reaches the driver-side handle.
    fn read_all(&self) -> io::Result<Vec<u8>> {
        let mut state = self.lock();
        let Some(source) = state.source.as_mut() else {
            return Err(io::Error::other("stream handle already closed"));
        };
        let mut buf = Vec::new();
        source.read_to_end(&mut buf)?;
        Ok(buf)
    }

    fn close(&self) -> io::Result<()> {
        let mut state = self.lock();
        match state.source.take() {
            Some(mut source) => source.close(),
            None => Ok(()),
        }
    }

    fn is_closed(&self) -> bool {
        self.lock().source.is_none()
    }

    fn same_handle(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

/// An owned handle over a raw binary stream.
#[derive(Clone)]
pub struct ByteStream {
    inner: SharedStream,
}

impl ByteStream {
    /// Wrap a stream source with no declared length.
    pub fn new(source: Box<dyn StreamSource>) -> Self {
        Self {
            inner: SharedStream::new(source, None),
        }
    }

    /// Wrap a stream source whose total length in bytes is known up front.
    pub fn with_len(source: Box<dyn StreamSource>, len: u64) -> Self {
        Self {
            inner: SharedStream::new(source, Some(len)),
        }
    }

    /// Wrap any reader. The resulting stream has a no-op close.
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self::new(Box::new(ReaderSource(reader)))
    }

    /// An in-memory stream over the given bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let len = bytes.len() as u64;
        Self {
            inner: SharedStream::new(Box::new(io::Cursor::new(bytes)), Some(len)),
        }
    }

    /// Length in bytes declared when the stream was created, if any.
    pub fn declared_len(&self) -> Option<u64> {
        self.inner.declared_len
    }

    /// Drain the remaining stream content into memory.
    pub fn read_all(&self) -> Result<Vec<u8>> {
        self.inner.read_all().map_err(Error::Io)
    }

    /// Release the underlying source. No-op if already closed.
    pub fn close(&self) -> io::Result<()> {
        self.inner.close()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}

impl Resource for ByteStream {
    fn close(&self) -> io::Result<()> {
        ByteStream::close(self)
    }
}

/// Handle identity, not content equality: two clones of the same stream
/// compare equal, two streams over identical bytes do not.
impl PartialEq for ByteStream {
    fn eq(&self, other: &Self) -> bool {
        self.inner.same_handle(&other.inner)
    }
}

impl fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteStream")
            .field("declared_len", &self.declared_len())
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// An owned handle over a raw character stream (UTF-8 encoded).
#[derive(Clone)]
pub struct CharStream {
    inner: SharedStream,
}

impl CharStream {
    /// Wrap a stream source with no declared length.
    pub fn new(source: Box<dyn StreamSource>) -> Self {
        Self {
            inner: SharedStream::new(source, None),
        }
    }

    /// Wrap a stream source whose total length in characters is known.
    pub fn with_len(source: Box<dyn StreamSource>, len: u64) -> Self {
        Self {
            inner: SharedStream::new(source, Some(len)),
        }
    }

    /// Wrap any reader yielding UTF-8 bytes.
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self::new(Box::new(ReaderSource(reader)))
    }

    /// An in-memory stream over the given text.
    pub fn from_string(text: String) -> Self {
        let len = text.chars().count() as u64;
        Self {
            inner: SharedStream::new(Box::new(io::Cursor::new(text.into_bytes())), Some(len)),
        }
    }

    /// Length in characters declared when the stream was created, if any.
    pub fn declared_len(&self) -> Option<u64> {
        self.inner.declared_len
    }

    /// Drain the remaining stream content into a string.
    pub fn read_all(&self) -> Result<String> {
        let bytes = self.inner.read_all().map_err(Error::Io)?;
        String::from_utf8(bytes).map_err(|_| {
            Error::Type(TypeError {
                expected: "UTF-8 character data",
                actual: "invalid UTF-8 byte sequence".to_string(),
                column: None,
            })
        })
    }

    /// Release the underlying source. No-op if already closed.
    pub fn close(&self) -> io::Result<()> {
        self.inner.close()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}

impl Resource for CharStream {
    fn close(&self) -> io::Result<()> {
        CharStream::close(self)
    }
}

impl PartialEq for CharStream {
    fn eq(&self, other: &Self) -> bool {
        self.inner.same_handle(&other.inner)
    }
}

impl fmt::Debug for CharStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharStream")
            .field("declared_len", &self.declared_len())
            .field("closed", &self.is_closed())
            .finish()
    }
}

struct BlobInner {
    stream: Option<ByteStream>,
    bytes: Option<Vec<u8>>,
}

/// An owned binary large-object handle.
///
/// Bytes-backed or stream-backed; stream-backed content is materialized
/// lazily and cached, so `length()` on a stream with no declared length
/// consumes the stream once.
#[derive(Clone)]
pub struct Blob {
    inner: Arc<Mutex<BlobInner>>,
}

impl Blob {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(BlobInner {
                stream: None,
                bytes: Some(bytes),
            })),
        }
    }

    pub fn from_stream(stream: ByteStream) -> Self {
        Self {
            inner: Arc::new(Mutex::new(BlobInner {
                stream: Some(stream),
                bytes: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BlobInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Content length in bytes.
    pub fn length(&self) -> Result<u64> {
        let mut inner = self.lock();
        if let Some(bytes) = &inner.bytes {
            return Ok(bytes.len() as u64);
        }
        let Some(stream) = inner.stream.clone() else {
            return Ok(0);
        };
        match stream.declared_len() {
            Some(len) => Ok(len),
            None => {
                let bytes = stream.read_all()?;
                let len = bytes.len() as u64;
                tracing::debug!(len, "materialized stream-backed blob");
                inner.bytes = Some(bytes);
                Ok(len)
            }
        }
    }

    /// The underlying byte stream.
    ///
    /// Bytes-backed handles mint a fresh in-memory stream per call;
    /// stream-backed handles return the wrapped handle itself.
    pub fn binary_stream(&self) -> Result<ByteStream> {
        let inner = self.lock();
        if let Some(bytes) = &inner.bytes {
            return Ok(ByteStream::from_bytes(bytes.clone()));
        }
        match &inner.stream {
            Some(stream) => Ok(stream.clone()),
            None => Ok(ByteStream::from_bytes(Vec::new())),
        }
    }

    /// Materialize the full content, caching it on the handle.
    pub fn bytes(&self) -> Result<Vec<u8>> {
        let mut inner = self.lock();
        if let Some(bytes) = &inner.bytes {
            return Ok(bytes.clone());
        }
        let Some(stream) = inner.stream.clone() else {
            return Ok(Vec::new());
        };
        let bytes = stream.read_all()?;
        inner.bytes = Some(bytes.clone());
        Ok(bytes)
    }
}

impl Resource for Blob {
    fn close(&self) -> io::Result<()> {
        let inner = self.lock();
        match &inner.stream {
            Some(stream) => stream.close(),
            None => Ok(()),
        }
    }
}

impl PartialEq for Blob {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("Blob")
            .field("materialized", &inner.bytes.is_some())
            .field("stream_backed", &inner.stream.is_some())
            .finish()
    }
}

struct ClobInner {
    stream: Option<CharStream>,
    text: Option<String>,
}

/// An owned character large-object handle.
///
/// Lengths are counted in characters, not bytes.
#[derive(Clone)]
pub struct Clob {
    inner: Arc<Mutex<ClobInner>>,
}

impl Clob {
    pub fn from_string(text: String) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ClobInner {
                stream: None,
                text: Some(text),
            })),
        }
    }

    pub fn from_stream(stream: CharStream) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ClobInner {
                stream: Some(stream),
                text: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ClobInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Content length in characters.
    pub fn length(&self) -> Result<u64> {
        let mut inner = self.lock();
        if let Some(text) = &inner.text {
            return Ok(text.chars().count() as u64);
        }
        let Some(stream) = inner.stream.clone() else {
            return Ok(0);
        };
        match stream.declared_len() {
            Some(len) => Ok(len),
            None => {
                let text = stream.read_all()?;
                let len = text.chars().count() as u64;
                tracing::debug!(len, "materialized stream-backed clob");
                inner.text = Some(text);
                Ok(len)
            }
        }
    }

    /// The underlying character stream.
    pub fn character_stream(&self) -> Result<CharStream> {
        let inner = self.lock();
        if let Some(text) = &inner.text {
            return Ok(CharStream::from_string(text.clone()));
        }
        match &inner.stream {
            Some(stream) => Ok(stream.clone()),
            None => Ok(CharStream::from_string(String::new())),
        }
    }

    /// Materialize the full content, caching it on the handle.
    pub fn read_all(&self) -> Result<String> {
        let mut inner = self.lock();
        if let Some(text) = &inner.text {
            return Ok(text.clone());
        }
        let Some(stream) = inner.stream.clone() else {
            return Ok(String::new());
        };
        let text = stream.read_all()?;
        inner.text = Some(text.clone());
        Ok(text)
    }
}

impl Resource for Clob {
    fn close(&self) -> io::Result<()> {
        let inner = self.lock();
        match &inner.stream {
            Some(stream) => stream.close(),
            None => Ok(()),
        }
    }
}

impl PartialEq for Clob {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Clob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("Clob")
            .field("materialized", &inner.text.is_some())
            .field("stream_backed", &inner.stream.is_some())
            .finish()
    }
}

/// Factory producing owned large-object handles from raw streams.
///
/// Injected into the adapter so drivers with native large-object support
/// can supply locator-backed handles instead of the in-memory default.
pub trait LobFactory {
    fn blob(&self, stream: ByteStream) -> Blob;
    fn clob(&self, stream: CharStream) -> Clob;
}

/// Default factory: handles stay backed by the wrapped stream and
/// materialize into memory on demand.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryLobs;

impl LobFactory for MemoryLobs {
    fn blob(&self, stream: ByteStream) -> Blob {
        Blob::from_stream(stream)
    }

    fn clob(&self, stream: CharStream) -> Clob {
        Clob::from_stream(stream)
    }
}
