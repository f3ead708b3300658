//! Streaming record reader.
//!
//! Per record: `AwaitHeader -> (short value | long value blob)* -> terminator | EOF`.
//!
//! - Size-prefix: header line (one preceding padding line skipped), then
//!   exactly `size` payload bytes, decoded with `record::decode`.
//! - Separator: entry lines and long-value blobs read straight off the
//!   stream until a `---` line.
//!
//! End of stream before any byte of a new record is the clean end and
//! reads return `Ok(false)`. Anything cut short is `StreamError::Truncated`.
//! After an error the reader stays finished.

use std::io::{BufRead, BufReader, Read};

use bytes::{BufMut, BytesMut};

use crate::config::ReaderConfig;
use crate::constants::{NEWLINE, RECORD_SEPARATOR, RECORD_SEPARATOR_LINE};
use crate::record::{decode_record_into, parse_entry_header, EntryHeader, Record};
use crate::stream::framing::{is_padding_line, parse_frame_header, FrameError, FrameSizes};
use crate::telemetry::{StreamCounters, TelemetrySnapshot};
use crate::types::{Format, StreamError};
use crate::utils::fmt_snippet;

pub struct Reader<R: BufRead> {
    inner: R,
    config: ReaderConfig,

    // reused across reads
    rec: Record,
    data: BytesMut,
    name: String,
    line: Vec<u8>,

    /// Start of the last record or blob read. Matches the position in the
    /// underlying stream when reading started at its beginning.
    offset: u64,
    /// Bytes consumed so far.
    position: u64,
    done: bool,
    counters: StreamCounters,
}

impl<R: BufRead> Reader<R> {
    pub fn new(inner: R, format: Format) -> Self {
        Self::build(inner, ReaderConfig::new(format))
    }

    pub fn with_config(inner: R, config: ReaderConfig) -> Result<Self, StreamError> {
        config.validate()?;
        Ok(Self::build(inner, config))
    }

    fn build(inner: R, config: ReaderConfig) -> Self {
        Self {
            inner,
            data: BytesMut::with_capacity(config.initial_capacity),
            config,
            rec: Record::new(),
            name: String::new(),
            line: Vec::new(),
            offset: 0,
            position: 0,
            done: false,
            counters: StreamCounters::default(),
        }
    }

    /// Report offsets relative to `offset`, for a stream already positioned
    /// at that offset (e.g. after seeking to an indexed record).
    pub fn with_start_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self.position = offset;
        self
    }

    pub fn format(&self) -> Format {
        self.config.format
    }

    /// Read the next record. `Ok(false)` when there are no more records.
    pub fn read_next(&mut self) -> Result<bool, StreamError> {
        if self.done {
            return Ok(false);
        }
        self.release_oversized();
        let res = match self.config.format {
            Format::SizePrefix => self.read_size_prefixed_record(),
            Format::Separator => self.read_separated_record(),
        };
        self.settle(res)
    }

    /// Read the next raw size-prefixed blob into `data()` / `name()`.
    /// `Ok(false)` when there are no more blobs.
    pub fn read_next_data(&mut self) -> Result<bool, StreamError> {
        if self.done {
            return Ok(false);
        }
        self.release_oversized();
        let res = match self.read_frame() {
            Ok(Some(sizes)) => {
                self.counters.add_blob(sizes.payload, sizes.header);
                tracing::trace!(offset = self.offset, bytes = sizes.total(), "blob read");
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(e) => Err(e),
        };
        self.settle(res)
    }

    /// Offset and contents of the last record read by `read_next`.
    pub fn record(&self) -> (u64, &Record) {
        (self.offset, &self.rec)
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    /// Payload of the last blob read by `read_next_data`.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Name of the last blob read by `read_next_data`; empty if none.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn counters(&self) -> &StreamCounters {
        &self.counters
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(&self.counters)
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Owning iterator over `(offset, record)`. Each record is cloned out of
    /// the reader's reusable buffer.
    pub fn records(self) -> Records<R> {
        Records { reader: self }
    }

    // ================= Size-prefix =================

    fn read_size_prefixed_record(&mut self) -> Result<bool, StreamError> {
        self.rec.reset();
        let Some(sizes) = self.read_frame()? else {
            return Ok(false);
        };

        decode_record_into(&self.data, &mut self.rec)?;
        self.rec.name.push_str(&self.name);

        self.counters.add_record(sizes.payload, sizes.header);
        tracing::trace!(
            offset = self.offset,
            bytes = sizes.total(),
            entries = self.rec.len(),
            "size-prefixed record read"
        );
        Ok(true)
    }

    /// Header line plus payload. `None` on clean end of stream.
    fn read_frame(&mut self) -> Result<Option<FrameSizes>, StreamError> {
        self.data.clear();
        self.name.clear();

        let mut n = self.read_line()?;
        if n > 0 && is_padding_line(&self.line) {
            self.counters.add_padding();
            n = self.read_line()?;
        }
        if n == 0 {
            return Ok(None);
        }

        // padding belongs to the previous frame
        self.offset = self.position - n as u64;
        if self.line.last() != Some(&NEWLINE) {
            return Err(self.truncated(format!(
                "frame header {} has no terminating '\\n'",
                fmt_snippet(&self.line)
            )));
        }

        let header = parse_frame_header(&self.line[..n - 1])?;
        let size = header.size;
        self.name.push_str(header.name);
        self.read_payload(size)?;

        Ok(Some(FrameSizes { header: n, payload: size, padding: 0 }))
    }

    // ================= Separator =================

    fn read_separated_record(&mut self) -> Result<bool, StreamError> {
        self.rec.reset();
        self.offset = self.position;

        loop {
            let n = self.read_line()?;
            if n == 0 {
                if self.rec.is_empty() {
                    return Ok(false);
                }
                return Err(self.truncated(format!(
                    "half-read record: {} entries without a '---' terminator",
                    self.rec.len()
                )));
            }
            if self.line.last() != Some(&NEWLINE) {
                return Err(self.truncated(format!(
                    "line {} has no terminating '\\n'",
                    fmt_snippet(&self.line)
                )));
            }

            let line = &self.line[..n - 1];
            if line == RECORD_SEPARATOR {
                break;
            }

            let (key_len, len) = match parse_entry_header(line)? {
                EntryHeader::Short { key, value } => {
                    self.rec.push_raw(key, value)?;
                    continue;
                }
                EntryHeader::Long { key, len } => (key.len(), len),
            };

            self.read_payload(len)?;
            self.skip_value_newline()?;
            self.rec.push_raw(&self.line[..key_len], &self.data)?;
        }

        let total = (self.position - self.offset) as usize;
        let sep = RECORD_SEPARATOR_LINE.len();
        self.counters.add_record(total - sep, sep);
        tracing::trace!(
            offset = self.offset,
            bytes = total,
            entries = self.rec.len(),
            "separated record read"
        );
        Ok(true)
    }

    /// Consume the encoder's newline after a long value, if present.
    fn skip_value_newline(&mut self) -> Result<(), StreamError> {
        let next = self.inner.fill_buf()?;
        if next.first() == Some(&NEWLINE) {
            self.inner.consume(1);
            self.position += 1;
        }
        Ok(())
    }

    // ================= Shared =================

    /// Read through the next `\n` (or to EOF) into `line`.
    fn read_line(&mut self) -> Result<usize, StreamError> {
        self.line.clear();
        let n = self.inner.read_until(NEWLINE, &mut self.line)?;
        self.position += n as u64;
        Ok(n)
    }

    /// Read exactly `len` bytes into `data`.
    fn read_payload(&mut self, len: usize) -> Result<(), StreamError> {
        if let Some(max) = self.config.max_payload_len {
            if len > max {
                return Err(FrameError::TooLarge { size: len, max }.into());
            }
        }

        // grows with the bytes that actually arrive, never with the declared length
        self.data.clear();
        let mut src = (&mut self.inner).take(len as u64);
        let got = std::io::copy(&mut src, &mut (&mut self.data).writer())?;
        self.position += got;

        if got < len as u64 {
            return Err(self.truncated(format!(
                "payload shorter than the declared {len} bytes (got {got})"
            )));
        }
        Ok(())
    }

    fn truncated(&self, reason: String) -> StreamError {
        StreamError::Truncated { offset: self.offset, reason }
    }

    /// Mark the reader finished on clean end or error.
    fn settle(&mut self, res: Result<bool, StreamError>) -> Result<bool, StreamError> {
        if let Ok(true) = res {
            return res;
        }
        match &res {
            Ok(_) => {
                tracing::trace!(position = self.position, "end of stream");
            }
            Err(e) => {
                tracing::debug!(offset = self.offset, error = %e, "read failed");
            }
        }
        self.done = true;
        self.rec.reset();
        self.data.clear();
        self.name.clear();
        res
    }

    /// Drop buffers a previous oversized record grew past the ceiling.
    fn release_oversized(&mut self) {
        let max = self.config.max_retained_capacity;
        let mut released = false;

        if self.data.capacity() > max {
            self.data = BytesMut::with_capacity(self.config.initial_capacity);
            released = true;
        }
        if self.line.capacity() > max {
            self.line = Vec::new();
            released = true;
        }
        if self.name.capacity() > max {
            self.name = String::new();
            released = true;
        }
        if self.rec.retained_capacity() > max {
            self.rec = Record::new();
            released = true;
        }

        if released {
            self.counters.add_realloc();
            tracing::debug!(max, "dropped oversized read buffers");
        }
    }
}

impl<T: Read> Reader<BufReader<T>> {
    /// Wrap an unbuffered stream.
    pub fn buffered(inner: T, format: Format) -> Self {
        Self::new(BufReader::new(inner), format)
    }
}

/// Iterator returned by [`Reader::records`].
pub struct Records<R: BufRead> {
    reader: Reader<R>,
}

impl<R: BufRead> Records<R> {
    pub fn into_reader(self) -> Reader<R> {
        self.reader
    }
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<(u64, Record), StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_next() {
            Ok(true) => {
                let (offset, rec) = self.reader.record();
                Some(Ok((offset, rec.clone())))
            }
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
