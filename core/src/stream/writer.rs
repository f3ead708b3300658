//! Streaming record writer.
//!
//! Every write returns the exact number of bytes it put on the stream, and
//! `position()` is their running total, so callers can index records by
//! offset as they write them.

use std::io::Write;

use crate::config::WriterConfig;
use crate::constants::{NEWLINE, RECORD_SEPARATOR_LINE};
use crate::record::{encode_into, Record};
use crate::stream::framing::{encode_frame_header, needs_padding, FrameSizes};
use crate::telemetry::{StreamCounters, TelemetrySnapshot};
use crate::types::{Format, StreamError};

pub struct Writer<W: Write> {
    inner: W,
    config: WriterConfig,
    /// encoded record, reused across writes
    body: Vec<u8>,
    /// frame header line, reused across writes
    header: Vec<u8>,
    position: u64,
    counters: StreamCounters,
}

impl<W: Write> Writer<W> {
    pub fn new(inner: W, format: Format) -> Self {
        Self::build(inner, WriterConfig::new(format))
    }

    pub fn with_config(inner: W, config: WriterConfig) -> Result<Self, StreamError> {
        config.validate()?;
        Ok(Self::build(inner, config))
    }

    fn build(inner: W, config: WriterConfig) -> Self {
        Self {
            inner,
            config,
            body: Vec::new(),
            header: Vec::new(),
            position: 0,
            counters: StreamCounters::default(),
        }
    }

    /// Report offsets relative to `offset` instead of 0, e.g. when appending
    /// to a file that already holds records.
    pub fn with_start_offset(mut self, offset: u64) -> Self {
        self.position = offset;
        self
    }

    pub fn format(&self) -> Format {
        self.config.format
    }

    /// Offset the next write will start at.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Write one record framed according to the configured format.
    ///
    /// Separator framing drops `record.name`; size-prefix framing stores it
    /// in the frame header.
    pub fn write_record(&mut self, record: &Record) -> Result<usize, StreamError> {
        self.body.clear();
        let n = match self.config.format {
            Format::Separator => {
                let n = encode_into(record, Format::Separator, &mut self.body);
                self.inner.write_all(&self.body)?;
                let sep = RECORD_SEPARATOR_LINE.len();
                self.counters.add_record(n - sep, sep);
                n
            }
            Format::SizePrefix => {
                encode_into(record, Format::SizePrefix, &mut self.body);
                let sizes = write_frame(
                    &mut self.inner,
                    &mut self.header,
                    &self.body,
                    &record.name,
                    self.config.pad_frames,
                )?;
                self.counters.add_record(sizes.payload, sizes.header);
                if sizes.padding > 0 {
                    self.counters.add_padding();
                }
                sizes.total()
            }
        };

        tracing::trace!(
            offset = self.position,
            bytes = n,
            entries = record.len(),
            format = self.config.format.as_str(),
            "record written"
        );
        self.finish_write(n)
    }

    /// Write a raw blob as an unnamed size-prefix frame.
    pub fn write(&mut self, data: &[u8]) -> Result<usize, StreamError> {
        self.write_named(data, "")
    }

    /// Write a raw blob as a size-prefix frame carrying `name`.
    ///
    /// Blobs are always size-prefix framed, whatever the configured format.
    pub fn write_named(&mut self, data: &[u8], name: &str) -> Result<usize, StreamError> {
        let sizes = write_frame(&mut self.inner, &mut self.header, data, name, self.config.pad_frames)?;
        self.counters.add_blob(sizes.payload, sizes.header);
        if sizes.padding > 0 {
            self.counters.add_padding();
        }

        let n = sizes.total();
        tracing::trace!(offset = self.position, bytes = n, frame_name = name, "blob written");
        self.finish_write(n)
    }

    fn finish_write(&mut self, n: usize) -> Result<usize, StreamError> {
        self.position += n as u64;
        if self.config.flush_each_write {
            self.inner.flush()?;
        }
        if self.body.capacity() > self.config.max_retained_capacity {
            tracing::debug!(
                capacity = self.body.capacity(),
                max = self.config.max_retained_capacity,
                "dropping oversized encode buffer"
            );
            self.body = Vec::new();
            self.counters.add_realloc();
        }
        if self.header.capacity() > self.config.max_retained_capacity {
            tracing::debug!(
                capacity = self.header.capacity(),
                max = self.config.max_retained_capacity,
                "dropping oversized header buffer"
            );
            self.header = Vec::new();
            self.counters.add_realloc();
        }
        Ok(n)
    }

    pub fn flush(&mut self) -> Result<(), StreamError> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn counters(&self) -> &StreamCounters {
        &self.counters
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(&self.counters)
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Header line, payload, then the optional padding newline.
fn write_frame<W: Write>(
    out: &mut W,
    header: &mut Vec<u8>,
    payload: &[u8],
    name: &str,
    pad: bool,
) -> Result<FrameSizes, StreamError> {
    header.clear();
    let header_len = encode_frame_header(payload.len(), name, header)?;

    out.write_all(header)?;
    out.write_all(payload)?;

    let padding = if pad && needs_padding(payload) {
        out.write_all(&[NEWLINE])?;
        1
    } else {
        0
    };

    Ok(FrameSizes { header: header_len, payload: payload.len(), padding })
}
