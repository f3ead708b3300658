// ## 📂 File: `src/stream/io.rs`
// ## Normalized inputs and outputs for record streams

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::{ReaderConfig, WriterConfig};
use crate::stream::reader::Reader;
use crate::stream::writer::Writer;
use crate::types::StreamError;

pub type BoxedReader = Box<dyn Read + Send>;
pub type BoxedWriter = Box<dyn Write + Send>;

/// Canonical input abstraction
pub enum InputSource {
    Reader(BoxedReader),
    File(PathBuf),
    Memory(Vec<u8>),
}

/// Canonical output abstraction
pub enum OutputSink {
    Writer(BoxedWriter),
    /// Create or truncate.
    File(PathBuf),
    /// Open for append; offsets continue from the current file length.
    Append(PathBuf),
    Memory(SharedBuffer),
}

/// In-memory sink that stays readable while a `Writer` owns the other handle.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        // a panicked writer leaves plain bytes behind, still usable
        self.buf.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn contents(&self) -> Vec<u8> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        self.lock().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Normalize input source into a boxed reader
pub fn open_input(src: InputSource) -> Result<BoxedReader, StreamError> {
    let reader: BoxedReader = match src {
        InputSource::Reader(r) => r,
        InputSource::File(p) => Box::new(File::open(p)?),
        InputSource::Memory(b) => Box::new(Cursor::new(b)),
    };
    Ok(reader)
}

/// Normalize output sink into a boxed writer plus the offset writing starts at.
pub fn open_output(sink: OutputSink) -> Result<(BoxedWriter, u64), StreamError> {
    match sink {
        OutputSink::Writer(w) => Ok((w, 0)),
        OutputSink::File(p) => Ok((Box::new(File::create(p)?), 0)),
        OutputSink::Append(p) => {
            let file = OpenOptions::new().create(true).append(true).open(p)?;
            let start = file.metadata()?.len();
            Ok((Box::new(file), start))
        }
        OutputSink::Memory(buf) => Ok((Box::new(buf), 0)),
    }
}

pub fn open_reader(
    src: InputSource,
    config: ReaderConfig,
) -> Result<Reader<BufReader<BoxedReader>>, StreamError> {
    let input = open_input(src)?;
    Reader::with_config(BufReader::with_capacity(config.initial_capacity, input), config)
}

/// Open a reader positioned at `offset`, an offset previously returned by a
/// `Writer` or reported by a `Reader` over the same file.
pub fn open_reader_at(
    path: impl AsRef<Path>,
    offset: u64,
    config: ReaderConfig,
) -> Result<Reader<BufReader<File>>, StreamError> {
    let mut file = File::open(path.as_ref())?;
    let len = file.metadata()?.len();
    if offset > len {
        return Err(StreamError::Config(format!(
            "offset {offset} is past the end of {} ({len} bytes)",
            path.as_ref().display()
        )));
    }
    file.seek(SeekFrom::Start(offset))?;

    let reader = Reader::with_config(BufReader::with_capacity(config.initial_capacity, file), config)?;
    Ok(reader.with_start_offset(offset))
}

pub fn open_writer(
    sink: OutputSink,
    config: WriterConfig,
) -> Result<Writer<BufWriter<BoxedWriter>>, StreamError> {
    let (output, start) = open_output(sink)?;
    let writer = Writer::with_config(BufWriter::new(output), config)?;
    tracing::debug!(start_offset = start, format = writer.format().as_str(), "writer opened");
    Ok(writer.with_start_offset(start))
}
