//! Record streams.
//!
//! Responsibilities:
//! - Write records and raw blobs to any `Write`, returning exact byte counts
//! - Read them back from any `BufRead`, reporting each record's offset
//! - Normalize files, memory buffers and boxed streams into readers/writers
//!
//! Non-responsibilities:
//! - Record grammar (see `record`)
//! - Random access beyond seeking to a known offset

pub mod framing;
pub mod io;
pub mod reader;
pub mod writer;

pub use io::{
    open_input,
    open_output,
    open_reader,
    open_reader_at,
    open_writer,
    InputSource,
    OutputSink,
    SharedBuffer,
};
pub use reader::{Reader, Records};
pub use writer::Writer;
