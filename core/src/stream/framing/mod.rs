//! Size-prefix frame headers.
//!
//! Responsibilities:
//! - Encode `<size> [<name>]\n` header lines
//! - Parse them back with strict validation
//! - Decide on and recognise the optional padding newline
//!
//! Non-responsibilities:
//! - Record encoding (see `record`)
//! - IO

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{
    FrameError,
    FrameHeader,
    FrameSizes,
};

pub use encode::{encode_frame_header, frame_header_len, needs_padding};
pub use decode::{is_padding_line, parse_frame_header};
