#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod decoder;
pub mod line;
pub mod reader;
pub mod streaming;

pub use decoder::Utf8Decoder;
pub use line::{DATA_PREFIX, DONE_SENTINEL, Line, classify, decode_delta};
pub use reader::{DeltaReader, Progress};
pub use streaming::{Termination, delta_stream, read_deltas};
