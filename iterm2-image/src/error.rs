// ABOUTME: Error types for inline image encoding and option parsing
// ABOUTME: Keeps the sink's I/O error intact alongside the partial byte count

use std::io;
use thiserror::Error;

/// A sink write failed part way through an escape sequence.
///
/// Displays as the underlying I/O error. `written` is the number of bytes
/// the sink accepted before it failed; those bytes are already in the sink.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct PartialWrite {
    written: usize,
    #[source]
    source: io::Error,
}

impl PartialWrite {
    pub fn new(written: usize, source: io::Error) -> Self {
        Self { written, source }
    }

    /// Bytes accepted by the sink before the failure
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn io_error(&self) -> &io::Error {
        &self.source
    }

    /// Returns the sink's error unchanged
    pub fn into_io_error(self) -> io::Error {
        self.source
    }
}

impl From<PartialWrite> for io::Error {
    fn from(err: PartialWrite) -> Self {
        err.source
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DimensionParseError {
    #[error("Empty image dimension")]
    Empty,

    #[error("Invalid image dimension '{0}': expected <n>, <n>px, <n>% or auto")]
    Invalid(String),
}
