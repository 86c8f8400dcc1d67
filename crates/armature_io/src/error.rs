//! # Archive Error Types
//!
//! All errors that can occur while reading or writing an archive.

use thiserror::Error;

/// Errors that can occur in archive streams.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The underlying stream failed (including unexpected end of stream).
    #[error("archive stream error: {0}")]
    Io(#[from] std::io::Error),

    /// The first byte of the stream is not a known endianness tag.
    #[error("unknown archive endianness tag {0:#04x}")]
    BadEndianTag(u8),

    /// The object tag in the stream is not the one expected.
    #[error("object tag mismatch: expected {expected:?}, found {found:?}")]
    TagMismatch {
        /// Tag of the object being read.
        expected: &'static str,
        /// Tag found in the stream.
        found: String,
    },

    /// A NUL-terminated string did not end within its length limit.
    #[error("string exceeds {max} bytes")]
    StringTooLong {
        /// Length limit in bytes.
        max: usize,
    },

    /// A string in the stream is not valid UTF-8.
    #[error("string is not valid UTF-8")]
    InvalidString,
}

/// Result type for archive operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;
