//! Lexing and decoding errors.

use failure::Fail;
use std::io;

#[derive(Debug, Fail)]
/// An error encountered while lexing or decoding.
///
/// Offsets count bytes from the start of the input stream.
pub enum Error {
    /// A byte other than `<`, `[` or `{` where a sigil was expected.
    #[fail(
        display = "Unexpected character {:?} at offset {}",
        byte, offset
    )]
    UnexpectedChar {
        /// The offending byte.
        byte:   char,
        /// Position of the offending byte.
        offset: u64,
    },

    /// The length prefix was empty or didn't fit into a `u64`.
    #[fail(display = "Couldn't read size of element at offset {}", offset)]
    UnreadableSize {
        /// Position of the first byte of the prefix.
        offset: u64,
    },

    /// The byte after a payload or container body wasn't the matching delimiter.
    #[fail(
        display = "Missing closing character {:?} at offset {}, found {:?}",
        expected, offset, found
    )]
    MissingClosingChar {
        /// The delimiter the element's sigil calls for.
        expected: char,
        /// The byte that was read instead.
        found:    char,
        /// Position of `found`.
        offset:   u64,
    },

    /// A close token of the wrong kind, or a close where an element was expected.
    #[fail(display = "Got unexpected close token")]
    UnexpectedClose,

    /// The token stream ended before a container was closed.
    #[fail(display = "Did not receive a close token")]
    MissingClose,

    /// A dict key position held something other than data.
    #[fail(display = "Dict key must be of type data")]
    BadKeyType,

    /// Input continued after a complete top-level element.
    #[fail(display = "Trailing data after element at offset {}", offset)]
    TrailingData {
        /// Position of the first trailing byte.
        offset: u64,
    },

    /// A token source yielded more tokens after a complete top-level element.
    #[fail(display = "Trailing token after element")]
    TrailingToken,

    /// Containers were nested deeper than the configured limit.
    #[fail(display = "Input nested deeper than {} levels", limit)]
    TooDeep {
        /// The configured limit.
        limit: usize,
    },

    /// The underlying reader failed, or ended early.
    #[fail(display = "I/O error at offset {}: {}", offset, cause)]
    Io {
        /// Stream position when the failure occurred.
        offset: u64,
        /// The underlying I/O error.
        #[cause]
        cause:  io::Error,
    },
}

impl Error {
    /// Wraps an [`io::Error`] with the offset at which it occurred.
    pub fn io(offset: u64, cause: io::Error) -> Self { Error::Io { offset, cause } }

    /// A short read: fewer bytes were available than the framing requires.
    pub(crate) fn short_read(offset: u64, what: &str) -> Self {
        Error::io(
            offset,
            io::Error::new(io::ErrorKind::UnexpectedEof, format!("input too short: {}", what)),
        )
    }

    /// The [`io::ErrorKind`] of an I/O error, if this is one.
    ///
    /// # Example
    ///
    /// ```
    /// use lich::prelude::*;
    /// use std::io::ErrorKind;
    ///
    /// let err = decode_full("5<abc>").unwrap_err();
    /// assert_eq!(err.io_kind(), Some(ErrorKind::UnexpectedEof));
    /// ```
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Error::Io { cause, .. } => Some(cause.kind()),
            _ => None,
        }
    }
}
