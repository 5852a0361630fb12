//! Pull-based tokenizer.
//!
//! The lexer reads one top-level element from a [`BufRead`] and yields its tokens
//! lazily. Each container body is read through a region bounded by the container's
//! declared length, so nothing inside a container can read into its siblings.
//! Only the currently open containers are tracked; payloads are the only thing
//! buffered.

use super::constants::*;
use crate::{
    config::{Config, MAX_SIZE_DIGITS},
    errors::Error,
    util::{digits_to_u64, Digits},
};
use bytes::Bytes;
use std::{
    cmp, fmt,
    io::{self, BufRead, Read},
    iter::FusedIterator,
};
use tracing::{debug, trace};

/// Kinds of containers.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Container {
    /// An [`Element::Array`](crate::Element::Array).
    Array,
    /// An [`Element::Dict`](crate::Element::Dict).
    Dict,
}

impl Container {
    /// The byte that opens a body of this kind.
    pub fn sigil(self) -> u8 {
        match self {
            Container::Array => ARRAY_OPEN,
            Container::Dict => DICT_OPEN,
        }
    }

    /// The byte that closes a body of this kind.
    pub fn closing(self) -> u8 {
        match self {
            Container::Array => ARRAY_CLOSE,
            Container::Dict => DICT_CLOSE,
        }
    }
}

/// Lexer tokens.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Token {
    /// A complete data element, carrying its payload.
    Data(Bytes),
    /// Start of a container body.
    Open(Container),
    /// End of a container body.
    Close(Container),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Data(bs) => write!(f, "Data<{}>", String::from_utf8_lossy(bs)),
            Token::Open(kind) => write!(f, "{:?}Open", kind),
            Token::Close(kind) => write!(f, "{:?}Close", kind),
        }
    }
}

/// A container body being read.
#[derive(Copy, Clone, Debug)]
struct Region {
    kind: Container,
    /// Offset one past the last byte of the body.
    end:  u64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum State {
    /// Somewhere inside the top-level element.
    Element,
    /// The top-level element is complete; only end of input may follow.
    Trailing,
    /// Finished, either cleanly or with an error.
    Done,
}

/// Streaming tokenizer over a [`BufRead`].
///
/// The lexer is an iterator of `Result<Token, Error>`. It produces the tokens of
/// exactly one top-level element, then checks that the input has ended. It stops
/// for good after the first error.
///
/// # Example
///
/// ```
/// use lich::encoding::lex::*;
/// use lich::prelude::*;
///
/// let tokens: Result<Vec<Token>, Error> = Lexer::new(&b"7[4[1<a>]]"[..]).collect();
///
/// assert_eq!(
///     tokens.unwrap(),
///     vec![
///         Token::Open(Container::Array),
///         Token::Open(Container::Array),
///         Token::Data(Bytes::from("a")),
///         Token::Close(Container::Array),
///         Token::Close(Container::Array),
///     ]
/// );
/// ```
pub struct Lexer<R> {
    reader:    R,
    offset:    u64,
    regions:   Vec<Region>,
    max_depth: usize,
    state:     State,
}

impl<R: BufRead> Lexer<R> {
    /// Creates a lexer with the default [`Config`].
    pub fn new(reader: R) -> Self { Self::with_config(reader, &Config::default()) }

    /// Creates a lexer with an explicit [`Config`].
    pub fn with_config(reader: R, config: &Config) -> Self {
        Lexer {
            reader,
            offset: 0,
            regions: Vec::new(),
            max_depth: config.max_depth,
            state: State::Element,
        }
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> u64 { self.offset }

    /// Number of containers currently open.
    pub fn depth(&self) -> usize { self.regions.len() }

    /// Bytes left before the innermost region ends, `None` at top level.
    fn remaining(&self) -> Option<u64> { self.regions.last().map(|r| r.end - self.offset) }

    fn peek_byte(&mut self) -> Result<Option<u8>, Error> {
        if self.remaining() == Some(0) {
            return Ok(None);
        }
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().cloned()),
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::io(self.offset, e)),
            }
        }
    }

    fn consume_byte(&mut self) {
        self.reader.consume(1);
        self.offset += 1;
    }

    fn read_byte(&mut self, what: &str) -> Result<u8, Error> {
        match self.peek_byte()? {
            Some(byte) => {
                self.consume_byte();
                Ok(byte)
            }
            None => Err(Error::short_read(self.offset, what)),
        }
    }

    fn expect_closing(&mut self, expected: u8) -> Result<(), Error> {
        let offset = self.offset;
        let found = self.read_byte("closing character")?;
        if found == expected {
            Ok(())
        } else {
            Err(Error::MissingClosingChar {
                expected: expected as char,
                found: found as char,
                offset,
            })
        }
    }

    fn read_size(&mut self) -> Result<u64, Error> {
        let start = self.offset;
        let mut digits = Digits::new();
        while digits.len() < MAX_SIZE_DIGITS {
            match self.peek_byte()? {
                Some(byte) if byte.is_ascii_digit() => {
                    self.consume_byte();
                    digits.push(byte);
                }
                Some(_) => break,
                None if digits.is_empty() => {
                    return Err(Error::short_read(start, "length prefix"))
                }
                None => break,
            }
        }
        digits_to_u64(&digits).ok_or(Error::UnreadableSize { offset: start })
    }

    fn read_payload(&mut self, size: u64) -> Result<Bytes, Error> {
        let start = self.offset;
        if self.remaining().map_or(false, |rem| size > rem) {
            return Err(Error::short_read(start, "data overruns its container"));
        }

        // grows with what's actually read, not with the declared size
        let mut buf = Vec::with_capacity(cmp::min(size, 8 * 1024) as usize);
        let read = (&mut self.reader)
            .take(size)
            .read_to_end(&mut buf)
            .map_err(|e| Error::io(start, e))?;
        self.offset += read as u64;

        if (read as u64) < size {
            return Err(Error::short_read(self.offset, "data payload"));
        }
        Ok(Bytes::from(buf))
    }

    fn open_region(&mut self, kind: Container, size: u64) -> Result<Token, Error> {
        if self.regions.len() >= self.max_depth {
            return Err(Error::TooDeep {
                limit: self.max_depth,
            });
        }
        if self.remaining().map_or(false, |rem| size > rem) {
            return Err(Error::short_read(
                self.offset,
                "container overruns its container",
            ));
        }

        let end = self.offset.saturating_add(size);
        trace!(offset = self.offset, end, ?kind, "opening region");
        self.regions.push(Region { kind, end });
        Ok(Token::Open(kind))
    }

    fn lex_element(&mut self) -> Result<Token, Error> {
        let size = self.read_size()?;

        let offset = self.offset;
        let sigil = self.read_byte("sigil")?;
        match sigil {
            DATA_OPEN => {
                let data = self.read_payload(size)?;
                self.expect_closing(DATA_CLOSE)?;
                Ok(Token::Data(data))
            }
            ARRAY_OPEN => self.open_region(Container::Array, size),
            DICT_OPEN => self.open_region(Container::Dict, size),
            byte => Err(Error::UnexpectedChar {
                byte: byte as char,
                offset,
            }),
        }
    }

    fn close_region(&mut self) -> Result<Option<Token>, Error> {
        let region = match self.regions.pop() {
            Some(region) => region,
            None => return Ok(None),
        };
        trace!(offset = self.offset, kind = ?region.kind, "region exhausted");
        self.expect_closing(region.kind.closing())?;
        Ok(Some(Token::Close(region.kind)))
    }

    fn step(&mut self) -> Result<Option<Token>, Error> {
        match self.state {
            State::Done => return Ok(None),
            State::Trailing => {
                self.state = State::Done;
                return match self.peek_byte()? {
                    None => Ok(None),
                    Some(_) => Err(Error::TrailingData {
                        offset: self.offset,
                    }),
                };
            }
            State::Element => (),
        }

        let token = if self.remaining() == Some(0) {
            self.close_region()?
        } else {
            Some(self.lex_element()?)
        };

        if self.regions.is_empty() {
            self.state = State::Trailing;
        }
        trace!(offset = self.offset, ?token, "lexed");
        Ok(token)
    }
}

impl<R: BufRead> Iterator for Lexer<R> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.step() {
            Ok(token) => token.map(Ok),
            Err(e) => {
                debug!(offset = self.offset, error = %e, "lexing failed");
                self.state = State::Done;
                Some(Err(e))
            }
        }
    }
}

impl<R: BufRead> FusedIterator for Lexer<R> {}

impl<R> fmt::Debug for Lexer<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Lexer")
            .field("offset", &self.offset)
            .field("regions", &self.regions)
            .field("state", &self.state)
            .finish()
    }
}

/// Lexes a complete buffer into its tokens.
///
/// # Example
///
/// ```
/// use lich::encoding::lex::*;
///
/// assert!(lex_full("0{}").is_ok());
/// assert!(lex_full("0{}x").is_err());
/// ```
pub fn lex_full<B: AsRef<[u8]>>(bs: B) -> Result<Vec<Token>, Error> {
    Lexer::new(bs.as_ref()).collect()
}
