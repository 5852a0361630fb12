//! Limits applied while lexing and decoding.

/// The longest length prefix the lexer will read, in digits.
///
/// Twenty digits are enough for any `u64`.
pub const MAX_SIZE_DIGITS: usize = 20;

/// Default for [`Config::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
/// Decoder configuration.
///
/// # Example
///
/// ```
/// use lich::prelude::*;
///
/// let config = Config::default().with_max_depth(2);
///
/// assert!(decode_with(&b"7[4[1<a>]]"[..], &config).is_ok());
/// assert!(decode_with(&b"10[7[4[1<a>]]]"[..], &config).is_err());
/// ```
pub struct Config {
    /// Maximum number of simultaneously open containers.
    pub max_depth: usize,
}

impl Config {
    /// Sets the nesting limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
