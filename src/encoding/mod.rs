//! # Encoder and decoder
//!
//! Encode and decode functions for lich.
//!
//! Decoding is split in two stages: the [`Lexer`] turns bytes into a flat
//! sequence of [`Token`]s and the [`Decoder`] rebuilds the tree from them. Both
//! stages are lazy, so the tree is built while the input is still being read.
//!
//! # Example
//!
//! ```
//! use lich::prelude::*;
//!
//! let el = Element::dict(vec![
//!     (Bytes::from("fruit"), Element::array_from_strings(&["apple", "banana"])),
//!     (Bytes::from("greeting"), Element::from("hello world")),
//! ]);
//!
//! // encode into a fresh buffer
//! let enc_full = encode_full(&el);
//!
//! // or append to an existing one
//! let out = &mut Vec::new();
//! encode(&el, out);
//!
//! // they are equivalent
//! assert_eq!(*out, enc_full);
//!
//! // Note: decoding returns a `Result`
//! let dec = decode_full(&enc_full).unwrap();
//!
//! assert_eq!(dec, el);
//! ```

use crate::{config::Config, errors::Error, Element};
use std::io::{BufRead, BufReader, Read};
use tracing::debug;

mod constants;
pub mod de;
pub mod lex;
pub mod ser;

pub use de::Decoder;
pub use lex::{lex_full, Container, Lexer, Token};
pub use ser::*;

/// Encode a value into its canonical representation, appending the output to `out`.
///
/// # Arguments
///
/// * `t: T` - The value to be encoded.
/// * `out: &mut S` - The [`Serializer`] where the encoder output will be stored.
///
/// # Example
///
/// ```
/// use lich::prelude::*;
///
/// let out = &mut Vec::new();
///
/// encode(&Element::from("hi"), out);
///
/// assert_eq!(out.as_slice(), b"2<hi>");
/// ```
pub fn encode<T: Ser, S: Serializer>(t: T, out: &mut S) { t.ser(out) }

/// Encodes a value into a vector of bytes.
///
/// # Arguments
///
/// * `t` - The value to be encoded.
///
/// # Example
///
/// ```
/// use lich::prelude::*;
///
/// let enc: Vec<u8> = encode_full(&Element::Array(vec![]));
///
/// assert_eq!(enc, b"0[]");
/// ```
pub fn encode_full<T: Ser>(t: T) -> Vec<u8> {
    let mut out = Vec::with_capacity(t.size() as usize);
    t.ser(&mut out);
    out
}

/// Decodes one element from a reader using the default [`Config`].
///
/// The reader is buffered internally. The whole input must be exactly one
/// element; anything after it is an error.
///
/// # Example
///
/// ```
/// use lich::prelude::*;
/// use std::io::Cursor;
///
/// let el = decode(Cursor::new("7[4[1<a>]]")).unwrap();
///
/// assert_eq!(el, Element::Array(vec![Element::Array(vec![Element::from("a")])]));
/// ```
pub fn decode<R: Read>(r: R) -> Result<Element, Error> { decode_with(r, &Config::default()) }

/// Decodes one element from a reader.
///
/// # Arguments
///
/// * `r` - The source of the encoded bytes.
/// * `config` - Limits to apply.
pub fn decode_with<R: Read>(r: R, config: &Config) -> Result<Element, Error> {
    decode_buf(BufReader::new(r), config)
}

/// Decodes one element from an already buffered reader.
pub fn decode_buf<R: BufRead>(r: R, config: &Config) -> Result<Element, Error> {
    decode_tokens(Lexer::with_config(r, config), config)
}

/// Decodes a complete buffer, returns an error if decoding fails.
///
/// # Arguments
///
/// * `bs` - The bytes to be decoded.
///
/// # Example
///
/// ```
/// use lich::prelude::*;
///
/// assert_eq!(decode_full("0<>").unwrap(), Element::from(""));
/// assert!(decode_full("1<>").is_err());
/// ```
pub fn decode_full<B: AsRef<[u8]>>(bs: B) -> Result<Element, Error> {
    decode_buf(bs.as_ref(), &Config::default())
}

/// Decodes one element from a token source, checking that nothing follows it.
pub fn decode_tokens<I>(tokens: I, config: &Config) -> Result<Element, Error>
where
    I: IntoIterator<Item = Result<Token, Error>>,
{
    Decoder::new(tokens.into_iter(), config)
        .decode_element()
        .map_err(|e| {
            debug!(error = %e, "decoding failed");
            e
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vecmap::VecMap;
    use bytes::{Bytes, BytesMut};

    fn d(s: &str) -> Element { Element::from(s) }

    #[test]
    fn empty_elements() {
        assert_eq!(decode_full("0<>").unwrap(), d(""));
        assert_eq!(decode_full("0[]").unwrap(), Element::Array(vec![]));
        assert_eq!(decode_full("0{}").unwrap(), Element::Dict(VecMap::new()));

        assert_eq!(encode_full(&d("")), b"0<>");
        assert_eq!(encode_full(&Element::Array(vec![])), b"0[]");
        assert_eq!(encode_full(&Element::Dict(VecMap::new())), b"0{}");
    }

    #[test]
    fn short_data() {
        // the '>' is taken as payload, then the input runs out
        let err = decode_full("1<>").unwrap_err();
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::UnexpectedEof));
    }

    #[test]
    fn fruit_array() {
        let el = decode_full("26[5<apple>6<banana>6<orange>]").unwrap();
        assert_eq!(
            el,
            Element::Array(vec![d("apple"), d("banana"), d("orange")])
        );
        assert_eq!(encode_full(&el), b"26[5<apple>6<banana>6<orange>]".to_vec());
    }

    #[test]
    fn greeting_dict() {
        let el = decode_full("26{8<greeting>11<hello world>}").unwrap();
        assert_eq!(
            el,
            Element::dict(vec![(Bytes::from("greeting"), d("hello world"))])
        );
    }

    #[test]
    fn nested_arrays() {
        let el = decode_full("7[4[1<a>]]").unwrap();
        assert_eq!(el, Element::Array(vec![Element::Array(vec![d("a")])]));
    }

    #[test]
    fn trailing_byte() {
        match decode_full("0{}x") {
            Err(Error::TrailingData { offset: 3 }) => (),
            r => panic!("unexpected result {:?}", r),
        }
        match decode_full("1<a>1<b>") {
            Err(Error::TrailingData { offset: 4 }) => (),
            r => panic!("unexpected result {:?}", r),
        }
    }

    #[test]
    fn canonical_dict() {
        let unsorted = "126{14<selling points>40[6<simple>7<general>17<human-sympathetic>]\
                        8<greeting>11<hello world>5<fruit>26[5<apple>6<banana>6<orange>]}";
        let sorted = "126{5<fruit>26[5<apple>6<banana>6<orange>]8<greeting>11<hello world>\
                      14<selling points>40[6<simple>7<general>17<human-sympathetic>]}";

        let el = decode_full(unsorted).unwrap();
        assert_eq!(el, decode_full(sorted).unwrap());
        assert_eq!(encode_full(&el), sorted.as_bytes());
    }

    #[test]
    fn example_dict() {
        let el = Element::dict(vec![
            (
                Bytes::from("selling points"),
                Element::array_from_strings(&["simple", "general", "human-sympathetic"]),
            ),
            (Bytes::from("greeting"), d("Hello")),
            (
                Bytes::from("fruit"),
                Element::array_from_strings(&["apple", "banana", "orange"]),
            ),
        ]);

        assert_eq!(
            String::from_utf8(encode_full(&el)).unwrap(),
            "119{5<fruit>26[5<apple>6<banana>6<orange>]8<greeting>5<Hello>\
             14<selling points>40[6<simple>7<general>17<human-sympathetic>]}"
        );
    }

    #[test]
    fn size_matches_output() {
        let el = Element::Array(vec![
            d(&"x".repeat(12)),
            Element::dict(vec![(Bytes::from("k"), Element::Array(vec![d("v"); 11]))]),
        ]);
        assert_eq!(el.size(), encode_full(&el).len() as u64);
    }

    #[test]
    fn bytes_mut_sink() {
        let el = Element::array_from_strings(&["a", "bc"]);
        let mut out = BytesMut::new();
        encode(&el, &mut out);
        assert_eq!(out.finalize(), Bytes::from(&b"9[1<a>2<bc>]"[..]));
    }

    #[test]
    fn encode_without_element() {
        let v = vec!["apple", "banana", "orange"];
        assert_eq!(encode_full(&v), b"26[5<apple>6<banana>6<orange>]".to_vec());

        let m: VecMap<Bytes, Vec<String>> = VecMap::from(vec![(Bytes::from("k"), vec![])]);
        assert_eq!(encode_full(&m), b"7{1<k>0[]}".to_vec());
    }

    #[test]
    fn depth_limit() {
        let config = Config::default().with_max_depth(3);
        let mut input = "0[]".to_string();
        for _ in 0..3 {
            input = format!("{}[{}]", input.len(), input);
        }
        match decode_with(input.as_bytes(), &config) {
            Err(Error::TooDeep { limit: 3 }) => (),
            r => panic!("unexpected result {:?}", r),
        }
        assert!(decode(input.as_bytes()).is_ok());
    }

    #[test]
    fn binary_payloads() {
        let payload: Vec<u8> = (0..=255).collect();
        let el = Element::from(payload.clone());
        let enc = encode_full(&el);
        assert_eq!(&enc[..5], b"256<\x00");
        assert_eq!(decode_full(&enc).unwrap().into_data().unwrap(), payload);
    }
}
