//! # Lich
//!
//! Lich is a self-describing serialization format built from three kinds of
//! element: byte strings, arrays and dicts. Every element is prefixed with the
//! length of its contents in bytes, so a reader always knows how far an element
//! extends before looking inside it.
//!
//! # Usage
//!
//! Values are represented as an [`Element`] tree. Trees can be built by hand, or
//! from native values through the [`ElementRep`] trait.
//!
//! ```
//! use lich::prelude::*;
//! use std::collections::BTreeMap;
//!
//! let mut fruit = BTreeMap::new();
//! fruit.insert("apple".to_string(), "red".to_string());
//! fruit.insert("banana".to_string(), "yellow".to_string());
//!
//! // encode
//! let encoded = encode_full(&fruit.to_element());
//!
//! assert_eq!(encoded, b"32{5<apple>3<red>6<banana>6<yellow>}".to_vec());
//!
//! // and then immediately decode
//! let decoded: BTreeMap<String, String> = decode_full(&encoded).unwrap().into_rep().unwrap();
//!
//! assert_eq!(fruit, decoded);
//! ```
//!
//! With the `json` feature (on by default), trees can also be built from
//! [`serde_json::Value`]s, see the [`json`] module.
//!
//! # An overview of lich types
//!
//! ## Data
//!
//! ```
//! use lich::prelude::*;
//!
//! let a_str = Element::from("hello world");
//!
//! let raw = Element::from(vec![0u8, 159, 146, 150]);
//!
//! let a_string = "This is a string".to_string().into_element();
//! ```
//!
//! ## Arrays
//!
//! Arrays are ordered sequences of elements.
//!
//! ```
//! use lich::prelude::*;
//!
//! let some_strings = Element::array_from_strings(&["simple", "general"]);
//!
//! let mixed = Element::Array(vec![Element::from("a"), some_strings]);
//! ```
//!
//! ## Dicts
//!
//! Dicts map data keys to elements. They are stored as a [`VecMap`], sorted by
//! key, so there is exactly one encoding for every dict.
//!
//! ```
//! use lich::prelude::*;
//!
//! let d = Element::dict(vec![
//!     (Bytes::from("b"), Element::from("2")),
//!     (Bytes::from("a"), Element::from("1")),
//! ]);
//!
//! assert_eq!(encode_full(&d), b"16{1<a>1<1>1<b>1<2>}".to_vec());
//! ```
//!
//! # Format
//!
//! Every element has the shape `<length><sigil><contents><closing>`.
//!
//! | Kind  | Sigil | Closing | Contents                               |
//! | ---   | ---   | ---     | ---                                    |
//! | Data  | `<`   | `>`     | raw bytes                              |
//! | Array | `[`   | `]`     | the encoded items, in order            |
//! | Dict  | `{`   | `}`     | encoded key, encoded value, repeated   |
//!
//! The length is written in ASCII decimal, at most 20 digits, and counts the bytes
//! of the contents only. Dict keys are always data. When encoding, dict entries
//! are written in ascending byte-wise order of their keys.
//!
//! ```text
//! 5<hello>
//! 26[5<apple>6<banana>6<orange>]
//! 26{8<greeting>11<hello world>}
//! ```
//!
//! A decoder reads exactly one element; any bytes after it are an error.

#![warn(
    missing_docs,
    deprecated_in_future,
    unsafe_code,
    unused_labels,
    keyword_idents,
    missing_copy_implementations,
    missing_debug_implementations,
    macro_use_extern_crate,
    unreachable_pub,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces
)]
#![allow(clippy::cast_lossless)]

#[macro_use]
pub mod util;

pub mod config;
pub mod encoding;
pub mod errors;
#[cfg(feature = "json")] pub mod json;
pub mod prelude;
pub mod rep;
pub mod vecmap;

pub use errors::Error;

use bytes::Bytes;
use encoding::Ser;
use failure::{bail, Fallible};
use rep::ElementRep;
use std::fmt;
use vecmap::*;

#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug)]
/// [`Element`] and its variants.
///
/// # Example
///
/// ```
/// use lich::prelude::*;
///
/// let el = Element::from("hi");
///
/// let val = match el {
///     Element::Data(bs) => bs,
///     _ => panic!(),
/// };
///
/// assert_eq!(val, "hi");
/// ```
pub enum Element {
    /// Opaque bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use lich::prelude::{Element::Data, *};
    ///
    /// let data = Data(Bytes::from_static(b"hello world"));
    /// ```
    Data(Bytes),
    /// An ordered sequence of elements.
    ///
    /// # Example
    ///
    /// ```
    /// use lich::prelude::{Element::Array, *};
    ///
    /// let array = Array(vec![Element::from("a"), Element::from("b")]);
    /// ```
    Array(Vec<Element>),
    /// A map from data keys to elements.
    ///
    /// # Example
    ///
    /// ```
    /// use lich::prelude::{Element::Dict, *};
    ///
    /// let vmap = VecMap::from(vec![(Bytes::from("key"), Element::from("value"))]);
    ///
    /// let dict = Dict(vmap);
    /// ```
    Dict(VecMap<Bytes, Element>),
}

use Element::*;

impl Element {
    /// Creates a data element.
    pub fn data<B: Into<Bytes>>(bs: B) -> Element { Data(bs.into()) }

    /// Creates an array.
    pub fn array(items: Vec<Element>) -> Element { Array(items) }

    /// Creates a dict from key-value pairs. When a key appears more than once the
    /// last value wins.
    ///
    /// # Example
    ///
    /// ```
    /// use lich::prelude::*;
    ///
    /// let d = Element::dict(vec![
    ///     (Bytes::from("k"), Element::from("old")),
    ///     (Bytes::from("k"), Element::from("new")),
    /// ]);
    ///
    /// assert_eq!(d.as_dict().unwrap().get(&b"k"[..]), Some(&Element::from("new")));
    /// ```
    pub fn dict<I: IntoIterator<Item = (Bytes, Element)>>(entries: I) -> Element {
        Dict(entries.into_iter().collect())
    }

    /// Creates an array of data elements, one per string.
    ///
    /// # Example
    ///
    /// ```
    /// use lich::prelude::*;
    ///
    /// let array = Element::array_from_strings(&["simple", "general", "human-sympathetic"]);
    ///
    /// assert_eq!(
    ///     encode_full(&array),
    ///     b"40[6<simple>7<general>17<human-sympathetic>]".to_vec()
    /// );
    /// ```
    pub fn array_from_strings<I, S>(strings: I) -> Element
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Array(
            strings
                .into_iter()
                .map(|s| Data(Bytes::from(s.as_ref())))
                .collect(),
        )
    }

    /// Name of this element's kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Data(_) => "data",
            Array(_) => "array",
            Dict(_) => "dict",
        }
    }

    /// Length in bytes of this element's canonical encoding.
    ///
    /// # Example
    ///
    /// ```
    /// use lich::prelude::*;
    ///
    /// let el = Element::array_from_strings(&["apple", "banana", "orange"]);
    ///
    /// assert_eq!(el.size(), 30);
    /// assert_eq!(el.size(), encode_full(&el).len() as u64);
    /// ```
    pub fn size(&self) -> u64 { Ser::size(self) }

    /// Borrows the bytes of a data element.
    /// This will return an [`Error`](failure::Error) if the value is not [`Data`].
    pub fn as_data(&self) -> Fallible<&Bytes> {
        match self {
            Data(bs) => Ok(bs),
            other => bail!("Value is {}, not data", other.kind()),
        }
    }

    /// Borrows the items of an array.
    /// This will return an [`Error`](failure::Error) if the value is not an [`Array`].
    pub fn as_array(&self) -> Fallible<&Vec<Element>> {
        match self {
            Array(a) => Ok(a),
            other => bail!("Value is {}, not an array", other.kind()),
        }
    }

    /// Borrows the entries of a dict.
    /// This will return an [`Error`](failure::Error) if the value is not a [`Dict`].
    ///
    /// # Example
    ///
    /// ```
    /// use lich::prelude::*;
    ///
    /// let el = decode_full("26{8<greeting>11<hello world>}").unwrap();
    ///
    /// let greeting = el.as_dict().unwrap().get(&b"greeting"[..]).unwrap();
    ///
    /// assert_eq!(greeting, &Element::from("hello world"));
    /// ```
    pub fn as_dict(&self) -> Fallible<&VecMap<Bytes, Element>> {
        match self {
            Dict(m) => Ok(m),
            other => bail!("Value is {}, not a dict", other.kind()),
        }
    }

    /// Consumes the value, returning the bytes of a data element.
    pub fn into_data(self) -> Fallible<Bytes> {
        match self {
            Data(bs) => Ok(bs),
            other => bail!("Value is {}, not data", other.kind()),
        }
    }

    /// Consumes the value, returning the items of an array.
    pub fn into_array(self) -> Fallible<Vec<Element>> {
        match self {
            Array(a) => Ok(a),
            other => bail!("Value is {}, not an array", other.kind()),
        }
    }

    /// Consumes the value, returning the entries of a dict.
    pub fn into_dict(self) -> Fallible<VecMap<Bytes, Element>> {
        match self {
            Dict(m) => Ok(m),
            other => bail!("Value is {}, not a dict", other.kind()),
        }
    }

    /// Consumes the value, converting it to a value of type `T`.
    ///
    /// # Example
    ///
    /// ```
    /// use lich::prelude::*;
    ///
    /// let el = Element::array_from_strings(&["a", "b"]);
    ///
    /// let v: Vec<String> = el.into_rep().unwrap();
    ///
    /// assert_eq!(v, vec!["a", "b"]);
    /// ```
    pub fn into_rep<T: ElementRep>(self) -> Fallible<T> { T::from_element(self) }
}

fn fmt_bytes(bytes: &Bytes) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => format!("{:?}", s),
        Err(_) => {
            let mut bytes_string: String = "b\"".to_owned();
            bytes
                .iter()
                .for_each(|c| bytes_string.push_str(&format!("{:02x}", c)));
            bytes_string.push('"');

            bytes_string
        }
    }
}

/// Human readable rendering, for diagnostics. Use [`encode_full`](encoding::encode_full)
/// for the wire format.
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn fmt_dict(m: &VecMap<Bytes, Element>, indent: usize) -> String {
            let mut dict_string: String = "{".to_owned();
            for (i, (k, v)) in m.iter().enumerate() {
                if i == 0 {
                    dict_string.push_str(&format!("\n{:indent$}", "", indent = indent + 2));
                } else {
                    dict_string.push_str(&format!(",\n{:indent$}", "", indent = indent + 2));
                }

                dict_string.push_str(&format!(
                    "{key}: {value}",
                    key = fmt_bytes(k),
                    value = fmt_helper(v, indent + 2),
                ));

                // check if we're at last element
                if i == m.len() - 1 {
                    dict_string.push_str(&format!("\n{:indent$}", "", indent = indent));
                }
            }
            dict_string.push('}');

            dict_string
        }

        fn fmt_helper(el: &Element, indent: usize) -> String {
            match el {
                Data(bytes) => fmt_bytes(bytes),
                Array(a) => {
                    let items: Vec<String> = a.iter().map(|el| fmt_helper(el, indent)).collect();
                    format!("[{}]", items.join(", "))
                }
                Dict(m) => fmt_dict(m, indent),
            }
        }

        write!(f, "{}", fmt_helper(self, 0))
    }
}

impl From<&str> for Element {
    fn from(s: &str) -> Element { Data(Bytes::from(s)) }
}

impl From<&[u8]> for Element {
    fn from(s: &[u8]) -> Element { Data(Bytes::from(s)) }
}

from_fn!(Element, Bytes, Data);
from_fn!(Element, String, |s: String| Data(Bytes::from(s)));
from_fn!(Element, Vec<u8>, |v: Vec<u8>| Data(Bytes::from(v)));
from_fn!(Element, Vec<Element>, Array);
from_fn!(Element, VecMap<Bytes, Element>, Dict);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivial_tests() {
        assert_eq!(Element::from("word").as_data().unwrap(), &Bytes::from("word"));
        assert!(Element::from("word").as_array().is_err());
        assert!(Element::Array(vec![]).as_dict().is_err());
        assert!(Element::dict(vec![]).into_data().is_err());
        assert_eq!(Element::array(vec![]).kind(), "array");
        assert_eq!(Element::data("x"), Element::from("x"));
    }

    #[test]
    fn dict_order_is_canonical() {
        let a = Element::dict(vec![
            (Bytes::from("b"), Element::from("2")),
            (Bytes::from("a"), Element::from("1")),
            (Bytes::from("ab"), Element::from("3")),
        ]);
        let b = Element::dict(vec![
            (Bytes::from("ab"), Element::from("3")),
            (Bytes::from("a"), Element::from("1")),
            (Bytes::from("b"), Element::from("2")),
        ]);
        assert_eq!(a, b);
        assert_eq!(encoding::encode_full(&a), encoding::encode_full(&b));

        let keys: Vec<&[u8]> = a.as_dict().unwrap().keys().map(|k| &k[..]).collect();
        assert_eq!(keys, vec![&b"a"[..], &b"ab"[..], &b"b"[..]]);
    }

    #[test]
    fn display() {
        let el = Element::dict(vec![
            (Bytes::from("k"), Element::array_from_strings(&["a", "b"])),
            (Bytes::from("z"), Element::from(vec![0xffu8, 0x00])),
        ]);
        assert_eq!(
            el.to_string(),
            "{\n  \"k\": [\"a\", \"b\"],\n  \"z\": b\"ff00\"\n}"
        );
        assert_eq!(Element::dict(vec![]).to_string(), "{}");
    }

    #[test]
    fn elements_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Element>();
    }
}
