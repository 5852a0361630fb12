//! Conversion between [`serde_json::Value`]s and [`Element`] trees.
//!
//! Only strings, arrays and objects have a lich counterpart. What happens to
//! numbers, booleans and nulls is decided by the [`Mode`] passed to each call.
//!
//! # Example
//!
//! ```
//! use lich::{json::*, prelude::*};
//! use serde_json::json;
//!
//! let value = json!({
//!     "greeting": { "English": "Hello", "Dog": 9.0 },
//!     "fruit": ["apple", "banana", "orange"],
//! });
//!
//! match from_json(&value, Mode::Strict) {
//!     Err(ConversionError::UnknownType { key, .. }) => assert_eq!(key, "greeting.Dog"),
//!     r => panic!("unexpected result {:?}", r),
//! }
//!
//! let el = from_json(&value, Mode::Lenient).unwrap();
//!
//! assert_eq!(
//!     encode_full(&el),
//!     b"71{5<fruit>26[5<apple>6<banana>6<orange>]8<greeting>18{7<English>5<Hello>}}".to_vec()
//! );
//! ```

use crate::{vecmap::VecMap, Element};
use bytes::Bytes;
use failure::Fail;
use serde_json::{Map, Value};
use tracing::debug;

/// What to do with values that have no lich counterpart.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Mode {
    /// Fail on the first unsupported value.
    Strict,
    /// Leave unsupported values out of the result.
    Lenient,
}

impl Default for Mode {
    fn default() -> Self { Mode::Strict }
}

#[derive(Debug, Fail)]
/// Errors raised while converting to or from JSON.
pub enum ConversionError {
    /// A value with no lich counterpart.
    #[fail(
        display = "Cannot serialize unknown type. Key: {} Value: {} Type: {}",
        key, value, kind
    )]
    UnknownType {
        /// Path to the value, with object keys joined by `.` and array indices
        /// written as `[i]`. Empty for the top-level value.
        key:   String,
        /// The offending value.
        value: Value,
        /// Name of the value's JSON type.
        kind:  &'static str,
    },
    /// A data element, or a dict key, that is not valid UTF-8 and so has no
    /// JSON string counterpart.
    #[fail(display = "Data at {:?} is not valid UTF-8", key)]
    InvalidUtf8 {
        /// Path to the data.
        key: String,
    },
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn field_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_owned()
    } else {
        format!("{}.{}", path, key)
    }
}

fn item_path(path: &str, ix: usize) -> String { format!("{}[{}]", path, ix) }

/// Converts `value`, returning `None` if it was skipped.
fn convert(value: &Value, path: &str, mode: Mode) -> Result<Option<Element>, ConversionError> {
    match value {
        Value::String(s) => Ok(Some(Element::from(s.as_str()))),
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (ix, item) in items.iter().enumerate() {
                if let Some(el) = convert(item, &item_path(path, ix), mode)? {
                    out.push(el);
                }
            }
            Ok(Some(Element::Array(out)))
        }
        Value::Object(m) => Ok(Some(Element::Dict(convert_map(m, path, mode)?))),
        other => {
            match mode {
                Mode::Lenient => {
                    debug!(key = path, kind = json_kind(other), "skipping unsupported value");
                    Ok(None)
                }
                Mode::Strict => {
                    Err(ConversionError::UnknownType {
                        key:   path.to_owned(),
                        value: other.clone(),
                        kind:  json_kind(other),
                    })
                }
            }
        }
    }
}

fn convert_map(
    m: &Map<String, Value>,
    path: &str,
    mode: Mode,
) -> Result<VecMap<Bytes, Element>, ConversionError> {
    let mut out = Vec::with_capacity(m.len());
    for (k, v) in m {
        if let Some(el) = convert(v, &field_path(path, k), mode)? {
            out.push((Bytes::from(k.as_str()), el));
        }
    }
    Ok(VecMap::from(out))
}

/// Converts a JSON value into an [`Element`].
///
/// Strings become data, arrays become arrays and objects become dicts. A
/// top-level value of any other type is always an error, even in
/// [`Mode::Lenient`].
///
/// # Arguments
///
/// * `value` - The value to be converted.
/// * `mode` - What to do with nested values that have no lich counterpart.
pub fn from_json(value: &Value, mode: Mode) -> Result<Element, ConversionError> {
    match convert(value, "", mode)? {
        Some(el) => Ok(el),
        None => {
            Err(ConversionError::UnknownType {
                key:   String::new(),
                value: value.clone(),
                kind:  json_kind(value),
            })
        }
    }
}

/// Converts a JSON object into a dict.
///
/// # Example
///
/// ```
/// use lich::{json::*, prelude::*};
/// use serde_json::json;
///
/// let value = json!({ "fruit": ["apple", true] });
/// let map = value.as_object().unwrap();
///
/// assert!(dict_from_map(map, Mode::Strict).is_err());
///
/// let dict = dict_from_map(map, Mode::Lenient).unwrap();
///
/// assert_eq!(encode_full(&dict), b"19{5<fruit>8[5<apple>]}".to_vec());
/// ```
pub fn dict_from_map(
    m: &Map<String, Value>,
    mode: Mode,
) -> Result<VecMap<Bytes, Element>, ConversionError> {
    convert_map(m, "", mode)
}

fn render(el: &Element, path: &str) -> Result<Value, ConversionError> {
    let utf8 = |bs: &Bytes, path: &str| {
        std::str::from_utf8(bs)
            .map(str::to_owned)
            .map_err(|_| ConversionError::InvalidUtf8 { key: path.to_owned() })
    };

    match el {
        Element::Data(bs) => Ok(Value::String(utf8(bs, path)?)),
        Element::Array(items) => {
            items
                .iter()
                .enumerate()
                .map(|(ix, item)| render(item, &item_path(path, ix)))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        Element::Dict(m) => {
            let mut out = Map::new();
            for (k, v) in m {
                let key = utf8(k, path)?;
                let value = render(v, &field_path(path, &key))?;
                out.insert(key, value);
            }
            Ok(Value::Object(out))
        }
    }
}

/// Converts an [`Element`] into a JSON value.
///
/// Data becomes a string, so every data element and dict key must be valid
/// UTF-8.
///
/// # Example
///
/// ```
/// use lich::{json::*, prelude::*};
/// use serde_json::json;
///
/// let el = decode_full("26[5<apple>6<banana>6<orange>]").unwrap();
///
/// assert_eq!(to_json(&el).unwrap(), json!(["apple", "banana", "orange"]));
/// ```
pub fn to_json(el: &Element) -> Result<Value, ConversionError> { render(el, "") }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::encode_full;
    use serde_json::json;

    #[test]
    fn nested_objects() {
        let value = json!({
            "greeting": { "English": "Hello", "Japanese": "Konnichiwa" },
            "fruit": ["apple", "banana", "orange"],
            "selling points": ["simple", "general", "human-sympathetic"],
        });
        let el = from_json(&value, Mode::Strict).unwrap();
        assert_eq!(
            String::from_utf8(encode_full(&el)).unwrap(),
            "158{5<fruit>26[5<apple>6<banana>6<orange>]8<greeting>43{7<English>5<Hello>\
             8<Japanese>10<Konnichiwa>}14<selling points>40[6<simple>7<general>\
             17<human-sympathetic>]}"
        );
        assert_eq!(to_json(&el).unwrap(), value);
    }

    #[test]
    fn unknown_type_names_the_key() {
        let value = json!({
            "greeting": { "English": "Hello", "Japanese": "Konnichiwa", "Dog": 9.0 },
            "fruit": ["apple", "banana", "orange"],
        });
        match from_json(&value, Mode::Strict) {
            Err(ConversionError::UnknownType { key, value, kind }) => {
                assert_eq!(key, "greeting.Dog");
                assert_eq!(value, json!(9.0));
                assert_eq!(kind, "number");
            }
            r => panic!("unexpected result {:?}", r),
        }
    }

    #[test]
    fn array_items_are_indexed() {
        let value = json!({ "a": [["x", null]] });
        match from_json(&value, Mode::Strict) {
            Err(ConversionError::UnknownType { key, .. }) => assert_eq!(key, "a[0][1]"),
            r => panic!("unexpected result {:?}", r),
        }
        assert_eq!(
            from_json(&value, Mode::Lenient).unwrap(),
            Element::dict(vec![(
                Bytes::from("a"),
                Element::Array(vec![Element::array_from_strings(&["x"])])
            )])
        );
    }

    #[test]
    fn top_level_scalar() {
        for mode in &[Mode::Strict, Mode::Lenient] {
            match from_json(&json!(true), *mode) {
                Err(ConversionError::UnknownType { key, kind, .. }) => {
                    assert_eq!(key, "");
                    assert_eq!(kind, "bool");
                }
                r => panic!("unexpected result {:?}", r),
            }
        }
        assert_eq!(from_json(&json!("hi"), Mode::Strict).unwrap(), Element::from("hi"));
    }

    #[test]
    fn invalid_utf8() {
        let el = Element::dict(vec![(
            Bytes::from("k"),
            Element::Array(vec![Element::from(vec![0xffu8])]),
        )]);
        match to_json(&el) {
            Err(ConversionError::InvalidUtf8 { key }) => assert_eq!(key, "k[0]"),
            r => panic!("unexpected result {:?}", r),
        }
    }

    #[test]
    fn error_message() {
        let err = from_json(&json!({ "n": null }), Mode::Strict).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot serialize unknown type. Key: n Value: null Type: null"
        );
    }
}
