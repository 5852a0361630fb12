//! Re-exports of the most commonly used items.

pub use crate::{
    config::Config,
    encoding::{
        decode, decode_buf, decode_full, decode_tokens, decode_with, encode, encode_full, Ser,
        Serializer, SerializerExt,
    },
    errors::Error,
    rep::*,
    vecmap::VecMap,
    Element,
};
pub use bytes::Bytes;
