//! Canonical encoding.

use super::{constants::*, lex::Container};
use crate::{
    util::{digit_len, u64_to_digits},
    vecmap::VecMap,
    Element,
};
use bytes::{Bytes, BytesMut};

/// An output sink for encoded bytes.
pub trait Serializer {
    /// The type of the output value.
    type Out;
    /// Add a byte to the output value.
    fn put_u8(&mut self, u: u8);
    /// Add a slice to the output value.
    fn put_slice(&mut self, slice: &[u8]);
    /// Return the output value.
    fn finalize(self) -> Self::Out;
}

impl Serializer for Vec<u8> {
    type Out = Self;

    fn put_u8(&mut self, u: u8) { self.push(u) }

    fn put_slice(&mut self, slice: &[u8]) { self.extend_from_slice(slice) }

    fn finalize(self) -> Self::Out { self }
}

impl Serializer for BytesMut {
    type Out = Bytes;

    fn put_u8(&mut self, u: u8) { self.extend_from_slice(&[u]) }

    fn put_slice(&mut self, slice: &[u8]) { self.extend_from_slice(slice) }

    fn finalize(self) -> Self::Out { self.freeze() }
}

/// Size of an element whose payload or body is `body` bytes long.
#[inline]
pub(crate) fn framed_size(body: u64) -> u64 { digit_len(body) + 2 + body }

/// Convenience methods for [`Serializer`].
pub trait SerializerExt: Serializer {
    /// Add a decimal length prefix followed by a sigil.
    ///
    /// # Arguments
    ///
    /// * `len: u64` - Length of the payload or body that follows.
    /// * `sigil: u8` - The opening sigil.
    fn put_header(&mut self, len: u64, sigil: u8);

    /// Add a data element.
    ///
    /// # Arguments
    ///
    /// * `b: &[u8]` - The payload.
    fn put_data(&mut self, b: &[u8]);

    /// Add an array.
    ///
    /// # Arguments
    ///
    /// * `v` - The items, encoded in order.
    fn put_arr<S: Ser>(&mut self, v: &[S]);

    /// Add a dict. Entries are written in key order.
    ///
    /// # Arguments
    ///
    /// * `m` - The entries.
    fn put_dict<S: Ser>(&mut self, m: &VecMap<Bytes, S>);
}

impl<S: Serializer> SerializerExt for S {
    #[inline]
    fn put_header(&mut self, len: u64, sigil: u8) {
        self.put_slice(&u64_to_digits(len));
        self.put_u8(sigil);
    }

    fn put_data(&mut self, b: &[u8]) {
        self.put_header(b.len() as u64, DATA_OPEN);
        self.put_slice(b);
        self.put_u8(DATA_CLOSE);
    }

    fn put_arr<T: Ser>(&mut self, v: &[T]) {
        self.put_header(arr_body_size(v), Container::Array.sigil());
        for t in v {
            t.ser(self);
        }
        self.put_u8(Container::Array.closing());
    }

    fn put_dict<T: Ser>(&mut self, m: &VecMap<Bytes, T>) {
        self.put_header(dict_body_size(m), Container::Dict.sigil());
        for (k, v) in m.iter() {
            self.put_data(k);
            v.ser(self);
        }
        self.put_u8(Container::Dict.closing());
    }
}

fn arr_body_size<T: Ser>(v: &[T]) -> u64 { v.iter().map(|t| t.size()).sum() }

fn dict_body_size<T: Ser>(m: &VecMap<Bytes, T>) -> u64 {
    m.iter()
        .map(|(k, v)| framed_size(k.len() as u64) + v.size())
        .sum()
}

/// A value that can be serialized.
pub trait Ser {
    /// Writes the canonical encoding of `self` to `s`.
    fn ser<S: Serializer>(&self, s: &mut S);

    /// Length in bytes of the canonical encoding of `self`.
    fn size(&self) -> u64;
}

impl<'a, T: Ser + ?Sized> Ser for &'a T {
    fn ser<S: Serializer>(&self, s: &mut S) { (**self).ser(s) }

    fn size(&self) -> u64 { (**self).size() }
}

impl Ser for Element {
    fn ser<S: Serializer>(&self, s: &mut S) {
        match self {
            Element::Data(bs) => s.put_data(bs),
            Element::Array(a) => s.put_arr(a),
            Element::Dict(m) => s.put_dict(m),
        }
    }

    fn size(&self) -> u64 {
        match self {
            Element::Data(bs) => framed_size(bs.len() as u64),
            Element::Array(a) => framed_size(arr_body_size(a)),
            Element::Dict(m) => framed_size(dict_body_size(m)),
        }
    }
}

impl Ser for [u8] {
    fn ser<S: Serializer>(&self, s: &mut S) { s.put_data(self) }

    fn size(&self) -> u64 { framed_size(self.len() as u64) }
}

impl Ser for Bytes {
    fn ser<S: Serializer>(&self, s: &mut S) { s.put_data(self) }

    fn size(&self) -> u64 { framed_size(self.len() as u64) }
}

impl Ser for str {
    fn ser<S: Serializer>(&self, s: &mut S) { s.put_data(self.as_bytes()) }

    fn size(&self) -> u64 { framed_size(self.len() as u64) }
}

impl Ser for String {
    fn ser<S: Serializer>(&self, s: &mut S) { s.put_data(self.as_bytes()) }

    fn size(&self) -> u64 { framed_size(self.len() as u64) }
}

impl<T: Ser> Ser for Vec<T> {
    fn ser<S: Serializer>(&self, s: &mut S) { s.put_arr(self) }

    fn size(&self) -> u64 { framed_size(arr_body_size(self)) }
}

impl<T: Ser> Ser for VecMap<Bytes, T> {
    fn ser<S: Serializer>(&self, s: &mut S) { s.put_dict(self) }

    fn size(&self) -> u64 { framed_size(dict_body_size(self)) }
}
