//! Conversions between native values and [`Element`] trees.

use crate::{vecmap::VecMap, Element::{self, *}};
use bytes::Bytes;
use failure::{bail, format_err, Fallible};
use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

/// A value representable as an [`Element`].
pub trait ElementRep: Clone + Sized {
    /// Converts value into an [`Element`].
    ///
    /// # Example
    ///
    /// ```
    /// use lich::rep::*;
    ///
    /// let el = "foo".to_string().to_element();
    /// ```
    fn to_element(&self) -> Element { self.clone().into_element() }

    /// Consumes value, converting it into an [`Element`].
    fn into_element(self) -> Element { self.to_element() }

    /// Converts value from an [`Element`].
    ///
    /// # Arguments
    ///
    /// `el: Element` - The value to be converted.
    ///
    /// # Example
    ///
    /// ```
    /// use lich::rep::*;
    ///
    /// let el = "foo".to_string().into_element();
    ///
    /// assert_eq!(String::from_element(el).unwrap(), "foo");
    /// ```
    fn from_element(el: Element) -> Fallible<Self>;
}

impl ElementRep for Element {
    fn into_element(self) -> Element { self }

    fn to_element(&self) -> Element { self.clone() }

    fn from_element(el: Element) -> Fallible<Self> { Ok(el) }
}

impl ElementRep for Bytes {
    fn into_element(self) -> Element { Data(self) }

    fn from_element(el: Element) -> Fallible<Self> { el.into_data() }
}

impl ElementRep for String {
    fn into_element(self) -> Element { Data(Bytes::from(self)) }

    fn to_element(&self) -> Element { Data(Bytes::from(self.as_str())) }

    fn from_element(el: Element) -> Fallible<Self> {
        Ok(String::from_utf8(el.into_data()?.to_vec())?)
    }
}

impl<T: ElementRep> ElementRep for Vec<T> {
    fn into_element(self) -> Element { Array(self.into_iter().map(T::into_element).collect()) }

    fn to_element(&self) -> Element { Array(self.iter().map(T::to_element).collect()) }

    fn from_element(el: Element) -> Fallible<Self> {
        el.into_array()?.into_iter().map(T::from_element).collect()
    }
}

impl<T: ElementRep> ElementRep for VecMap<Bytes, T> {
    fn into_element(self) -> Element {
        Dict(VecMap::from_sorted(
            self.into_iter().map(|(k, v)| (k, v.into_element())).collect(),
        ))
    }

    fn to_element(&self) -> Element {
        Dict(VecMap::from_sorted(
            self.iter().map(|(k, v)| (k.clone(), v.to_element())).collect(),
        ))
    }

    fn from_element(el: Element) -> Fallible<Self> {
        let vm = el.into_dict()?;
        let mut out = Vec::with_capacity(vm.len());
        for (k, v) in vm {
            out.push((k, T::from_element(v)?));
        }
        Ok(VecMap::from_sorted(out))
    }
}

impl<T: ElementRep, S: BuildHasher + Default + Clone> ElementRep for HashMap<Bytes, T, S> {
    fn to_element(&self) -> Element {
        Dict(self.iter().map(|(k, v)| (k.clone(), v.to_element())).collect())
    }

    fn from_element(el: Element) -> Fallible<Self> {
        el.into_dict()?
            .into_iter()
            .map(|(k, v)| Ok((k, T::from_element(v)?)))
            .collect()
    }
}

fn utf8_key(k: Bytes) -> Fallible<String> {
    String::from_utf8(k.to_vec()).map_err(|_| format_err!("Dict key {:?} is not valid UTF-8", k))
}

impl<T: ElementRep, S: BuildHasher + Default + Clone> ElementRep for HashMap<String, T, S> {
    fn to_element(&self) -> Element {
        Dict(
            self.iter()
                .map(|(k, v)| (Bytes::from(k.as_str()), v.to_element()))
                .collect(),
        )
    }

    fn from_element(el: Element) -> Fallible<Self> {
        el.into_dict()?
            .into_iter()
            .map(|(k, v)| Ok((utf8_key(k)?, T::from_element(v)?)))
            .collect()
    }
}

impl<T: ElementRep> ElementRep for BTreeMap<String, T> {
    fn to_element(&self) -> Element {
        // `String` and byte-wise orders agree, so this is already sorted
        Dict(VecMap::from_sorted(
            self.iter()
                .map(|(k, v)| (Bytes::from(k.as_str()), v.to_element()))
                .collect(),
        ))
    }

    fn from_element(el: Element) -> Fallible<Self> {
        el.into_dict()?
            .into_iter()
            .map(|(k, v)| Ok((utf8_key(k)?, T::from_element(v)?)))
            .collect()
    }
}

impl<A: ElementRep, B: ElementRep> ElementRep for (A, B) {
    fn into_element(self) -> Element { Array(vec![self.0.into_element(), self.1.into_element()]) }

    fn from_element(el: Element) -> Fallible<Self> {
        let arr = el.into_array()?;
        if arr.len() != 2 {
            bail!("Expected a pair, found an array of length {}", arr.len())
        }
        let mut iter = arr.into_iter();
        match (iter.next(), iter.next()) {
            (Some(a), Some(b)) => Ok((A::from_element(a)?, B::from_element(b)?)),
            _ => bail!("Expected a pair"),
        }
    }
}

/// Removes the next element from an iterator and converts it to `T`.
///
/// # Example
///
/// ```
/// use lich::prelude::*;
///
/// let el = Element::array_from_strings(&["a", "b"]);
/// let iter = &mut el.into_array().unwrap().into_iter();
///
/// let a: String = pop_element(iter).unwrap();
/// let b: Bytes = pop_element(iter).unwrap();
///
/// assert_eq!(a, "a");
/// assert_eq!(b, "b");
/// assert!(pop_element::<String, _>(iter).is_err());
/// ```
pub fn pop_element<T: ElementRep, I: Iterator<Item = Element>>(iter: &mut I) -> Fallible<T> {
    match iter.next() {
        Some(el) => T::from_element(el),
        None => bail!("Ran out of elements"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings() {
        let v = vec!["apple".to_string(), "banana".to_string()];
        let el = v.to_element();
        assert_eq!(el, Element::array_from_strings(&["apple", "banana"]));
        assert_eq!(Vec::<String>::from_element(el).unwrap(), v);
    }

    #[test]
    fn invalid_utf8() {
        assert!(String::from_element(Element::from(vec![0xffu8])).is_err());

        let el = Element::dict(vec![(Bytes::from(vec![0xffu8]), Element::from("v"))]);
        assert!(HashMap::<String, String>::from_element(el).is_err());
    }

    #[test]
    fn maps_agree() {
        let mut hm: HashMap<String, Vec<String>> = HashMap::new();
        hm.insert("b".into(), vec![]);
        hm.insert("a".into(), vec!["x".into()]);
        let bt: BTreeMap<String, Vec<String>> = hm.clone().into_iter().collect();

        assert_eq!(hm.to_element(), bt.to_element());
        assert_eq!(
            HashMap::<String, Vec<String>>::from_element(bt.to_element()).unwrap(),
            hm
        );

        let bytes_keyed: HashMap<Bytes, Element> = HashMap::from_element(hm.to_element()).unwrap();
        assert_eq!(bytes_keyed.len(), 2);
    }

    #[test]
    fn wrong_kind() {
        assert!(Vec::<String>::from_element(Element::from("x")).is_err());
        assert!(BTreeMap::<String, String>::from_element(Element::Array(vec![])).is_err());
        assert!(<(String, String)>::from_element(Element::array_from_strings(&["a"])).is_err());
    }

    #[test]
    fn pairs() {
        let p = ("k".to_string(), vec!["v".to_string()]);
        assert_eq!(<(String, Vec<String>)>::from_element(p.to_element()).unwrap(), p);
    }
}
