//! A wrapper around a sorted vector of tuples that backs [dicts][`Element::Dict`].
//!
//! Entries are always sorted by key and keys are unique, so iterating over a
//! [`VecMap`] visits entries in canonical order. Inserting a key that is already
//! present replaces its value.
//!
//! # Example
//!
//! ```
//! use lich::prelude::*;
//! use std::collections::{BTreeMap, HashMap};
//!
//! let key = Bytes::from("a");
//! let value = 1;
//!
//! // from a `BTreeMap`
//! let mut btmap = BTreeMap::new();
//! btmap.insert(key.clone(), value);
//!
//! let bt_vm = VecMap::from(btmap);
//!
//! // from a `HashMap`
//! let mut hashmap = HashMap::new();
//! hashmap.insert(key.clone(), value);
//!
//! let hm_vm = VecMap::from(hashmap);
//!
//! // from a vector of tuples, later duplicates win
//! let vec_vm = VecMap::from(vec![(key.clone(), 0), (key.clone(), value)]);
//!
//! assert_eq!(bt_vm, hm_vm);
//! assert_eq!(hm_vm, vec_vm);
//! ```
//!
//! [`Element::Dict`]: crate::Element::Dict

use std::{
    borrow::Borrow,
    collections::{BTreeMap, HashMap},
    hash::*,
    iter::FromIterator,
    mem,
    slice::Iter,
    vec::IntoIter,
};

#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug, Default)]
/// A map implemented as a sorted [`Vec`] of pairs.
///
/// See also: [module level documentation](`crate::vecmap`).
pub struct VecMap<K: Ord, V>(Vec<(K, V)>);

impl<K: Ord, V> VecMap<K, V> {
    /// Creates an empty [`VecMap`].
    pub fn new() -> Self { VecMap(Vec::new()) }

    /// Creates a [`VecMap`] from a vector of key-value pairs sorted by their first
    /// elements.
    ///
    /// # Arguments
    ///
    /// * `v: Vec<(K, V)>` - A vector of key-value pairs sorted by their first element.
    ///
    /// # Example
    ///
    /// ```
    /// use lich::prelude::*;
    ///
    /// let vmap = VecMap::from_sorted(vec![(1, "foo"), (2, "bar"), (3, "baz")]);
    /// ```
    ///
    /// # Panics
    ///
    /// This function will panic if `v` is not sorted by its first element.
    /// This requirement is strict, and keys must be unique.
    ///
    /// ```should_panic
    /// use lich::prelude::*;
    ///
    /// let vmap = VecMap::from_sorted(vec![("a", ""), ("a", "")]);
    /// ```
    pub fn from_sorted(v: Vec<(K, V)>) -> Self {
        for i in 1..v.len() {
            if v[i - 1].0 >= v[i].0 {
                panic!("`Vec` is not sorted by key")
            }
        }
        VecMap(v)
    }

    /// Returns length.
    pub fn len(&self) -> usize { self.0.len() }

    /// Indicates whether the [`VecMap`] is empty.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Returns an [`Iter`] of the key value pairs, in key order.
    ///
    /// # Example
    ///
    /// ```
    /// use lich::prelude::*;
    ///
    /// let vmap = VecMap::from(vec![(3, "baz"), (1, "foo"), (2, "bar")]);
    ///
    /// let (k, v) = vmap.iter().next().unwrap();
    ///
    /// assert_eq!((k, v), (&1, &"foo"))
    /// ```
    pub fn iter(&self) -> Iter<(K, V)> { self.0.iter() }

    /// Iterates over the keys, in order.
    pub fn keys(&self) -> impl Iterator<Item = &K> { self.0.iter().map(|(k, _)| k) }

    fn find<Q>(&self, key: &Q) -> Result<usize, usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.binary_search_by(|(k, _)| k.borrow().cmp(key))
    }

    /// Looks up the value stored under `key`.
    ///
    /// # Example
    ///
    /// ```
    /// use lich::prelude::*;
    ///
    /// let vmap = VecMap::from(vec![(Bytes::from("a"), 1)]);
    ///
    /// assert_eq!(vmap.get(&b"a"[..]), Some(&1));
    /// assert_eq!(vmap.get(&b"b"[..]), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).ok().map(|ix| &self.0[ix].1)
    }

    /// Indicates whether `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_ok()
    }

    /// Inserts a value, keeping entries sorted. If the key was already present its
    /// old value is replaced and returned.
    ///
    /// # Example
    ///
    /// ```
    /// use lich::prelude::*;
    ///
    /// let mut vmap = VecMap::new();
    ///
    /// assert_eq!(vmap.insert("b", 1), None);
    /// assert_eq!(vmap.insert("a", 2), None);
    /// assert_eq!(vmap.insert("b", 3), Some(1));
    ///
    /// assert_eq!(vmap, VecMap::from_sorted(vec![("a", 2), ("b", 3)]));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.find(&key) {
            Ok(ix) => Some(mem::replace(&mut self.0[ix].1, value)),
            Err(ix) => {
                self.0.insert(ix, (key, value));
                None
            }
        }
    }
}

impl<K: Ord + Hash, V> VecMap<K, V> {
    /// Consumes a [`VecMap`], producing a [`HashMap`] from the entries.
    pub fn into_hashmap<S: BuildHasher + Default>(self) -> HashMap<K, V, S> {
        self.into_iter().collect()
    }
}

impl<K: Ord, V> From<Vec<(K, V)>> for VecMap<K, V> {
    fn from(mut v: Vec<(K, V)>) -> Self {
        // stable, so among equal keys the last one inserted comes last
        v.sort_by(|(k1, _), (k2, _)| k1.cmp(k2));

        let mut out: Vec<(K, V)> = Vec::with_capacity(v.len());
        for (k, val) in v {
            match out.last_mut() {
                Some(last) if last.0 == k => last.1 = val,
                _ => out.push((k, val)),
            }
        }
        VecMap(out)
    }
}

impl<K: Ord + Hash, V, S: BuildHasher> From<HashMap<K, V, S>> for VecMap<K, V> {
    fn from(hm: HashMap<K, V, S>) -> Self {
        let v: Vec<(K, V)> = hm.into_iter().collect();
        v.into()
    }
}

impl<K: Ord, V> From<BTreeMap<K, V>> for VecMap<K, V> {
    fn from(bt: BTreeMap<K, V>) -> Self { VecMap(bt.into_iter().collect()) }
}

impl<K: Ord, V> IntoIterator for VecMap<K, V> {
    type IntoIter = IntoIter<(K, V)>;
    type Item = (K, V);

    fn into_iter(self) -> IntoIter<(K, V)> { self.0.into_iter() }
}

impl<'a, K: Ord, V> IntoIterator for &'a VecMap<K, V> {
    type IntoIter = Iter<'a, (K, V)>;
    type Item = &'a (K, V);

    fn into_iter(self) -> Iter<'a, (K, V)> { self.0.iter() }
}

impl<K: Ord, V> FromIterator<(K, V)> for VecMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> VecMap<K, V> {
        VecMap::from(Vec::from_iter(iter))
    }
}
