use bytes::Bytes;
use lich::{vecmap::VecMap, Element};
use proptest::prelude::*;

/// arbitrary Bytes for use with proptest
pub fn arb_bytes() -> impl Strategy<Value = Bytes> {
    prop_oneof![
        // text, including the format's own delimiters
        "[0-9<>\\[\\]{}a-z ]*".prop_map(Bytes::from),
        ".*".prop_map(Bytes::from),
        // raw binary
        prop::collection::vec(any::<u8>(), 0..64).prop_map(Bytes::from),
    ]
}

/// arbitrary Element for use with proptest
pub fn arb_element() -> impl Strategy<Value = Element> {
    let leaf = arb_bytes().prop_map(Element::Data);
    leaf.prop_recursive(
        8,  // max depth
        64, // max nodes
        10, // max items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..10).prop_map(Element::Array),
                prop::collection::btree_map(arb_bytes(), inner, 0..10)
                    .prop_map(|m| Element::Dict(VecMap::from(m)))
            ]
        },
    )
}

/// arbitrary dict entries, possibly with repeated keys, for use with proptest
pub fn arb_entries() -> impl Strategy<Value = Vec<(Bytes, Element)>> {
    prop::collection::vec(("[a-d]{0,2}".prop_map(Bytes::from), arb_element()), 0..12)
}
