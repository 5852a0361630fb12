use lich::{encoding::*, prelude::*};
use lich_strategy::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig { cases: 1_000, ..ProptestConfig::default() })]

    #[test]
    fn encode_decode(el in arb_element()) {
        let enc = encode_full(&el);

        let dec = decode_full(&enc).ok();

        if dec != Some(el.clone()) {
            panic!("Tried encoding\n {:?}\n as \n{:?}\n got \n{:?}\n", el, enc, dec)
        }
    }

    #[test]
    fn size_is_exact(el in arb_element()) {
        prop_assert_eq!(el.size(), encode_full(&el).len() as u64);
    }

    #[test]
    fn reader_agrees_with_buffer(el in arb_element()) {
        let enc = encode_full(&el);
        prop_assert_eq!(decode(std::io::Cursor::new(&enc)).ok(), Some(el));
    }

    #[test]
    fn insertion_order_is_irrelevant(entries in arb_entries()) {
        let forward = Element::dict(entries.clone());

        // reversing flips which duplicate wins, so dedup by hand first
        let mut deduped: Vec<(Bytes, Element)> = Vec::new();
        for (k, v) in entries {
            match deduped.iter_mut().find(|(dk, _)| *dk == k) {
                Some(slot) => slot.1 = v,
                None => deduped.push((k, v)),
            }
        }
        deduped.reverse();
        let backward = Element::dict(deduped);

        prop_assert_eq!(encode_full(&forward), encode_full(&backward));
    }

    #[test]
    fn truncation_is_an_error(el in arb_element(), cut in any::<prop::sample::Index>()) {
        let enc = encode_full(&el);
        let cut = cut.index(enc.len());
        prop_assert!(decode_full(&enc[..cut]).is_err());
    }

    #[test]
    fn lexer_tokens_rebuild_the_tree(el in arb_element()) {
        let enc = encode_full(&el);
        let tokens = lex_full(&enc).unwrap();
        let rebuilt = decode_tokens(tokens.into_iter().map(Ok), &Config::default()).unwrap();
        prop_assert_eq!(rebuilt, el);
    }
}
