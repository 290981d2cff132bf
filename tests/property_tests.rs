use huffman::{compress, decompress, FrequencyMap, HuffmanTree, Symbol};
use proptest::prelude::*;

fn frequency_map() -> impl Strategy<Value = FrequencyMap> {
    prop::collection::btree_map(0..=256u16, 0..10_000u64, 0..64).prop_map(|counts| {
        counts
            .into_iter()
            .map(|(code, count)| (Symbol::from_code(code).unwrap(), count))
            .collect::<FrequencyMap>()
    })
}

proptest! {
    #[test]
    fn test_round_trip(input in prop::collection::vec(any::<u8>(), 0..2048)) {
        let packed = compress(&input).unwrap();
        prop_assert_eq!(decompress(&packed).unwrap(), input);
    }

    #[test]
    fn test_round_trip_skewed(input in prop::collection::vec(prop::sample::select(vec![b'a', b'a', b'a', b'b', b'c']), 1..512)) {
        let packed = compress(&input).unwrap();
        prop_assert_eq!(decompress(&packed).unwrap(), input);
    }

    #[test]
    fn test_header_round_trip(map in frequency_map()) {
        let parsed: FrequencyMap = map.to_string().parse().unwrap();
        prop_assert_eq!(parsed, map);
    }

    #[test]
    fn test_prefix_free(input in prop::collection::vec(any::<u8>(), 0..1024)) {
        let tree = HuffmanTree::from_frequencies(&FrequencyMap::from_bytes(&input)).unwrap();
        let table = tree.code_table();
        let codes: Vec<_> = table.iter().collect();

        for (i, (_, a)) in codes.iter().enumerate() {
            for (_, b) in &codes[i + 1..] {
                prop_assert!(!a.starts_with(b) && !b.starts_with(a));
            }
        }
    }

    #[test]
    fn test_rarer_symbols_get_longer_codes(input in prop::collection::vec(any::<u8>(), 0..1024)) {
        let freq = FrequencyMap::from_bytes(&input);
        let table = HuffmanTree::from_frequencies(&freq).unwrap().code_table();

        for (s1, c1) in freq.iter() {
            for (s2, c2) in freq.iter() {
                if c1 < c2 {
                    prop_assert!(table.get(s1).unwrap().len() >= table.get(s2).unwrap().len());
                }
            }
        }
    }

    #[test]
    fn test_truncation_is_detected(input in prop::collection::vec(any::<u8>(), 1..512)) {
        let (e, d) = huffman::huffman(&input).unwrap().into_encoder_decoder_pair();
        let mut bits = e.encode(&input).unwrap();
        bits.pop();

        prop_assert!(matches!(d.decode_bits(&bits), Err(huffman::Error::TruncatedStream)));
    }
}
