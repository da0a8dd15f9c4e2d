use huffman_codec::{build_code_table, build_tree, Codec};
use proptest::prelude::*;
use unicode_segmentation::*;

proptest! {
    #[test]
    fn frequencies(input in any::<String>()) {
        let freqs = huffman_codec::frequencies(input.as_str());
        let graphemes = UnicodeSegmentation::graphemes(input.as_str(), true).collect::<Vec<&str>>();
        // The sum of the frequencies of all the characters is equal to the
        // length of the input.
        assert_eq!(freqs.iter().fold(0, |acc, ch| acc + ch.1), graphemes.len());
        // The cardinality of the frequencies vector is equal to that of the
        // set of the characters of the input.
        let distinct = graphemes.iter().copied().collect::<::std::collections::HashSet::<&str>>();
        assert_eq!(freqs.len(), distinct.len());
        // The keys appear in first-occurrence order.
        let mut seen = Vec::new();
        for &g in &graphemes {
            if !seen.contains(&g) {
                seen.push(g);
            }
        }
        assert_eq!(freqs.iter().map(|&(g, _)| g).collect::<Vec<&str>>(), seen);
    }

    #[test]
    fn codes_are_prefix_free(input in any::<String>()) {
        let freqs = huffman_codec::frequencies(input.as_str());
        prop_assume!(freqs.len() >= 2);
        let table = build_code_table(&build_tree(&freqs).unwrap());
        // Every symbol gets a non-empty codeword.
        freqs.iter().for_each(|&(g, _)| assert!(!table.get(g).unwrap().is_empty()));
        // The codes are instantaneously decodable if no codeword is a prefix
        // of another.
        table.iter()
            .for_each(|(s1, c1)| table.iter().for_each(|(s2, c2)| assert!(!c2.starts_with(c1) || s1 == s2)));
    }

    #[test]
    fn construction_is_deterministic(input in any::<String>()) {
        let freqs = huffman_codec::frequencies(input.as_str());
        prop_assume!(!freqs.is_empty());
        // Same frequency map, same key order: the rebuilt tree and table
        // must match the first ones bit for bit.
        let first = build_tree(&freqs).unwrap();
        let second = build_tree(&freqs).unwrap();
        assert_eq!(first, second);
        assert_eq!(build_code_table(&first), build_code_table(&second));
    }

    #[test]
    fn e2e(input in any::<String>()) {
        let freqs = huffman_codec::frequencies(input.as_str());
        prop_assume!(freqs.len() >= 2);
        let codec = Codec::new(build_tree(&freqs).unwrap());
        let encoded = codec.encode(input.as_str()).unwrap();
        assert_eq!(codec.decode(&encoded).unwrap(), input);
    }
}
