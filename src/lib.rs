//! # Huffman codec
//!
//! `huffman-codec` derives a prefix-free binary code from symbol frequencies
//! using the [Huffman coding](https://en.wikipedia.org/wiki/Huffman_coding)
//! algorithm, encodes text into a bitstream, and decodes such a bitstream
//! back into text.
//!
//! The pipeline is [`frequencies`] → [`build_tree`] → [`build_code_table`] →
//! [`encode`] / [`decode`]; [`Codec`] bundles the last three steps around an
//! owned tree. Tree construction is deterministic but deliberately
//! non-standard: ties on the minimum weight are resolved by list position,
//! not by a stable priority queue, so the exact codeword assigned to each
//! symbol is reproducible run to run (see [`build_tree`]).
//!
//! Bitstreams here are in-memory [`Encoded`] bit vectors; packing them into
//! bytes or a file format is the caller's concern.
//!
//! ## References
//!
//! * _Huffman, D.A., 1952. A method for the construction of minimum-redundancy codes. Proceedings of the IRE, 40(9), pp.1098-1101._

pub mod codec;
pub mod error;
pub mod tree;

pub use codec::{build_code_table, decode, encode, CodeTable, Codec, Encoded};
pub use error::{Error, Result};
pub use tree::{build_tree, Node, NodeId, Tree};

use unicode_segmentation::UnicodeSegmentation;

/// Creates and returns a list of pairs of the characters found in the input
/// with their count, in the order each character first appears.
///
/// First-occurrence order matters: it is the order leaves are created in, and
/// the tie-breaking in [`build_tree`] depends on it.
///
/// # Examples
///
/// Basic usage:
///
/// ```
/// let freqs = huffman_codec::frequencies("abracadabra");
/// let mut iter = freqs.iter();
///
/// assert_eq!(iter.next(), Some(&("a", 5)));
/// assert_eq!(iter.next(), Some(&("b", 2)));
/// assert_eq!(iter.next(), Some(&("r", 2)));
/// assert_eq!(iter.next(), Some(&("c", 1)));
/// assert_eq!(iter.next(), Some(&("d", 1)));
/// assert_eq!(iter.next(), None);
/// ```
pub fn frequencies(s: &str) -> Vec<(&str, usize)> {
    let mut positions: ::std::collections::HashMap<&str, usize> =
        ::std::collections::HashMap::new();
    let mut freqs: Vec<(&str, usize)> = Vec::new();
    for g in UnicodeSegmentation::graphemes(s, true) {
        match positions.get(g) {
            Some(&position) => freqs[position].1 += 1,
            None => {
                positions.insert(g, freqs.len());
                freqs.push((g, 1));
            }
        }
    }
    freqs
}
