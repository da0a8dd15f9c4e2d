//! Codeword derivation, encoding, and decoding.

use std::cell::OnceCell;
use std::collections::HashMap;

use bitvec::prelude::*;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{Error, Result};
use crate::tree::Tree;

/// An encoded text is represented as a
/// [`bitvec::vec::BitVec`](https://docs.rs/bitvec/latest/bitvec/vec/struct.BitVec.html),
/// a contiguous array of bits.
pub type Encoded = BitVec;

const ZERO: bool = false;
const ONE: bool = true;

/// A mapping from symbol ([a Unicode grapheme cluster](http://www.unicode.org/reports/tr29/#Grapheme_Cluster_Boundaries))
/// to its codeword.
///
/// Codewords read root-to-leaf: a `0` bit means "left child", a `1` bit means
/// "right child". Tables derived from a tree are prefix-free, since leaves
/// never have children: no symbol's codeword can be a prefix of another's.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: HashMap<String, Encoded>,
}

impl CodeTable {
    /// Builds a table from explicit `(symbol, codeword)` pairs.
    ///
    /// Nothing checks that the pairs form a prefix-free code; a table that
    /// does not will make [`decode`] report [`Error::InvalidEncoding`] on
    /// streams it cannot disambiguate.
    ///
    /// # Examples
    ///
    /// Basic usage:
    ///
    /// ```
    /// use bitvec::prelude::*;
    /// use huffman_codec::CodeTable;
    ///
    /// let table = CodeTable::from_codes([
    ///     ("a".to_string(), bitvec![0]),
    ///     ("b".to_string(), bitvec![1]),
    /// ]);
    /// assert_eq!(table.get("a"), Some(&bitvec![0]));
    /// ```
    pub fn from_codes(codes: impl IntoIterator<Item = (String, Encoded)>) -> Self {
        CodeTable {
            codes: codes.into_iter().collect(),
        }
    }

    /// The codeword for `symbol`, if it has one.
    pub fn get(&self, symbol: &str) -> Option<&Encoded> {
        self.codes.get(symbol)
    }

    /// Number of symbols in the table.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the table holds no codewords.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterates over the `(symbol, codeword)` pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Encoded)> {
        self.codes.iter().map(|(symbol, code)| (symbol.as_str(), code))
    }
}

/// Derives the code table for a tree: each leaf's codeword is its path from
/// the root, read one branch choice per bit.
///
/// The walk actually runs leaf-to-root over the parent links and is reversed
/// afterwards. For a single-symbol tree the sole leaf *is* the root and its
/// codeword comes out empty; see [`decode`] for how that case is handled.
///
/// # Examples
///
/// Basic usage:
///
/// ```
/// use bitvec::prelude::*;
/// use huffman_codec::{build_code_table, build_tree};
///
/// let tree = build_tree(&[("a", 3), ("b", 1), ("c", 1)]).unwrap();
/// let table = build_code_table(&tree);
///
/// assert_eq!(table.get("a"), Some(&bitvec![1]));
/// assert_eq!(table.get("b"), Some(&bitvec![0, 0]));
/// assert_eq!(table.get("c"), Some(&bitvec![0, 1]));
/// ```
pub fn build_code_table(tree: &Tree) -> CodeTable {
    let mut codes = HashMap::new();
    for &leaf in tree.leaves() {
        let mut path = vec![leaf];
        let mut current = leaf;
        while let Some(parent) = tree.node(current).parent() {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        let mut code = Encoded::new();
        for step in path.windows(2) {
            let (parent, child) = (step[0], step[1]);
            if let Some((left, _)) = tree.node(parent).children() {
                code.push(if child == left { ZERO } else { ONE });
            }
        }
        if let Some(symbol) = tree.node(leaf).symbol() {
            codes.insert(symbol.to_string(), code);
        }
    }
    CodeTable { codes }
}

/// Encodes a text as the concatenation of its symbols' codewords.
///
/// The table need not have been built from this exact text's frequencies; it
/// only has to cover every symbol the text contains.
///
/// # Examples
///
/// Basic usage:
///
/// ```
/// use bitvec::prelude::*;
/// use huffman_codec::{build_code_table, build_tree, encode};
///
/// let tree = build_tree(&[("a", 3), ("b", 1), ("c", 1)]).unwrap();
/// let table = build_code_table(&tree);
///
/// assert_eq!(encode(&table, "abc").unwrap(), bitvec![1, 0, 0, 0, 1]);
/// ```
///
/// # Errors
///
/// Returns [`Error::UnknownSymbol`] for any symbol without a codeword; no
/// partial output is produced.
///
/// ```
/// use huffman_codec::{build_code_table, build_tree, encode, Error};
///
/// let tree = build_tree(&[("a", 3), ("b", 1), ("c", 1)]).unwrap();
/// let table = build_code_table(&tree);
///
/// assert_eq!(
///     encode(&table, "abd"),
///     Err(Error::UnknownSymbol("d".to_string())),
/// );
/// ```
pub fn encode(table: &CodeTable, text: &str) -> Result<Encoded> {
    let mut encoded = Encoded::new();
    for symbol in UnicodeSegmentation::graphemes(text, true) {
        let code = table
            .get(symbol)
            .ok_or_else(|| Error::UnknownSymbol(symbol.to_string()))?;
        encoded.extend_from_bitslice(code);
    }
    Ok(encoded)
}

/// Decodes a bitstream produced against the same code table.
///
/// Works by candidate pruning: each output symbol starts from the full set of
/// table entries and drops, bit position by bit position, every codeword that
/// is too short or disagrees with the stream, until exactly one survives.
/// The survivor is emitted and the scan advances by its codeword length. The
/// prefix-free property of tree-derived tables guarantees this reproduces
/// exactly the text that [`encode`] consumed.
///
/// # Examples
///
/// Basic usage:
///
/// ```
/// use bitvec::prelude::*;
/// use huffman_codec::{build_code_table, build_tree, decode};
///
/// let tree = build_tree(&[("a", 3), ("b", 1), ("c", 1)]).unwrap();
/// let table = build_code_table(&tree);
///
/// assert_eq!(decode(&table, bits![1, 0, 0, 0, 1]).unwrap(), "abc");
/// assert_eq!(decode(&table, bits![]).unwrap(), "");
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidEncoding`] when the stream is not a valid encoding
/// under this table: the candidate set empties, the stream ends while still
/// narrowing (a truncated codeword), or the sole surviving codeword is empty
/// while bits remain (a single-symbol table cannot decode a non-empty
/// stream).
///
/// ```
/// use bitvec::prelude::*;
/// use huffman_codec::{build_code_table, build_tree, decode, Error};
///
/// let tree = build_tree(&[("a", 3), ("b", 1), ("c", 1)]).unwrap();
/// let table = build_code_table(&tree);
///
/// // "a" decodes, then the lone 0 bit is a truncated codeword.
/// assert_eq!(
///     decode(&table, bits![1, 0]),
///     Err(Error::InvalidEncoding { offset: 1 }),
/// );
/// ```
pub fn decode(table: &CodeTable, encoded: &BitSlice) -> Result<String> {
    let mut decoded = String::new();
    let mut offset = 0;
    while offset < encoded.len() {
        let mut candidates: Vec<(&str, &Encoded)> = table.iter().collect();
        let mut position = 0;
        while candidates.len() != 1 {
            if candidates.is_empty() || offset + position >= encoded.len() {
                return Err(Error::InvalidEncoding { offset });
            }
            let bit = encoded[offset + position];
            candidates.retain(|&(_, code)| position < code.len() && code[position] == bit);
            position += 1;
        }
        let (symbol, code) = candidates[0];
        if code.is_empty() {
            // An empty codeword can never consume input.
            return Err(Error::InvalidEncoding { offset });
        }
        decoded.push_str(symbol);
        offset += code.len();
    }
    Ok(decoded)
}

/// Owns a [`Tree`] and encodes or decodes against it, deriving the code
/// table lazily on first use.
///
/// # Examples
///
/// Basic usage:
///
/// ```
/// use huffman_codec::{build_tree, frequencies, Codec};
///
/// let text = "a dead dad ceded a bad babe a beaded abaca bed";
/// let codec = Codec::new(build_tree(&frequencies(text)).unwrap());
///
/// let encoded = codec.encode(text).unwrap();
/// assert_eq!(codec.decode(&encoded).unwrap(), text);
/// ```
#[derive(Debug)]
pub struct Codec {
    tree: Tree,
    table: OnceCell<CodeTable>,
}

impl Codec {
    /// Wraps a built tree.
    pub fn new(tree: Tree) -> Self {
        Codec {
            tree,
            table: OnceCell::new(),
        }
    }

    /// The tree this codec encodes and decodes against.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The code table, deriving it if no call has needed it yet.
    pub fn table(&self) -> &CodeTable {
        self.table.get_or_init(|| build_code_table(&self.tree))
    }

    /// Encodes `text` against this codec's table; see [`encode`].
    pub fn encode(&self, text: &str) -> Result<Encoded> {
        encode(self.table(), text)
    }

    /// Decodes `encoded` against this codec's table; see [`decode`].
    pub fn decode(&self, encoded: &BitSlice) -> Result<String> {
        decode(self.table(), encoded)
    }
}
