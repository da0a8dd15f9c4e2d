//! Error types for the coding engine.

use thiserror::Error;

/// Error variants for tree construction, encoding, and decoding.
///
/// All of these are deterministic validation failures: the same inputs fail
/// the same way every time, and no partial state survives a failed call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The symbol has no codeword in the table it was encoded against.
    #[error("no codeword for symbol {0:?}")]
    UnknownSymbol(String),

    /// The bitstream is not a valid encoding under the code table: the
    /// candidate set went empty, or the stream ended mid-codeword. `offset`
    /// is the bit position at which the failing symbol began.
    #[error("invalid encoding at bit {offset}")]
    InvalidEncoding {
        /// Bit offset of the start of the symbol that failed to decode.
        offset: usize,
    },

    /// A tree was requested for an empty frequency map.
    #[error("cannot build a tree from an empty frequency map")]
    EmptyInput,
}

/// A specialized Result type for coding operations.
pub type Result<T> = std::result::Result<T, Error>;
