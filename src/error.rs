//! Error types for Huffman coding.

use thiserror::Error;

/// Error variants for Huffman tree construction, encoding and decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// No symbol with a non-zero frequency was supplied.
    #[error("cannot build a prefix code from an empty alphabet")]
    EmptyAlphabet,

    /// The input contains a code unit the tree has no code for.
    #[error("symbol {symbol:#04x} at position {position} is not in the alphabet")]
    SymbolNotInAlphabet {
        /// The offending code unit.
        symbol: u8,
        /// Index of the code unit in the input text.
        position: usize,
    },

    /// The bit stream ended part-way down a code path.
    #[error("bit stream truncated after {consumed} bits ({depth} bits into an unfinished code)")]
    TruncatedStream {
        /// Number of bits consumed in total.
        consumed: usize,
        /// How many bits of the unfinished code had been read.
        depth: usize,
    },

    /// A bit that no code in the tree can start with.
    #[error("bit {position} does not begin any code")]
    InvalidCode {
        /// Index of the offending bit.
        position: usize,
    },

    /// A serialized tree ran out of bits before it was complete.
    #[error("serialized tree needs {needed} more bits at bit {position}")]
    UnexpectedEnd {
        /// Bits required by the field being read.
        needed: usize,
        /// Cursor position when the read failed.
        position: usize,
    },

    /// A serialized tree is structurally impossible for a byte alphabet.
    #[error("malformed tree: {0}")]
    MalformedTree(&'static str),

    /// A bit string contained something other than `0` or `1`.
    #[error("invalid bit character {ch:?} at position {position}")]
    InvalidBitChar {
        /// The offending character.
        ch: char,
        /// Character index in the string.
        position: usize,
    },

    /// A packed buffer claims more bits than its bytes can hold.
    #[error("bit length {bit_len} exceeds the {bytes} bytes provided")]
    InvalidPackedLength {
        /// Claimed number of meaningful bits.
        bit_len: usize,
        /// Number of bytes actually present.
        bytes: usize,
    },
}

/// A specialized Result type for Huffman operations.
pub type Result<T> = std::result::Result<T, Error>;
