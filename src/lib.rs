//! # Huffman Coding
//!
//! *Optimal prefix codes with a self-describing bit-level wire format.*
//!
//! ## Intuition First
//!
//! Morse code gives `E` a single dot and `Q` four symbols, because `E` shows
//! up far more often. Huffman coding does the same thing optimally: frequent
//! symbols get short bit strings, rare symbols get long ones, and no code is
//! ever the beginning of another, so a decoder never needs separators.
//!
//! The codes come from a binary tree. Every symbol is a leaf, and its code is
//! the path from the root: `0` for a left turn, `1` for a right turn.
//!
//! ## The Algorithm
//!
//! ```text
//! 1. one leaf per symbol, weighted by frequency
//! 2. pop the two lightest nodes
//! 3. join them under a new node weighing their sum; push it back
//! 4. repeat until one node is left: the root
//! ```
//!
//! Merging the two least frequent items first is provably optimal (an
//! exchange argument): no prefix code gives a shorter total encoded length
//! $\sum_s f_s \cdot |c_s|$ for the same frequencies.
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon     Entropy as the fundamental limit
//! 1949  Fano        Shannon-Fano coding: top-down, not always optimal
//! 1952  Huffman     Bottom-up merging: optimal prefix codes
//! 1976  Rissanen    Arithmetic coding beats the whole-bit limit
//! 1989  Katz        DEFLATE pairs LZ77 with canonical Huffman codes
//! ```
//!
//! ## Wire Format
//!
//! A packed stream is the serialized tree followed directly by the data bits,
//! MSB-first, with no delimiter:
//!
//! ```text
//! tree := 1 <8-bit symbol>        (leaf)
//!       | 0 <tree> <tree>         (internal, left then right)
//! ```
//!
//! The tree's structure marks its own end. [`Packed`] stores the bit count
//! next to the bytes so the zero padding in the last byte is never mistaken
//! for data.
//!
//! ## Failure Modes
//!
//! 1. **Unknown symbols**: text containing a code unit that had no frequency
//!    cannot be encoded losslessly; it is rejected unless
//!    [`UnknownSymbolPolicy::Skip`] is chosen.
//! 2. **Truncation**: a stream ending part-way down a code is reported as
//!    [`Error::TruncatedStream`], never silently dropped.
//! 3. **One symbol**: a real prefix code for a single symbol needs zero bits;
//!    here it gets the one-bit code `0` so that occurrences can be counted.
//!
//! ## Example
//!
//! ```
//! use huffcode::{HuffmanDecoder, HuffmanEncoder, HuffmanTree};
//!
//! let tree = HuffmanTree::build([(b'A', 5), (b'B', 2), (b'C', 1), (b'D', 1)])?;
//! let bits = HuffmanEncoder::new(&tree).encode_text(b"ABACAD")?;
//! let text = HuffmanDecoder::new(&tree).decode_text(&bits)?;
//! assert_eq!(text, b"ABACAD");
//!
//! let packed = huffcode::compress(b"abracadabra")?;
//! assert_eq!(huffcode::decompress(&packed)?, b"abracadabra");
//! # Ok::<(), huffcode::Error>(())
//! ```
//!
//! ## References
//!
//! - Huffman, D. A. (1952). "A Method for the Construction of Minimum-Redundancy Codes."
//! - Cover, T. M., Thomas, J. A. (2006). *Elements of Information Theory*, ch. 5.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bits;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod node;
pub mod tree;

pub use bits::{BitCursor, BitStr, Bits, Packed};
pub use decoder::{decode_packed, unpack, HuffmanDecoder};
pub use encoder::{HuffmanEncoder, UnknownSymbolPolicy};
pub use error::{Error, Result};
pub use node::Node;
pub use tree::{count_frequencies, HuffmanTree};

/// Build a tree from `text` and pack the tree followed by the encoded text.
///
/// # Errors
/// Returns `Error::EmptyAlphabet` if `text` is empty.
pub fn compress(text: &[u8]) -> Result<Packed> {
    let tree = HuffmanTree::from_text(text)?;
    HuffmanEncoder::new(&tree).pack(text)
}

/// Invert [`compress`].
///
/// # Errors
/// As [`unpack`].
pub fn decompress(packed: &Packed) -> Result<Vec<u8>> {
    unpack(packed).map(|(_, text)| text)
}
