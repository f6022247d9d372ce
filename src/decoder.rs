//! Bits to text.
//!
//! [`HuffmanDecoder`] is a small state machine: a cursor into the tree that
//! starts at the root, steps one child per bit and jumps back to the root
//! every time it lands on a leaf. Because the cursor survives between calls,
//! a stream can be fed in arbitrary pieces; only [`HuffmanDecoder::finish`]
//! (or [`HuffmanDecoder::decode_text`], which calls it) insists that the
//! input ended on a code boundary.

use crate::bits::{BitCursor, BitStr, Packed};
use crate::error::{Error, Result};
use crate::node::Node;
use crate::tree::HuffmanTree;

/// Huffman decoder over a borrowed tree.
///
/// Each decoder owns its cursor, so any number of them may share one tree.
#[derive(Debug, Clone)]
pub struct HuffmanDecoder<'a> {
    tree: &'a HuffmanTree,
    cursor: &'a Node,
    depth: usize,
    consumed: usize,
}

impl<'a> HuffmanDecoder<'a> {
    /// Create a decoder positioned at the root of `tree`.
    pub fn new(tree: &'a HuffmanTree) -> Self {
        Self {
            tree,
            cursor: tree.root(),
            depth: 0,
            consumed: 0,
        }
    }

    /// The tree being walked.
    pub fn tree(&self) -> &'a HuffmanTree {
        self.tree
    }

    /// True when no code is partially read.
    pub fn is_at_root(&self) -> bool {
        self.depth == 0
    }

    /// Bits consumed since creation or the last [`HuffmanDecoder::reset`].
    pub fn bits_consumed(&self) -> usize {
        self.consumed
    }

    /// Drop any partial code and the bit count.
    pub fn reset(&mut self) {
        self.cursor = self.tree.root();
        self.depth = 0;
        self.consumed = 0;
    }

    /// Feed one bit; returns the symbol if it completed a code.
    ///
    /// On a single-leaf tree every `0` bit is one occurrence of the symbol.
    ///
    /// # Errors
    /// Returns `Error::InvalidCode` for a `1` bit on a single-leaf tree,
    /// where no code starts with `1`.
    pub fn decode_bit(&mut self, bit: bool) -> Result<Option<u8>> {
        let root = self.tree.root();
        if let Some(symbol) = root.symbol() {
            if bit {
                return Err(Error::InvalidCode {
                    position: self.consumed,
                });
            }
            self.consumed += 1;
            return Ok(Some(symbol));
        }

        let next = match self.cursor.traverse(bit) {
            Some(next) => next,
            None => unreachable!("decoder cursor rested on a leaf"),
        };
        self.consumed += 1;

        match next.symbol() {
            Some(symbol) => {
                self.cursor = root;
                self.depth = 0;
                Ok(Some(symbol))
            }
            None => {
                self.cursor = next;
                self.depth += 1;
                Ok(None)
            }
        }
    }

    /// Feed `bits`, appending every completed symbol to `out`.
    ///
    /// A trailing partial code is kept for the next call.
    ///
    /// # Errors
    /// As [`HuffmanDecoder::decode_bit`].
    pub fn decode_into(&mut self, bits: &BitStr, out: &mut Vec<u8>) -> Result<()> {
        for bit in bits.iter().by_vals() {
            if let Some(symbol) = self.decode_bit(bit)? {
                out.push(symbol);
            }
        }
        Ok(())
    }

    /// Check that the input ended on a code boundary.
    ///
    /// The cursor returns to the root either way.
    ///
    /// # Errors
    /// Returns `Error::TruncatedStream` if a code was left unfinished.
    pub fn finish(&mut self) -> Result<()> {
        let depth = self.depth;
        self.cursor = self.tree.root();
        self.depth = 0;
        if depth > 0 {
            return Err(Error::TruncatedStream {
                consumed: self.consumed,
                depth,
            });
        }
        Ok(())
    }

    /// Decode a complete bit sequence.
    ///
    /// # Errors
    /// `Error::TruncatedStream` if the bits stop mid-code, or as
    /// [`HuffmanDecoder::decode_bit`].
    pub fn decode_text(&mut self, bits: &BitStr) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(bits.len() / 2);
        self.decode_into(bits, &mut out)?;
        self.finish()?;
        Ok(out)
    }
}

/// Decode a self-describing stream: a serialized tree followed by data bits.
///
/// Returns the restored tree together with the text.
///
/// # Errors
/// Tree errors from [`HuffmanTree::deserialize`], data errors from
/// [`HuffmanDecoder::decode_text`].
pub fn decode_packed(bits: &BitStr) -> Result<(HuffmanTree, Vec<u8>)> {
    let mut cursor = BitCursor::new(bits);
    let tree = HuffmanTree::deserialize(&mut cursor)?;
    let data = cursor.remaining();
    let text = HuffmanDecoder::new(&tree).decode_text(data)?;
    log::debug!(
        "unpacked {} code units from {} tree bits + {} data bits",
        text.len(),
        cursor.position(),
        data.len()
    );
    Ok((tree, text))
}

/// Decode the meaningful bits of a [`Packed`] stream.
///
/// # Errors
/// As [`decode_packed`].
pub fn unpack(packed: &Packed) -> Result<(HuffmanTree, Vec<u8>)> {
    decode_packed(packed.as_bits())
}
