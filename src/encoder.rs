//! Text to bits.

use crate::bits::{BitStr, Bits, Packed};
use crate::error::{Error, Result};
use crate::tree::HuffmanTree;

/// What to do with a code unit the tree has no code for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownSymbolPolicy {
    /// Fail with `Error::SymbolNotInAlphabet`.
    #[default]
    Reject,
    /// Drop the code unit and carry on. The output no longer decodes to the
    /// input.
    Skip,
}

/// Huffman encoder over a borrowed tree.
#[derive(Debug, Clone)]
pub struct HuffmanEncoder<'a> {
    tree: &'a HuffmanTree,
    codes: Vec<Option<Bits>>, // symbol -> code
    policy: UnknownSymbolPolicy,
}

impl<'a> HuffmanEncoder<'a> {
    /// Create an encoder from the tree's leaf codes.
    pub fn new(tree: &'a HuffmanTree) -> Self {
        let mut codes = vec![None; 256];
        for leaf in tree.leaves() {
            if let Some(symbol) = leaf.symbol() {
                codes[symbol as usize] = Some(leaf.code().to_bitvec());
            }
        }
        Self {
            tree,
            codes,
            policy: UnknownSymbolPolicy::default(),
        }
    }

    /// Set how symbols outside the alphabet are handled.
    pub fn with_policy(mut self, policy: UnknownSymbolPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The active unknown-symbol policy.
    pub fn policy(&self) -> UnknownSymbolPolicy {
        self.policy
    }

    /// The tree this encoder reads codes from.
    pub fn tree(&self) -> &'a HuffmanTree {
        self.tree
    }

    /// The code for `symbol`, or `None` if it is not in the alphabet.
    pub fn encode_symbol(&self, symbol: u8) -> Option<&BitStr> {
        self.codes[symbol as usize].as_deref()
    }

    /// Encode `text` into a fresh bit sequence.
    ///
    /// # Errors
    /// Returns `Error::SymbolNotInAlphabet` under the `Reject` policy.
    pub fn encode_text(&self, text: &[u8]) -> Result<Bits> {
        let mut out = Bits::with_capacity(text.len() * self.tree.max_code_len() / 2);
        self.encode_into(text, &mut out)?;
        Ok(out)
    }

    /// Append the encoding of `text` to `out`.
    ///
    /// On error `out` holds the codes written before the offending symbol.
    ///
    /// # Errors
    /// Returns `Error::SymbolNotInAlphabet` under the `Reject` policy.
    pub fn encode_into(&self, text: &[u8], out: &mut Bits) -> Result<()> {
        let mut skipped = 0usize;
        for (position, &symbol) in text.iter().enumerate() {
            match (self.encode_symbol(symbol), self.policy) {
                (Some(code), _) => out.extend_from_bitslice(code),
                (None, UnknownSymbolPolicy::Skip) => skipped += 1,
                (None, UnknownSymbolPolicy::Reject) => {
                    return Err(Error::SymbolNotInAlphabet { symbol, position });
                }
            }
        }
        if skipped > 0 {
            log::debug!("skipped {} code units outside the alphabet", skipped);
        }
        Ok(())
    }

    /// Encode `text` behind the serialized tree, packed into bytes.
    ///
    /// # Errors
    /// As [`HuffmanEncoder::encode_text`].
    pub fn pack(&self, text: &[u8]) -> Result<Packed> {
        self.pack_with_tree_bits(text, &self.tree.serialize())
    }

    /// Encode `text` behind caller-supplied tree bits, packed into bytes.
    ///
    /// # Errors
    /// As [`HuffmanEncoder::encode_text`].
    pub fn pack_with_tree_bits(&self, text: &[u8], tree_bits: &BitStr) -> Result<Packed> {
        let mut bits = Bits::with_capacity(tree_bits.len() + text.len() * 4);
        bits.extend_from_bitslice(tree_bits);
        self.encode_into(text, &mut bits)?;
        let packed = Packed::from_bits(&bits);
        log::debug!(
            "packed {} code units: {} tree bits + {} data bits into {} bytes",
            text.len(),
            tree_bits.len(),
            packed.bit_len() - tree_bits.len(),
            packed.as_bytes().len()
        );
        Ok(packed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::to_bit_string;

    fn abcd() -> HuffmanTree {
        HuffmanTree::build([(b'A', 5), (b'B', 2), (b'C', 1), (b'D', 1)]).unwrap()
    }

    #[test]
    fn test_encode_symbol() {
        let tree = abcd();
        let encoder = HuffmanEncoder::new(&tree);
        assert_eq!(encoder.encode_symbol(b'A').map(to_bit_string), Some("1".into()));
        assert_eq!(encoder.encode_symbol(b'D').map(to_bit_string), Some("011".into()));
        assert!(encoder.encode_symbol(b'Z').is_none());
    }

    #[test]
    fn test_encode_text() {
        let tree = abcd();
        let encoder = HuffmanEncoder::new(&tree);
        let bits = encoder.encode_text(b"ABCDA").unwrap();
        assert_eq!(to_bit_string(&bits), "1000100111");
        assert!(encoder.encode_text(b"").unwrap().is_empty());
    }

    #[test]
    fn test_single_symbol_uses_one_bit() {
        let tree = HuffmanTree::build([(b'A', 5)]).unwrap();
        let encoder = HuffmanEncoder::new(&tree);
        assert_eq!(to_bit_string(&encoder.encode_text(b"AAAAA").unwrap()), "00000");
    }

    #[test]
    fn test_unknown_symbol_is_rejected_by_default() {
        let tree = abcd();
        let encoder = HuffmanEncoder::new(&tree);
        assert_eq!(encoder.policy(), UnknownSymbolPolicy::Reject);
        assert_eq!(
            encoder.encode_text(b"ABxA"),
            Err(Error::SymbolNotInAlphabet {
                symbol: b'x',
                position: 2
            })
        );
    }

    #[test]
    fn test_skip_policy_drops_unknown_symbols() {
        let tree = abcd();
        let encoder = HuffmanEncoder::new(&tree).with_policy(UnknownSymbolPolicy::Skip);
        let lossy = encoder.encode_text(b"AxBy").unwrap();
        let clean = encoder.encode_text(b"AB").unwrap();
        assert_eq!(lossy, clean);
    }

    #[test]
    fn test_pack_prepends_tree() {
        let tree = abcd();
        let encoder = HuffmanEncoder::new(&tree);
        let packed = encoder.pack(b"AB").unwrap();

        let tree_bits = tree.serialize();
        assert_eq!(packed.bit_len(), tree_bits.len() + 3);
        assert_eq!(&packed.as_bits()[..tree_bits.len()], tree_bits.as_bitslice());
        assert_eq!(to_bit_string(&packed.as_bits()[tree_bits.len()..]), "100");
        assert_eq!(packed.as_bytes().len(), packed.bit_len().div_ceil(8));
    }

    #[test]
    fn test_pack_with_custom_tree_bits() {
        let tree = abcd();
        let encoder = HuffmanEncoder::new(&tree);
        let packed = encoder.pack_with_tree_bits(b"AAB", &Bits::new()).unwrap();
        assert_eq!(to_bit_string(packed.as_bits()), "1100");
        assert_eq!(packed.as_bytes(), &[0b1100_0000]);
        assert_eq!(packed.padding_bits(), 4);
    }

    #[test]
    fn test_encoders_share_a_tree() {
        let tree = abcd();
        let strict = HuffmanEncoder::new(&tree);
        let lenient = HuffmanEncoder::new(&tree).with_policy(UnknownSymbolPolicy::Skip);
        assert!(std::ptr::eq(strict.tree(), lenient.tree()));
        assert_eq!(strict.encode_text(b"CAB"), lenient.encode_text(b"CAB"));
    }
}
