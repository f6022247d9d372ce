//! Huffman tree construction and the self-describing tree wire format.
//!
//! # Construction
//!
//! Classic greedy merging: every symbol with a non-zero weight becomes a
//! leaf in a min-priority queue; the two lightest entries are popped, joined
//! under a new internal node (first popped on the left) and pushed back until
//! one node remains.
//!
//! Ties are broken by a fixed total order so that the same frequencies always
//! give the same tree, independent of how the caller iterates them:
//!
//! ```text
//! weight ascending
//!   -> leaves before internal nodes
//!     -> symbol ascending (leaves)
//!       -> insertion order ascending (internal nodes)
//! ```
//!
//! # Wire format
//!
//! Pre-order: a leaf is `1` followed by its 8-bit symbol, an internal node
//! is `0` followed by its left and right subtrees. The format carries no
//! length; the structure itself says where it ends.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use crate::bits::{to_bit_string, BitCursor, BitStr, Bits};
use crate::error::{Error, Result};
use crate::node::Node;

/// Heap entry: a pending subtree plus its insertion sequence number.
#[derive(Debug)]
struct Queued {
    node: Node,
    seq: usize,
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .node
            .construction_cmp(&self.node)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

/// Count how often each code unit occurs in `text`.
pub fn count_frequencies(text: &[u8]) -> BTreeMap<u8, u64> {
    text.iter().fold(BTreeMap::new(), |mut acc, &byte| {
        *acc.entry(byte).or_insert(0) += 1;
        acc
    })
}

/// An immutable prefix-code tree over byte symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
    restored: bool,
}

impl HuffmanTree {
    /// Build an optimal prefix-code tree from `(symbol, weight)` pairs.
    ///
    /// Zero weights are ignored and repeated symbols have their weights
    /// summed. A single symbol yields a lone leaf with the code `0`.
    ///
    /// # Errors
    /// Returns `Error::EmptyAlphabet` if no symbol has a non-zero weight.
    pub fn build<I>(frequencies: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut weights = BTreeMap::new();
        for (symbol, weight) in frequencies {
            if weight > 0 {
                let slot = weights.entry(symbol).or_insert(0u64);
                *slot = slot.saturating_add(weight);
            }
        }

        let mut heap = BinaryHeap::with_capacity(weights.len());
        let mut seq = 0;
        for (symbol, weight) in weights {
            heap.push(Queued {
                node: Node::leaf(symbol, weight),
                seq,
            });
            seq += 1;
        }
        let symbol_count = heap.len();

        let root = loop {
            let Some(first) = heap.pop() else {
                return Err(Error::EmptyAlphabet);
            };
            let Some(second) = heap.pop() else {
                break first.node;
            };
            log::trace!(
                "merge {:?}/{} + {:?}/{}",
                first.node.symbol(),
                first.node.weight(),
                second.node.symbol(),
                second.node.weight()
            );
            heap.push(Queued {
                node: Node::merge(first.node, second.node),
                seq,
            });
            seq += 1;
        };

        let tree = Self::from_root(root, false);
        if log::log_enabled!(log::Level::Trace) {
            for (symbol, code) in tree.encoding_table() {
                log::trace!("code {:#04x} -> {}", symbol, to_bit_string(&code));
            }
        }
        log::debug!(
            "built huffman tree: {} symbols, max code length {}",
            symbol_count,
            tree.max_code_len()
        );
        Ok(tree)
    }

    /// Build a tree from the symbol frequencies of `text`.
    ///
    /// # Errors
    /// Returns `Error::EmptyAlphabet` if `text` is empty.
    pub fn from_text(text: &[u8]) -> Result<Self> {
        Self::build(count_frequencies(text))
    }

    fn from_root(mut root: Node, restored: bool) -> Self {
        let mut prefix = Bits::new();
        if root.is_leaf() {
            // A lone symbol still needs one bit per occurrence.
            prefix.push(false);
        }
        root.assign_codes(&prefix);
        Self { root, restored }
    }

    /// Rebuild a tree from its wire form at the cursor.
    ///
    /// The cursor is left on the first bit after the tree.
    ///
    /// # Errors
    /// `Error::UnexpectedEnd` if the bits end mid-tree; `Error::MalformedTree`
    /// if a symbol repeats or the nesting is impossibly deep.
    pub fn deserialize(cursor: &mut BitCursor<'_>) -> Result<Self> {
        let start = cursor.position();
        let root = Node::read_bits(cursor)?;

        let mut seen = [false; 256];
        for leaf in root.leaves() {
            if let Some(symbol) = leaf.symbol() {
                if std::mem::replace(&mut seen[symbol as usize], true) {
                    return Err(Error::MalformedTree("symbol appears twice"));
                }
            }
        }

        let tree = Self::from_root(root, true);
        log::debug!(
            "restored huffman tree: {} symbols from {} bits",
            tree.symbol_count(),
            cursor.position() - start
        );
        Ok(tree)
    }

    /// Rebuild a tree from bits that hold exactly one serialized tree.
    ///
    /// # Errors
    /// As [`HuffmanTree::deserialize`], plus `Error::MalformedTree` if bits
    /// are left over.
    pub fn from_bits(bits: &BitStr) -> Result<Self> {
        let mut cursor = BitCursor::new(bits);
        let tree = Self::deserialize(&mut cursor)?;
        if !cursor.is_empty() {
            return Err(Error::MalformedTree("trailing bits after tree"));
        }
        Ok(tree)
    }

    /// The wire form of the whole tree.
    pub fn serialize(&self) -> Bits {
        let mut out = Bits::with_capacity(self.symbol_count() * 10);
        self.root.write_bits(&mut out);
        out
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// True if the tree came from [`HuffmanTree::deserialize`].
    pub fn is_restored(&self) -> bool {
        self.restored
    }

    /// All leaves, left to right.
    pub fn leaves(&self) -> Vec<&Node> {
        self.root.leaves()
    }

    /// Number of distinct symbols.
    pub fn symbol_count(&self) -> usize {
        self.leaves().len()
    }

    /// The alphabet in leaf order.
    pub fn symbols(&self) -> Vec<u8> {
        self.leaves().iter().filter_map(|n| n.symbol()).collect()
    }

    /// Length of the longest code.
    pub fn max_code_len(&self) -> usize {
        self.leaves()
            .iter()
            .map(|n| n.code().len())
            .max()
            .unwrap_or(0)
    }

    /// Symbol to code.
    pub fn encoding_table(&self) -> BTreeMap<u8, Bits> {
        self.leaves()
            .into_iter()
            .filter_map(|n| n.symbol().map(|s| (s, n.code().to_bitvec())))
            .collect()
    }

    /// Code to symbol. Diagnostic only; decoding walks the tree.
    pub fn decoding_table(&self) -> BTreeMap<Bits, u8> {
        self.encoding_table()
            .into_iter()
            .map(|(symbol, code)| (code, symbol))
            .collect()
    }

    /// Total encoded length in bits of a text with the given symbol counts.
    ///
    /// Returns `None` if a symbol with a non-zero count has no code. The
    /// total saturates at `u64::MAX`, like merged weights.
    pub fn weighted_length<I>(&self, frequencies: I) -> Option<u64>
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let table = self.encoding_table();
        frequencies
            .into_iter()
            .filter(|&(_, weight)| weight > 0)
            .try_fold(0u64, |total, (symbol, weight)| {
                let len = table.get(&symbol)?.len() as u64;
                Some(total.saturating_add(weight.saturating_mul(len)))
            })
    }
}
