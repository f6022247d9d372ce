//! Prefix-code tree nodes.
//!
//! A node is either a leaf carrying one symbol or an internal node owning
//! exactly two children. Codes are not known while the tree is being merged
//! together; they are filled in by a single [`Node::assign_codes`] pass from
//! the root once construction is finished.

use std::cmp::Ordering;

use bitvec::prelude::*;

use crate::bits::{BitCursor, BitStr, Bits};
use crate::error::{Error, Result};

/// Longest code a byte alphabet can produce (256 leaves in a chain).
pub const MAX_CODE_LEN: usize = 255;

/// Huffman tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A symbol-bearing node with no children.
    Leaf {
        /// The code unit this leaf stands for.
        symbol: u8,
        /// Frequency of the symbol.
        weight: u64,
        /// Path from the root.
        code: Bits,
    },
    /// A node with two children and no symbol.
    Internal {
        /// Sum of both children's weights.
        weight: u64,
        /// Path from the root.
        code: Bits,
        /// Subtree reached by a `0` bit.
        left: Box<Node>,
        /// Subtree reached by a `1` bit.
        right: Box<Node>,
    },
}

impl Node {
    /// Create a leaf. Its code is empty until [`Node::assign_codes`] runs.
    pub fn leaf(symbol: u8, weight: u64) -> Self {
        Node::Leaf {
            symbol,
            weight,
            code: Bits::new(),
        }
    }

    /// Join two subtrees under a new internal node.
    ///
    /// Weights saturate at `u64::MAX` rather than wrapping.
    pub fn merge(left: Node, right: Node) -> Self {
        Node::Internal {
            weight: left.weight().saturating_add(right.weight()),
            code: Bits::new(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// The symbol, if this is a leaf.
    pub fn symbol(&self) -> Option<u8> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    /// The node's weight.
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    /// The path from the root to this node.
    pub fn code(&self) -> &BitStr {
        match self {
            Node::Leaf { code, .. } | Node::Internal { code, .. } => code,
        }
    }

    /// Left child, if any.
    pub fn left(&self) -> Option<&Node> {
        match self {
            Node::Internal { left, .. } => Some(&**left),
            Node::Leaf { .. } => None,
        }
    }

    /// Right child, if any.
    pub fn right(&self) -> Option<&Node> {
        match self {
            Node::Internal { right, .. } => Some(&**right),
            Node::Leaf { .. } => None,
        }
    }

    /// True iff the node carries a symbol and has no children.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// All leaf descendants in pre-order, left subtree first.
    ///
    /// A leaf yields just itself.
    pub fn leaves(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Node>) {
        match self {
            Node::Leaf { .. } => out.push(self),
            Node::Internal { left, right, .. } => {
                left.collect_leaves(out);
                right.collect_leaves(out);
            }
        }
    }

    /// Set every node's code to its path below `prefix`.
    pub fn assign_codes(&mut self, prefix: &BitStr) {
        let mut path = Bits::with_capacity(prefix.len() + 16);
        path.extend_from_bitslice(prefix);
        self.assign_codes_from(&mut path);
    }

    fn assign_codes_from(&mut self, path: &mut Bits) {
        match self {
            Node::Leaf { code, .. } => code.clone_from(path),
            Node::Internal {
                code, left, right, ..
            } => {
                code.clone_from(path);

                path.push(false);
                left.assign_codes_from(path);
                path.pop();

                path.push(true);
                right.assign_codes_from(path);
                path.pop();
            }
        }
    }

    /// Step to the child selected by `bit`, or `None` on a leaf.
    pub fn traverse(&self, bit: bool) -> Option<&Node> {
        match self {
            Node::Internal { left, right, .. } => Some(if bit { &**right } else { &**left }),
            Node::Leaf { .. } => None,
        }
    }

    /// Length of the longest root-to-leaf path below this node.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Priority order used while merging: lighter first, then leaves before
    /// internal nodes, then lower symbols first.
    ///
    /// Two internal nodes of equal weight compare equal here; the builder
    /// breaks that tie by insertion order.
    pub fn construction_cmp(&self, other: &Node) -> Ordering {
        self.weight()
            .cmp(&other.weight())
            .then_with(|| match (self.symbol(), other.symbol()) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    }

    /// Append the pre-order wire form of this subtree to `out`.
    ///
    /// Leaf: `1` followed by the 8-bit symbol. Internal: `0` followed by the
    /// left then right subtree.
    pub fn write_bits(&self, out: &mut Bits) {
        match self {
            Node::Leaf { symbol, .. } => {
                out.push(true);
                out.extend_from_bitslice(symbol.view_bits::<Msb0>());
            }
            Node::Internal { left, right, .. } => {
                out.push(false);
                left.write_bits(out);
                right.write_bits(out);
            }
        }
    }

    /// Rebuild a subtree from its wire form.
    ///
    /// Restored nodes have zero weight and empty codes.
    ///
    /// # Errors
    /// `Error::UnexpectedEnd` if the bits run out mid-tree;
    /// `Error::MalformedTree` if nesting exceeds [`MAX_CODE_LEN`].
    pub fn read_bits(cursor: &mut BitCursor<'_>) -> Result<Node> {
        Self::read_at_depth(cursor, 0)
    }

    fn read_at_depth(cursor: &mut BitCursor<'_>, depth: usize) -> Result<Node> {
        if cursor.read_bit()? {
            return Ok(Node::leaf(cursor.read_u8()?, 0));
        }
        if depth >= MAX_CODE_LEN {
            return Err(Error::MalformedTree("nesting deeper than a byte alphabet allows"));
        }
        let left = Self::read_at_depth(cursor, depth + 1)?;
        let right = Self::read_at_depth(cursor, depth + 1)?;
        Ok(Node::merge(left, right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::{parse_bit_string, to_bit_string};

    fn sample() -> Node {
        // ((a, b), c)
        let mut root = Node::merge(
            Node::merge(Node::leaf(b'a', 1), Node::leaf(b'b', 2)),
            Node::leaf(b'c', 4),
        );
        root.assign_codes(&Bits::new());
        root
    }

    #[test]
    fn test_leaf_shape() {
        let leaf = Node::leaf(b'x', 3);
        assert!(leaf.is_leaf());
        assert_eq!(leaf.symbol(), Some(b'x'));
        assert!(leaf.left().is_none() && leaf.right().is_none());
        assert!(leaf.traverse(false).is_none());
        assert!(leaf.traverse(true).is_none());
        assert_eq!(leaf.leaves(), vec![&leaf]);
    }

    #[test]
    fn test_merge_sums_weights() {
        let root = sample();
        assert!(!root.is_leaf());
        assert_eq!(root.symbol(), None);
        assert_eq!(root.weight(), 7);
        assert_eq!(root.left().map(Node::weight), Some(3));
        assert_eq!(root.depth(), 2);
    }

    #[test]
    fn test_codes_follow_paths() {
        let root = sample();
        let codes: Vec<(Option<u8>, String)> = root
            .leaves()
            .into_iter()
            .map(|n| (n.symbol(), to_bit_string(n.code())))
            .collect();
        assert_eq!(
            codes,
            vec![
                (Some(b'a'), "00".to_string()),
                (Some(b'b'), "01".to_string()),
                (Some(b'c'), "1".to_string()),
            ]
        );
        assert!(root.code().is_empty());
        assert_eq!(root.traverse(false).map(|n| to_bit_string(n.code())), Some("0".into()));
    }

    #[test]
    fn test_assign_codes_with_prefix() {
        let mut node = Node::merge(Node::leaf(1, 1), Node::leaf(2, 1));
        node.assign_codes(&parse_bit_string("11").unwrap());
        assert_eq!(to_bit_string(node.code()), "11");
        assert_eq!(to_bit_string(node.right().unwrap().code()), "111");
    }

    #[test]
    fn test_construction_order() {
        let light = Node::leaf(b'z', 1);
        let heavy = Node::leaf(b'a', 2);
        let low = Node::leaf(b'a', 1);
        let internal = Node::merge(Node::leaf(0, 0), Node::leaf(1, 1));
        assert_eq!(light.construction_cmp(&heavy), Ordering::Less);
        assert_eq!(low.construction_cmp(&light), Ordering::Less);
        assert_eq!(light.construction_cmp(&internal), Ordering::Less);
        assert_eq!(internal.construction_cmp(&light), Ordering::Greater);
        assert_eq!(internal.construction_cmp(&internal.clone()), Ordering::Equal);
    }

    #[test]
    fn test_wire_form() {
        let root = sample();
        let mut bits = Bits::new();
        root.write_bits(&mut bits);
        assert_eq!(
            to_bit_string(&bits),
            "0\
             0\
             1\
             01100001\
             1\
             01100010\
             1\
             01100011"
        );

        let mut cursor = BitCursor::new(&bits);
        let mut restored = Node::read_bits(&mut cursor).unwrap();
        restored.assign_codes(&Bits::new());
        assert!(cursor.is_empty());
        let symbols: Vec<_> = restored.leaves().iter().map(|n| n.symbol()).collect();
        assert_eq!(symbols, vec![Some(b'a'), Some(b'b'), Some(b'c')]);
        assert_eq!(restored.weight(), 0);
    }

    #[test]
    fn test_read_truncated_tree() {
        let bits = parse_bit_string("0101").unwrap();
        let mut cursor = BitCursor::new(&bits);
        assert!(matches!(
            Node::read_bits(&mut cursor),
            Err(Error::UnexpectedEnd { .. })
        ));
    }

    #[test]
    fn test_read_rejects_runaway_nesting() {
        let bits: Bits = std::iter::repeat(false).take(MAX_CODE_LEN + 1).collect();
        let mut cursor = BitCursor::new(&bits);
        assert!(matches!(
            Node::read_bits(&mut cursor),
            Err(Error::MalformedTree(_))
        ));
    }
}
