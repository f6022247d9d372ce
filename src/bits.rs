//! Bit-sequence plumbing shared by the tree, encoder and decoder.
//!
//! Everything on the wire is MSB-first: the first bit of a code or of a
//! serialized symbol is the most significant bit of the first byte it lands
//! in. Bit sequences are `bitvec` vectors over `u8` with [`Msb0`] ordering, so
//! a [`Bits`] value already *is* the byte-aligned layout used by [`Packed`].

use bitvec::prelude::*;

use crate::error::{Error, Result};

/// An owned, growable bit sequence in wire order.
pub type Bits = BitVec<u8, Msb0>;

/// A borrowed bit sequence in wire order.
pub type BitStr = BitSlice<u8, Msb0>;

/// Render bits as a string of `'0'` and `'1'` characters.
pub fn to_bit_string(bits: &BitStr) -> String {
    bits.iter()
        .by_vals()
        .map(|bit| if bit { '1' } else { '0' })
        .collect()
}

/// Parse a string of `'0'` and `'1'` characters into bits.
///
/// # Errors
/// Returns `Error::InvalidBitChar` on any other character.
pub fn parse_bit_string(s: &str) -> Result<Bits> {
    let mut bits = Bits::with_capacity(s.len());
    for (position, ch) in s.chars().enumerate() {
        match ch {
            '0' => bits.push(false),
            '1' => bits.push(true),
            _ => return Err(Error::InvalidBitChar { ch, position }),
        }
    }
    Ok(bits)
}

/// A read position into a bit sequence.
///
/// Used to deserialize a tree from the front of a stream; whatever the tree
/// does not consume is left in [`BitCursor::remaining`].
#[derive(Debug, Clone)]
pub struct BitCursor<'a> {
    bits: &'a BitStr,
    pos: usize,
}

impl<'a> BitCursor<'a> {
    /// Start reading at the first bit of `bits`.
    pub fn new(bits: &'a BitStr) -> Self {
        Self { bits, pos: 0 }
    }

    /// Number of bits consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The unread tail of the sequence.
    pub fn remaining(&self) -> &'a BitStr {
        &self.bits[self.pos..]
    }

    /// True when every bit has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.bits.len()
    }

    /// Read one bit.
    ///
    /// # Errors
    /// Returns `Error::UnexpectedEnd` when the sequence is exhausted.
    pub fn read_bit(&mut self) -> Result<bool> {
        let bit = self
            .bits
            .get(self.pos)
            .map(|bit| *bit)
            .ok_or(Error::UnexpectedEnd {
                needed: 1,
                position: self.pos,
            })?;
        self.pos += 1;
        Ok(bit)
    }

    /// Read eight bits as one byte, most significant bit first.
    ///
    /// # Errors
    /// Returns `Error::UnexpectedEnd` if fewer than eight bits remain; the
    /// cursor does not move in that case.
    pub fn read_u8(&mut self) -> Result<u8> {
        let end = self.pos + 8;
        if end > self.bits.len() {
            return Err(Error::UnexpectedEnd {
                needed: end - self.bits.len(),
                position: self.pos,
            });
        }
        let byte = self.bits[self.pos..end]
            .iter()
            .by_vals()
            .fold(0u8, |acc, bit| (acc << 1) | u8::from(bit));
        self.pos = end;
        Ok(byte)
    }
}

/// A bit sequence packed into whole bytes.
///
/// `bit_len` is authoritative: the final byte may carry up to seven zero
/// padding bits that are not part of the stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Packed {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl Packed {
    /// Pack `bits` into bytes, zero-filling the tail of the last byte.
    pub fn from_bits(bits: &BitStr) -> Self {
        let mut bytes = vec![0u8; bits.len().div_ceil(8)];
        bytes.view_bits_mut::<Msb0>()[..bits.len()].copy_from_bitslice(bits);
        Self {
            bytes,
            bit_len: bits.len(),
        }
    }

    /// Reassemble a packed sequence from stored bytes and its bit count.
    ///
    /// # Errors
    /// Returns `Error::InvalidPackedLength` if `bit_len` needs more bytes
    /// than were given.
    pub fn from_parts(bytes: Vec<u8>, bit_len: usize) -> Result<Self> {
        if bit_len > bytes.len() * 8 {
            return Err(Error::InvalidPackedLength {
                bit_len,
                bytes: bytes.len(),
            });
        }
        Ok(Self { bytes, bit_len })
    }

    /// The packed bytes, padding included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of meaningful bits.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Number of padding bits at the end of the last byte.
    pub fn padding_bits(&self) -> usize {
        self.bytes.len() * 8 - self.bit_len
    }

    /// The meaningful bits, without padding.
    pub fn as_bits(&self) -> &BitStr {
        &self.bytes.view_bits::<Msb0>()[..self.bit_len]
    }

    /// Split into `(bytes, bit_len)`.
    pub fn into_parts(self) -> (Vec<u8>, usize) {
        (self.bytes, self.bit_len)
    }
}
