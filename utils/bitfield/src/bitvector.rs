use crate::bitfield::{bytes_required, BitfieldBehaviour};
use crate::{Bitvector, Error, Fixed};
use std::cmp;
use typenum::Unsigned;

impl<N: Unsigned + Clone> BitfieldBehaviour for Fixed<N> {
    /// The width is declared at the type level, the buffer is never measured.
    fn bits_len(_bytes: &[u8]) -> usize {
        N::to_usize()
    }

    /// A buffer of the wrong size is not addressable at all.
    fn is_addressable(bytes: &[u8], i: usize) -> bool {
        i < N::to_usize() && bytes.len() == byte_width::<N>()
    }

    /// Only looks at the declared width, extra trailing bytes are ignored.
    fn count_ones(bytes: &[u8]) -> usize {
        declared_bytes::<N>(bytes)
            .map(|byte| byte.count_ones() as usize)
            .sum()
    }

    /// Never expands a short buffer and never emits more than the declared width.
    fn canonical_bytes(bytes: &[u8]) -> Vec<u8> {
        bytes[..cmp::min(bytes.len(), byte_width::<N>())].to_vec()
    }

    fn validate(bytes: &[u8]) -> Result<(), Error> {
        let expected = byte_width::<N>();
        if bytes.len() != expected {
            return Err(Error::InvalidByteCount {
                given: bytes.len(),
                expected,
            });
        }

        match bytes.last() {
            Some(last) if last & !tail_mask::<N>() != 0 => Err(Error::ExcessBits),
            _ => Ok(()),
        }
    }
}

impl<N: Unsigned + Clone> Bitvector<N> {
    /// Creates a bitvector with all `N` bits set to false.
    pub fn new() -> Self {
        Self::from_raw_bytes(vec![0; byte_width::<N>()])
    }

    /// Number of bytes backing a well formed bitvector.
    pub fn byte_width() -> usize {
        byte_width::<N>()
    }

    /// Returns the type-level width.
    pub fn bit_width() -> usize {
        N::to_usize()
    }

    /// Returns the indices of the bits set to true, in ascending order.
    ///
    /// Bytes past the declared width are ignored.
    pub fn bit_indices(&self) -> Vec<usize> {
        let mut indices = Vec::with_capacity(N::to_usize());

        for (i, byte) in self.bytes.iter().take(byte_width::<N>()).enumerate() {
            for j in 0..8 {
                let index = i * 8 + j;
                if byte & (1 << j) != 0 && index < N::to_usize() {
                    indices.push(index);
                }
            }
        }

        indices
    }

    /// Checks if every bit set in `other` is also set in `self`.
    pub fn contains(&self, other: &Self) -> Result<bool, Error> {
        let common = self.zip_bytes(other, |a, b| a & b)?;

        Ok(common.bytes == other.bytes)
    }

    /// Checks if at least one bit is set in both `self` and `other`.
    pub fn overlaps(&self, other: &Self) -> Result<bool, Error> {
        let common = self.zip_bytes(other, |a, b| a & b)?;

        Ok(!common.is_zero())
    }

    /// Returns the union of `self` and `other`.
    pub fn or(&self, other: &Self) -> Result<Self, Error> {
        self.zip_bytes(other, |a, b| a | b)
    }

    /// Returns the intersection of `self` and `other`.
    pub fn and(&self, other: &Self) -> Result<Self, Error> {
        self.zip_bytes(other, |a, b| a & b)
    }

    /// Shifts the whole buffer, read as a big-endian number (byte `0` is the most significant),
    /// by `n` bits. Positive `n` shifts left, negative `n` shifts right. Bits shifted out are
    /// dropped and zeros are shifted in.
    ///
    /// Example:
    /// ```
    /// use bitfield::Bitvector16;
    ///
    /// let mut bitvector = Bitvector16::from_raw_bytes(vec![0x01, 0x23]);
    /// bitvector.shift(-1);
    /// assert_eq!(bitvector.as_slice(), &[0x00, 0x91]);
    /// ```
    pub fn shift(&mut self, n: isize) {
        let len = self.bytes.len();
        let amount = n.unsigned_abs();

        if amount >= len * 8 {
            self.bytes.iter_mut().for_each(|byte| *byte = 0);
            return;
        }

        let byte_shift = amount / 8;
        let bit_shift = (amount % 8) as u32;
        let source = self.bytes.clone();
        let byte_at = |i: Option<usize>| i.and_then(|i| source.get(i)).copied().unwrap_or(0);

        for (i, byte) in self.bytes.iter_mut().enumerate() {
            // `high` lands in this byte unshifted, `low` donates the carry bits
            let (high, low) = if n >= 0 {
                let from = i + byte_shift;
                (byte_at(Some(from)), byte_at(Some(from + 1)))
            } else {
                let from = i.checked_sub(byte_shift);
                (byte_at(from), byte_at(from.and_then(|from| from.checked_sub(1))))
            };

            *byte = match (bit_shift, n >= 0) {
                (0, _) => high,
                (_, true) => high << bit_shift | low >> (8 - bit_shift),
                (_, false) => high >> bit_shift | low << (8 - bit_shift),
            };
        }

        // keep the bits above the width zeroed
        if len == byte_width::<N>() {
            if let Some(last) = self.bytes.last_mut() {
                *last &= tail_mask::<N>();
            }
        }
    }
}

impl<N: Unsigned + Clone> Default for Bitvector<N> {
    fn default() -> Self {
        Self::new()
    }
}

fn byte_width<N: Unsigned>() -> usize {
    bytes_required(N::to_usize())
}

/// Mask of the bits of the last byte that lie inside the width.
fn tail_mask<N: Unsigned>() -> u8 {
    match N::to_usize() % 8 {
        0 => u8::max_value(),
        bits => (1 << bits) - 1,
    }
}

/// Iterates the bytes inside the declared width with the bits above the width masked off.
fn declared_bytes<N: Unsigned>(bytes: &[u8]) -> impl Iterator<Item = u8> + '_ {
    let width = byte_width::<N>();

    bytes.iter().take(width).enumerate().map(move |(i, byte)| {
        if i + 1 == width {
            byte & tail_mask::<N>()
        } else {
            *byte
        }
    })
}
