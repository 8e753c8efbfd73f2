use crate::bitfield::{bit_length, ensure_same_len, get_true_bit_at, BitfieldBehaviour};
use crate::{Bitlist, Error, Variable};
use log::warn;

impl BitfieldBehaviour for Variable {
    /// The length bit is the highest set bit of the last byte, every bit below it is data.
    fn bits_len(bytes: &[u8]) -> usize {
        let last = match bytes.last() {
            Some(last) => *last,
            None => return 0,
        };

        let msb = bit_length(last);
        if msb == 0 {
            warn!("bitlist {:?} has no length bit, treating it as empty", bytes);
            return 0;
        }

        8 * (bytes.len() - 1) + msb - 1
    }

    fn count_ones(bytes: &[u8]) -> usize {
        let ones: usize = bytes.iter().map(|byte| byte.count_ones() as usize).sum();

        // the length bit is not data
        ones.saturating_sub(1)
    }

    /// Drops the length bit and trims trailing zero bytes. May produce an empty buffer.
    fn canonical_bytes(bytes: &[u8]) -> Vec<u8> {
        let mut result = bytes.to_vec();

        if let Some(last) = result.last_mut() {
            let msb = bit_length(*last);
            if msb > 0 {
                *last &= !(1 << (msb - 1));
            }
        }

        while result.last() == Some(&0) {
            result.pop();
        }

        result
    }

    fn validate(bytes: &[u8]) -> Result<(), Error> {
        match bytes.last() {
            Some(last) if *last != 0 => Ok(()),
            _ => Err(Error::MissingLengthInformation),
        }
    }
}

impl Bitlist {
    /// Creates a bitlist of `bits_len` zero bits.
    ///
    /// Example:
    /// ```
    /// use bitfield::Bitlist;
    ///
    /// assert_eq!(Bitlist::new(3).as_slice(), &[0b0000_1000]);
    /// assert_eq!(Bitlist::new(8).as_slice(), &[0b0000_0000, 0b0000_0001]);
    /// ```
    pub fn new(bits_len: usize) -> Self {
        let mut bytes = vec![0; bits_len / 8 + 1];

        // set the marker bit for the end of the list
        bytes[bits_len / 8] |= get_true_bit_at(bits_len);

        Self::from_raw_bytes(bytes)
    }

    /// Returns the indices of the data bits set to true, in ascending order.
    pub fn bit_indices(&self) -> Vec<usize> {
        (0..self.len()).filter(|i| self.bit_at(*i)).collect()
    }

    /// Checks if every bit set in `other` is also set in `self`.
    pub fn contains(&self, other: &Self) -> Result<bool, Error> {
        self.ensure_compatible(other)?;

        Ok(self
            .bytes
            .iter()
            .zip(&other.bytes)
            .all(|(a, b)| a & b == *b))
    }

    /// Checks if at least one data bit is set in both `self` and `other`.
    pub fn overlaps(&self, other: &Self) -> Result<bool, Error> {
        self.ensure_compatible(other)?;

        let length_bit = self.length_bit_mask();
        let last = self.bytes.len().saturating_sub(1);

        Ok(self
            .bytes
            .iter()
            .zip(&other.bytes)
            .enumerate()
            .any(|(i, (a, b))| {
                let common = a & b;
                if i == last {
                    common & !length_bit != 0
                } else {
                    common != 0
                }
            }))
    }

    /// Returns the union of `self` and `other`. The length bit is shared by both operands.
    pub fn or(&self, other: &Self) -> Result<Self, Error> {
        self.ensure_compatible(other)?;
        self.zip_bytes(other, |a, b| a | b)
    }

    /// Returns the intersection of `self` and `other`. The length bit is shared by both operands.
    pub fn and(&self, other: &Self) -> Result<Self, Error> {
        self.ensure_compatible(other)?;
        self.zip_bytes(other, |a, b| a & b)
    }

    fn ensure_compatible(&self, other: &Self) -> Result<(), Error> {
        ensure_same_len(self.len(), other.len())?;
        ensure_same_len(self.bytes.len(), other.bytes.len())
    }

    fn length_bit_mask(&self) -> u8 {
        match self.bytes.last() {
            Some(last) if *last != 0 => 1 << (bit_length(*last) - 1),
            _ => 0,
        }
    }
}
