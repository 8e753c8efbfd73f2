use crate::Error;
use log::debug;
use serde_derive::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::marker::PhantomData;
use typenum::Unsigned;

/// A marker struct used to declare `Variable` behaviour on a `Bitfield`.
///
/// The length is not stored anywhere, it is recovered from the highest set bit of the last byte.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Variable;

/// A marker struct used to declare `Fixed` behaviour on a `Bitfield`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Fixed<N: Unsigned> {
    _meta: PhantomData<N>,
}

/// Defines how a `Bitfield` represents its length and which of its bits are addressable.
pub trait BitfieldBehaviour: Clone {
    /// Returns the number of data bits described by `bytes`.
    fn bits_len(bytes: &[u8]) -> usize;

    /// Checks if the bit at `i` may be read or written.
    fn is_addressable(bytes: &[u8], i: usize) -> bool {
        i < Self::bits_len(bytes)
    }

    /// Returns the number of data bits set to true.
    fn count_ones(bytes: &[u8]) -> usize;

    /// Returns the canonical export of `bytes`.
    fn canonical_bytes(bytes: &[u8]) -> Vec<u8>;

    /// Checks that `bytes` is a well formed wire representation.
    fn validate(bytes: &[u8]) -> Result<(), Error>;
}

/// An ordered sequence of boolean flags packed into bytes.
///
/// Out of range reads return `false` and out of range writes are ignored, so bit accessors are
/// total. Operations combining two bitfields return `Error::LengthMismatch` instead.
///
/// Containers offer no internal synchronization.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(bound = "", try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Bitfield<C: BitfieldBehaviour> {
    pub(crate) bytes: Vec<u8>,
    _meta: PhantomData<C>,
}

impl<C: BitfieldBehaviour> Bitfield<C> {
    /// Wraps `bytes` without any validation.
    ///
    /// Malformed buffers are allowed, the accessors treat them according to `C`.
    pub fn from_raw_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            _meta: PhantomData,
        }
    }

    /// Decodes a wire representation, rejecting malformed buffers.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Error> {
        if let Err(e) = C::validate(&bytes) {
            debug!("rejected bitfield bytes {:?}: {}", bytes, e);
            return Err(e);
        }

        Ok(Self::from_raw_bytes(bytes))
    }

    /// Returns the bit at `i`, or `false` if `i` is not addressable.
    pub fn bit_at(&self, i: usize) -> bool {
        if !C::is_addressable(&self.bytes, i) {
            return false;
        }

        self.bytes
            .get(i / 8)
            .map_or(false, |byte| byte & get_true_bit_at(i) > 0)
    }

    /// Sets the bit at `i` to `value`. Does nothing if `i` is not addressable.
    pub fn set_bit_at(&mut self, i: usize, value: bool) {
        if !C::is_addressable(&self.bytes, i) {
            return;
        }

        if let Some(byte) = self.bytes.get_mut(i / 8) {
            if value {
                *byte |= get_true_bit_at(i)
            } else {
                *byte &= get_false_bit_at(i)
            }
        }
    }

    /// Returns the number of bits stored in `self`.
    pub fn len(&self) -> usize {
        C::bits_len(&self.bytes)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of data bits set to true.
    pub fn count(&self) -> usize {
        C::count_ones(&self.bytes)
    }

    /// Returns the canonical byte form.
    pub fn bytes(&self) -> Vec<u8> {
        C::canonical_bytes(&self.bytes)
    }

    /// Returns a view into the underlying bytes representation
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the underlying bytes representation
    pub fn into_raw_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn is_zero(&self) -> bool {
        self.bytes.iter().all(|b| *b == 0)
    }

    /// Combines the backing buffers byte by byte. Both buffers must be of the same length.
    pub(crate) fn zip_bytes(&self, other: &Self, f: impl Fn(u8, u8) -> u8) -> Result<Self, Error> {
        ensure_same_len(self.bytes.len(), other.bytes.len())?;

        let bytes = self
            .bytes
            .iter()
            .zip(&other.bytes)
            .map(|(a, b)| f(*a, *b))
            .collect();

        Ok(Self::from_raw_bytes(bytes))
    }
}

impl<C: BitfieldBehaviour> TryFrom<Vec<u8>> for Bitfield<C> {
    type Error = Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Error> {
        Self::from_bytes(bytes)
    }
}

impl<C: BitfieldBehaviour> From<Bitfield<C>> for Vec<u8> {
    fn from(bitfield: Bitfield<C>) -> Self {
        bitfield.into_raw_bytes()
    }
}

pub(crate) fn ensure_same_len(left: usize, right: usize) -> Result<(), Error> {
    if left == right {
        Ok(())
    } else {
        debug!("bitfield operands differ in length: {} != {}", left, right);
        Err(Error::LengthMismatch { left, right })
    }
}

/// Example:
/// ```ignore
/// assert_eq!(get_true_bit_at(3), 0b0000_1000)
///```
pub(crate) fn get_true_bit_at(pos: usize) -> u8 {
    1 << (pos % 8) as u8
}

pub(crate) fn get_false_bit_at(pos: usize) -> u8 {
    !get_true_bit_at(pos)
}

pub(crate) fn bytes_required(bits_len: usize) -> usize {
    (bits_len + 7) / 8
}

/// Position of the highest set bit counted from 1, `0` for a zero byte.
pub(crate) fn bit_length(byte: u8) -> usize {
    8 - byte.leading_zeros() as usize
}
