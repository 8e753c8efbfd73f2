//! Byte-backed bitfields used to record presence information, e.g. which validators signed or
//! which chunks are known:
//!
//! - `Bitlist`: a variable-length bitfield whose length is encoded by a trailing length bit.
//! - `Bitvector<N>`: a bitfield with a type-level _fixed_ width of `N` bits.
//!
//! Bit `0` is the least significant bit of byte `0`.
//!
//! ## Example
//! ```
//! use bitfield::{Bitlist, Bitvector16};
//!
//! let mut list = Bitlist::new(10);
//! list.set_bit_at(9, true);
//! assert_eq!(list.len(), 10);
//! assert_eq!(list.as_slice(), &[0b0000_0000, 0b0000_0110]);
//! assert_eq!(list.bytes(), vec![0b0000_0000, 0b0000_0010]);
//!
//! let mut vector = Bitvector16::new();
//! vector.set_bit_at(3, true);
//! assert_eq!(vector.len(), 16);
//! assert_eq!(vector.bit_indices(), vec![3]);
//! ```

mod bitfield;
mod bitlist;
mod bitvector;
mod error;

pub use crate::bitfield::{Bitfield, BitfieldBehaviour, Fixed, Variable};
pub use error::Error;
pub use typenum;

use typenum::{U1024, U128, U16, U4, U512, U64};

/// Exported types
pub type Bitlist = Bitfield<Variable>;
pub type Bitvector<N> = Bitfield<Fixed<N>>;

pub type Bitvector4 = Bitvector<U4>;
pub type Bitvector16 = Bitvector<U16>;
pub type Bitvector64 = Bitvector<U64>;
pub type Bitvector128 = Bitvector<U128>;
pub type Bitvector512 = Bitvector<U512>;
pub type Bitvector1024 = Bitvector<U1024>;
