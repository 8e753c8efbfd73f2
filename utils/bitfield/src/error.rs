use thiserror::Error;

/// Returned when a bitfield operation or decoding fails.
#[derive(PartialEq, Eq, Clone, Debug, Error)]
pub enum Error {
    /// Two operands of a set operation do not share the same length.
    #[error("length mismatch: left operand has length {left}, right operand has length {right}")]
    LengthMismatch { left: usize, right: usize },
    /// A `Bitlist` does not have a set bit in its last byte, therefore its length is unknowable.
    #[error("bitlist has no length bit in its last byte")]
    MissingLengthInformation,
    /// A `Bitvector` has bits set above its width.
    #[error("bitvector has bits set above its width")]
    ExcessBits,
    /// A `Bitvector` has an invalid number of bytes for its width.
    #[error("invalid byte count: given {given}, expected {expected}")]
    InvalidByteCount { given: usize, expected: usize },
}
