//! Core types for Groth16 byte encodings
//!
//! Uses raw byte arrays matching the Solana alt_bn128 syscall format.

use num_bigint::BigUint;

use crate::constants::BN254_MODULUS;

/// Width of one field-element limb in bytes.
pub const FIELD_SIZE: usize = 32;

/// A 32-byte field element in the target byte order.
pub type Fe = [u8; FIELD_SIZE];

/// A 64-byte G1 point (uncompressed, x || y).
pub type G1 = [u8; 64];

/// A 32-byte compressed G1 point (x with the sign bit folded in).
pub type G1Compressed = [u8; 32];

/// A 128-byte G2 point (uncompressed, x1 || x0 || y1 || y0).
pub type G2 = [u8; 128];

/// A 64-byte compressed G2 point.
pub type G2Compressed = [u8; 64];

/// Byte order of a single 32-byte limb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    Little,
    #[default]
    Big,
}

/// What to do with a field element that does not fit in one limb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Keep the low 256 bits (matches keys already deployed on-chain)
    #[default]
    Truncate,
    /// Fail with `CodecError::EncodingOverflow`
    Reject,
}

/// Curve parameters threaded through every encode call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveParams {
    /// Field modulus used for the positivity rule
    pub modulus: BigUint,
    /// Limb width in bytes; encoding fails unless it equals `FIELD_SIZE`
    pub field_size: usize,
    /// Byte order expected by the on-chain verifier
    pub target_order: Endianness,
    pub overflow: OverflowPolicy,
}

impl CurveParams {
    /// BN254 with the big-endian syscall convention
    pub fn bn254() -> Self {
        Self {
            modulus: bn254_modulus(),
            field_size: FIELD_SIZE,
            target_order: Endianness::Big,
            overflow: OverflowPolicy::Truncate,
        }
    }

    /// Same curve, rejecting oversized field elements
    pub fn strict(mut self) -> Self {
        self.overflow = OverflowPolicy::Reject;
        self
    }

    /// `p / 2` (integer division), the G2 sign threshold
    pub fn midpoint(&self) -> BigUint {
        &self.modulus >> 1u32
    }
}

impl Default for CurveParams {
    fn default() -> Self {
        Self::bn254()
    }
}

fn bn254_modulus() -> BigUint {
    BigUint::from_bytes_be(&BN254_MODULUS)
}
