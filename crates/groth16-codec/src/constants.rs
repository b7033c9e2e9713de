//! Constants for BN254 and the Groth16 call-buffer layout

/// BN254 field modulus used by the sign convention
/// p = 21888242871839275222246405745257275088548364400416034343698204186575808495617
pub const BN254_MODULUS: [u8; 32] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x28, 0x33, 0xe8, 0x48, 0x79, 0xb9, 0x70, 0x91, 0x43, 0xe1, 0xf5, 0x93, 0xf0, 0x00, 0x00, 0x01,
];

/// Decimal form of [`BN254_MODULUS`]
pub const BN254_MODULUS_DEC: &str =
    "21888242871839275222246405745257275088548364400416034343698204186575808495617";

/// Mask for the sign flag in the leading byte of a compressed point
pub const SIGN_BIT: u8 = 1 << 7;

/// Uncompressed proof: pi_a (64) || pi_b (128) || pi_c (64)
pub const PROOF_SIZE: usize = 256;

/// Compressed proof: pi_a (32) || pi_b (64) || pi_c (32)
pub const COMPRESSED_PROOF_SIZE: usize = 128;

/// Size of one public signal in the call buffer
pub const PUBLIC_SIGNAL_SIZE: usize = 32;

/// Call-buffer offsets
pub const PROOF_A_RANGE: core::ops::Range<usize> = 0..64;
pub const PROOF_B_RANGE: core::ops::Range<usize> = 64..192;
pub const PROOF_C_RANGE: core::ops::Range<usize> = 192..256;
