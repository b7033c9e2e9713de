//! Groth16 key and proof encodings for the Solana alt_bn128 verifier
//!
//! Converts snarkjs artifacts (decimal-string field elements in JSON) into
//! the fixed-width big-endian byte layouts consumed by `groth16-solana`,
//! and generates the Rust verifier module that embeds the verifying key.
//!
//! # Example
//!
//! ```ignore
//! use groth16_codec::{generate_verifier, CodegenOptions};
//!
//! let vk_json = std::fs::read_to_string("verification_key.json")?;
//! let artifact = generate_verifier(&vk_json, &CodegenOptions::default())?;
//! std::fs::write("verifier.rs", artifact.as_bytes())?;
//! ```

pub mod codegen;
pub mod constants;
pub mod emit;
pub mod errors;
pub mod field;
pub mod key;
pub mod payload;
pub mod point;
pub mod proof;
pub mod render;
pub mod sign;
pub mod types;

pub use codegen::{generate_verifier, serialize_proof, CodegenOptions, SerializedProof};
pub use emit::{Artifact, Target};
pub use errors::{CodecError, LayoutError};
pub use field::FieldElement;
pub use key::{SerializedVk, VerificationKey, VkRole};
pub use payload::ProofPayload;
pub use point::{G1Point, G2Point, PointCodec};
pub use proof::{Proof, PublicSignals};
pub use types::{CurveParams, Endianness, OverflowPolicy};
