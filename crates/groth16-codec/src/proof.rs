//! Proof and public-signal serialization for snarkjs Groth16 output
//!
//! ## Proof layout (uncompressed, 256 bytes)
//! - [0..64]: pi_a (G1)
//! - [64..192]: pi_b (G2)
//! - [192..256]: pi_c (G1)
//!
//! Compressed proofs keep the same order at half the size (32 + 64 + 32).
//! Every point, pi_a included, takes its sign bit from its own y.

use serde_json::Value;

use crate::constants::{COMPRESSED_PROOF_SIZE, PROOF_SIZE, PUBLIC_SIGNAL_SIZE};
use crate::errors::{CodecError, Result};
use crate::field::{encode_target, json_kind, FieldElement};
use crate::point::{G1Point, G2Point, PointCodec};
use crate::types::{CurveParams, Fe};

/// A Groth16 proof as produced by snarkjs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proof {
    pub pi_a: G1Point,
    pub pi_b: G2Point,
    pub pi_c: G1Point,
}

impl Proof {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_json(&value)
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        let get = |key: &str| {
            value
                .get(key)
                .ok_or_else(|| CodecError::malformed(key, "missing field"))
        };
        if !value.is_object() {
            return Err(CodecError::malformed(
                "<root>",
                format!("expected an object, found {}", json_kind(value)),
            ));
        }
        Ok(Self {
            pi_a: G1Point::from_json(get("pi_a")?, "pi_a")?,
            pi_b: G2Point::from_json(get("pi_b")?, "pi_b")?,
            pi_c: G1Point::from_json(get("pi_c")?, "pi_c")?,
        })
    }

    /// `pi_a || pi_b || pi_c`: 256 bytes, or 128 when compressed
    pub fn serialize(&self, params: &CurveParams, compressed: bool) -> Result<Vec<u8>> {
        let size = if compressed { COMPRESSED_PROOF_SIZE } else { PROOF_SIZE };
        let mut out = Vec::with_capacity(size);
        out.extend(self.pi_a.encode(params, compressed, "pi_a")?);
        out.extend(self.pi_b.encode(params, compressed, "pi_b")?);
        out.extend(self.pi_c.encode(params, compressed, "pi_c")?);
        debug_assert_eq!(out.len(), size);
        Ok(out)
    }
}

/// Public signals in circuit declaration order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PublicSignals(pub Vec<FieldElement>);

impl PublicSignals {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_json(&value)
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        let items = value.as_array().ok_or_else(|| {
            CodecError::malformed(
                "public_signals",
                format!("expected an array, found {}", json_kind(value)),
            )
        })?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| FieldElement::from_json(item, &format!("public_signals[{i}]")))
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// One 32-byte limb per signal, order preserved
    pub fn to_limbs(&self, params: &CurveParams) -> Result<Vec<Fe>> {
        self.0
            .iter()
            .enumerate()
            .map(|(i, signal)| encode_target(signal, params, &format!("public_signals[{i}]")))
            .collect()
    }

    /// Concatenated limbs, `32 * n` bytes
    pub fn serialize(&self, params: &CurveParams) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(PUBLIC_SIGNAL_SIZE * self.len());
        for limb in self.to_limbs(params)? {
            out.extend_from_slice(&limb);
        }
        Ok(out)
    }
}
