//! Verification key parsing and serialization for snarkjs Groth16 keys
//!
//! ## JSON schema (snarkjs `verification_key.json`)
//! - `vk_alpha_1`: G1 `[x, y, 1]`
//! - `vk_beta_2`, `vk_gamma_2`, `vk_delta_2`: G2 `[[x0, x1], [y0, y1], [1, 0]]`
//! - `IC`: list of G1, one per public input
//!
//! Other keys (`protocol`, `curve`, `vk_alphabeta_12`, ...) are ignored.
//!
//! ## Binary layout
//! - [0..64]: alpha_g1
//! - [64..192]: beta_g2
//! - [192..320]: gamma_g2
//! - [320..448]: delta_g2
//! - [448..]: IC points (64 bytes each)

use log::debug;
use serde_json::{Map, Value};

use crate::errors::{CodecError, LayoutError, Result};
use crate::field::json_kind;
use crate::point::{G1Point, G2Point, PointCodec};
use crate::types::{CurveParams, G1, G2};

/// Size of the fixed part of the binary key (alpha + beta + gamma + delta)
pub const VK_HEADER_SIZE: usize = 64 + 3 * 128;

/// Verification key fields, in serialization order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VkRole {
    Alpha1,
    Beta2,
    Gamma2,
    Delta2,
    Ic,
}

impl VkRole {
    pub const ALL: [VkRole; 5] = [
        VkRole::Alpha1,
        VkRole::Beta2,
        VkRole::Gamma2,
        VkRole::Delta2,
        VkRole::Ic,
    ];

    /// Key in the snarkjs JSON
    pub fn json_key(self) -> &'static str {
        match self {
            VkRole::Alpha1 => "vk_alpha_1",
            VkRole::Beta2 => "vk_beta_2",
            VkRole::Gamma2 => "vk_gamma_2",
            VkRole::Delta2 => "vk_delta_2",
            VkRole::Ic => "IC",
        }
    }

    /// Field of the generated verifying-key constant
    pub fn field_name(self) -> &'static str {
        match self {
            VkRole::Alpha1 => "vk_alpha_g1",
            VkRole::Beta2 => "vk_beta_g2",
            VkRole::Gamma2 => "vk_gamma_g2",
            VkRole::Delta2 => "vk_delta_g2",
            VkRole::Ic => "vk_ic",
        }
    }
}

/// Parsed Groth16 verification key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationKey {
    pub alpha1: G1Point,
    pub beta2: G2Point,
    pub gamma2: G2Point,
    pub delta2: G2Point,
    pub ic: Vec<G1Point>,
    /// `nPublic` as declared by snarkjs, when present
    pub n_public: Option<usize>,
}

impl VerificationKey {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_json(&value)
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| {
            CodecError::malformed("<root>", format!("expected an object, found {}", json_kind(value)))
        })?;

        let mut alpha1 = None;
        let mut beta2 = None;
        let mut gamma2 = None;
        let mut delta2 = None;
        let mut ic = None;

        for role in VkRole::ALL {
            let key = role.json_key();
            let entry = required(obj, key)?;
            match role {
                VkRole::Alpha1 => alpha1 = Some(G1Point::from_json(entry, key)?),
                VkRole::Beta2 => beta2 = Some(G2Point::from_json(entry, key)?),
                VkRole::Gamma2 => gamma2 = Some(G2Point::from_json(entry, key)?),
                VkRole::Delta2 => delta2 = Some(G2Point::from_json(entry, key)?),
                VkRole::Ic => ic = Some(parse_ic(entry)?),
            }
        }

        let n_public = obj
            .get("nPublic")
            .and_then(Value::as_u64)
            .map(|n| n as usize);

        match (alpha1, beta2, gamma2, delta2, ic) {
            (Some(alpha1), Some(beta2), Some(gamma2), Some(delta2), Some(ic)) => Ok(Self {
                alpha1,
                beta2,
                gamma2,
                delta2,
                ic,
                n_public,
            }),
            _ => Err(CodecError::malformed("<root>", "incomplete verification key")),
        }
    }

    /// Encode every point uncompressed; keys are never compressed.
    pub fn serialize(&self, params: &CurveParams) -> Result<SerializedVk> {
        let mut out = SerializedVk {
            nr_pubinputs: self.ic.len(),
            alpha_g1: [0u8; 64],
            beta_g2: [0u8; 128],
            gamma_g2: [0u8; 128],
            delta_g2: [0u8; 128],
            ic: Vec::with_capacity(self.ic.len()),
        };

        for role in VkRole::ALL {
            let key = role.json_key();
            match role {
                VkRole::Alpha1 => out.alpha_g1 = self.alpha1.to_uncompressed(params, key)?,
                VkRole::Beta2 => out.beta_g2 = self.beta2.to_uncompressed(params, key)?,
                VkRole::Gamma2 => out.gamma_g2 = self.gamma2.to_uncompressed(params, key)?,
                VkRole::Delta2 => out.delta_g2 = self.delta2.to_uncompressed(params, key)?,
                VkRole::Ic => {
                    for (i, point) in self.ic.iter().enumerate() {
                        out.ic.push(point.to_uncompressed(params, &format!("{key}[{i}]"))?);
                    }
                }
            }
            debug!("serialized {}", role.field_name());
        }

        Ok(out)
    }
}

/// Verification key in the byte layout of the on-chain verifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedVk {
    /// Number of IC points, emitted verbatim
    pub nr_pubinputs: usize,
    pub alpha_g1: G1,
    pub beta_g2: G2,
    pub gamma_g2: G2,
    pub delta_g2: G2,
    pub ic: Vec<G1>,
}

impl SerializedVk {
    /// Concatenate into the binary layout
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(VK_HEADER_SIZE + 64 * self.ic.len());
        out.extend_from_slice(&self.alpha_g1);
        out.extend_from_slice(&self.beta_g2);
        out.extend_from_slice(&self.gamma_g2);
        out.extend_from_slice(&self.delta_g2);
        for point in &self.ic {
            out.extend_from_slice(point);
        }
        out
    }

    /// Parse the binary layout back
    pub fn from_bytes(bytes: &[u8]) -> core::result::Result<Self, LayoutError> {
        if bytes.len() < VK_HEADER_SIZE + 64 {
            return Err(LayoutError::TooShort {
                expected: VK_HEADER_SIZE + 64,
                actual: bytes.len(),
            });
        }
        let tail = bytes.len() - VK_HEADER_SIZE;
        if tail % 64 != 0 {
            return Err(LayoutError::TrailingBytes { extra: tail % 64 });
        }

        let mut alpha_g1 = [0u8; 64];
        let mut beta_g2 = [0u8; 128];
        let mut gamma_g2 = [0u8; 128];
        let mut delta_g2 = [0u8; 128];
        alpha_g1.copy_from_slice(&bytes[0..64]);
        beta_g2.copy_from_slice(&bytes[64..192]);
        gamma_g2.copy_from_slice(&bytes[192..320]);
        delta_g2.copy_from_slice(&bytes[320..448]);

        let ic: Vec<G1> = bytes[VK_HEADER_SIZE..]
            .chunks_exact(64)
            .map(|chunk| {
                let mut point = [0u8; 64];
                point.copy_from_slice(chunk);
                point
            })
            .collect();

        Ok(Self {
            nr_pubinputs: ic.len(),
            alpha_g1,
            beta_g2,
            gamma_g2,
            delta_g2,
            ic,
        })
    }
}

fn required<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a Value> {
    obj.get(key)
        .ok_or_else(|| CodecError::malformed(key, "missing field"))
}

fn parse_ic(value: &Value) -> Result<Vec<G1Point>> {
    let key = VkRole::Ic.json_key();
    let rows = value.as_array().ok_or_else(|| {
        CodecError::malformed(key, format!("expected an array, found {}", json_kind(value)))
    })?;
    if rows.is_empty() {
        return Err(CodecError::malformed(key, "must contain at least one point"));
    }
    rows.iter()
        .enumerate()
        .map(|(i, row)| G1Point::from_json(row, &format!("{key}[{i}]")))
        .collect()
}
