//! Field-element codec
//!
//! Converts arbitrary-precision field elements (as found in snarkjs JSON) to
//! fixed 32-byte limbs in either byte order, and back.

use log::{debug, warn};
use num_bigint::BigUint;
use num_traits::Num;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::errors::{CodecError, Result};
use crate::types::{CurveParams, Endianness, Fe, OverflowPolicy, FIELD_SIZE};

/// A non-negative integer read from a proving-toolchain artifact
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldElement(BigUint);

impl FieldElement {
    pub fn new(value: BigUint) -> Self {
        Self(value)
    }

    pub fn from_u64(value: u64) -> Self {
        Self(BigUint::from(value))
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }

    pub fn into_inner(self) -> BigUint {
        self.0
    }

    /// Parse a decimal string or a `0x`-prefixed hex string.
    pub fn parse(s: &str) -> Option<Self> {
        let (digits, radix) = match s.strip_prefix("0x") {
            Some(hex) => (hex, 16),
            None => (s, 10),
        };
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return None;
        }
        BigUint::from_str_radix(digits, radix).ok().map(Self)
    }

    /// Read a JSON string or integer; `field` names the location for errors.
    pub fn from_json(value: &Value, field: &str) -> Result<Self> {
        match value {
            Value::String(s) => Self::parse(s).ok_or_else(|| {
                CodecError::malformed(field, format!("`{s}` is not a decimal or 0x-hex integer"))
            }),
            Value::Number(n) => n
                .as_u64()
                .map(Self::from_u64)
                .ok_or_else(|| CodecError::malformed(field, format!("`{n}` is not a non-negative integer"))),
            other => Err(CodecError::malformed(
                field,
                format!("expected a field element, found {}", json_kind(other)),
            )),
        }
    }

    /// Encode into one limb, applying the overflow policy of `params`.
    pub fn encode(&self, order: Endianness, params: &CurveParams, field: &str) -> Result<Fe> {
        if params.field_size != FIELD_SIZE {
            return Err(CodecError::UnsupportedFieldSize {
                size: params.field_size,
                supported: FIELD_SIZE,
            });
        }
        let bits = self.0.bits();
        if bits > (params.field_size * 8) as u64 {
            match params.overflow {
                OverflowPolicy::Reject => {
                    return Err(CodecError::EncodingOverflow {
                        field: field.to_string(),
                        bits,
                    })
                }
                OverflowPolicy::Truncate => {
                    warn!("{field}: {bits}-bit value truncated to its low 256 bits");
                }
            }
        } else if self.0 >= params.modulus {
            warn!("{field}: value is not reduced modulo p, encoding as-is");
        }
        Ok(encode(&self.0, order))
    }
}

/// Serialized as a decimal string, the snarkjs convention
impl Serialize for FieldElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_str_radix(10))
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value, "field element").map_err(serde::de::Error::custom)
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<BigUint> for FieldElement {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

/// Encode `value` into 32 bytes, zero-padded on the most-significant side.
///
/// Values wider than 256 bits keep only their low 256 bits.
pub fn encode(value: &BigUint, order: Endianness) -> Fe {
    let le = value.to_bytes_le();
    let mut out = [0u8; FIELD_SIZE];
    let n = le.len().min(FIELD_SIZE);
    out[..n].copy_from_slice(&le[..n]);
    if order == Endianness::Big {
        out.reverse();
    }
    out
}

/// Exact inverse of [`encode`] for values below 2^256.
pub fn decode(bytes: &Fe, order: Endianness) -> BigUint {
    match order {
        Endianness::Little => BigUint::from_bytes_le(bytes),
        Endianness::Big => BigUint::from_bytes_be(bytes),
    }
}

/// Reverse byte order inside every 32-byte window.
///
/// A trailing window shorter than 32 bytes is reversed on its own.
pub fn change_endianness(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    for chunk in bytes.chunks(FIELD_SIZE) {
        out.extend(chunk.iter().rev());
    }
    out
}

/// Reverse a single limb.
pub fn reverse_limb(limb: &Fe) -> Fe {
    let mut out = *limb;
    out.reverse();
    out
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Encode `value` for the target and trace it at debug level.
pub(crate) fn encode_target(value: &FieldElement, params: &CurveParams, field: &str) -> Result<Fe> {
    let fe = value.encode(params.target_order, params, field)?;
    debug!("{field} = 0x{}", hex::encode(fe));
    Ok(fe)
}
