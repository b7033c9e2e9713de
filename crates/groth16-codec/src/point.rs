//! Point encoder for G1 and G2
//!
//! snarkjs emits affine points in projective form (`[x, y, 1]` for G1,
//! `[[x0, x1], [y0, y1], [1, 0]]` for G2); the trailing row is ignored.
//!
//! ## Byte layouts
//! - G1: `x || y`
//! - G2: `x1 || x0 || y1 || y0` (component order of the alt_bn128 syscalls)
//! - Compressed: x part only, bit 7 of byte 0 set when y is not positive

use num_bigint::BigUint;
use serde_json::Value;

use crate::constants::SIGN_BIT;
use crate::errors::{CodecError, Result};
use crate::field::{decode, encode_target, json_kind, FieldElement};
use crate::sign::{is_positive_g1, is_positive_g2};
use crate::types::{CurveParams, G1Compressed, G2Compressed, G1, G2};

/// Encoding capabilities shared by G1 and G2 points
pub trait PointCodec: Sized {
    type Uncompressed: AsRef<[u8]>;
    type Compressed: AsRef<[u8]>;

    const UNCOMPRESSED_SIZE: usize;
    const COMPRESSED_SIZE: usize;

    /// Read a point from its snarkjs JSON row; `field` names it for errors.
    fn from_json(value: &Value, field: &str) -> Result<Self>;

    fn to_uncompressed(&self, params: &CurveParams, field: &str) -> Result<Self::Uncompressed>;

    fn to_compressed(&self, params: &CurveParams, field: &str) -> Result<Self::Compressed>;

    fn encode(&self, params: &CurveParams, compressed: bool, field: &str) -> Result<Vec<u8>> {
        Ok(if compressed {
            self.to_compressed(params, field)?.as_ref().to_vec()
        } else {
            self.to_uncompressed(params, field)?.as_ref().to_vec()
        })
    }
}

/// Affine point on the base curve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct G1Point {
    pub x: FieldElement,
    pub y: FieldElement,
}

/// Affine point on the twist; `x = x0 + x1·u`, `y = y0 + y1·u`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct G2Point {
    pub x: (FieldElement, FieldElement),
    pub y: (FieldElement, FieldElement),
}

impl G1Point {
    pub fn new(x: impl Into<FieldElement>, y: impl Into<FieldElement>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }
}

impl G2Point {
    pub fn new(
        x: (impl Into<FieldElement>, impl Into<FieldElement>),
        y: (impl Into<FieldElement>, impl Into<FieldElement>),
    ) -> Self {
        Self {
            x: (x.0.into(), x.1.into()),
            y: (y.0.into(), y.1.into()),
        }
    }
}

impl PointCodec for G1Point {
    type Uncompressed = G1;
    type Compressed = G1Compressed;

    const UNCOMPRESSED_SIZE: usize = 64;
    const COMPRESSED_SIZE: usize = 32;

    fn from_json(value: &Value, field: &str) -> Result<Self> {
        let row = row(value, field, 2)?;
        Ok(Self {
            x: FieldElement::from_json(&row[0], &format!("{field}[0]"))?,
            y: FieldElement::from_json(&row[1], &format!("{field}[1]"))?,
        })
    }

    fn to_uncompressed(&self, params: &CurveParams, field: &str) -> Result<G1> {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&encode_target(&self.x, params, &format!("{field}.x"))?);
        out[32..].copy_from_slice(&encode_target(&self.y, params, &format!("{field}.y"))?);
        Ok(out)
    }

    fn to_compressed(&self, params: &CurveParams, field: &str) -> Result<G1Compressed> {
        let mut out = encode_target(&self.x, params, &format!("{field}.x"))?;
        let y = encode_target(&self.y, params, &format!("{field}.y"))?;
        let y = decode(&y, params.target_order);
        set_sign_bit(&mut out[0], is_positive_g1(&y, params));
        Ok(out)
    }
}

impl PointCodec for G2Point {
    type Uncompressed = G2;
    type Compressed = G2Compressed;

    const UNCOMPRESSED_SIZE: usize = 128;
    const COMPRESSED_SIZE: usize = 64;

    fn from_json(value: &Value, field: &str) -> Result<Self> {
        let rows = row(value, field, 2)?;
        let x = pair(&rows[0], &format!("{field}[0]"))?;
        let y = pair(&rows[1], &format!("{field}[1]"))?;
        Ok(Self { x, y })
    }

    fn to_uncompressed(&self, params: &CurveParams, field: &str) -> Result<G2> {
        let mut out = [0u8; 128];
        out[..64].copy_from_slice(&encode_pair(&self.x, params, &format!("{field}.x"))?);
        out[64..].copy_from_slice(&encode_pair(&self.y, params, &format!("{field}.y"))?);
        Ok(out)
    }

    fn to_compressed(&self, params: &CurveParams, field: &str) -> Result<G2Compressed> {
        let mut out = encode_pair(&self.x, params, &format!("{field}.x"))?;
        let y = encode_pair(&self.y, params, &format!("{field}.y"))?;
        let (y_hi, y_lo) = split_pair(&y, params);
        set_sign_bit(&mut out[0], is_positive_g2(&y_hi, &y_lo, params));
        Ok(out)
    }
}

/// `c1 || c0`, each limb in the target byte order
fn encode_pair(
    (c0, c1): &(FieldElement, FieldElement),
    params: &CurveParams,
    field: &str,
) -> Result<[u8; 64]> {
    let mut out = [0u8; 64];
    out[..32].copy_from_slice(&encode_target(c1, params, &format!("{field}.c1"))?);
    out[32..].copy_from_slice(&encode_target(c0, params, &format!("{field}.c0"))?);
    Ok(out)
}

/// Values of an encoded pair, in encoded order
fn split_pair(bytes: &[u8; 64], params: &CurveParams) -> (BigUint, BigUint) {
    let mut first = [0u8; 32];
    let mut second = [0u8; 32];
    first.copy_from_slice(&bytes[..32]);
    second.copy_from_slice(&bytes[32..]);
    (
        decode(&first, params.target_order),
        decode(&second, params.target_order),
    )
}

fn set_sign_bit(byte: &mut u8, y_is_positive: bool) {
    if !y_is_positive {
        *byte |= SIGN_BIT;
    }
}

fn row<'a>(value: &'a Value, field: &str, min_len: usize) -> Result<&'a [Value]> {
    let items = value.as_array().ok_or_else(|| {
        CodecError::malformed(field, format!("expected an array, found {}", json_kind(value)))
    })?;
    if items.len() < min_len {
        return Err(CodecError::malformed(
            field,
            format!("expected at least {min_len} entries, found {}", items.len()),
        ));
    }
    Ok(items)
}

fn pair(value: &Value, field: &str) -> Result<(FieldElement, FieldElement)> {
    let items = row(value, field, 2)?;
    Ok((
        FieldElement::from_json(&items[0], &format!("{field}[0]"))?,
        FieldElement::from_json(&items[1], &format!("{field}[1]"))?,
    ))
}
