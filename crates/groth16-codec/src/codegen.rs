//! End-to-end pipelines: snarkjs JSON in, verifier artifacts out
//!
//! 1. Parse the JSON artifact into typed points
//! 2. Encode every coordinate for the target byte order
//! 3. Build the structured constant and render it once
//!
//! Nothing here touches the filesystem; callers write the returned bytes.

use log::info;

use crate::emit::{emit, emit_proof_fixture, Artifact, Target};
use crate::errors::{CodecError, Result};
use crate::key::VerificationKey;
use crate::payload::assemble;
use crate::proof::{Proof, PublicSignals};
use crate::types::{CurveParams, Fe};

/// Options for verifier generation
#[derive(Debug, Clone, Default)]
pub struct CodegenOptions {
    pub params: CurveParams,
    pub target: Target,
    /// Expected number of IC points, checked when set
    pub public_input_count: Option<usize>,
}

/// Generate the verifier artifact for a snarkjs verification key
///
/// # Arguments
/// * `vk_json` - Contents of `verification_key.json`
/// * `options` - Curve parameters, output target and optional IC count check
///
/// # Returns
/// * `Ok(Artifact)` fully built in memory
/// * `Err(CodecError)` on malformed input or a count mismatch
pub fn generate_verifier(vk_json: &str, options: &CodegenOptions) -> Result<Artifact> {
    let vk = VerificationKey::from_json_str(vk_json)?;
    info!(
        "Parsed verification key: {} IC points{}",
        vk.ic.len(),
        vk.n_public
            .map(|n| format!(" (nPublic = {n})"))
            .unwrap_or_default()
    );

    let serialized = vk.serialize(&options.params)?;
    emit(&serialized, options.target, options.public_input_count)
}

/// Serialized proof and public signals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedProof {
    /// 256 bytes, or 128 when compressed
    pub proof: Vec<u8>,
    pub public_signals: Vec<Fe>,
    pub compressed: bool,
}

impl SerializedProof {
    /// Single call buffer for `verify_proof`; only defined for uncompressed proofs.
    pub fn call_data(&self) -> Result<Vec<u8>> {
        if self.compressed {
            return Err(CodecError::malformed(
                "proof",
                "compressed proofs must be decompressed before building call data",
            ));
        }
        Ok(assemble(&self.proof, &self.public_signals)?)
    }

    /// Rust constants for tests of the on-chain program
    pub fn fixture(&self) -> String {
        emit_proof_fixture(&self.proof, &self.public_signals)
    }
}

/// Serialize a snarkjs proof and its public signals
///
/// # Arguments
/// * `proof_json` - Contents of `proof.json`
/// * `public_json` - Contents of `public.json`
/// * `params` - Curve parameters
/// * `compressed` - Emit 128-byte compressed proof
pub fn serialize_proof(
    proof_json: &str,
    public_json: &str,
    params: &CurveParams,
    compressed: bool,
) -> Result<SerializedProof> {
    let proof = Proof::from_json_str(proof_json)?;
    let signals = PublicSignals::from_json_str(public_json)?;
    info!(
        "Parsed proof with {} public signals{}",
        signals.len(),
        if compressed { " (compressed)" } else { "" }
    );

    Ok(SerializedProof {
        proof: proof.serialize(params, compressed)?,
        public_signals: signals.to_limbs(params)?,
        compressed,
    })
}
