//! Verifier emitter
//!
//! Interpolates a rendered verifying-key constant into the fixed verifier
//! logic consumed by a Solana program through `groth16-solana`.

use crate::errors::Result;
use crate::key::SerializedVk;
use crate::render::{byte_list, byte_rows, ConstantLayout, Groth16SolanaSyntax, Syntax};
use crate::types::Fe;

/// Placeholder replaced by the rendered constant
const VK_PLACEHOLDER: &str = "__VERIFYING_KEY__";

/// Verifier logic around the `VERIFYINGKEY` constant.
///
/// `verify_proof` expects `pi_a || pi_b || pi_c || public signals`; pi_a is
/// negated here because the pairing check uses `-A`.
const VERIFIER_TEMPLATE: &str = r#"// Generated by vk-codegen. Do not edit.

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, Compress, Validate};
use groth16_solana::{
    errors::Groth16Error,
    groth16::{Groth16Verifier, Groth16Verifyingkey},
};
use std::ops::Neg;

type G1 = ark_bn254::g1::G1Affine;

pub const VERIFYINGKEY: Groth16Verifyingkey<'static> = __VERIFYING_KEY__;

/// Public signals after the 256-byte proof (IC[0] is the constant term)
pub const NR_PUBLIC_SIGNALS: usize = VERIFYINGKEY.vk_ic.len() - 1;

const PROOF_SIZE: usize = 256;

fn chunk_instruction_data(data: &[u8]) -> Vec<[u8; 32]> {
    data.chunks(32)
        .map(|chunk| {
            let mut array = [0u8; 32];
            array[..chunk.len()].copy_from_slice(chunk);
            array
        })
        .collect()
}

fn change_endianness(bytes: &[u8]) -> Vec<u8> {
    let mut vec = Vec::with_capacity(bytes.len());
    for b in bytes.chunks(32) {
        for byte in b.iter().rev() {
            vec.push(*byte);
        }
    }
    vec
}

pub fn verify_proof(data: &[u8]) -> Result<bool, Groth16Error> {
    if data.len() != PROOF_SIZE + 32 * NR_PUBLIC_SIGNALS {
        return Err(Groth16Error::InvalidPublicInputsLength);
    }

    let proof_a: G1 = G1::deserialize_with_mode(
        &*[&change_endianness(&data[0..64]), &[0u8][..]].concat(),
        Compress::No,
        Validate::Yes,
    )
    .map_err(|_| Groth16Error::DecompressingG1Failed)?;
    let proof_a = proof_a.neg();
    let mut proof_a_neg = [0u8; 65];
    proof_a
        .x
        .serialize_with_mode(&mut proof_a_neg[..32], Compress::No)
        .map_err(|_| Groth16Error::DecompressingG1Failed)?;
    proof_a
        .y
        .serialize_with_mode(&mut proof_a_neg[32..], Compress::No)
        .map_err(|_| Groth16Error::DecompressingG1Failed)?;

    let proof_a: [u8; 64] = change_endianness(&proof_a_neg[..64])
        .try_into()
        .map_err(|_| Groth16Error::InvalidG1Length)?;
    let proof_b: &[u8; 128] = data[64..192]
        .try_into()
        .map_err(|_| Groth16Error::InvalidG2Length)?;
    let proof_c: &[u8; 64] = data[192..256]
        .try_into()
        .map_err(|_| Groth16Error::InvalidG1Length)?;
    let public_signals: [[u8; 32]; NR_PUBLIC_SIGNALS] = chunk_instruction_data(&data[256..])
        .try_into()
        .map_err(|_| Groth16Error::InvalidPublicInputsLength)?;

    let mut verifier =
        Groth16Verifier::new(&proof_a, proof_b, proof_c, &public_signals, &VERIFYINGKEY)?;
    verifier.verify()
}
"#;

/// What to write for a verification key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    /// Full verifier module
    #[default]
    Verifier,
    /// Only the `Groth16Verifyingkey` initializer
    Constant,
    /// Raw concatenated key bytes
    Binary,
}

impl Target {
    pub fn default_file_name(self) -> &'static str {
        match self {
            Target::Verifier => "verifier.rs",
            Target::Constant => "verifying_key.rs",
            Target::Binary => "verifying_key.bin",
        }
    }
}

/// A fully built output, ready for a single write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    Text(String),
    Binary(Vec<u8>),
}

impl Artifact {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Artifact::Text(s) => s.as_bytes(),
            Artifact::Binary(b) => b,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

/// Build the artifact for `target`.
pub fn emit(vk: &SerializedVk, target: Target, public_input_count: Option<usize>) -> Result<Artifact> {
    let layout = ConstantLayout::from_vk(vk, public_input_count)?;
    Ok(match target {
        Target::Verifier => Artifact::Text(emit_verifier(&layout, &Groth16SolanaSyntax)),
        Target::Constant => Artifact::Text(format!(
            "pub const VERIFYINGKEY: Groth16Verifyingkey<'static> = {};\n",
            Groth16SolanaSyntax.render(&layout)
        )),
        Target::Binary => Artifact::Binary(vk.to_bytes()),
    })
}

/// Interpolate the rendered constant into the verifier template.
pub fn emit_verifier(layout: &ConstantLayout, syntax: &impl Syntax) -> String {
    VERIFIER_TEMPLATE.replace(VK_PLACEHOLDER, &syntax.render(layout))
}

/// Rust test fixture holding a serialized proof and its public signals.
pub fn emit_proof_fixture(proof: &[u8], public_signals: &[Fe]) -> String {
    let mut s = String::from("// Generated by vk-codegen. Do not edit.\n\n");
    s.push_str(&format!(
        "pub const PROOF: [u8; {}] = [\n{}];\n\n",
        proof.len(),
        byte_rows(proof, 1)
    ));
    s.push_str(&format!(
        "pub const PUBLIC_SIGNALS: [[u8; 32]; {}] = [\n",
        public_signals.len()
    ));
    for signal in public_signals {
        s.push_str(&format!("    [{}],\n", byte_list(signal)));
    }
    s.push_str("];\n");
    s
}
