//! Call-buffer layout consumed by the generated `verify_proof`
//!
//! - [0..64]: pi_a
//! - [64..192]: pi_b
//! - [192..256]: pi_c
//! - [256..]: public signals, 32 bytes each, in circuit order

use crate::constants::{PROOF_A_RANGE, PROOF_B_RANGE, PROOF_C_RANGE, PROOF_SIZE, PUBLIC_SIGNAL_SIZE};
use crate::errors::LayoutError;
use crate::types::{Fe, G1, G2};

/// Borrowed view over a call buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofPayload<'a> {
    pub proof_a: &'a G1,
    pub proof_b: &'a G2,
    pub proof_c: &'a G1,
    pub public_signals: Vec<Fe>,
}

impl<'a> ProofPayload<'a> {
    /// Split `data`, which must hold exactly `nr_public_signals` signals.
    pub fn parse(data: &'a [u8], nr_public_signals: usize) -> Result<Self, LayoutError> {
        let expected = PROOF_SIZE + PUBLIC_SIGNAL_SIZE * nr_public_signals;
        if data.len() < expected {
            return Err(LayoutError::TooShort {
                expected,
                actual: data.len(),
            });
        }
        if data.len() > expected {
            return Err(LayoutError::TrailingBytes {
                extra: data.len() - expected,
            });
        }

        // Lengths checked above
        let proof_a = data[PROOF_A_RANGE]
            .try_into()
            .map_err(|_| too_short(expected, data.len()))?;
        let proof_b = data[PROOF_B_RANGE]
            .try_into()
            .map_err(|_| too_short(expected, data.len()))?;
        let proof_c = data[PROOF_C_RANGE]
            .try_into()
            .map_err(|_| too_short(expected, data.len()))?;

        Ok(Self {
            proof_a,
            proof_b,
            proof_c,
            public_signals: chunk_signals(&data[PROOF_SIZE..])?,
        })
    }
}

/// Build a call buffer from a 256-byte proof and its public signals.
pub fn assemble(proof: &[u8], public_signals: &[Fe]) -> Result<Vec<u8>, LayoutError> {
    if proof.len() != PROOF_SIZE {
        return Err(LayoutError::TooShort {
            expected: PROOF_SIZE,
            actual: proof.len(),
        });
    }
    let mut data = Vec::with_capacity(PROOF_SIZE + PUBLIC_SIGNAL_SIZE * public_signals.len());
    data.extend_from_slice(proof);
    for signal in public_signals {
        data.extend_from_slice(signal);
    }
    Ok(data)
}

/// Slice a signal block into 32-byte windows.
pub fn chunk_signals(data: &[u8]) -> Result<Vec<Fe>, LayoutError> {
    if data.len() % PUBLIC_SIGNAL_SIZE != 0 {
        return Err(LayoutError::NotChunkAligned { len: data.len() });
    }
    Ok(data
        .chunks_exact(PUBLIC_SIGNAL_SIZE)
        .map(|chunk| {
            let mut limb = [0u8; PUBLIC_SIGNAL_SIZE];
            limb.copy_from_slice(chunk);
            limb
        })
        .collect())
}

fn too_short(expected: usize, actual: usize) -> LayoutError {
    LayoutError::TooShort { expected, actual }
}
