//! End-to-end tests over snarkjs-shaped fixtures

use groth16_codec::constants::{PROOF_SIZE, SIGN_BIT};
use groth16_codec::render::{ConstantLayout, FieldValue, NR_PUBINPUTS};
use groth16_codec::{
    generate_verifier, serialize_proof, Artifact, CodecError, CodegenOptions, CurveParams,
    LayoutError, ProofPayload, PublicSignals, SerializedVk, Target, VerificationKey,
};

const VK_JSON: &str = include_str!("fixtures/verification_key.json");
const PROOF_JSON: &str = include_str!("fixtures/proof.json");
const PUBLIC_JSON: &str = include_str!("fixtures/public.json");

fn text(artifact: Artifact) -> String {
    match artifact {
        Artifact::Text(text) => text,
        Artifact::Binary(_) => panic!("expected a text artifact"),
    }
}

#[test]
fn test_two_inputs_scenario() {
    let params = CurveParams::bn254();
    let vk = VerificationKey::from_json_str(VK_JSON).unwrap();
    assert_eq!(vk.ic.len(), 2);

    let signals = PublicSignals::from_json_str(PUBLIC_JSON).unwrap();
    assert_eq!(signals.serialize(&params).unwrap().len(), 64);

    let layout = ConstantLayout::from_vk(&vk.serialize(&params).unwrap(), Some(2)).unwrap();
    assert_eq!(layout.get(NR_PUBINPUTS), Some(&FieldValue::Integer(2)));

    let verifier = text(generate_verifier(VK_JSON, &CodegenOptions::default()).unwrap());
    assert!(verifier.contains("    nr_pubinputs: 2,\n"));
}

#[test]
fn test_verifier_is_deterministic() {
    let options = CodegenOptions::default();
    let a = generate_verifier(VK_JSON, &options).unwrap();
    let b = generate_verifier(VK_JSON, &options).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_verifier_embeds_generator_bytes() {
    let verifier = text(generate_verifier(VK_JSON, &CodegenOptions::default()).unwrap());
    // alpha = (1, 2): first row ends in 1, second in 2
    let zeros = vec!["0"; 31].join(", ");
    assert!(verifier.contains(&format!("    vk_alpha_g1: [\n        {zeros}, 1,\n        {zeros}, 2,\n    ],")));
    assert!(verifier.contains("vk_gamme_g2"));
}

#[test]
fn test_public_input_count_mismatch() {
    let options = CodegenOptions {
        public_input_count: Some(1),
        ..Default::default()
    };
    match generate_verifier(VK_JSON, &options) {
        Err(CodecError::MalformedInput { field, reason }) => {
            assert_eq!(field, "IC");
            assert_eq!(reason, "expected 1 points, found 2");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_binary_target_round_trips() {
    let options = CodegenOptions {
        target: Target::Binary,
        ..Default::default()
    };
    let artifact = generate_verifier(VK_JSON, &options).unwrap();
    let Artifact::Binary(bytes) = artifact else {
        panic!("expected a binary artifact")
    };
    let parsed = SerializedVk::from_bytes(&bytes).unwrap();
    let direct = VerificationKey::from_json_str(VK_JSON)
        .unwrap()
        .serialize(&CurveParams::bn254())
        .unwrap();
    assert_eq!(parsed, direct);
}

#[test]
fn test_proof_call_data_layout() {
    let out = serialize_proof(PROOF_JSON, PUBLIC_JSON, &CurveParams::bn254(), false).unwrap();
    let data = out.call_data().unwrap();
    assert_eq!(data.len(), PROOF_SIZE + 64);

    let payload = ProofPayload::parse(&data, 2).unwrap();
    assert_eq!(payload.proof_a[31], 1);
    assert_eq!(payload.proof_a[63], 2);
    assert_eq!(payload.public_signals[0][31], 9);
    // p - 1 ends in ...00 00 00 00
    assert_eq!(payload.public_signals[1][31], 0x00);
    assert_eq!(payload.public_signals[1][0], 0x30);
}

#[test]
fn test_compressed_proof_sign_bits() {
    let out = serialize_proof(PROOF_JSON, PUBLIC_JSON, &CurveParams::bn254(), true).unwrap();
    assert_eq!(out.proof.len(), 128);
    // pi_a y = 2: positive
    assert_eq!(out.proof[0] & SIGN_BIT, 0);
    // pi_b y1 below p / 2: positive
    assert_eq!(out.proof[32] & SIGN_BIT, 0);
    // pi_c y = q - 2: negative
    assert_eq!(out.proof[96] & SIGN_BIT, SIGN_BIT);
    assert_eq!(out.proof[127], 1);
}

#[test]
fn test_empty_call_data_rejected() {
    assert!(matches!(
        ProofPayload::parse(&[], 2),
        Err(LayoutError::TooShort { actual: 0, .. })
    ));
}

#[test]
fn test_strict_mode_rejects_oversized_signal() {
    let oversized = format!("[\"{}\"]", "9".repeat(80));
    let err = serialize_proof(PROOF_JSON, &oversized, &CurveParams::bn254().strict(), false)
        .unwrap_err();
    assert!(matches!(err, CodecError::EncodingOverflow { .. }));

    // Legacy mode truncates instead
    assert!(serialize_proof(PROOF_JSON, &oversized, &CurveParams::bn254(), false).is_ok());
}
