//! Generate command - write the verifier (and optional proof fixture)

use crate::config::Config;
use crate::error::CliError;
use crate::Cli;
use anyhow::{Context, Result};
use console::style;
use groth16_codec::{generate_verifier, serialize_proof, CodegenOptions};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

const PROOF_FIXTURE: &str = "proof.rs";

/// Artifact built in memory, written once every output is ready
struct Output {
    path: PathBuf,
    bytes: Vec<u8>,
}

pub fn run(config: &Config, cli: &Cli) -> Result<()> {
    // Prover inputs are only checked; proving happens outside this tool
    for path in [&cli.wasm_file, &cli.zkey_file, &cli.input_json] {
        if !path.exists() {
            return Err(CliError::InputNotFound(path.clone()).into());
        }
    }

    let proof_inputs = match (&cli.proof, &cli.public) {
        (Some(proof_path), Some(public_path)) => Some((proof_path, public_path)),
        (Some(_), None) => return Err(CliError::MissingArgument("--public").into()),
        (None, Some(_)) => return Err(CliError::MissingArgument("--proof").into()),
        (None, None) => None,
    };

    let vk_json = fs::read_to_string(&cli.verification_key_json).with_context(|| {
        format!(
            "Failed to read verification key: {}",
            cli.verification_key_json.display()
        )
    })?;

    if !config.quiet {
        println!(
            "{} Generating {:?} from {}",
            style("→").cyan().bold(),
            config.target,
            cli.verification_key_json.display()
        );
    }

    let options = CodegenOptions {
        params: config.params.clone(),
        target: config.target,
        public_input_count: config.public_input_count,
    };
    let artifact = generate_verifier(&vk_json, &options)
        .with_context(|| format!("Invalid verification key: {}", cli.verification_key_json.display()))?;

    let mut outputs = vec![Output {
        path: config.output_dir.join(config.target.default_file_name()),
        bytes: artifact.as_bytes().to_vec(),
    }];

    if let Some((proof_path, public_path)) = proof_inputs {
        outputs.push(proof_fixture(config, proof_path, public_path)?);
    }

    write_all(&outputs)?;

    if !config.quiet {
        println!();
        for output in &outputs {
            println!("{} {}", style("✓").green().bold(), output.path.display());
        }
    }

    Ok(())
}

/// Stage every output next to its destination, then move them all into place.
///
/// On failure nothing new is left behind: staged files are removed and
/// outputs already moved are deleted again.
fn write_all(outputs: &[Output]) -> Result<(), CliError> {
    let mut staged: Vec<PathBuf> = Vec::with_capacity(outputs.len());
    for output in outputs {
        let tmp = staging_path(&output.path);
        if let Err(source) = fs::write(&tmp, &output.bytes) {
            let _ = fs::remove_file(&tmp);
            discard(&staged);
            return Err(CliError::FileWrite {
                path: output.path.clone(),
                source,
            });
        }
        staged.push(tmp);
    }

    for (i, (output, tmp)) in outputs.iter().zip(&staged).enumerate() {
        if let Err(source) = fs::rename(tmp, &output.path) {
            for placed in &outputs[..i] {
                let _ = fs::remove_file(&placed.path);
            }
            discard(&staged[i..]);
            return Err(CliError::FileWrite {
                path: output.path.clone(),
                source,
            });
        }
        info!("Wrote {} ({} bytes)", output.path.display(), output.bytes.len());
    }
    Ok(())
}

/// `<path>.tmp` in the same directory, so the final rename stays on one filesystem
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn discard(paths: &[PathBuf]) {
    for path in paths {
        let _ = fs::remove_file(path);
    }
}

fn proof_fixture(config: &Config, proof_path: &Path, public_path: &Path) -> Result<Output> {
    let proof_json = fs::read_to_string(proof_path)
        .with_context(|| format!("Failed to read proof: {}", proof_path.display()))?;
    let public_json = fs::read_to_string(public_path)
        .with_context(|| format!("Failed to read public signals: {}", public_path.display()))?;

    let serialized = serialize_proof(&proof_json, &public_json, &config.params, config.compressed_proof)
        .context("Invalid proof or public signals")?;

    if !serialized.compressed {
        let call_data = serialized.call_data()?;
        debug!("verify_proof call data: {}", hex::encode(&call_data));
        if !config.quiet {
            println!("  Call data: {} bytes", call_data.len());
        }
    }

    Ok(Output {
        path: config.output_dir.join(PROOF_FIXTURE),
        bytes: serialized.fixture().into_bytes(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use groth16_codec::{CurveParams, Target};

    const VK_JSON: &str = include_str!("../../groth16-codec/tests/fixtures/verification_key.json");
    const PROOF_JSON: &str = include_str!("../../groth16-codec/tests/fixtures/proof.json");
    const PUBLIC_JSON: &str = include_str!("../../groth16-codec/tests/fixtures/public.json");

    /// Scratch directory with the four positional inputs in place
    fn workspace(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("vk-codegen-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("circuit.wasm"), b"\0asm").unwrap();
        fs::write(dir.join("circuit_final.zkey"), b"zkey").unwrap();
        fs::write(dir.join("input.json"), b"{}").unwrap();
        fs::write(dir.join("verification_key.json"), VK_JSON).unwrap();
        fs::write(dir.join("proof.json"), PROOF_JSON).unwrap();
        fs::write(dir.join("public.json"), PUBLIC_JSON).unwrap();
        dir
    }

    fn cli(dir: &Path, extra: &[&str]) -> Cli {
        let path = |name: &str| dir.join(name).display().to_string();
        let mut args = vec![
            "vk-codegen".to_string(),
            path("circuit.wasm"),
            path("circuit_final.zkey"),
            path("input.json"),
            path("verification_key.json"),
        ];
        args.extend(extra.iter().map(|s| s.to_string()));
        Cli::try_parse_from(args).unwrap()
    }

    fn config(dir: &Path, target: Target) -> Config {
        Config {
            output_dir: dir.to_path_buf(),
            params: CurveParams::bn254(),
            target,
            compressed_proof: false,
            public_input_count: None,
            quiet: true,
        }
    }

    #[test]
    fn test_writes_verifier() {
        let dir = workspace("verifier");
        run(&config(&dir, Target::Verifier), &cli(&dir, &[])).unwrap();

        let verifier = fs::read_to_string(dir.join("verifier.rs")).unwrap();
        assert!(verifier.contains("nr_pubinputs: 2,"));
        assert!(verifier.contains("pub fn verify_proof"));
        assert!(!dir.join(PROOF_FIXTURE).exists());
    }

    #[test]
    fn test_writes_binary_key() {
        let dir = workspace("binary");
        run(&config(&dir, Target::Binary), &cli(&dir, &[])).unwrap();

        let bytes = fs::read(dir.join("verifying_key.bin")).unwrap();
        assert_eq!(bytes.len(), 448 + 2 * 64);
    }

    #[test]
    fn test_writes_proof_fixture() {
        let dir = workspace("fixture");
        let proof = dir.join("proof.json").display().to_string();
        let public = dir.join("public.json").display().to_string();
        let cli = cli(&dir, &["--proof", &proof, "--public", &public]);
        run(&config(&dir, Target::Verifier), &cli).unwrap();

        let fixture = fs::read_to_string(dir.join(PROOF_FIXTURE)).unwrap();
        assert!(fixture.contains("pub const PROOF: [u8; 256]"));
        assert!(fixture.contains("PUBLIC_SIGNALS"));
    }

    #[test]
    fn test_public_without_proof() {
        let dir = workspace("missing-proof");
        let public = dir.join("public.json").display().to_string();
        let err = run(&config(&dir, Target::Verifier), &cli(&dir, &["--public", &public])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::MissingArgument("--proof"))
        ));
        assert!(!dir.join("verifier.rs").exists());
    }

    #[test]
    fn test_proof_without_public() {
        let dir = workspace("missing-public");
        let proof = dir.join("proof.json").display().to_string();
        let err = run(&config(&dir, Target::Verifier), &cli(&dir, &["--proof", &proof])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::MissingArgument("--public"))
        ));
        assert!(!dir.join("verifier.rs").exists());
    }

    #[test]
    fn test_failed_second_write_leaves_no_artifact() {
        let dir = workspace("partial");
        // A directory squatting on proof.rs makes the second output fail
        fs::create_dir(dir.join(PROOF_FIXTURE)).unwrap();
        let proof = dir.join("proof.json").display().to_string();
        let public = dir.join("public.json").display().to_string();
        let cli = cli(&dir, &["--proof", &proof, "--public", &public]);

        let err = run(&config(&dir, Target::Verifier), &cli).unwrap_err();
        match err.downcast_ref::<CliError>() {
            Some(CliError::FileWrite { path, .. }) => assert_eq!(path, &dir.join(PROOF_FIXTURE)),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!dir.join("verifier.rs").exists());
        assert!(!dir.join("verifier.rs.tmp").exists());
        assert!(!dir.join("proof.rs.tmp").exists());
        assert!(dir.join(PROOF_FIXTURE).is_dir());
    }

    #[test]
    fn test_staging_path() {
        assert_eq!(
            staging_path(Path::new("out/verifier.rs")),
            PathBuf::from("out/verifier.rs.tmp")
        );
    }

    #[test]
    fn test_missing_prover_input() {
        let dir = workspace("no-zkey");
        fs::remove_file(dir.join("circuit_final.zkey")).unwrap();
        let err = run(&config(&dir, Target::Verifier), &cli(&dir, &[])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::InputNotFound(_))
        ));
    }

    #[test]
    fn test_unwritable_output_dir() {
        let dir = workspace("unwritable");
        let config = config(&dir.join("does-not-exist"), Target::Verifier);
        let err = run(&config, &cli(&dir, &[])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::FileWrite { .. })
        ));
    }

    #[test]
    fn test_malformed_key_writes_nothing() {
        let dir = workspace("malformed");
        fs::write(dir.join("verification_key.json"), r#"{"vk_alpha_1": ["1"]}"#).unwrap();
        assert!(run(&config(&dir, Target::Verifier), &cli(&dir, &[])).is_err());
        assert!(!dir.join("verifier.rs").exists());
    }
}
