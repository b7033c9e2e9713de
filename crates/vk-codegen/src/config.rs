//! Configuration handling for vk-codegen
//!
//! Priority: CLI flags > environment variables > config file > defaults

use anyhow::{Context, Result};
use groth16_codec::{CurveParams, Target};
use log::debug;
use serde::Deserialize;
use std::{fs, path::PathBuf};

use crate::{Cli, TargetArg};

const OUTPUT_DIR_ENV: &str = "VK_CODEGEN_OUTPUT_DIR";
const LOCAL_CONFIG: &str = "vk-codegen.toml";

/// Resolved configuration for a generation run
#[derive(Debug)]
pub struct Config {
    pub output_dir: PathBuf,
    pub params: CurveParams,
    pub target: Target,
    pub compressed_proof: bool,
    pub public_input_count: Option<usize>,
    pub quiet: bool,
}

impl Config {
    /// Load configuration from file, environment, and CLI args
    pub fn load(cli: &Cli) -> Result<Self> {
        let file_config = ConfigFile::load()?;
        let env_output_dir = std::env::var(OUTPUT_DIR_ENV).ok();
        Ok(Self::resolve(cli, env_output_dir, file_config.unwrap_or_default()))
    }

    fn resolve(cli: &Cli, env_output_dir: Option<String>, file: ConfigFile) -> Self {
        let output_dir = cli
            .output_dir
            .clone()
            .or_else(|| env_output_dir.as_deref().map(expand_tilde))
            .or_else(|| file.output_dir.as_deref().map(expand_tilde))
            .unwrap_or_else(|| PathBuf::from("."));

        // --strict also covers VK_CODEGEN_STRICT through clap
        let strict = cli.strict || file.strict.unwrap_or(false);
        let params = if strict {
            CurveParams::bn254().strict()
        } else {
            CurveParams::bn254()
        };

        let target = cli
            .target
            .or(file.target)
            .map(Target::from)
            .unwrap_or_default();

        Self {
            output_dir,
            params,
            target,
            compressed_proof: cli.compressed || file.compressed_proof.unwrap_or(false),
            public_input_count: cli.public_inputs,
            quiet: cli.quiet,
        }
    }
}

/// Configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    output_dir: Option<String>,
    strict: Option<bool>,
    compressed_proof: Option<bool>,
    target: Option<TargetArg>,
}

impl ConfigFile {
    /// First config file found wins; none is not an error.
    fn load() -> Result<Option<Self>> {
        for path in config_file_paths() {
            if !path.exists() {
                continue;
            }
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let config = Self::parse(&content)
                .with_context(|| format!("Invalid config file {}", path.display()))?;
            debug!("Loaded config from {}", path.display());
            return Ok(Some(config));
        }
        Ok(None)
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

fn config_file_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("vk-codegen").join("config.toml"));
    }
    paths
}

/// Expand ~ to home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use groth16_codec::OverflowPolicy;

    fn cli(extra: &[&str]) -> Cli {
        let mut args = vec!["vk-codegen", "a.wasm", "a.zkey", "input.json", "vk.json"];
        args.extend_from_slice(extra);
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = Config::resolve(&cli(&[]), None, ConfigFile::default());
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.target, Target::Verifier);
        assert_eq!(config.params.overflow, OverflowPolicy::Truncate);
        assert!(!config.compressed_proof);
        assert_eq!(config.public_input_count, None);
    }

    #[test]
    fn test_parse_config_file() {
        let file = ConfigFile::parse(
            r#"
            output_dir = "programs/verifier/src"
            strict = true
            compressed_proof = true
            target = "constant"
            "#,
        )
        .unwrap();
        assert_eq!(file.output_dir.as_deref(), Some("programs/verifier/src"));
        assert_eq!(file.target, Some(TargetArg::Constant));

        let config = Config::resolve(&cli(&[]), None, file);
        assert_eq!(config.output_dir, PathBuf::from("programs/verifier/src"));
        assert_eq!(config.params.overflow, OverflowPolicy::Reject);
        assert_eq!(config.target, Target::Constant);
        assert!(config.compressed_proof);
    }

    #[test]
    fn test_unknown_target_in_file_rejected() {
        assert!(ConfigFile::parse("target = \"wasm\"").is_err());
    }

    #[test]
    fn test_priority_flag_env_file() {
        let file = ConfigFile {
            output_dir: Some("from-file".into()),
            target: Some(TargetArg::Binary),
            ..Default::default()
        };
        let config = Config::resolve(&cli(&[]), Some("from-env".into()), file);
        assert_eq!(config.output_dir, PathBuf::from("from-env"));
        assert_eq!(config.target, Target::Binary);

        let file = ConfigFile {
            output_dir: Some("from-file".into()),
            target: Some(TargetArg::Binary),
            ..Default::default()
        };
        let config = Config::resolve(
            &cli(&["from-flag", "--target", "verifier"]),
            Some("from-env".into()),
            file,
        );
        assert_eq!(config.output_dir, PathBuf::from("from-flag"));
        assert_eq!(config.target, Target::Verifier);
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde("out/dir"), PathBuf::from("out/dir"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/keys"), home.join("keys"));
        }
    }
}
