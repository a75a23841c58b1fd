//! bloomcheck configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::classifier::Classifier;
use crate::profile::ProfileRegistry;

/// How classification results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => anyhow::bail!("unknown output format '{other}' (expected text or json)"),
        }
    }
}

/// Top-level bloomcheck configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BloomcheckConfig {
    /// Custom profile table replacing the built-in registry.
    #[serde(default)]
    pub profiles: Option<PathBuf>,
    /// Output directory for batch reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub default_format: OutputFormat,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./bloomcheck-results")
}

impl Default for BloomcheckConfig {
    fn default() -> Self {
        Self {
            profiles: None,
            output_dir: default_output_dir(),
            default_format: OutputFormat::Text,
        }
    }
}

impl BloomcheckConfig {
    /// A classifier over the configured registry.
    pub fn classifier(&self) -> Result<Classifier> {
        match &self.profiles {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using custom profile table");
                Ok(Classifier::new(ProfileRegistry::load(path)?))
            }
            None => Ok(Classifier::builtin()),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let value = std::env::var(&result[start + 2..start + end]).unwrap_or_default();
        result.replace_range(start..start + end + 1, &value);
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `bloomcheck.toml` in the current directory
/// 2. `~/.config/bloomcheck/config.toml`
///
/// `BLOOMCHECK_PROFILES` overrides the `profiles` path.
pub fn load_config() -> Result<BloomcheckConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<BloomcheckConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("bloomcheck.toml");
            if local.exists() {
                Some(local)
            } else {
                config_home()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            parse_config_file(&path)?
        }
        None => BloomcheckConfig::default(),
    };

    if let Ok(profiles) = std::env::var("BLOOMCHECK_PROFILES") {
        if !profiles.is_empty() {
            config.profiles = Some(PathBuf::from(profiles));
        }
    }

    config.profiles = config.profiles.as_deref().map(resolve_path);
    config.output_dir = resolve_path(&config.output_dir);

    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<BloomcheckConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<BloomcheckConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn config_home() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("bloomcheck"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_BLOOMCHECK_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_BLOOMCHECK_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_BLOOMCHECK_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("${_BLOOMCHECK_UNSET_VAR}/x"), "/x");
        assert_eq!(resolve_env_vars("open ${brace"), "open ${brace");
        std::env::remove_var("_BLOOMCHECK_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = BloomcheckConfig::default();
        assert!(config.profiles.is_none());
        assert_eq!(config.output_dir, PathBuf::from("./bloomcheck-results"));
        assert_eq!(config.default_format, OutputFormat::Text);
    }

    #[test]
    fn parse_config() {
        let toml_str = r#"
profiles = "profiles/strict.toml"
output_dir = "out"
default_format = "json"
"#;
        let config: BloomcheckConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.profiles, Some(PathBuf::from("profiles/strict.toml")));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.default_format, OutputFormat::Json);

        let empty: BloomcheckConfig = toml::from_str("").unwrap();
        assert_eq!(empty.output_dir, PathBuf::from("./bloomcheck-results"));
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/bloomcheck.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bloomcheck.toml");
        std::fs::write(&path, "output_dir = \"reports\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("reports"));
    }

    #[test]
    fn output_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(" text ".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("html".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn builtin_classifier_without_profiles() {
        let config = BloomcheckConfig::default();
        let classifier = config.classifier().unwrap();
        assert_eq!(classifier.registry().iter().count(), 6);
        let result = classifier.classify(
            None,
            "Compare and contrast mitosis and meiosis.",
            crate::CognitiveLevel::Analyzing,
        );
        assert!(result.matches_level);
    }

    #[test]
    fn missing_profile_table_is_an_error() {
        let config = BloomcheckConfig {
            profiles: Some(PathBuf::from("/nonexistent/profiles.toml")),
            ..BloomcheckConfig::default()
        };
        assert!(config.classifier().is_err());
    }
}
