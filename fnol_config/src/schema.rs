use anyhow::Context;
use fnol_core::{BuildError, PatternDef, PatternLibrary};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub document: DocumentConfig,
    #[serde(default)]
    pub penalties: PenaltiesConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DocumentConfig {
    /// Program used to turn PDFs into text.
    #[serde(default = "DocumentConfig::default_pdftotext")]
    pub pdftotext: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            pdftotext: Self::default_pdftotext(),
        }
    }
}

impl DocumentConfig {
    fn default_pdftotext() -> String {
        fnol_document::DEFAULT_PDFTOTEXT.to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct PenaltiesConfig {
    /// Replaces the bundled fraud penalty table when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Replacements for individual built-in patterns.
    #[serde(default)]
    pub patterns: Vec<PatternDef>,
}

impl ExtractionConfig {
    /// Compile the built-in patterns with these overrides applied.
    pub fn library(&self) -> Result<PatternLibrary, BuildError> {
        if self.patterns.is_empty() {
            return Ok(PatternLibrary::builtin().clone());
        }
        PatternLibrary::with_overrides(&self.patterns)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default = "OutputConfig::default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: Self::default_pretty(),
        }
    }
}

impl OutputConfig {
    const fn default_pretty() -> bool {
        true
    }
}

const CONFIG_TEMPLATE: &str = r#"{
  "document": {
    "pdftotext": "pdftotext"
  },
  "penalties": {},
  "extraction": {
    "patterns": []
  },
  "output": {
    "pretty": true
  }
}
"#;

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("fnol"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'fnol init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        Ok(config)
    }

    /// Load the config file if one exists, otherwise use defaults.
    ///
    /// A config file that exists but cannot be parsed is still an error.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            info!("Loading config from {}", config_path.display());
            Self::load_from(&config_path)
        } else {
            info!("No config file at {}, using defaults", config_path.display());
            Ok(Self::default())
        }
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, CONFIG_TEMPLATE)?;

        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Configuration options:");
        println!("   - document.pdftotext: program used to convert PDF uploads to text");
        println!("   - penalties.path: JSON file replacing the bundled fraud penalty table");
        println!("   - extraction.patterns: [{{\"key\": \"policyNumber\", \"pattern\": \"...\"}}]");
        println!("   - output.pretty: pretty-print JSON reports");
        println!();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fnol_core::PatternKey;

    #[test]
    fn test_template_matches_defaults() -> anyhow::Result<()> {
        let config: Config = serde_json::from_str(CONFIG_TEMPLATE)?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_missing_sections_use_defaults() -> anyhow::Result<()> {
        let config: Config = serde_json::from_str(r#"{"output": {}}"#)?;
        assert_eq!(config.document.pdftotext, "pdftotext");
        assert!(config.output.pretty);
        assert!(config.penalties.path.is_none());
        assert!(config.extraction.patterns.is_empty());
        Ok(())
    }

    #[test]
    fn test_pattern_overrides_build_library() -> anyhow::Result<()> {
        let config: Config = serde_json::from_str(
            r#"{"extraction": {"patterns": [{"key": "assetId", "pattern": "(?i)vin\\s*:?\\s*(\\S+)"}]}}"#,
        )?;
        let library = config.extraction.library()?;
        let caps = library.get(PatternKey::AssetId).captures("VIN: 1HGCM82633A");
        assert_eq!(
            caps.and_then(|c| c.get(1)).map(|m| m.as_str()),
            Some("1HGCM82633A")
        );
        Ok(())
    }

    #[test]
    fn test_invalid_pattern_override_is_rejected() -> anyhow::Result<()> {
        let config: Config = serde_json::from_str(
            r#"{"extraction": {"patterns": [{"key": "location", "pattern": "(broken"}]}}"#,
        )?;
        assert!(config.extraction.library().is_err());
        Ok(())
    }
}
