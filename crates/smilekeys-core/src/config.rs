// Smilekeys Configuration
// Loads the TOML smiley table and validates it into a sequence registry

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::sequence::{SequenceError, SequenceRegistry, SymbolSequence};

/// Errors that can occur when loading configuration.
///
/// All of these are fatal at startup; there is nothing sensible to inject
/// without a valid smiley table.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("invalid smiley entry: {0}")]
    InvalidEntry(#[from] SequenceError),
}

/// TOML representation of the configuration file
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigToml {
    /// Smiley table: name -> typed sequence
    #[serde(default)]
    smileys: IndexMap<String, String>,
}

/// Declarative smiley configuration, loaded once at startup.
///
/// ```toml
/// [smileys]
/// smile = ":)"
/// wink  = ";)"
/// ```
#[derive(Debug, Clone, Default)]
pub struct Config {
    smileys: IndexMap<String, String>,
}

impl Config {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: ConfigToml =
            toml::from_str(content).map_err(|e| ConfigError::TomlParse(e.to_string()))?;
        Ok(Self {
            smileys: parsed.smileys,
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Default configuration path (~/.config/smilekeys/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("smilekeys").join("config.toml"))
    }

    /// Load from the default location, or an empty configuration when the
    /// file does not exist
    pub fn load_default() -> Result<Self, ConfigError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        Ok(Self::default())
    }

    /// Configured entries in file order
    pub fn smileys(&self) -> &IndexMap<String, String> {
        &self.smileys
    }

    pub fn is_empty(&self) -> bool {
        self.smileys.is_empty()
    }

    /// Validate every entry and build the sequence registry.
    ///
    /// Length limits, empty entries, and duplicate names are rejected here,
    /// at the configuration boundary.
    pub fn into_registry(self) -> Result<SequenceRegistry, ConfigError> {
        let mut registry = SequenceRegistry::new();
        for (name, text) in self.smileys {
            registry.insert(SymbolSequence::new(name, &text)?)?;
        }
        Ok(registry)
    }
}

/// Starter configuration content for a new installation
pub fn default_config_content() -> &'static str {
    r#"# Smilekeys Configuration
# Each entry maps an action name to the character sequence it types.
# Place this file at: ~/.config/smilekeys/config.toml

[smileys]
smile = ":)"
wink  = ";)"
grin  = ":D"
tongue = ":P"
shrug = "\\o/"
"#
}
