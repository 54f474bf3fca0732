//! Generator configuration.
//!
//! Controls which files count as audio assets and how the emitted source is
//! named. Configuration can be loaded from a TOML file; every field has a
//! default, so an empty file is valid.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{GenerateError, GenerateResult};
use crate::naming;

/// Default generated file name, written into each group directory.
pub const DEFAULT_OUTPUT_FILE: &str = "sounds_gen.rs";

/// Default name of the generated identifier enum.
pub const DEFAULT_TYPE_NAME: &str = "Sound";

/// Generator configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// File extensions recognized as audio assets (case-insensitive, no dot).
    pub extensions: Vec<String>,
    /// Name of the generated file in each group directory.
    pub output_file: String,
    /// Name of the generated identifier type.
    pub type_name: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["wav".to_string()],
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            type_name: DEFAULT_TYPE_NAME.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a specific path.
    ///
    /// Returns the defaults if the file doesn't exist. A file that exists but
    /// cannot be read or parsed is an error.
    pub fn load_from<P: AsRef<Path>>(path: P) -> GenerateResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| GenerateError::io(path, e))?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| GenerateError::Config(format!("{}: {e}", path.display())))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check that the configuration can produce valid, non-self-referencing output.
    pub fn validate(&self) -> GenerateResult<()> {
        if self.extensions.is_empty() {
            return Err(GenerateError::Config(
                "at least one audio extension is required".to_string(),
            ));
        }
        if let Some(bad) = self
            .extensions
            .iter()
            .find(|e| e.is_empty() || e.starts_with('.') || e.contains(['/', '\\']))
        {
            return Err(GenerateError::Config(format!(
                "extension '{bad}' must be a bare extension like \"wav\""
            )));
        }

        let output = Path::new(&self.output_file);
        if self.output_file.is_empty()
            || self.output_file.contains(['/', '\\'])
            || output.file_name().and_then(|n| n.to_str()) != Some(self.output_file.as_str())
        {
            return Err(GenerateError::Config(format!(
                "output file '{}' must be a plain file name",
                self.output_file
            )));
        }
        let output_ext = output.extension().and_then(|e| e.to_str()).unwrap_or_default();
        if self
            .extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(output_ext))
        {
            return Err(GenerateError::Config(format!(
                "output file '{}' would be picked up as an audio asset",
                self.output_file
            )));
        }

        if !naming::is_identifier(&self.type_name) {
            return Err(GenerateError::Config(format!(
                "type name '{}' is not a valid identifier",
                self.type_name
            )));
        }
        Ok(())
    }
}
