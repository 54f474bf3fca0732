//! Error types for manifest generation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a generation run.
///
/// Any of these stops the whole run before a single artifact is replaced.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Required input is missing or malformed (module path, root directory).
    #[error("{0}")]
    Precondition(String),

    /// Directory or file access failed.
    #[error("I/O error at '{path}': {source}")]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Two files in one group sanitize to the same identifier.
    #[error("name collision in group '{group}': '{first}' and '{second}' both map to {identifier}")]
    NameCollision {
        /// Group directory name.
        group: String,
        /// The shared identifier.
        identifier: String,
        /// File that claimed the identifier first.
        first: String,
        /// File that collided with it.
        second: String,
    },

    /// A file name cannot be turned into an identifier.
    #[error("cannot derive an identifier from '{file}' in group '{group}'")]
    InvalidName {
        /// Group directory name.
        group: String,
        /// Offending file name (lossy if not UTF-8).
        file: String,
    },

    /// Generator configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl GenerateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for generation.
pub type GenerateResult<T> = Result<T, GenerateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GenerateError::NameCollision {
            group: "sfx".to_string(),
            identifier: "Click".to_string(),
            first: "Click.wav".to_string(),
            second: "click.wav".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("sfx"));
        assert!(msg.contains("Click.wav"));
        assert!(msg.contains("click.wav"));

        let err = GenerateError::Precondition("-module flag is required".to_string());
        assert_eq!(err.to_string(), "-module flag is required");
    }
}
