/// Errors that can occur while reading the panel configuration document.
///
/// Only a structurally invalid document is fatal for the whole process;
/// everything below the top-level array is recovered from by defaulting or
/// by skipping the offending panel or module.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config structure: {0}")]
    Structure(String),

    #[error("failed to parse config as JSON: {0}")]
    Json(#[from] serde_json::Error),
}
