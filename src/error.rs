use std::path::PathBuf;

/// Errors surfaced by the counting engine.
///
/// None of these are fatal to a running pipeline: bad detections are
/// skipped at the boundary, failed deliveries are logged and superseded
/// by the next cycle, and an empty export is a notification to the user.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("remote sink: {0}")]
    Remote(#[from] reqwest::Error),

    #[error("nothing to export: no records have been dispatched")]
    EmptyExport,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
