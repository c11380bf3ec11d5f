//! Domain error types.

/// Top-level error type for assetlab.
#[derive(Debug, thiserror::Error)]
pub enum AssetlabError {
    #[error("invalid parameters: {reason}")]
    InvalidParameters { reason: String },

    #[error("invalid return at index {index}: {value} is a loss of 100% or more")]
    InvalidReturn { index: usize, value: f64 },

    #[error("insufficient data: have {have} points, need {need}")]
    InsufficientData { have: usize, need: usize },

    #[error("no data for {ticker}")]
    NoData { ticker: String },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&AssetlabError> for std::process::ExitCode {
    fn from(err: &AssetlabError) -> Self {
        let code: u8 = match err {
            AssetlabError::Io(_) => 1,
            AssetlabError::ConfigParse { .. }
            | AssetlabError::ConfigMissing { .. }
            | AssetlabError::ConfigInvalid { .. } => 2,
            AssetlabError::Data { .. } => 3,
            AssetlabError::InvalidParameters { .. } | AssetlabError::InvalidReturn { .. } => 4,
            AssetlabError::NoData { .. } | AssetlabError::InsufficientData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
