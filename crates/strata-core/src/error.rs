use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StrataError {
    #[error("mutool not available: {0}. Install mupdf-tools (apt install mupdf-tools / brew install mupdf-tools) or set $MUPDF_BIN")]
    AdapterUnavailable(String),

    #[error("could not determine page count: {0}")]
    PageCountUnavailable(String),

    #[error("document {} has no pages", path.display())]
    EmptyDocument { path: PathBuf },

    #[error("pass {pass}: failed to decode pages {from}-{to}: {source}")]
    BatchDecode {
        pass: u8,
        from: usize,
        to: usize,
        #[source]
        source: Box<StrataError>,
    },

    #[error("no text detected in document")]
    NoTextDetected,

    #[error("extraction cancelled")]
    Cancelled,

    #[error("mutool failed with exit code {code}: {stderr}")]
    RendererFailed { code: i32, stderr: String },

    #[error("malformed stext.json payload: {0}")]
    MalformedStext(String),

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
