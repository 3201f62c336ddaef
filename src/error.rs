use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("'{input}' is not a valid bates range")]
    Format { input: String },

    #[error("bates prefix mismatch: expected '{expected}', found '{found}'")]
    PrefixMismatch { expected: String, found: String },

    #[error("zero-padded bates numbers have unequal widths: '{start}' vs '{end}'")]
    WidthMismatch { start: String, end: String },

    #[error("series '{prefix}' has a gap: expected {expected} between '{after}' and '{before}'")]
    Gap {
        prefix: String,
        expected: u64,
        after: String,
        before: String,
    },

    #[error("discovery root not found: {path}")]
    DiscoveryRootNotFound { path: String },

    #[error("reference ring holds {len} entries, need at least 2")]
    InsufficientHistory { len: usize },

    #[error("page count mismatch for '{path}': bates range says {expected}, document has {actual}")]
    PageCountMismatch {
        path: String,
        expected: u64,
        actual: u64,
    },

    #[error("external tool '{tool}' failed: {detail}")]
    ExternalTool { tool: String, detail: String },

    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, BatesError>;
