use thiserror::Error;

/// Characters of response body kept in a [`SupplierError::Malformed`].
/// Enough to recognize the payload in a log line, small enough that a
/// megabyte of vendor HTML never lands in one.
const SNIPPET_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum SupplierError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("upstream fault {code}: {detail}")]
    Fault { code: String, detail: String },

    #[error("malformed response for {context}: {snippet}")]
    Malformed { context: String, snippet: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SupplierError {
    /// Stable machine-readable name for API error envelopes and log
    /// fields. Transport failures and bad statuses read as the vendor
    /// being unreachable; a decoded fault is the vendor saying no; the
    /// rest is us failing to make sense of what came back.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http(_) | Self::UnexpectedStatus { .. } => "upstream_unavailable",
            Self::Fault { .. } => "upstream_fault",
            Self::Malformed { .. } | Self::Deserialize { .. } => "malformed_response",
        }
    }
}

/// Bounded excerpt of a response body for error messages.
#[must_use]
pub fn snippet_of(body: &str) -> String {
    body.trim().chars().take(SNIPPET_CHARS).collect()
}
