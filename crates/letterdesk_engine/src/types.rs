pub type JobId = u64;

/// Validated webhook answer: both parts are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub preview_html: String,
    pub download_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    GenerationCompleted {
        job_id: JobId,
        result: Result<GeneratedDocument, GenerationError>,
    },
}

/// Every way a submission can fail. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("Invalid webhook URL: {0}")]
    InvalidEndpoint(String),
    #[error("Could not encode the request: {0}")]
    InvalidPayload(String),
    #[error("Could not reach the generator: {0}")]
    Transport(String),
    #[error("Request failed with status {status}")]
    RequestFailed { status: u16 },
    #[error("Server returned an empty response")]
    EmptyResponse,
    /// `raw` is kept for diagnostics and never part of the message.
    #[error("Server returned invalid JSON")]
    MalformedResponse { raw: String },
    #[error("Invalid response format from server")]
    InvalidResultShape,
}
