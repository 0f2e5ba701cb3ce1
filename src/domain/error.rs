use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status. `message` is the
    /// `error` field of its body, when it sent one.
    #[error("server returned {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Application { status: u16, message: Option<String> },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("long URL is required")]
    Validation,
    #[error(transparent)]
    Api(#[from] ApiError),
}
