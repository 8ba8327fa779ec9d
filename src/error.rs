use thiserror::Error;

/// Errors raised while talking to the dessert API or preparing its data.
///
/// Variants carry rendered messages rather than the source errors so the
/// whole enum stays `Clone` and can ride inside iced `Message`s.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid JSON payload: {0}")]
    Decode(String),

    #[error("Image processing failed: {0}")]
    Image(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Background task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        match (err.status(), err.url()) {
            (Some(status), Some(url)) => StoreError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            },
            _ => StoreError::Http(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Decode(err.to_string())
    }
}

impl From<image::ImageError> for StoreError {
    fn from(err: image::ImageError) -> Self {
        StoreError::Image(err.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        StoreError::Task(err.to_string())
    }
}
