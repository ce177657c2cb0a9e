//! Error types for the review watcher

/// Errors that can occur while watching review statuses
#[derive(Debug, thiserror::Error)]
pub enum WatcherError {
    #[error("Missing required configuration: {0}")]
    Token(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Response is not valid JSON: {0}")]
    Format(String),

    #[error("Missing key in response: {0}")]
    MissingKey(String),

    #[error("Unexpected type in response: {0}")]
    Type(String),

    #[error("Homework list is empty")]
    EmptyList,

    #[error("Unknown homework status: {0}")]
    InvalidStatus(String),

    #[error("Unexpected submission data type: {0}")]
    DataType(String),

    #[error("Submission has no homework_name")]
    MissingName,

    #[error("Failed to send message: {0}")]
    SendMessage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WatcherError {
    /// Stable tag used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            WatcherError::Token(_) => "TokenError",
            WatcherError::Config(_) => "ConfigError",
            WatcherError::Api(_) => "ApiError",
            WatcherError::Format(_) => "FormatError",
            WatcherError::MissingKey(_) => "MissingKeyError",
            WatcherError::Type(_) => "TypeError",
            WatcherError::EmptyList => "EmptyListError",
            WatcherError::InvalidStatus(_) => "InvalidStatusError",
            WatcherError::DataType(_) => "DataTypeError",
            WatcherError::MissingName => "MissingNameError",
            WatcherError::SendMessage(_) => "SendMessageError",
            WatcherError::Io(_) => "IoError",
        }
    }

    /// Human-readable detail forwarded to the chat in fault messages
    pub fn describe(&self) -> String {
        format!("{}: {}", self.kind(), self)
    }

    /// An empty homework list means "nothing new", not a fault
    pub fn is_benign(&self) -> bool {
        matches!(self, WatcherError::EmptyList)
    }
}

/// Result type alias for review watcher operations
pub type Result<T> = std::result::Result<T, WatcherError>;
