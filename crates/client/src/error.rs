use avatax_core::ErrorInfo;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned by every client call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response. `error` holds the parsed fault when the body had one.
    #[error("HTTP {status}: {}", server_message(.error, .body))]
    Server {
        status: u16,
        error: Option<ErrorInfo>,
        body: String,
    },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    /// A request model could not be turned into JSON.
    #[error("encode: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response did not match the expected shape.
    #[error("decode: {0}")]
    Decode(String),
}

fn server_message(error: &Option<ErrorInfo>, body: &str) -> String {
    match error {
        Some(info) => format!("{}: {}", info.code, info.message),
        None => body.to_string(),
    }
}

impl ApiError {
    /// HTTP status, for `Server` errors only. A `Network` error never got a
    /// response to read one from.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Service error code (e.g. `EntityNotFoundError`), when a fault was returned.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            ApiError::Server {
                error: Some(info), ..
            } => Some(info.code.as_str()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Failure to build a [`ClientConfig`](crate::ClientConfig) or a dispatcher from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}
