use std::fmt;

/// Fallback used when the backend sends an error status without a usable message.
pub const UNKNOWN_SERVER_ERROR: &str = "Unknown server error";

/// Errors that can occur while talking to the InLaw backend.
/// Every variant is terminal for the request that produced it; nothing is retried.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request did not complete within the client timeout.
    Timeout,
    /// No response at all (connection refused, DNS failure, backend down).
    Network { base_url: String },
    /// The backend answered with a non-2xx status.
    Server { status: u16, message: String },
    /// 2xx response without a usable `answer` field.
    MalformedResponse,
    /// Any other transport or serialization failure.
    Request(String),
}

impl ApiError {
    /// Pulls the human-readable message out of an error body.
    ///
    /// The backend uses `detail`; other proxies in front of it use `message`.
    pub fn server(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                ["detail", "message"].iter().find_map(|key| {
                    value
                        .get(*key)
                        .and_then(|v| v.as_str())
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                })
            })
            .unwrap_or_else(|| UNKNOWN_SERVER_ERROR.to_string());
        ApiError::Server { status, message }
    }

    /// Classifies a reqwest failure that happened before a status was received.
    pub fn from_transport(err: &reqwest::Error, base_url: &str) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            ApiError::Network {
                base_url: base_url.to_string(),
            }
        } else {
            ApiError::Request(err.to_string())
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Timeout => {
                write!(f, "Request timeout - the server took too long to respond")
            }
            ApiError::Network { base_url } => write!(
                f,
                "Network error - cannot connect to the backend server. \
                 Please ensure the backend is running on {base_url}"
            ),
            ApiError::Server { status: 400, message } => write!(f, "Bad Request: {message}"),
            ApiError::Server { status: 404, .. } => write!(
                f,
                "API endpoint not found - please check if the backend server is running"
            ),
            ApiError::Server { status: 500, message } => write!(f, "Server Error: {message}"),
            ApiError::Server { status, message } => write!(f, "HTTP {status}: {message}"),
            ApiError::MalformedResponse => {
                write!(f, "Invalid response format - missing answer")
            }
            ApiError::Request(msg) => write!(f, "Request failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
