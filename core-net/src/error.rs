use bridge_traits::BridgeError;
use bytes::Bytes;
use thiserror::Error;

/// Flat taxonomy of everything that can go wrong between building a request
/// and decoding its response.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("The URL provided was invalid: {0}")]
    InvalidUrl(String),

    #[error("The request failed: {0}")]
    RequestFailed(#[source] BridgeError),

    #[error("The server returned an invalid response.")]
    InvalidResponse,

    #[error("HTTP error with status code: {status}")]
    HttpError { status: u16, body: Option<Bytes> },

    #[error("Failed to decode response: {0}")]
    DecodingFailed(#[source] serde_json::Error),

    #[error("Failed to encode request body: {0}")]
    EncodingFailed(#[source] serde_json::Error),

    #[error("Authentication required. Please log in and try again.")]
    Unauthorized,

    #[error("No internet connection available.")]
    NoInternetConnection,

    #[error("The request timed out.")]
    Timeout,

    #[error("An unknown error occurred: {0}")]
    Unknown(String),
}

impl NetworkError {
    /// True for a 401 response or a call refused locally for lack of a session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, NetworkError::Unauthorized)
    }

    /// Status code carried by an HTTP error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            NetworkError::HttpError { status, .. } => Some(*status),
            NetworkError::Unauthorized => Some(401),
            _ => None,
        }
    }
}

impl From<BridgeError> for NetworkError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::NotConnected(_) => NetworkError::NoInternetConnection,
            BridgeError::TimedOut => NetworkError::Timeout,
            BridgeError::NotAvailable(reason) => NetworkError::Unknown(reason),
            other => NetworkError::RequestFailed(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, NetworkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridge_error_classification() {
        assert!(matches!(
            NetworkError::from(BridgeError::NotConnected("offline".into())),
            NetworkError::NoInternetConnection
        ));
        assert!(matches!(
            NetworkError::from(BridgeError::TimedOut),
            NetworkError::Timeout
        ));
        assert!(matches!(
            NetworkError::from(BridgeError::OperationFailed("reset".into())),
            NetworkError::RequestFailed(_)
        ));
        assert!(matches!(
            NetworkError::from(BridgeError::NotAvailable("no client".into())),
            NetworkError::Unknown(_)
        ));
    }

    #[test]
    fn test_status_code() {
        let err = NetworkError::HttpError {
            status: 503,
            body: None,
        };
        assert_eq!(err.status_code(), Some(503));
        assert_eq!(err.to_string(), "HTTP error with status code: 503");
        assert_eq!(NetworkError::Unauthorized.status_code(), Some(401));
        assert!(NetworkError::Unauthorized.is_unauthorized());
        assert_eq!(NetworkError::Timeout.status_code(), None);
    }
}
