use core_auth::AuthError;
use core_net::NetworkError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Core initialization failed: {0}")]
    InitializationFailed(#[from] core_runtime::Error),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

impl CoreError {
    /// A 401 from the server or a call refused locally for lack of a session.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            CoreError::Network(err) => err.is_unauthorized(),
            CoreError::Auth(err) => err.is_unauthorized(),
            CoreError::InitializationFailed(_) => false,
        }
    }

    /// The session is over and the user has to sign in again.
    pub fn requires_reauthentication(&self) -> bool {
        match self {
            CoreError::Network(err) => err.is_unauthorized(),
            CoreError::Auth(err) => err.requires_reauthentication(),
            CoreError::InitializationFailed(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_from_either_layer() {
        assert!(CoreError::from(NetworkError::Unauthorized).is_unauthorized());
        assert!(CoreError::from(AuthError::Network(NetworkError::Unauthorized)).is_unauthorized());
        assert!(!CoreError::from(AuthError::InvalidCredentials).is_unauthorized());
        assert!(CoreError::from(AuthError::InvalidCredentials).requires_reauthentication());
        assert!(!CoreError::from(NetworkError::Timeout).requires_reauthentication());
    }
}
