use bridge_traits::StorageError;
use core_net::NetworkError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("No refresh token available. Please log in again.")]
    NoRefreshToken,

    #[error("Failed to refresh authentication token. Please log in again.")]
    RefreshFailed,

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// A 401 from the server or a call refused for lack of a session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AuthError::Network(err) if err.is_unauthorized())
    }

    /// The session is over and the user has to sign in again.
    pub fn requires_reauthentication(&self) -> bool {
        self.is_unauthorized()
            || matches!(
                self,
                AuthError::NoRefreshToken | AuthError::RefreshFailed | AuthError::InvalidCredentials
            )
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reauthentication_kinds() {
        assert!(AuthError::NoRefreshToken.requires_reauthentication());
        assert!(AuthError::RefreshFailed.requires_reauthentication());
        assert!(AuthError::InvalidCredentials.requires_reauthentication());
        assert!(AuthError::from(NetworkError::Unauthorized).requires_reauthentication());

        assert!(!AuthError::from(NetworkError::Timeout).requires_reauthentication());
        assert!(!AuthError::from(StorageError::Backend("locked".into())).requires_reauthentication());
    }

    #[test]
    fn test_network_errors_stay_transparent() {
        let err = AuthError::from(NetworkError::NoInternetConnection);
        assert_eq!(err.to_string(), NetworkError::NoInternetConnection.to_string());
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AuthError::NoRefreshToken.to_string(),
            "No refresh token available. Please log in again."
        );
        assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid email or password.");
    }
}
