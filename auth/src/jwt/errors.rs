use thiserror::Error;

/// Error type for token issuing and parsing.
///
/// Display strings are safe to hand back to clients: they never include
/// key material or the token itself.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("token is expired")]
    Expired,

    #[error("signature is invalid")]
    InvalidSignature,

    #[error("unexpected signing algorithm")]
    InvalidAlgorithm,

    #[error("malformed token: {0}")]
    Malformed(String),
}

/// Error type for rejected token settings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{0} token secret must not be empty")]
    EmptySecret(&'static str),

    #[error("access and refresh tokens must use different secrets")]
    SharedSecret,

    #[error("{0} token lifetime must be positive")]
    NonPositiveLifetime(&'static str),

    #[error("{0} token lifetime is too long")]
    LifetimeTooLong(&'static str),
}
