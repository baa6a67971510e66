use serde::Serialize;

use crate::jwt::AccessClaims;
use crate::jwt::SettingsError;
use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::jwt::TokenSettings;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuing.
///
/// Owns no user data: callers look accounts up in their own store and pass the
/// stored hash and identifier in.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    /// Short-lived token for protected requests
    pub access_token: String,

    /// Long-lived token accepted only by the refresh flow
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator around an existing codec.
    pub fn new(token_codec: TokenCodec) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec,
        }
    }

    /// Create an authenticator with a wall-clock codec built from `settings`.
    ///
    /// # Errors
    /// * `SettingsError` - Secrets missing or shared, or lifetimes not positive
    pub fn from_settings(settings: &TokenSettings) -> Result<Self, SettingsError> {
        TokenCodec::new(settings).map(Self::new)
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `EmptyPassword` - Password is empty
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Account the hash belongs to
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be parsed
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: i64,
    ) -> Result<TokenPair, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token_pair(user_id)?)
    }

    /// Reject a login for an account that does not exist.
    ///
    /// Spends one Argon2 verification so the caller cannot tell this apart
    /// from a wrong password by timing, and returns the same error.
    pub fn reject_unknown_account(&self, password: &str) -> AuthenticationError {
        self.password_hasher.verify_dummy(password);
        AuthenticationError::InvalidCredentials
    }

    /// Issue a fresh access/refresh pair without password verification.
    ///
    /// Used right after registration, when the caller has just set the password.
    pub fn issue_token_pair(&self, user_id: i64) -> Result<TokenPair, TokenError> {
        let access_token = self.token_codec.issue_access(user_id)?;
        let refresh_token = self.token_codec.issue_refresh(user_id)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Mint a new access token from a refresh token.
    ///
    /// The refresh token is not rotated and the account is not looked up.
    ///
    /// # Errors
    /// * `TokenError` - Refresh token is invalid, expired or of the wrong kind
    pub fn refresh_access_token(&self, refresh_token: &str) -> Result<String, TokenError> {
        let claims = self.token_codec.parse_refresh(refresh_token)?;
        self.token_codec.issue_access(claims.user_id)
    }

    /// Validate an access token and return its claims.
    pub fn validate_access_token(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.token_codec.parse_access(token)
    }
}
