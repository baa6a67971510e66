use std::sync::Arc;

use chrono::Duration;

use super::claims::Access;
use super::claims::AccessClaims;
use super::claims::Claims;
use super::claims::Refresh;
use super::claims::RefreshClaims;
use super::claims::TokenKind;
use super::clock::Clock;
use super::clock::SystemClock;
use super::errors::SettingsError;
use super::errors::TokenError;
use super::handler::JwtHandler;
use super::settings::TokenSettings;

/// Issues and parses access and refresh tokens.
///
/// Each kind has its own secret and lifetime. Stateless apart from the fixed
/// keys, so one instance is shared by every request.
pub struct TokenCodec {
    access: JwtHandler,
    refresh: JwtHandler,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    /// Create a codec reading the wall clock.
    ///
    /// # Errors
    /// * `SettingsError` - Settings failed validation
    pub fn new(settings: &TokenSettings) -> Result<Self, SettingsError> {
        Self::with_clock(settings, Arc::new(SystemClock))
    }

    /// Create a codec reading time from `clock`.
    pub fn with_clock(
        settings: &TokenSettings,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;

        Ok(Self {
            access: JwtHandler::new(settings.access_secret.as_bytes()),
            refresh: JwtHandler::new(settings.refresh_secret.as_bytes()),
            access_lifetime: settings.access_lifetime,
            refresh_lifetime: settings.refresh_lifetime,
            clock,
        })
    }

    /// Issue an access token for `user_id`.
    pub fn issue_access(&self, user_id: i64) -> Result<String, TokenError> {
        self.issue::<Access>(&self.access, user_id, self.access_lifetime)
    }

    /// Issue a refresh token for `user_id`.
    pub fn issue_refresh(&self, user_id: i64) -> Result<String, TokenError> {
        self.issue::<Refresh>(&self.refresh, user_id, self.refresh_lifetime)
    }

    /// Parse and validate an access token.
    ///
    /// # Errors
    /// * `InvalidSignature` - Not signed with the access secret (includes refresh tokens)
    /// * `InvalidAlgorithm` - Header names an algorithm other than HS256
    /// * `Expired` - Current time is at or past `exp`
    /// * `Malformed` - Token could not be decoded
    pub fn parse_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.parse::<Access>(&self.access, token)
    }

    /// Parse and validate a refresh token.
    ///
    /// Same failure policy as [`parse_access`](Self::parse_access), under the
    /// refresh secret.
    pub fn parse_refresh(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        self.parse::<Refresh>(&self.refresh, token)
    }

    fn issue<K: TokenKind>(
        &self,
        handler: &JwtHandler,
        user_id: i64,
        lifetime: Duration,
    ) -> Result<String, TokenError> {
        let claims = Claims::<K>::issue(user_id, self.clock.now(), lifetime).ok_or_else(|| {
            TokenError::EncodingFailed(format!("{} token expiration out of range", K::NAME))
        })?;
        handler.encode(&claims)
    }

    fn parse<K: TokenKind>(
        &self,
        handler: &JwtHandler,
        token: &str,
    ) -> Result<Claims<K>, TokenError> {
        let claims: Claims<K> = handler.decode(token)?;

        if claims.is_expired(self.clock.now().timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
