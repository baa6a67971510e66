use chrono::Duration;

use super::errors::SettingsError;

/// Secrets and lifetimes for both token kinds.
///
/// Built once at startup from service configuration and handed to
/// [`TokenCodec`](super::TokenCodec).
#[derive(Clone)]
pub struct TokenSettings {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_lifetime: Duration,
    pub refresh_lifetime: Duration,
}

impl TokenSettings {
    pub const DEFAULT_ACCESS_LIFETIME_MINUTES: i64 = 15;
    pub const DEFAULT_REFRESH_LIFETIME_DAYS: i64 = 7;
    pub const MAX_LIFETIME_DAYS: i64 = 3650;

    /// Settings with the default lifetimes (15 minutes / 7 days).
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_lifetime: Duration::minutes(Self::DEFAULT_ACCESS_LIFETIME_MINUTES),
            refresh_lifetime: Duration::days(Self::DEFAULT_REFRESH_LIFETIME_DAYS),
        }
    }

    pub fn with_access_lifetime(mut self, lifetime: Duration) -> Self {
        self.access_lifetime = lifetime;
        self
    }

    pub fn with_refresh_lifetime(mut self, lifetime: Duration) -> Self {
        self.refresh_lifetime = lifetime;
        self
    }

    /// Reject settings the codec must never run with.
    ///
    /// # Errors
    /// * `EmptySecret` - Either secret is empty
    /// * `SharedSecret` - Both kinds would be signed with the same key
    /// * `NonPositiveLifetime` - A lifetime is zero or negative
    /// * `LifetimeTooLong` - A lifetime exceeds [`MAX_LIFETIME_DAYS`](Self::MAX_LIFETIME_DAYS)
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.access_secret.is_empty() {
            return Err(SettingsError::EmptySecret("access"));
        }
        if self.refresh_secret.is_empty() {
            return Err(SettingsError::EmptySecret("refresh"));
        }
        if self.access_secret == self.refresh_secret {
            return Err(SettingsError::SharedSecret);
        }
        if self.access_lifetime <= Duration::zero() {
            return Err(SettingsError::NonPositiveLifetime("access"));
        }
        if self.refresh_lifetime <= Duration::zero() {
            return Err(SettingsError::NonPositiveLifetime("refresh"));
        }

        let max_lifetime = Duration::days(Self::MAX_LIFETIME_DAYS);
        if self.access_lifetime > max_lifetime {
            return Err(SettingsError::LifetimeTooLong("access"));
        }
        if self.refresh_lifetime > max_lifetime {
            return Err(SettingsError::LifetimeTooLong("refresh"));
        }
        Ok(())
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSettings")
            .field("access_secret", &"<redacted>")
            .field("refresh_secret", &"<redacted>")
            .field("access_lifetime", &self.access_lifetime)
            .field("refresh_lifetime", &self.refresh_lifetime)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = TokenSettings::new("a-secret", "r-secret");

        assert_eq!(settings.access_lifetime, Duration::minutes(15));
        assert_eq!(settings.refresh_lifetime, Duration::days(7));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_secrets() {
        assert_eq!(
            TokenSettings::new("", "r-secret").validate(),
            Err(SettingsError::EmptySecret("access"))
        );
        assert_eq!(
            TokenSettings::new("a-secret", "").validate(),
            Err(SettingsError::EmptySecret("refresh"))
        );
    }

    #[test]
    fn test_rejects_shared_secret() {
        assert_eq!(
            TokenSettings::new("same", "same").validate(),
            Err(SettingsError::SharedSecret)
        );
    }

    #[test]
    fn test_rejects_non_positive_lifetime() {
        let settings =
            TokenSettings::new("a-secret", "r-secret").with_access_lifetime(Duration::zero());
        assert_eq!(
            settings.validate(),
            Err(SettingsError::NonPositiveLifetime("access"))
        );
    }

    #[test]
    fn test_rejects_lifetime_past_bound() {
        let settings = TokenSettings::new("a-secret", "r-secret")
            .with_refresh_lifetime(Duration::days(200_000_000));
        assert_eq!(
            settings.validate(),
            Err(SettingsError::LifetimeTooLong("refresh"))
        );

        let settings = TokenSettings::new("a-secret", "r-secret")
            .with_access_lifetime(Duration::days(TokenSettings::MAX_LIFETIME_DAYS));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", TokenSettings::new("a-secret", "r-secret"));
        assert!(!rendered.contains("a-secret"));
        assert!(!rendered.contains("r-secret"));
    }
}
