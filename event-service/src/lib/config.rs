use std::env;
use std::fmt;

use auth::SettingsError;
use auth::TokenSettings;
use chrono::Duration;
use config::builder::ConfigBuilder;
use config::builder::DefaultState;
use config::Config as ConfigSource;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_http_port")]
    pub http_port: u16,
}

impl ServerConfig {
    fn default_http_port() -> u16 {
        3000
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: Self::default_http_port(),
        }
    }
}

/// Database settings. Without a URL the service keeps its data in memory.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "DatabaseConfig::default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseConfig {
    fn default_max_connections() -> u32 {
        5
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: Self::default_max_connections(),
        }
    }
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    #[serde(default = "JwtConfig::default_access_expiration_minutes")]
    pub access_expiration_minutes: i64,
    #[serde(default = "JwtConfig::default_refresh_expiration_days")]
    pub refresh_expiration_days: i64,
}

impl JwtConfig {
    fn default_access_expiration_minutes() -> i64 {
        TokenSettings::DEFAULT_ACCESS_LIFETIME_MINUTES
    }

    fn default_refresh_expiration_days() -> i64 {
        TokenSettings::DEFAULT_REFRESH_LIFETIME_DAYS
    }

    /// Token settings for the auth library.
    ///
    /// Only the lifetime conversion can fail here; `TokenCodec` construction
    /// applies the full validation.
    ///
    /// # Errors
    /// * `LifetimeTooLong` - A lifetime does not fit in a `Duration`
    pub fn token_settings(&self) -> Result<TokenSettings, SettingsError> {
        let access_lifetime = Duration::try_minutes(self.access_expiration_minutes)
            .ok_or(SettingsError::LifetimeTooLong("access"))?;
        let refresh_lifetime = Duration::try_days(self.refresh_expiration_days)
            .ok_or(SettingsError::LifetimeTooLong("refresh"))?;

        Ok(
            TokenSettings::new(self.access_secret.clone(), self.refresh_secret.clone())
                .with_access_lifetime(access_lifetime)
                .with_refresh_lifetime(refresh_lifetime),
        )
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("access_secret", &"<redacted>")
            .field("refresh_secret", &"<redacted>")
            .field("access_expiration_minutes", &self.access_expiration_minutes)
            .field("refresh_expiration_days", &self.refresh_expiration_days)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__ACCESS_SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// Fails when either token secret is missing.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let builder = ConfigSource::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__ACCESS_SECRET=... overrides jwt.access_secret
            .add_source(Environment::default().separator("__"));

        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn from_toml(source: &str) -> Result<Config, ConfigError> {
        Config::from_builder(
            ConfigSource::builder().add_source(File::from_str(source, FileFormat::Toml)),
        )
    }

    #[test]
    fn test_defaults_applied() {
        let config = from_toml(
            r#"
            [jwt]
            access_secret = "access"
            refresh_secret = "refresh"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.http_port, 3000);
        assert!(config.database.url.is_none());
        assert_eq!(config.jwt.access_expiration_minutes, 15);
        assert_eq!(config.jwt.refresh_expiration_days, 7);

        let settings = config.jwt.token_settings().unwrap();
        assert_eq!(settings.access_lifetime, Duration::minutes(15));
        assert_eq!(settings.refresh_lifetime, Duration::days(7));
    }

    #[test]
    fn test_missing_secret_fails() {
        let result = from_toml(
            r#"
            [jwt]
            access_secret = "access"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides() {
        let config = from_toml(
            r#"
            [server]
            http_port = 8080

            [database]
            url = "postgresql://localhost/events"

            [jwt]
            access_secret = "access"
            refresh_secret = "refresh"
            access_expiration_minutes = 5
            refresh_expiration_days = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.server.http_port, 8080);
        assert_eq!(
            config.database.url.as_deref(),
            Some("postgresql://localhost/events")
        );
        assert_eq!(
            config.jwt.token_settings().unwrap().access_lifetime,
            Duration::minutes(5)
        );
    }

    #[test]
    fn test_lifetime_out_of_range() {
        let config = from_toml(
            r#"
            [jwt]
            access_secret = "access"
            refresh_secret = "refresh"
            refresh_expiration_days = 9223372036854775807
            "#,
        )
        .unwrap();

        assert_eq!(
            config.jwt.token_settings().unwrap_err(),
            SettingsError::LifetimeTooLong("refresh")
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = from_toml(
            r#"
            [jwt]
            access_secret = "super-access"
            refresh_secret = "super-refresh"
            "#,
        )
        .unwrap();

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-access"));
        assert!(!rendered.contains("super-refresh"));
    }
}
