//! Authentication utilities library
//!
//! Provides the credential and session-token building blocks:
//! - Password hashing (Argon2id)
//! - Access and refresh token issuing and validation (HS256 JWT, one secret per kind)
//! - Authentication coordination (login, registration token pair, refresh)
//!
//! The library never touches user storage; services look accounts up and pass
//! the stored hash and identifier in.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenCodec, TokenSettings};
//!
//! let settings = TokenSettings::new(
//!     "access_secret_at_least_32_bytes_long!",
//!     "refresh_secret_at_least_32_bytes_long",
//! );
//! let codec = TokenCodec::new(&settings).unwrap();
//!
//! let access = codec.issue_access(42).unwrap();
//! assert_eq!(codec.parse_access(&access).unwrap().user_id, 42);
//!
//! // A refresh token is never accepted where an access token is expected
//! let refresh = codec.issue_refresh(42).unwrap();
//! assert!(codec.parse_access(&refresh).is_err());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, TokenSettings};
//!
//! let settings = TokenSettings::new(
//!     "access_secret_at_least_32_bytes_long!",
//!     "refresh_secret_at_least_32_bytes_long",
//! );
//! let auth = Authenticator::from_settings(&settings).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue a token pair
//! let pair = auth.authenticate("password123", &hash, 1).unwrap();
//!
//! // Refresh: mint a new access token
//! let access_token = auth.refresh_access_token(&pair.refresh_token).unwrap();
//! let claims = auth.validate_access_token(&access_token).unwrap();
//! assert_eq!(claims.user_id, 1);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use jwt::AccessClaims;
pub use jwt::Clock;
pub use jwt::ManualClock;
pub use jwt::RefreshClaims;
pub use jwt::SettingsError;
pub use jwt::SystemClock;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use jwt::TokenSettings;
pub use password::PasswordError;
pub use password::PasswordHasher;
