use std::fmt;
use std::marker::PhantomData;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Marker for the purpose a token was issued for.
pub trait TokenKind: fmt::Debug + Send + Sync + 'static {
    /// Human readable name, used in logs and error messages.
    const NAME: &'static str;
}

/// Short-lived token presented on every protected request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access;

impl TokenKind for Access {
    const NAME: &'static str = "access";
}

/// Long-lived token used only to mint new access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refresh;

impl TokenKind for Refresh {
    const NAME: &'static str = "refresh";
}

/// Token payload.
///
/// Serialized as `{"user_id": .., "iat": .., "exp": ..}`. The kind parameter
/// exists only at the type level so an access payload cannot be handed to code
/// expecting a refresh payload; on the wire the two are told apart by the key
/// that signed them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Claims<K: TokenKind> {
    /// Owning user identifier
    pub user_id: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    #[serde(skip)]
    kind: PhantomData<K>,
}

pub type AccessClaims = Claims<Access>;
pub type RefreshClaims = Claims<Refresh>;

impl<K: TokenKind> Claims<K> {
    /// Build claims for `user_id` valid from `now` for `lifetime`.
    ///
    /// Returns `None` when the expiration falls outside the representable range.
    pub fn issue(user_id: i64, now: DateTime<Utc>, lifetime: Duration) -> Option<Self> {
        let expiration = now.checked_add_signed(lifetime)?;

        Some(Self {
            user_id,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            kind: PhantomData,
        })
    }

    /// Check if the token is expired.
    ///
    /// A token is expired from the second named by `exp` onwards.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    pub fn kind(&self) -> &'static str {
        K::NAME
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_issue_sets_window() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        let claims = AccessClaims::issue(42, now, Duration::minutes(15)).unwrap();

        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 15 * 60);
        assert_eq!(claims.kind(), "access");
    }

    #[test]
    fn test_is_expired() {
        let now = Utc.timestamp_opt(1000, 0).unwrap();
        let claims = RefreshClaims::issue(1, now, Duration::seconds(100)).unwrap();

        assert!(!claims.is_expired(1099));
        assert!(claims.is_expired(1100)); // Exactly at expiration
        assert!(claims.is_expired(1101));
    }

    #[test]
    fn test_wire_shape() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let claims = AccessClaims::issue(7, now, Duration::minutes(15)).unwrap();

        let json = serde_json::to_value(claims).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "user_id": 7,
                "iat": 1_700_000_000,
                "exp": 1_700_000_900,
            })
        );

        let decoded: RefreshClaims = serde_json::from_value(json).unwrap();
        assert_eq!(decoded.user_id, 7);
        assert_eq!(decoded.kind(), "refresh");
    }

    #[test]
    fn test_issue_past_max_date() {
        let now = DateTime::<Utc>::MAX_UTC - Duration::days(1);

        assert!(AccessClaims::issue(1, now, Duration::hours(1)).is_some());
        assert!(RefreshClaims::issue(1, now, Duration::days(2)).is_none());
    }
}
