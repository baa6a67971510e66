pub mod claims;
pub mod clock;
pub mod codec;
pub mod errors;
pub mod handler;
pub mod settings;

pub use claims::Access;
pub use claims::AccessClaims;
pub use claims::Claims;
pub use claims::Refresh;
pub use claims::RefreshClaims;
pub use claims::TokenKind;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use codec::TokenCodec;
pub use errors::SettingsError;
pub use errors::TokenError;
pub use handler::JwtHandler;
pub use settings::TokenSettings;
