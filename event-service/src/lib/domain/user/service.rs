use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::TokenError;
use auth::TokenPair;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

/// Domain service implementation for registration, login and refresh.
///
/// Argon2 work runs on the blocking pool.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password and token coordinator built from startup configuration
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(UserError::from)
    }

    async fn verify_credentials(&self, user: &User, password: String) -> Result<TokenPair, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let stored_hash = user.password_hash.clone();
        let user_id = user.id.0;

        tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, user_id)
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
            AuthenticationError::PasswordError(err) => UserError::Password(err),
            AuthenticationError::TokenError(err) => UserError::TokenIssuing(err.to_string()),
        })
    }

    async fn reject_unknown_account(&self, password: String) -> UserError {
        let authenticator = Arc::clone(&self.authenticator);

        match tokio::task::spawn_blocking(move || authenticator.reject_unknown_account(&password))
            .await
        {
            Ok(_) => UserError::InvalidCredentials,
            Err(e) => UserError::Unknown(format!("Password verification task failed: {}", e)),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<TokenPair, UserError> {
        let password_hash = self
            .hash_password(command.password.expose().to_string())
            .await?;

        let user = self
            .repository
            .create(NewUser {
                name: command.name,
                email: command.email,
                password_hash,
            })
            .await?;

        match self.authenticator.issue_token_pair(user.id.0) {
            Ok(pair) => {
                tracing::info!(user_id = %user.id, "User registered");
                Ok(pair)
            }
            Err(e) => {
                tracing::error!(
                    user_id = %user.id,
                    error = %e,
                    "Token issuing failed after registration, removing user"
                );
                if let Err(rollback) = self.repository.delete(&user.id).await {
                    tracing::error!(
                        user_id = %user.id,
                        error = %rollback,
                        "Failed to remove user after aborted registration"
                    );
                }
                Err(UserError::TokenIssuing(e.to_string()))
            }
        }
    }

    async fn login(&self, command: LoginCommand) -> Result<TokenPair, UserError> {
        let Some(user) = self.repository.find_by_email(&command.email).await? else {
            tracing::warn!("Login rejected: invalid credentials");
            return Err(self.reject_unknown_account(command.password).await);
        };

        let pair = self
            .verify_credentials(&user, command.password)
            .await
            .inspect_err(|e| {
                if matches!(e, UserError::InvalidCredentials) {
                    tracing::warn!("Login rejected: invalid credentials");
                }
            })?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(pair)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, UserError> {
        self.authenticator
            .refresh_access_token(refresh_token)
            .map_err(|e| match e {
                TokenError::EncodingFailed(msg) => UserError::TokenIssuing(msg),
                other => {
                    tracing::warn!(error = %other, "Refresh token rejected");
                    UserError::InvalidToken(other)
                }
            })
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use auth::ManualClock;
    use auth::TokenCodec;
    use auth::TokenSettings;
    use chrono::DateTime;
    use chrono::Duration;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Password;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: NewUser) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
        }
    }

    fn test_authenticator() -> Arc<Authenticator> {
        let settings = TokenSettings::new(
            "test_access_secret_at_least_32_bytes!",
            "test_refresh_secret_at_least_32_bytes",
        );
        Arc::new(Authenticator::new(TokenCodec::new(&settings).unwrap()))
    }

    fn stored_user(id: i64, authenticator: &Authenticator, password: &str) -> User {
        User {
            id: UserId(id),
            name: "Ana".to_string(),
            email: EmailAddress::new("ana@x.com".to_string()).unwrap(),
            password_hash: authenticator.hash_password(password).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn register_command(email: &str) -> RegisterCommand {
        RegisterCommand::new(
            "Ana".to_string(),
            EmailAddress::new(email.to_string()).unwrap(),
            Password::new("secret1".to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .withf(|user| {
                user.name == "Ana"
                    && user.email.as_str() == "ana@x.com"
                    && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|user| {
                Ok(User {
                    id: UserId(1),
                    name: user.name,
                    email: user.email,
                    password_hash: user.password_hash,
                    created_at: Utc::now(),
                })
            });
        repository.expect_delete().times(0);

        let authenticator = test_authenticator();
        let service = UserService::new(Arc::new(repository), Arc::clone(&authenticator));

        let pair = service
            .register(register_command("ana@x.com"))
            .await
            .expect("Registration failed");

        assert!(!pair.access_token.is_empty());
        assert!(!pair.refresh_token.is_empty());
        let claims = authenticator
            .validate_access_token(&pair.access_token)
            .unwrap();
        assert_eq!(claims.user_id, 1);
    }

    #[tokio::test]
    async fn test_register_rolls_back_when_tokens_cannot_be_issued() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_create().times(1).returning(|user| {
            Ok(User {
                id: UserId(5),
                name: user.name,
                email: user.email,
                password_hash: user.password_hash,
                created_at: Utc::now(),
            })
        });
        repository
            .expect_delete()
            .withf(|id| *id == UserId(5))
            .times(1)
            .returning(|_| Ok(()));

        // Refresh expiration lands past the last representable instant
        let clock = Arc::new(ManualClock::new(DateTime::<Utc>::MAX_UTC - Duration::days(1)));
        let settings = TokenSettings::new(
            "test_access_secret_at_least_32_bytes!",
            "test_refresh_secret_at_least_32_bytes",
        );
        let authenticator = Authenticator::new(TokenCodec::with_clock(&settings, clock).unwrap());
        let service = UserService::new(Arc::new(repository), Arc::new(authenticator));

        let result = service.register(register_command("ana@x.com")).await;
        assert!(matches!(result.unwrap_err(), UserError::TokenIssuing(_)));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_create().times(1).returning(|user| {
            Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ))
        });

        let service = UserService::new(Arc::new(repository), test_authenticator());

        let result = service.register(register_command("ana@x.com")).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_login_success() {
        let authenticator = test_authenticator();
        let user = stored_user(5, &authenticator, "secret1");

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .withf(|email| email == "ana@x.com")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(Arc::new(repository), Arc::clone(&authenticator));

        let pair = service
            .login(LoginCommand {
                email: "ana@x.com".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .expect("Login failed");

        let claims = authenticator
            .validate_access_token(&pair.access_token)
            .unwrap();
        assert_eq!(claims.user_id, 5);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let authenticator = test_authenticator();
        let user = stored_user(5, &authenticator, "secret1");

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .returning(move |email| {
                if email == "ana@x.com" {
                    Ok(Some(user.clone()))
                } else {
                    Ok(None)
                }
            });

        let service = UserService::new(Arc::new(repository), authenticator);

        let wrong_password = service
            .login(LoginCommand {
                email: "ana@x.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();
        let unknown_email = service
            .login(LoginCommand {
                email: "nobody@x.com".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, UserError::InvalidCredentials));
        assert!(matches!(unknown_email, UserError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_refresh_success() {
        let authenticator = test_authenticator();
        let pair = authenticator.issue_token_pair(8).unwrap();

        // No repository lookups on refresh
        let repository = MockTestUserRepository::new();
        let service = UserService::new(Arc::new(repository), Arc::clone(&authenticator));

        let access_token = service.refresh(&pair.refresh_token).await.unwrap();

        let claims = authenticator.validate_access_token(&access_token).unwrap();
        assert_eq!(claims.user_id, 8);
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let authenticator = test_authenticator();
        let pair = authenticator.issue_token_pair(8).unwrap();

        let service = UserService::new(
            Arc::new(MockTestUserRepository::new()),
            Arc::clone(&authenticator),
        );

        let result = service.refresh(&pair.access_token).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::InvalidToken(TokenError::InvalidSignature)
        ));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), test_authenticator());

        let result = service.get_user(&UserId(404)).await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }
}
