#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use auth::ManualClock;
use auth::TokenCodec;
use auth::TokenSettings;
use chrono::Utc;
use event_service::domain::event::service::EventService;
use event_service::domain::user::service::UserService;
use event_service::inbound::http::router::create_router;
use event_service::outbound::repositories::InMemoryEventRepository;
use event_service::outbound::repositories::InMemoryUserRepository;
use serde_json::json;
use serde_json::Value;

pub const ACCESS_SECRET: &str = "test-access-secret-for-jwt-signing";
pub const REFRESH_SECRET: &str = "test-refresh-secret-for-jwt-signing";

/// Test application that spawns a real server backed by in-memory stores
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub users: Arc<InMemoryUserRepository>,
    pub authenticator: Arc<Authenticator>,
    pub clock: Arc<ManualClock>,
}

pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        Self::spawn_with_clock(clock).await
    }

    /// Spawn with a clock the test controls, to exercise token expiry
    pub async fn spawn_with_clock(clock: Arc<ManualClock>) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let settings = TokenSettings::new(ACCESS_SECRET, REFRESH_SECRET);
        let codec = TokenCodec::with_clock(&settings, clock.clone())
            .expect("Failed to build token codec");
        let authenticator = Arc::new(Authenticator::new(codec));

        let users = Arc::new(InMemoryUserRepository::new());
        let user_service = Arc::new(UserService::new(users.clone(), authenticator.clone()));
        let event_service = Arc::new(EventService::new(Arc::new(InMemoryEventRepository::new())));

        let router = create_router(user_service, event_service, authenticator.clone());

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            users,
            authenticator,
            clock,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register an account and return its tokens
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Session {
        let response = self
            .post("/auth/register")
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        Session {
            access_token: body["access_token"].as_str().unwrap().to_string(),
            refresh_token: body["refresh_token"].as_str().unwrap().to_string(),
        }
    }
}
