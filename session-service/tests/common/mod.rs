use std::sync::Arc;

use auth::Authenticator;
use auth::InMemoryRevocationStore;
use auth::PasswordHasher;
use auth::TokenCodec;
use serde_json::json;
use session_service::domain::session::service::SessionService;
use session_service::domain::user::service::UserService;
use session_service::inbound::http::router::create_router;
use session_service::outbound::repositories::InMemoryUserRepository;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub revocations: Arc<InMemoryRevocationStore>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with_ttl(chrono::Duration::hours(24)).await
    }

    /// Spawn the application issuing tokens with the given time-to-live
    pub async fn spawn_with_ttl(ttl: chrono::Duration) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        // Cheap Argon2 parameters keep the suite fast
        let password_hasher =
            PasswordHasher::with_cost(1024, 1, 1).expect("Failed to build password hasher");
        let codec = TokenCodec::new(JWT_SECRET, ttl).expect("Failed to build token codec");
        let revocations = Arc::new(InMemoryRevocationStore::new());
        let authenticator = Arc::new(
            Authenticator::new(password_hasher.clone(), codec, Arc::clone(&revocations))
                .expect("Failed to build authenticator"),
        );

        let user_repo = Arc::new(InMemoryUserRepository::new());
        let user_service = Arc::new(UserService::new(Arc::clone(&user_repo), password_hasher));
        let session_service = Arc::new(SessionService::new(user_repo, authenticator));

        let router = create_router(user_service, session_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
            revocations,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Register a user and return the response body
    pub async fn register(&self, username: &str, email: &str, password: &str) -> serde_json::Value {
        let response = self
            .post("/api/users")
            .json(&json!({
                "username": username,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the raw response
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in with valid credentials and return the session token
    pub async fn login_token(&self, email: &str, password: &str) -> String {
        let response = self.login(email, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Token missing from login response")
            .to_string()
    }
}
