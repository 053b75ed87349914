// Not every test binary uses every helper
#![allow(dead_code)]

use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use skillhub::config::Config;
use skillhub::state::AppState;
use skillhub::{app, db};

/// A running server on an ephemeral port, backed by a throwaway database.
pub struct TestServer {
    pub base_url: String,
    pub client: Client,
    _data_dir: TempDir,
}

impl TestServer {
    pub async fn start() -> Self {
        let data_dir = TempDir::new().unwrap();
        let pool = db::create_pool(&data_dir.path().join("test.db"), 4)
            .expect("Failed to create test database");
        db::run_migrations(&pool).expect("Failed to run migrations");

        let mut config = Config::default();
        config.auth.bcrypt_cost = 4;
        let router = app::build_router(AppState::new(pool, &config));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            client: Client::new(),
            _data_dir: data_dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Register a user and return its JSON representation.
    pub async fn register(&self, name: &str, email: &str, profile_image: &str) -> Value {
        let response = self
            .client
            .post(self.url("/users/register"))
            .json(&json!({
                "name": name,
                "firstName": name,
                "lastName": "Tester",
                "email": email,
                "password": "hunter22",
                "profileImage": profile_image,
                "mobileNumber": "0700000000"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);
        response.json().await.unwrap()
    }
}
