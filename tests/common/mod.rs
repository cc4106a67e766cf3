use blog_auth_server::app::{app, SESSION_COOKIE_NAME};
use blog_auth_server::config::Config;
use blog_auth_server::db;
use blog_auth_server::state::AppState;
use reqwest::header::{LOCATION, SET_COOKIE};
use reqwest::{redirect, Response};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower_sessions_sqlx_store::SqliteStore;

/// Test application that spawns a real server on a random port
pub struct TestApp {
    pub address: String,
    pub db: SqlitePool,
    /// Keeps cookies between requests and never follows redirects, so tests
    /// can assert on where a response points.
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // One connection that is never recycled: each new connection to
        // `sqlite::memory:` would open an empty database.
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");
        db::migrate(&db).await.expect("Failed to create users table");

        let session_store = SqliteStore::new(db.clone());
        session_store
            .migrate()
            .await
            .expect("Failed to create session table");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let config = Config {
            host: "127.0.0.1".to_string(),
            port,
            database_url: "sqlite::memory:".to_string(),
            secret_key: None,
            session_ttl_hours: 1,
            secure_cookies: false,
        };

        let router = app(AppState::with_pool(db.clone()), session_store, &config)
            .expect("Failed to build router");

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server failed");
        });

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .build()
            .expect("Failed to build client");

        TestApp {
            address,
            db,
            client,
        }
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_form(&self, path: &str, username: &str, password: &str) -> Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn register(&self, username: &str, password: &str) -> Response {
        self.post_form("/auth/register", username, password).await
    }

    pub async fn login(&self, username: &str, password: &str) -> Response {
        self.post_form("/auth/login", username, password).await
    }

    pub async fn logout(&self) -> Response {
        self.get("/auth/logout").await
    }

    pub async fn session_info(&self) -> serde_json::Value {
        self.get("/auth/session")
            .await
            .json()
            .await
            .expect("Failed to parse session info")
    }

    pub async fn user_count(&self) -> i64 {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.db)
            .await
            .expect("Failed to count users");
        count
    }
}

/// The `Location` header of a redirect response
pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(LOCATION)
        .expect("Response has no Location header")
        .to_str()
        .expect("Location header is not valid UTF-8")
}

/// The `name=value` pair of the session cookie set by a response, if any
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .find(|pair| pair.starts_with(&format!("{}=", SESSION_COOKIE_NAME)))
        .map(str::to_string)
}
