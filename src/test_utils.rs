#[cfg(test)]
pub mod test_utils {
    use crate::config::{AppState, Settings};
    use crate::routes::app_router;
    use axum::http::StatusCode;
    use axum::Router;
    use axum_test::TestServer;
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use sqlx::SqlitePool;
    use std::str::FromStr;

    /// Settings for tests: fixed secret, cheap bcrypt cost.
    pub fn test_settings() -> Settings {
        Settings {
            database_url: "sqlite::memory:".to_string(),
            session_secret: "test-session-secret".to_string(),
            bind_address: "127.0.0.1:0".to_string(),
            session_ttl_hours: 1,
            bcrypt_cost: 4,
            cookie_secure: false,
        }
    }

    /// Create an in-memory SQLite database for testing.
    ///
    /// A single connection that never expires: each new connection to
    /// `sqlite::memory:` would see an empty database.
    pub async fn setup_test_db() -> SqlitePool {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("Invalid SQLite URL")
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .expect("Failed to connect to in-memory database");

        sqlx::migrate!()
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    /// Create AppState for testing
    pub async fn setup_test_app_state() -> AppState {
        AppState::from_pool(setup_test_db().await, test_settings())
    }

    /// Create axum app for testing
    pub async fn setup_test_app() -> Router {
        app_router(setup_test_app_state().await)
    }

    /// Test server that keeps cookies between requests, like a browser.
    pub async fn setup_test_server() -> TestServer {
        let mut server = TestServer::new(setup_test_app().await).expect("Failed to build test server");
        server.save_cookies();
        server
    }

    /// Registers an account through the public form.
    pub async fn register(server: &TestServer, username: &str, user_type: &str, branch: &str) {
        server
            .post("/register")
            .form(&[
                ("username", username),
                ("password1", "s3cret-pass!"),
                ("password2", "s3cret-pass!"),
                ("user_type", user_type),
                ("branch_type", branch),
            ])
            .await
            .assert_status(StatusCode::SEE_OTHER);
    }

    /// Logs in; the session cookie stays in the server's cookie jar.
    pub async fn login(server: &TestServer, username: &str) {
        server
            .post("/my-login")
            .form(&[("username", username), ("password", "s3cret-pass!")])
            .await
            .assert_status(StatusCode::SEE_OTHER);
    }

    /// Register + login in one go.
    pub async fn sign_in(server: &TestServer, username: &str, user_type: &str, branch: &str) {
        register(server, username, user_type, branch).await;
        login(server, username).await;
    }
}
