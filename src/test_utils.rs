#[cfg(test)]
pub mod test_utils {
    use crate::photo::MediaStorage;
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::http::{header::AUTHORIZATION, HeaderName, HeaderValue};
    use axum_test::TestServer;
    use migration::{Migrator, MigratorTrait};
    use model::entities::{account, auth_token};
    use sea_orm::{Database, DatabaseConnection};
    use std::path::Path;
    use tempfile::TempDir;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    pub const TEST_PASSWORD: &str = "correct horse";

    /// Running application backed by an in-memory database and a
    /// temporary media root. Both are discarded on drop.
    pub struct TestApp {
        pub server: TestServer,
        pub state: AppState,
        media_dir: TempDir,
        _tracing: tracing::subscriber::DefaultGuard,
    }

    impl TestApp {
        pub fn media_root(&self) -> &Path {
            self.media_dir.path()
        }

        /// Register a regular account and return its token key.
        pub async fn member_token(&self, email: &str) -> String {
            let account_model = account::create_account(
                &self.state.db,
                Some(email),
                Some(TEST_PASSWORD),
                account::AccountProfile::default(),
            )
            .await
            .expect("Failed to create member account");

            self.token_for(&account_model).await
        }

        /// Register a staff superuser and return its token key.
        pub async fn admin_token(&self, email: &str) -> String {
            let account_model =
                account::create_super_account(&self.state.db, Some(email), Some(TEST_PASSWORD))
                    .await
                    .expect("Failed to create admin account");

            self.token_for(&account_model).await
        }

        async fn token_for(&self, account_model: &account::Model) -> String {
            auth_token::issue(&self.state.db, account_model)
                .await
                .expect("Failed to issue token")
                .key
        }
    }

    /// `Authorization` header carrying a token key.
    pub fn token_header(key: &str) -> (HeaderName, HeaderValue) {
        let value = HeaderValue::from_str(&format!("Token {}", key)).expect("Invalid header value");
        (AUTHORIZATION, value)
    }

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Create AppState for testing
    pub async fn setup_test_app_state(media_root: &Path) -> AppState {
        let db = setup_test_db().await;
        AppState {
            db,
            media: MediaStorage::new(media_root),
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is taken from RUST_LOG, defaulting to WARN. The
    /// subscriber stays installed while the returned guard lives.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create the axum app and a test server for it
    pub async fn setup_test_app() -> TestApp {
        let tracing_guard = init_test_tracing();

        let media_dir = tempfile::tempdir().expect("Failed to create media root");
        let state = setup_test_app_state(media_dir.path()).await;
        let server = TestServer::new(create_router(state.clone())).expect("Failed to start test server");

        TestApp {
            server,
            state,
            media_dir,
            _tracing: tracing_guard,
        }
    }
}
