pub mod test_helpers {
    use crate::repositories::{
        menu_repository::SqliteMenuRepository, order_repository::SqliteOrderRepository,
        otp_repository::SqliteOtpRepository, user_repository::SqliteUserRepository,
    };
    use crate::services::email_service::{EmailError, EmailService};
    use crate::services::{AuthService, CatalogService, PaymentService, TokenService};
    use crate::AppState;
    use async_trait::async_trait;
    use chrono::{DateTime, SecondsFormat, Utc};
    use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
    use std::sync::{Arc, Mutex};

    /// Create a new in-memory SQLite database for testing
    pub async fn create_test_db() -> Result<SqlitePool, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(pool)
    }

    /// Insert a test user with a hashed password, returning its id
    pub async fn insert_test_user(
        pool: &SqlitePool,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<i64, sqlx::Error> {
        let password_hash = hash_for_tests(password)?;

        let result =
            sqlx::query("INSERT INTO users (name, email, password_hash) VALUES (?, ?, ?)")
                .bind(name)
                .bind(email)
                .bind(password_hash)
                .execute(pool)
                .await?;

        Ok(result.last_insert_rowid())
    }

    /// Insert an OTP record directly with a chosen issue time, bypassing the
    /// service. Useful for exercising expiry without waiting out the TTL.
    pub async fn insert_otp_code(
        pool: &SqlitePool,
        email: &str,
        code: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        let code_hash = hash_for_tests(code)?;

        sqlx::query(
            r#"
            INSERT INTO otp_codes (email, code_hash, created_at)
            VALUES (?, ?, ?)
            ON CONFLICT(email) DO UPDATE SET
                code_hash = excluded.code_hash,
                created_at = excluded.created_at
            "#,
        )
        .bind(email)
        .bind(code_hash)
        .bind(issued_at.to_rfc3339_opts(SecondsFormat::Micros, true))
        .execute(pool)
        .await?;

        Ok(())
    }

    fn hash_for_tests(value: &str) -> Result<String, sqlx::Error> {
        use argon2::{
            password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
            Argon2,
        };

        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(value.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| sqlx::Error::Configuration(format!("Hashing failed: {}", e).into()))
    }

    #[derive(Debug, Clone)]
    pub struct SentOtp {
        pub to: String,
        pub name: String,
        pub code: String,
    }

    /// Email sender for tests: records every delivery so tests can read the
    /// plaintext code back out, and can be configured to fail the send after
    /// recording it.
    #[derive(Clone, Default)]
    pub struct RecordingEmailService {
        fail_sends: bool,
        sent: Arc<Mutex<Vec<SentOtp>>>,
    }

    impl RecordingEmailService {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing() -> Self {
            Self {
                fail_sends: true,
                sent: Arc::default(),
            }
        }

        pub fn sent(&self) -> Vec<SentOtp> {
            self.sent.lock().unwrap().clone()
        }

        pub fn last_code(&self) -> Option<String> {
            self.sent.lock().unwrap().last().map(|s| s.code.clone())
        }
    }

    #[async_trait]
    impl EmailService for RecordingEmailService {
        async fn send_otp_email(
            &self,
            to_email: &str,
            name: &str,
            code: &str,
        ) -> Result<(), EmailError> {
            self.sent.lock().unwrap().push(SentOtp {
                to: to_email.to_string(),
                name: name.to_string(),
                code: code.to_string(),
            });

            if self.fail_sends {
                return Err(EmailError::SendFailed(
                    "recording sender configured to fail".to_string(),
                ));
            }

            Ok(())
        }
    }

    /// Wire up the full application state over a test pool, with the given
    /// email sender and token secret.
    pub fn build_app_state(
        pool: &SqlitePool,
        email: RecordingEmailService,
        jwt_secret: &str,
    ) -> AppState {
        let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
        let otp_repository = Arc::new(SqliteOtpRepository::new(pool.clone()));
        let menu_repository = Arc::new(SqliteMenuRepository::new(pool.clone()));
        let order_repository = Arc::new(SqliteOrderRepository::new(pool.clone()));

        let token_service = Arc::new(TokenService::new(jwt_secret));
        let auth_service = Arc::new(AuthService::new(
            user_repository,
            otp_repository,
            Box::new(email),
            token_service.clone(),
        ));
        let catalog_service = Arc::new(CatalogService::new(menu_repository));
        let payment_service = Arc::new(PaymentService::new(order_repository));

        AppState {
            auth_service,
            catalog_service,
            payment_service,
            token_service,
        }
    }
}
