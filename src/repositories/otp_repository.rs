use crate::models::otp::OtpRecord;
use crate::repositories::RepositoryResult;
use async_trait::async_trait;
use chrono::{Duration, SecondsFormat, Utc};
use sqlx::SqlitePool;

/// Codes are valid for 5 minutes from issuance, absolute.
pub const CODE_TTL_MINUTES: i64 = 5;

/// Store for one-time codes. The store owns expiry enforcement: a record
/// older than the TTL is invisible to `find_live`, whether or not the row
/// still physically exists.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait OtpRepository: Send + Sync {
    /// Store a fresh code hash for the address, replacing any existing one.
    async fn put(&self, email: &str, code_hash: &str) -> RepositoryResult<()>;
    /// The live (unexpired) record for the address, if any.
    async fn find_live(&self, email: &str) -> RepositoryResult<Option<OtpRecord>>;
    /// Remove the record for the address. Removing a missing record is not
    /// an error.
    async fn delete(&self, email: &str) -> RepositoryResult<()>;
}

pub struct SqliteOtpRepository {
    pool: SqlitePool,
}

impl SqliteOtpRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn now_string() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    fn cutoff_string() -> String {
        (Utc::now() - Duration::minutes(CODE_TTL_MINUTES))
            .to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

#[async_trait]
impl OtpRepository for SqliteOtpRepository {
    async fn put(&self, email: &str, code_hash: &str) -> RepositoryResult<()> {
        // Single-statement upsert: the address is the primary key, so two
        // concurrent requests cannot leave two live rows behind.
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
        .bind(Self::now_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_live(&self, email: &str) -> RepositoryResult<Option<OtpRecord>> {
        let cutoff = Self::cutoff_string();

        // Expired rows are garbage-collected on the way past. Callers never
        // observe an expired record either way.
        sqlx::query("DELETE FROM otp_codes WHERE created_at <= ?")
            .bind(&cutoff)
            .execute(&self.pool)
            .await?;

        let record = sqlx::query_as::<_, OtpRecord>(
            "SELECT email, code_hash, created_at FROM otp_codes WHERE email = ? AND created_at > ?",
        )
        .bind(email)
        .bind(&cutoff)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn delete(&self, email: &str) -> RepositoryResult<()> {
        sqlx::query("DELETE FROM otp_codes WHERE email = ?")
            .bind(email)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
