use sqlx::FromRow;

/// A stored one-time code: the argon2 hash of a 6-digit code plus its issue
/// time. The plaintext code only ever exists in the outbound email.
#[derive(Debug, Clone, FromRow)]
pub struct OtpRecord {
    pub email: String,
    pub code_hash: String,
    pub created_at: String,
}
