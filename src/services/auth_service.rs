use crate::models::user::{User, UserSummary};
use crate::repositories::otp_repository::OtpRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::RepositoryError;
use crate::services::email_service::{EmailError, EmailService};
use crate::services::token_service::{TokenError, TokenService};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString},
    Argon2, PasswordVerifier,
};
use rand::Rng;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("User already exists")]
    EmailTaken,
    #[error("User not found")]
    UserNotFound,
    #[error("OTP expired or invalid")]
    NoSuchCode,
    #[error("Invalid OTP")]
    InvalidCode,
    #[error("Name, email and password are required")]
    MissingFields,
    #[error("Password hashing failed: {0}")]
    HashingError(String),
    #[error("Email error: {0}")]
    Email(#[from] EmailError),
    #[error("Token error: {0}")]
    Token(#[from] TokenError),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// What a successful verification hands back: the bearer token plus the
/// summary the client shows in its account view.
#[derive(Debug)]
pub struct VerifiedSession {
    pub token: String,
    pub user: UserSummary,
}

/// Turns an email address into a verified session, gated by a time-limited
/// one-time code delivered out of band. Per address the code moves through
/// issued → consumed / expired / superseded; consumption and supersession
/// both leave no record behind.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    otp_codes: Arc<dyn OtpRepository>,
    email_service: Box<dyn EmailService>,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        otp_codes: Arc<dyn OtpRepository>,
        email_service: Box<dyn EmailService>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            users,
            otp_codes,
            email_service,
            token_service,
        }
    }

    /// Create the identity record. The password is hashed and stored but
    /// otherwise unused: login goes through the code flow, not the password.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, AuthServiceError> {
        if request.name.is_empty() || request.email.is_empty() || request.password.is_empty() {
            return Err(AuthServiceError::MissingFields);
        }

        let password_hash = hash_secret(&request.password)?;

        match self
            .users
            .create_user(&request.name, &request.email, &password_hash)
            .await
        {
            Ok(user) => Ok(user),
            Err(RepositoryError::AlreadyExists) => Err(AuthServiceError::EmailTaken),
            Err(e) => Err(AuthServiceError::Repository(e)),
        }
    }

    /// Issue a fresh 6-digit code for a registered address and hand the
    /// plaintext to the mailer. Any prior code for the address is superseded.
    /// The stored record is written before the send, so it can outlive a
    /// failed delivery.
    pub async fn request_code(&self, email: &str) -> Result<(), AuthServiceError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        let code = generate_code();
        let code_hash = hash_secret(&code)?;

        self.otp_codes.put(&user.email, &code_hash).await?;

        self.email_service
            .send_otp_email(&user.email, &user.name, &code)
            .await?;

        Ok(())
    }

    /// Check a submitted code against the live record for the address.
    /// A mismatch leaves the record in place; a match consumes it, so a code
    /// verifies at most once.
    pub async fn verify_code(
        &self,
        email: &str,
        code: &str,
    ) -> Result<VerifiedSession, AuthServiceError> {
        let record = self
            .otp_codes
            .find_live(email)
            .await?
            .ok_or(AuthServiceError::NoSuchCode)?;

        if !verify_secret(code, &record.code_hash) {
            return Err(AuthServiceError::InvalidCode);
        }

        // The user could have vanished between issuance and verification.
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        self.otp_codes.delete(email).await?;

        let token = self.token_service.issue(&user)?;

        Ok(VerifiedSession {
            token,
            user: UserSummary::from(&user),
        })
    }

    /// Existence probe kept from the password-era API: confirms the account
    /// and returns the display name, nothing more. Real authentication goes
    /// through `request_code` / `verify_code`.
    pub async fn login(&self, email: &str) -> Result<String, AuthServiceError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        Ok(user.name)
    }
}

/// 6 decimal digits, uniformly random, leading zeros allowed.
fn generate_code() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
}

fn hash_secret(value: &str) -> Result<String, AuthServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(value.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthServiceError::HashingError(e.to_string()))
}

/// Argon2's verifier compares digests in constant time, so code checks do
/// not leak match length through timing.
fn verify_secret(value: &str, hash: &str) -> bool {
    if let Ok(parsed_hash) = PasswordHash::new(hash) {
        Argon2::default()
            .verify_password(value.as_bytes(), &parsed_hash)
            .is_ok()
    } else {
        false
    }
}
