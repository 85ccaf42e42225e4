pub mod menu_repository;
pub mod order_repository;
pub mod otp_repository;
pub mod user_repository;

pub use menu_repository::MenuRepository;
pub use order_repository::OrderRepository;
pub use otp_repository::OtpRepository;
pub use user_repository::UserRepository;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Record not found")]
    NotFound,
    #[error("Record already exists")]
    AlreadyExists,
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
