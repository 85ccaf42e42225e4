pub mod auth_service;
pub mod catalog_service;
pub mod email_service;
pub mod payment_service;
pub mod token_service;

pub use auth_service::AuthService;
pub use catalog_service::CatalogService;
pub use email_service::{create_email_service, EmailService};
pub use payment_service::PaymentService;
pub use token_service::TokenService;
