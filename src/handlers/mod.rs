pub mod auth_handlers;
pub mod menu_handlers;
pub mod payment_handlers;

pub use auth_handlers::{login, register, send_otp, verify_otp};
pub use menu_handlers::list_menu;
pub use payment_handlers::process_payment;
