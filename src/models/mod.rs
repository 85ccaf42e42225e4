pub mod menu;
pub mod order;
pub mod otp;
pub mod user;

pub use menu::{MenuFilter, MenuItem};
pub use order::Order;
pub use otp::OtpRecord;
pub use user::{User, UserSummary};
