pub mod bearer;

pub use bearer::require_session;
