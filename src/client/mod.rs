//! The storefront's client side: a typed API client, the auth-flow state
//! machine, the cart, and the durable shell state the CLI binary drives.

pub mod api;
pub mod cart;
pub mod checkout;
pub mod flow;
pub mod state;

pub use api::ApiClient;
pub use cart::Cart;
pub use checkout::CardDetails;
pub use flow::{AuthFlow, AuthStage};
pub use state::{ClientState, StoredSession};
