pub mod client;
pub mod error;
pub mod types;

pub use client::StripeClient;
pub use error::StripeError;
