//! Credential flows built on top of the [`Client`](crate::Client) executor.

pub mod consumer_key;
pub mod credential;

pub use consumer_key::*;
pub use credential::*;
