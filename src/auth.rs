//! Auth-domain key material, access rules, and request signatures.

pub mod credentials;
pub mod rule;
pub mod signature;

pub use credentials::*;
pub use rule::*;
pub use signature::*;
