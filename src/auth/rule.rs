//! Access rules requested during consumer-key issuance.

// self
use crate::_prelude::*;

/// Methods granted by a read-only rule set.
pub const READ_ONLY: &[&str] = &["GET"];
/// Methods granted by a full read/write rule set.
pub const READ_WRITE: &[&str] = &["GET", "POST", "PUT", "DELETE"];
/// Methods granted by a read/write rule set that excludes `DELETE`.
pub const READ_WRITE_SAFE: &[&str] = &["GET", "POST", "PUT"];

/// One permission grant: an HTTP method and a path pattern (e.g. `/xdsl/*`).
///
/// Neither field is validated; the API is the judge of what it accepts.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessRule {
	/// HTTP method, e.g. `GET`.
	pub method: String,
	/// Path pattern, e.g. `/me` or `/xdsl/*`.
	pub path: String,
}
impl AccessRule {
	/// Creates a rule for the given method and path.
	pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
		Self { method: method.into(), path: path.into() }
	}
}
