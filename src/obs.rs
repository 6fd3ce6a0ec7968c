//! Optional observability helpers for API calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `ovh_client.request` with the `call` (kind)
//!   and `stage` (method + path) fields, plus debug events when the server time delta is
//!   resolved.
//! - Enable `metrics` to increment `ovh_client_call_total` (labels `call`, `outcome`) for every
//!   attempt and result, `ovh_client_call_error_total` (labels `call`, `error`) for every
//!   failure, and to set the `ovh_client_server_time_delta_seconds` gauge whenever the server
//!   time delta is resolved.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Call kinds observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// `GET /auth/time` used to resolve the time delta.
	ServerTime,
	/// Consumer-key issuance.
	ConsumerKey,
	/// Any other API call.
	Api,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::ServerTime => "server_time",
			CallKind::ConsumerKey => "consumer_key",
			CallKind::Api => "api",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a client call.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
