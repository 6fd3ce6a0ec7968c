//! Counters for API calls and a gauge for the server clock skew.

// self
use crate::{
	_prelude::*,
	obs::{CallKind, CallOutcome},
};

/// Counter of call attempts and results, labeled by `call` and `outcome`.
pub const CALL_TOTAL: &str = "ovh_client_call_total";
/// Counter of failed calls, labeled by `call` and `error` (see [`Error::kind`]).
pub const CALL_ERROR_TOTAL: &str = "ovh_client_call_error_total";
/// Gauge holding the last resolved `server time - local time`, in seconds.
pub const SERVER_TIME_DELTA: &str = "ovh_client_server_time_delta_seconds";

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(kind: CallKind, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(CALL_TOTAL, "call" => kind.as_str(), "outcome" => outcome.as_str())
			.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records how a call ended; failures are also counted per error class.
pub fn record_call_result<R>(kind: CallKind, result: &Result<R>) {
	let Err(e) = result else {
		record_call_outcome(kind, CallOutcome::Success);

		return;
	};

	record_call_outcome(kind, CallOutcome::Failure);

	#[cfg(feature = "metrics")]
	{
		metrics::counter!(CALL_ERROR_TOTAL, "call" => kind.as_str(), "error" => e.kind())
			.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = e;
	}
}

/// Publishes a freshly resolved server time delta.
pub fn record_time_delta(delta: i64) {
	#[cfg(feature = "metrics")]
	{
		metrics::gauge!(SERVER_TIME_DELTA).set(delta as f64);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = delta;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::ApiError;

	#[test]
	fn recording_without_a_recorder_is_a_noop() {
		record_call_outcome(CallKind::ConsumerKey, CallOutcome::Attempt);
		record_call_result(CallKind::Api, &Ok::<_, Error>(()));
		record_call_result::<()>(CallKind::Api, &Err(ApiError::new(404, "missing").into()));
		record_time_delta(-12);
	}
}
