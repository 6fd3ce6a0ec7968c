//! Client-level error types shared across calls, flows, and transports.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// The API answered with a non-2xx status.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// Transport failure (DNS, TCP, TLS); never conflated with [`Error::Api`].
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// A 2xx response body could not be decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Key material failed validation.
	#[error(transparent)]
	Credential(#[from] crate::auth::CredentialError),
	/// Server time could not be turned into a usable signing timestamp.
	#[error(transparent)]
	Clock(#[from] ClockError),
}
impl Error {
	/// Stable label naming the error class, used as the `error` metric label.
	pub const fn kind(&self) -> &'static str {
		match self {
			Self::Api(_) => "api",
			Self::Transport(_) => "transport",
			Self::Decode(_) => "decode",
			Self::Config(_) => "config",
			Self::Credential(_) => "credential",
			Self::Clock(_) => "clock",
		}
	}

	/// Returns the API error when the failure came from a non-2xx response.
	pub fn as_api(&self) -> Option<&ApiError> {
		match self {
			Self::Api(e) => Some(e),
			_ => None,
		}
	}
}

/// Structured error returned by the API for any non-2xx response.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Error {code}: {message:?}")]
pub struct ApiError {
	/// HTTP status code.
	pub code: u16,
	/// Message supplied by the API.
	pub message: String,
	/// Error class reported by newer API versions.
	pub class: Option<String>,
	/// Machine-readable error code, when present.
	pub error_code: Option<String>,
	/// Value of the `X-Ovh-QueryID` response header, useful for support requests.
	pub query_id: Option<String>,
}
impl ApiError {
	/// Creates an error carrying only a status code and message.
	pub fn new(code: u16, message: impl Into<String>) -> Self {
		Self { code, message: message.into(), class: None, error_code: None, query_id: None }
	}
}

/// Response body that could not be decoded into the requested type.
#[derive(Debug, ThisError)]
#[error("Response from `{path}` (HTTP {status}) could not be decoded.")]
pub struct DecodeError {
	/// Request path that produced the body.
	pub path: String,
	/// HTTP status of the response.
	pub status: u16,
	/// Structured parsing failure.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
}

/// Server time values that overflow the signing clock.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ClockError {
	/// `server time - local time` does not fit in an `i64`.
	#[error("Server time {server_time} is out of range for local time {local_time}.")]
	DeltaOutOfRange {
		/// Unix time reported by `/auth/time`.
		server_time: i64,
		/// Local Unix time when the reply was handled.
		local_time: i64,
	},
	/// `local time + delta` does not fit in an `i64`.
	#[error("Signing timestamp overflows with a server time delta of {delta}s.")]
	TimestampOutOfRange {
		/// Cached server time delta, in seconds.
		delta: i64,
	},
}

/// Configuration and request-building failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Endpoint is neither a known name nor an absolute http(s) URL.
	#[error("Endpoint `{value}` is not a known name or a valid URL.")]
	InvalidEndpoint {
		/// Raw endpoint value.
		value: String,
	},
	/// Request body could not be serialized to JSON.
	#[error("Request body could not be serialized.")]
	RequestBody(#[source] serde_json::Error),
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request could not be built (e.g. invalid header value).
	#[error("HTTP request could not be built.")]
	HttpRequest {
		/// Underlying transport failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}

	/// Wraps a request construction failure inside [`ConfigError`].
	pub fn http_request(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::HttpRequest { source: Box::new(src) }
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn api_error_display_quotes_message() {
		let err = Error::from(ApiError::new(403, "Invalid application key"));

		assert_eq!(err.to_string(), "Error 403: \"Invalid application key\"");
		assert_eq!(err.as_api().map(|e| e.code), Some(403));
	}

	#[test]
	fn transport_errors_are_not_api_errors() {
		let err = Error::from(TransportError::Io(std::io::Error::other("reset")));

		assert!(err.as_api().is_none());
		assert_eq!(err.kind(), "transport");
	}

	#[test]
	fn clock_errors_name_the_offending_values() {
		let err = Error::from(ClockError::DeltaOutOfRange {
			server_time: i64::MIN,
			local_time: 1_700_000_000,
		});

		assert_eq!(err.kind(), "clock");
		assert_eq!(
			err.to_string(),
			format!("Server time {} is out of range for local time 1700000000.", i64::MIN)
		);
	}
}
