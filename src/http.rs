//! Transport primitives for API calls.
//!
//! The client builds fully signed [`ApiRequest`] values and hands them to an [`ApiTransport`].
//! Transports only move bytes: they never inspect status codes, so every non-2xx response
//! reaches the client's decoder as a regular [`ApiResponse`]. The default transport is
//! [`ReqwestTransport`] (behind the `reqwest` feature); tests and embedders can plug in their
//! own.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::error::{ConfigError, TransportError};

/// `Accept` header name.
pub const HEADER_ACCEPT: &str = "Accept";
/// `Content-Type` header name.
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
/// Application key header name.
pub const HEADER_APPLICATION: &str = "X-Ovh-Application";
/// Consumer key header name.
pub const HEADER_CONSUMER: &str = "X-Ovh-Consumer";
/// Signature timestamp header name.
pub const HEADER_TIMESTAMP: &str = "X-Ovh-Timestamp";
/// Signature header name.
pub const HEADER_SIGNATURE: &str = "X-Ovh-Signature";
/// Response header identifying the query on the API side.
pub const HEADER_QUERY_ID: &str = "X-Ovh-QueryID";

/// HTTP methods used by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// `GET`.
	Get,
	/// `POST`.
	Post,
	/// `PUT`.
	Put,
	/// `DELETE`.
	Delete,
}
impl Method {
	/// Returns the upper-case method token.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
#[cfg(feature = "reqwest")]
impl From<Method> for reqwest::Method {
	fn from(value: Method) -> Self {
		match value {
			Method::Get => reqwest::Method::GET,
			Method::Post => reqwest::Method::POST,
			Method::Put => reqwest::Method::PUT,
			Method::Delete => reqwest::Method::DELETE,
		}
	}
}

/// Fully prepared outbound request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute URL.
	pub url: String,
	/// Header pairs in the order they were added.
	pub headers: Vec<(&'static str, String)>,
	/// Serialized JSON body, if any. These are the exact bytes that were signed.
	pub body: Option<String>,
}
impl ApiRequest {
	/// Looks up a header value by case-insensitive name.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}

/// Raw response handed back by a transport.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// `X-Ovh-QueryID` header, when present.
	pub query_id: Option<String>,
	/// Raw body bytes.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Creates a response without a query identifier.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, query_id: None, body: body.into() }
	}

	/// Whether the status is in `[200, 300)`.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Boxed future returned by [`ApiTransport::execute`].
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<ApiResponse>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of executing prepared API requests.
///
/// Implementations report network failures as [`Error::Transport`] and request construction
/// failures as [`Error::Config`]; any response that arrives, whatever its status, is returned
/// as `Ok`.
pub trait ApiTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and collects the full response body.
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiTransport for ReqwestTransport {
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_> {
		Box::pin(async move {
			let ApiRequest { method, url, headers, body } = request;
			let mut builder = self.0.request(method.into(), url);

			for (name, value) in headers {
				builder = builder.header(name, value);
			}
			if let Some(body) = body {
				builder = builder.body(body);
			}

			let request = builder.build().map_err(ConfigError::http_request)?;
			let response = self.0.execute(request).await.map_err(map_reqwest_error)?;
			let status = response.status().as_u16();
			let query_id = response
				.headers()
				.get(HEADER_QUERY_ID)
				.and_then(|value| value.to_str().ok())
				.map(str::to_owned);
			let body = response.bytes().await.map_err(TransportError::from)?.to_vec();

			Ok(ApiResponse { status, query_id, body })
		})
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::http_request(err).into();
	}

	TransportError::from(err).into()
}
