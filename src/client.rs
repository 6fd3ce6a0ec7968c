//! Signed request executor bound to one endpoint and one set of credentials.
//!
//! [`Client`] owns the endpoint, the [`Credentials`], the transport, and the cached server time
//! delta. Every call goes through the same pipeline: serialize the body once, sign exactly those
//! bytes (authenticated calls only), hand the request to the transport, then decode either the
//! typed payload or an [`ApiError`].

pub mod config;
pub mod time;

pub use config::*;

// self
use crate::{
	_prelude::*,
	auth::{Credentials, SignatureHasher, SignatureInput, Sha1Hasher},
	endpoint::Endpoint,
	error::{ApiError, ConfigError, DecodeError},
	flows::ValidationState,
	http::{
		ApiRequest, ApiResponse, ApiTransport, HEADER_ACCEPT, HEADER_APPLICATION, HEADER_CONSUMER,
		HEADER_CONTENT_TYPE, HEADER_SIGNATURE, HEADER_TIMESTAMP, Method,
	},
	obs::{self, CallKind, CallOutcome, CallSpan},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

const ACCEPT_JSON: &str = "application/json";
const CONTENT_TYPE_JSON: &str = "application/json;charset=utf-8";

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type OvhClient = Client<ReqwestTransport>;

/// API client for a single endpoint and credential set.
///
/// Clones share the transport and the cached time delta. The consumer key can only change
/// through `&mut self` ([`Client::apply_validation_state`] or the public `credentials` field),
/// so a client shared across tasks never sees it change underneath an in-flight call.
pub struct Client<T>
where
	T: ?Sized + ApiTransport,
{
	/// API root every path is appended to.
	pub endpoint: Endpoint,
	/// Key material used for headers and signatures.
	pub credentials: Credentials,
	/// Transport used for every outbound request.
	pub transport: Arc<T>,
	/// Hash function applied to signature payloads.
	pub hasher: Arc<dyn SignatureHasher>,
	time_delta: Arc<AsyncOnceCell<i64>>,
}
impl<T> Client<T>
where
	T: ?Sized + ApiTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_transport(
		endpoint: Endpoint,
		credentials: Credentials,
		transport: impl Into<Arc<T>>,
	) -> Self {
		Self {
			endpoint,
			credentials,
			transport: transport.into(),
			hasher: Arc::new(Sha1Hasher),
			time_delta: Default::default(),
		}
	}

	/// Creates a client from a loaded [`ClientConfig`] and a caller-provided transport.
	pub fn from_config_with_transport(config: ClientConfig, transport: impl Into<Arc<T>>) -> Self {
		let (endpoint, credentials) = config.into_parts();

		Self::with_transport(endpoint, credentials, transport)
	}

	/// Replaces the signature hash function.
	pub fn with_hasher(mut self, hasher: Arc<dyn SignatureHasher>) -> Self {
		self.hasher = hasher;

		self
	}

	/// Sets or replaces the consumer key.
	pub fn with_consumer_key(mut self, consumer_key: crate::auth::ConsumerKey) -> Self {
		self.credentials.consumer_key = Some(consumer_key);

		self
	}

	/// Adopts the consumer key returned by a consumer-key request.
	///
	/// Fails without touching the current key when the issued key is empty or contains
	/// whitespace.
	pub fn apply_validation_state(&mut self, state: &ValidationState) -> Result<()> {
		self.credentials.apply(state)?;

		Ok(())
	}

	/// Authenticated `GET`.
	pub async fn get<R>(&self, path: &str) -> Result<R>
	where
		R: DeserializeOwned,
	{
		self.call(Method::Get, path, None::<&()>, true).await
	}

	/// Authenticated `POST` with a JSON body.
	pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
	where
		B: ?Sized + Serialize,
		R: DeserializeOwned,
	{
		self.call(Method::Post, path, Some(body), true).await
	}

	/// Authenticated `PUT` with a JSON body.
	pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R>
	where
		B: ?Sized + Serialize,
		R: DeserializeOwned,
	{
		self.call(Method::Put, path, Some(body), true).await
	}

	/// Authenticated `DELETE`.
	pub async fn delete<R>(&self, path: &str) -> Result<R>
	where
		R: DeserializeOwned,
	{
		self.call(Method::Delete, path, None::<&()>, true).await
	}

	/// Unauthenticated `GET`.
	pub async fn get_unauth<R>(&self, path: &str) -> Result<R>
	where
		R: DeserializeOwned,
	{
		self.call(Method::Get, path, None::<&()>, false).await
	}

	/// Unauthenticated `POST` with a JSON body.
	pub async fn post_unauth<B, R>(&self, path: &str, body: &B) -> Result<R>
	where
		B: ?Sized + Serialize,
		R: DeserializeOwned,
	{
		self.call(Method::Post, path, Some(body), false).await
	}

	/// Unauthenticated `PUT` with a JSON body.
	pub async fn put_unauth<B, R>(&self, path: &str, body: &B) -> Result<R>
	where
		B: ?Sized + Serialize,
		R: DeserializeOwned,
	{
		self.call(Method::Put, path, Some(body), false).await
	}

	/// Unauthenticated `DELETE`.
	pub async fn delete_unauth<R>(&self, path: &str) -> Result<R>
	where
		R: DeserializeOwned,
	{
		self.call(Method::Delete, path, None::<&()>, false).await
	}

	/// Issues one request and decodes the response.
	///
	/// With `needs_auth`, the first call resolves the server time delta before signing.
	pub async fn call<B, R>(
		&self,
		method: Method,
		path: &str,
		body: Option<&B>,
		needs_auth: bool,
	) -> Result<R>
	where
		B: ?Sized + Serialize,
		R: DeserializeOwned,
	{
		self.call_as(CallKind::Api, method, path, body, needs_auth).await
	}

	pub(crate) async fn call_as<B, R>(
		&self,
		kind: CallKind,
		method: Method,
		path: &str,
		body: Option<&B>,
		needs_auth: bool,
	) -> Result<R>
	where
		B: ?Sized + Serialize,
		R: DeserializeOwned,
	{
		let stage = format!("{method} {path}");

		observed(kind, &stage, self.execute(method, path, body, needs_auth)).await
	}

	async fn execute<B, R>(
		&self,
		method: Method,
		path: &str,
		body: Option<&B>,
		needs_auth: bool,
	) -> Result<R>
	where
		B: ?Sized + Serialize,
		R: DeserializeOwned,
	{
		let body = body
			.map(serde_json::to_string)
			.transpose()
			.map_err(ConfigError::RequestBody)?;
		let timestamp = if needs_auth { Some(self.timestamp().await?) } else { None };
		let request = self.build_request(method, path, body, timestamp);

		self.dispatch(path, request).await
	}

	/// Assembles headers and, when `timestamp` is set, the signature for one request.
	pub(crate) fn build_request(
		&self,
		method: Method,
		path: &str,
		body: Option<String>,
		timestamp: Option<i64>,
	) -> ApiRequest {
		let url = self.endpoint.url_for(path);
		let mut headers = vec![
			(HEADER_ACCEPT, ACCEPT_JSON.to_owned()),
			(HEADER_APPLICATION, self.credentials.application_key.to_string()),
		];

		if body.is_some() {
			headers.push((HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON.to_owned()));
		}
		if let Some(timestamp) = timestamp {
			let consumer_key = self.credentials.consumer_key_str();
			let signature = crate::auth::sign(
				self.hasher.as_ref(),
				&SignatureInput {
					application_secret: self.credentials.application_secret.expose(),
					consumer_key,
					method: method.as_str(),
					url: &url,
					body: body.as_deref().unwrap_or_default(),
					timestamp,
				},
			);

			headers.push((HEADER_CONSUMER, consumer_key.to_owned()));
			headers.push((HEADER_TIMESTAMP, timestamp.to_string()));
			headers.push((HEADER_SIGNATURE, signature.into()));
		}

		ApiRequest { method, url, headers, body }
	}

	pub(crate) async fn dispatch<R>(&self, path: &str, request: ApiRequest) -> Result<R>
	where
		R: DeserializeOwned,
	{
		let response = self.transport.execute(request).await?;

		decode_response(path, response)
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestTransport> {
	/// Creates a client backed by a default reqwest transport.
	pub fn new(endpoint: Endpoint, credentials: Credentials) -> Self {
		Self::with_transport(endpoint, credentials, ReqwestTransport::default())
	}

	/// Creates a reqwest-backed client from a loaded [`ClientConfig`].
	pub fn from_config(config: ClientConfig) -> Self {
		Self::from_config_with_transport(config, ReqwestTransport::default())
	}
}
impl<T> Clone for Client<T>
where
	T: ?Sized + ApiTransport,
{
	fn clone(&self) -> Self {
		Self {
			endpoint: self.endpoint.clone(),
			credentials: self.credentials.clone(),
			transport: self.transport.clone(),
			hasher: self.hasher.clone(),
			time_delta: self.time_delta.clone(),
		}
	}
}
impl<T> Debug for Client<T>
where
	T: ?Sized + ApiTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("endpoint", &self.endpoint)
			.field("credentials", &self.credentials)
			.field("time_delta", &self.time_delta.get())
			.finish()
	}
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiErrorBody {
	message: String,
	class: Option<String>,
	error_code: Option<String>,
}

/// Wraps `fut` in a call span and records attempt/outcome metrics.
pub(crate) async fn observed<R, Fut>(kind: CallKind, stage: &str, fut: Fut) -> Result<R>
where
	Fut: Future<Output = Result<R>>,
{
	let span = CallSpan::new(kind, stage);

	obs::record_call_outcome(kind, CallOutcome::Attempt);

	let result = span.instrument(fut).await;

	obs::record_call_result(kind, &result);

	result
}

fn decode_response<R>(path: &str, response: ApiResponse) -> Result<R>
where
	R: DeserializeOwned,
{
	if !response.is_success() {
		return Err(api_error(response).into());
	}

	// An empty body decodes as `null` so `()` and `Option<_>` targets work.
	let body: &[u8] =
		if response.body.iter().all(u8::is_ascii_whitespace) { b"null" } else { &response.body };
	let de = &mut serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(de).map_err(|source| {
		DecodeError { path: path.to_owned(), status: response.status, source }.into()
	})
}

fn api_error(response: ApiResponse) -> ApiError {
	let ApiResponse { status, query_id, body } = response;

	match serde_json::from_slice::<ApiErrorBody>(&body) {
		Ok(parsed) => ApiError {
			code: status,
			message: parsed.message,
			class: parsed.class,
			error_code: parsed.error_code,
			query_id,
		},
		Err(_) => ApiError {
			message: String::from_utf8_lossy(&body).trim().to_owned(),
			query_id,
			..ApiError::new(status, String::new())
		},
	}
}
