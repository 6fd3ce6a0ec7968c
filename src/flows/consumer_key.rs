//! Consumer-key issuance.
//!
//! [`Client::consumer_key_request`] starts a [`ConsumerKeyRequest`]; rules are appended in
//! order and [`ConsumerKeyRequest::send`] consumes the builder, so the rules that were sent can
//! never be changed afterwards. The returned [`ValidationState`] carries the pending consumer
//! key and the URL the end user must visit. The client is left untouched: callers adopt the key
//! explicitly with [`Client::apply_validation_state`].

// self
use crate::{
	_prelude::*,
	auth::AccessRule,
	client::Client,
	http::{ApiTransport, Method},
	obs::CallKind,
};

/// Path of the consumer-key issuance endpoint.
pub const CREDENTIAL_PATH: &str = "/auth/credential";

/// Outcome of a consumer-key request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationState {
	/// Issued consumer key, exactly as returned; unusable until the end user validates it.
	///
	/// It is checked when applied, see [`Client::apply_validation_state`].
	#[serde(rename = "consumerKey", alias = "ConsumerKey")]
	pub consumer_key: String,
	/// Credential state, e.g. `pendingValidation`.
	pub state: String,
	/// Page where the end user approves the requested rules.
	#[serde(rename = "validationUrl")]
	pub validation_url: String,
}
impl Display for ValidationState {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		writeln!(f, "CK: \"{}\"", self.consumer_key)?;
		writeln!(f, "Status: \"{}\"", self.state)?;
		writeln!(f, "Validation URL: \"{}\"", self.validation_url)
	}
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CredentialRequestBody<'a> {
	access_rules: &'a [AccessRule],
	#[serde(skip_serializing_if = "Option::is_none")]
	redirection: Option<&'a str>,
}

/// Single-use builder for a consumer-key request.
#[must_use = "a consumer-key request does nothing until `send` is awaited"]
pub struct ConsumerKeyRequest<'c, T>
where
	T: ?Sized + ApiTransport,
{
	client: &'c Client<T>,
	rules: Vec<AccessRule>,
	redirection: Option<Url>,
}
impl<'c, T> ConsumerKeyRequest<'c, T>
where
	T: ?Sized + ApiTransport,
{
	fn new(client: &'c Client<T>) -> Self {
		Self { client, rules: Vec::new(), redirection: None }
	}

	/// Appends one rule. Neither argument is validated.
	pub fn add_rule(mut self, method: impl Into<String>, path: impl Into<String>) -> Self {
		self.rules.push(AccessRule::new(method, path));

		self
	}

	/// Appends one rule per method for `path`.
	pub fn add_rules<I, M>(mut self, methods: I, path: &str) -> Self
	where
		I: IntoIterator<Item = M>,
		M: Into<String>,
	{
		self.rules.extend(methods.into_iter().map(|method| AccessRule::new(method, path)));

		self
	}

	/// Appends rules for `path` itself and everything below it (`path/*`).
	///
	/// Trailing `/` are trimmed first, so `/` alone only grants `/*`.
	pub fn add_recursive_rules<I, M>(self, methods: I, path: &str) -> Self
	where
		I: IntoIterator<Item = M>,
		M: Into<String>,
	{
		let methods = methods.into_iter().map(Into::into).collect::<Vec<String>>();
		let path = path.trim_end_matches('/');
		let this = if path.is_empty() { self } else { self.add_rules(methods.clone(), path) };

		this.add_rules(methods, &format!("{path}/*"))
	}

	/// Asks the API to send the end user to `url` once the rules are validated.
	pub fn with_redirection(mut self, url: Url) -> Self {
		self.redirection = Some(url);

		self
	}

	/// Rules accumulated so far, in insertion order.
	pub fn rules(&self) -> &[AccessRule] {
		&self.rules
	}

	/// Sends the request unauthenticated and returns the pending credential.
	pub async fn send(self) -> Result<ValidationState> {
		let body = CredentialRequestBody {
			access_rules: &self.rules,
			redirection: self.redirection.as_ref().map(Url::as_str),
		};

		self.client
			.call_as(CallKind::ConsumerKey, Method::Post, CREDENTIAL_PATH, Some(&body), false)
			.await
	}
}
impl<T> Debug for ConsumerKeyRequest<'_, T>
where
	T: ?Sized + ApiTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ConsumerKeyRequest")
			.field("rules", &self.rules)
			.field("redirection", &self.redirection)
			.finish()
	}
}

impl<T> Client<T>
where
	T: ?Sized + ApiTransport,
{
	/// Starts building a consumer-key request.
	pub fn consumer_key_request(&self) -> ConsumerKeyRequest<'_, T> {
		ConsumerKeyRequest::new(self)
	}
}
