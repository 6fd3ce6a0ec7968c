//! Serializable client configuration.

// self
use crate::{
	_prelude::*,
	auth::{ApplicationKey, ApplicationSecret, ConsumerKey, Credentials},
	endpoint::Endpoint,
};

/// Everything needed to build a [`Client`](crate::Client), in a shape embedders can load from
/// their own configuration files.
///
/// ```
/// use ovh_client::client::ClientConfig;
///
/// let config: ClientConfig = serde_json::from_str(
/// 	r#"{"endpoint":"ovh-ca","application_key":"ak","application_secret":"as"}"#,
/// )
/// .unwrap();
///
/// assert!(config.consumer_key.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
	/// Target endpoint; defaults to `ovh-eu`.
	#[serde(default)]
	pub endpoint: Endpoint,
	/// Application key.
	pub application_key: ApplicationKey,
	/// Application secret.
	pub application_secret: ApplicationSecret,
	/// Previously issued consumer key, if any.
	#[serde(default)]
	pub consumer_key: Option<ConsumerKey>,
}
impl ClientConfig {
	/// Splits the configuration into the endpoint and the credentials.
	pub fn into_parts(self) -> (Endpoint, Credentials) {
		let Self { endpoint, application_key, application_secret, consumer_key } = self;

		(endpoint, Credentials { application_key, application_secret, consumer_key })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::auth::CredentialError;

	#[test]
	fn config_defaults_endpoint_and_consumer_key() {
		let config: ClientConfig =
			serde_json::from_str(r#"{"application_key":"ak","application_secret":"as"}"#)
				.expect("Minimal config should deserialize.");
		let (endpoint, credentials) = config.into_parts();

		assert_eq!(endpoint, Endpoint::OvhEu);
		assert_eq!(credentials.application_key.expose(), "ak");
		assert_eq!(credentials.consumer_key, None);
	}

	#[test]
	fn config_rejects_blank_keys() {
		let err = serde_json::from_str::<ClientConfig>(
			r#"{"application_key":"","application_secret":"as"}"#,
		)
		.expect_err("Empty application key should be rejected.");
		let expected = CredentialError::Empty { kind: "Application key" }.to_string();

		assert!(err.to_string().contains(&expected));
	}

	#[test]
	fn config_accepts_custom_endpoint() {
		let config: ClientConfig = serde_json::from_str(
			r#"{"endpoint":"http://127.0.0.1:9000/1.0/","application_key":"ak","application_secret":"as","consumer_key":"ck"}"#,
		)
		.expect("Custom endpoint config should deserialize.");

		assert_eq!(config.endpoint.base_url(), "http://127.0.0.1:9000/1.0");
		assert_eq!(config.consumer_key.as_ref().map(ConsumerKey::expose), Some("ck"));
	}
}
