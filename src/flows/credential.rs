//! Introspection and revocation of the credential the client is signing with.

// self
use crate::{
	_prelude::*,
	auth::AccessRule,
	client::Client,
	http::{ApiTransport, Method},
};

/// Path describing the consumer key currently in use.
pub const CURRENT_CREDENTIAL_PATH: &str = "/auth/currentCredential";
/// Path expiring the consumer key currently in use.
pub const LOGOUT_PATH: &str = "/auth/logout";

/// Server-side view of a consumer key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialInfo {
	/// Credential identifier.
	pub credential_id: u64,
	/// Owning application identifier.
	pub application_id: u64,
	/// Credential status, e.g. `validated` or `pendingValidation`.
	pub status: String,
	/// Rules granted to the credential.
	#[serde(default)]
	pub rules: Vec<AccessRule>,
	/// Creation instant.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub creation: Option<OffsetDateTime>,
	/// Expiration instant, if the credential expires.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub expiration: Option<OffsetDateTime>,
	/// Last time the credential was used.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub last_use: Option<OffsetDateTime>,
}

impl<T> Client<T>
where
	T: ?Sized + ApiTransport,
{
	/// Describes the consumer key this client signs with.
	pub async fn current_credential(&self) -> Result<CredentialInfo> {
		self.get(CURRENT_CREDENTIAL_PATH).await
	}

	/// Expires the consumer key this client signs with.
	///
	/// The key stays in `credentials`; drop or replace it after a successful logout.
	pub async fn logout(&self) -> Result<()> {
		self.call(Method::Post, LOGOUT_PATH, None::<&()>, true).await
	}
}
