//! Application and consumer key material owned by a client.

// std
use std::ops::Deref;
// self
use crate::{_prelude::*, flows::ValidationState};

macro_rules! def_key {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new key after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, CredentialError> {
				let view = value.as_ref();

				validate_view($kind, view)?;

				Ok(Self(view.to_owned()))
			}

			/// Returns the raw key value.
			pub fn expose(&self) -> &str {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = CredentialError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				validate_view($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl FromStr for $name {
			type Err = CredentialError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

/// Error returned when key material fails validation.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum CredentialError {
	/// The key was empty.
	#[error("{kind} cannot be empty.")]
	Empty {
		/// Kind of key (application key, application secret, consumer key).
		kind: &'static str,
	},
	/// The key contains whitespace characters.
	#[error("{kind} contains whitespace.")]
	ContainsWhitespace {
		/// Kind of key (application key, application secret, consumer key).
		kind: &'static str,
	},
}

def_key! { ApplicationKey, "Public key identifying the calling application.", "Application key" }
def_key! {
	ApplicationSecret,
	"Secret paired with an [`ApplicationKey`]; never logged.",
	"Application secret"
}
def_key! {
	ConsumerKey,
	"User-consented key scoping which API calls the application may make.",
	"Consumer key"
}

impl Debug for ApplicationKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "ApplicationKey({})", self.0)
	}
}
impl Display for ApplicationKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl Deref for ApplicationKey {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Debug for ApplicationSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ApplicationSecret").field(&"<redacted>").finish()
	}
}
impl Display for ApplicationSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

impl Debug for ConsumerKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ConsumerKey").field(&"<redacted>").finish()
	}
}
// Consumer keys are printed verbatim by `ValidationState`, so `Display` is not redacted.
impl Display for ConsumerKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Key material used to identify and sign requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
	/// Application key sent as `X-Ovh-Application` on every request.
	pub application_key: ApplicationKey,
	/// Application secret mixed into every signature.
	pub application_secret: ApplicationSecret,
	/// Consumer key, once one has been issued and applied.
	pub consumer_key: Option<ConsumerKey>,
}
impl Credentials {
	/// Creates credentials without a consumer key.
	pub fn new(application_key: ApplicationKey, application_secret: ApplicationSecret) -> Self {
		Self { application_key, application_secret, consumer_key: None }
	}

	/// Validates raw strings and builds credentials from them.
	pub fn from_parts(
		application_key: impl AsRef<str>,
		application_secret: impl AsRef<str>,
		consumer_key: Option<&str>,
	) -> Result<Self, CredentialError> {
		let mut credentials = Self::new(
			ApplicationKey::new(application_key)?,
			ApplicationSecret::new(application_secret)?,
		);

		credentials.consumer_key = consumer_key.map(ConsumerKey::new).transpose()?;

		Ok(credentials)
	}

	/// Sets or replaces the consumer key.
	pub fn with_consumer_key(mut self, consumer_key: ConsumerKey) -> Self {
		self.consumer_key = Some(consumer_key);

		self
	}

	/// Adopts the consumer key issued by a consumer-key request.
	///
	/// The key is validated here; on failure the current consumer key is kept.
	pub fn apply(&mut self, state: &ValidationState) -> Result<(), CredentialError> {
		self.consumer_key = Some(ConsumerKey::new(&state.consumer_key)?);

		Ok(())
	}

	/// Consumer key value used in headers and signatures; empty when none is set.
	pub fn consumer_key_str(&self) -> &str {
		self.consumer_key.as_ref().map(ConsumerKey::expose).unwrap_or_default()
	}
}

fn validate_view(kind: &'static str, view: &str) -> Result<(), CredentialError> {
	if view.is_empty() {
		return Err(CredentialError::Empty { kind });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(CredentialError::ContainsWhitespace { kind });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secrets_are_redacted() {
		let credentials = Credentials::from_parts("app-key", "app-secret", Some("ck"))
			.expect("Failed to build test credentials.");
		let rendered = format!("{credentials:?}");

		assert!(rendered.contains("ApplicationKey(app-key)"));
		assert!(!rendered.contains("app-secret"));
		assert!(!rendered.contains("\"ck\""));
		assert_eq!(credentials.application_secret.to_string(), "<redacted>");
	}

	#[test]
	fn rejects_empty_and_whitespace_keys() {
		assert_eq!(
			ApplicationKey::new(""),
			Err(CredentialError::Empty { kind: "Application key" })
		);
		assert_eq!(
			ConsumerKey::new("ck with spaces"),
			Err(CredentialError::ContainsWhitespace { kind: "Consumer key" })
		);
	}

	#[test]
	fn consumer_key_str_is_empty_until_applied() {
		let mut credentials = Credentials::from_parts("app-key", "app-secret", None)
			.expect("Failed to build test credentials.");

		assert_eq!(credentials.consumer_key_str(), "");

		let state = ValidationState {
			consumer_key: "issued".into(),
			state: "pendingValidation".into(),
			validation_url: "https://example.com/validate".into(),
		};

		credentials.apply(&state).expect("Issued consumer key should be valid.");

		assert_eq!(credentials.consumer_key_str(), "issued");
	}

	#[test]
	fn invalid_issued_key_is_rejected_on_apply() {
		let mut credentials = Credentials::from_parts("app-key", "app-secret", Some("current"))
			.expect("Failed to build test credentials.");
		let state = ValidationState {
			consumer_key: String::new(),
			state: "pendingValidation".into(),
			validation_url: "https://example.com/validate".into(),
		};

		assert_eq!(credentials.apply(&state), Err(CredentialError::Empty { kind: "Consumer key" }));
		assert_eq!(credentials.consumer_key_str(), "current");
	}
}
