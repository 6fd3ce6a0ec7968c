//! API roots the client can target.
//!
//! Named endpoints cover the vendor's regional APIs; anything else must be an absolute
//! http(s) URL and is used as-is (minus any trailing `/`).

// self
use crate::{_prelude::*, error::ConfigError};

/// Base URL every request path is appended to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Endpoint {
	/// `ovh-eu`.
	#[default]
	OvhEu,
	/// `ovh-ca`.
	OvhCa,
	/// `ovh-us`.
	OvhUs,
	/// `kimsufi-eu`.
	KimsufiEu,
	/// `kimsufi-ca`.
	KimsufiCa,
	/// `soyoustart-eu`.
	SoyoustartEu,
	/// `soyoustart-ca`.
	SoyoustartCa,
	/// Any other API root, stored without a trailing `/`.
	Custom(String),
}
impl Endpoint {
	const NAMED: [Endpoint; 7] = [
		Endpoint::OvhEu,
		Endpoint::OvhCa,
		Endpoint::OvhUs,
		Endpoint::KimsufiEu,
		Endpoint::KimsufiCa,
		Endpoint::SoyoustartEu,
		Endpoint::SoyoustartCa,
	];

	/// Validates and wraps a custom API root.
	pub fn custom(url: impl AsRef<str>) -> Result<Self, ConfigError> {
		let raw = url.as_ref();
		let invalid = || ConfigError::InvalidEndpoint { value: raw.to_owned() };
		let parsed = Url::parse(raw).map_err(|_| invalid())?;

		if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
			return Err(invalid());
		}

		Ok(Self::Custom(raw.trim_end_matches('/').to_owned()))
	}

	/// Short name for named endpoints.
	pub const fn name(&self) -> Option<&'static str> {
		match self {
			Endpoint::OvhEu => Some("ovh-eu"),
			Endpoint::OvhCa => Some("ovh-ca"),
			Endpoint::OvhUs => Some("ovh-us"),
			Endpoint::KimsufiEu => Some("kimsufi-eu"),
			Endpoint::KimsufiCa => Some("kimsufi-ca"),
			Endpoint::SoyoustartEu => Some("soyoustart-eu"),
			Endpoint::SoyoustartCa => Some("soyoustart-ca"),
			Endpoint::Custom(_) => None,
		}
	}

	/// API root without a trailing `/`.
	pub fn base_url(&self) -> &str {
		match self {
			Endpoint::OvhEu => "https://eu.api.ovh.com/1.0",
			Endpoint::OvhCa => "https://ca.api.ovh.com/1.0",
			Endpoint::OvhUs => "https://api.us.ovhcloud.com/1.0",
			Endpoint::KimsufiEu => "https://eu.api.kimsufi.com/1.0",
			Endpoint::KimsufiCa => "https://ca.api.kimsufi.com/1.0",
			Endpoint::SoyoustartEu => "https://eu.api.soyoustart.com/1.0",
			Endpoint::SoyoustartCa => "https://ca.api.soyoustart.com/1.0",
			Endpoint::Custom(url) => url,
		}
	}

	/// Joins `path` onto the API root.
	pub fn url_for(&self, path: &str) -> String {
		if path.starts_with('/') {
			format!("{}{path}", self.base_url())
		} else {
			format!("{}/{path}", self.base_url())
		}
	}
}
impl Display for Endpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self.name() {
			Some(name) => f.write_str(name),
			None => f.write_str(self.base_url()),
		}
	}
}
impl FromStr for Endpoint {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::NAMED
			.into_iter()
			.find(|endpoint| endpoint.name() == Some(s))
			.map_or_else(|| Self::custom(s), Ok)
	}
}
impl Serialize for Endpoint {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.collect_str(self)
	}
}
impl<'de> Deserialize<'de> for Endpoint {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let raw = String::deserialize(deserializer)?;

		raw.parse().map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn parses_named_endpoints() {
		let endpoint: Endpoint = "ovh-ca".parse().expect("Named endpoint should parse.");

		assert_eq!(endpoint, Endpoint::OvhCa);
		assert_eq!(endpoint.url_for("/auth/time"), "https://ca.api.ovh.com/1.0/auth/time");
		assert_eq!(endpoint.to_string(), "ovh-ca");
	}

	#[test]
	fn custom_endpoints_drop_trailing_slash() {
		let endpoint: Endpoint =
			"http://127.0.0.1:8080/".parse().expect("Custom endpoint should parse.");

		assert_eq!(endpoint.base_url(), "http://127.0.0.1:8080");
		assert_eq!(endpoint.url_for("me"), "http://127.0.0.1:8080/me");
	}

	#[test]
	fn rejects_unknown_names_and_schemes() {
		assert!(matches!(
			"ovh-mars".parse::<Endpoint>(),
			Err(ConfigError::InvalidEndpoint { .. })
		));
		assert!(matches!(
			"ftp://example.com".parse::<Endpoint>(),
			Err(ConfigError::InvalidEndpoint { .. })
		));
	}

	#[test]
	fn serde_uses_names() {
		let json = serde_json::to_string(&Endpoint::KimsufiEu).expect("Endpoint should serialize.");

		assert_eq!(json, "\"kimsufi-eu\"");

		let back: Endpoint = serde_json::from_str(&json).expect("Endpoint should deserialize.");

		assert_eq!(back, Endpoint::KimsufiEu);
	}
}
