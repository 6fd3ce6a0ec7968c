//! OVH request signatures.
//!
//! A signature is `$1$` followed by the lowercase hex digest of
//! `secret+consumer_key+METHOD+url+body+timestamp`. The digest function is pluggable through
//! [`SignatureHasher`]; the API itself only accepts [`Sha1Hasher`].

// crates.io
use sha1::{Digest, Sha1};
// self
use crate::_prelude::*;

/// Version tag prefixed to every signature.
pub const SIGNATURE_VERSION: &str = "$1$";

/// One-way hash applied to the signature payload.
pub trait SignatureHasher
where
	Self: Send + Sync,
{
	/// Returns the raw digest of `payload`.
	fn digest(&self, payload: &[u8]) -> Vec<u8>;
}

/// SHA-1 hasher mandated by the API.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha1Hasher;
impl SignatureHasher for Sha1Hasher {
	fn digest(&self, payload: &[u8]) -> Vec<u8> {
		Sha1::digest(payload).to_vec()
	}
}

/// Fields covered by a signature.
#[derive(Clone, Copy, Debug)]
pub struct SignatureInput<'a> {
	/// Application secret.
	pub application_secret: &'a str,
	/// Consumer key, or an empty string when none is set.
	pub consumer_key: &'a str,
	/// Upper-case HTTP method.
	pub method: &'a str,
	/// Full request URL, query string included.
	pub url: &'a str,
	/// Exact request body bytes, or an empty string.
	pub body: &'a str,
	/// Server-adjusted Unix timestamp.
	pub timestamp: i64,
}
impl SignatureInput<'_> {
	fn payload(&self) -> String {
		format!(
			"{}+{}+{}+{}+{}+{}",
			self.application_secret,
			self.consumer_key,
			self.method,
			self.url,
			self.body,
			self.timestamp
		)
	}
}

/// Versioned hex signature sent as `X-Ovh-Signature`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);
impl Signature {
	/// Returns the full header value, version tag included.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Debug for Signature {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Signature({})", self.0)
	}
}
impl Display for Signature {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl From<Signature> for String {
	fn from(value: Signature) -> Self {
		value.0
	}
}

/// Signs `input` with `hasher`.
pub fn sign(hasher: &dyn SignatureHasher, input: &SignatureInput) -> Signature {
	let digest = hasher.digest(input.payload().as_bytes());

	Signature(format!("{SIGNATURE_VERSION}{}", hex::encode(digest)))
}
