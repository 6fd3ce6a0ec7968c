//! Server time resolution used to timestamp signed requests.

// self
use crate::{
	_prelude::*,
	client::{Client, observed},
	error::ClockError,
	http::{ApiTransport, Method},
	obs::{self, CallKind},
};

/// Path of the unauthenticated server time endpoint.
pub const TIME_PATH: &str = "/auth/time";

impl<T> Client<T>
where
	T: ?Sized + ApiTransport,
{
	/// Fetches the server's current Unix time (unauthenticated, never cached).
	pub async fn server_time(&self) -> Result<i64> {
		observed(CallKind::ServerTime, "GET /auth/time", async {
			let request = self.build_request(Method::Get, TIME_PATH, None, None);

			self.dispatch(TIME_PATH, request).await
		})
		.await
	}

	/// Returns `server time - local time` in seconds, fetching it on first use.
	///
	/// The value is shared by every clone of this client and never expires. A failed fetch is
	/// not cached, so the next signed call tries again.
	pub async fn time_delta(&self) -> Result<i64> {
		self.time_delta
			.get_or_try_init(|| async {
				let server_time = self.server_time().await?;
				let local_time = OffsetDateTime::now_utc().unix_timestamp();
				let delta = server_time
					.checked_sub(local_time)
					.ok_or(ClockError::DeltaOutOfRange { server_time, local_time })?;

				obs::trace_time_delta(delta);
				obs::record_time_delta(delta);

				Ok::<_, Error>(delta)
			})
			.await
			.copied()
	}

	/// Checks that the API is reachable.
	pub async fn ping(&self) -> Result<()> {
		self.server_time().await.map(|_| ())
	}

	pub(crate) async fn timestamp(&self) -> Result<i64> {
		let delta = self.time_delta().await?;

		OffsetDateTime::now_utc()
			.unix_timestamp()
			.checked_add(delta)
			.ok_or_else(|| ClockError::TimestampOutOfRange { delta }.into())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		client::tests::{FakeTransport, credentials, fake_client},
		endpoint::Endpoint,
		error::{ClockError, DecodeError},
		http::ApiResponse,
	};

	#[tokio::test]
	async fn server_time_is_not_cached() {
		let client = fake_client(ApiResponse::default());

		client.ping().await.expect("Ping should succeed.");
		client.ping().await.expect("Ping should succeed.");

		assert_eq!(client.transport.recorded().await.len(), 2);
	}

	#[tokio::test]
	async fn unparseable_time_fails_the_first_signed_call() {
		let mut transport = FakeTransport::replying(ApiResponse::new(200, "{}"));

		transport.time_reply = ApiResponse::new(200, "\"soon\"");

		let client: Client<FakeTransport> =
			Client::with_transport(Endpoint::OvhEu, credentials(), transport);
		let err = client.get::<()>("/me").await.expect_err("A string body is not a timestamp.");

		match err {
			Error::Decode(DecodeError { path, status, .. }) => {
				assert_eq!(path, TIME_PATH);
				assert_eq!(status, 200);
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}

		assert_eq!(client.transport.recorded().await.len(), 1, "The API call must not be sent.");
	}

	#[tokio::test]
	async fn failed_time_resolution_is_retried_by_the_next_signed_call() {
		let transport = FakeTransport::replying(ApiResponse::new(200, "{}"))
			.with_queued_time_replies([ApiResponse::new(200, "\"soon\"")]);
		let client: Client<FakeTransport> =
			Client::with_transport(Endpoint::OvhEu, credentials(), transport);

		client.get::<serde_json::Value>("/me").await.expect_err("The first time reply is invalid.");

		let _: serde_json::Value =
			client.get("/me").await.expect("The second signed call should resolve the time again.");
		let requests = client.transport.recorded().await;
		let time_calls = requests.iter().filter(|r| r.url.ends_with(TIME_PATH)).count();

		assert_eq!(time_calls, 2);
		assert_eq!(requests.len(), 3);
		assert!(requests[2].url.ends_with("/me"));
		assert!(requests[2].header("X-Ovh-Signature").is_some());
	}

	#[tokio::test]
	async fn out_of_range_server_time_is_a_clock_error() {
		let mut transport = FakeTransport::replying(ApiResponse::new(200, "{}"));

		transport.time_reply = ApiResponse::new(200, i64::MIN.to_string());

		let client: Client<FakeTransport> =
			Client::with_transport(Endpoint::OvhEu, credentials(), transport);
		let err = client
			.get::<serde_json::Value>("/me")
			.await
			.expect_err("An unrepresentable delta must not be used for signing.");

		match err {
			Error::Clock(ClockError::DeltaOutOfRange { server_time, .. }) => {
				assert_eq!(server_time, i64::MIN);
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}

		assert_eq!(client.transport.recorded().await.len(), 1, "The API call must not be sent.");
		assert!(client.time_delta.get().is_none(), "A failed delta must not be cached.");
	}

	#[tokio::test]
	async fn overflowing_signing_timestamp_is_a_clock_error() {
		let client = fake_client(ApiResponse::new(200, "{}"));

		client.time_delta.set(i64::MAX).await.expect("The delta cell should start empty.");

		let err = client.get::<()>("/me").await.expect_err("now + i64::MAX overflows.");

		assert!(matches!(
			err,
			Error::Clock(ClockError::TimestampOutOfRange { delta: i64::MAX })
		));
		assert!(client.transport.recorded().await.is_empty());
	}
}
