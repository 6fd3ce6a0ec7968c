// crates.io
use httpmock::prelude::*;
use serde::Deserialize;
// self
use ovh_client::{
	OvhClient,
	auth::{ConsumerKey, Credentials},
	endpoint::Endpoint,
	error::Error,
};

const APPLICATION_KEY: &str = "mock-application-key";
const APPLICATION_SECRET: &str = "mock-application-secret";
const CONSUMER_KEY: &str = "mock-consumer-key";

#[derive(Debug, Deserialize)]
struct Me {
	nichandle: String,
}

fn build_client(base_url: &str) -> OvhClient {
	let endpoint = Endpoint::custom(base_url).expect("Mock server URL should be a valid endpoint.");
	let credentials = Credentials::from_parts(APPLICATION_KEY, APPLICATION_SECRET, None)
		.expect("Mock credentials should be valid.");
	let consumer_key = ConsumerKey::new(CONSUMER_KEY).expect("Mock consumer key should be valid.");

	OvhClient::new(endpoint, credentials).with_consumer_key(consumer_key)
}

#[tokio::test]
async fn signed_calls_resolve_time_once_and_send_auth_headers() {
	let server = MockServer::start_async().await;
	let client = build_client(&server.base_url());
	let time_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/auth/time").header("x-ovh-application", APPLICATION_KEY);
			then.status(200).header("content-type", "application/json").body("1700000000");
		})
		.await;
	let me_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/me")
				.header("accept", "application/json")
				.header("x-ovh-application", APPLICATION_KEY)
				.header("x-ovh-consumer", CONSUMER_KEY)
				.header_exists("x-ovh-timestamp")
				.header_exists("x-ovh-signature");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"nichandle":"xx1234-ovh"}"#);
		})
		.await;
	let first: Me = client.get("/me").await.expect("First signed call should succeed.");
	let second: Me = client.get("/me").await.expect("Second signed call should succeed.");

	assert_eq!(first.nichandle, "xx1234-ovh");
	assert_eq!(second.nichandle, "xx1234-ovh");

	time_mock.assert_calls_async(1).await;
	me_mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn unparseable_server_time_is_a_decode_error() {
	let server = MockServer::start_async().await;
	let client = build_client(&server.base_url());
	let time_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/auth/time");
			then.status(200).body("not-a-number");
		})
		.await;
	let err = client.get::<Me>("/me").await.expect_err("Signing needs the server time.");

	time_mock.assert_async().await;

	assert!(matches!(err, Error::Decode(_)), "Unexpected error: {err:?}.");
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
	let server = MockServer::start_async().await;
	let client = build_client(&server.base_url());
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/me");
			then.status(200).header("content-type", "application/json").body(r#"{"nic":"#);
		})
		.await;
	let err = client.get_unauth::<Me>("/me").await.expect_err("Malformed JSON should fail.");

	mock.assert_async().await;

	match err {
		Error::Decode(decode) => assert_eq!(decode.status, 200),
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
	let client = build_client("http://127.0.0.1:1");
	let err = client.ping().await.expect_err("Nothing listens on port 1.");

	assert!(matches!(err, Error::Transport(_)), "Unexpected error: {err:?}.");
	assert!(err.as_api().is_none());
}
