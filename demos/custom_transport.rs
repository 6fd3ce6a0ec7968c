//! Demonstrates plugging a custom [`ApiTransport`] into [`Client`].
//!
//! The transport below never touches the network: it answers `/auth/time` and echoes the
//! signed headers back as the response body, which makes it easy to see what the client sends.

// crates.io
use color_eyre::Result;
use serde_json::json;
// self
use ovh_client::{
	Client,
	auth::{ConsumerKey, Credentials},
	endpoint::Endpoint,
	http::{ApiRequest, ApiResponse, ApiTransport, TransportFuture},
};

struct EchoTransport;
impl ApiTransport for EchoTransport {
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_> {
		Box::pin(async move {
			if request.url.ends_with("/auth/time") {
				return Ok(ApiResponse::new(200, "1700000000"));
			}

			let echoed = json!({
				"method": request.method.as_str(),
				"url": request.url,
				"headers": request.headers.iter().map(|(k, v)| format!("{k}: {v}")).collect::<Vec<_>>(),
				"body": request.body,
			});

			Ok(ApiResponse::new(200, echoed.to_string()))
		})
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let credentials = Credentials::from_parts("demo-app-key", "demo-app-secret", None)?;
	let client: Client<EchoTransport> =
		Client::with_transport(Endpoint::OvhEu, credentials, EchoTransport)
			.with_consumer_key(ConsumerKey::new("demo-consumer-key")?);
	let echoed: serde_json::Value =
		client.post("/domain/zone/example.com/refresh", &json!({ "force": true })).await?;

	println!("{}", serde_json::to_string_pretty(&echoed)?);

	Ok(())
}
