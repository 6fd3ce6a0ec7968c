//! Walks through requesting a consumer key, sending the user to the validation page, and then
//! signing a call with the newly issued key.
//!
//! Reads `OVH_ENDPOINT` (defaults to `ovh-eu`), `OVH_APPLICATION_KEY`, and
//! `OVH_APPLICATION_SECRET` from the environment.

// std
use std::{env, io};
// crates.io
use color_eyre::{Result, eyre::eyre};
// self
use ovh_client::{
	OvhClient,
	auth::{Credentials, READ_ONLY},
	endpoint::Endpoint,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let endpoint: Endpoint = env::var("OVH_ENDPOINT").as_deref().unwrap_or("ovh-eu").parse()?;
	let credentials = Credentials::from_parts(
		env::var("OVH_APPLICATION_KEY").map_err(|_| eyre!("OVH_APPLICATION_KEY is not set."))?,
		env::var("OVH_APPLICATION_SECRET")
			.map_err(|_| eyre!("OVH_APPLICATION_SECRET is not set."))?,
		None,
	)?;
	let mut client = OvhClient::new(endpoint, credentials);
	let state = client
		.consumer_key_request()
		.add_rule("GET", "/me")
		.add_recursive_rules(READ_ONLY.iter().copied(), "/domain")
		.send()
		.await?;

	print!("{state}");
	println!("Open the validation URL, approve the rules, then press Enter.");

	io::stdin().read_line(&mut String::new())?;
	client.apply_validation_state(&state)?;

	let me: serde_json::Value = client.get("/me").await?;

	println!("Signed in as {}.", me["nichandle"]);

	Ok(())
}
