use std::time::Duration;

use log::info;
use reqwest::blocking::Client;
use serde::Serialize;

/// Destination of a composed status.
pub trait Publisher {
	fn publish(&self, status: &str) -> Result<(), Box<dyn std::error::Error>>;
}

/// Body of a status creation request.
#[derive(Serialize, Debug, PartialEq)]
pub struct StatusUpdate<'a> {
	pub text: &'a str,
}

/// Prints the status instead of posting it.
pub struct DryRun;

impl Publisher for DryRun {
	fn publish(&self, status: &str) -> Result<(), Box<dyn std::error::Error>> {
		info!("dry run, not posting");
		eprintln!("{status}");
		Ok(())
	}
}

/// Posts statuses to a remote API with a bearer token.
pub struct HttpPublisher {
	client: Client,
	endpoint: String,
	token: String,
}

impl HttpPublisher {
	/// Creates a publisher with a reusable blocking HTTP client.
	pub fn new(endpoint: &str, token: String, timeout: Duration) -> reqwest::Result<Self> {
		let client = Client::builder().timeout(timeout).build()?;
		Ok(Self { client, endpoint: endpoint.to_owned(), token })
	}
}

impl Publisher for HttpPublisher {
	fn publish(&self, status: &str) -> Result<(), Box<dyn std::error::Error>> {
		eprintln!("{status}");
		let response = self.client
			.post(&self.endpoint)
			.bearer_auth(&self.token)
			.json(&StatusUpdate { text: status })
			.send()?
			.error_for_status()?;

		info!("posted status ({})", response.status());
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_body_shape() {
		let body = serde_json::to_string(&StatusUpdate { text: "hello world" }).unwrap();
		assert_eq!(body, r#"{"text":"hello world"}"#);
	}

	#[test]
	fn dry_run_never_fails() {
		assert!(DryRun.publish("hello world").is_ok());
	}

	#[test]
	fn http_publisher_builds_with_timeout() {
		let publisher = HttpPublisher::new("http://127.0.0.1:9/statuses", "token".to_owned(), Duration::from_secs(1));
		assert!(publisher.is_ok());
	}
}
