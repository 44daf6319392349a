//! HTTP client for the external crawl service.
//!
//! The backend is a black box: it accepts a Reddit post URL and answers with a
//! word co-occurrence edge list. Success bodies that do not match that shape
//! are kept as opaque JSON so the raw-data view can still show them.

use log::warn;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::components::word_graph::GraphData;

/// Fixed origin of the crawl backend.
pub const CRAWL_ENDPOINT: &str = "http://localhost:8080/api/crawl";

/// Request body for `POST /api/crawl`.
#[derive(Clone, Debug, Serialize)]
pub struct CrawlRequest {
	/// The Reddit post URL to crawl, already trimmed.
	pub url: String,
}

/// Errors surfaced to the user as a single inline message.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CrawlError {
	/// Empty or whitespace-only input; no request is made.
	#[error("Please enter a Reddit URL")]
	EmptyUrl,
	/// The backend answered with a non-success status.
	#[error("Failed to crawl Reddit post")]
	Status(u16),
	/// Transport or body-decoding failure with a usable message.
	#[error("{0}")]
	Transport(String),
	/// Failure without a usable message.
	#[error("An error occurred")]
	Unknown,
}

impl CrawlError {
	fn from_reqwest(err: reqwest::Error) -> Self {
		let msg = err.to_string();
		if msg.is_empty() {
			Self::Unknown
		} else {
			Self::Transport(msg)
		}
	}
}

/// A successful crawl response: the raw JSON body plus the edge list decoded
/// from it (empty when the body does not carry one).
#[derive(Clone, Debug, PartialEq)]
pub struct CrawlResponse {
	raw: Value,
	graph: GraphData,
}

impl CrawlResponse {
	/// Classify a success body: decode the edge list if the shape matches,
	/// otherwise keep the body opaque and render an empty graph.
	pub fn from_value(raw: Value) -> Self {
		let graph = GraphData::from_value(&raw).unwrap_or_else(|err| {
			warn!("Crawl response is not an edge list: {err}");
			GraphData::default()
		});
		Self { raw, graph }
	}

	/// The decoded edge list, empty for opaque bodies.
	pub fn graph(&self) -> GraphData {
		self.graph.clone()
	}

	/// Pretty-printed raw body for the "Show Raw Data" view.
	pub fn raw_json(&self) -> String {
		serde_json::to_string_pretty(&self.raw).unwrap_or_default()
	}
}

/// Validate and trim the user's input before any request is built.
pub fn prepare_url(input: &str) -> Result<String, CrawlError> {
	let trimmed = input.trim();
	if trimmed.is_empty() {
		Err(CrawlError::EmptyUrl)
	} else {
		Ok(trimmed.to_string())
	}
}

/// Issue the single crawl request. One call per explicit submit; no retries,
/// no timeout, no cancellation.
pub async fn crawl(input: &str) -> Result<CrawlResponse, CrawlError> {
	let url = prepare_url(input)?;

	let response = reqwest::Client::new()
		.post(CRAWL_ENDPOINT)
		.json(&CrawlRequest { url })
		.send()
		.await
		.map_err(CrawlError::from_reqwest)?;

	let status = response.status();
	if !status.is_success() {
		warn!("Crawl request failed with status {status}");
		return Err(CrawlError::Status(status.as_u16()));
	}

	let body: Value = response.json().await.map_err(CrawlError::from_reqwest)?;
	Ok(CrawlResponse::from_value(body))
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn whitespace_only_input_is_rejected() {
		assert_eq!(prepare_url("   \t "), Err(CrawlError::EmptyUrl));
		assert_eq!(prepare_url(""), Err(CrawlError::EmptyUrl));
	}

	#[test]
	fn input_is_trimmed() {
		assert_eq!(
			prepare_url("  https://www.reddit.com/r/rust/x  ").as_deref(),
			Ok("https://www.reddit.com/r/rust/x")
		);
	}

	#[test]
	fn edge_list_body_decodes_into_a_graph() {
		let body = json!({
			"edges": [{ "source": "x", "target": "y", "weight": 5.0 }]
		});
		let response = CrawlResponse::from_value(body);
		assert_eq!(response.graph().edges.len(), 1);
	}

	#[test]
	fn non_edge_list_body_stays_opaque_with_empty_graph() {
		let body = json!({ "message": "nothing to see" });
		let response = CrawlResponse::from_value(body.clone());
		assert!(response.graph().edges.is_empty());
		assert_eq!(
			response.raw_json(),
			serde_json::to_string_pretty(&body).unwrap()
		);
	}

	#[test]
	fn malformed_edges_field_stays_opaque() {
		let response = CrawlResponse::from_value(json!({ "edges": "nope" }));
		assert!(response.graph().edges.is_empty());
	}

	#[test]
	fn error_messages_match_the_ui_contract() {
		assert_eq!(
			CrawlError::EmptyUrl.to_string(),
			"Please enter a Reddit URL"
		);
		assert_eq!(
			CrawlError::Status(500).to_string(),
			"Failed to crawl Reddit post"
		);
		assert_eq!(CrawlError::Unknown.to_string(), "An error occurred");
	}
}
