//! Wire-level shapes returned by the crawl backend.

use serde::Deserialize;
use serde_json::Value;

/// A pair of words with a co-occurrence weight.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Edge {
	pub source: String,
	pub target: String,
	pub weight: f64,
}

/// The edge list as returned by the backend. A body without an `edges` field
/// decodes to an empty list.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct GraphData {
	#[serde(default)]
	pub edges: Vec<Edge>,
}

impl GraphData {
	/// Decode an already-parsed JSON body into an edge list.
	pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
		Self::deserialize(value)
	}
}
