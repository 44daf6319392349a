//! Derivation of the renderable node/link model from the raw edge list.
//!
//! Pure function of its input: node sizes come from endpoint frequencies,
//! link thicknesses from co-occurrence weights, both linearly rescaled into
//! fixed display ranges.

use std::collections::HashMap;

use log::error;

use super::scale::linear_rescale;
use super::types::GraphData;

const NODE_SIZE_MIN: f64 = 10.0;
const NODE_SIZE_MAX: f64 = 50.0;
const LINK_THICKNESS_MIN: f64 = 1.0;
const LINK_THICKNESS_MAX: f64 = 10.0;

/// One distinct word, sized by how often it appears as an edge endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct WordNode {
	pub id: String,
	pub frequency: u32,
	pub size: f64,
}

impl WordNode {
	/// Circle radius in world units.
	pub fn radius(&self) -> f64 {
		self.size / 2.0
	}
}

/// One input edge, endpoints resolved to indices into the node vector.
#[derive(Clone, Debug, PartialEq)]
pub struct WordLink {
	pub source: usize,
	pub target: usize,
	pub weight: f64,
	pub thickness: f64,
}

/// The derived model the renderer consumes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphModel {
	pub nodes: Vec<WordNode>,
	pub links: Vec<WordLink>,
}

impl GraphModel {
	/// Derive nodes and links from the raw edge list.
	pub fn derive(data: &GraphData) -> Self {
		if data.edges.is_empty() {
			return Self::default();
		}

		// Tally endpoint occurrences; a self-loop counts twice. Words keep
		// their first-appearance order so output is deterministic.
		let mut frequency: HashMap<&str, u32> = HashMap::new();
		let mut words: Vec<&str> = Vec::new();
		for edge in &data.edges {
			for word in [edge.source.as_str(), edge.target.as_str()] {
				let count = frequency.entry(word).or_insert(0);
				if *count == 0 {
					words.push(word);
				}
				*count += 1;
			}
		}

		let min_freq = frequency.values().copied().min().unwrap_or(0) as f64;
		let max_freq = frequency.values().copied().max().unwrap_or(0) as f64;

		let nodes: Vec<WordNode> = words
			.iter()
			.map(|&word| {
				let freq = frequency[word];
				WordNode {
					id: word.to_string(),
					frequency: freq,
					size: linear_rescale(freq as f64, min_freq, max_freq, NODE_SIZE_MIN, NODE_SIZE_MAX),
				}
			})
			.collect();

		let index: HashMap<&str, usize> =
			words.iter().enumerate().map(|(i, &w)| (w, i)).collect();

		let min_weight = data
			.edges
			.iter()
			.map(|e| e.weight)
			.fold(f64::INFINITY, f64::min);
		let max_weight = data
			.edges
			.iter()
			.map(|e| e.weight)
			.fold(f64::NEG_INFINITY, f64::max);

		// Duplicate edges stay duplicated; they are distinct links.
		let links: Vec<WordLink> = data
			.edges
			.iter()
			.filter_map(|edge| {
				let (Some(&source), Some(&target)) = (
					index.get(edge.source.as_str()),
					index.get(edge.target.as_str()),
				) else {
					// Cannot happen while nodes derive from the same edges;
					// dropped links are reported, never dereferenced.
					error!(
						"Edge {} -> {} references a word with no node; dropping it",
						edge.source, edge.target
					);
					return None;
				};
				Some(WordLink {
					source,
					target,
					weight: edge.weight,
					thickness: linear_rescale(
						edge.weight,
						min_weight,
						max_weight,
						LINK_THICKNESS_MIN,
						LINK_THICKNESS_MAX,
					),
				})
			})
			.collect();

		Self { nodes, links }
	}

	/// True when there is nothing to lay out or draw.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::word_graph::Edge;

	fn edge(source: &str, target: &str, weight: f64) -> Edge {
		Edge {
			source: source.to_string(),
			target: target.to_string(),
			weight,
		}
	}

	fn model(edges: Vec<Edge>) -> GraphModel {
		GraphModel::derive(&GraphData { edges })
	}

	fn node<'a>(m: &'a GraphModel, id: &str) -> &'a WordNode {
		m.nodes.iter().find(|n| n.id == id).unwrap()
	}

	#[test]
	fn empty_edge_list_derives_empty_model() {
		let m = model(vec![]);
		assert!(m.is_empty());
		assert!(m.nodes.is_empty());
		assert!(m.links.is_empty());
	}

	#[test]
	fn equal_frequencies_give_every_node_max_size() {
		let m = model(vec![edge("a", "b", 1.0), edge("c", "d", 2.0)]);
		assert_eq!(m.nodes.len(), 4);
		for n in &m.nodes {
			assert_eq!(n.frequency, 1);
			assert_eq!(n.size, 50.0);
		}
	}

	#[test]
	fn equal_weights_give_every_link_max_thickness() {
		let m = model(vec![edge("a", "b", 3.0), edge("b", "c", 3.0)]);
		for l in &m.links {
			assert_eq!(l.thickness, 10.0);
		}
	}

	#[test]
	fn frequencies_and_sizes_follow_endpoint_counts() {
		let m = model(vec![edge("a", "b", 1.0), edge("b", "c", 3.0)]);

		let ids: Vec<&str> = m.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["a", "b", "c"]);

		assert_eq!(node(&m, "a").frequency, 1);
		assert_eq!(node(&m, "b").frequency, 2);
		assert_eq!(node(&m, "c").frequency, 1);

		assert!(node(&m, "b").size > node(&m, "a").size);
		assert_eq!(node(&m, "a").size, node(&m, "c").size);
		assert_eq!(node(&m, "b").size, 50.0);
		assert_eq!(node(&m, "a").size, 10.0);
	}

	#[test]
	fn single_edge_hits_the_degenerate_thickness_branch() {
		let m = model(vec![edge("x", "y", 5.0)]);
		assert_eq!(m.nodes.len(), 2);
		assert_eq!(m.links.len(), 1);
		assert_eq!(m.links[0].thickness, 10.0);
		assert_eq!(m.links[0].weight, 5.0);
	}

	#[test]
	fn self_loop_counts_twice_toward_frequency() {
		let m = model(vec![edge("a", "a", 1.0), edge("a", "b", 1.0)]);
		assert_eq!(node(&m, "a").frequency, 3);
		assert_eq!(node(&m, "b").frequency, 1);
	}

	#[test]
	fn duplicate_edges_produce_duplicate_links() {
		let m = model(vec![edge("a", "b", 2.0), edge("a", "b", 2.0)]);
		assert_eq!(m.nodes.len(), 2);
		assert_eq!(m.links.len(), 2);
		assert_eq!(m.links[0], m.links[1]);
	}

	#[test]
	fn links_resolve_to_node_indices() {
		let m = model(vec![edge("a", "b", 1.0), edge("b", "c", 3.0)]);
		for l in &m.links {
			assert!(l.source < m.nodes.len());
			assert!(l.target < m.nodes.len());
		}
		assert_eq!(m.nodes[m.links[1].source].id, "b");
		assert_eq!(m.nodes[m.links[1].target].id, "c");
	}

	#[test]
	fn thickness_scales_between_min_and_max_weight() {
		let m = model(vec![
			edge("a", "b", 1.0),
			edge("b", "c", 3.0),
			edge("c", "d", 5.0),
		]);
		assert_eq!(m.links[0].thickness, 1.0);
		assert_eq!(m.links[1].thickness, 5.5);
		assert_eq!(m.links[2].thickness, 10.0);
	}
}
