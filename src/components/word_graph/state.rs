//! Simulation and interaction state for one derived graph model.
//!
//! A `WordGraphState` owns the running `force_graph` simulation for the
//! current edge list; swapping the model drops the whole state, which stops
//! the old simulation.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::model::GraphModel;

/// Zoom factor bounds for the view transform.
pub const ZOOM_MIN: f64 = 0.1;
pub const ZOOM_MAX: f64 = 4.0;

/// Extra world-space margin around a node when hit testing.
const NODE_HIT_MARGIN: f64 = 4.0;
/// Extra world-space margin around a link when hit testing.
const LINK_HIT_MARGIN: f64 = 2.0;

/// Per-node payload carried inside the simulation graph.
#[derive(Clone, Debug, Default)]
pub struct WordInfo {
	pub label: String,
	pub frequency: u32,
	pub size: f64,
}

impl WordInfo {
	/// Circle radius in world units.
	pub fn radius(&self) -> f64 {
		self.size / 2.0
	}
}

/// Render data for one link, endpoints resolved to simulation indices.
#[derive(Clone, Debug)]
pub struct LinkRender {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub source_word: String,
	pub target_word: String,
	pub weight: f64,
	pub thickness: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverTarget {
	Node(DefaultNodeIdx),
	Link(usize),
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub target: Option<HoverTarget>,
	pub tooltip: Option<String>,
	pub cursor_x: f64,
	pub cursor_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

pub struct WordGraphState {
	pub graph: ForceGraph<WordInfo, ()>,
	pub links: Vec<LinkRender>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
}

impl WordGraphState {
	/// Build a fresh simulation from a derived model.
	///
	/// The force configuration approximates the reference layout: strong
	/// pairwise repulsion against spring attraction settles linked nodes
	/// around 80 world units apart, and node mass grows with size so large
	/// nodes drift less. Nodes are seeded on a circle around the canvas
	/// center, which the spring equilibrium then keeps as the layout center.
	pub fn new(model: &GraphModel, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 300.0,
			force_spring: 0.04,
			force_max: 280.0,
			node_speed: 2000.0,
			damping_factor: 0.9,
		});

		let (cx, cy) = (width / 2.0, height / 2.0);
		let mut indices = Vec::with_capacity(model.nodes.len());
		for (i, node) in model.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / model.nodes.len() as f64;
			let idx = graph.add_node(NodeData {
				x: (cx + 150.0 * angle.cos()) as f32,
				y: (cy + 150.0 * angle.sin()) as f32,
				mass: (10.0 + node.size / 5.0) as f32,
				is_anchor: false,
				user_data: WordInfo {
					label: node.id.clone(),
					frequency: node.frequency,
					size: node.size,
				},
			});
			indices.push(idx);
		}

		let links = model
			.links
			.iter()
			.map(|link| {
				let (src, tgt) = (indices[link.source], indices[link.target]);
				graph.add_edge(src, tgt, EdgeData::default());
				LinkRender {
					source: src,
					target: tgt,
					source_word: model.nodes[link.source].id.clone(),
					target_word: model.nodes[link.target].id.clone(),
					weight: link.weight,
					thickness: link.thickness,
				}
			})
			.collect();

		Self {
			graph,
			links,
			transform: ViewTransform {
				x: 0.0,
				y: 0.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
		}
	}

	/// Advance the simulation by one frame.
	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Current world-space positions, keyed by simulation index.
	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		positions
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let hit = node.data.user_data.radius() + NODE_HIT_MARGIN;
			if (dx * dx + dy * dy).sqrt() < hit {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn link_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let positions = self.positions();
		self.links.iter().position(|link| {
			let (Some(&(x1, y1)), Some(&(x2, y2))) =
				(positions.get(&link.source), positions.get(&link.target))
			else {
				return false;
			};
			segment_distance(gx, gy, x1, y1, x2, y2) < link.thickness / 2.0 + LINK_HIT_MARGIN
		})
	}

	/// Update the hover target and its tooltip text. Nodes win over links.
	pub fn set_hover(&mut self, sx: f64, sy: f64) {
		self.hover.cursor_x = sx;
		self.hover.cursor_y = sy;

		let target = self
			.node_at_position(sx, sy)
			.map(HoverTarget::Node)
			.or_else(|| self.link_at_position(sx, sy).map(HoverTarget::Link));

		if self.hover.target == target {
			return;
		}
		self.hover.target = target;
		self.hover.tooltip = target.map(|t| self.tooltip_text(t));
	}

	pub fn clear_hover(&mut self) {
		self.hover.target = None;
		self.hover.tooltip = None;
	}

	fn tooltip_text(&self, target: HoverTarget) -> String {
		match target {
			HoverTarget::Node(idx) => {
				let mut text = String::new();
				self.graph.visit_nodes(|node| {
					if node.index() == idx {
						let info = &node.data.user_data;
						text = format!("{} (frequency: {})", info.label, info.frequency);
					}
				});
				text
			}
			HoverTarget::Link(i) => {
				let link = &self.links[i];
				format!(
					"{} \u{2194} {} (weight: {})",
					link.source_word, link.target_word, link.weight
				)
			}
		}
	}
}

/// Distance from point `(px, py)` to the segment `(x1, y1)-(x2, y2)`.
fn segment_distance(px: f64, py: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
	let (dx, dy) = (x2 - x1, y2 - y1);
	let len_sq = dx * dx + dy * dy;
	let t = if len_sq == 0.0 {
		0.0
	} else {
		(((px - x1) * dx + (py - y1) * dy) / len_sq).clamp(0.0, 1.0)
	};
	let (cx, cy) = (x1 + t * dx, y1 + t * dy);
	((px - cx) * (px - cx) + (py - cy) * (py - cy)).sqrt()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::word_graph::model::{GraphModel, WordLink, WordNode};

	fn sample_model() -> GraphModel {
		let nodes = vec![
			WordNode {
				id: "a".into(),
				frequency: 1,
				size: 10.0,
			},
			WordNode {
				id: "b".into(),
				frequency: 2,
				size: 50.0,
			},
			WordNode {
				id: "c".into(),
				frequency: 1,
				size: 10.0,
			},
		];
		let links = vec![
			WordLink {
				source: 0,
				target: 1,
				weight: 1.0,
				thickness: 1.0,
			},
			WordLink {
				source: 1,
				target: 2,
				weight: 3.0,
				thickness: 10.0,
			},
		];
		GraphModel { nodes, links }
	}

	#[test]
	fn builds_one_sim_node_per_model_node() {
		let state = WordGraphState::new(&sample_model(), 1200.0, 800.0);
		let mut count = 0;
		state.graph.visit_nodes(|_| count += 1);
		assert_eq!(count, 3);
		assert_eq!(state.links.len(), 2);
	}

	#[test]
	fn links_keep_their_words_and_thickness() {
		let state = WordGraphState::new(&sample_model(), 1200.0, 800.0);
		assert_eq!(state.links[1].source_word, "b");
		assert_eq!(state.links[1].target_word, "c");
		assert_eq!(state.links[1].thickness, 10.0);
	}

	#[test]
	fn nodes_are_seeded_around_the_canvas_center() {
		let state = WordGraphState::new(&sample_model(), 1200.0, 800.0);
		state.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - 600.0, node.y() as f64 - 400.0);
			assert!(((dx * dx + dy * dy).sqrt() - 150.0).abs() < 1.0);
		});
	}

	#[test]
	fn screen_to_graph_inverts_the_view_transform() {
		let mut state = WordGraphState::new(&sample_model(), 1200.0, 800.0);
		state.transform = ViewTransform {
			x: 100.0,
			y: 50.0,
			k: 2.0,
		};
		assert_eq!(state.screen_to_graph(100.0, 50.0), (0.0, 0.0));
		assert_eq!(state.screen_to_graph(300.0, 250.0), (100.0, 100.0));
	}

	#[test]
	fn tooltip_describes_hovered_node() {
		let mut state = WordGraphState::new(&sample_model(), 1200.0, 800.0);
		// Hover directly over a node's seeded position.
		let mut target = None;
		state.graph.visit_nodes(|node| {
			if node.data.user_data.label == "b" {
				target = Some((node.x() as f64, node.y() as f64));
			}
		});
		let (x, y) = target.unwrap();
		state.set_hover(x, y);
		assert_eq!(state.hover.tooltip.as_deref(), Some("b (frequency: 2)"));
	}

	#[test]
	fn segment_distance_handles_endpoints_and_interior() {
		assert_eq!(segment_distance(0.0, 5.0, 0.0, 0.0, 10.0, 0.0), 5.0);
		assert_eq!(segment_distance(-3.0, 0.0, 0.0, 0.0, 10.0, 0.0), 3.0);
		assert_eq!(segment_distance(10.0, 0.0, 5.0, 0.0, 5.0, 0.0), 5.0);
	}
}
