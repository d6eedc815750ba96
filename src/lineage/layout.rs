//! Layered placement of a flattened lineage.
//!
//! Ranks follow depth in the visible forest. Placement within a rank is left
//! to dugong, which keeps siblings together and parents near their children.

use dugong::graphlib::{Graph, GraphOptions};
use dugong::{EdgeLabel, GraphLabel, NodeLabel, RankDir};
use log::debug;

use super::flatten::{GraphEdge, GraphNode, LineageGraph};
use crate::config::{NODE_HEIGHT, NODE_SEP, NODE_WIDTH, RANK_SEP};

/// Which way ranks flow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutDirection {
	/// Ranks stacked top to bottom.
	TopBottom,
	/// Ranks laid out left to right.
	#[default]
	LeftRight,
}

impl LayoutDirection {
	/// The other direction.
	pub fn toggled(self) -> Self {
		match self {
			LayoutDirection::TopBottom => LayoutDirection::LeftRight,
			LayoutDirection::LeftRight => LayoutDirection::TopBottom,
		}
	}
}

/// Spacing metrics for [`layout`].
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	/// Width of every node box.
	pub node_width: f64,
	/// Height of every node box.
	pub node_height: f64,
	/// Gap between consecutive ranks.
	pub rank_sep: f64,
	/// Gap between neighbours within a rank.
	pub node_sep: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			node_width: NODE_WIDTH,
			node_height: NODE_HEIGHT,
			rank_sep: RANK_SEP,
			node_sep: NODE_SEP,
		}
	}
}

/// A node and the centre it was placed at.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionedNode {
	/// The placed member.
	pub node: GraphNode,
	/// Centre x.
	pub x: f64,
	/// Centre y.
	pub y: f64,
}

/// Output of [`layout`]: placed nodes, the unchanged edges, and the
/// direction used.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionedGraph {
	/// Placed nodes, in input order.
	pub nodes: Vec<PositionedNode>,
	/// Edges, in input order.
	pub edges: Vec<GraphEdge>,
	/// Direction the ranks flow in.
	pub direction: LayoutDirection,
}

fn rank_dir(direction: LayoutDirection) -> RankDir {
	match direction {
		LayoutDirection::TopBottom => RankDir::TB,
		LayoutDirection::LeftRight => RankDir::LR,
	}
}

/// Place every node of `graph` with dugong's layered layout. Node and edge
/// order is preserved.
pub fn layout(graph: &LineageGraph, direction: LayoutDirection, config: &LayoutConfig) -> PositionedGraph {
	let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions {
		multigraph: true,
		compound: false,
		directed: true,
	});
	g.set_graph(GraphLabel {
		rankdir: rank_dir(direction),
		nodesep: config.node_sep,
		ranksep: config.rank_sep,
		marginx: 0.0,
		marginy: 0.0,
		acyclicer: None,
		..Default::default()
	});

	for node in &graph.nodes {
		g.set_node(
			node.id.clone(),
			NodeLabel {
				width: config.node_width,
				height: config.node_height,
				..Default::default()
			},
		);
	}
	for edge in &graph.edges {
		let label = EdgeLabel {
			minlen: 1,
			weight: 1.0,
			..Default::default()
		};
		g.set_edge_named(edge.source.clone(), edge.target.clone(), Some(edge.id.clone()), Some(label));
	}

	if !graph.nodes.is_empty() {
		dugong::layout_dagreish(&mut g);
	}

	let nodes = graph
		.nodes
		.iter()
		.map(|node| {
			let (x, y) = g
				.node(&node.id)
				.map(|n| (n.x.unwrap_or_default(), n.y.unwrap_or_default()))
				.unwrap_or_default();
			PositionedNode {
				node: node.clone(),
				x,
				y,
			}
		})
		.collect();
	debug!("laid out {} nodes ({:?})", graph.nodes.len(), direction);

	PositionedGraph {
		nodes,
		edges: graph.edges.clone(),
		direction,
	}
}
