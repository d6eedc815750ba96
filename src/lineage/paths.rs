//! Ancestor and descendant reachability over the edge list.

use std::collections::HashSet;

use super::flatten::GraphEdge;

/// Which way [`connected_ids`] walks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathDirection {
	/// Follow edges from target to source.
	Ancestors,
	/// Follow edges from source to target.
	Descendants,
}

/// Every id reachable from `start` in `direction`, `start` included.
pub fn connected_ids(edges: &[GraphEdge], start: &str, direction: PathDirection) -> HashSet<String> {
	let mut found = HashSet::from([start.to_string()]);
	let mut pending = vec![start.to_string()];

	while let Some(current) = pending.pop() {
		for edge in edges {
			let next = match direction {
				PathDirection::Ancestors if edge.target == current => &edge.source,
				PathDirection::Descendants if edge.source == current => &edge.target,
				_ => continue,
			};
			if found.insert(next.clone()) {
				pending.push(next.clone());
			}
		}
	}
	found
}

/// The lineage of a selected member: everything above and below it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightPaths {
	/// The member and all of its ancestors.
	pub up: HashSet<String>,
	/// The member and all of its descendants.
	pub down: HashSet<String>,
}

impl HighlightPaths {
	/// Paths through the member `id`.
	pub fn for_node(edges: &[GraphEdge], id: &str) -> Self {
		Self {
			up: connected_ids(edges, id, PathDirection::Ancestors),
			down: connected_ids(edges, id, PathDirection::Descendants),
		}
	}

	/// True when nothing is selected.
	pub fn is_empty(&self) -> bool {
		self.up.is_empty() && self.down.is_empty()
	}

	/// Whether `id` lies on either path.
	pub fn contains(&self, id: &str) -> bool {
		self.up.contains(id) || self.down.contains(id)
	}

	/// Whether both ends of an edge lie on the upward path.
	pub fn edge_up(&self, source: &str, target: &str) -> bool {
		self.up.contains(source) && self.up.contains(target)
	}

	/// Whether both ends of an edge lie on the downward path.
	pub fn edge_down(&self, source: &str, target: &str) -> bool {
		self.down.contains(source) && self.down.contains(target)
	}
}
