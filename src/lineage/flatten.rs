//! Tree to node/edge list conversion.

use std::collections::HashMap;

use super::group::group_from_name;
use super::tree::TreeNode;
use crate::config::{GROUP_MARKER, SYNTHETIC_ROOT_NAME};

/// Naming conventions applied while flattening.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupingRules {
	/// Word that makes a name open a new house.
	pub marker: String,
	/// Name of the root that never gets an incoming edge.
	pub synthetic_root: String,
}

impl Default for GroupingRules {
	fn default() -> Self {
		Self {
			marker: GROUP_MARKER.to_string(),
			synthetic_root: SYNTHETIC_ROOT_NAME.to_string(),
		}
	}
}

/// One member of the flattened lineage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
	/// Unique id, `"{name}-{depth}"` unless that was taken.
	pub id: String,
	/// Name as written in the source tree.
	pub name: String,
	/// Distance from the root.
	pub depth: usize,
	/// House the member belongs to, inherited from the nearest house above.
	pub group: Option<String>,
}

impl GraphNode {
	/// First display line.
	pub fn label(&self) -> &str {
		&self.name
	}

	/// Second display line: the house, or "Member" for ungrouped nodes.
	pub fn caption(&self) -> &str {
		self.group.as_deref().unwrap_or("Member")
	}
}

/// A parent to child link, `source` being the parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphEdge {
	/// `"e{source}-{target}"`.
	pub id: String,
	/// Parent id.
	pub source: String,
	/// Child id.
	pub target: String,
}

/// Nodes and parent to child edges, both in pre-order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineageGraph {
	/// Members in pre-order.
	pub nodes: Vec<GraphNode>,
	/// Parent to child links in pre-order of the child.
	pub edges: Vec<GraphEdge>,
}

impl LineageGraph {
	/// Node with exactly this id.
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// First node in pre-order carrying `name`.
	pub fn find_by_name(&self, name: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.name == name)
	}

	/// Resolve a `?focus=` value: a node id, or failing that a member name.
	pub fn focus_target(&self, key: &str) -> Option<&GraphNode> {
		self.node(key).or_else(|| self.find_by_name(key))
	}

	/// Distinct houses in order of first appearance. The synthetic root's own
	/// group (which its ungrouped children inherit) is not a house.
	pub fn groups(&self, rules: &GroupingRules) -> Vec<String> {
		let root_group = self
			.nodes
			.first()
			.filter(|n| n.name == rules.synthetic_root)
			.and_then(|n| n.group.as_ref());
		let mut groups: Vec<String> = Vec::new();
		for group in self.nodes.iter().filter_map(|n| n.group.as_ref()) {
			if Some(group) != root_group && !groups.contains(group) {
				groups.push(group.clone());
			}
		}
		groups
	}

	/// Nodes whose name contains `term` (ignoring case) and, when `group` is
	/// given, that belong to it. Edges survive only if both ends do.
	pub fn filtered(&self, term: &str, group: Option<&str>) -> LineageGraph {
		let term = term.to_lowercase();
		let nodes: Vec<GraphNode> = self
			.nodes
			.iter()
			.filter(|n| n.name.to_lowercase().contains(&term))
			.filter(|n| group.is_none_or(|g| n.group.as_deref() == Some(g)))
			.cloned()
			.collect();
		let edges = self
			.edges
			.iter()
			.filter(|e| {
				nodes.iter().any(|n| n.id == e.source) && nodes.iter().any(|n| n.id == e.target)
			})
			.cloned()
			.collect();
		LineageGraph { nodes, edges }
	}
}

/// Flatten `root` into a [`LineageGraph`].
///
/// Ids are `"{name}-{depth}"`. A later node that would reuse an id gets a
/// `~n` suffix so every id stays unique. Cyclic input is not representable
/// by [`TreeNode`], so recursion always terminates.
pub fn flatten(root: &TreeNode, rules: &GroupingRules) -> LineageGraph {
	let mut flattener = Flattener {
		rules,
		graph: LineageGraph::default(),
		seen: HashMap::new(),
	};
	flattener.visit(root, None, 0, None);
	flattener.graph
}

struct Flattener<'a> {
	rules: &'a GroupingRules,
	graph: LineageGraph,
	seen: HashMap<String, usize>,
}

impl Flattener<'_> {
	fn visit(
		&mut self,
		node: &TreeNode,
		parent_id: Option<&str>,
		depth: usize,
		parent_group: Option<&str>,
	) {
		let id = self.unique_id(format!("{}-{}", node.name, depth));
		let group = group_from_name(&node.name, &self.rules.marker)
			.or_else(|| parent_group.map(str::to_string));

		self.graph.nodes.push(GraphNode {
			id: id.clone(),
			name: node.name.clone(),
			depth,
			group: group.clone(),
		});

		if let Some(parent_id) = parent_id {
			if node.name != self.rules.synthetic_root {
				self.graph.edges.push(GraphEdge {
					id: format!("e{}-{}", parent_id, id),
					source: parent_id.to_string(),
					target: id.clone(),
				});
			}
		}

		for child in &node.children {
			self.visit(child, Some(&id), depth + 1, group.as_deref());
		}
	}

	fn unique_id(&mut self, base: String) -> String {
		let count = self.seen.entry(base.clone()).or_insert(0);
		*count += 1;
		if *count == 1 {
			base
		} else {
			format!("{}~{}", base, count)
		}
	}
}
