//! "Who is related to X" queries over a flattened graph.
//!
//! Both the tree view's detail panel and the quick-search overlay read
//! relatives from here.

use super::flatten::{GraphNode, LineageGraph};

/// A member and the names of its relatives, each list in graph order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Relatives {
	/// `None` when the member was not found.
	pub id: Option<String>,
	/// The member's name, or the name that was looked up.
	pub name: String,
	/// The member's house, if any.
	pub group: Option<String>,
	/// Parents of the parents.
	pub grandbigs: Vec<String>,
	/// Parents.
	pub bigs: Vec<String>,
	/// Other children of the same parents.
	pub siblings: Vec<String>,
	/// Children.
	pub littles: Vec<String>,
	/// Children of the children.
	pub grandlittles: Vec<String>,
}

impl Relatives {
	fn unknown(name: &str) -> Self {
		Self {
			name: name.to_string(),
			..Self::default()
		}
	}
}

fn parents_of<'g>(graph: &'g LineageGraph, id: &str) -> Vec<&'g GraphNode> {
	graph
		.edges
		.iter()
		.filter(|e| e.target == id)
		.filter_map(|e| graph.node(&e.source))
		.collect()
}

fn children_of<'g>(graph: &'g LineageGraph, id: &str) -> Vec<&'g GraphNode> {
	graph
		.edges
		.iter()
		.filter(|e| e.source == id)
		.filter_map(|e| graph.node(&e.target))
		.collect()
}

fn names(nodes: &[&GraphNode]) -> Vec<String> {
	nodes.iter().map(|n| n.name.clone()).collect()
}

/// Relatives of the node `id`. An unknown id yields empty relations.
pub fn relatives_of(graph: &LineageGraph, id: &str) -> Relatives {
	let Some(node) = graph.node(id) else {
		return Relatives::unknown(id);
	};

	let bigs = parents_of(graph, id);
	let grandbigs: Vec<_> = bigs.iter().flat_map(|p| parents_of(graph, &p.id)).collect();
	let littles = children_of(graph, id);
	let grandlittles: Vec<_> = littles
		.iter()
		.flat_map(|c| children_of(graph, &c.id))
		.collect();
	let siblings: Vec<_> = bigs
		.iter()
		.flat_map(|p| children_of(graph, &p.id))
		.filter(|s| s.id != id)
		.collect();

	Relatives {
		id: Some(node.id.clone()),
		name: node.name.clone(),
		group: node.group.clone(),
		grandbigs: names(&grandbigs),
		bigs: names(&bigs),
		siblings: names(&siblings),
		littles: names(&littles),
		grandlittles: names(&grandlittles),
	}
}

/// Relatives of the first member named `name`, in pre-order.
pub fn relatives_by_name(graph: &LineageGraph, name: &str) -> Relatives {
	match graph.find_by_name(name) {
		Some(node) => relatives_of(graph, &node.id),
		None => Relatives::unknown(name),
	}
}
