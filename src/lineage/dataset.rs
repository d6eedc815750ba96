//! The bundled lineage dataset.

use log::debug;
use thiserror::Error;

use super::flatten::{GroupingRules, LineageGraph, flatten};
use super::tree::TreeNode;

const BUNDLED_TREE: &str = include_str!("../../data/family_tree.json");

/// Failure to read a lineage document.
#[derive(Debug, Error)]
pub enum DatasetError {
	/// The document is not a valid `{ name, children }` tree.
	#[error("malformed lineage document: {0}")]
	Malformed(#[from] serde_json::Error),
}

/// Parse a lineage document (`{ "name": .., "children": [..] }`).
pub fn parse_tree(document: &str) -> Result<TreeNode, DatasetError> {
	Ok(serde_json::from_str(document)?)
}

/// The tree shipped with the application.
pub fn bundled_tree() -> Result<TreeNode, DatasetError> {
	parse_tree(BUNDLED_TREE)
}

/// The bundled tree, flattened with the default grouping rules.
pub fn bundled_graph() -> Result<LineageGraph, DatasetError> {
	let tree = bundled_tree()?;
	let graph = flatten(&tree, &GroupingRules::default());
	debug!(
		"loaded lineage: {} nodes, {} edges",
		graph.nodes.len(),
		graph.edges.len()
	);
	Ok(graph)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::SYNTHETIC_ROOT_NAME;

	#[test]
	fn bundled_tree_parses() {
		let tree = bundled_tree().unwrap();
		assert_eq!(tree.name, SYNTHETIC_ROOT_NAME);
		assert!(!tree.children.is_empty());
	}

	#[test]
	fn bundled_graph_has_one_node_per_member() {
		let tree = bundled_tree().unwrap();
		let graph = bundled_graph().unwrap();
		assert_eq!(graph.nodes.len(), tree.count());
		assert_eq!(graph.edges.len(), tree.count() - 1);
	}

	#[test]
	fn bundled_houses_leave_out_the_synthetic_root() {
		let graph = bundled_graph().unwrap();
		let houses = graph.groups(&GroupingRules::default());
		assert!(!houses.iter().any(|h| h == "Great Houses"));
		assert_eq!(houses.first().map(String::as_str), Some("House Alder"));
		assert!(houses.iter().all(|h| h.starts_with("House ")));
	}

	#[test]
	fn malformed_documents_are_reported() {
		let err = parse_tree(r#"{"children": []}"#).unwrap_err();
		assert!(err.to_string().starts_with("malformed lineage document"));
	}
}
