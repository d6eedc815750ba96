//! Quick search over the member roster.

use super::flatten::LineageGraph;

/// A searchable member entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
	/// Node id in the flattened graph.
	pub id: String,
	/// Display name, matched by [`search`].
	pub name: String,
	/// House, if any.
	pub group: Option<String>,
}

/// Every node of `graph` as a member, in pre-order.
pub fn members(graph: &LineageGraph) -> Vec<Member> {
	graph
		.nodes
		.iter()
		.map(|n| Member {
			id: n.id.clone(),
			name: n.name.clone(),
			group: n.group.clone(),
		})
		.collect()
}

/// Up to `limit` members whose name contains `term`, ignoring case.
/// An empty term matches nothing.
pub fn search<'m>(members: &'m [Member], term: &str, limit: usize) -> Vec<&'m Member> {
	if term.is_empty() {
		return Vec::new();
	}
	let term = term.to_lowercase();
	members
		.iter()
		.filter(|m| m.name.to_lowercase().contains(&term))
		.take(limit)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::lineage::{GroupingRules, TreeNode, flatten};

	fn roster() -> Vec<Member> {
		let children = (1..=14).map(|i| TreeNode::leaf(format!("Member {}", i))).collect();
		let tree = TreeNode::with_children(
			"Great Houses",
			vec![TreeNode::with_children("House Alder", children)],
		);
		members(&flatten(&tree, &GroupingRules::default()))
	}

	#[test]
	fn members_follow_traversal_order() {
		let roster = roster();
		assert_eq!(roster.len(), 16);
		assert_eq!(roster[0].name, "Great Houses");
		assert_eq!(roster[0].group.as_deref(), Some("Great Houses"));
		assert_eq!(roster[2].name, "Member 1");
		assert_eq!(roster[2].group.as_deref(), Some("House Alder"));
	}

	#[test]
	fn results_are_capped_and_ordered() {
		let roster = roster();
		let hits = search(&roster, "member", 10);
		assert_eq!(hits.len(), 10);
		assert_eq!(hits[0].name, "Member 1");
		assert_eq!(hits[9].name, "Member 10");
	}

	#[test]
	fn matching_ignores_case() {
		let roster = roster();
		let hits: Vec<_> = search(&roster, "MEMBER 1", 10)
			.into_iter()
			.map(|m| m.name.as_str())
			.collect();
		assert_eq!(hits, ["Member 1", "Member 10", "Member 11", "Member 12", "Member 13", "Member 14"]);
	}

	#[test]
	fn empty_term_matches_nothing() {
		assert!(search(&roster(), "", 10).is_empty());
		assert!(search(&roster(), "zz", 10).is_empty());
	}
}
