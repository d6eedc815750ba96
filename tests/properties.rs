use std::collections::{HashMap, HashSet};

use family_tree_canvas::lineage::{
	GroupingRules, HighlightPaths, LayoutConfig, LayoutDirection, PathDirection, TreeNode,
	connected_ids, flatten, group_from_name, layout, members, search,
};
use proptest::prelude::*;

fn name() -> impl Strategy<Value = String> {
	// A tiny alphabet so duplicate names at the same depth are common.
	prop_oneof![
		"[A-D][a-c]{0,2}",
		"House [A-C][a-z]{1,3}",
		"House [A-C][a-z]{1,3} [0-9]",
	]
}

fn tree() -> impl Strategy<Value = TreeNode> {
	let leaf = name().prop_map(TreeNode::leaf);
	leaf.prop_recursive(4, 48, 4, |inner| {
		(name(), prop::collection::vec(inner, 0..4))
			.prop_map(|(name, children)| TreeNode::with_children(name, children))
	})
}

fn rules() -> GroupingRules {
	GroupingRules {
		marker: "House".into(),
		synthetic_root: "Great Houses".into(),
	}
}

#[test]
fn small_house_tree() {
	let tree = TreeNode::with_children(
		"Root",
		vec![TreeNode::with_children(
			"House X A",
			vec![TreeNode::leaf("Member 1")],
		)],
	);
	let graph = flatten(&tree, &rules());
	assert_eq!(graph.nodes.len(), 3);
	assert_eq!(graph.edges.len(), 2);
	let member = graph.find_by_name("Member 1").unwrap();
	assert_eq!(member.group.as_deref(), Some("House X"));
}

proptest! {
	#[test]
	fn one_node_per_tree_node(tree in tree()) {
		let graph = flatten(&tree, &rules());
		prop_assert_eq!(graph.nodes.len(), tree.count());
		prop_assert_eq!(graph.edges.len(), tree.count() - 1);
	}

	#[test]
	fn ids_are_unique_and_edges_closed(tree in tree()) {
		let graph = flatten(&tree, &rules());
		let ids: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
		prop_assert_eq!(ids.len(), graph.nodes.len());
		for edge in &graph.edges {
			prop_assert!(ids.contains(edge.source.as_str()));
			prop_assert!(ids.contains(edge.target.as_str()));
		}
	}

	#[test]
	fn every_node_but_the_root_has_one_parent(tree in tree()) {
		let graph = flatten(&tree, &rules());
		let mut incoming: HashMap<&str, usize> = HashMap::new();
		for edge in &graph.edges {
			*incoming.entry(edge.target.as_str()).or_default() += 1;
		}
		prop_assert_eq!(incoming.get(graph.nodes[0].id.as_str()), None);
		for node in &graph.nodes[1..] {
			prop_assert_eq!(incoming.get(node.id.as_str()), Some(&1));
		}
	}

	#[test]
	fn synthetic_root_has_no_incoming_edge(children in prop::collection::vec(tree(), 0..4)) {
		let tree = TreeNode::with_children("Great Houses", children);
		let graph = flatten(&tree, &rules());
		prop_assert_eq!(graph.edges.len(), tree.count() - 1);
		prop_assert!(graph.edges.iter().all(|e| e.target != graph.nodes[0].id));
	}

	#[test]
	fn groups_come_from_self_or_parent(tree in tree()) {
		let graph = flatten(&tree, &rules());
		let by_id: HashMap<&str, _> = graph.nodes.iter().map(|n| (n.id.as_str(), n)).collect();
		let root = &graph.nodes[0];
		prop_assert_eq!(root.group.clone(), group_from_name(&root.name, "House"));
		for edge in &graph.edges {
			let (parent, child) = (by_id[edge.source.as_str()], by_id[edge.target.as_str()]);
			let expected = group_from_name(&child.name, "House").or_else(|| parent.group.clone());
			prop_assert_eq!(child.group.clone(), expected);
		}
	}

	#[test]
	fn paths_reach_root_and_cover_subtree(tree in tree()) {
		let graph = flatten(&tree, &rules());
		let root = graph.nodes[0].id.clone();
		let everyone = connected_ids(&graph.edges, &root, PathDirection::Descendants);
		prop_assert_eq!(everyone.len(), graph.nodes.len());
		for node in &graph.nodes {
			let up = connected_ids(&graph.edges, &node.id, PathDirection::Ancestors);
			prop_assert!(up.contains(&node.id));
			prop_assert!(up.contains(&root));
			prop_assert_eq!(up.len(), node.depth + 1);
			let paths = HighlightPaths::for_node(&graph.edges, &node.id);
			prop_assert!(paths.contains(&node.id));
		}
	}

	#[test]
	fn search_is_capped_ordered_and_case_insensitive(tree in tree(), term in "[a-dA-D]{1,2}") {
		let graph = flatten(&tree, &rules());
		let roster = members(&graph);
		let hits = search(&roster, &term, 10);
		prop_assert!(hits.len() <= 10);
		let needle = term.to_lowercase();
		let mut last = None;
		for hit in hits {
			prop_assert!(hit.name.to_lowercase().contains(&needle));
			let pos = roster.iter().position(|m| m.id == hit.id);
			prop_assert!(pos > last);
			last = pos;
		}
	}

	#[test]
	fn layout_places_every_node_once(tree in tree(), top_bottom in any::<bool>()) {
		let graph = flatten(&tree, &rules());
		let direction = if top_bottom { LayoutDirection::TopBottom } else { LayoutDirection::LeftRight };
		let placed = layout(&graph, direction, &LayoutConfig::default());
		prop_assert_eq!(placed.nodes.len(), graph.nodes.len());
		prop_assert_eq!(placed.edges.len(), graph.edges.len());
		let spots: HashSet<(i64, i64)> = placed
			.nodes
			.iter()
			.map(|n| ((n.x * 2.0) as i64, (n.y * 2.0) as i64))
			.collect();
		prop_assert_eq!(spots.len(), placed.nodes.len());
	}
}
