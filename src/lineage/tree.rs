use serde::Deserialize;

/// One named entity of the bundled lineage tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TreeNode {
	/// Display name; houses carry the grouping marker.
	pub name: String,
	/// Children in order. Missing in the document means none.
	#[serde(default)]
	pub children: Vec<TreeNode>,
}

impl TreeNode {
	/// A childless node.
	pub fn leaf(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			children: Vec::new(),
		}
	}

	/// A node with the given children, in order.
	pub fn with_children(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
		Self {
			name: name.into(),
			children,
		}
	}

	/// Total number of nodes in this subtree, including `self`.
	pub fn count(&self) -> usize {
		1 + self.children.iter().map(TreeNode::count).sum::<usize>()
	}
}
