//! Lineage data: the bundled tree, its flattened graph and the queries the
//! views run against it.

mod dataset;
mod flatten;
mod group;
mod layout;
mod paths;
mod relations;
mod search;
mod tree;

pub use dataset::{DatasetError, bundled_graph, bundled_tree, parse_tree};
pub use flatten::{GraphEdge, GraphNode, GroupingRules, LineageGraph, flatten};
pub use group::{GroupPalette, group_from_name, palette_for};
pub use layout::{LayoutConfig, LayoutDirection, PositionedGraph, PositionedNode, layout};
pub use paths::{HighlightPaths, PathDirection, connected_ids};
pub use relations::{Relatives, relatives_by_name, relatives_of};
pub use search::{Member, members, search};
pub use tree::TreeNode;
