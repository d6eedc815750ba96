//! Compile-time configuration for the tree view, search and tutorial.

use crate::lineage::GroupPalette;

/// Word whose presence in a member name marks the start of a house.
pub const GROUP_MARKER: &str = "House";

/// Name of the bundled dataset's root. It never receives an incoming edge.
pub const SYNTHETIC_ROOT_NAME: &str = "Great Houses";

/// Maximum number of quick-search results.
pub const SEARCH_LIMIT: usize = 10;

/// Local storage key recording that the guided tour was completed or skipped.
pub const TUTORIAL_SEEN_KEY: &str = "hasSeenTutorial";

/// Viewports at or below this width never show the tutorial.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

pub const NODE_WIDTH: f64 = 200.0;
pub const NODE_HEIGHT: f64 = 80.0;
pub const RANK_SEP: f64 = 100.0;
pub const NODE_SEP: f64 = 50.0;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 1.5;
/// Upper bound for the zoom picked by fit-to-view.
pub const FIT_MAX_ZOOM: f64 = 0.6;
/// Fraction of the viewport kept free around the fitted graph.
pub const FIT_PADDING: f64 = 0.1;

const BLUES: GroupPalette = GroupPalette {
	primary: "#4299E1",
	secondary: "#63B3ED",
	background: "#EBF8FF",
};

const GREENS: GroupPalette = GroupPalette {
	primary: "#2E7D32",
	secondary: "#43A047",
	background: "#E8F5E9",
};

const REDS: GroupPalette = GroupPalette {
	primary: "#E53E3E",
	secondary: "#F56565",
	background: "#FEEFE6",
};

const PURPLES: GroupPalette = GroupPalette {
	primary: "#805AD5",
	secondary: "#A78BFA",
	background: "#F9F5FF",
};

const AMBERS: GroupPalette = GroupPalette {
	primary: "#F59E0B",
	secondary: "#FACC15",
	background: "#FEF3C7",
};

const PINKS: GroupPalette = GroupPalette {
	primary: "#F472B6",
	secondary: "#F9A8D0",
	background: "#FCE7F3",
};

/// Palette for any house missing from [`GROUP_PALETTES`].
pub const DEFAULT_PALETTE: GroupPalette = BLUES;

/// Fixed house to palette assignments.
pub const GROUP_PALETTES: &[(&str, GroupPalette)] = &[
	("House Alder", BLUES),
	("House Birch", GREENS),
	("House Cedar", AMBERS),
	("House Dunmore", PINKS),
	("House Elmsworth", REDS),
	("House Fairweather", PURPLES),
	("House Glenholm", GREENS),
	("House Hawthorne", REDS),
];
