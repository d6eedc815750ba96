use crate::config::{DEFAULT_PALETTE, GROUP_PALETTES};

/// Colours used to paint one house.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GroupPalette {
	/// Borders, edges and the ancestor tint.
	pub primary: &'static str,
	/// Descendant and hover tint.
	pub secondary: &'static str,
	/// Resting node fill.
	pub background: &'static str,
}

/// The house a name opens, if it contains `marker`: its first two words.
///
/// `"House Alder Founders"` names `"House Alder"`; `"Ada Lin"` names nothing.
pub fn group_from_name(name: &str, marker: &str) -> Option<String> {
	if !name.contains(marker) {
		return None;
	}
	Some(name.split(' ').take(2).collect::<Vec<_>>().join(" "))
}

/// Palette for a house. Unknown houses and ungrouped members share the default.
pub fn palette_for(group: Option<&str>) -> GroupPalette {
	group
		.and_then(|g| {
			GROUP_PALETTES
				.iter()
				.find(|(name, _)| *name == g)
				.map(|(_, palette)| *palette)
		})
		.unwrap_or(DEFAULT_PALETTE)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn group_takes_first_two_words() {
		assert_eq!(
			group_from_name("House Cedar Founders", "House"),
			Some("House Cedar".to_string())
		);
		assert_eq!(
			group_from_name("House Cedar 2", "House"),
			Some("House Cedar".to_string())
		);
		assert_eq!(group_from_name("House", "House"), Some("House".to_string()));
	}

	#[test]
	fn names_without_marker_have_no_group() {
		assert_eq!(group_from_name("Ada Lin", "House"), None);
		assert_eq!(group_from_name("house cedar", "House"), None);
	}

	#[test]
	fn palette_lookup_is_total() {
		assert_eq!(palette_for(Some("House Birch")).primary, "#2E7D32");
		assert_eq!(palette_for(Some("House Nowhere")), DEFAULT_PALETTE);
		assert_eq!(palette_for(None), DEFAULT_PALETTE);
	}
}
