//! Boolean flags that outlive a page load.

use std::collections::HashMap;
use std::sync::Mutex;

use log::warn;
use web_sys::Storage;

/// A small key/flag store handed to components that remember things.
pub trait FlagStore: Send + Sync {
	/// Whether `key` is set. Unknown keys are unset.
	fn get(&self, key: &str) -> bool;
	/// Set or clear `key`.
	fn set(&self, key: &str, value: bool);
}

/// Flags kept in the browser's `localStorage`.
///
/// A key counts as set when it holds any value at all; clearing removes it.
/// Missing storage (private mode, no window) reads as unset and drops writes.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageFlags;

/// Reading of a raw `localStorage` item.
fn stored_flag(item: Option<String>) -> bool {
	item.is_some()
}

impl LocalStorageFlags {
	fn storage() -> Option<Storage> {
		let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
		if storage.is_none() {
			warn!("localStorage unavailable, flags will not persist");
		}
		storage
	}
}

impl FlagStore for LocalStorageFlags {
	fn get(&self, key: &str) -> bool {
		stored_flag(Self::storage().and_then(|s| s.get_item(key).ok().flatten()))
	}

	fn set(&self, key: &str, value: bool) {
		let Some(storage) = Self::storage() else {
			return;
		};
		let result = if value {
			storage.set_item(key, "true")
		} else {
			storage.remove_item(key)
		};
		if result.is_err() {
			warn!("failed to write flag {}", key);
		}
	}
}

/// In-memory flags, for tests and for environments without storage.
#[derive(Debug, Default)]
pub struct MemoryFlags {
	flags: Mutex<HashMap<String, bool>>,
}

impl FlagStore for MemoryFlags {
	fn get(&self, key: &str) -> bool {
		self.flags
			.lock()
			.map(|flags| flags.get(key).copied().unwrap_or(false))
			.unwrap_or(false)
	}

	fn set(&self, key: &str, value: bool) {
		if let Ok(mut flags) = self.flags.lock() {
			flags.insert(key.to_string(), value);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn any_stored_value_counts_as_seen() {
		assert!(stored_flag(Some("true".into())));
		assert!(stored_flag(Some("false".into())));
		assert!(stored_flag(Some(String::new())));
		assert!(!stored_flag(None));
	}

	#[test]
	fn memory_flags_default_to_unset() {
		let flags = MemoryFlags::default();
		assert!(!flags.get("seen"));
		flags.set("seen", true);
		assert!(flags.get("seen"));
		flags.set("seen", false);
		assert!(!flags.get("seen"));
	}
}
