//! First-run guided tour of the tree view.

use std::sync::Arc;

use leptos::ev;
use leptos::prelude::*;
use log::info;

use crate::config::{MOBILE_BREAKPOINT, TUTORIAL_SEEN_KEY};
use crate::storage::FlagStore;

/// Side of the target element the card is placed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
	Center,
	Left,
	Right,
	Top,
	Bottom,
}

pub struct TutorialStep {
	/// CSS selector of the element the step points at.
	pub target: &'static str,
	pub title: &'static str,
	pub content: &'static str,
	pub placement: Placement,
}

pub const TUTORIAL_STEPS: &[TutorialStep] = &[
	TutorialStep {
		target: ".flow-container",
		title: "Welcome to the Family Trees",
		content: "Explore how every member connects to their bigs, littles and houses. \
		          This short tour shows you around.",
		placement: Placement::Center,
	},
	TutorialStep {
		target: ".control-panel",
		title: "Control Panel",
		content: "Use these controls to filter and organize the family tree.",
		placement: Placement::Left,
	},
	TutorialStep {
		target: ".quick-search-link",
		title: "Quick Search",
		content: "Open the dedicated search page to find any member quickly.",
		placement: Placement::Bottom,
	},
	TutorialStep {
		target: ".control-panel select",
		title: "House Filter",
		content: "Filter members by their house to focus on specific lineages.",
		placement: Placement::Top,
	},
	TutorialStep {
		target: ".tree-canvas",
		title: "Family Members",
		content: "Click on any member to see their details, including bigs, littles and siblings.",
		placement: Placement::Right,
	},
	TutorialStep {
		target: ".tree-canvas",
		title: "Navigation",
		content: "Scroll to zoom, drag the background to pan and drag members to move them.",
		placement: Placement::Right,
	},
];

/// Where the tour is. `None` once it has been finished or skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TutorialProgress {
	step: Option<usize>,
	len: usize,
}

impl TutorialProgress {
	/// Start the tour unless `store` records it as already seen.
	pub fn start(store: &dyn FlagStore, len: usize) -> Self {
		let step = (!store.get(TUTORIAL_SEEN_KEY) && len > 0).then_some(0);
		Self { step, len }
	}

	pub fn step(&self) -> Option<usize> {
		self.step
	}

	pub fn is_last(&self) -> bool {
		self.step == Some(self.len.saturating_sub(1))
	}

	/// Advance one step; advancing past the last step completes the tour.
	pub fn next(&mut self, store: &dyn FlagStore) {
		match self.step {
			Some(step) if step + 1 < self.len => self.step = Some(step + 1),
			Some(_) => self.complete(store),
			None => {}
		}
	}

	/// Finish (or skip) the tour and remember that it was seen.
	pub fn complete(&mut self, store: &dyn FlagStore) {
		self.step = None;
		store.set(TUTORIAL_SEEN_KEY, true);
	}
}

fn is_mobile() -> bool {
	web_sys::window()
		.and_then(|w| w.inner_width().ok())
		.and_then(|w| w.as_f64())
		.is_some_and(|w| w <= MOBILE_BREAKPOINT)
}

/// Inline style placing the card next to the step's target element.
fn card_style(step: &TutorialStep) -> String {
	let rect = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.query_selector(step.target).ok().flatten())
		.map(|el| el.get_bounding_client_rect());
	let Some(rect) = rect else {
		return "top: 50%; left: 50%; transform: translate(-50%, -50%);".to_string();
	};
	match step.placement {
		Placement::Center => "top: 50%; left: 50%; transform: translate(-50%, -50%);".to_string(),
		Placement::Left => format!("top: {}px; left: {}px;", rect.top() + 20.0, (rect.left() - 320.0).max(8.0)),
		Placement::Right => format!("top: {}px; left: {}px;", rect.top() + 20.0, rect.left() + 20.0),
		Placement::Top => format!("top: {}px; left: {}px;", (rect.top() - 180.0).max(8.0), rect.left()),
		Placement::Bottom => format!("top: {}px; left: {}px;", rect.bottom() + 20.0, rect.left()),
	}
}

fn highlight_style(step: &TutorialStep) -> Option<String> {
	if step.placement == Placement::Center {
		return None;
	}
	let rect = web_sys::window()?
		.document()?
		.query_selector(step.target)
		.ok()??
		.get_bounding_client_rect();
	Some(format!(
		"top: {}px; left: {}px; width: {}px; height: {}px;",
		rect.top() - 4.0,
		rect.left() - 4.0,
		rect.width() + 8.0,
		rect.height() + 8.0
	))
}

/// Run `f` on every window resize until the current owner is disposed.
fn on_window_resize(f: impl Fn() + 'static) {
	let handle = window_event_listener(ev::resize, move |_| f());
	on_cleanup(move || handle.remove());
}

/// Overlay walking a first-time visitor through the tree view.
#[component]
pub fn Tutorial(store: Arc<dyn FlagStore>) -> impl IntoView {
	let progress = RwSignal::new(TutorialProgress::start(store.as_ref(), TUTORIAL_STEPS.len()));
	let mobile = RwSignal::new(is_mobile());
	on_window_resize(move || mobile.set(is_mobile()));

	let store_next = store.clone();
	let on_next = move |_: ev::MouseEvent| {
		progress.update(|p| p.next(store_next.as_ref()));
		if progress.get_untracked().step().is_none() {
			info!("tutorial finished");
		}
	};
	let store_skip = store;
	let on_skip = move |_: ev::MouseEvent| {
		progress.update(|p| p.complete(store_skip.as_ref()));
		info!("tutorial skipped");
	};

	move || {
		let p = progress.get();
		let index = p.step().filter(|_| !mobile.get())?;
		let step = &TUTORIAL_STEPS[index];
		let next_label = match (index, p.is_last()) {
			(0, _) => "Start Tour",
			(_, true) => "Finish",
			_ => "Next",
		};
		Some(view! {
			<div class="tutorial-overlay">
				{highlight_style(step).map(|style| view! { <div class="tutorial-highlight" style=style></div> })}
				<div class="tutorial-content" class:welcome-message=index == 0 style=card_style(step)>
					<h3>{step.title}</h3>
					<p>{step.content}</p>
					<div class="tutorial-actions">
						<button on:click=on_skip.clone()>"Skip Tutorial"</button>
						<button on:click=on_next.clone()>{next_label}</button>
					</div>
					<div class="tutorial-progress">
						{format!("{} of {}", index + 1, TUTORIAL_STEPS.len())}
					</div>
				</div>
			</div>
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::storage::MemoryFlags;

	#[test]
	fn tour_walks_every_step_then_remembers() {
		let store = MemoryFlags::default();
		let mut progress = TutorialProgress::start(&store, 3);
		assert_eq!(progress.step(), Some(0));
		progress.next(&store);
		progress.next(&store);
		assert!(progress.is_last());
		assert!(!store.get(TUTORIAL_SEEN_KEY));
		progress.next(&store);
		assert_eq!(progress.step(), None);
		assert!(store.get(TUTORIAL_SEEN_KEY));
	}

	#[test]
	fn skipping_marks_the_tour_seen() {
		let store = MemoryFlags::default();
		let mut progress = TutorialProgress::start(&store, TUTORIAL_STEPS.len());
		progress.complete(&store);
		assert_eq!(progress.step(), None);
		assert_eq!(TutorialProgress::start(&store, TUTORIAL_STEPS.len()).step(), None);
	}

	#[test]
	fn seen_tour_never_starts() {
		let store = MemoryFlags::default();
		store.set(TUTORIAL_SEEN_KEY, true);
		let mut progress = TutorialProgress::start(&store, 6);
		progress.next(&store);
		assert_eq!(progress.step(), None);
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
	use std::sync::Arc;
	use std::sync::atomic::{AtomicUsize, Ordering};

	use leptos::reactive::owner::Owner;
	use wasm_bindgen_test::*;

	use super::on_window_resize;

	wasm_bindgen_test_configure!(run_in_browser);

	fn fire_resize() {
		let window = web_sys::window().unwrap();
		window.dispatch_event(&web_sys::Event::new("resize").unwrap()).unwrap();
	}

	#[wasm_bindgen_test]
	fn resize_listener_is_dropped_with_its_owner() {
		let calls = Arc::new(AtomicUsize::new(0));
		let owner = Owner::new();
		let counter = calls.clone();
		owner.with(|| on_window_resize(move || {
			counter.fetch_add(1, Ordering::SeqCst);
		}));

		fire_resize();
		assert_eq!(calls.load(Ordering::SeqCst), 1);

		owner.cleanup();
		fire_resize();
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}
}
