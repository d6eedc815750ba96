use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use log::debug;

use crate::components::control_panel::ControlPanel;
use crate::components::relatives::RelativesPanel;
use crate::components::tree_canvas::TreeCanvas;
use crate::components::tutorial::Tutorial;
use crate::lineage::{
	GroupingRules, HighlightPaths, LayoutConfig, LayoutDirection, LineageGraph, bundled_graph, layout, relatives_of,
};
use crate::storage::{FlagStore, LocalStorageFlags};

#[component]
fn TreeView(graph: LineageGraph) -> impl IntoView {
	let graph = Arc::new(graph);
	let houses = graph.groups(&GroupingRules::default());

	let filter = RwSignal::new(String::new());
	let house = RwSignal::new(None::<String>);
	let direction = RwSignal::new(LayoutDirection::default());
	let physics = RwSignal::new(false);
	let selected = RwSignal::new(None::<String>);

	if let Some(key) = use_query_map().get_untracked().get("focus") {
		match graph.focus_target(&key) {
			Some(node) => selected.set(Some(node.id.clone())),
			None => debug!("focus target {:?} not in dataset", key),
		}
	}

	let layout_graph = graph.clone();
	let positioned = Memo::new(move |_| {
		let visible = layout_graph.filtered(&filter.get(), house.get().as_deref());
		layout(&visible, direction.get(), &LayoutConfig::default())
	});

	let highlight_graph = graph.clone();
	let highlight = Memo::new(move |_| {
		selected
			.get()
			.map(|id| HighlightPaths::for_node(&highlight_graph.edges, &id))
			.unwrap_or_default()
	});

	let on_select = Callback::new(move |id: String| {
		debug!("toggled selection of {}", id);
		selected.update(|current| {
			*current = if current.as_deref() == Some(id.as_str()) {
				None
			} else {
				Some(id)
			};
		});
	});

	let details_graph = graph.clone();
	let details = move || {
		selected.get().map(|id| {
			view! {
				<RelativesPanel
					relatives=relatives_of(&details_graph, &id)
					on_close=Callback::new(move |_: ()| selected.set(None))
				/>
			}
		})
	};

	let flags: Arc<dyn FlagStore> = Arc::new(LocalStorageFlags);

	view! {
		<div class="flow-container">
			<TreeCanvas
				graph=positioned
				highlight=highlight
				physics=physics
				on_select=on_select
				fullscreen=true
			/>
			<ControlPanel
				filter=filter
				house=house
				direction=direction
				physics=physics
				houses=houses
			/>
			{details}
			<Tutorial store=flags />
		</div>
	}
}

/// The interactive family tree.
#[component]
pub fn TreePage() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! The family tree could not be loaded."</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{bundled_graph().map(|graph| view! { <TreeView graph=graph /> })}
		</ErrorBoundary>
	}
}
