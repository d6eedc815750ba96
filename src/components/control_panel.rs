use leptos::prelude::*;
use leptos_router::components::A;

use crate::lineage::LayoutDirection;

const ALL_HOUSES: &str = "all";

/// Collapsible panel with the tree view's filters and layout controls.
#[component]
pub fn ControlPanel(
	filter: RwSignal<String>,
	house: RwSignal<Option<String>>,
	direction: RwSignal<LayoutDirection>,
	physics: RwSignal<bool>,
	houses: Vec<String>,
) -> impl IntoView {
	let expanded = RwSignal::new(true);

	let options = houses
		.into_iter()
		.map(|name| {
			let value = name.clone();
			view! { <option value=value>{name}</option> }
		})
		.collect_view();

	view! {
		<div
			class="control-panel"
			class:panel-visible=move || expanded.get()
			class:panel-hidden=move || !expanded.get()
		>
			<div class="control-panel-header" on:click=move |_| expanded.update(|e| *e = !*e)>
				<span class="chevron" class:collapsed=move || !expanded.get()>"▾"</span>
				"Controls"
			</div>
			<div class="control-panel-content" style:display=move || if expanded.get() { "flex" } else { "none" }>
				<A href="/search" attr:class="quick-search-link">
					"Quick Search"
				</A>
				<div class="control-row">
					<input
						type="text"
						placeholder="Filter by name..."
						prop:value=move || filter.get()
						on:input=move |ev| filter.set(event_target_value(&ev))
					/>
					<button on:click=move |_| direction.update(|d| *d = d.toggled())>
						{move || match direction.get() {
							LayoutDirection::LeftRight => "Vertical Layout",
							LayoutDirection::TopBottom => "Horizontal Layout",
						}}
					</button>
				</div>
				<label class="physics-toggle">
					<input
						type="checkbox"
						prop:checked=move || physics.get()
						on:change=move |ev| physics.set(event_target_checked(&ev))
					/>
					"Relax layout"
				</label>
				<select on:change=move |ev| {
					let value = event_target_value(&ev);
					house.set((value != ALL_HOUSES).then_some(value));
				}>
					<option value=ALL_HOUSES selected=move || house.get().is_none()>
						"All Houses"
					</option>
					{options}
				</select>
			</div>
		</div>
	}
}
