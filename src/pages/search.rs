use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::relatives::RelativesPanel;
use crate::config::SEARCH_LIMIT;
use crate::lineage::{LineageGraph, Member, bundled_graph, members, relatives_of, search};

/// Link to the tree view with the member `id` preselected.
fn tree_link(id: &str) -> String {
	format!("/?focus={}", String::from(js_sys::encode_uri_component(id)))
}

#[component]
fn QuickSearch(graph: LineageGraph) -> impl IntoView {
	let roster = Arc::new(members(&graph));
	let graph = Arc::new(graph);
	let term = RwSignal::new(String::new());
	let selected = RwSignal::new(None::<String>);

	let results = move || {
		let hits: Vec<Member> = search(&roster, &term.get(), SEARCH_LIMIT)
			.into_iter()
			.cloned()
			.collect();
		(!hits.is_empty()).then(|| {
			view! {
				<div class="search-results">
					{hits
						.into_iter()
						.map(|member| {
							let id = member.id.clone();
							view! {
								<div
									class="search-result-item"
									on:click=move |_| selected.set(Some(id.clone()))
								>
									<div class="member-name">{member.name}</div>
									{member.group.map(|g| view! { <div class="member-house">{g}</div> })}
								</div>
							}
						})
						.collect_view()}
				</div>
			}
		})
	};

	let details = move || {
		selected.get().map(|id| {
			let href = tree_link(&id);
			let relatives = relatives_of(&graph, &id);
			view! {
				<div class="overlay" on:click=move |_| selected.set(None)></div>
				<RelativesPanel relatives=relatives on_close=Callback::new(move |_: ()| selected.set(None))>
					<A href=href attr:class="show-in-tree">
						"Show in tree"
					</A>
				</RelativesPanel>
			}
		})
	};

	view! {
		<div class="quick-search-container">
			<div class="search-header">
				<A href="/" attr:class="back-button">
					"← Back to Tree"
				</A>
				<h1>"Quick Member Search"</h1>
			</div>
			<div class="search-box">
				<input
					type="text"
					placeholder="Start typing a name..."
					autofocus=true
					prop:value=move || term.get()
					on:input=move |ev| term.set(event_target_value(&ev))
				/>
				{results}
			</div>
			{details}
		</div>
	}
}

/// Standalone member search with a relatives overlay.
#[component]
pub fn SearchPage() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! The member list could not be loaded."</h1>

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
			{bundled_graph().map(|graph| view! { <QuickSearch graph=graph /> })}
		</ErrorBoundary>
	}
}
