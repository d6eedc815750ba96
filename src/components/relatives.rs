use leptos::prelude::*;

use crate::lineage::{Relatives, palette_for};

#[component]
fn RelationSection(title: &'static str, names: Vec<String>) -> impl IntoView {
	(!names.is_empty()).then(|| {
		view! {
			<div class="detail-section">
				<h3>{title}</h3>
				<ul>{names.into_iter().map(|name| view! { <li>{name}</li> }).collect_view()}</ul>
			</div>
		}
	})
}

/// Card listing a member's house and relatives, headed in the house colour.
#[component]
pub fn RelativesPanel(
	relatives: Relatives,
	#[prop(into)] on_close: Callback<()>,
	#[prop(optional)] children: Option<Children>,
) -> impl IntoView {
	let palette = palette_for(relatives.group.as_deref());
	let house = relatives.group.clone().unwrap_or_else(|| "Member".to_string());

	view! {
		<div class="detail-panel">
			<div class="detail-header" style=format!("background: {}", palette.primary)>
				<h2>{relatives.name}</h2>
				<button class="close-button" on:click=move |_| on_close.run(())>
					"×"
				</button>
			</div>
			<div class="detail-content">
				<div class="detail-section">
					<h3>"House"</h3>
					<p>{house}</p>
				</div>
				<RelationSection title="Grandbig" names=relatives.grandbigs />
				<RelationSection title="Big" names=relatives.bigs />
				<RelationSection title="Siblings" names=relatives.siblings />
				<RelationSection title="Littles" names=relatives.littles />
				<RelationSection title="Grandlittles" names=relatives.grandlittles />
				{children.map(|c| c())}
			</div>
		</div>
	}
}
