use leptos::prelude::*;
use serde_json::Value;

use crate::data::{Player, SimilarityEntry};

/// One player with the players most similar to them.
#[component]
pub fn PlayerCard(player: Player) -> impl IntoView {
	let Player { id, list, egos } = player;

	view! {
		<article class="player-card">
			<h2>{id.to_string()}</h2>
			<ol class="similar-players">
				{list.into_iter().map(|entry| view! { <SimilarPlayer entry /> }).collect_view()}
			</ol>
			{egos.map(|egos| view! { <EgoList egos /> })}
		</article>
	}
}

#[component]
fn SimilarPlayer(entry: SimilarityEntry) -> impl IntoView {
	view! {
		<li>
			<span class="neighbor">{entry.n.to_string()}</span>
			{entry.score().map(|s| view! { <span class="score">{format_score(s)}</span> })}
		</li>
	}
}

/// Ego entries are opaque, so each is shown as compact JSON.
#[component]
fn EgoList(egos: Value) -> impl IntoView {
	let entries = match egos {
		Value::Array(items) => items,
		other => vec![other],
	};

	view! {
		<details class="ego-list">
			<summary>{format!("Ego network ({})", entries.len())}</summary>
			<ul>
				{entries
					.into_iter()
					.map(|entry| view! { <li><code>{entry.to_string()}</code></li> })
					.collect_view()}
			</ul>
		</details>
	}
}

fn format_score(s: f64) -> String {
	format!("{s:.3}")
}
