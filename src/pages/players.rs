use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::PlayerCard;
use crate::config::Sources;
use crate::data::{HttpFetch, LoadState, NameFilter, Player, load_into};

/// Player search page. Loads everything once on mount; the list stays empty
/// until the name filter is long enough to match.
#[component]
pub fn Players(#[prop(optional)] sources: Option<Sources>) -> impl IntoView {
	let sources = sources.unwrap_or_default();
	let (state, set_state) = signal(LoadState::Loading);
	let (name_filter, set_name_filter) = signal(String::new());
	let matcher = Memo::new(move |_| name_filter.with(|f| NameFilter::new(f)));

	spawn_local(async move {
		load_into(&HttpFetch, &sources, |data| set_state.set(LoadState::Ready(data))).await;
	});

	let results = move || {
		state.with(|state| match state {
			LoadState::Loading => view! { <p class="status">"Loading players..."</p> }.into_any(),
			LoadState::Ready(data) => {
				let total = data.players.len();
				let matches: Vec<Player> = matcher.with(|matcher| match matcher {
					Some(matcher) => data
						.players
						.iter()
						.filter(|p| matcher.matches(p))
						.cloned()
						.collect(),
					None => Vec::new(),
				});

				view! {
					<p class="status">{format!("{total} players loaded")}</p>
					<ul class="player-list">
						{matches
							.into_iter()
							.map(|player| view! { <li><PlayerCard player /></li> })
							.collect_view()}
					</ul>
				}
				.into_any()
			}
		})
	};

	view! {
		<section class="players">
			<h1>"Similar Players"</h1>
			<input
				type="search"
				class="name-filter"
				placeholder="Search by name (5+ characters)"
				prop:value=name_filter
				on:input=move |ev| set_name_filter.set(event_target_value(&ev))
			/>
			{results}
		</section>
	}
}
