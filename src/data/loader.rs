use futures::try_join;
use gloo_net::http::Request;
use log::{debug, error, info};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::join::{EgoIndex, NodeLabels, denormalize};
use super::types::{EgoRecord, Node, Player};
use crate::config::Sources;

/// Why the player data could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
	/// The browser could not complete the request or read its body.
	#[error("request for {url} failed: {source}")]
	Request {
		/// Requested url.
		url: String,
		/// Underlying error.
		#[source]
		source: gloo_net::Error,
	},

	/// Non-2xx response other than 404.
	#[error("{url} returned HTTP {status}")]
	Status {
		/// Requested url.
		url: String,
		/// HTTP status code.
		status: u16,
	},

	/// The body is not the JSON shape expected.
	#[error("could not decode {url}: {source}")]
	Decode {
		/// Requested url.
		url: String,
		/// Underlying error.
		#[source]
		source: serde_json::Error,
	},

	/// Nothing is served at this url (HTTP 404).
	#[error("no resource at {url}")]
	Missing {
		/// Requested url.
		url: String,
	},
}

/// Source of JSON documents.
#[allow(async_fn_in_trait)]
pub trait Fetch {
	/// Fetches `url` and decodes its body as JSON.
	async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, LoadError>;
}

/// Browser `fetch` through gloo-net.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpFetch;

impl Fetch for HttpFetch {
	async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, LoadError> {
		let request_failed = |source| LoadError::Request {
			url: url.to_owned(),
			source,
		};
		let response = Request::get(url).send().await.map_err(request_failed)?;
		check_status(url, response.status())?;
		let body = response.text().await.map_err(request_failed)?;
		serde_json::from_str(&body).map_err(|source| LoadError::Decode {
			url: url.to_owned(),
			source,
		})
	}
}

fn check_status(url: &str, status: u16) -> Result<(), LoadError> {
	match status {
		200..=299 => Ok(()),
		404 => Err(LoadError::Missing {
			url: url.to_owned(),
		}),
		status => Err(LoadError::Status {
			url: url.to_owned(),
			status,
		}),
	}
}

/// Everything the view needs once loading is done.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerData {
	/// Node id to label.
	pub nodes: NodeLabels,
	/// Joined player list.
	pub players: Vec<Player>,
}

/// Loading happens once; there is no way back from `Ready`.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadState {
	/// Waiting on at least one request.
	#[default]
	Loading,
	/// Everything fetched and joined.
	Ready(PlayerData),
}

/// Fetches every configured resource concurrently and joins them once all
/// have arrived. The first failure aborts the whole load.
pub async fn load<F: Fetch>(fetch: &F, sources: &Sources) -> Result<PlayerData, LoadError> {
	let nodes_url = sources.nodes_url();
	let similarities_url = sources.similarities_url();
	let egos_url = sources.egos_url();
	debug!(
		"requesting {nodes_url}, {similarities_url}{}",
		egos_url.as_deref().map(|u| format!(", {u}")).unwrap_or_default()
	);

	let nodes = async {
		let nodes: Vec<Node> = fetch.get_json(&nodes_url).await?;
		Ok::<_, LoadError>(NodeLabels::from_nodes(nodes))
	};
	let players = fetch.get_json::<Vec<Player>>(&similarities_url);
	let egos = async {
		let Some(url) = &egos_url else {
			return Ok(None);
		};
		let records: Vec<EgoRecord> = fetch.get_json(url).await?;
		Ok::<_, LoadError>(Some(EgoIndex::from_records(records)))
	};

	let (nodes, players, egos) = try_join!(nodes, players, egos)?;
	let players = denormalize(players, &nodes, egos.as_ref());
	info!("{} players ready ({} nodes)", players.len(), nodes.len());
	Ok(PlayerData { nodes, players })
}

/// Runs [`load`] and hands the joined data to `on_ready`. A failure is only
/// logged; `on_ready` is never called and the caller stays in `Loading`.
pub async fn load_into<F: Fetch>(
	fetch: &F,
	sources: &Sources,
	on_ready: impl FnOnce(PlayerData),
) {
	match load(fetch, sources).await {
		Ok(data) => on_ready(data),
		Err(err) => error!("player data unavailable: {err}"),
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::collections::HashMap;
	use std::future::Future;
	use std::pin::Pin;
	use std::task::{Context, Poll};

	use futures::executor::block_on;
	use serde_json::json;

	use super::*;
	use crate::data::types::{NodeId, NodeKey};

	/// In-memory documents keyed by url. Every request yields once before
	/// answering so concurrent requests interleave.
	#[derive(Default)]
	struct MemoryFetch {
		bodies: HashMap<String, String>,
		log: RefCell<Vec<String>>,
	}

	impl MemoryFetch {
		fn with(mut self, url: &str, body: serde_json::Value) -> Self {
			self.bodies.insert(url.to_owned(), body.to_string());
			self
		}

		fn with_raw(mut self, url: &str, body: &str) -> Self {
			self.bodies.insert(url.to_owned(), body.to_owned());
			self
		}

		fn log(&self) -> Vec<String> {
			self.log.borrow().clone()
		}
	}

	struct YieldOnce(bool);

	impl Future for YieldOnce {
		type Output = ();

		fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
			if self.0 {
				Poll::Ready(())
			} else {
				self.0 = true;
				cx.waker().wake_by_ref();
				Poll::Pending
			}
		}
	}

	impl Fetch for MemoryFetch {
		async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, LoadError> {
			self.log.borrow_mut().push(format!("start {url}"));
			YieldOnce(false).await;
			self.log.borrow_mut().push(format!("end {url}"));
			let body = self.bodies.get(url).ok_or_else(|| LoadError::Missing {
				url: url.to_owned(),
			})?;
			serde_json::from_str(body).map_err(|source| LoadError::Decode {
				url: url.to_owned(),
				source,
			})
		}
	}

	fn alice_and_bob() -> MemoryFetch {
		MemoryFetch::default()
			.with(
				"nodes.json",
				json!([{ "id": 1, "label": "Alice" }, { "id": 2, "label": "Bob" }]),
			)
			.with(
				"similarities.json",
				json!([
					{ "id": 1, "list": [{ "n": 2, "s": 0.9 }] },
					{ "id": 3, "list": [{ "n": 1, "s": 0.4 }] }
				]),
			)
	}

	#[test]
	fn joins_without_egos() {
		let fetch = alice_and_bob();
		let data = block_on(load(&fetch, &Sources::without_egos())).unwrap();

		assert_eq!(data.nodes.get(&NodeId::new(1)), Some("Alice"));
		assert_eq!(data.players.len(), 2);
		assert_eq!(data.players[0].id, NodeKey::Label("Alice".into()));
		assert_eq!(data.players[0].list[0].n, NodeKey::Label("Bob".into()));
		assert_eq!(data.players[1].id, NodeKey::Id(NodeId::new(3)));
		assert!(data.players.iter().all(|p| p.egos.is_none()));
		assert!(!fetch.log().iter().any(|line| line.contains("egos.json")));
	}

	#[test]
	fn joins_with_egos() {
		let fetch = alice_and_bob().with("egos.json", json!([{ "id": 1, "list": [[1, 1, 5]] }]));
		let data = block_on(load(&fetch, &Sources::default())).unwrap();

		assert_eq!(data.players[0].egos, Some(json!([[1, 1, 5]])));
		assert_eq!(data.players[1].egos, None);
	}

	#[test]
	fn all_requests_are_issued_before_any_completes() {
		let fetch = alice_and_bob().with("egos.json", json!([]));
		block_on(load(&fetch, &Sources::default())).unwrap();

		let log = fetch.log();
		let first_end = log.iter().position(|l| l.starts_with("end")).unwrap();
		assert_eq!(first_end, 3, "{log:?}");
		assert_eq!(log.iter().filter(|l| l.starts_with("start")).count(), 3);
	}

	#[test]
	fn missing_resource_fails_the_load() {
		let fetch = alice_and_bob();
		let err = block_on(load(&fetch, &Sources::default())).unwrap_err();
		assert!(matches!(err, LoadError::Missing { ref url } if url == "egos.json"));
	}

	#[test]
	fn malformed_resource_fails_the_load() {
		let fetch = alice_and_bob().with_raw("egos.json", "{not json");
		let err = block_on(load(&fetch, &Sources::default())).unwrap_err();
		assert!(matches!(err, LoadError::Decode { .. }));
		assert!(err.to_string().starts_with("could not decode egos.json"));
	}

	#[test]
	fn base_url_prefixes_every_request() {
		let fetch = MemoryFetch::default()
			.with("/data/nodes.json", json!([]))
			.with("/data/similarities.json", json!([]));
		let data =
			block_on(load(&fetch, &Sources::without_egos().with_base_url("/data/"))).unwrap();
		assert_eq!(data, PlayerData::default());
	}

	#[test]
	fn not_found_maps_to_missing() {
		assert!(check_status("nodes.json", 200).is_ok());
		assert!(check_status("nodes.json", 204).is_ok());
		assert!(matches!(
			check_status("egos.json", 404),
			Err(LoadError::Missing { ref url }) if url == "egos.json"
		));
		assert!(matches!(
			check_status("egos.json", 500),
			Err(LoadError::Status { status: 500, .. })
		));
	}

	#[test]
	fn failed_load_stays_loading() {
		let mut state = LoadState::Loading;
		let fetch = alice_and_bob();
		block_on(load_into(&fetch, &Sources::default(), |data| {
			state = LoadState::Ready(data)
		}));
		assert_eq!(state, LoadState::Loading);
	}

	#[test]
	fn successful_load_becomes_ready() {
		let mut state = LoadState::Loading;
		let fetch = alice_and_bob();
		block_on(load_into(&fetch, &Sources::without_egos(), |data| {
			state = LoadState::Ready(data)
		}));
		assert!(matches!(state, LoadState::Ready(ref data) if data.players.len() == 2));
	}
}
