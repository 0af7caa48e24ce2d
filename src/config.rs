//! Where the player data lives.

/// Node dictionary.
pub const NODES_FILE: &str = "nodes.json";
/// Per-player similarity lists.
pub const SIMILARITIES_FILE: &str = "similarities.json";
/// Per-player ego lists.
pub const EGOS_FILE: &str = "egos.json";

/// Endpoints the loader reads. Paths are relative to `base_url`, which is
/// empty by default so they resolve against the hosting page.
#[derive(Clone, Debug, PartialEq)]
pub struct Sources {
	/// Prepended verbatim to every path.
	pub base_url: String,
	/// Path of the node dictionary.
	pub nodes: String,
	/// Path of the similarity lists.
	pub similarities: String,
	/// Ego lists are optional; without them players carry no `egos`.
	pub egos: Option<String>,
}

impl Default for Sources {
	fn default() -> Self {
		Self {
			base_url: String::new(),
			nodes: NODES_FILE.into(),
			similarities: SIMILARITIES_FILE.into(),
			egos: Some(EGOS_FILE.into()),
		}
	}
}

impl Sources {
	/// The default endpoints minus `egos.json`.
	pub fn without_egos() -> Self {
		Self {
			egos: None,
			..Self::default()
		}
	}

	/// Overrides the empty default prefix.
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}

	/// Full url of `nodes.json`.
	pub fn nodes_url(&self) -> String {
		self.url(&self.nodes)
	}

	/// Full url of `similarities.json`.
	pub fn similarities_url(&self) -> String {
		self.url(&self.similarities)
	}

	/// Full url of `egos.json`, unless ego lists are disabled.
	pub fn egos_url(&self) -> Option<String> {
		self.egos.as_deref().map(|path| self.url(path))
	}

	fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}
}
