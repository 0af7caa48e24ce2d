use std::collections::HashMap;

use serde_json::Value;

use super::types::{EgoRecord, Node, NodeId, NodeKey, Player};

/// Node id to display label.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeLabels(HashMap<NodeId, String>);

impl NodeLabels {
	/// Later duplicates of an id replace earlier ones.
	pub fn from_nodes(nodes: Vec<Node>) -> Self {
		Self(nodes.into_iter().map(|node| (node.id, node.label)).collect())
	}

	/// Label for `id`, if known.
	pub fn get(&self, id: &NodeId) -> Option<&str> {
		self.0.get(id).map(String::as_str)
	}

	/// Number of known nodes.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// True before any node is known.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Replaces a numeric key with its label. Unknown ids and keys that are
	/// already labels are left as they are.
	pub fn resolve(&self, key: &mut NodeKey) {
		if let Some(label) = key.id().and_then(|id| self.get(id)) {
			*key = NodeKey::Label(label.to_owned());
		}
	}
}

/// Player id to its ego list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EgoIndex(HashMap<NodeId, Value>);

impl EgoIndex {
	/// Indexes ego lists by player id.
	pub fn from_records(records: Vec<EgoRecord>) -> Self {
		Self(records.into_iter().map(|r| (r.id, r.list)).collect())
	}

	/// Ego list keyed by the original numeric player id.
	pub fn get(&self, id: &NodeId) -> Option<&Value> {
		self.0.get(id)
	}
}

/// Single pass over the player list: attach egos by the original numeric id,
/// then resolve the player id and every neighbor id to labels.
pub fn denormalize(
	mut players: Vec<Player>,
	labels: &NodeLabels,
	egos: Option<&EgoIndex>,
) -> Vec<Player> {
	for player in &mut players {
		if let (Some(egos), Some(id)) = (egos, player.id.id()) {
			if let Some(list) = egos.get(id) {
				player.egos = Some(list.clone());
			}
		}
		labels.resolve(&mut player.id);
		for entry in &mut player.list {
			labels.resolve(&mut entry.n);
		}
	}
	players
}
