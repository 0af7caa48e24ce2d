use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

/// Node identifier as written by the data export.
///
/// Any JSON number is accepted. Integral values, including ones written as
/// floats (`1.0`), share one key; anything else keys on its number text and
/// simply never matches an integral id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(IdRepr);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum IdRepr {
	Int(i64),
	Other(String),
}

impl NodeId {
	/// An integral id.
	pub const fn new(id: i64) -> Self {
		Self(IdRepr::Int(id))
	}

	fn from_number(n: &Number) -> Self {
		if let Some(i) = n.as_i64() {
			return Self(IdRepr::Int(i));
		}
		match n.as_f64() {
			Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
				Self(IdRepr::Int(f as i64))
			}
			_ => Self(IdRepr::Other(n.to_string())),
		}
	}
}

impl From<i64> for NodeId {
	fn from(id: i64) -> Self {
		Self::new(id)
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.0 {
			IdRepr::Int(id) => write!(f, "{id}"),
			IdRepr::Other(text) => f.write_str(text),
		}
	}
}

impl<'de> Deserialize<'de> for NodeId {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		Number::deserialize(deserializer).map(|n| Self::from_number(&n))
	}
}

impl Serialize for NodeId {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match &self.0 {
			IdRepr::Int(id) => serializer.serialize_i64(*id),
			IdRepr::Other(text) => match text.parse::<Number>() {
				Ok(n) => n.serialize(serializer),
				Err(_) => serializer.serialize_str(text),
			},
		}
	}
}

/// One entry of `nodes.json`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Node {
	/// Node id.
	pub id: NodeId,
	/// Display name.
	pub label: String,
}

/// A node reference that is either still numeric or already resolved to its label.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum NodeKey {
	/// Not (yet) resolved.
	Id(NodeId),
	/// Resolved display name.
	Label(String),
}

impl NodeKey {
	/// The numeric id, if this key has not been resolved.
	pub fn id(&self) -> Option<&NodeId> {
		match self {
			NodeKey::Id(id) => Some(id),
			NodeKey::Label(_) => None,
		}
	}
}

impl fmt::Display for NodeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NodeKey::Id(id) => write!(f, "{id}"),
			NodeKey::Label(label) => f.write_str(label),
		}
	}
}

/// One neighbor in a player's similarity list.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SimilarityEntry {
	/// Neighbor node.
	pub n: NodeKey,
	/// Every other field (the score `s` among them), kept verbatim.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl SimilarityEntry {
	/// The similarity score, when `s` is present and numeric.
	pub fn score(&self) -> Option<f64> {
		self.extra.get("s").and_then(Value::as_f64)
	}
}

/// One entry of `similarities.json`, and after the join one row of the view.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Player {
	/// Numeric on load, the label after the join.
	pub id: NodeKey,
	/// Most similar players first.
	pub list: Vec<SimilarityEntry>,
	/// Ego entries, attached during the join.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub egos: Option<Value>,
}

/// One entry of `egos.json`. The list is passed through untouched.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct EgoRecord {
	/// Player id.
	pub id: NodeId,
	/// Opaque ego entries.
	pub list: Value,
}
