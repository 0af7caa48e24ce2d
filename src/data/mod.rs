//! Player data: payload types, the load-then-join pipeline and the name filter.

mod filter;
mod join;
mod loader;
mod types;

pub use filter::{NameFilter, search_filter};
pub use join::{EgoIndex, NodeLabels, denormalize};
pub use loader::{Fetch, HttpFetch, LoadError, LoadState, PlayerData, load, load_into};
pub use types::{EgoRecord, Node, NodeId, NodeKey, Player, SimilarityEntry};
