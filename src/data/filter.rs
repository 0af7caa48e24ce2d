use regex::{Regex, RegexBuilder};

use super::types::Player;

/// Filters shorter than this never match anything.
pub const MIN_FILTER_LEN: usize = 5;

/// Compiled player-name filter.
///
/// The filter text is used as a case-insensitive regular expression against
/// the player's (label-resolved) id. Text that does not compile as a regex is
/// matched as a literal substring instead.
#[derive(Clone, Debug)]
pub struct NameFilter {
	source: String,
	re: Regex,
}

impl NameFilter {
	/// Returns `None` for filters that are too short to match.
	pub fn new(filter: &str) -> Option<Self> {
		if filter.chars().count() < MIN_FILTER_LEN {
			return None;
		}
		let re = RegexBuilder::new(filter)
			.case_insensitive(true)
			.build()
			.or_else(|_| {
				RegexBuilder::new(&regex::escape(filter))
					.case_insensitive(true)
					.build()
			})
			.ok()?;
		Some(Self {
			source: filter.to_owned(),
			re,
		})
	}

	/// Tests the player's id, or its digits when still unresolved.
	pub fn matches(&self, player: &Player) -> bool {
		self.re.is_match(&player.id.to_string())
	}
}

impl PartialEq for NameFilter {
	fn eq(&self, other: &Self) -> bool {
		self.source == other.source
	}
}

/// One-shot form of [`NameFilter`] for a single player.
pub fn search_filter(player: &Player, name_filter: &str) -> bool {
	NameFilter::new(name_filter).is_some_and(|filter| filter.matches(player))
}
