//! Confirmation state machine

/// One answer to a "delete this file?" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
	Yes,
	No,
	All,
	NoToAll,
	Quit,
}

impl Decision {
	/// Parse console input. `None` for anything unrecognized, including an
	/// empty line.
	pub fn parse(input: &str) -> Option<Self> {
		let normalized = input.trim().to_lowercase();
		match normalized.as_str() {
			"y" | "yes" => Some(Decision::Yes),
			"n" | "no" => Some(Decision::No),
			"a" | "all" | "yes to all" => Some(Decision::All),
			"l" | "none" | "notoall" | "no to all" => Some(Decision::NoToAll),
			"q" | "quit" => Some(Decision::Quit),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
	Delete,
	Keep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
	#[default]
	Prompting,
	BulkAccept,
	BulkReject,
	Quitting,
	Done,
}

impl Mode {
	/// What happens to the next item without asking, or `None` when a
	/// decision is required.
	pub fn automatic_action(self) -> Option<Action> {
		match self {
			Mode::Prompting => None,
			Mode::BulkAccept => Some(Action::Delete),
			Mode::BulkReject | Mode::Quitting | Mode::Done => Some(Action::Keep),
		}
	}

	/// Apply a decision for the current item.
	pub fn apply(self, decision: Decision) -> (Action, Mode) {
		match decision {
			Decision::Yes => (Action::Delete, self),
			Decision::No => (Action::Keep, self),
			Decision::All => (Action::Delete, Mode::BulkAccept),
			Decision::NoToAll => (Action::Keep, Mode::BulkReject),
			Decision::Quit => (Action::Keep, Mode::Quitting),
		}
	}

	pub fn is_terminal(self) -> bool {
		matches!(self, Mode::Quitting | Mode::Done)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_short_and_long_forms() {
		assert_eq!(Decision::parse("Y"), Some(Decision::Yes));
		assert_eq!(Decision::parse(" no \n"), Some(Decision::No));
		assert_eq!(Decision::parse("A"), Some(Decision::All));
		assert_eq!(Decision::parse("No To All"), Some(Decision::NoToAll));
		assert_eq!(Decision::parse("l"), Some(Decision::NoToAll));
		assert_eq!(Decision::parse("quit"), Some(Decision::Quit));
		assert_eq!(Decision::parse(""), None);
		assert_eq!(Decision::parse("maybe"), None);
	}

	#[test]
	fn transitions() {
		assert_eq!(Mode::Prompting.apply(Decision::Yes), (Action::Delete, Mode::Prompting));
		assert_eq!(Mode::Prompting.apply(Decision::No), (Action::Keep, Mode::Prompting));
		assert_eq!(Mode::Prompting.apply(Decision::All), (Action::Delete, Mode::BulkAccept));
		assert_eq!(Mode::Prompting.apply(Decision::NoToAll), (Action::Keep, Mode::BulkReject));
		assert_eq!(Mode::Prompting.apply(Decision::Quit), (Action::Keep, Mode::Quitting));
	}

	#[test]
	fn bulk_modes_decide_automatically() {
		assert_eq!(Mode::Prompting.automatic_action(), None);
		assert_eq!(Mode::BulkAccept.automatic_action(), Some(Action::Delete));
		assert_eq!(Mode::BulkReject.automatic_action(), Some(Action::Keep));
		assert_eq!(Mode::Quitting.automatic_action(), Some(Action::Keep));
		assert!(Mode::Done.is_terminal());
	}
}
