//! What the user currently has selected.

/// At most one selected course or transition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
	#[default]
	None,
	Course(String),
	Transition { source: String, target: String },
	/// A clicked transition id that could not be mapped back to two courses.
	/// Derives like [`Selection::None`]; the details panel shows the raw id.
	Unresolved(String),
}

impl Selection {
	pub fn course(name: impl Into<String>) -> Self {
		Self::Course(name.into())
	}

	pub fn transition(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self::Transition {
			source: source.into(),
			target: target.into(),
		}
	}

	pub fn is_none(&self) -> bool {
		matches!(self, Self::None)
	}

	pub fn selected_course(&self) -> Option<&str> {
		match self {
			Self::Course(c) => Some(c),
			_ => None,
		}
	}

	pub fn selected_transition(&self) -> Option<(&str, &str)> {
		match self {
			Self::Transition { source, target } => Some((source, target)),
			_ => None,
		}
	}
}
