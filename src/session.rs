//! Per-session interaction state: the chosen school and the current selection.

use log::{debug, warn};

use crate::graph::School;
use crate::ids::IdMap;
use crate::present::Selection;

/// The element the canvas reports on click.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickTarget {
	/// A node id.
	Node(String),
	/// A transition id (`source→target`).
	Edge(String),
}

/// Everything a user interaction can change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
	pub school: School,
	pub selection: Selection,
}

impl SessionState {
	pub fn new(school: School) -> Self {
		Self {
			school,
			selection: Selection::None,
		}
	}

	/// Map a clicked element back to a course or transition selection.
	///
	/// Unknown node ids leave the selection untouched. Edge ids that fail to
	/// resolve become [`Selection::Unresolved`].
	pub fn apply_click(&mut self, target: ClickTarget, ids: &IdMap) {
		match target {
			ClickTarget::Node(id) => match ids.name_of(&id) {
				Some(course) => {
					debug!("course-pathways: selected course {course:?}");
					self.selection = Selection::course(course);
				}
				None => warn!("course-pathways: click on unknown node id {id:?}"),
			},
			ClickTarget::Edge(id) => match ids.resolve_edge(&id) {
				Ok((source, target)) => {
					debug!("course-pathways: selected transition {source:?} -> {target:?}");
					self.selection = Selection::Transition { source, target };
				}
				Err(e) => {
					warn!("course-pathways: {e}");
					self.selection = Selection::Unresolved(id);
				}
			},
		}
	}

	pub fn clear(&mut self) {
		self.selection = Selection::None;
	}

	/// Change school. Selections do not carry over between schools.
	pub fn switch_school(&mut self, school: School) {
		if self.school != school {
			self.school = school;
			self.selection = Selection::None;
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn ids() -> IdMap {
		IdMap::assign(&["Algebra I", "Geometry"])
	}

	#[test]
	fn node_and_edge_clicks_are_exclusive() {
		let mut state = SessionState::default();
		state.apply_click(ClickTarget::Node("geometry".into()), &ids());
		assert_eq!(state.selection, Selection::course("Geometry"));

		state.apply_click(ClickTarget::Edge("algebra_i→geometry".into()), &ids());
		assert_eq!(state.selection, Selection::transition("Algebra I", "Geometry"));

		state.apply_click(ClickTarget::Node("algebra_i".into()), &ids());
		assert_eq!(state.selection, Selection::course("Algebra I"));
	}

	#[test]
	fn malformed_edge_id_is_kept_raw() {
		let mut state = SessionState::default();
		state.apply_click(ClickTarget::Edge("algebra_i".into()), &ids());
		assert_eq!(state.selection, Selection::Unresolved("algebra_i".into()));
	}

	#[test]
	fn unknown_node_keeps_selection() {
		let mut state = SessionState::default();
		state.apply_click(ClickTarget::Node("geometry".into()), &ids());
		state.apply_click(ClickTarget::Node("calculus".into()), &ids());
		assert_eq!(state.selection, Selection::course("Geometry"));
	}

	#[test]
	fn clear_and_school_switch_reset_selection() {
		let mut state = SessionState::new(School::RuralHigh);
		state.apply_click(ClickTarget::Node("geometry".into()), &ids());
		state.switch_school(School::RuralHigh);
		assert_eq!(state.selection, Selection::course("Geometry"));

		state.switch_school(School::MagnetHigh);
		assert_eq!(state, SessionState::new(School::MagnetHigh));

		state.apply_click(ClickTarget::Node("geometry".into()), &ids());
		state.clear();
		assert!(state.selection.is_none());
	}
}
