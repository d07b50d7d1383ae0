//! Course transition graph: the loaded document plus read-only lookups.
//!
//! Every track list returned here follows the declaration order of the
//! document's `tracks` map. The first track listing a course is its primary
//! track, which picks the node color.

mod audit;
mod document;
mod store;

use std::collections::HashSet;

pub use audit::DataWarning;
pub use document::{GraphDocument, Position, Transition};
pub use store::{GraphStore, School};

use crate::ids::IdMap;

/// A school's graph document together with its element ids.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CourseGraph {
	pub document: GraphDocument,
	pub ids: IdMap,
}

impl CourseGraph {
	pub fn new(document: GraphDocument) -> Self {
		let ids = IdMap::assign(&document.nodes);
		Self { document, ids }
	}

	pub fn nodes(&self) -> &[String] {
		&self.document.nodes
	}

	pub fn edges(&self) -> &[Transition] {
		&self.document.edges
	}

	/// Track names in declaration order.
	pub fn track_names(&self) -> impl Iterator<Item = &str> {
		self.document.tracks.keys().map(String::as_str)
	}

	pub fn contains(&self, course: &str) -> bool {
		self.document.nodes.iter().any(|n| n == course)
	}

	pub fn position(&self, course: &str) -> Option<Position> {
		self.document.positions.get(course).copied()
	}

	/// Every track listing `course`. Empty for unlisted courses.
	pub fn node_tracks(&self, course: &str) -> Vec<&str> {
		self.document
			.tracks
			.iter()
			.filter(|(_, courses)| courses.iter().any(|c| c == course))
			.map(|(track, _)| track.as_str())
			.collect()
	}

	/// First track listing `course`.
	pub fn primary_track(&self, course: &str) -> Option<&str> {
		self.document
			.tracks
			.iter()
			.find(|(_, courses)| courses.iter().any(|c| c == course))
			.map(|(track, _)| track.as_str())
	}

	/// Tracks shared by both endpoints, or all tracks of either endpoint when
	/// they share none.
	pub fn edge_tracks(&self, source: &str, target: &str) -> Vec<&str> {
		let src: HashSet<&str> = self.node_tracks(source).into_iter().collect();
		let dst: HashSet<&str> = self.node_tracks(target).into_iter().collect();
		let shared = src.intersection(&dst).next().is_some();

		self.track_names()
			.filter(|t| {
				if shared {
					src.contains(t) && dst.contains(t)
				} else {
					src.contains(t) || dst.contains(t)
				}
			})
			.collect()
	}

	/// Probability of the first `source → target` edge.
	pub fn transition_probability(&self, source: &str, target: &str) -> Option<f64> {
		self.edges()
			.iter()
			.find(|e| e.connects(source, target))
			.map(|e| e.probability)
	}

	/// Share of students repeating `course`, if a self-loop exists.
	pub fn self_loop_probability(&self, course: &str) -> Option<f64> {
		self.transition_probability(course, course)
	}

	/// Non-self transitions leaving `course`, in edge order.
	pub fn outgoing(&self, course: &str) -> impl Iterator<Item = &Transition> {
		self.edges()
			.iter()
			.filter(move |e| e.source == course && !e.is_self_loop())
	}

	/// Non-self transitions entering `course`, in edge order.
	pub fn incoming(&self, course: &str) -> impl Iterator<Item = &Transition> {
		self.edges()
			.iter()
			.filter(move |e| e.target == course && !e.is_self_loop())
	}
}
