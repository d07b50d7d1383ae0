//! Load-time consistency checks.
//!
//! Nothing here rejects data: the dashboard draws whatever the file holds.
//! Findings are logged so that inconsistent exports are noticed.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;

use super::CourseGraph;

/// A non-fatal inconsistency in a graph document.
#[derive(Clone, Debug, PartialEq)]
pub enum DataWarning {
	/// A course listed more than once in `nodes`.
	DuplicateCourse(String),
	/// An edge endpoint missing from `nodes`.
	UnknownEdgeCourse { source: String, target: String },
	/// A track member missing from `nodes`.
	UnknownTrackCourse { track: String, course: String },
	/// A position for a course missing from `nodes`.
	UnknownPositionCourse(String),
	/// A probability outside `[0, 1]`.
	ProbabilityOutOfRange {
		source: String,
		target: String,
		probability: f64,
	},
	/// Outgoing probabilities (self-loop included) that do not add up to 1.
	OutgoingSum { course: String, total: f64 },
}

impl fmt::Display for DataWarning {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::DuplicateCourse(c) => write!(f, "course {c:?} is listed more than once"),
			Self::UnknownEdgeCourse { source, target } => {
				write!(f, "edge {source:?} -> {target:?} references an unknown course")
			}
			Self::UnknownTrackCourse { track, course } => {
				write!(f, "track {track:?} lists unknown course {course:?}")
			}
			Self::UnknownPositionCourse(c) => write!(f, "position given for unknown course {c:?}"),
			Self::ProbabilityOutOfRange {
				source,
				target,
				probability,
			} => write!(
				f,
				"edge {source:?} -> {target:?} has probability {probability} outside [0, 1]"
			),
			Self::OutgoingSum { course, total } => {
				write!(f, "outgoing probabilities of {course:?} sum to {total:.3}")
			}
		}
	}
}

impl CourseGraph {
	/// Check the document against the conventions the dashboard assumes.
	///
	/// `sum_tolerance` is the allowed distance of each course's outgoing
	/// probability total from 1. Courses without outgoing edges are skipped.
	pub fn audit(&self, sum_tolerance: f64) -> Vec<DataWarning> {
		let doc = &self.document;
		let mut warnings = Vec::new();

		let mut known: HashSet<&str> = HashSet::with_capacity(doc.nodes.len());
		for course in &doc.nodes {
			if !known.insert(course.as_str()) {
				warnings.push(DataWarning::DuplicateCourse(course.clone()));
			}
		}

		let mut totals: IndexMap<&str, f64> = IndexMap::new();
		for edge in &doc.edges {
			if !known.contains(edge.source.as_str()) || !known.contains(edge.target.as_str()) {
				warnings.push(DataWarning::UnknownEdgeCourse {
					source: edge.source.clone(),
					target: edge.target.clone(),
				});
			}
			if !(0.0..=1.0).contains(&edge.probability) {
				warnings.push(DataWarning::ProbabilityOutOfRange {
					source: edge.source.clone(),
					target: edge.target.clone(),
					probability: edge.probability,
				});
			}
			*totals.entry(edge.source.as_str()).or_insert(0.0) += edge.probability;
		}

		for (track, courses) in &doc.tracks {
			for course in courses {
				if !known.contains(course.as_str()) {
					warnings.push(DataWarning::UnknownTrackCourse {
						track: track.clone(),
						course: course.clone(),
					});
				}
			}
		}

		for course in doc.positions.keys() {
			if !known.contains(course.as_str()) {
				warnings.push(DataWarning::UnknownPositionCourse(course.clone()));
			}
		}

		for (course, total) in totals {
			if (total - 1.0).abs() > sum_tolerance {
				warnings.push(DataWarning::OutgoingSum {
					course: course.to_string(),
					total,
				});
			}
		}

		warnings
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::graph::tests::sample_graph;
	use crate::graph::{GraphDocument, Transition};

	#[test]
	fn consistent_graph_is_clean() {
		assert!(sample_graph().audit(0.02).is_empty());
	}

	#[test]
	fn flags_every_kind_of_inconsistency() {
		let mut doc = GraphDocument {
			nodes: vec!["A".into(), "B".into(), "A".into()],
			edges: vec![
				Transition::new("A", "B", 0.5),
				Transition::new("B", "C", 1.2),
			],
			..Default::default()
		};
		doc.tracks.insert("Regular".into(), vec!["A".into(), "Z".into()]);
		doc.positions.insert("Q".into(), [0.0, 0.0].into());

		let warnings = CourseGraph::new(doc).audit(0.02);
		assert_eq!(
			warnings,
			[
				DataWarning::DuplicateCourse("A".into()),
				DataWarning::UnknownEdgeCourse {
					source: "B".into(),
					target: "C".into()
				},
				DataWarning::ProbabilityOutOfRange {
					source: "B".into(),
					target: "C".into(),
					probability: 1.2
				},
				DataWarning::UnknownTrackCourse {
					track: "Regular".into(),
					course: "Z".into()
				},
				DataWarning::UnknownPositionCourse("Q".into()),
				DataWarning::OutgoingSum {
					course: "A".into(),
					total: 0.5
				},
				DataWarning::OutgoingSum {
					course: "B".into(),
					total: 1.2
				},
			]
		);
	}

	#[test]
	fn tolerance_absorbs_rounding() {
		let doc = GraphDocument {
			nodes: vec!["A".into(), "B".into()],
			edges: vec![Transition::new("A", "A", 0.33), Transition::new("A", "B", 0.66)],
			..Default::default()
		};
		assert!(CourseGraph::new(doc.clone()).audit(0.02).is_empty());
		assert_eq!(CourseGraph::new(doc).audit(0.001).len(), 1);
	}
}
