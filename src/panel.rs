//! Data behind the details panel.
//!
//! Lookups never fail: an unknown course yields empty lists and `None`.

use std::cmp::Ordering;

use crate::graph::{CourseGraph, Transition};

/// One row of a next-step or came-from list.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
	pub course: String,
	pub probability: f64,
}

/// What the panel shows for a selected course.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CourseDetails {
	pub course: String,
	/// Tracks listing the course, in declaration order.
	pub tracks: Vec<String>,
	/// Share of students repeating the course, when present and positive.
	pub repeat_rate: Option<f64>,
	/// Most likely next courses, highest first.
	pub next_steps: Vec<Step>,
	/// Most common previous courses, highest first.
	pub came_from: Vec<Step>,
}

/// What the panel shows for a selected transition.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionDetails {
	pub source: String,
	pub target: String,
	/// Probability of the first matching edge.
	pub probability: Option<f64>,
	/// Edge-track set of the pair.
	pub tracks: Vec<String>,
}

impl TransitionDetails {
	pub fn is_self_loop(&self) -> bool {
		self.source == self.target
	}
}

/// Highest `top_n` steps, ties kept in edge order.
fn top_steps<'a>(
	edges: impl Iterator<Item = &'a Transition>,
	course_of: impl Fn(&'a Transition) -> &'a str,
	top_n: usize,
) -> Vec<Step> {
	let mut steps: Vec<Step> = edges
		.map(|e| Step {
			course: course_of(e).to_string(),
			probability: e.probability,
		})
		.collect();
	steps.sort_by(|a, b| {
		b.probability
			.partial_cmp(&a.probability)
			.unwrap_or(Ordering::Equal)
	});
	steps.truncate(top_n);
	steps
}

pub fn course_details(graph: &CourseGraph, course: &str, top_n: usize) -> CourseDetails {
	CourseDetails {
		course: course.to_string(),
		tracks: graph
			.node_tracks(course)
			.into_iter()
			.map(str::to_string)
			.collect(),
		repeat_rate: graph.self_loop_probability(course).filter(|p| *p > 0.0),
		next_steps: top_steps(graph.outgoing(course), |e| e.target.as_str(), top_n),
		came_from: top_steps(graph.incoming(course), |e| e.source.as_str(), top_n),
	}
}

pub fn transition_details(graph: &CourseGraph, source: &str, target: &str) -> TransitionDetails {
	TransitionDetails {
		source: source.to_string(),
		target: target.to_string(),
		probability: graph.transition_probability(source, target),
		tracks: graph
			.edge_tracks(source, target)
			.into_iter()
			.map(str::to_string)
			.collect(),
	}
}

/// A labelled share in a placeholder chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Share {
	pub group: &'static str,
	pub share: f64,
}

/// A gender × race cell in the placeholder heat map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrossShare {
	pub gender: &'static str,
	pub race: &'static str,
	pub share: f64,
}

/// Demo numbers for the example charts. Not real data.
pub mod placeholder {
	use super::{CrossShare, Share};

	pub const GENDER: [Share; 2] = [
		Share { group: "Girls", share: 0.52 },
		Share { group: "Boys", share: 0.48 },
	];

	pub const RACE: [Share; 4] = [
		Share { group: "Black", share: 0.28 },
		Share { group: "Latine", share: 0.18 },
		Share { group: "White", share: 0.44 },
		Share { group: "Asian", share: 0.10 },
	];

	pub const GENDER_BY_RACE: [CrossShare; 8] = [
		CrossShare { gender: "Girls", race: "Black", share: 0.15 },
		CrossShare { gender: "Girls", race: "Latine", share: 0.10 },
		CrossShare { gender: "Girls", race: "White", share: 0.22 },
		CrossShare { gender: "Girls", race: "Asian", share: 0.05 },
		CrossShare { gender: "Boys", race: "Black", share: 0.13 },
		CrossShare { gender: "Boys", race: "Latine", share: 0.08 },
		CrossShare { gender: "Boys", race: "White", share: 0.22 },
		CrossShare { gender: "Boys", race: "Asian", share: 0.05 },
	];

	/// Shares sorted largest first, as the bar charts list them.
	pub fn sorted(shares: &[Share]) -> Vec<Share> {
		let mut out = shares.to_vec();
		out.sort_by(|a, b| b.share.total_cmp(&a.share));
		out
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::graph::tests::sample_graph;
	use crate::graph::{GraphDocument, Transition};

	fn courses(steps: &[Step]) -> Vec<(&str, f64)> {
		steps.iter().map(|s| (s.course.as_str(), s.probability)).collect()
	}

	#[test]
	fn course_details_sort_and_skip_self_loops() {
		let d = course_details(&sample_graph(), "Algebra I", 6);
		assert_eq!(d.tracks, ["Regular", "Honors"]);
		assert_eq!(d.repeat_rate, Some(0.2));
		assert_eq!(courses(&d.next_steps), [("Geometry", 0.8)]);
		assert_eq!(courses(&d.came_from), [("Basic Math", 0.6)]);

		let grad = course_details(&sample_graph(), "Graduate", 6);
		assert_eq!(grad.repeat_rate, None);
		assert!(grad.next_steps.is_empty());
		assert_eq!(
			courses(&grad.came_from),
			[("Algebra II", 1.0), ("Geometry", 0.1)]
		);
	}

	#[test]
	fn top_n_truncates_and_keeps_tie_order() {
		let doc = GraphDocument {
			nodes: ["A", "B", "C", "D"].map(String::from).to_vec(),
			edges: vec![
				Transition::new("A", "A", 0.0),
				Transition::new("A", "B", 0.25),
				Transition::new("A", "C", 0.5),
				Transition::new("A", "D", 0.25),
			],
			..Default::default()
		};
		let d = course_details(&CourseGraph::new(doc), "A", 2);
		assert_eq!(courses(&d.next_steps), [("C", 0.5), ("B", 0.25)]);
		assert_eq!(d.repeat_rate, None, "a zero repeat rate is omitted");
	}

	#[test]
	fn unknown_course_is_empty() {
		let d = course_details(&sample_graph(), "Calculus", 6);
		assert_eq!(
			d,
			CourseDetails {
				course: "Calculus".into(),
				..Default::default()
			}
		);
	}

	#[test]
	fn transition_details_report_probability_and_tracks() {
		let g = sample_graph();
		let d = transition_details(&g, "Algebra I", "Geometry");
		assert_eq!(d.probability, Some(0.8));
		assert_eq!(d.tracks, ["Honors"]);
		assert!(!d.is_self_loop());

		let missing = transition_details(&g, "Geometry", "Algebra I");
		assert_eq!(missing.probability, None);
		assert_eq!(missing.tracks, ["Honors"]);

		let repeat = transition_details(&g, "Basic Math", "Basic Math");
		assert!(repeat.is_self_loop());
		assert_eq!(repeat.probability, Some(0.4));
	}

	#[test]
	fn placeholder_bars_sort_descending() {
		let groups: Vec<&str> = placeholder::sorted(&placeholder::RACE)
			.iter()
			.map(|s| s.group)
			.collect();
		assert_eq!(groups, ["White", "Black", "Latine", "Asian"]);
	}
}
