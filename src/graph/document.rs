//! The per-school graph document as stored on disk.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An observed transition between two courses.
///
/// Encoded in JSON as `[source, target, probability]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, String, f64)", into = "(String, String, f64)")]
pub struct Transition {
	pub source: String,
	pub target: String,
	/// Fraction of students in `source` who take `target` next, in `[0, 1]`.
	pub probability: f64,
}

impl Transition {
	pub fn new(source: impl Into<String>, target: impl Into<String>, probability: f64) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			probability,
		}
	}

	/// Students repeating the same course.
	pub fn is_self_loop(&self) -> bool {
		self.source == self.target
	}

	/// Whether either endpoint is `course`.
	pub fn touches(&self, course: &str) -> bool {
		self.source == course || self.target == course
	}

	/// Whether this is exactly `source → target`.
	pub fn connects(&self, source: &str, target: &str) -> bool {
		self.source == source && self.target == target
	}
}

impl From<(String, String, f64)> for Transition {
	fn from((source, target, probability): (String, String, f64)) -> Self {
		Self {
			source,
			target,
			probability,
		}
	}
}

impl From<Transition> for (String, String, f64) {
	fn from(t: Transition) -> Self {
		(t.source, t.target, t.probability)
	}
}

/// A fixed canvas coordinate, encoded as `[x, y]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

impl From<[f64; 2]> for Position {
	fn from([x, y]: [f64; 2]) -> Self {
		Self { x, y }
	}
}

impl From<Position> for [f64; 2] {
	fn from(p: Position) -> Self {
		[p.x, p.y]
	}
}

/// Nodes, transitions, track groupings and optional fixed positions for one
/// school. Track and position maps keep the order they were declared in.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
	pub nodes: Vec<String>,
	pub edges: Vec<Transition>,
	#[serde(default)]
	pub tracks: IndexMap<String, Vec<String>>,
	#[serde(default)]
	pub positions: IndexMap<String, Position>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_array_encoded_edges_and_positions() {
		let doc: GraphDocument = serde_json::from_str(
			r#"{
				"nodes": ["Algebra I", "Geometry"],
				"edges": [["Algebra I", "Algebra I", 0.2], ["Algebra I", "Geometry", 0.8]],
				"tracks": { "Regular": ["Algebra I"], "Honors": ["Algebra I", "Geometry"] },
				"positions": { "Geometry": [120, -40.5] }
			}"#,
		)
		.unwrap();

		assert_eq!(doc.edges[0], Transition::new("Algebra I", "Algebra I", 0.2));
		assert!(doc.edges[0].is_self_loop());
		assert!(doc.edges[1].connects("Algebra I", "Geometry"));
		assert_eq!(
			doc.tracks.keys().collect::<Vec<_>>(),
			["Regular", "Honors"]
		);
		assert_eq!(doc.positions["Geometry"], Position { x: 120.0, y: -40.5 });
	}

	#[test]
	fn tracks_and_positions_are_optional() {
		let doc: GraphDocument =
			serde_json::from_str(r#"{ "nodes": ["Graduate"], "edges": [] }"#).unwrap();
		assert!(doc.tracks.is_empty());
		assert!(doc.positions.is_empty());
	}

	#[test]
	fn short_edge_arrays_are_rejected() {
		let res = serde_json::from_str::<GraphDocument>(
			r#"{ "nodes": [], "edges": [["Algebra I", "Geometry"]] }"#,
		);
		assert!(res.is_err());
	}
}
