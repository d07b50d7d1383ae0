//! Bundled school data and the per-session graph cache.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use log::{info, warn};

use super::{CourseGraph, GraphDocument};
use crate::error::GraphError;

/// Schools with bundled transition data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum School {
	#[default]
	RuralHigh,
	MagnetHigh,
}

impl School {
	/// Picker order.
	pub const ALL: [School; 2] = [School::RuralHigh, School::MagnetHigh];

	pub fn name(self) -> &'static str {
		match self {
			School::RuralHigh => "Rural High",
			School::MagnetHigh => "Magnet High",
		}
	}

	/// Stable key, also the data file stem.
	pub fn key(self) -> &'static str {
		match self {
			School::RuralHigh => "rural_high",
			School::MagnetHigh => "magnet_high",
		}
	}

	pub fn from_key(key: &str) -> Result<Self, GraphError> {
		Self::ALL
			.into_iter()
			.find(|s| s.key() == key)
			.ok_or_else(|| GraphError::UnknownSchool(key.to_string()))
	}

	fn source(self) -> &'static str {
		match self {
			School::RuralHigh => include_str!("../../data/rural_high.json"),
			School::MagnetHigh => include_str!("../../data/magnet_high.json"),
		}
	}
}

impl fmt::Display for School {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Parses each school's graph on first use and keeps it for the session.
#[derive(Debug)]
pub struct GraphStore {
	cache: Mutex<HashMap<School, Arc<CourseGraph>>>,
	sum_tolerance: f64,
}

impl GraphStore {
	/// `sum_tolerance` is handed to [`CourseGraph::audit`] after each load.
	pub fn new(sum_tolerance: f64) -> Self {
		Self {
			cache: Mutex::new(HashMap::new()),
			sum_tolerance,
		}
	}

	pub fn load(&self, school: School) -> Result<Arc<CourseGraph>, GraphError> {
		let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
		if let Some(graph) = cache.get(&school) {
			return Ok(graph.clone());
		}
		let graph = Arc::new(self.load_str(school.name(), school.source())?);
		cache.insert(school, graph.clone());
		Ok(graph)
	}

	/// Parse and audit a graph document from JSON text. Not cached.
	pub fn load_str(&self, origin: &str, json: &str) -> Result<CourseGraph, GraphError> {
		let document: GraphDocument =
			serde_json::from_str(json).map_err(|e| GraphError::Parse {
				school: origin.to_string(),
				source: Arc::new(e),
			})?;
		let graph = CourseGraph::new(document);
		info!(
			"course-pathways: loaded {origin}: {} courses, {} transitions, {} tracks",
			graph.nodes().len(),
			graph.edges().len(),
			graph.document.tracks.len()
		);
		for warning in graph.audit(self.sum_tolerance) {
			warn!("course-pathways: {origin}: {warning}");
		}
		Ok(graph)
	}
}

impl Default for GraphStore {
	fn default() -> Self {
		Self::new(crate::config::DashboardConfig::default().sum_tolerance)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn schools_round_trip_through_keys() {
		for school in School::ALL {
			assert_eq!(School::from_key(school.key()).unwrap(), school);
		}
		assert!(matches!(
			School::from_key("night_school"),
			Err(GraphError::UnknownSchool(_))
		));
	}

	#[test]
	fn loads_are_cached() {
		let store = GraphStore::default();
		let first = store.load(School::RuralHigh).unwrap();
		let second = store.load(School::RuralHigh).unwrap();
		assert!(Arc::ptr_eq(&first, &second));
	}

	#[test]
	fn parse_errors_name_their_origin() {
		let err = GraphStore::default()
			.load_str("Test High", r#"{ "nodes": "oops" }"#)
			.unwrap_err();
		assert!(err.to_string().starts_with("failed to parse graph data for Test High"));
	}
}
