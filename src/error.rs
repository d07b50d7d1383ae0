//! Error types for loading school data and resolving element identifiers.

use std::sync::Arc;

/// Failure to turn a rendered element id back into a course or transition.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
	/// The edge id did not split into exactly two node ids.
	#[error("malformed transition id: {0}")]
	MalformedEdgeId(String),

	/// A node id that was never assigned for the current graph.
	#[error("unknown course id: {0}")]
	UnknownNode(String),
}

/// Failure to load a school's graph document.
#[derive(Clone, Debug, thiserror::Error)]
pub enum GraphError {
	/// The bundled JSON could not be parsed.
	#[error("failed to parse graph data for {school}: {source}")]
	Parse {
		/// Display name of the school (or other data origin).
		school: String,
		/// Underlying JSON error.
		#[source]
		source: Arc<serde_json::Error>,
	},

	/// No bundled data exists under this key.
	#[error("no graph data for school key {0:?}")]
	UnknownSchool(String),
}

/// Failure to read page-embedded dashboard configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// The configuration element held invalid JSON.
	#[error("invalid dashboard config: {0}")]
	Parse(#[from] serde_json::Error),
}
