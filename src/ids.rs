//! Stable element identifiers for courses and transitions.
//!
//! The canvas needs ids drawn from `[a-z0-9_]` that are unique per graph.
//! Course names are slugged; collisions get a short content digest, then a
//! numeric suffix. Assignment is a pure function of the ordered name list,
//! so ids stay stable across re-renders.

use std::collections::{HashMap, HashSet};

use sha2::{Digest, Sha256};

use crate::error::IdError;

/// Joins the two node ids of a transition.
pub const EDGE_SEPARATOR: char = '→';

/// Id used when a name has no slug-able characters.
const PLACEHOLDER: &str = "node";

/// Hex characters of the digest appended on a slug collision.
const DIGEST_LEN: usize = 8;

/// Lowercase `name`, collapse every non-alphanumeric run into one `_`, and
/// trim underscores from both ends.
pub fn slugify(name: &str) -> String {
	let mut slug = String::with_capacity(name.len());
	let mut pending_sep = false;
	for ch in name.trim().chars().flat_map(char::to_lowercase) {
		if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
			if pending_sep && !slug.is_empty() {
				slug.push('_');
			}
			pending_sep = false;
			slug.push(ch);
		} else {
			pending_sep = true;
		}
	}
	if slug.is_empty() {
		PLACEHOLDER.to_string()
	} else {
		slug
	}
}

fn short_digest(name: &str) -> String {
	let digest = Sha256::digest(name.as_bytes());
	let mut hex = hex::encode(digest);
	hex.truncate(DIGEST_LEN);
	hex
}

/// Two-way mapping between course names and element ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdMap {
	/// One id per input name, in input order.
	ids: Vec<String>,
	/// First id assigned to each distinct name.
	by_name: HashMap<String, String>,
	by_id: HashMap<String, String>,
}

impl IdMap {
	/// Assign an id to every name in order.
	pub fn assign<S: AsRef<str>>(names: &[S]) -> Self {
		let mut used: HashSet<String> = HashSet::with_capacity(names.len());
		let mut map = Self::default();

		for name in names {
			let name = name.as_ref();
			let base = slugify(name);
			let mut id = base.clone();
			if used.contains(&id) {
				id = format!("{base}_{}", short_digest(name));
			}
			let mut k = 2;
			while used.contains(&id) {
				id = format!("{base}_{k}");
				k += 1;
			}
			used.insert(id.clone());

			map.by_name
				.entry(name.to_string())
				.or_insert_with(|| id.clone());
			map.by_id.insert(id.clone(), name.to_string());
			map.ids.push(id);
		}
		map
	}

	/// Ids in input order.
	pub fn ids(&self) -> &[String] {
		&self.ids
	}

	pub fn len(&self) -> usize {
		self.ids.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}

	/// Id of a course. Duplicated names resolve to their first occurrence.
	pub fn id_of(&self, name: &str) -> Option<&str> {
		self.by_name.get(name).map(String::as_str)
	}

	/// Course name behind an id.
	pub fn name_of(&self, id: &str) -> Option<&str> {
		self.by_id.get(id).map(String::as_str)
	}

	/// Element id of the transition `source → target`.
	pub fn edge_id(&self, source: &str, target: &str) -> Option<String> {
		let (src, dst) = (self.id_of(source)?, self.id_of(target)?);
		Some(format!("{src}{EDGE_SEPARATOR}{dst}"))
	}

	/// Map an edge element id back to its `(source, target)` course names.
	pub fn resolve_edge(&self, edge_id: &str) -> Result<(String, String), IdError> {
		let mut parts = edge_id.split(EDGE_SEPARATOR);
		let (Some(src), Some(dst), None) = (parts.next(), parts.next(), parts.next()) else {
			return Err(IdError::MalformedEdgeId(edge_id.to_string()));
		};
		let lookup = |id: &str| {
			self.name_of(id)
				.map(str::to_string)
				.ok_or_else(|| IdError::UnknownNode(id.to_string()))
		};
		Ok((lookup(src)?, lookup(dst)?))
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use proptest::prelude::*;

	use super::*;

	#[test]
	fn slugs_collapse_and_trim() {
		assert_eq!(slugify("Algebra I"), "algebra_i");
		assert_eq!(slugify("  Pre-IB / Math 9 "), "pre_ib_math_9");
		assert_eq!(slugify("__IB--HL__"), "ib_hl");
		assert_eq!(slugify("¿?"), "node");
		assert_eq!(slugify(""), "node");
	}

	#[test]
	fn duplicate_names_get_digest_suffix() {
		let map = IdMap::assign(&["Algebra I", "Algebra I"]);
		assert_eq!(map.ids(), ["algebra_i", "algebra_i_4f3752cd"]);
		assert_eq!(map.name_of("algebra_i"), Some("Algebra I"));
		assert_eq!(map.name_of("algebra_i_4f3752cd"), Some("Algebra I"));
		assert_eq!(map.id_of("Algebra I"), Some("algebra_i"));
	}

	#[test]
	fn third_collision_falls_back_to_counter() {
		let map = IdMap::assign(&["Geometry", "Geometry", "Geometry", "geometry!"]);
		assert_eq!(&map.ids()[..3], ["geometry", "geometry_fa9da575", "geometry_2"]);
		assert_eq!(map.ids()[3], format!("geometry_{}", short_digest("geometry!")));
		assert_eq!(map.id_of("Geometry"), Some("geometry"));
		assert_eq!(map.name_of("geometry_2"), Some("Geometry"));
	}

	#[test]
	fn distinct_names_sharing_a_slug() {
		let map = IdMap::assign(&["Math 9", "Math-9"]);
		assert_eq!(map.ids()[0], "math_9");
		assert_eq!(map.ids()[1], format!("math_9_{}", short_digest("Math-9")));
		assert_eq!(map.name_of(&map.ids()[1]), Some("Math-9"));
	}

	#[test]
	fn edge_ids_round_trip() {
		let map = IdMap::assign(&["Algebra I", "Geometry"]);
		let id = map.edge_id("Algebra I", "Geometry").unwrap();
		assert_eq!(id, "algebra_i→geometry");
		assert_eq!(
			map.resolve_edge(&id).unwrap(),
			("Algebra I".to_string(), "Geometry".to_string())
		);
		assert_eq!(map.edge_id("Algebra I", "Calculus"), None);
	}

	#[test]
	fn malformed_edge_ids_are_rejected() {
		let map = IdMap::assign(&["Algebra I", "Geometry"]);
		assert_eq!(
			map.resolve_edge("algebra_i"),
			Err(IdError::MalformedEdgeId("algebra_i".into()))
		);
		assert_eq!(
			map.resolve_edge("a→b→c"),
			Err(IdError::MalformedEdgeId("a→b→c".into()))
		);
		assert_eq!(
			map.resolve_edge("algebra_i→calculus"),
			Err(IdError::UnknownNode("calculus".into()))
		);
	}

	proptest! {
		#[test]
		fn ids_are_unique_safe_and_invertible(names in prop::collection::vec("[ -~]{0,12}", 0..24)) {
			let map = IdMap::assign(&names);
			prop_assert_eq!(map.len(), names.len());

			let unique: HashSet<&String> = map.ids().iter().collect();
			prop_assert_eq!(unique.len(), names.len());

			for (name, id) in names.iter().zip(map.ids()) {
				prop_assert!(!id.is_empty());
				prop_assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
				prop_assert_eq!(map.name_of(id), Some(name.as_str()));
			}
		}

		#[test]
		fn assignment_is_deterministic(names in prop::collection::vec("[A-Za-z ]{0,8}", 0..16)) {
			prop_assert_eq!(IdMap::assign(&names), IdMap::assign(&names));
		}
	}
}
