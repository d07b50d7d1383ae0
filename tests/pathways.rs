//! End-to-end checks over the bundled school data.

// Integration tests only use part of the library's dependencies.
#![allow(unused_crate_dependencies)]

use std::collections::HashSet;

use course_pathways::panel::{course_details, transition_details};
use course_pathways::present::ElementClass;
use course_pathways::{ClickTarget, GraphStore, School, Selection, SessionState, derive};
use pretty_assertions::assert_eq;

fn store() -> GraphStore {
	GraphStore::new(0.02)
}

#[test]
fn bundled_schools_load_cleanly() {
	let store = store();
	for school in School::ALL {
		let graph = store.load(school).unwrap();
		assert_eq!(graph.nodes().len(), 12, "{school}");
		assert!(graph.audit(0.02).is_empty(), "{school}: {:?}", graph.audit(0.02));

		let ids: HashSet<&str> = graph.ids.ids().iter().map(String::as_str).collect();
		assert_eq!(ids.len(), graph.nodes().len());
		for id in &ids {
			assert!(!id.is_empty());
			assert!(
				id.chars()
					.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
				"{id}"
			);
		}
	}
}

#[test]
fn every_edge_click_resolves_to_its_pair() {
	let graph = store().load(School::MagnetHigh).unwrap();
	let presentation = derive(&graph, &Selection::None);
	assert_eq!(presentation.edges.len(), graph.edges().len());

	let mut session = SessionState::new(School::MagnetHigh);
	for (view, edge) in presentation.edges.iter().zip(graph.edges()) {
		session.apply_click(ClickTarget::Edge(view.id.clone()), &graph.ids);
		assert_eq!(
			session.selection,
			Selection::transition(edge.source.as_str(), edge.target.as_str())
		);
	}
}

#[test]
fn selecting_a_course_highlights_it_and_its_neighbors() {
	let graph = store().load(School::RuralHigh).unwrap();
	let mut session = SessionState::new(School::RuralHigh);
	let id = graph.ids.id_of("Honors Algebra I").unwrap().to_string();
	session.apply_click(ClickTarget::Node(id.clone()), &graph.ids);

	let p = derive(&graph, &session.selection);
	assert!(p.focus);
	let node = p.node(&id).unwrap();
	assert!(node.has_class(ElementClass::Selected));
	assert!(!node.has_class(ElementClass::Dim));
	// Geometry is a Regular course but a direct next step.
	assert!(!p.node("geometry").unwrap().has_class(ElementClass::Dim));
	// Nothing connects Life Skills Math to the Honors track.
	assert!(p.node("life_skills_math").unwrap().has_class(ElementClass::Dim));

	let details = course_details(&graph, "Honors Algebra I", 6);
	assert_eq!(details.tracks, ["Honors"]);
	assert_eq!(details.repeat_rate, None);
	assert_eq!(details.next_steps[0].course, "Honors Geometry");
	assert_eq!(details.came_from[0].course, "Math 8");
}

#[test]
fn repeat_loops_are_labelled_and_detailed() {
	let graph = store().load(School::RuralHigh).unwrap();
	let p = derive(&graph, &Selection::None);
	let repeat = p.edge("algebra_i→algebra_i").unwrap();
	assert!(repeat.self_loop);
	assert_eq!(repeat.label, "12%");

	let details = transition_details(&graph, "Algebra I", "Algebra I");
	assert!(details.is_self_loop());
	assert_eq!(details.probability, Some(0.12));
}

#[test]
fn switching_school_starts_over() {
	let store = store();
	let rural = store.load(School::RuralHigh).unwrap();
	let mut session = SessionState::default();
	session.apply_click(ClickTarget::Node("geometry".into()), &rural.ids);
	assert_eq!(session.selection, Selection::course("Geometry"));

	session.switch_school(School::MagnetHigh);
	assert!(session.selection.is_none());
	let magnet = store.load(School::MagnetHigh).unwrap();
	assert!(!derive(&magnet, &session.selection).focus);
}
