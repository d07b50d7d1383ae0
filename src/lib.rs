//! course-pathways: interactive map of how students move between courses.
//!
//! This crate provides a WASM dashboard that draws a school's course
//! transitions as a graph, focuses related courses and transitions on click,
//! and explains the selection in a details panel.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod config;
pub mod error;
pub mod graph;
pub mod ids;
pub mod panel;
pub mod present;
pub mod session;

pub use components::{DetailsPanel, ForceGraphCanvas, Sidebar};
pub use config::DashboardConfig;
pub use graph::{CourseGraph, GraphStore, School};
pub use present::{Presentation, Selection, derive};
pub use session::{ClickTarget, SessionState};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("course-pathways: logging initialized");
}

fn config_script_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(config::CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load settings from a script element with id="dashboard-config", falling
/// back to defaults when it is absent or invalid.
fn load_dashboard_config() -> DashboardConfig {
	let Some(json_text) = config_script_text() else {
		return DashboardConfig::default();
	};

	match DashboardConfig::from_json(&json_text) {
		Ok(config) => {
			info!("course-pathways: loaded page config {config:?}");
			config
		}
		Err(e) => {
			warn!("course-pathways: {e}; using defaults");
			DashboardConfig::default()
		}
	}
}

/// Main application component.
/// Loads the chosen school's graph and wires the canvas, sidebar and details
/// panel to the shared session state.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_dashboard_config();
	let store = Arc::new(GraphStore::new(config.sum_tolerance));
	let session = RwSignal::new(SessionState::default());

	let school = Memo::new(move |_| session.with(|s| s.school));
	let loaded = Signal::derive(move || store.load(school.get()));
	let graph = Signal::derive(move || loaded.get().ok());
	let load_error = Memo::new(move |_| loaded.get().err().map(|e| e.to_string()));
	let selection = Signal::derive(move || session.with(|s| s.selection.clone()));

	let presentation = Memo::new(move |_| match graph.get() {
		Some(g) => session.with(|s| derive(&g, &s.selection)),
		None => Presentation::default(),
	});

	let on_select = Callback::new(move |target: ClickTarget| match graph.get_untracked() {
		Some(g) => session.update(|s| s.apply_click(target, &g.ids)),
		None => warn!("course-pathways: click with no graph loaded"),
	});

	let height = config.graph_height;
	let canvas = move || match load_error.get() {
		None => view! {
			<ForceGraphCanvas data=presentation on_select=on_select height=height />
		}
		.into_any(),
		Some(message) => view! {
			<div class="load-error">
				<strong>"Could not load this school's course map."</strong>
				<p>{message}</p>
			</div>
		}
		.into_any(),
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="Course Pathways" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="dashboard">
			<Sidebar session=session graph=graph />
			<main class="graph-column">
				<h2>"Math class map"</h2>
				<p>"Circles are classes. Arrows show where students go next."</p>
				<p>"A looped arrow means some students repeat the same class."</p>
				<p>"\"Graduate\" and \"Leave School\" are endings, so they have no arrows going out."</p>
				<div class="graph-frame">{canvas}</div>
				<button class="clear" on:click=move |_| session.update(SessionState::clear)>
					"Clear selection"
				</button>
			</main>
			<DetailsPanel
				graph=graph
				selection=selection
				top_transitions=config.top_transitions
			/>
		</div>
	}
}
