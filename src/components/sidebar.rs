//! School picker, placeholder filters and the color key.

use std::sync::Arc;

use leptos::prelude::*;
use log::warn;

use crate::graph::{CourseGraph, School};
use crate::present::palette::{NODE_BORDER, fill_for};
use crate::session::SessionState;

/// A filter that exists in the layout but does nothing yet.
#[component]
fn DisabledFilter(label: &'static str, value: &'static str) -> impl IntoView {
	view! {
		<label class="filter">
			{label}
			<select disabled=true>
				<option selected=true>{value}</option>
			</select>
		</label>
	}
}

/// Left column: school picker, placeholder filters and the color key for
/// the loaded school's tracks.
#[component]
pub fn Sidebar(
	session: RwSignal<SessionState>,
	#[prop(into)] graph: Signal<Option<Arc<CourseGraph>>>,
) -> impl IntoView {
	let options = School::ALL
		.into_iter()
		.map(|school| {
			view! {
				<option
					value=school.key()
					selected=move || session.with(|s| s.school == school)
				>
					{school.name()}
				</option>
			}
		})
		.collect_view();

	let on_school = move |ev: web_sys::Event| {
		let key = event_target_value(&ev);
		match School::from_key(&key) {
			Ok(school) => session.update(|s| s.switch_school(school)),
			Err(e) => warn!("course-pathways: {e}"),
		}
	};

	let color_key = move || {
		graph.get().map(|g| {
			g.track_names()
				.map(|track| {
					let swatch = format!(
						"display: inline-block; width: 12px; height: 12px; margin-right: 10px; \
						 background: {}; border: 1px solid {NODE_BORDER};",
						fill_for(Some(track))
					);
					let track = track.to_string();
					view! {
						<li>
							<span class="swatch" style=swatch></span>
							{track}
						</li>
					}
				})
				.collect_view()
		})
	};

	view! {
		<nav class="sidebar">
			<h1>"Course Pathways"</h1>
			<p>"This map shows how students move from one math class to the next."</p>
			<p>"Tap a circle to see details on the right."</p>

			<label>
				"Choose a school"
				<select on:change=on_school>{options}</select>
			</label>

			<hr />
			<h3>"Filters"</h3>
			<p>"These filters are not ready yet."</p>
			<DisabledFilter label="Subject" value="Math" />
			<DisabledFilter label="Race" value="All" />
			<DisabledFilter label="Gender" value="All" />

			<hr />
			<h3>"Color key"</h3>
			<p>"Colors show different course paths."</p>
			<ul class="color-key">{color_key}</ul>
		</nav>
	}
}
