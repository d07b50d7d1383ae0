//! The details column: what the current selection means.

use std::sync::Arc;

use leptos::prelude::*;

use super::charts::ExampleCharts;
use crate::graph::CourseGraph;
use crate::panel::{CourseDetails, Step, TransitionDetails, course_details, transition_details};
use crate::present::{Selection, friendly_percent};

fn step_list(steps: Vec<Step>, empty: &'static str) -> AnyView {
	if steps.is_empty() {
		return view! { <p>{empty}</p> }.into_any();
	}
	let items = steps
		.into_iter()
		.map(|s| {
			view! {
				<li>
					<strong>{s.course}</strong>
					": "
					{friendly_percent(s.probability)}
				</li>
			}
		})
		.collect_view();
	view! { <ul>{items}</ul> }.into_any()
}

#[component]
fn CourseView(details: CourseDetails) -> impl IntoView {
	let tracks = if details.tracks.is_empty() {
		"Not listed".to_string()
	} else {
		details.tracks.join(", ")
	};
	let repeat = details.repeat_rate.map(|p| {
		view! {
			<p>
				<strong>"Repeat this class next year: "</strong>
				{friendly_percent(p)}
			</p>
		}
	});

	view! {
		<h3>{details.course}</h3>
		<p>
			<strong>"Path group: "</strong>
			{tracks}
		</p>
		{repeat}
		<hr />
		<h3>"What students do next"</h3>
		{step_list(details.next_steps, "No next-step arrows from this class.")}
		<hr />
		<h3>"Where students come from"</h3>
		{step_list(details.came_from, "No arrows pointing into this class.")}
		<hr />
		<ExampleCharts />
	}
}

#[component]
fn TransitionView(details: TransitionDetails) -> impl IntoView {
	let chance = details.probability.map(|p| {
		view! {
			<p>
				<strong>"Chance: "</strong>
				{friendly_percent(p)}
			</p>
		}
	});
	let tracks = (!details.is_self_loop() && !details.tracks.is_empty()).then(|| {
		view! {
			<p>
				<strong>"Path colors involved: "</strong>
				{details.tracks.join(", ")}
			</p>
		}
	});

	view! {
		<h3>"Arrow details"</h3>
		<p>
			<strong>"From: "</strong>
			{details.source.clone()}
		</p>
		<p>
			<strong>"To: "</strong>
			{details.target.clone()}
		</p>
		{chance}
		{tracks}
	}
}

/// Shows course or transition details for the selection, or a hint.
#[component]
pub fn DetailsPanel(
	#[prop(into)] graph: Signal<Option<Arc<CourseGraph>>>,
	#[prop(into)] selection: Signal<Selection>,
	top_transitions: usize,
) -> impl IntoView {
	let body = move || {
		let selection = selection.get();
		let Some(graph) = graph.get() else {
			return view! { <p>"No course map is loaded."</p> }.into_any();
		};
		match selection {
			Selection::Course(course) => {
				let details = course_details(&graph, &course, top_transitions);
				view! { <CourseView details=details /> }.into_any()
			}
			Selection::Transition { source, target } => {
				let details = transition_details(&graph, &source, &target);
				view! { <TransitionView details=details /> }.into_any()
			}
			Selection::Unresolved(raw) => view! {
				<h3>"Arrow details"</h3>
				<p>{raw}</p>
			}
			.into_any(),
			Selection::None => {
				view! { <p>"Click a circle or an arrow to see more information here."</p> }
					.into_any()
			}
		}
	};

	view! {
		<aside class="details">
			<h2>"Details"</h2>
			{body}
		</aside>
	}
}
