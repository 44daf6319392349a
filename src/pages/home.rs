//! Home page: the crawl form and the resulting word graph.

use leptos::ev::{Event, KeyboardEvent};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, CrawlError, CrawlResponse};
use crate::components::word_graph::{GraphData, WordGraphCanvas};

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let url = RwSignal::new(String::new());
	let loading = RwSignal::new(false);
	let result = RwSignal::new(None::<CrawlResponse>);
	let error = RwSignal::new(String::new());

	// One request per explicit submit. Loading disables the triggers; an
	// in-flight request is never aborted by a second submit.
	let submit = move || {
		let input = url.get();
		if input.trim().is_empty() {
			error.set(CrawlError::EmptyUrl.to_string());
			return;
		}

		loading.set(true);
		error.set(String::new());
		result.set(None);

		spawn_local(async move {
			match api::crawl(&input).await {
				Ok(response) => result.set(Some(response)),
				Err(err) => error.set(err.to_string()),
			}
			loading.set(false);
		});
	};

	let on_input = move |ev: Event| {
		url.set(event_target_value(&ev));
		// Errors clear as soon as the user resumes typing.
		if !error.get_untracked().is_empty() {
			error.set(String::new());
		}
	};

	let on_keydown = move |ev: KeyboardEvent| {
		if ev.key() == "Enter" && !loading.get_untracked() {
			submit();
		}
	};

	let graph_data = Memo::new(move |_| {
		result
			.get()
			.map(|r| r.graph())
			.unwrap_or_else(GraphData::default)
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="container">
				<h1>"Enter the Reddit Post URL:"</h1>

				<div class="input-section">
					<input
						type="text"
						class="url-input"
						placeholder="https://www.reddit.com/r/..."
						prop:value=move || url.get()
						on:input=on_input
						on:keydown=on_keydown
						disabled=move || loading.get()
					/>

					<button
						class="crawl-button"
						on:click=move |_| submit()
						disabled=move || loading.get() || url.get().trim().is_empty()
					>
						{move || if loading.get() { "Crawling..." } else { "Crawl" }}
					</button>
				</div>

				<Show when=move || !error.get().is_empty()>
					<div class="error-message">{move || error.get()}</div>
				</Show>

				<Show when=move || result.get().is_some()>
					<div class="result-section">
						<h2>"Word Network Visualization:"</h2>
						<p class="visualization-description">
							"Node size represents word frequency \u{2022} Line thickness represents co-occurrence strength"
						</p>
						<WordGraphCanvas data=graph_data />

						<details class="raw-data-toggle">
							<summary>"Show Raw Data"</summary>
							<pre class="result-data">
								{move || result.get().map(|r| r.raw_json()).unwrap_or_default()}
							</pre>
						</details>
					</div>
				</Show>
			</div>
		</ErrorBoundary>
	}
}
