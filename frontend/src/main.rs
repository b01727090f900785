mod api;
mod codec;
mod components;
mod models;
mod state;
mod stream;

use leptos::mount::mount_to_body;
use leptos::prelude::*;

use components::ask::AskPanel;
use components::roadmap::RoadmapPanel;
use state::{AppState, Page};

/// Root application component.
#[component]
fn App() -> impl IntoView {
    let state = AppState::provide();

    view! {
        <div class="app-container">
            <nav class="app-nav">
                <button
                    class:active=move || state.page.get() == Page::Roadmap
                    on:click=move |_| state.set_page.set(Page::Roadmap)
                >
                    "Roadmap"
                </button>
                <button
                    class:active=move || state.page.get() == Page::Ask
                    on:click=move |_| state.set_page.set(Page::Ask)
                >
                    "Ask"
                </button>
            </nav>
            {move || match state.page.get() {
                Page::Roadmap => view! { <RoadmapPanel /> }.into_any(),
                Page::Ask => view! { <AskPanel /> }.into_any(),
            }}
        </div>
    }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
