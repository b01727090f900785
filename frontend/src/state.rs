use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::models::Roadmap;
use crate::stream::StreamDecoder;

pub const DEFAULT_HOURS_PER_DAY: u32 = 4;
pub const STREAM_FAILED: &str = "An error occurred while fetching the response.";

/// Which page the app is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Ask,
    Roadmap,
}

/// Shared application state, provided via Leptos context.
#[derive(Clone, Copy)]
pub struct AppState {
    // --- Read signals (for components to subscribe to) ---
    pub page: ReadSignal<Page>,
    pub response: ReadSignal<String>,
    pub is_loading: ReadSignal<bool>,
    pub goal: ReadSignal<String>,
    pub hours_per_day: ReadSignal<u32>,
    pub roadmap: ReadSignal<Option<Roadmap>>,
    pub error: ReadSignal<Option<String>>,

    // --- Write signals (for mutating state) ---
    pub set_page: WriteSignal<Page>,
    pub set_response: WriteSignal<String>,
    pub set_is_loading: WriteSignal<bool>,
    pub set_goal: WriteSignal<String>,
    pub set_hours_per_day: WriteSignal<u32>,
    pub set_roadmap: WriteSignal<Option<Roadmap>>,
    pub set_error: WriteSignal<Option<String>>,
}

impl AppState {
    /// Create a new `AppState` and provide it in the current Leptos context.
    pub fn provide() -> Self {
        let (page, set_page) = signal(Page::Roadmap);
        let (response, set_response) = signal(String::new());
        let (is_loading, set_is_loading) = signal(false);
        let (goal, set_goal) = signal(String::new());
        let (hours_per_day, set_hours_per_day) = signal(DEFAULT_HOURS_PER_DAY);
        let (roadmap, set_roadmap) = signal(None::<Roadmap>);
        let (error, set_error) = signal(None::<String>);

        let state = Self {
            page,
            response,
            is_loading,
            goal,
            hours_per_day,
            roadmap,
            error,
            set_page,
            set_response,
            set_is_loading,
            set_goal,
            set_hours_per_day,
            set_roadmap,
            set_error,
        };

        provide_context(state);
        state
    }

    /// Send a message to the relay and append decoded fragments as they
    /// stream in.
    pub fn send_message(&self, text: String) {
        if text.trim().is_empty() || self.is_loading.get_untracked() {
            return;
        }

        let set_response = self.set_response;
        let set_is_loading = self.set_is_loading;
        set_response.set(String::new());
        set_is_loading.set(true);

        spawn_local(async move {
            let mut decoder = StreamDecoder::new();
            let append = move |fragments: Vec<String>| {
                if !fragments.is_empty() {
                    set_response.update(|current| current.extend(fragments));
                }
            };

            let result = api::stream_chat(&text, |chunk| append(decoder.push(chunk))).await;

            match result {
                Ok(()) => append(decoder.finish()),
                Err(e) => {
                    log::error!("Streaming request failed: {e}");
                    set_response.set(STREAM_FAILED.to_string());
                }
            }
            set_is_loading.set(false);
        });
    }

    /// Request a roadmap for the current goal and hours.
    pub fn generate_roadmap(&self) {
        let goal = self.goal.get_untracked();
        let hours = self.hours_per_day.get_untracked();
        let set_roadmap = self.set_roadmap;
        let set_error = self.set_error;
        set_error.set(None);

        spawn_local(async move {
            match api::generate_roadmap(&goal, hours).await {
                Ok(roadmap) => set_roadmap.set(Some(roadmap)),
                Err(e) => {
                    log::error!("Failed to generate roadmap: {e}");
                    set_error.set(Some(e));
                }
            }
        });
    }

    /// Drop the roadmap and return to an empty form.
    pub fn reset_roadmap(&self) {
        self.set_roadmap.set(None);
        self.set_goal.set(String::new());
        self.set_hours_per_day.set(DEFAULT_HOURS_PER_DAY);
        self.set_error.set(None);
    }
}
