use leptos::ev;
use leptos::prelude::*;

use crate::codec::render_markup;
use crate::state::AppState;

const PLACEHOLDER: &str = "AI response will appear here...";

/// Ask page: free-form prompt with the streamed, tag-styled reply above it.
#[component]
pub fn AskPanel() -> impl IntoView {
    let state = expect_context::<AppState>();

    // Only the fixed tag vocabulary reaches the DOM as markup.
    let rendered = move || {
        let text = state.response.get();
        if text.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            render_markup(&text)
        }
    };

    view! {
        <section class="ask-panel">
            <div class="response whitespace-pre-wrap" inner_html=rendered />
            <AskInput />
        </section>
    }
}

#[component]
fn AskInput() -> impl IntoView {
    let state = expect_context::<AppState>();
    let (input, set_input) = signal(String::new());

    let is_loading = move || state.is_loading.get();

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        state.send_message(input.get_untracked());
    };

    view! {
        <form class="input-row" on:submit=on_submit>
            <input
                type="text"
                placeholder="Ask something..."
                prop:value=input
                on:input=move |ev| {
                    set_input.set(event_target_value(&ev));
                }
                disabled=is_loading
            />
            <button type="submit" class="send-btn" disabled=is_loading>
                {move || if is_loading() { "Sending..." } else { "Send" }}
            </button>
        </form>
    }
}
