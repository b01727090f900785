use leptos::ev;
use leptos::prelude::*;

use crate::models::RoadmapNode;
use crate::state::AppState;

/// Roadmap page: the goal form until a roadmap exists, then the roadmap with
/// a compact update bar.
#[component]
pub fn RoadmapPanel() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <section class="roadmap-panel">
            {move || {
                state.error.get().map(|err| {
                    view! { <div class="error-banner">{err}</div> }
                })
            }}
            <Show
                when=move || state.roadmap.get().is_some()
                fallback=|| view! { <RoadmapForm /> }
            >
                <RoadmapView />
                <UpdateBar />
            </Show>
        </section>
    }
}

#[component]
fn GoalInput(placeholder: &'static str) -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <input
            id="goal"
            type="text"
            placeholder=placeholder
            required
            prop:value=state.goal
            on:input=move |ev| state.set_goal.set(event_target_value(&ev))
        />
    }
}

#[component]
fn HoursInput() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <input
            id="hours"
            type="number"
            min="1"
            max="24"
            required
            prop:value=move || state.hours_per_day.get().to_string()
            on:input=move |ev| {
                if let Ok(hours) = event_target_value(&ev).parse::<u32>() {
                    state.set_hours_per_day.set(hours);
                }
            }
        />
    }
}

#[component]
fn RoadmapForm() -> impl IntoView {
    let state = expect_context::<AppState>();

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        state.generate_roadmap();
    };

    view! {
        <form class="roadmap-form" on:submit=on_submit>
            <h1>"SaaS Roadmap Generator"</h1>
            <div class="field">
                <label for="goal">"What do you want to learn?"</label>
                <GoalInput placeholder="e.g., Build a SaaS product" />
            </div>
            <div class="field">
                <label for="hours">"Hours available per day"</label>
                <HoursInput />
            </div>
            <button type="submit">"Generate Roadmap"</button>
        </form>
    }
}

#[component]
fn UpdateBar() -> impl IntoView {
    let state = expect_context::<AppState>();
    let update = move |_| state.generate_roadmap();
    let reset = move |_| state.reset_roadmap();

    view! {
        <div class="update-bar">
            <GoalInput placeholder="Update your goal" />
            <HoursInput />
            <button on:click=update>"Update"</button>
            <button class="reset-btn" on:click=reset>"Reset"</button>
        </div>
    }
}

#[component]
fn RoadmapView() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <ol class="roadmap">
            {move || {
                state
                    .roadmap
                    .get()
                    .map(|roadmap| {
                        roadmap
                            .nodes
                            .into_iter()
                            .map(|node| view! { <NodeCard node=node /> })
                            .collect_view()
                    })
            }}
        </ol>
        <div class="roadmap-total">
            {move || {
                state
                    .roadmap
                    .get()
                    .map(|r| format!("Total time: {} days", r.total_days))
            }}
        </div>
    }
}

#[component]
fn NodeCard(node: RoadmapNode) -> impl IntoView {
    let style = format!(
        "background:{};color:{};border:{};width:{}px",
        node.style.background, node.style.color, node.style.border, node.style.width
    );
    let class = format!("roadmap-node {}", node.kind);
    let id = format!("node-{}", node.id);

    view! {
        <li id=id class=class style=style>
            <div class="font-semibold">{node.title}</div>
            {node
                .lines
                .into_iter()
                .map(|line| view! { <div class="text-xs mt-1">{line}</div> })
                .collect_view()}
        </li>
    }
}
