use leptos::prelude::*;

use crate::routes::routes::Screen;

/// Application frame: sidebar navigation on the left, the active screen
/// in the center.
#[component]
#[allow(non_snake_case)]
pub fn Shell(
    active: ReadSignal<Screen>,
    on_navigate: Callback<Screen>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="shell">
            <aside class="shell__sidebar">
                <div class="shell__brand">{"Depot Console"}</div>
                <nav class="shell__nav">
                    {Screen::ALL.iter().map(|&screen| {
                        view! {
                            <button
                                class="shell__nav-item"
                                class:shell__nav-item--active=move || active.get() == screen
                                on:click=move |_| on_navigate.run(screen)
                            >
                                {screen.title()}
                            </button>
                        }
                    }).collect_view()}
                </nav>
            </aside>
            <main class="shell__main">
                {children()}
            </main>
        </div>
    }
}
