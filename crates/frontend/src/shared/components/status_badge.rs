use leptos::prelude::*;

/// Colored status chip. `tone` selects the BEM modifier:
/// success | danger | warning | neutral.
#[component]
pub fn StatusBadge(
    #[prop(into)]
    label: String,
    #[prop(into)]
    tone: String,
) -> impl IntoView {
    view! {
        <span class=format!("badge badge--{}", tone)>{label}</span>
    }
}
