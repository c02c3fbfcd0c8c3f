use leptos::prelude::*;

/// Select-all checkbox in the table header.
///
/// Three states: unchecked, checked, indeterminate. An empty page is
/// always unchecked; all-selected is never vacuously true.
#[component]
pub fn TableHeaderCheckbox(
    #[prop(into)]
    all_selected: Signal<bool>,

    #[prop(into)]
    partially_selected: Signal<bool>,

    /// true = select all visible rows, false = deselect them
    on_change: Callback<bool>,
) -> impl IntoView {
    view! {
        <th class="table__header-cell table__header-cell--checkbox">
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || all_selected.get()
                prop:indeterminate=move || partially_selected.get()
                on:change=move |ev| {
                    // read checked off the DOM element, not the signals,
                    // so the browser's own toggle drives the intent
                    let checked = event_target_checked(&ev);
                    on_change.run(checked);
                }
            />
        </th>
    }
}
