use contracts::domain::common::FieldErrors;
use contracts::domain::location::{Location, LocationDraft};
use leptos::prelude::*;

use crate::shared::api::ApiError;
use crate::shared::listing::ListPageVm;
use crate::shared::modal_stack::ModalHandle;

#[component]
pub fn LocationDetails(
    vm: ListPageVm<Location>,
    record: Option<Location>,
    handle: ModalHandle,
) -> impl IntoView {
    let is_edit = record.is_some();
    let form = RwSignal::new(
        record
            .as_ref()
            .map(LocationDraft::from_record)
            .unwrap_or_default(),
    );
    let errors = RwSignal::new(FieldErrors::new());
    let saving = RwSignal::new(false);

    let name_error = Signal::derive(move || errors.with(|e| e.get("name").map(str::to_string)));
    let address_error =
        Signal::derive(move || errors.with(|e| e.get("address").map(str::to_string)));
    let region_error = Signal::derive(move || errors.with(|e| e.get("region").map(str::to_string)));

    let handle_for_save = handle.clone();
    let handle_for_cancel = handle.clone();

    let save = move || {
        let draft = form.get_untracked();
        let client_errors = draft.validate();
        if !client_errors.is_empty() {
            errors.set(client_errors);
            return;
        }
        errors.set(FieldErrors::new());
        saving.set(true);

        let handle = handle_for_save.clone();
        let on_done = Callback::new(move |result: Result<(), ApiError>| {
            // the modal may have been closed while the request was in
            // flight; a disposed form just drops the outcome
            let _ = saving.try_set(false);
            match result {
                Ok(()) => handle.close(),
                Err(err) => {
                    let _ = errors.try_update(|e| e.merge(err.field_errors.clone()));
                }
            }
        });
        match draft.id.clone() {
            Some(id) => vm.update(id, draft.to_payload(), on_done),
            None => vm.create(draft.to_payload(), on_done),
        }
    };

    view! {
        <div class="details-container location-details">
            <div class="details-header">
                <h3>{if is_edit { "Edit location" } else { "New location" }}</h3>
            </div>

            <div class="details-form">
                <div class="form-group">
                    <label for="name">{"Name"}</label>
                    <input
                        type="text"
                        id="name"
                        prop:value=move || form.get().name
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                        placeholder="e.g. Apapa depot"
                    />
                    {move || name_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
                </div>

                <div class="form-group">
                    <label for="address">{"Address"}</label>
                    <input
                        type="text"
                        id="address"
                        prop:value=move || form.get().address
                        on:input=move |ev| form.update(|f| f.address = event_target_value(&ev))
                    />
                    {move || address_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
                </div>

                <div class="form-group">
                    <label for="region">{"Region"}</label>
                    <input
                        type="text"
                        id="region"
                        prop:value=move || form.get().region
                        on:input=move |ev| form.update(|f| f.region = event_target_value(&ev))
                    />
                    {move || region_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
                </div>
            </div>

            <div class="details-actions">
                <button
                    class="button button--secondary"
                    on:click=move |_| handle_for_cancel.close()
                >
                    {"Cancel"}
                </button>
                <button
                    class="button button--primary"
                    on:click=move |_| save()
                    disabled=move || saving.get()
                >
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </button>
            </div>
        </div>
    }
}
