use contracts::domain::common::{FieldErrors, Identified};
use contracts::domain::location::Location;
use contracts::domain::substore::{Substore, SubstoreDraft};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::shared::api::{Api, ApiError};
use crate::shared::listing::{normalize, ListPageVm};
use crate::shared::modal_stack::ModalHandle;

#[component]
pub fn SubstoreDetails(
    vm: ListPageVm<Substore>,
    record: Option<Substore>,
    handle: ModalHandle,
) -> impl IntoView {
    let is_edit = record.is_some();
    let form = RwSignal::new(
        record
            .as_ref()
            .map(SubstoreDraft::from_record)
            .unwrap_or_default(),
    );
    let errors = RwSignal::new(FieldErrors::new());
    let saving = RwSignal::new(false);

    // Location options for the select; loaded once when the modal opens.
    let locations = RwSignal::new(Vec::<(String, String)>::new());
    spawn_local(async move {
        match Api::new().get("/api/locations?page=1&page_size=200").await {
            Ok(body) => {
                let page = normalize::<Location>(body, 200);
                let options: Vec<(String, String)> = page
                    .items
                    .iter()
                    .map(|location| (location.entity_id().as_string(), location.name.clone()))
                    .collect();
                let _ = locations.try_set(options);
            }
            Err(err) => log::warn!("location options fetch failed: {}", err),
        }
    });

    let name_error = Signal::derive(move || errors.with(|e| e.get("name").map(str::to_string)));
    let location_error =
        Signal::derive(move || errors.with(|e| e.get("location_id").map(str::to_string)));
    let keeper_error = Signal::derive(move || errors.with(|e| e.get("keeper").map(str::to_string)));

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
        <div class="details-container substore-details">
            <div class="details-header">
                <h3>{if is_edit { "Edit substore" } else { "New substore" }}</h3>
            </div>

            <div class="details-form">
                <div class="form-group">
                    <label for="name">{"Name"}</label>
                    <input
                        type="text"
                        id="name"
                        prop:value=move || form.get().name
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                        placeholder="e.g. Lubricants store"
                    />
                    {move || name_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
                </div>

                <div class="form-group">
                    <label for="location_id">{"Location"}</label>
                    <select
                        id="location_id"
                        on:change=move |ev| form.update(|f| f.location_id = event_target_value(&ev))
                        prop:value=move || form.get().location_id
                    >
                        <option value="">"Select a location"</option>
                        {move || locations.get().into_iter().map(|(id, name)| {
                            view! { <option value={id}>{name}</option> }
                        }).collect_view()}
                    </select>
                    {move || location_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
                </div>

                <div class="form-group">
                    <label for="keeper">{"Storekeeper"}</label>
                    <input
                        type="text"
                        id="keeper"
                        prop:value=move || form.get().keeper
                        on:input=move |ev| form.update(|f| f.keeper = event_target_value(&ev))
                    />
                    {move || keeper_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
                </div>

                <div class="form-group form-group--inline">
                    <input
                        type="checkbox"
                        id="active"
                        prop:checked=move || form.get().active
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            form.update(|f| f.active = checked);
                        }
                    />
                    <label for="active">{"Active"}</label>
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
