use contracts::domain::common::FieldErrors;
use contracts::domain::price_scheme::{PriceScheme, PriceSchemeDraft};
use leptos::prelude::*;

use crate::shared::api::ApiError;
use crate::shared::listing::ListPageVm;
use crate::shared::modal_stack::ModalHandle;

#[component]
pub fn PriceSchemeDetails(
    vm: ListPageVm<PriceScheme>,
    record: Option<PriceScheme>,
    handle: ModalHandle,
) -> impl IntoView {
    let is_edit = record.is_some();
    let form = RwSignal::new(
        record
            .as_ref()
            .map(PriceSchemeDraft::from_record)
            .unwrap_or_default(),
    );
    let errors = RwSignal::new(FieldErrors::new());
    let saving = RwSignal::new(false);

    let error_for = move |field: &'static str| {
        Signal::derive(move || errors.with(|e| e.get(field).map(str::to_string)))
    };
    let name_error = error_for("name");
    let product_error = error_for("product_code");
    let price_error = error_for("unit_price");
    let from_error = error_for("valid_from");
    let to_error = error_for("valid_to");

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
        <div class="details-container price-scheme-details">
            <div class="details-header">
                <h3>{if is_edit { "Edit price scheme" } else { "New price scheme" }}</h3>
            </div>

            <div class="details-form">
                <div class="form-group">
                    <label for="name">{"Name"}</label>
                    <input
                        type="text"
                        id="name"
                        prop:value=move || form.get().name
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                        placeholder="e.g. PMS pump price Q2"
                    />
                    {move || name_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
                </div>

                <div class="form-group">
                    <label for="product_code">{"Product code"}</label>
                    <input
                        type="text"
                        id="product_code"
                        prop:value=move || form.get().product_code
                        on:input=move |ev| form.update(|f| f.product_code = event_target_value(&ev))
                        placeholder="PMS, AGO, DPK..."
                    />
                    {move || product_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
                </div>

                <div class="form-group">
                    <label for="unit_price">{"Unit price"}</label>
                    <input
                        type="text"
                        id="unit_price"
                        prop:value=move || form.get().unit_price
                        on:input=move |ev| form.update(|f| f.unit_price = event_target_value(&ev))
                        placeholder="0.00"
                    />
                    {move || price_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
                </div>

                <div class="form-group">
                    <label for="valid_from">{"Valid from"}</label>
                    <input
                        type="date"
                        id="valid_from"
                        prop:value=move || form.get().valid_from
                        on:input=move |ev| form.update(|f| f.valid_from = event_target_value(&ev))
                    />
                    {move || from_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
                </div>

                <div class="form-group">
                    <label for="valid_to">{"Valid to"}</label>
                    <input
                        type="date"
                        id="valid_to"
                        prop:value=move || form.get().valid_to
                        on:input=move |ev| form.update(|f| f.valid_to = event_target_value(&ev))
                    />
                    {move || to_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
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
