use contracts::domain::common::FieldErrors;
use contracts::domain::expense_type::{ExpenseType, ExpenseTypeDraft};
use leptos::prelude::*;

use crate::shared::api::ApiError;
use crate::shared::listing::ListPageVm;
use crate::shared::modal_stack::ModalHandle;

#[component]
pub fn ExpenseTypeDetails(
    vm: ListPageVm<ExpenseType>,
    record: Option<ExpenseType>,
    handle: ModalHandle,
) -> impl IntoView {
    let is_edit = record.is_some();
    let form = RwSignal::new(
        record
            .as_ref()
            .map(ExpenseTypeDraft::from_record)
            .unwrap_or_default(),
    );
    let errors = RwSignal::new(FieldErrors::new());
    let saving = RwSignal::new(false);

    let name_error = Signal::derive(move || errors.with(|e| e.get("name").map(str::to_string)));
    let limit_error =
        Signal::derive(move || errors.with(|e| e.get("approval_limit").map(str::to_string)));

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
        <div class="details-container expense-type-details">
            <div class="details-header">
                <h3>{if is_edit { "Edit expense type" } else { "New expense type" }}</h3>
            </div>

            <div class="details-form">
                <div class="form-group">
                    <label for="name">{"Name"}</label>
                    <input
                        type="text"
                        id="name"
                        prop:value=move || form.get().name
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                        placeholder="e.g. Generator service"
                    />
                    {move || name_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
                </div>

                <div class="form-group">
                    <label for="description">{"Description"}</label>
                    <textarea
                        id="description"
                        prop:value=move || form.get().description
                        on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                    ></textarea>
                </div>

                <div class="form-group form-group--inline">
                    <input
                        type="checkbox"
                        id="requires_approval"
                        prop:checked=move || form.get().requires_approval
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            form.update(|f| f.requires_approval = checked);
                        }
                    />
                    <label for="requires_approval">{"Requires approval"}</label>
                </div>

                // approval limit only applies while approval is enabled
                <Show when=move || form.get().requires_approval>
                    <div class="form-group">
                        <label for="approval_limit">{"Approval limit"}</label>
                        <input
                            type="text"
                            id="approval_limit"
                            prop:value=move || form.get().approval_limit
                            on:input=move |ev| form.update(|f| f.approval_limit = event_target_value(&ev))
                            placeholder="Amount above which approval is needed"
                        />
                        {move || limit_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
                    </div>
                </Show>
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
