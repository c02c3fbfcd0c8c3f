use contracts::domain::channel_transaction::{
    ChannelTransaction, ChannelTransactionDraft, ServiceChannel,
};
use contracts::domain::common::FieldErrors;
use leptos::prelude::*;

use crate::shared::api::ApiError;
use crate::shared::listing::ListPageVm;
use crate::shared::modal_stack::ModalHandle;

/// Create form for a car-wash/lubebay ticket. Tickets are never edited
/// after creation; corrections go through reject + re-entry.
#[component]
pub fn ChannelTransactionDetails(
    vm: ListPageVm<ChannelTransaction>,
    handle: ModalHandle,
) -> impl IntoView {
    let form = RwSignal::new(ChannelTransactionDraft::default());
    let errors = RwSignal::new(FieldErrors::new());
    let saving = RwSignal::new(false);

    let error_for = move |field: &'static str| {
        Signal::derive(move || errors.with(|e| e.get(field).map(str::to_string)))
    };
    let vehicle_error = error_for("vehicle_no");
    let service_error = error_for("service");
    let attendant_error = error_for("attendant");
    let amount_error = error_for("amount");

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
        vm.create(draft.to_payload(), on_done);
    };

    view! {
        <div class="details-container channel-transaction-details">
            <div class="details-header">
                <h3>{"New service ticket"}</h3>
            </div>

            <div class="details-form">
                <div class="form-group">
                    <label for="channel">{"Channel"}</label>
                    <select
                        id="channel"
                        on:change=move |ev| {
                            let channel = match event_target_value(&ev).as_str() {
                                "lubebay" => ServiceChannel::Lubebay,
                                _ => ServiceChannel::CarWash,
                            };
                            form.update(|f| f.channel = channel);
                        }
                        prop:value=move || form.get().channel.as_str().to_string()
                    >
                        <option value="car_wash">"Car wash"</option>
                        <option value="lubebay">"Lubebay"</option>
                    </select>
                </div>

                <div class="form-group">
                    <label for="vehicle_no">{"Vehicle number"}</label>
                    <input
                        type="text"
                        id="vehicle_no"
                        prop:value=move || form.get().vehicle_no
                        on:input=move |ev| form.update(|f| f.vehicle_no = event_target_value(&ev))
                        placeholder="e.g. ABC-123-XY"
                    />
                    {move || vehicle_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
                </div>

                <div class="form-group">
                    <label for="service">{"Service"}</label>
                    <input
                        type="text"
                        id="service"
                        prop:value=move || form.get().service
                        on:input=move |ev| form.update(|f| f.service = event_target_value(&ev))
                        placeholder="e.g. Executive wash, oil change"
                    />
                    {move || service_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
                </div>

                <div class="form-group">
                    <label for="attendant">{"Attendant"}</label>
                    <input
                        type="text"
                        id="attendant"
                        prop:value=move || form.get().attendant
                        on:input=move |ev| form.update(|f| f.attendant = event_target_value(&ev))
                    />
                    {move || attendant_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
                </div>

                <div class="form-group">
                    <label for="amount">{"Amount"}</label>
                    <input
                        type="text"
                        id="amount"
                        prop:value=move || form.get().amount
                        on:input=move |ev| form.update(|f| f.amount = event_target_value(&ev))
                        placeholder="0.00"
                    />
                    {move || amount_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
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
