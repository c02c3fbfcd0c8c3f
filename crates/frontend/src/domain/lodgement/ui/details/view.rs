use super::view_model::LodgementDetailsVm;
use contracts::domain::lodgement::Lodgement;
use leptos::prelude::*;

use crate::shared::listing::ListPageVm;
use crate::shared::modal_stack::ModalHandle;

#[component]
pub fn LodgementDetails(
    vm: ListPageVm<Lodgement>,
    record: Option<Lodgement>,
    handle: ModalHandle,
) -> impl IntoView {
    let details = LodgementDetailsVm::new(record.as_ref());
    let is_edit = details.is_edit_mode();

    let form = details.form;
    let saving = details.saving;
    let teller_error = details.error_for("teller_no");
    let account_error = details.error_for("account_name");
    let bank_error = details.error_for("bank");
    let amount_error = details.error_for("amount");
    let date_error = details.error_for("lodged_on");

    let details_for_save = details.clone();
    let handle_for_save = handle.clone();
    let handle_for_cancel = handle.clone();

    view! {
        <div class="details-container lodgement-details">
            <div class="details-header">
                <h3>{if is_edit { "Edit lodgement" } else { "New lodgement" }}</h3>
            </div>

            <div class="details-form">
                <div class="form-group">
                    <label for="teller_no">{"Teller number"}</label>
                    <input
                        type="text"
                        id="teller_no"
                        prop:value=move || form.get().teller_no
                        on:input=move |ev| form.update(|f| f.teller_no = event_target_value(&ev))
                        placeholder="e.g. TL-0042"
                    />
                    {move || teller_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
                </div>

                <div class="form-group">
                    <label for="account_name">{"Account name"}</label>
                    <input
                        type="text"
                        id="account_name"
                        prop:value=move || form.get().account_name
                        on:input=move |ev| form.update(|f| f.account_name = event_target_value(&ev))
                        placeholder="Account the money was lodged into"
                    />
                    {move || account_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
                </div>

                <div class="form-group">
                    <label for="bank">{"Bank"}</label>
                    <input
                        type="text"
                        id="bank"
                        prop:value=move || form.get().bank
                        on:input=move |ev| form.update(|f| f.bank = event_target_value(&ev))
                    />
                    {move || bank_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
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

                <div class="form-group">
                    <label for="lodged_on">{"Lodged on"}</label>
                    <input
                        type="date"
                        id="lodged_on"
                        prop:value=move || form.get().lodged_on
                        on:input=move |ev| form.update(|f| f.lodged_on = event_target_value(&ev))
                    />
                    {move || date_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
                </div>

                <div class="form-group">
                    <label for="remarks">{"Remarks"}</label>
                    <textarea
                        id="remarks"
                        prop:value=move || form.get().remarks
                        on:input=move |ev| form.update(|f| f.remarks = event_target_value(&ev))
                    ></textarea>
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
                    on:click=move |_| details_for_save.save(vm, handle_for_save.clone())
                    disabled=move || saving.get()
                >
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </button>
            </div>
        </div>
    }
}
