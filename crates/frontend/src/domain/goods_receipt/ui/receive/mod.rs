//! Storekeeper receiving screen: enter the waybill, count what actually
//! arrived, review the variance summary, then post the receipt.

use contracts::domain::common::{FieldErrors, Identified};
use contracts::domain::goods_receipt::{reconcile, GoodsReceiptDraft, LineVariance, ReceiptLineDraft};
use contracts::domain::substore::Substore;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::shared::api::Api;
use crate::shared::icons::icon;
use crate::shared::listing::{normalize, QueryCacheService};
use crate::shared::toast::ToastService;

#[component]
#[allow(non_snake_case)]
pub fn ReceiveGoodsPage() -> impl IntoView {
    let cache = use_context::<QueryCacheService>()
        .expect("QueryCacheService not provided in context (provide it in app root)");
    let toasts = use_context::<ToastService>()
        .expect("ToastService not provided in context (provide it in app root)");

    let form = RwSignal::new(GoodsReceiptDraft::default());
    let errors = RwSignal::new(FieldErrors::new());
    let saving = RwSignal::new(false);

    let substores = RwSignal::new(Vec::<(String, String)>::new());
    spawn_local(async move {
        match Api::new().get("/api/substores?page=1&page_size=200").await {
            Ok(body) => {
                let page = normalize::<Substore>(body, 200);
                let options: Vec<(String, String)> = page
                    .items
                    .iter()
                    .map(|substore| (substore.entity_id().as_string(), substore.name.clone()))
                    .collect();
                let _ = substores.try_set(options);
            }
            Err(err) => log::warn!("substore options fetch failed: {}", err),
        }
    });

    let error_for = move |field: String| errors.with(|e| e.get(&field).map(str::to_string));

    // Row recreation is keyed on this; it only fires when a line is
    // added or removed, not on every keystroke.
    let line_count = Memo::new(move |_| form.with(|f| f.lines.len()));

    // Variance summary over the lines that already parse; recomputed on
    // every keystroke, cheap single pass.
    let summary = Signal::derive(move || {
        let lines: Vec<_> = form
            .get()
            .lines
            .iter()
            .filter_map(ReceiptLineDraft::to_line)
            .collect();
        reconcile(&lines)
    });

    let add_line = move |_| {
        form.update(|f| f.lines.push(ReceiptLineDraft::default()));
    };

    let remove_line = move |index: usize| {
        form.update(|f| {
            if index < f.lines.len() {
                f.lines.remove(index);
            }
        });
    };

    let post_receipt = move |_| {
        let draft = form.get_untracked();
        let client_errors = draft.validate();
        if !client_errors.is_empty() {
            errors.set(client_errors);
            return;
        }
        errors.set(FieldErrors::new());

        let lines: Vec<_> = draft.lines.iter().filter_map(ReceiptLineDraft::to_line).collect();
        if reconcile(&lines).has_variance() {
            let confirmed = web_sys::window()
                .map(|win| {
                    win.confirm_with_message(
                        "Received quantities differ from the waybill. Post with variance?",
                    )
                    .unwrap_or(false)
                })
                .unwrap_or(false);
            if !confirmed {
                return;
            }
        }

        saving.set(true);
        spawn_local(async move {
            let result = Api::new()
                .post("/api/goods-receipts", Some(&draft.to_payload()))
                .await;
            let _ = saving.try_set(false);
            match result {
                Ok(_) => {
                    cache.invalidate_resource("goods-receipts");
                    // receiving changes substore stock levels too
                    cache.invalidate_resource("substores");
                    toasts.success("Goods receipt posted");
                    let _ = form.try_set(GoodsReceiptDraft::default());
                }
                Err(err) => {
                    toasts.error(err.message.clone());
                    let _ = errors.try_update(|e| e.merge(err.field_errors.clone()));
                }
            }
        });
    };

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Receive goods"}</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--secondary" on:click=add_line>
                        {icon("plus")}
                        {"Add line"}
                    </button>
                    <button
                        class="button button--primary"
                        on:click=post_receipt
                        disabled=move || saving.get()
                    >
                        {move || if saving.get() { "Posting..." } else { "Post receipt" }}
                    </button>
                </div>
            </div>

            <div class="details-form">
                <div class="form-group">
                    <label for="waybill_no">{"Waybill number"}</label>
                    <input
                        type="text"
                        id="waybill_no"
                        prop:value=move || form.get().waybill_no
                        on:input=move |ev| form.update(|f| f.waybill_no = event_target_value(&ev))
                        placeholder="e.g. WB-1207"
                    />
                    {move || error_for("waybill_no".to_string()).map(|e| view! { <div class="field-error">{e}</div> })}
                </div>

                <div class="form-group">
                    <label for="substore_id">{"Substore"}</label>
                    <select
                        id="substore_id"
                        on:change=move |ev| form.update(|f| f.substore_id = event_target_value(&ev))
                        prop:value=move || form.get().substore_id
                    >
                        <option value="">"Select a substore"</option>
                        {move || substores.get().into_iter().map(|(id, name)| {
                            view! { <option value={id}>{name}</option> }
                        }).collect_view()}
                    </select>
                    {move || error_for("substore_id".to_string()).map(|e| view! { <div class="field-error">{e}</div> })}
                </div>

                <div class="form-group">
                    <label for="received_on">{"Received on"}</label>
                    <input
                        type="date"
                        id="received_on"
                        prop:value=move || form.get().received_on
                        on:input=move |ev| form.update(|f| f.received_on = event_target_value(&ev))
                    />
                    {move || error_for("received_on".to_string()).map(|e| view! { <div class="field-error">{e}</div> })}
                </div>
            </div>

            {move || error_for("lines".to_string()).map(|e| view! { <div class="field-error">{e}</div> })}

            <div class="table">
                <table class="table__data">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">{"Product"}</th>
                            <th class="table__header-cell">{"Unit"}</th>
                            <th class="table__header-cell table__header-cell--right">{"Expected"}</th>
                            <th class="table__header-cell table__header-cell--right">{"Received"}</th>
                            <th class="table__header-cell">{"Variance"}</th>
                            <th class="table__header-cell">{""}</th>
                        </tr>
                    </thead>
                    <tbody>
                        // Rows are keyed off the line count, not the line
                        // contents; typing updates input properties in
                        // place instead of recreating the row (and losing
                        // focus). Errors only change on submit.
                        {move || {
                        let line_errors = errors.get();
                        (0..line_count.get()).map(|index| {
                            let line_field = move |read: fn(&ReceiptLineDraft) -> String| {
                                form.with(|f| f.lines.get(index).map(read).unwrap_or_default())
                            };
                            view! {
                                <tr class="table__row">
                                    <td class="table__cell">
                                        <input
                                            type="text"
                                            prop:value=move || line_field(|l| l.product.clone())
                                            on:input=move |ev| form.update(|f| {
                                                if let Some(l) = f.lines.get_mut(index) {
                                                    l.product = event_target_value(&ev);
                                                }
                                            })
                                        />
                                        {line_errors.get(&format!("lines[{}].product", index)).map(|e| view! { <div class="field-error">{e.to_string()}</div> })}
                                    </td>
                                    <td class="table__cell">
                                        <input
                                            type="text"
                                            prop:value=move || line_field(|l| l.unit.clone())
                                            on:input=move |ev| form.update(|f| {
                                                if let Some(l) = f.lines.get_mut(index) {
                                                    l.unit = event_target_value(&ev);
                                                }
                                            })
                                        />
                                    </td>
                                    <td class="table__cell table__cell--right">
                                        <input
                                            type="text"
                                            prop:value=move || line_field(|l| l.expected_qty.clone())
                                            on:input=move |ev| form.update(|f| {
                                                if let Some(l) = f.lines.get_mut(index) {
                                                    l.expected_qty = event_target_value(&ev);
                                                }
                                            })
                                        />
                                        {line_errors.get(&format!("lines[{}].expected_qty", index)).map(|e| view! { <div class="field-error">{e.to_string()}</div> })}
                                    </td>
                                    <td class="table__cell table__cell--right">
                                        <input
                                            type="text"
                                            prop:value=move || line_field(|l| l.received_qty.clone())
                                            on:input=move |ev| form.update(|f| {
                                                if let Some(l) = f.lines.get_mut(index) {
                                                    l.received_qty = event_target_value(&ev);
                                                }
                                            })
                                        />
                                        {line_errors.get(&format!("lines[{}].received_qty", index)).map(|e| view! { <div class="field-error">{e.to_string()}</div> })}
                                    </td>
                                    <td class="table__cell">
                                        {move || {
                                            let variance = form.with(|f| {
                                                f.lines.get(index).and_then(ReceiptLineDraft::to_line).map(|l| l.variance())
                                            });
                                            match variance {
                                                Some(LineVariance::Exact) => view! { <span class="badge badge--success">{"Exact"}</span> }.into_any(),
                                                Some(LineVariance::Short(qty)) => view! { <span class="badge badge--danger">{format!("Short {}", qty)}</span> }.into_any(),
                                                Some(LineVariance::Over(qty)) => view! { <span class="badge badge--warning">{format!("Over {}", qty)}</span> }.into_any(),
                                                None => view! { <span class="badge badge--neutral">{"-"}</span> }.into_any(),
                                            }
                                        }}
                                    </td>
                                    <td class="table__cell table__cell--actions">
                                        <button
                                            class="button button--small button--danger"
                                            on:click=move |_| remove_line(index)
                                        >
                                            {icon("x")}
                                        </button>
                                    </td>
                                </tr>
                            }
                        }).collect_view()
                        }}
                    </tbody>
                </table>
            </div>

            <div class="summary-strip">
                {move || {
                    let summary = summary.get();
                    view! {
                        <span class="summary-strip__item">{format!("Expected: {}", summary.total_expected)}</span>
                        <span class="summary-strip__item">{format!("Received: {}", summary.total_received)}</span>
                        <span class="summary-strip__item">{format!("Exact: {}", summary.exact_lines)}</span>
                        <span class="summary-strip__item summary-strip__item--danger">{format!("Short: {}", summary.short_lines)}</span>
                        <span class="summary-strip__item summary-strip__item--warning">{format!("Over: {}", summary.over_lines)}</span>
                    }
                }}
            </div>
        </div>
    }
}
