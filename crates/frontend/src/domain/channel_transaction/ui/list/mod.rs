use crate::domain::channel_transaction::ui::details::ChannelTransactionDetails;
use crate::shared::components::{
    PaginationControls, SearchInput, StatusBadge, TableCheckbox, TableHeaderCheckbox,
};
use crate::shared::icons::icon;
use crate::shared::listing::{ListPageVm, MutationKind, MutationToken};
use crate::shared::modal_stack::ModalStackService;
use contracts::domain::channel_transaction::{ChannelTransaction, ChannelTransactionStatus};
use contracts::domain::common::Identified;
use leptos::prelude::*;

fn status_tone(status: ChannelTransactionStatus) -> &'static str {
    match status {
        ChannelTransactionStatus::Pending => "neutral",
        ChannelTransactionStatus::AwaitingConfirmation => "warning",
        ChannelTransactionStatus::Confirmed => "success",
        ChannelTransactionStatus::Rejected => "danger",
    }
}

#[component]
#[allow(non_snake_case)]
pub fn ChannelTransactionList() -> impl IntoView {
    let vm: ListPageVm<ChannelTransaction> =
        ListPageVm::new("channel-transactions", "Transaction");
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");

    vm.load();

    let open_new = move || {
        modal_stack.clear();
        modal_stack.push_sized(
            "max-width: min(640px, 95vw); width: min(640px, 95vw);",
            move |handle| {
                view! { <ChannelTransactionDetails vm=vm handle=handle /> }.into_any()
            },
        );
    };

    let delete_selected = move || {
        let count = vm.ctrl.with_untracked(|c| c.selection.len());
        if count == 0 {
            return;
        }
        let confirmed = web_sys::window()
            .map(|win| {
                win.confirm_with_message(&format!("Delete the selected tickets? Count: {}", count))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if confirmed {
            vm.bulk_delete();
        }
    };

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Car wash & lubebay"}</h1>
                </div>
                <div class="header__actions">
                    <SearchInput
                        value=Signal::derive(move || vm.ctrl.with(|c| c.query.search.clone()))
                        on_change=Callback::new(move |term: String| vm.set_search(term))
                        placeholder="Search vehicle or attendant...".to_string()
                    />
                    <select
                        class="filter-select"
                        on:change=move |ev| vm.set_filter("channel", event_target_value(&ev))
                    >
                        <option value="">"All channels"</option>
                        <option value="car_wash">"Car wash"</option>
                        <option value="lubebay">"Lubebay"</option>
                    </select>
                    <select
                        class="filter-select"
                        on:change=move |ev| vm.set_filter("status", event_target_value(&ev))
                    >
                        <option value="">"All statuses"</option>
                        <option value="pending">"Pending"</option>
                        <option value="awaiting_confirmation">"Awaiting confirmation"</option>
                        <option value="confirmed">"Confirmed"</option>
                        <option value="rejected">"Rejected"</option>
                    </select>
                    <button class="button button--primary" on:click=move |_| open_new()>
                        {icon("plus")}
                        {"New ticket"}
                    </button>
                    <button class="button button--secondary" on:click=move |_| vm.refetch()>
                        {icon("refresh")}
                        {"Refresh"}
                    </button>
                    <button
                        class="button button--secondary"
                        on:click=move |_| delete_selected()
                        disabled=move || vm.selected_count().get() == 0
                    >
                        {icon("delete")}
                        {move || format!("Delete ({})", vm.selected_count().get())}
                    </button>
                </div>
            </div>

            {move || vm.ctrl.with(|c| c.error().map(str::to_string)).map(|message| view! {
                <div class="error-panel">
                    <span class="error-panel__text">{message}</span>
                    <button class="button button--secondary" on:click=move |_| vm.refetch()>
                        {icon("refresh")}
                        {"Retry"}
                    </button>
                </div>
            })}

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <TableHeaderCheckbox
                                all_selected=Signal::derive(move || vm.ctrl.with(|c| c.is_all_visible_selected()))
                                partially_selected=Signal::derive(move || vm.ctrl.with(|c| c.is_partially_visible_selected()))
                                on_change=Callback::new(move |_| vm.toggle_all())
                            />
                            <th class="table__header-cell">{"Channel"}</th>
                            <th class="table__header-cell">{"Vehicle"}</th>
                            <th class="table__header-cell">{"Service"}</th>
                            <th class="table__header-cell">{"Attendant"}</th>
                            <th class="table__header-cell table__header-cell--right">{"Amount"}</th>
                            <th class="table__header-cell">{"Status"}</th>
                            <th class="table__header-cell">{"Actions"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || vm.ctrl.with(|c| c.items().to_vec()).into_iter().map(|record| {
                            let id = record.entity_id();
                            let id_for_checkbox = id.clone();
                            let id_for_toggle = id.clone();
                            let status = record.status;
                            view! {
                                <tr class="table__row">
                                    <TableCheckbox
                                        checked=Signal::derive(move || vm.ctrl.with(|c| c.selection.is_selected(&id_for_checkbox)))
                                        on_change=Callback::new(move |checked| vm.set_selected(id_for_toggle.clone(), checked))
                                    />
                                    <td class="table__cell">{record.channel.label()}</td>
                                    <td class="table__cell">{record.vehicle_no.clone()}</td>
                                    <td class="table__cell">{record.service.clone()}</td>
                                    <td class="table__cell">{record.attendant.clone()}</td>
                                    <td class="table__cell table__cell--right">{format!("{:.2}", record.amount)}</td>
                                    <td class="table__cell">
                                        <StatusBadge label=status.label() tone=status_tone(status) />
                                    </td>
                                    <td class="table__cell table__cell--actions">
                                        {status.transitions().iter().map(|&action| {
                                            let action_id = id.clone();
                                            let token = MutationToken::for_target(
                                                MutationKind::Transition(action.to_string()),
                                                action_id.clone(),
                                            );
                                            let pending = vm.pending(token);
                                            view! {
                                                <button
                                                    class="button button--small"
                                                    on:click=move |_| vm.transition(action_id.clone(), action)
                                                    disabled=move || pending.get()
                                                >
                                                    {action}
                                                </button>
                                            }
                                        }).collect_view()}
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </div>

            <PaginationControls
                current_page=Signal::derive(move || vm.ctrl.with(|c| c.query.page))
                total_pages=Signal::derive(move || vm.ctrl.with(|c| c.total_pages()))
                total_count=Signal::derive(move || vm.ctrl.with(|c| c.total_count()))
                page_size=Signal::derive(move || vm.ctrl.with(|c| c.query.page_size))
                on_page_change=Callback::new(move |page| vm.set_page(page))
                on_page_size_change=Callback::new(move |size| vm.set_page_size(size))
            />
        </div>
    }
}
