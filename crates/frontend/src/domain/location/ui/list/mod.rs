use crate::domain::location::ui::details::LocationDetails;
use crate::shared::components::{PaginationControls, SearchInput};
use crate::shared::icons::icon;
use crate::shared::listing::ListPageVm;
use crate::shared::modal_stack::ModalStackService;
use contracts::domain::common::{EntityId, Identified};
use contracts::domain::location::Location;
use leptos::prelude::*;

#[component]
#[allow(non_snake_case)]
pub fn LocationList() -> impl IntoView {
    let vm: ListPageVm<Location> = ListPageVm::new("locations", "Location");
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");

    vm.load();

    let open_details = move |record: Option<Location>| {
        modal_stack.clear();
        modal_stack.push_sized(
            "max-width: min(560px, 95vw); width: min(560px, 95vw);",
            move |handle| {
                view! { <LocationDetails vm=vm record=record.clone() handle=handle /> }.into_any()
            },
        );
    };

    let handle_edit = move |id: EntityId| {
        let record = vm
            .ctrl
            .with_untracked(|c| c.items().iter().find(|r| r.entity_id() == id).cloned());
        if record.is_some() {
            open_details(record);
        }
    };

    let delete_one = move |name: String, id: EntityId| {
        let confirmed = web_sys::window()
            .map(|win| {
                win.confirm_with_message(&format!("Delete location \"{}\"?", name))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if confirmed {
            vm.delete_one(id);
        }
    };

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Locations"}</h1>
                </div>
                <div class="header__actions">
                    <SearchInput
                        value=Signal::derive(move || vm.ctrl.with(|c| c.query.search.clone()))
                        on_change=Callback::new(move |term: String| vm.set_search(term))
                        placeholder="Search locations...".to_string()
                    />
                    <button class="button button--primary" on:click=move |_| open_details(None)>
                        {icon("plus")}
                        {"New location"}
                    </button>
                    <button class="button button--secondary" on:click=move |_| vm.refetch()>
                        {icon("refresh")}
                        {"Refresh"}
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
                            <th class="table__header-cell">{"Name"}</th>
                            <th class="table__header-cell">{"Address"}</th>
                            <th class="table__header-cell">{"Region"}</th>
                            <th class="table__header-cell">{""}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || vm.ctrl.with(|c| c.items().to_vec()).into_iter().map(|record| {
                            let id = record.entity_id();
                            let id_for_click = id.clone();
                            let id_for_delete = id.clone();
                            let name_for_delete = record.name.clone();
                            view! {
                                <tr
                                    class="table__row"
                                    on:click=move |_| handle_edit(id_for_click.clone())
                                >
                                    <td class="table__cell">{record.name.clone()}</td>
                                    <td class="table__cell">{record.address.clone()}</td>
                                    <td class="table__cell">{record.region.clone()}</td>
                                    <td class="table__cell table__cell--actions" on:click=|e| e.stop_propagation()>
                                        <button
                                            class="button button--small button--danger"
                                            on:click=move |_| delete_one(name_for_delete.clone(), id_for_delete.clone())
                                        >
                                            {icon("delete")}
                                        </button>
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
