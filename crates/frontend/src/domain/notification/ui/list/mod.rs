//! Notification center: the feed plus the per-user delivery toggles.

use crate::shared::components::PaginationControls;
use crate::shared::icons::icon;
use crate::shared::listing::{ListPageVm, MutationKind, MutationToken, QueryCacheService};
use crate::shared::toast::ToastService;
use contracts::domain::common::Identified;
use contracts::domain::notification::{Notification, NotificationPreferences};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::shared::api::Api;

#[component]
#[allow(non_snake_case)]
pub fn NotificationList() -> impl IntoView {
    let vm: ListPageVm<Notification> = ListPageVm::new("notifications", "Notification");
    let toasts = use_context::<ToastService>()
        .expect("ToastService not provided in context (provide it in app root)");
    let cache = use_context::<QueryCacheService>()
        .expect("QueryCacheService not provided in context (provide it in app root)");

    vm.load();

    // Preferences are a single record, loaded next to the feed.
    let preferences = RwSignal::new(NotificationPreferences::default());
    let preferences_loaded = RwSignal::new(false);
    spawn_local(async move {
        match Api::new().get("/api/notifications/preferences").await {
            Ok(Some(body)) => {
                if let Ok(prefs) = serde_json::from_value::<NotificationPreferences>(body) {
                    let _ = preferences.try_set(prefs);
                }
                let _ = preferences_loaded.try_set(true);
            }
            Ok(None) => {
                let _ = preferences_loaded.try_set(true);
            }
            Err(err) => log::warn!("preferences fetch failed: {}", err),
        }
    });

    let mark_all_read = move |_| {
        spawn_local(async move {
            let result = Api::new().post("/api/notifications/mark-all-read", None).await;
            match result {
                Ok(_) => {
                    cache.invalidate_resource("notifications");
                    toasts.success("All notifications marked read");
                    vm.refetch();
                }
                Err(err) => toasts.error(err.message),
            }
        });
    };

    let saving_preferences = RwSignal::new(false);
    let save_preferences = move |_| {
        let prefs = preferences.get_untracked();
        saving_preferences.set(true);
        spawn_local(async move {
            let body = serde_json::to_value(prefs).unwrap_or_default();
            let result = Api::new().put("/api/notifications/preferences", &body).await;
            let _ = saving_preferences.try_set(false);
            match result {
                Ok(_) => toasts.success("Notification preferences saved"),
                Err(err) => toasts.error(err.message),
            }
        });
    };

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{icon("bell")}{"Notifications"}</h1>
                </div>
                <div class="header__actions">
                    <select
                        class="filter-select"
                        on:change=move |ev| vm.set_filter("read", event_target_value(&ev))
                    >
                        <option value="">"All"</option>
                        <option value="false">"Unread"</option>
                        <option value="true">"Read"</option>
                    </select>
                    <button class="button button--secondary" on:click=mark_all_read>
                        {icon("check")}
                        {"Mark all read"}
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

            <div class="notification-feed">
                {move || vm.ctrl.with(|c| c.items().to_vec()).into_iter().map(|record| {
                    let id = record.entity_id();
                    let token = MutationToken::for_target(
                        MutationKind::Transition("mark-read".to_string()),
                        id.clone(),
                    );
                    let pending = vm.pending(token);
                    let read = record.read;
                    view! {
                        <div class="notification-card" class:notification-card--unread=!read>
                            <div class="notification-card__body">
                                <div class="notification-card__title">{record.title.clone()}</div>
                                <div class="notification-card__text">{record.body.clone()}</div>
                            </div>
                            {(!read).then(|| {
                                let id = id.clone();
                                view! {
                                    <button
                                        class="button button--small"
                                        on:click=move |_| vm.transition(id.clone(), "mark-read")
                                        disabled=move || pending.get()
                                    >
                                        {icon("check")}
                                        {"Mark read"}
                                    </button>
                                }
                            })}
                        </div>
                    }
                }).collect_view()}
            </div>

            <PaginationControls
                current_page=Signal::derive(move || vm.ctrl.with(|c| c.query.page))
                total_pages=Signal::derive(move || vm.ctrl.with(|c| c.total_pages()))
                total_count=Signal::derive(move || vm.ctrl.with(|c| c.total_count()))
                page_size=Signal::derive(move || vm.ctrl.with(|c| c.query.page_size))
                on_page_change=Callback::new(move |page| vm.set_page(page))
                on_page_size_change=Callback::new(move |size| vm.set_page_size(size))
            />

            <div class="preferences-panel">
                <h2 class="preferences-panel__title">{"Delivery preferences"}</h2>
                {move || {
                    if !preferences_loaded.get() {
                        return view! { <div class="preferences-panel__loading">{"Loading..."}</div> }.into_any();
                    }
                    preferences.get().toggles().into_iter().map(|(key, label, value)| {
                        view! {
                            <div class="preferences-panel__row">
                                <input
                                    type="checkbox"
                                    id={key}
                                    prop:checked=value
                                    on:change=move |ev| {
                                        let checked = event_target_checked(&ev);
                                        preferences.update(|p| p.set(key, checked));
                                    }
                                />
                                <label for={key}>{label}</label>
                            </div>
                        }
                    }).collect_view().into_any()
                }}
                <button
                    class="button button--primary"
                    on:click=save_preferences
                    disabled=move || saving_preferences.get()
                >
                    {move || if saving_preferences.get() { "Saving..." } else { "Save preferences" }}
                </button>
            </div>
        </div>
    }
}
