//! Leptos-side wiring for one list screen.
//!
//! `ListPageVm` owns the pure query/selection machine in a signal and
//! runs its fetch plans and mutations against the HTTP client, the
//! query cache and the toast service. Pages bind markup to it instead
//! of hand-rolling fetch loops.

use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde_json::Value;
use wasm_bindgen_futures::spawn_local;

use contracts::domain::common::{EntityId, Identified};

use crate::shared::api::{Api, ApiError};
use crate::shared::toast::{ToastKind, ToastService};

use super::cache::QueryCacheService;
use super::controller::{FetchPlan, ListQueryController};
use super::mutation::{
    settle_bulk_delete, BulkDeleteReport, MutationKind, MutationToken, MutationTracker,
};

enum Verb {
    Post,
    Put,
    Delete,
}

pub struct ListPageVm<T: Send + Sync + 'static> {
    resource: &'static str,
    /// Capitalized singular, used in toast copy ("Lodgement created").
    entity_label: &'static str,
    api: StoredValue<Api>,
    pub ctrl: RwSignal<ListQueryController<T>>,
    pub tracker: RwSignal<MutationTracker>,
    cache: QueryCacheService,
    toasts: ToastService,
}

impl<T: Send + Sync + 'static> Clone for ListPageVm<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ListPageVm<T> {}

impl<T> ListPageVm<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Must be called inside a component; pulls the cache and toast
    /// services from context.
    pub fn new(resource: &'static str, entity_label: &'static str) -> Self {
        let cache = use_context::<QueryCacheService>()
            .expect("QueryCacheService not provided in context (provide it in app root)");
        let toasts = use_context::<ToastService>()
            .expect("ToastService not provided in context (provide it in app root)");
        Self {
            resource,
            entity_label,
            api: StoredValue::new(Api::new()),
            ctrl: RwSignal::new(ListQueryController::new(resource)),
            tracker: RwSignal::new(MutationTracker::new()),
            cache,
            toasts,
        }
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    pub fn toasts(&self) -> ToastService {
        self.toasts
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn load(&self) {
        let plan = self.ctrl.write().refetch();
        self.run(plan);
    }

    /// Safe to call from async completions: does nothing if the screen
    /// has unmounted and its controller was disposed.
    pub fn refetch(&self) {
        if let Some(plan) = self.ctrl.try_update(|c| c.refetch()) {
            self.run(plan);
        }
    }

    pub fn set_search(&self, term: String) {
        let plan = self.ctrl.write().set_search(term);
        self.run(plan);
    }

    pub fn set_filter(&self, name: &'static str, value: String) {
        let value = if value.trim().is_empty() { None } else { Some(value) };
        let plan = self.ctrl.write().set_filter(name, value.as_deref());
        self.run(plan);
    }

    pub fn set_page(&self, page: usize) {
        let plan = self.ctrl.write().set_page(page);
        if let Some(plan) = plan {
            self.run(plan);
        }
    }

    pub fn set_page_size(&self, page_size: usize) {
        let plan = self.ctrl.write().set_page_size(page_size);
        self.run(plan);
    }

    fn run(&self, plan: FetchPlan) {
        // Cache-first: a cached body renders immediately. It still goes
        // through apply_success so the staleness rule holds everywhere.
        if let Some(cached) = self.cache.get(&plan.key) {
            self.ctrl.write().apply_success(&plan, cached);
            return;
        }
        let vm = *self;
        spawn_local(async move {
            match vm.api.get_value().get(&plan.path).await {
                Ok(body) => {
                    let value = body.unwrap_or(Value::Null);
                    // try_update: a screen that unmounted mid-flight
                    // simply drops the response
                    let committed = vm.ctrl.try_update(|c| c.apply_success(&plan, value.clone()));
                    if committed == Some(true) {
                        vm.cache.insert(plan.key.clone(), value);
                    }
                }
                Err(err) => {
                    log::warn!("{} list fetch failed: {}", vm.resource, err);
                    let _ = vm.ctrl.try_update(|c| c.apply_error(&plan, err.message.clone()));
                }
            }
        });
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn set_selected(&self, id: EntityId, on: bool) {
        self.ctrl.write().selection.set(id, on);
    }

    pub fn clear_selection(&self) {
        self.ctrl.write().selection.clear();
    }

    pub fn selected_count(&self) -> Signal<usize> {
        let ctrl = self.ctrl;
        Signal::derive(move || ctrl.with(|c| c.selection.len()))
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    pub fn create(&self, payload: Value, on_done: Callback<Result<(), ApiError>>) {
        self.submit(
            MutationToken::new(MutationKind::Create),
            Verb::Post,
            format!("/api/{}", self.resource),
            Some(payload),
            format!("{} created", self.entity_label),
            Some(on_done),
        );
    }

    pub fn update(&self, id: EntityId, payload: Value, on_done: Callback<Result<(), ApiError>>) {
        self.submit(
            MutationToken::for_target(MutationKind::Update, id.clone()),
            Verb::Put,
            format!("/api/{}/{}", self.resource, id),
            Some(payload),
            format!("{} updated", self.entity_label),
            Some(on_done),
        );
    }

    pub fn delete_one(&self, id: EntityId) {
        self.submit(
            MutationToken::for_target(MutationKind::Delete, id.clone()),
            Verb::Delete,
            format!("/api/{}/{}", self.resource, id),
            None,
            format!("{} deleted", self.entity_label),
            None,
        );
    }

    /// Status transition (`POST /api/<resource>/<id>/<action>`).
    pub fn transition(&self, id: EntityId, action: &'static str) {
        let kind = MutationKind::Transition(action.to_string());
        let message = format!("{} {}", self.entity_label, kind.verb());
        self.submit(
            MutationToken::for_target(kind, id.clone()),
            Verb::Post,
            format!("/api/{}/{}/{}", self.resource, id, action),
            None,
            message,
            None,
        );
    }

    fn submit(
        &self,
        token: MutationToken,
        verb: Verb,
        path: String,
        body: Option<Value>,
        success_message: String,
        on_done: Option<Callback<Result<(), ApiError>>>,
    ) {
        if !self.tracker.write().begin(token.clone()) {
            return;
        }
        let vm = *self;
        spawn_local(async move {
            let api = vm.api.get_value();
            let result = match verb {
                Verb::Post => api.post(&path, body.as_ref()).await,
                Verb::Put => api.put(&path, body.as_ref().unwrap_or(&Value::Null)).await,
                Verb::Delete => api.delete(&path).await,
            };
            let _ = vm.tracker.try_update(|t| t.finish(&token));
            match result {
                Ok(_) => {
                    vm.cache.invalidate_resource(vm.resource);
                    vm.toasts.success(success_message);
                    vm.refetch();
                    if let Some(on_done) = on_done {
                        on_done.run(Ok(()));
                    }
                }
                Err(err) => {
                    // The modal (if any) stays open; the caller merges
                    // field errors inline while the toast reports the
                    // failure. State before the call stays authoritative.
                    vm.toasts.error(err.message.clone());
                    if let Some(on_done) = on_done {
                        on_done.run(Err(err));
                    }
                }
            }
        });
    }

    /// One-request bulk delete of the current selection, with
    /// partial-failure settlement.
    pub fn bulk_delete(&self) {
        let ids = self.ctrl.with_untracked(|c| c.selection.ids());
        if ids.is_empty() {
            return;
        }
        let token = MutationToken::new(MutationKind::BulkDelete);
        if !self.tracker.write().begin(token.clone()) {
            return;
        }
        let vm = *self;
        spawn_local(async move {
            let body = serde_json::json!({ "ids": ids });
            let result = vm
                .api
                .get_value()
                .post(&format!("/api/{}/bulk-delete", vm.resource), Some(&body))
                .await;
            let _ = vm.tracker.try_update(|t| t.finish(&token));
            match result {
                Ok(raw) => {
                    let report = raw
                        .and_then(|value| serde_json::from_value::<BulkDeleteReport>(value).ok())
                        .unwrap_or_else(|| BulkDeleteReport::all_deleted(ids.len()));
                    let label = vm.entity_label.to_lowercase();
                    let message = vm.ctrl.try_update(|ctrl| {
                        settle_bulk_delete(&mut ctrl.selection, &ids, &report, &label)
                    });
                    vm.cache.invalidate_resource(vm.resource);
                    if let Some(message) = message {
                        if report.failed_count == 0 {
                            vm.toasts.success(message);
                        } else {
                            vm.toasts.push(ToastKind::Warning, "Partial delete", message);
                        }
                    }
                    vm.refetch();
                }
                Err(err) => {
                    vm.toasts.error(err.message);
                }
            }
        });
    }

    /// Pending flag for one button, as a derived signal.
    pub fn pending(&self, token: MutationToken) -> Signal<bool> {
        let tracker = self.tracker;
        Signal::derive(move || tracker.with(|t| t.is_pending(&token)))
    }
}

impl<T> ListPageVm<T>
where
    T: DeserializeOwned + Identified + Clone + Send + Sync + 'static,
{
    pub fn toggle_all(&self) {
        self.ctrl.write().toggle_all_visible();
    }
}
