//! The list query state machine.
//!
//! One controller per list screen. Every query change issues a
//! generation-stamped `FetchPlan`; a response is only committed while
//! its plan is still the newest one, so a slow response for an old
//! query can never overwrite the current page.

use serde::de::DeserializeOwned;
use serde_json::Value;

use contracts::domain::common::{EntityId, Identified};

use super::envelope::{normalize, PageData};
use super::query::{ListQuery, QueryKey};
use super::selection::SelectionSet;

#[derive(Debug, Clone)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Ready(PageData<T>),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Ticket for one issued request. `generation` identifies the newest
/// query the screen cares about; older responses are dropped on arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    pub key: QueryKey,
    pub generation: u64,
    /// Request path, e.g. `/api/lodgements?page=1&page_size=20`.
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct ListQueryController<T> {
    resource: &'static str,
    pub query: ListQuery,
    pub selection: SelectionSet,
    state: LoadState<T>,
    generation: u64,
}

impl<T: DeserializeOwned> ListQueryController<T> {
    pub fn new(resource: &'static str) -> Self {
        Self {
            resource,
            query: ListQuery::default(),
            selection: SelectionSet::new(),
            state: LoadState::Idle,
            generation: 0,
        }
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    pub fn set_search(&mut self, term: impl Into<String>) -> FetchPlan {
        self.query.set_search(term);
        self.begin()
    }

    pub fn set_filter(&mut self, name: &str, value: Option<&str>) -> FetchPlan {
        self.query.set_filter(name, value);
        self.begin()
    }

    /// Page navigation clears the selection: it is page-scoped, and a
    /// bulk action must never reach rows that are no longer rendered.
    /// Returns `None` when already on the requested page.
    pub fn set_page(&mut self, page: usize) -> Option<FetchPlan> {
        let page = page.max(1);
        if page == self.query.page {
            return None;
        }
        self.selection.clear();
        self.query.set_page(page);
        Some(self.begin())
    }

    pub fn set_page_size(&mut self, page_size: usize) -> FetchPlan {
        self.selection.clear();
        self.query.set_page_size(page_size);
        self.begin()
    }

    /// Re-issue the current query unchanged (manual retry, or a refresh
    /// after a mutation).
    pub fn refetch(&mut self) -> FetchPlan {
        self.begin()
    }

    fn begin(&mut self) -> FetchPlan {
        self.generation += 1;
        self.state = LoadState::Loading;
        FetchPlan {
            key: QueryKey::list(self.resource, &self.query),
            generation: self.generation,
            path: format!("/api/{}{}", self.resource, self.query.request_query()),
        }
    }

    /// Commit a successful response. Returns `false` (and changes
    /// nothing) when a newer query was issued since the plan.
    pub fn apply_success(&mut self, plan: &FetchPlan, raw: Value) -> bool {
        if plan.generation != self.generation {
            return false;
        }
        self.state = LoadState::Ready(normalize(Some(raw), self.query.page_size));
        true
    }

    /// Same staleness rule as `apply_success`.
    pub fn apply_error(&mut self, plan: &FetchPlan, message: impl Into<String>) -> bool {
        if plan.generation != self.generation {
            return false;
        }
        self.state = LoadState::Failed(message.into());
        true
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn page_data(&self) -> Option<&PageData<T>> {
        match &self.state {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn items(&self) -> &[T] {
        self.page_data().map(|data| data.items.as_slice()).unwrap_or(&[])
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn total_count(&self) -> usize {
        self.page_data().map(|data| data.total_count).unwrap_or(0)
    }

    pub fn total_pages(&self) -> usize {
        self.page_data().map(|data| data.total_pages).unwrap_or(0)
    }
}

impl<T: DeserializeOwned + Identified> ListQueryController<T> {
    pub fn visible_ids(&self) -> Vec<EntityId> {
        self.items().iter().map(Identified::entity_id).collect()
    }

    pub fn toggle_all_visible(&mut self) {
        let ids = self.visible_ids();
        self.selection.toggle_all(&ids);
    }

    pub fn is_all_visible_selected(&self) -> bool {
        self.selection.is_all_selected(&self.visible_ids())
    }

    pub fn is_partially_visible_selected(&self) -> bool {
        self.selection.is_partially_selected(&self.visible_ids())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Row {
        id: i64,
        name: String,
    }

    impl Identified for Row {
        fn entity_id(&self) -> EntityId {
            EntityId::Int(self.id)
        }
    }

    fn page_body(ids: &[i64], count: u64) -> Value {
        let results: Vec<Value> = ids
            .iter()
            .map(|id| json!({ "id": id, "name": format!("row {}", id) }))
            .collect();
        json!({ "results": results, "count": count })
    }

    #[test]
    fn page_change_clears_the_selection() {
        let mut ctrl: ListQueryController<Row> = ListQueryController::new("lodgements");
        let plan = ctrl.refetch();
        ctrl.apply_success(&plan, page_body(&[1, 2, 3], 3));
        ctrl.toggle_all_visible();
        assert_eq!(ctrl.selection.len(), 3);

        assert!(ctrl.set_page(2).is_some());
        assert_eq!(ctrl.selection.len(), 0);
    }

    #[test]
    fn setting_the_current_page_is_a_no_op() {
        let mut ctrl: ListQueryController<Row> = ListQueryController::new("lodgements");
        ctrl.selection.toggle(EntityId::Int(1));
        assert!(ctrl.set_page(1).is_none());
        assert_eq!(ctrl.selection.len(), 1);
    }

    #[test]
    fn search_resets_pagination_before_the_fetch_goes_out() {
        let mut ctrl: ListQueryController<Row> = ListQueryController::new("lodgements");
        let _ = ctrl.set_page(2);
        let plan = ctrl.set_search("INV-00");
        assert_eq!(ctrl.query.page, 1);
        assert!(plan.path.contains("page=1"));
        assert!(plan.path.contains("search=INV-00"));
    }

    #[test]
    fn stale_responses_are_discarded_in_either_arrival_order() {
        let mut ctrl: ListQueryController<Row> = ListQueryController::new("lodgements");
        let plan_k1 = ctrl.set_search("a");
        let plan_k2 = ctrl.set_search("ab");

        // K2 resolves first, then K1 straggles in
        assert!(ctrl.apply_success(&plan_k2, page_body(&[2], 1)));
        assert!(!ctrl.apply_success(&plan_k1, page_body(&[1], 1)));
        assert_eq!(ctrl.items()[0].id, 2);

        // a stale error must not clobber committed data either
        assert!(!ctrl.apply_error(&plan_k1, "timeout"));
        assert!(ctrl.error().is_none());
    }

    #[test]
    fn exactly_one_of_data_and_error_is_populated() {
        let mut ctrl: ListQueryController<Row> = ListQueryController::new("lodgements");
        let plan = ctrl.refetch();
        assert!(ctrl.is_loading());
        ctrl.apply_error(&plan, "HTTP 502");
        assert_eq!(ctrl.error(), Some("HTTP 502"));
        assert!(ctrl.page_data().is_none());

        let plan = ctrl.refetch();
        ctrl.apply_success(&plan, page_body(&[5], 1));
        assert!(ctrl.error().is_none());
        assert_eq!(ctrl.items().len(), 1);
    }

    #[test]
    fn fifty_matches_at_twenty_per_page_is_three_pages() {
        let mut ctrl: ListQueryController<Row> = ListQueryController::new("lodgements");
        let plan = ctrl.set_search("INV-00");
        ctrl.apply_success(&plan, page_body(&[1, 2, 3], 50));
        assert_eq!(ctrl.total_pages(), 3);
        assert_eq!(ctrl.total_count(), 50);

        // navigate to page 2, then type another character: back to page 1
        let _ = ctrl.set_page(2);
        let plan = ctrl.set_search("INV-001");
        assert_eq!(ctrl.query.page, 1);
        assert!(plan.path.contains("page=1"));
    }

    #[test]
    fn header_state_follows_visible_rows() {
        let mut ctrl: ListQueryController<Row> = ListQueryController::new("lodgements");
        let plan = ctrl.refetch();
        ctrl.apply_success(&plan, page_body(&[1, 2], 2));

        assert!(!ctrl.is_all_visible_selected());
        ctrl.selection.toggle(EntityId::Int(1));
        assert!(ctrl.is_partially_visible_selected());
        ctrl.toggle_all_visible();
        assert!(ctrl.is_all_visible_selected());
        assert!(!ctrl.is_partially_visible_selected());
    }
}
