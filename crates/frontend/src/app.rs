use leptos::prelude::*;

use crate::routes::routes::AppRoutes;
use crate::shared::listing::QueryCacheService;
use crate::shared::modal_stack::{ModalHost, ModalStackService};
use crate::shared::toast::{ToastHost, ToastService};

#[component]
#[allow(non_snake_case)]
pub fn App() -> impl IntoView {
    // Process-wide services: the query cache, toasts, and the modal
    // stack. Everything below reaches them through context.
    provide_context(QueryCacheService::new());
    provide_context(ToastService::new());
    provide_context(ModalStackService::new());

    view! {
        <AppRoutes />
        <ModalHost />
        <ToastHost />
    }
}
