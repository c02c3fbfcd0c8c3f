//! App-wide toast notifications.
//!
//! Same shape as the modal stack: a context service owning a signal of
//! entries plus a host component mounted once at the app root.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

const AUTO_DISMISS_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast--success",
            ToastKind::Error => "toast--error",
            ToastKind::Warning => "toast--warning",
            ToastKind::Info => "toast--info",
        }
    }
}

#[derive(Clone)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct ToastService {
    toasts: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(1),
        }
    }

    pub fn push(&self, kind: ToastKind, title: impl Into<String>, message: impl Into<String>) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        let toast = Toast {
            id,
            kind,
            title: title.into(),
            message: message.into(),
        };
        self.toasts.update(|toasts| toasts.push(toast));

        let svc = *self;
        spawn_local(async move {
            TimeoutFuture::new(AUTO_DISMISS_MS).await;
            svc.dismiss(id);
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, "Success", message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, "Error", message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(ToastKind::Warning, "Warning", message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastKind::Info, "Info", message);
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|toasts| toasts.retain(|toast| toast.id != id));
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the toast stack. Must be mounted exactly once, at the root.
#[component]
pub fn ToastHost() -> impl IntoView {
    let svc = use_context::<ToastService>()
        .expect("ToastService not provided in context (provide it in app root)");

    view! {
        <div class="toast-host">
            <For
                each=move || svc.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=format!("toast {}", toast.kind.class())>
                            <div class="toast__body">
                                <div class="toast__title">{toast.title.clone()}</div>
                                <div class="toast__message">{toast.message.clone()}</div>
                            </div>
                            <button class="toast__close" on:click=move |_| svc.dismiss(id)>
                                {"×"}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
