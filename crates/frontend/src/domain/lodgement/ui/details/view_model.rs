use contracts::domain::common::FieldErrors;
use contracts::domain::lodgement::{Lodgement, LodgementDraft};
use leptos::prelude::*;

use crate::shared::api::ApiError;
use crate::shared::listing::ListPageVm;
use crate::shared::modal_stack::ModalHandle;

/// ViewModel for the lodgement create/edit form.
#[derive(Clone)]
pub struct LodgementDetailsVm {
    pub form: RwSignal<LodgementDraft>,
    pub errors: RwSignal<FieldErrors>,
    pub saving: RwSignal<bool>,
}

impl LodgementDetailsVm {
    pub fn new(record: Option<&Lodgement>) -> Self {
        let draft = record.map(LodgementDraft::from_record).unwrap_or_default();
        Self {
            form: RwSignal::new(draft),
            errors: RwSignal::new(FieldErrors::new()),
            saving: RwSignal::new(false),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with_untracked(|form| form.id.is_some())
    }

    pub fn error_for(&self, field: &'static str) -> Signal<Option<String>> {
        let errors = self.errors;
        Signal::derive(move || errors.with(|e| e.get(field).map(str::to_string)))
    }

    /// Validate locally; on pass, hand the payload to the list vm.
    /// The modal closes only on success. A rejected submit keeps it
    /// open with the backend's field errors merged inline.
    pub fn save(&self, vm: ListPageVm<Lodgement>, handle: ModalHandle) {
        let draft = self.form.get_untracked();
        let client_errors = draft.validate();
        if !client_errors.is_empty() {
            self.errors.set(client_errors);
            return;
        }
        self.errors.set(FieldErrors::new());
        self.saving.set(true);

        let saving = self.saving;
        let errors = self.errors;
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

        match draft.id.clone() {
            Some(id) => vm.update(id, draft.to_payload(), on_done),
            None => vm.create(draft.to_payload(), on_done),
        }
    }
}
