//! Mutation bookkeeping: per-button pending flags, toast copy, and
//! bulk-delete settlement.

use serde::Deserialize;
use std::collections::HashSet;

use contracts::domain::common::EntityId;

use super::selection::SelectionSet;

/// Kinds of write the console issues against a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
    BulkDelete,
    /// Status transition by backend action name ("clear", "confirm", ...).
    Transition(String),
}

impl MutationKind {
    /// Past-tense verb for toast copy.
    pub fn verb(&self) -> String {
        match self {
            MutationKind::Create => "created".to_string(),
            MutationKind::Update => "updated".to_string(),
            MutationKind::Delete | MutationKind::BulkDelete => "deleted".to_string(),
            MutationKind::Transition(action) => past_tense(action),
        }
    }
}

fn past_tense(action: &str) -> String {
    match action {
        "cancel" => "cancelled".to_string(),
        "submit" => "submitted".to_string(),
        "mark-read" => "marked read".to_string(),
        _ if action.ends_with('e') => format!("{}d", action),
        _ => format!("{}ed", action),
    }
}

/// One in-flight mutation. `target` scopes the pending flag to a row so
/// only that row's button disables, not the whole page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MutationToken {
    pub kind: MutationKind,
    pub target: Option<EntityId>,
}

impl MutationToken {
    pub fn new(kind: MutationKind) -> Self {
        Self { kind, target: None }
    }

    pub fn for_target(kind: MutationKind, id: EntityId) -> Self {
        Self {
            kind,
            target: Some(id),
        }
    }
}

/// Pending flags for all mutations currently in flight. Mutations are
/// independent; nothing here serializes them.
#[derive(Debug, Clone, Default)]
pub struct MutationTracker {
    pending: HashSet<MutationToken>,
}

impl MutationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the same mutation is already in flight, in
    /// which case the caller must not issue it again.
    pub fn begin(&mut self, token: MutationToken) -> bool {
        self.pending.insert(token)
    }

    pub fn finish(&mut self, token: &MutationToken) {
        self.pending.remove(token);
    }

    pub fn is_pending(&self, token: &MutationToken) -> bool {
        self.pending.contains(token)
    }

    pub fn any_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

/// Backend report for a one-request bulk delete.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BulkDeleteReport {
    #[serde(default)]
    pub deleted_count: usize,
    #[serde(default)]
    pub failed_count: usize,
    #[serde(default)]
    pub failed_ids: Vec<EntityId>,
}

impl BulkDeleteReport {
    /// Report for endpoints that answer 2xx with no body: everything
    /// requested was deleted.
    pub fn all_deleted(requested: usize) -> Self {
        Self {
            deleted_count: requested,
            failed_count: 0,
            failed_ids: Vec::new(),
        }
    }
}

/// Settle a bulk delete against the selection: drop only the ids the
/// backend actually deleted, keep the failed ones selected so the user
/// can retry them. Returns the toast line.
///
/// When the report carries a failure count but no failed ids there is
/// no way to know which rows survived; the selection is left untouched.
pub fn settle_bulk_delete(
    selection: &mut SelectionSet,
    requested: &[EntityId],
    report: &BulkDeleteReport,
    entity_label: &str,
) -> String {
    if report.failed_count == 0 {
        selection.remove_ids(requested);
        return format!("Deleted {} {}{}", requested.len(), entity_label, plural_suffix(requested.len()));
    }

    if !report.failed_ids.is_empty() {
        let deleted: Vec<EntityId> = requested
            .iter()
            .filter(|id| !report.failed_ids.contains(id))
            .cloned()
            .collect();
        selection.remove_ids(&deleted);
    }

    format!(
        "Deleted {} of {} {}{}",
        report.deleted_count,
        requested.len(),
        entity_label,
        plural_suffix(requested.len())
    )
}

fn plural_suffix(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[i64]) -> Vec<EntityId> {
        values.iter().map(|n| EntityId::Int(*n)).collect()
    }

    #[test]
    fn partial_failure_keeps_exactly_the_failed_ids_selected() {
        let requested = ids(&[1, 2, 3]);
        let mut selection = SelectionSet::new();
        selection.toggle_all(&requested);

        let report = BulkDeleteReport {
            deleted_count: 2,
            failed_count: 1,
            failed_ids: ids(&[2]),
        };
        let message = settle_bulk_delete(&mut selection, &requested, &report, "lodgement");

        assert_eq!(selection.ids(), ids(&[2]));
        assert!(message.contains('2'), "toast must mention the success count: {message}");
        assert_eq!(message, "Deleted 2 of 3 lodgements");
    }

    #[test]
    fn total_success_clears_the_whole_requested_set() {
        let requested = ids(&[4, 5]);
        let mut selection = SelectionSet::new();
        selection.toggle_all(&requested);

        let report = BulkDeleteReport::all_deleted(2);
        let message = settle_bulk_delete(&mut selection, &requested, &report, "lodgement");

        assert!(selection.is_empty());
        assert_eq!(message, "Deleted 2 lodgements");
    }

    #[test]
    fn failures_without_ids_leave_the_selection_untouched() {
        let requested = ids(&[1, 2]);
        let mut selection = SelectionSet::new();
        selection.toggle_all(&requested);

        let report = BulkDeleteReport {
            deleted_count: 1,
            failed_count: 1,
            failed_ids: Vec::new(),
        };
        settle_bulk_delete(&mut selection, &requested, &report, "lodgement");
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn tracker_refuses_a_duplicate_begin() {
        let mut tracker = MutationTracker::new();
        let token = MutationToken::for_target(MutationKind::Transition("clear".to_string()), EntityId::Int(7));
        assert!(tracker.begin(token.clone()));
        assert!(!tracker.begin(token.clone()));
        tracker.finish(&token);
        assert!(!tracker.is_pending(&token));
        assert!(tracker.begin(token));
    }

    #[test]
    fn tokens_for_different_rows_do_not_collide() {
        let mut tracker = MutationTracker::new();
        let clear_7 = MutationToken::for_target(MutationKind::Transition("clear".to_string()), EntityId::Int(7));
        let clear_8 = MutationToken::for_target(MutationKind::Transition("clear".to_string()), EntityId::Int(8));
        assert!(tracker.begin(clear_7.clone()));
        assert!(tracker.begin(clear_8));
        assert!(tracker.is_pending(&clear_7));
    }

    #[test]
    fn transition_verbs_read_naturally() {
        assert_eq!(MutationKind::Transition("clear".to_string()).verb(), "cleared");
        assert_eq!(MutationKind::Transition("bounce".to_string()).verb(), "bounced");
        assert_eq!(MutationKind::Transition("cancel".to_string()).verb(), "cancelled");
        assert_eq!(MutationKind::Transition("confirm".to_string()).verb(), "confirmed");
        assert_eq!(MutationKind::Transition("submit".to_string()).verb(), "submitted");
        assert_eq!(MutationKind::Transition("mark-read".to_string()).verb(), "marked read");
    }
}
