//! The add/edit dialog as an explicit state machine.
//!
//! ```text
//!            add                    submit / cancel
//!   Closed ───────▶ Create{draft} ──────────────────▶ Closed
//!     │
//!     │ edit(T)                     submit / cancel
//!     └───────────▶ Edit{id,draft} ─────────────────▶ Closed
//! ```
//!
//! The draft only exists while the dialog is open. A create submit that finds
//! no free id leaves the dialog open on its draft.

use crate::{FieldValue, Transaction, TransactionFields, TransactionId, store::TransactionStore};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Closed,
    Create {
        draft: TransactionFields,
    },
    Edit {
        id: TransactionId,
        draft: TransactionFields,
    },
}

/// What a submit did to the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submitted {
    Created(TransactionId),
    /// `found` is `false` when the target vanished while the dialog was open.
    Updated { id: TransactionId, found: bool },
}

#[derive(Clone, Debug, Default)]
pub struct FormController {
    state: FormState,
}

impl FormController {
    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, FormState::Closed)
    }

    pub fn draft(&self) -> Option<&TransactionFields> {
        match &self.state {
            FormState::Closed => None,
            FormState::Create { draft } | FormState::Edit { draft, .. } => Some(draft),
        }
    }

    pub fn editing_id(&self) -> Option<TransactionId> {
        match self.state {
            FormState::Edit { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Opens the dialog with an empty draft, whatever was open before.
    pub fn open_create(&mut self) {
        self.state = FormState::Create {
            draft: TransactionFields::default(),
        };
    }

    /// Opens the dialog on a copy of `tx`'s fields.
    pub fn open_edit(&mut self, tx: &Transaction) {
        self.state = FormState::Edit {
            id: tx.id,
            draft: tx.fields.clone(),
        };
    }

    /// Merges one field into the draft. Ignored while closed.
    pub fn set_field(&mut self, value: FieldValue) -> bool {
        match &mut self.state {
            FormState::Closed => {
                tracing::trace!(field = ?value.field(), "field change ignored, form closed");
                false
            }
            FormState::Create { draft } | FormState::Edit { draft, .. } => {
                draft.set(value);
                true
            }
        }
    }

    /// Closes the dialog and writes the draft into `store`.
    ///
    /// An edit draft holds the whole record, so it replaces the stored
    /// fields: a field cleared in the dialog is cleared in the record.
    ///
    /// Returns `None` when the dialog was already closed, or when the store
    /// has no id left for a new record. The dialog stays open in that case.
    pub fn submit(&mut self, store: &mut TransactionStore) -> Option<Submitted> {
        match std::mem::take(&mut self.state) {
            FormState::Closed => None,
            FormState::Create { draft } => match store.add(draft.clone()) {
                Ok(id) => Some(Submitted::Created(id)),
                Err(err) => {
                    tracing::warn!(%err, "transaction not added");
                    self.state = FormState::Create { draft };
                    None
                }
            },
            FormState::Edit { id, draft } => {
                let found = store.replace(id, draft);
                Some(Submitted::Updated { id, found })
            }
        }
    }

    /// Closes the dialog and drops the draft.
    pub fn cancel(&mut self) {
        if self.is_open() {
            tracing::trace!("form cancelled");
        }
        self.state = FormState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Amount, TransactionKind};

    fn store() -> TransactionStore {
        TransactionStore::new(vec![Transaction::new(
            TransactionId::new(1),
            "2023-04-01",
            Amount::from_whole(500),
            TransactionKind::Income,
            "Salary",
        )])
        .unwrap()
    }

    #[test]
    fn starts_closed() {
        let form = FormController::default();
        assert_eq!(form.state(), &FormState::Closed);
        assert!(form.draft().is_none());
        assert!(form.editing_id().is_none());
    }

    #[test]
    fn open_create_resets_any_previous_draft() {
        let store = store();
        let mut form = FormController::default();
        form.open_edit(&store.transactions()[0]);
        form.set_field(FieldValue::Date(Some("2024-01-01".to_string())));

        form.open_create();

        assert_eq!(form.draft(), Some(&TransactionFields::default()));
        assert_eq!(form.editing_id(), None);
    }

    #[test]
    fn open_edit_copies_fields() {
        let store = store();
        let tx = &store.transactions()[0];
        let mut form = FormController::default();

        form.open_edit(tx);

        assert_eq!(form.draft(), Some(&tx.fields));
        assert_eq!(form.editing_id(), Some(tx.id));
    }

    #[test]
    fn field_change_merges_without_transition() {
        let mut form = FormController::default();
        form.open_create();

        assert!(form.set_field(FieldValue::Kind(Some(TransactionKind::Expense))));
        assert!(form.set_field(FieldValue::Category(Some("Bills".to_string()))));

        assert!(matches!(form.state(), FormState::Create { .. }));
        let draft = form.draft().unwrap();
        assert_eq!(draft.kind, Some(TransactionKind::Expense));
        assert_eq!(draft.category.as_deref(), Some("Bills"));
        assert_eq!(draft.date, None);
    }

    #[test]
    fn closed_form_ignores_field_change_and_submit() {
        let mut store = store();
        let mut form = FormController::default();

        assert!(!form.set_field(FieldValue::Date(Some("x".to_string()))));
        assert_eq!(form.submit(&mut store), None);
        form.cancel();

        assert_eq!(form.state(), &FormState::Closed);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn submit_create_adds_and_closes() {
        let mut store = store();
        let mut form = FormController::default();
        form.open_create();
        form.set_field(FieldValue::Amount(Some(Amount::from_whole(50))));

        let submitted = form.submit(&mut store);

        let Some(Submitted::Created(id)) = submitted else {
            panic!("expected a created transaction, got {submitted:?}");
        };
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(id).unwrap().amount(), Some(Amount::from_whole(50)));
        assert!(!form.is_open());
    }

    #[test]
    fn submit_edit_updates_in_place() {
        let mut store = store();
        let mut form = FormController::default();
        form.open_edit(&store.transactions()[0]);
        form.set_field(FieldValue::Amount(Some(Amount::from_whole(600))));

        let submitted = form.submit(&mut store);

        assert_eq!(
            submitted,
            Some(Submitted::Updated {
                id: TransactionId::new(1),
                found: true
            })
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.transactions()[0].amount(), Some(Amount::from_whole(600)));
        assert_eq!(store.transactions()[0].date(), Some("2023-04-01"));
        assert!(!form.is_open());
    }

    #[test]
    fn submit_edit_stores_cleared_fields() {
        let mut store = store();
        let mut form = FormController::default();
        form.open_edit(&store.transactions()[0]);
        form.set_field(FieldValue::Date(None));
        form.set_field(FieldValue::Category(None));
        let draft = form.draft().cloned().unwrap();

        form.submit(&mut store);

        let tx = &store.transactions()[0];
        assert_eq!(tx.fields, draft);
        assert_eq!(tx.date(), None);
        assert_eq!(tx.category(), None);
        assert_eq!(tx.amount(), Some(Amount::from_whole(500)));
    }

    #[test]
    fn submit_create_keeps_dialog_open_when_ids_run_out() {
        let mut store = TransactionStore::new(vec![Transaction::with_fields(
            TransactionId::new(u64::MAX - 1),
            TransactionFields::default(),
        )])
        .unwrap();
        let mut form = FormController::default();
        form.open_create();
        assert!(form.submit(&mut store).is_some());

        form.open_create();
        form.set_field(FieldValue::Category(Some("Bills".to_string())));
        assert_eq!(form.submit(&mut store), None);

        assert!(matches!(form.state(), FormState::Create { .. }));
        assert_eq!(form.draft().unwrap().category.as_deref(), Some("Bills"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn submit_edit_after_target_removed_is_a_no_op() {
        let mut store = store();
        let mut form = FormController::default();
        form.open_edit(&store.transactions()[0]);
        store.remove(TransactionId::new(1));

        let submitted = form.submit(&mut store);

        assert_eq!(
            submitted,
            Some(Submitted::Updated {
                id: TransactionId::new(1),
                found: false
            })
        );
        assert!(store.is_empty());
    }

    #[test]
    fn cancel_discards_draft() {
        let mut store = store();
        let before = store.transactions().to_vec();
        let mut form = FormController::default();

        form.open_edit(&store.transactions()[0]);
        form.set_field(FieldValue::Amount(Some(Amount::from_whole(1))));
        form.cancel();

        assert_eq!(form.state(), &FormState::Closed);
        assert_eq!(form.submit(&mut store), None);
        assert_eq!(store.transactions(), before.as_slice());
    }
}
