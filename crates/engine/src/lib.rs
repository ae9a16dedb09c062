//! Core of the PFM dashboard: an in-memory transaction list and the
//! add/edit form that feeds it.
//!
//! The [`Engine`] owns both and is driven by [`Intent`]s. A presentation
//! layer reads [`Engine::view`] to draw and sends intents back; nothing here
//! formats or lays out data.
//!
//! ```rust
//! use pfm_engine::{Amount, Engine, FieldValue, Intent, TransactionKind};
//!
//! let mut engine = Engine::builder()
//!     .seed(pfm_engine::default_seed())
//!     .build()
//!     .unwrap();
//!
//! engine.dispatch(Intent::Add);
//! engine.dispatch(Intent::FieldChange(FieldValue::Amount(Some(Amount::from_whole(20)))));
//! engine.dispatch(Intent::FieldChange(FieldValue::Kind(Some(TransactionKind::Expense))));
//! engine.dispatch(Intent::Submit);
//!
//! assert_eq!(engine.view().transactions.len(), 3);
//! ```

pub use amount::Amount;
pub use error::EngineError;
pub use form::{FormController, FormState, Submitted};
pub use store::TransactionStore;
pub use transactions::{
    FieldValue, Transaction, TransactionField, TransactionFields, TransactionId, TransactionKind,
};

mod amount;
mod error;
mod form;
mod store;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;

/// Categories offered when none are configured.
pub const DEFAULT_CATEGORIES: [&str; 5] = ["Salary", "Groceries", "Bills", "Entertainment", "Other"];

/// The two sample records the dashboard starts with when no seed is given.
pub fn default_seed() -> Vec<Transaction> {
    vec![
        Transaction::new(
            TransactionId::new(1),
            "2023-04-01",
            Amount::from_whole(500),
            TransactionKind::Income,
            "Salary",
        ),
        Transaction::new(
            TransactionId::new(2),
            "2023-04-02",
            Amount::from_whole(50),
            TransactionKind::Expense,
            "Groceries",
        ),
    ]
}

/// A user action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Open the dialog in create mode.
    Add,
    /// Open the dialog on an existing record.
    Edit(TransactionId),
    Delete(TransactionId),
    FieldChange(FieldValue),
    Submit,
    Cancel,
}

/// A mutation of the transaction list caused by an intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    Added(TransactionId),
    Updated(TransactionId),
    Removed(TransactionId),
}

/// Everything a render needs, borrowed from the engine.
#[derive(Clone, Copy, Debug)]
pub struct View<'a> {
    pub transactions: &'a [Transaction],
    pub form: &'a FormState,
    pub categories: &'a [String],
}

impl<'a> View<'a> {
    pub fn draft(&self) -> Option<&'a TransactionFields> {
        match self.form {
            FormState::Closed => None,
            FormState::Create { draft } | FormState::Edit { draft, .. } => Some(draft),
        }
    }
}

#[derive(Debug)]
pub struct Engine {
    store: TransactionStore,
    form: FormController,
    categories: Vec<String>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn view(&self) -> View<'_> {
        View {
            transactions: self.store.transactions(),
            form: self.form.state(),
            categories: &self.categories,
        }
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Applies one intent and reports the list mutation it caused, if any.
    ///
    /// Intents that make no sense in the current state (editing an unknown
    /// id, submitting a closed form, ...) are silently ignored.
    pub fn dispatch(&mut self, intent: Intent) -> Option<Change> {
        match intent {
            Intent::Add => {
                self.form.open_create();
                None
            }
            Intent::Edit(id) => {
                match self.store.get(id) {
                    Some(tx) => self.form.open_edit(tx),
                    None => tracing::trace!(%id, "edit ignored, transaction not found"),
                }
                None
            }
            Intent::Delete(id) => self.store.remove(id).map(|tx| Change::Removed(tx.id)),
            Intent::FieldChange(value) => {
                self.form.set_field(value);
                None
            }
            Intent::Submit => match self.form.submit(&mut self.store)? {
                Submitted::Created(id) => Some(Change::Added(id)),
                Submitted::Updated { id, found: true } => Some(Change::Updated(id)),
                Submitted::Updated { found: false, .. } => None,
            },
            Intent::Cancel => {
                self.form.cancel();
                None
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct EngineBuilder {
    seed: Vec<Transaction>,
    categories: Option<Vec<String>>,
}

impl EngineBuilder {
    /// Initial records, copied into the store in the given order.
    pub fn seed(mut self, seed: Vec<Transaction>) -> Self {
        self.seed = seed;
        self
    }

    /// Labels offered by the category selector. Falls back to
    /// [`DEFAULT_CATEGORIES`] when never set.
    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> ResultEngine<Engine> {
        let store = TransactionStore::new(self.seed)?;
        let categories = self.categories.unwrap_or_else(|| {
            DEFAULT_CATEGORIES
                .iter()
                .map(|category| category.to_string())
                .collect()
        });
        tracing::info!(
            transactions = store.len(),
            categories = categories.len(),
            "engine ready"
        );

        Ok(Engine {
            store,
            form: FormController::default(),
            categories,
        })
    }
}
