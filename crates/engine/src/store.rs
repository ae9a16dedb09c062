//! The in-memory transaction list.
//!
//! Records keep insertion order, which is also display order. Update and
//! remove on an unknown id do nothing; the caller only learns about it
//! through the return value.
//!
//! Ids come from a counter that never wraps: once `u64::MAX` has been handed
//! out, further adds fail with [`EngineError::IdsExhausted`].

use std::collections::HashSet;

use crate::{EngineError, ResultEngine, Transaction, TransactionFields, TransactionId};

#[derive(Debug, Clone)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    /// `None` once every id has been used.
    next_id: Option<u64>,
}

impl Default for TransactionStore {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            next_id: Some(1),
        }
    }
}

impl TransactionStore {
    /// Builds a store owning a copy of `seed`.
    ///
    /// Fails if two seed records share an id, or if the largest seed id
    /// leaves no room for a new one. New ids start right after the largest
    /// seed id, so they never collide with it.
    pub fn new(seed: Vec<Transaction>) -> ResultEngine<Self> {
        let mut seen = HashSet::with_capacity(seed.len());
        for tx in &seed {
            if !seen.insert(tx.id) {
                return Err(EngineError::ExistingKey(tx.id.to_string()));
            }
        }

        let next_id = match seed.iter().map(|tx| tx.id.get()).max() {
            None => 1,
            Some(max) => max.checked_add(1).ok_or(EngineError::IdsExhausted)?,
        };

        Ok(Self {
            transactions: seed,
            next_id: Some(next_id),
        })
    }

    /// Appends a new record built from `fields` and returns its id.
    ///
    /// Fails without touching the list when no id is left.
    pub fn add(&mut self, fields: TransactionFields) -> ResultEngine<TransactionId> {
        let next = self.next_id.ok_or(EngineError::IdsExhausted)?;
        let id = TransactionId::new(next);
        self.next_id = next.checked_add(1);
        self.transactions.push(Transaction::with_fields(id, fields));
        tracing::debug!(%id, len = self.transactions.len(), "transaction added");
        Ok(id)
    }

    /// Overwrites the present fields of the record `id`, in place.
    ///
    /// Returns `false` when no such record exists.
    pub fn update(&mut self, id: TransactionId, fields: TransactionFields) -> bool {
        match self.transactions.iter_mut().find(|tx| tx.id == id) {
            Some(tx) => {
                tx.apply(fields);
                tracing::debug!(%id, "transaction updated");
                true
            }
            None => {
                tracing::trace!(%id, "update ignored, transaction not found");
                false
            }
        }
    }

    /// Sets every field of the record `id` to `fields`, clearing the absent
    /// ones. Id and position stay the same.
    ///
    /// Returns `false` when no such record exists.
    pub fn replace(&mut self, id: TransactionId, fields: TransactionFields) -> bool {
        match self.transactions.iter_mut().find(|tx| tx.id == id) {
            Some(tx) => {
                tx.fields = fields;
                tracing::debug!(%id, "transaction replaced");
                true
            }
            None => {
                tracing::trace!(%id, "replace ignored, transaction not found");
                false
            }
        }
    }

    pub fn remove(&mut self, id: TransactionId) -> Option<Transaction> {
        match self.transactions.iter().position(|tx| tx.id == id) {
            Some(index) => {
                let tx = self.transactions.remove(index);
                tracing::debug!(%id, len = self.transactions.len(), "transaction removed");
                Some(tx)
            }
            None => {
                tracing::trace!(%id, "remove ignored, transaction not found");
                None
            }
        }
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id == id)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
