//! Transaction primitives.
//!
//! A [`Transaction`] is a single income or expense record. Every field other
//! than the id may be missing: the form accepts incomplete drafts and the
//! store keeps them as they are.
//!
//! [`TransactionFields`] is the partial counterpart used both as the form
//! draft and as the patch applied by an update.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Amount, EngineError};

/// Identifier of a stored transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(u64);

impl TransactionId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 2] = [Self::Income, Self::Expense];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::InvalidKind(other.to_string())),
        }
    }
}

/// The editable fields of a transaction, in form order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransactionField {
    Date,
    Amount,
    Kind,
    Category,
}

impl TransactionField {
    pub const ALL: [TransactionField; 4] = [Self::Date, Self::Amount, Self::Kind, Self::Category];

    pub fn label(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Amount => "Amount",
            Self::Kind => "Type",
            Self::Category => "Category",
        }
    }
}

/// A new value for one field. `None` clears the field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Date(Option<String>),
    Amount(Option<Amount>),
    Kind(Option<TransactionKind>),
    Category(Option<String>),
}

impl FieldValue {
    pub fn field(&self) -> TransactionField {
        match self {
            Self::Date(_) => TransactionField::Date,
            Self::Amount(_) => TransactionField::Amount,
            Self::Kind(_) => TransactionField::Kind,
            Self::Category(_) => TransactionField::Category,
        }
    }
}

/// A partial transaction: every field is optional.
///
/// As a patch, a present field overwrites the target and an absent one
/// leaves it alone.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl TransactionFields {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.amount.is_none()
            && self.kind.is_none()
            && self.category.is_none()
    }

    pub fn set(&mut self, value: FieldValue) {
        match value {
            FieldValue::Date(date) => self.date = date,
            FieldValue::Amount(amount) => self.amount = amount,
            FieldValue::Kind(kind) => self.kind = kind,
            FieldValue::Category(category) => self.category = category,
        }
    }

    /// Required fields that are still absent. Advisory only: nothing in the
    /// engine refuses an incomplete draft.
    pub fn missing_fields(&self) -> Vec<TransactionField> {
        TransactionField::ALL
            .into_iter()
            .filter(|field| !self.has(*field))
            .collect()
    }

    pub fn has(&self, field: TransactionField) -> bool {
        match field {
            TransactionField::Date => self.date.is_some(),
            TransactionField::Amount => self.amount.is_some(),
            TransactionField::Kind => self.kind.is_some(),
            TransactionField::Category => self.category.is_some(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(flatten)]
    pub fields: TransactionFields,
}

impl Transaction {
    pub fn new(
        id: TransactionId,
        date: impl Into<String>,
        amount: Amount,
        kind: TransactionKind,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            fields: TransactionFields {
                date: Some(date.into()),
                amount: Some(amount),
                kind: Some(kind),
                category: Some(category.into()),
            },
        }
    }

    pub fn with_fields(id: TransactionId, fields: TransactionFields) -> Self {
        Self { id, fields }
    }

    pub fn date(&self) -> Option<&str> {
        self.fields.date.as_deref()
    }

    pub fn amount(&self) -> Option<Amount> {
        self.fields.amount
    }

    pub fn kind(&self) -> Option<TransactionKind> {
        self.fields.kind
    }

    pub fn category(&self) -> Option<&str> {
        self.fields.category.as_deref()
    }

    /// Overwrites the fields present in `patch`. The id never changes.
    pub fn apply(&mut self, patch: TransactionFields) {
        let TransactionFields {
            date,
            amount,
            kind,
            category,
        } = patch;
        if let Some(date) = date {
            self.fields.date = Some(date);
        }
        if let Some(amount) = amount {
            self.fields.amount = Some(amount);
        }
        if let Some(kind) = kind {
            self.fields.kind = Some(kind);
        }
        if let Some(category) = category {
            self.fields.category = Some(category);
        }
    }
}
