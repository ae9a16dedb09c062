use pfm_engine::{Amount, FieldValue, TransactionField, TransactionFields, TransactionKind};

/// Terminal-side state of the open dialog: which input has focus and the raw
/// amount text (the draft only holds the parsed number).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub focus: TransactionField,
    pub amount_text: String,
}

impl Default for FormInput {
    fn default() -> Self {
        Self {
            focus: TransactionField::Date,
            amount_text: String::new(),
        }
    }
}

impl FormInput {
    /// Starts over for a freshly opened draft.
    pub fn reset(&mut self, draft: Option<&TransactionFields>) {
        self.focus = TransactionField::Date;
        self.amount_text = draft
            .and_then(|draft| draft.amount)
            .map(|amount| amount.to_string())
            .unwrap_or_default();
    }

    pub fn focus_next(&mut self) {
        self.focus = step(self.focus, 1);
    }

    pub fn focus_prev(&mut self) {
        self.focus = step(self.focus, TransactionField::ALL.len() - 1);
    }

    /// `true` when something was typed that does not parse as an amount.
    pub fn amount_invalid(&self) -> bool {
        !self.amount_text.trim().is_empty() && self.amount_text.parse::<Amount>().is_err()
    }

    /// Types `ch` into the focused text input and returns the field update.
    /// Select inputs take no characters except space, which cycles them.
    pub fn type_char(
        &mut self,
        ch: char,
        draft: &TransactionFields,
        categories: &[String],
    ) -> Option<FieldValue> {
        match self.focus {
            TransactionField::Date => {
                let mut date = draft.date.clone().unwrap_or_default();
                date.push(ch);
                Some(FieldValue::Date(Some(date)))
            }
            TransactionField::Amount => {
                self.amount_text.push(ch);
                Some(self.amount_value())
            }
            TransactionField::Kind | TransactionField::Category if ch == ' ' => {
                self.cycle(true, draft, categories)
            }
            TransactionField::Kind | TransactionField::Category => None,
        }
    }

    /// Erases the last character of a text input, or clears a select.
    pub fn backspace(&mut self, draft: &TransactionFields) -> Option<FieldValue> {
        match self.focus {
            TransactionField::Date => {
                let mut date = draft.date.clone()?;
                date.pop();
                Some(FieldValue::Date((!date.is_empty()).then_some(date)))
            }
            TransactionField::Amount => {
                self.amount_text.pop();
                Some(self.amount_value())
            }
            TransactionField::Kind => Some(FieldValue::Kind(None)),
            TransactionField::Category => Some(FieldValue::Category(None)),
        }
    }

    /// Moves a select input to its next (or previous) option.
    pub fn cycle(
        &mut self,
        forward: bool,
        draft: &TransactionFields,
        categories: &[String],
    ) -> Option<FieldValue> {
        match self.focus {
            TransactionField::Kind => {
                let options = TransactionKind::ALL;
                let current = draft
                    .kind
                    .and_then(|kind| options.iter().position(|option| *option == kind));
                let index = cycle_index(current, options.len(), forward)?;
                Some(FieldValue::Kind(Some(options[index])))
            }
            TransactionField::Category => {
                let current = draft
                    .category
                    .as_ref()
                    .and_then(|category| categories.iter().position(|option| option == category));
                let index = cycle_index(current, categories.len(), forward)?;
                Some(FieldValue::Category(Some(categories[index].clone())))
            }
            TransactionField::Date | TransactionField::Amount => None,
        }
    }

    fn amount_value(&self) -> FieldValue {
        FieldValue::Amount(self.amount_text.parse().ok())
    }
}

fn step(field: TransactionField, by: usize) -> TransactionField {
    let all = TransactionField::ALL;
    let index = all.iter().position(|f| *f == field).unwrap_or(0);
    all[(index + by) % all.len()]
}

fn cycle_index(current: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match (current, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(index), true) => (index + 1) % len,
        (Some(index), false) => (index + len - 1) % len,
    })
}
