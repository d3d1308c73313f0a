use anyhow::Result;
use uuid::Uuid;

use crate::models::{Category, Transaction, TransactionDraft, ValidationError};
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormMode {
    Create,
    /// Bound to the stored record with this id.
    Edit(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Kind,
    Amount,
    Category,
    Description,
    Date,
}

impl FormField {
    pub(crate) const ALL: [FormField; 5] = [
        Self::Kind,
        Self::Amount,
        Self::Category,
        Self::Description,
        Self::Date,
    ];

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Kind => "Type",
            Self::Amount => "Amount",
            Self::Category => "Category",
            Self::Description => "Description",
            Self::Date => "Date",
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub(crate) fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub(crate) fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Free-text fields take typed characters; the others cycle.
    pub(crate) fn is_text(&self) -> bool {
        matches!(self, Self::Amount | Self::Description | Self::Date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TransactionForm {
    pub mode: FormMode,
    pub draft: TransactionDraft,
    pub focus: FormField,
}

impl Default for TransactionForm {
    fn default() -> Self {
        Self {
            mode: FormMode::Create,
            draft: TransactionDraft::default(),
            focus: FormField::Kind,
        }
    }
}

impl TransactionForm {
    pub(crate) fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    /// Bind the form to an existing record and pre-fill every field from it.
    pub(crate) fn load(&mut self, txn: &Transaction) {
        self.mode = FormMode::Edit(txn.id);
        self.draft = TransactionDraft::from_transaction(txn);
        self.focus = FormField::Amount;
    }

    /// Back to Create with empty fields.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub(crate) fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub(crate) fn value(&self, field: FormField) -> String {
        match field {
            FormField::Kind => self.draft.kind.to_string(),
            FormField::Amount => self.draft.amount.clone(),
            FormField::Category => self
                .draft
                .category
                .map(|c| format!("{} {c}", c.icon()))
                .unwrap_or_default(),
            FormField::Description => self.draft.description.clone(),
            FormField::Date => self.draft.date.clone(),
        }
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Amount => Some(&mut self.draft.amount),
            FormField::Description => Some(&mut self.draft.description),
            FormField::Date => Some(&mut self.draft.date),
            FormField::Kind | FormField::Category => None,
        }
    }

    pub(crate) fn input_char(&mut self, c: char) {
        if let Some(text) = self.text_mut() {
            text.push(c);
        } else if c == ' ' {
            self.cycle(true);
        }
    }

    pub(crate) fn backspace(&mut self) {
        if let Some(text) = self.text_mut() {
            text.pop();
        } else if self.focus == FormField::Category {
            self.draft.category = None;
        }
    }

    /// Toggle the type or step through the categories, depending on focus.
    pub(crate) fn cycle(&mut self, forward: bool) {
        match self.focus {
            FormField::Kind => self.draft.kind = self.draft.kind.toggled(),
            FormField::Category => {
                self.draft.category = Some(match (self.draft.category, forward) {
                    (Some(c), true) => c.next(),
                    (Some(c), false) => c.prev(),
                    (None, true) => Category::ALL[0],
                    (None, false) => Category::ALL[Category::ALL.len() - 1],
                });
            }
            _ => {}
        }
    }

    /// Validate and persist. A validation failure leaves both the store and
    /// the form untouched; success resets the form to Create.
    pub(crate) fn submit(&mut self, store: &Store) -> Result<Result<String, ValidationError>> {
        let id = match self.mode {
            FormMode::Create => Uuid::new_v4(),
            FormMode::Edit(id) => id,
        };
        let txn = match self.draft.clone().into_transaction(id) {
            Ok(txn) => txn,
            Err(e) => return Ok(Err(e)),
        };

        let kind = txn.kind;
        let message = match self.mode {
            FormMode::Create => {
                store.append_transaction(txn)?;
                format!("{kind} added successfully!")
            }
            FormMode::Edit(id) => {
                store.replace_transaction(id, txn)?;
                format!("{kind} updated successfully")
            }
        };
        self.clear();
        Ok(Ok(message))
    }
}
