use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use papertrail_core::IntegrityError;

use crate::entry::{EntryDraft, EntryId, LedgerEntry};

/// Append-only sequence of dated ledger entries.
///
/// The journal owns the total order of entries: primarily insertion order,
/// with [`Journal::entries_up_to`] applying effective-date ordering for as-of
/// reads. Mutating it is the exclusive job of the decision layer, which
/// serializes writers; the journal itself stays a plain owned value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    entries: Vec<LedgerEntry>,
    next_id: u64,
}

impl Default for Journal {
    fn default() -> Self {
        Self::new()
    }
}

impl Journal {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Admit a batch of drafts, all-or-nothing.
    ///
    /// Every draft is shape-checked before any is admitted, so a bad line
    /// leaves the journal untouched. Ids are assigned in batch order.
    pub fn append(&mut self, drafts: Vec<EntryDraft>) -> Result<Vec<EntryId>, IntegrityError> {
        for draft in &drafts {
            draft.validate()?;
        }
        Ok(drafts.into_iter().map(|d| self.admit(d)).collect())
    }

    /// Admit a single draft. Same validation as [`Journal::append`].
    pub fn append_one(&mut self, draft: EntryDraft) -> Result<EntryId, IntegrityError> {
        draft.validate()?;
        Ok(self.admit(draft))
    }

    fn admit(&mut self, draft: EntryDraft) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push(LedgerEntry {
            id,
            kind: draft.kind,
            item: draft.item,
            quantity: draft.quantity,
            amount: draft.amount,
            effective_date: draft.effective_date,
        });
        id
    }

    /// Entries effective on or before `as_of`, in effective-date order.
    ///
    /// The sort is stable, so entries sharing a date keep their insertion
    /// order. Each call walks the journal afresh; the iteration is finite and
    /// restartable.
    pub fn entries_up_to(&self, as_of: NaiveDate) -> impl Iterator<Item = &LedgerEntry> {
        let mut selected: Vec<&LedgerEntry> = self
            .entries
            .iter()
            .filter(|e| e.effective_date <= as_of)
            .collect();
        selected.sort_by_key(|e| e.effective_date);
        selected.into_iter()
    }
}
