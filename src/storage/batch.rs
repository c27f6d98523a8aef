use serde::{Deserialize, Serialize};

use crate::core::{Date, DateCheck, RegistryError, Result};

/// Maximum number of batches the store accepts.
pub const MAX_BATCHES: usize = 1000;

/// Maximum vaccine name length, in characters.
pub const MAX_NAME_LEN: usize = 50;

/// Maximum batch code length.
pub const MAX_CODE_LEN: usize = 20;

/// One vaccine batch. Uniquely keyed by `code` within a `BatchStore`.
///
/// `remaining` is live stock; `uses` counts every dose ever administered
/// from the batch, surviving history deletions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub name: String,
    pub code: String,
    pub expiry: Date,
    pub remaining: u32,
    pub uses: u32,
}

/// Bounded collection of batches, code-keyed.
///
/// Insertion order is kept until `sort_chronological` is called; selection
/// and listing rely on a prior sort, the store does not re-sort on insert.
#[derive(Debug)]
pub struct BatchStore {
    batches: Vec<Batch>,
    limit: usize,
}

impl Default for BatchStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchStore {
    pub fn new() -> Self {
        Self::with_limit(MAX_BATCHES)
    }

    /// Store with a custom batch limit. Primarily for tests exercising the
    /// capacity path without a thousand registrations.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            batches: Vec::new(),
            limit,
        }
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.batches.len() >= self.limit
    }

    pub fn contains(&self, code: &str) -> bool {
        self.batches.iter().any(|b| b.code == code)
    }

    pub fn find_by_code(&self, code: &str) -> Option<&Batch> {
        self.batches.iter().find(|b| b.code == code)
    }

    pub fn find_by_code_mut(&mut self, code: &str) -> Option<&mut Batch> {
        self.batches.iter_mut().find(|b| b.code == code)
    }

    /// Appends a batch, enforcing the capacity bound and code uniqueness.
    pub fn register(&mut self, batch: Batch) -> Result<()> {
        if self.is_full() {
            return Err(RegistryError::TooManyBatches);
        }
        if self.contains(&batch.code) {
            return Err(RegistryError::DuplicateBatch);
        }
        self.batches.push(batch);
        Ok(())
    }

    /// Total order by (year, month, day, code). The code tie-break keeps
    /// iteration deterministic for batches expiring on the same day.
    pub fn sort_chronological(&mut self) {
        self.batches
            .sort_by(|a, b| a.expiry.cmp(&b.expiry).then_with(|| a.code.cmp(&b.code)));
    }

    /// Index of the first batch named `name` with stock left and an expiry
    /// not in the past. With the store sorted, that is the
    /// earliest-expiring eligible candidate.
    pub fn select_for_vaccination(&self, name: &str, today: Date) -> Option<usize> {
        self.batches.iter().position(|b| {
            b.name == name && b.remaining > 0 && b.expiry.validate(today, DateCheck::NotInPast)
        })
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Batch> {
        self.batches.get_mut(index)
    }

    /// Removes the batch with `code`. Order is not preserved (swap with
    /// last); callers that need date order must sort again.
    pub fn remove(&mut self, code: &str) -> Option<Batch> {
        let index = self.batches.iter().position(|b| b.code == code)?;
        Some(self.batches.swap_remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Batch> {
        self.batches.iter()
    }
}
