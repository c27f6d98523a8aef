//! Registry coordinator: cross-entity operations over the batch store, the
//! inoculation log and the system clock.
//!
//! Every operation is atomic: it either commits fully or reports one
//! `RegistryError` leaving all state untouched. Validation orders follow
//! the command contract exactly, since the first failing check decides
//! which single error a malformed request produces.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::core::{Date, DateCheck, RegistryError, Result};
use crate::storage::{
    Batch, BatchStore, InoculationLog, InoculationRecord, MAX_CODE_LEN, MAX_NAME_LEN,
};

lazy_static! {
    /// Batch codes are uppercase hexadecimal only.
    static ref CODE_FORMAT: Regex = Regex::new(r"^[0-9A-F]+$").expect("valid regex");
}

fn valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().count() <= MAX_NAME_LEN
        && !name.chars().any(char::is_whitespace)
}

fn valid_code(code: &str) -> bool {
    !code.is_empty() && code.len() <= MAX_CODE_LEN && CODE_FORMAT.is_match(code)
}

/// One entry of a batch listing, in output order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchListing {
    /// A batch row: listing shows name, code, expiry, remaining doses and
    /// lifetime usage count.
    Batch(Batch),
    /// A requested vaccine name with no batches; listing continues past it.
    UnknownVaccine(String),
}

/// The vaccination registry: one batch store, one inoculation log, one
/// system clock. Instantiated once and threaded through every operation.
#[derive(Debug)]
pub struct Registry {
    batches: BatchStore,
    log: InoculationLog,
    today: Date,
}

impl Registry {
    pub fn new(start: Date) -> Self {
        Self {
            batches: BatchStore::new(),
            log: InoculationLog::new(),
            today: start,
        }
    }

    pub fn today(&self) -> Date {
        self.today
    }

    pub fn batches(&self) -> &BatchStore {
        &self.batches
    }

    pub fn log(&self) -> &InoculationLog {
        &self.log
    }

    /// Registers a new batch and echoes its code.
    ///
    /// Check order is part of the contract: capacity, name shape,
    /// duplicate code, lowercase initial, code shape, expiry date,
    /// quantity. The first failure wins.
    pub fn register_batch(
        &mut self,
        name: &str,
        code: &str,
        expiry: Date,
        quantity: i64,
    ) -> Result<String> {
        if self.batches.is_full() {
            return Err(RegistryError::TooManyBatches);
        }
        if !valid_name(name) {
            return Err(RegistryError::InvalidName);
        }
        if self.batches.contains(code) {
            return Err(RegistryError::DuplicateBatch);
        }
        if name.chars().next().is_some_and(char::is_lowercase) {
            return Err(RegistryError::LowercaseName);
        }
        if !valid_code(code) {
            return Err(RegistryError::InvalidBatch);
        }
        if !expiry.validate(self.today, DateCheck::NotInPast) {
            return Err(RegistryError::InvalidDate);
        }
        if quantity <= 0 {
            return Err(RegistryError::InvalidQuantity);
        }
        // A dose count that does not fit the stock counter is invalid too.
        let remaining = u32::try_from(quantity).map_err(|_| RegistryError::InvalidQuantity)?;

        self.batches.register(Batch {
            name: name.to_string(),
            code: code.to_string(),
            expiry,
            remaining,
            uses: 0,
        })?;
        debug!(code, name, %expiry, quantity, "batch registered");
        Ok(code.to_string())
    }

    /// Lists batches chronologically. With no names, every batch; with
    /// names, each name's batches in turn, unknown names reported in place
    /// without aborting the rest of the listing.
    pub fn list_batches(&mut self, names: &[String]) -> Vec<BatchListing> {
        self.batches.sort_chronological();
        if names.is_empty() {
            return self.batches.iter().cloned().map(BatchListing::Batch).collect();
        }

        let mut out = Vec::new();
        for name in names {
            let mut found = false;
            for batch in self.batches.iter().filter(|b| b.name == *name) {
                out.push(BatchListing::Batch(batch.clone()));
                found = true;
            }
            if !found {
                out.push(BatchListing::UnknownVaccine(name.clone()));
            }
        }
        out
    }

    /// Vaccinates `recipient` with the earliest-expiring eligible batch of
    /// `vaccine`, stamping the record with the current system date.
    ///
    /// Select, then duplicate check, then log capacity, then commit: the
    /// stock decrement and usage increment happen only once the record is
    /// safely appended, so a fatal growth failure changes nothing.
    pub fn vaccinate(&mut self, recipient: &str, vaccine: &str) -> Result<String> {
        self.batches.sort_chronological();
        let index = self
            .batches
            .select_for_vaccination(vaccine, self.today)
            .ok_or(RegistryError::NoStock)?;

        if self.already_vaccinated(recipient, vaccine) {
            return Err(RegistryError::AlreadyVaccinated);
        }

        let Some(batch) = self.batches.get_mut(index) else {
            return Err(RegistryError::NoStock);
        };
        let code = batch.code.clone();
        self.log.append(InoculationRecord {
            recipient: recipient.to_string(),
            code: code.clone(),
            date: self.today,
        })?;

        if let Some(batch) = self.batches.get_mut(index) {
            batch.remaining -= 1;
            batch.uses += 1;
        }
        debug!(recipient, vaccine, %code, date = %self.today, "dose administered");
        Ok(code)
    }

    /// True when the recipient already holds a record for the same vaccine
    /// name on the current date. Names are resolved by following each
    /// record's code into the store, deliberately including retired
    /// zero-stock batches, which keep historical linkage alive.
    fn already_vaccinated(&self, recipient: &str, vaccine: &str) -> bool {
        self.log.iter().any(|record| {
            record.recipient == recipient
                && record.date == self.today
                && self
                    .batches
                    .find_by_code(&record.code)
                    .is_some_and(|b| b.name == vaccine)
        })
    }

    /// Retires a batch: removed outright when no doses from it remain in
    /// the log, otherwise kept with stock zeroed so history still resolves.
    /// Returns the count of log records carrying the code.
    pub fn retire_batch(&mut self, code: &str) -> Result<u32> {
        if !self.batches.contains(code) {
            return Err(RegistryError::NoSuchBatch(code.to_string()));
        }
        let count = self.log.count_by_code(code);
        if count == 0 {
            self.batches.remove(code);
        } else if let Some(batch) = self.batches.find_by_code_mut(code) {
            batch.remaining = 0;
        }
        debug!(code, count, "batch retired");
        Ok(count)
    }

    /// Replaces a batch's expiry date. Existence is checked before the
    /// date, and the (possibly zero) remaining dose count is returned.
    pub fn update_expiry(&mut self, code: &str, expiry: Date) -> Result<u32> {
        let today = self.today;
        let Some(batch) = self.batches.find_by_code_mut(code) else {
            return Err(RegistryError::NoSuchBatch(code.to_string()));
        };
        if !expiry.validate(today, DateCheck::NotInPast) {
            return Err(RegistryError::InvalidDate);
        }
        batch.expiry = expiry;
        Ok(batch.remaining)
    }

    /// Deletes inoculation history for a recipient, optionally narrowed by
    /// date and batch code. Returns the number of records removed.
    ///
    /// Failure order: unknown code (checked against the log, since
    /// historical codes may outlive batch removal), invalid date
    /// (not-in-future), unknown recipient.
    pub fn delete_history(
        &mut self,
        recipient: &str,
        date: Option<Date>,
        code: Option<&str>,
    ) -> Result<usize> {
        if let Some(code) = code {
            if !self.log.has_code(code) {
                return Err(RegistryError::NoSuchBatch(code.to_string()));
            }
        }
        if let Some(date) = date {
            if !date.validate(self.today, DateCheck::NotInFuture) {
                return Err(RegistryError::InvalidDate);
            }
        }
        let deleted = self.log.delete_matching(recipient, date, code)?;
        debug!(recipient, deleted, "history deleted");
        Ok(deleted)
    }

    /// Inoculation records in insertion order, optionally restricted to
    /// one recipient (unknown recipients are `NoSuchUser`).
    pub fn list_inoculations<'a>(
        &'a self,
        recipient: Option<&'a str>,
    ) -> Result<Box<dyn Iterator<Item = &'a InoculationRecord> + 'a>> {
        match recipient {
            None => Ok(Box::new(self.log.iter())),
            Some(name) => Ok(Box::new(self.log.by_recipient(name)?)),
        }
    }

    /// Advances the system clock. The candidate must be well-formed and
    /// not behind the current date; on failure the clock is unchanged.
    pub fn advance_date(&mut self, to: Date) -> Result<Date> {
        if !to.validate(self.today, DateCheck::NotInPast) {
            return Err(RegistryError::InvalidDate);
        }
        self.today = to;
        debug!(today = %self.today, "system date advanced");
        Ok(self.today)
    }
}
