use serde::{Deserialize, Serialize};

use crate::core::{Date, RegistryError, Result};

/// Inoculation log capacity before the first growth step.
pub const INITIAL_LOG_CAPACITY: usize = 1000;

/// Capacity multiplier applied when the log is full.
pub const GROWTH_FACTOR: usize = 10;

/// One administered dose. Immutable once appended.
///
/// `code` refers to the batch used at the time; it is kept verbatim even if
/// that batch is later removed from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InoculationRecord {
    pub recipient: String,
    pub code: String,
    pub date: Date,
}

/// Growable, insertion-ordered inoculation history.
///
/// Capacity is tracked explicitly and grown geometrically; the amortized
/// doubling a plain `Vec` would do on `push` is never relied on.
#[derive(Debug)]
pub struct InoculationLog {
    records: Vec<InoculationRecord>,
    capacity: usize,
}

impl InoculationLog {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends a record, growing capacity tenfold first when full.
    ///
    /// A failed growth allocation reports `OutOfMemory` without touching
    /// the existing records; callers treat that as fatal.
    pub fn append(&mut self, record: InoculationRecord) -> Result<()> {
        if self.records.len() == self.capacity {
            let grown = self.capacity * GROWTH_FACTOR;
            self.records
                .try_reserve_exact(grown - self.records.len())
                .map_err(|_| RegistryError::OutOfMemory)?;
            self.capacity = grown;
        }
        self.records.push(record);
        Ok(())
    }

    /// All records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &InoculationRecord> {
        self.records.iter()
    }

    /// Records for one recipient, in insertion order. Reports `NoSuchUser`
    /// when the recipient never appears in the log.
    pub fn by_recipient<'a>(
        &'a self,
        recipient: &'a str,
    ) -> Result<impl Iterator<Item = &'a InoculationRecord>> {
        if !self.has_recipient(recipient) {
            return Err(RegistryError::NoSuchUser(recipient.to_string()));
        }
        Ok(self.records.iter().filter(move |r| r.recipient == recipient))
    }

    pub fn has_recipient(&self, recipient: &str) -> bool {
        self.records.iter().any(|r| r.recipient == recipient)
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.records.iter().any(|r| r.code == code)
    }

    pub fn count_by_code(&self, code: &str) -> u32 {
        self.records.iter().filter(|r| r.code == code).count() as u32
    }

    /// Deletes every record whose recipient matches and whose date/code
    /// match the given filters (absent filters match everything).
    ///
    /// The recipient-existence check is independent of the narrower
    /// filters: an unknown recipient is `NoSuchUser`, a known recipient
    /// with no matching records deletes zero and succeeds.
    pub fn delete_matching(
        &mut self,
        recipient: &str,
        date: Option<Date>,
        code: Option<&str>,
    ) -> Result<usize> {
        if !self.has_recipient(recipient) {
            return Err(RegistryError::NoSuchUser(recipient.to_string()));
        }
        let before = self.records.len();
        self.records.retain(|r| {
            !(r.recipient == recipient
                && date.is_none_or(|d| r.date == d)
                && code.is_none_or(|c| r.code == c))
        });
        Ok(before - self.records.len())
    }
}

impl Default for InoculationLog {
    fn default() -> Self {
        Self::new()
    }
}
