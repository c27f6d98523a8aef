use thiserror::Error;

/// Result type used across the registry.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Every failure a registry operation can report.
///
/// The `Display` strings are the canonical English messages; the command
/// layer owns any other rendering. Variants carrying a `String` embed the
/// offending reference so callers can surface `<name>: <message>` output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("too many vaccines")]
    TooManyBatches,

    #[error("duplicate batch number")]
    DuplicateBatch,

    #[error("invalid name")]
    InvalidName,

    #[error("vaccine name cannot begin with a lowercase letter")]
    LowercaseName,

    #[error("invalid batch")]
    InvalidBatch,

    #[error("invalid date")]
    InvalidDate,

    #[error("invalid quantity")]
    InvalidQuantity,

    #[error("no stock")]
    NoStock,

    #[error("already vaccinated")]
    AlreadyVaccinated,

    #[error("{0}: no such vaccine")]
    NoSuchVaccine(String),

    #[error("{0}: no such batch")]
    NoSuchBatch(String),

    #[error("{0}: no such user")]
    NoSuchUser(String),

    /// Inoculation log growth failed to allocate. The one fatal error:
    /// everything else leaves the registry unchanged and the session
    /// continues.
    #[error("No memory.")]
    OutOfMemory,
}

impl RegistryError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::OutOfMemory)
    }
}
