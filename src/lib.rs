// ============================================================================
// VaxReg Library
// ============================================================================

//! In-memory vaccination registry: a bounded batch store, a growable
//! inoculation log and a coordinator enforcing referential and temporal
//! consistency between them.
//!
//! # Examples
//!
//! ```
//! use vaxreg::{Date, Registry};
//!
//! # fn main() -> vaxreg::Result<()> {
//! let mut registry = Registry::new(Date::new(1, 1, 2025));
//! registry.register_batch("Gripe", "1A2B", Date::new(10, 10, 2025), 5)?;
//!
//! let code = registry.vaccinate("Ana", "Gripe")?;
//! assert_eq!(code, "1A2B");
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod core;
pub mod registry;
pub mod storage;

// Re-export main types for convenience
pub use core::{Date, DateCheck, RegistryError, Result};
pub use registry::{BatchListing, Registry};
pub use storage::{Batch, BatchStore, InoculationLog, InoculationRecord};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_vaccinate_roundtrip() {
        let mut registry = Registry::new(Date::new(1, 1, 2025));
        registry
            .register_batch("Gripe", "1A2B", Date::new(10, 10, 2025), 5)
            .unwrap();

        let code = registry.vaccinate("Ana", "Gripe").unwrap();
        assert_eq!(code, "1A2B");
        assert_eq!(registry.log().len(), 1);
    }
}
