pub mod date;
pub mod error;

pub use date::{Date, DateCheck};
pub use error::{RegistryError, Result};
