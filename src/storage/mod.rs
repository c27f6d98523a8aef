pub mod batch;
pub mod inoculation;

pub use batch::{Batch, BatchStore, MAX_BATCHES, MAX_CODE_LEN, MAX_NAME_LEN};
pub use inoculation::{GROWTH_FACTOR, INITIAL_LOG_CAPACITY, InoculationLog, InoculationRecord};
