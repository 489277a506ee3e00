//! Filament LER: read-only access to EEP definitions, SOPs and signature patterns

pub mod error;
pub mod lookup;
pub mod record;
pub mod store;


#[cfg(test)]
pub mod test_utils;

pub use error::LerError;
pub use lookup::DocumentLookup;
pub use record::Record;
pub use store::{LerStore, REQUIRED_EEP_FIELDS, SystemInfo, Validation};
