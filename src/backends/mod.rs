//! Backend implementations, one per endpoint.

pub mod fuzzy;
pub mod quick;
pub mod universal;

pub use fuzzy::FuzzyLeadBackend;
pub use universal::UniversalBackend;
