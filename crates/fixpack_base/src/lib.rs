//! Foundational error handling, tracing setup and filesystem abstraction
//! shared by all fixpack crates. Keeping these in one base crate ensures
//! consistent error handling and prevents circular dependencies.

pub mod error;
pub mod pal;
pub mod tracing;

// Re-export commonly used types for convenience
pub use error::{ErrorKind, FixpackError, FixpackResult, ResultExt};
pub use pal::{FilePath, MockPal, Pal, PalHandle, RealPal};
