//! Platform abstraction layer: a trait-based seam over filesystem
//! operations so the corpus pipeline can run against the real filesystem
//! (`RealPal`) or a deterministic in-memory one (`MockPal`) in tests.

mod file_path;
pub mod mock;
pub mod real_pal;
mod traits;

pub use file_path::FilePath;
pub use mock::MockPal;
pub use real_pal::RealPal;
pub use traits::{Pal, PalHandle};
