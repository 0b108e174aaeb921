pub mod builtin;
pub mod config;
pub mod corpus;
pub mod export;
pub mod fixture;
pub mod loader;
pub mod scanner;
pub mod store;

pub use builtin::builtin_corpus;
pub use config::{Config, DirectoryConfig, FixtureEntry, load_config};
pub use corpus::Corpus;
pub use export::{ExportError, ExportResult, export_corpus};
pub use fixture::{Fixture, FixtureContent};
pub use loader::{LoadError, LoadResult, load_fixtures};
pub use scanner::{ScanError, ScanResult, ScannedFile, scan_files};
pub use store::{FixtureStore, InMemoryStore, StoreHandle};
