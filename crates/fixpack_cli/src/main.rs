//! Minimal, convention-driven CLI: run `fixpack` in a directory with a
//! `fixpack.toml` to load and list the corpus, or `fixpack <dir>` to
//! additionally materialize the resolved corpus into `<dir>`.
//!
//! Exit codes:
//! - 0: Success (fixtures loaded, export ok if requested)
//! - 1: Error (config not found, nothing loaded, or export failed)

use std::env;
use std::process;

use fixpack_base::tracing::init_tracing;
use fixpack_base::{FilePath, PalHandle, RealPal};
use fixpack_engine::store::{InMemoryStore, StoreHandle};
use fixpack_engine::{export_corpus, load_config, load_fixtures, scan_files};

fn main() {
    init_tracing().unwrap();

    let current_dir = env::current_dir().unwrap_or_else(|e| {
        eprintln!("Error: Failed to get current directory: {}", e);
        process::exit(1);
    });

    let pal = PalHandle::new(RealPal::new(current_dir));

    let config_path = FilePath::from("fixpack.toml");
    let config = match load_config(&pal, &config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config from fixpack.toml: {}", e);
            process::exit(1);
        }
    };

    println!("Corpus: {}", config.title);

    let scan_result = match scan_files(&pal, &config) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: Failed to scan fixture files: {}", e);
            process::exit(1);
        }
    };

    if !scan_result.errors.is_empty() {
        eprintln!("\nWarnings during fixture scanning:");
        for error in &scan_result.errors {
            eprintln!("  - {}: {}", error.directory_path, error.error);
        }
    }

    let load_result = match load_fixtures(&pal, &scan_result, &config) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: Failed to load fixtures: {}", e);
            process::exit(1);
        }
    };

    if !load_result.errors.is_empty() {
        eprintln!("\nWarnings during fixture loading:");
        for error in &load_result.errors {
            eprintln!("  - {}: {}", error.path, error.error);
        }
    }

    let corpus = load_result.corpus;
    println!(
        "Loaded {} fixtures across {} paths",
        corpus.fixture_count(),
        corpus.len()
    );

    if corpus.is_empty() {
        eprintln!("No fixtures found matching the configured patterns.");
        process::exit(1);
    }

    print!("{}", corpus.describe());

    let store = match InMemoryStore::from_corpus(&corpus) {
        Ok(store) => StoreHandle::new(store),
        Err(e) => {
            eprintln!("Error: Failed to populate fixture store: {}", e);
            process::exit(1);
        }
    };

    if let Some(target) = env::args().nth(1) {
        let target = FilePath::from(target);
        let export = match export_corpus(&pal, &corpus, &target) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("Error: Failed to export corpus to {}: {}", target, e);
                process::exit(1);
            }
        };

        if !export.errors.is_empty() {
            eprintln!("\nErrors during export:");
            for error in &export.errors {
                eprintln!("  - {}: {}", error.path, error.error);
            }
            process::exit(1);
        }

        println!(
            "\nExported {}/{} fixtures to {}",
            export.written.len(),
            store.len().unwrap_or(0),
            target
        );
    }

    process::exit(0);
}
