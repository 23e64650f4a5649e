//! # bookworm-core
//!
//! Core library for bookworm, the dashboard snapshot collector for an
//! agent configuration root.
//!
//! This library provides:
//! - Tolerant readers for the root's JSON-lines logs
//! - One collector per dashboard section
//! - A bridge to the optional external health and quality scripts
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! Every run is a single linear pass:
//! - **Ingest:** log files on disk, read best-effort (missing or malformed input degrades to empty)
//! - **Collect:** each collector produces its fixed shape from the records it reads
//! - **Write:** the [`Snapshot`] replaces the previous output file
//!
//! ## Example
//!
//! ```rust,no_run
//! use bookworm_core::snapshot::CollectContext;
//! use bookworm_core::{collect_snapshot, write_snapshot, AgentRoot, Config};
//!
//! let config = Config::load().expect("failed to load config");
//! let root = AgentRoot::new(config.resolve_root());
//! let ctx = CollectContext::from_config(&config, root, chrono::Utc::now());
//!
//! let snapshot = collect_snapshot(&ctx);
//! write_snapshot(&snapshot, &config.paths.output).expect("failed to write snapshot");
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use root::AgentRoot;
pub use snapshot::{collect_snapshot, write_snapshot, Snapshot};
pub use types::*;

// Public modules
pub mod bridge;
pub mod collectors;
pub mod config;
pub mod error;
pub mod format;
pub mod ingest;
pub mod logging;
pub mod root;
pub mod snapshot;
pub mod types;
