//! Ingestion layer for reading agent log files
//!
//! Every collector reads disk through this module so that missing files,
//! unreadable files and malformed lines degrade the same way everywhere.
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  Source Files   │ ──► │  read_jsonl  │ ──► │  Collectors  │
//! │ (~/.claude/...) │     │  LogRecord   │     │  (summaries) │
//! └─────────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Nothing in this module returns an error. A file that cannot be read is
//! treated as empty, a line that is not JSON is skipped, and a directory that
//! does not exist has size zero.

mod disk;
mod reader;
mod record;

pub use disk::dir_size_mb;
pub use reader::{discover, parse_jsonl, read_jsonl, read_text};
pub use record::{parse_timestamp, LogRecord};
