//! Per-category collectors.
//!
//! Each collector reads one kind of source under an [`AgentRoot`], reduces it
//! to a fixed summary shape and never fails: missing or malformed input
//! simply produces the zero-valued shape.
//!
//! | Collector | Output |
//! |-----------|--------|
//! | [`collect_events`] | [`EventSummary`](crate::types::EventSummary) |
//! | [`collect_mcp_usage`] | [`Ranking`](crate::types::Ranking) |
//! | [`collect_top_skills`] | [`Ranking`](crate::types::Ranking) |
//! | [`collect_route_accuracy`] | `"NN%"` or `"--"` |
//! | [`collect_security`] | [`SecuritySummary`](crate::types::SecuritySummary) |
//! | [`collect_disk`] | [`DiskSummary`](crate::types::DiskSummary) |
//! | [`collect_evolution`] | [`EvolutionSummary`](crate::types::EvolutionSummary) |
//! | [`collect_system_info`] | [`SystemInfo`](crate::types::SystemInfo) |
//!
//! [`AgentRoot`]: crate::root::AgentRoot

mod disk;
mod events;
mod evolution;
mod routing;
mod security;
mod system;
mod tally;

pub use disk::{collect_disk, REFERENCE_CAPACITY_MB};
pub use events::{collect_events, collect_mcp_usage, Window};
pub use evolution::{collect_evolution, summarize_evolution};
pub use routing::{collect_route_accuracy, collect_top_skills, route_accuracy};
pub use security::{collect_security, summarize_security};
pub use system::{collect_system_info, extract_system_info};
pub use tally::Tally;
