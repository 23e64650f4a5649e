//! Bridge to the optional external health-check and quality-analyzer scripts.
//!
//! Both scripts live under `<root>/scripts/` and are run through the
//! configured interpreter. Either may be missing, slow or broken; the bridge
//! turns every such case into a default value rather than an error.

mod external;
mod health;
mod quality;

pub use external::ExternalCall;
pub use health::{collect_health, default_health, normalize_health, HealthDimension, HealthSummary};
pub use quality::{collect_quality, summarize_quality, QualitySummary, ToolQuality};
