pub mod config;
pub mod foresight;
pub mod memory;
pub mod placement;
pub mod policy;
pub mod risk;

pub use config::{ConfigError, PolicyConfig, PolicyKind, ValidationError};
pub use foresight::{ForesightTracker, InvalidationCause, SyncOutcome};
pub use memory::BotMemory;
pub use placement::{Placement, PlacementReason};
pub use policy::{CautiousPolicy, ForesightPolicy, Policy, PolicyContext, StatisticalPolicy};
pub use risk::{DangerTrigger, HistoryDigest, RiskAssessor, RiskModel, RiskSignal};
