//! Combat resolution: the analytic hit → wound chain and kill simulation

pub mod chain;
pub mod estimate;
pub mod profile;
pub mod simulation;
pub mod statistics;
pub mod target;

pub use chain::{resolve_combat_chain, ChainResult};
pub use estimate::{estimate_expected_kills, KillEstimate};
pub use profile::CombatProfile;
pub use simulation::{max_achievable_kills, simulate_kills, KillSimulator, SimulationSummary};
pub use statistics::{ConfidenceInterval, SampleMoments};
pub use target::TargetPool;
