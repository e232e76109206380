pub mod reports;
pub mod scenarios;
pub mod seeds;
pub mod simulation;
pub mod tester;

pub use scenarios::{ScenarioKind, list_scenarios};
pub use seeds::resolve_seed_inputs;
pub use simulation::Pacing;
pub use tester::*;
