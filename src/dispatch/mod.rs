pub mod orchestrator;
pub mod types;
pub mod validation;

pub use orchestrator::Dispatcher;
pub use types::{CandidateResult, CandidateStage, DispatchError, DispatchOutcome};
