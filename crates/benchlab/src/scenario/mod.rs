//! Scripted lab scenarios
//!
//! A scenario is a RON file of setup actions, scripted hand input and
//! verification conditions. Running one drives a [`benchlab_core::Lab`]
//! frame by frame and produces an [`ExecutionReport`].

pub mod actions;
pub mod definition;
pub mod executor;
pub mod results;
pub mod verification;

pub use actions::ScenarioAction;
pub use definition::ScenarioDefinition;
pub use executor::{ScenarioExecutor, ScenarioExecutorConfig};
pub use results::{ExecutionReport, PerformanceMetrics, RunStats};
pub use verification::{VerificationCondition, VerificationResult};
