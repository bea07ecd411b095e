mod active_elections;
mod election;
mod election_scheduler;

pub use active_elections::{
    ActiveElections, ActiveElectionsConfig, ActiveElectionsData, InsertionRequest,
};
pub use election::{ConfirmationAction, Election, ElectionBehavior, ElectionState};
pub use election_scheduler::{
    ElectionScheduler, ElectionSchedulerConfig, ElectionSchedulerExt, Progress, ShutdownMode,
};
