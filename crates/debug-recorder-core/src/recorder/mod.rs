mod debug_recorder;
mod orchestrator;

pub use {
    debug_recorder::DebugRecorder,
    orchestrator::{Collaborators, DEFAULT_RETRY_DELAY, Orchestrator, Transition},
};
