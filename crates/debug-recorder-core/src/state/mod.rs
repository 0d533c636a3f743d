mod recorder_state;
mod store;

pub use {
    recorder_state::{RecorderState, StateSnapshot},
    store::StateStore,
};
