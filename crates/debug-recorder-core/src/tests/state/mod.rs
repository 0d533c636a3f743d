mod recorder_state;
mod store;
