use crate::{
    RecordingEngineFactory,
    tests::fakes::{CountingEngines, idle_state},
};

use std::path::PathBuf;

/// WHAT: Beginning a recording sets the engine and directory together
/// WHY: isRecording must imply a current log directory
#[test]
#[allow(clippy::unwrap_used)]
fn given_idle_state_when_beginning_then_recording_with_current_dir() {
    // Given: An idle state and a fresh engine handle
    let mut state = idle_state();
    let engine = CountingEngines::default().create().unwrap();
    let dir = PathBuf::from("/logs/a");

    // When: Committing the started engine
    state.begin(engine, dir.clone());

    // Then: Recording and directory are both present
    assert!(state.is_recording());
    assert_eq!(state.current_log_dir(), Some(dir.as_path()));
    assert_eq!(state.last_log_dir(), None);
}

/// WHAT: Finishing moves the current directory to last_log_dir
/// WHY: The finished directory must stay available for hand-off after stop
#[test]
#[allow(clippy::unwrap_used)]
fn given_recording_state_when_finishing_then_dir_moves_to_last() {
    // Given: A recording state
    let mut state = idle_state();
    state.begin(
        CountingEngines::default().create().unwrap(),
        PathBuf::from("/logs/a"),
    );

    // When: Finishing the recording
    let finished = state.finish();

    // Then: Not recording, no current dir, last dir is the finished one
    assert_eq!(finished, Some(PathBuf::from("/logs/a")));
    assert!(!state.is_recording());
    assert_eq!(state.current_log_dir(), None);
    assert_eq!(state.last_log_dir(), Some(PathBuf::from("/logs/a").as_path()));
}

/// WHAT: Finishing an idle state is a no-op
/// WHY: A stray stop must not erase the previous hand-off directory
#[test]
fn given_idle_state_when_finishing_then_nothing_changes() {
    // Given: An idle state
    let mut state = idle_state();

    // When: Finishing
    let finished = state.finish();

    // Then: Nothing was finished and the snapshot is untouched
    assert_eq!(finished, None);
    assert_eq!(state.snapshot(), idle_state().snapshot());
}

/// WHAT: Snapshot reports disagreement between desired and actual state
/// WHY: The disagreement is what drives the next transition
#[test]
fn given_should_record_without_engine_when_snapshotting_then_not_settled() {
    // Given: Recording desired but not started
    let mut state = idle_state();
    let changed = state.set_should_record(true);

    // When: Taking a snapshot
    let snapshot = state.snapshot();

    // Then: The flip registered and the snapshot is unsettled
    assert!(changed);
    assert!(snapshot.should_record);
    assert!(!snapshot.is_recording);
    assert!(!snapshot.is_settled());
}

/// WHAT: Start and stop generations count committed transitions
/// WHY: Waiters key on these counts, which later transitions never undo
#[test]
#[allow(clippy::unwrap_used)]
fn given_start_stop_cycle_when_snapshotting_then_generations_advanced() {
    // Given: An idle state
    let mut state = idle_state();
    let engines = CountingEngines::default();

    // When: Two recordings are begun and one is finished
    state.begin(engines.create().unwrap(), PathBuf::from("/logs/a"));
    state.finish();
    state.begin(engines.create().unwrap(), PathBuf::from("/logs/b"));

    // Then: Two starts and one stop, and a stray finish only counts once
    let snapshot = state.snapshot();
    assert_eq!(snapshot.start_generation, 2);
    assert_eq!(snapshot.stop_generation, 1);
    state.finish();
    assert_eq!(state.finish(), None);
    assert_eq!(state.stop_generation(), 2);
}
