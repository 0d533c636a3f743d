use crate::{
    PathSetting, RecorderError, SentinelTrigger, StateStore,
    tests::fakes::{MemorySetting, failure, idle_state},
};

use std::{path::PathBuf, sync::Arc, time::Duration};

use tempfile::TempDir;

/// WHAT: No sentinel and no persisted path seeds an idle state
/// WHY: Recording must not start on a clean install
#[test]
#[allow(clippy::unwrap_used)]
fn given_no_sentinel_and_no_setting_when_initializing_then_should_not_record() {
    // Given: An empty sentinel directory and no persisted path
    let dir = TempDir::new().unwrap();
    let sentinel = SentinelTrigger::in_dir(dir.path());
    let setting = MemorySetting::default();

    // When: Initializing the store
    let store = StateStore::initialize(&sentinel, &setting).unwrap();

    // Then: Recording is not desired
    let state = store.current();
    assert!(!state.should_record);
    assert!(!state.is_recording);
}

/// WHAT: A persisted path alone seeds should_record = true
/// WHY: A process that died mid-recording must resume on restart
#[test]
#[allow(clippy::unwrap_used)]
fn given_persisted_path_without_sentinel_when_initializing_then_should_record() {
    // Given: Durable setting = /x/y and no sentinel file
    let dir = TempDir::new().unwrap();
    let sentinel = SentinelTrigger::in_dir(dir.path());
    let setting = MemorySetting::with_value(Some(PathBuf::from("/x/y")));

    // When: Initializing the store
    let store = StateStore::initialize(&sentinel, &setting).unwrap();

    // Then: Recording is desired but not yet running
    let state = store.current();
    assert!(state.should_record);
    assert!(!state.is_recording);
    assert_eq!(state.current_log_dir, None);
}

/// WHAT: A sentinel file alone seeds should_record = true
/// WHY: Operators can request recording without any API access
#[test]
#[allow(clippy::unwrap_used)]
fn given_sentinel_without_setting_when_initializing_then_should_record() {
    // Given: Sentinel present, no persisted path
    let dir = TempDir::new().unwrap();
    let sentinel = SentinelTrigger::in_dir(dir.path());
    sentinel.ensure().unwrap();
    let setting = MemorySetting::default();

    // When: Initializing the store
    let store = StateStore::initialize(&sentinel, &setting).unwrap();

    // Then: Recording is desired
    assert!(store.current().should_record);
}

/// WHAT: A new subscriber immediately sees the current value
/// WHY: Replay-last lets late subscribers act on the present state
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_existing_state_when_subscribing_then_current_value_replayed() {
    // Given: A store where recording was requested
    let store = StateStore::new(idle_state());
    store.request_recording(true).await.unwrap();

    // When: Subscribing afterwards
    let mut rx = store.subscribe();

    // Then: The first change resolves at once with the current value
    tokio::time::timeout(Duration::from_secs(1), rx.changed())
        .await
        .unwrap()
        .unwrap();
    assert!(rx.borrow_and_update().should_record);
}

/// WHAT: An update that changes nothing publishes nothing
/// WHY: Duplicate emissions must not wake subscribers
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_unchanged_state_when_updating_then_nothing_published() {
    // Given: A subscriber that has seen the current value
    let store = StateStore::new(idle_state());
    let mut rx = store.subscribe();
    rx.borrow_and_update();

    // When: Requesting the state that already holds
    store.request_recording(false).await.unwrap();

    // Then: No new value was published
    assert!(!rx.has_changed().unwrap());
}

/// WHAT: A failing update leaves the state untouched and publishes nothing
/// WHY: Aborted transitions must not leak partial state to subscribers
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_failing_update_when_applied_then_error_returned_and_nothing_published() {
    // Given: A subscriber that has seen the current value
    let store = StateStore::new(idle_state());
    let mut rx = store.subscribe();
    rx.borrow_and_update();

    // When: The update function fails
    let result: Result<(), RecorderError> = store.update(|_| Err(failure("test"))).await;

    // Then: The error propagates and nothing changed
    assert!(matches!(result, Err(RecorderError::Collaborator { .. })));
    assert!(!rx.has_changed().unwrap());
    assert!(!store.current().should_record);
}

/// WHAT: Concurrent updates never interleave
/// WHY: The store is the single serialization point for every trigger
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[allow(clippy::unwrap_used)]
async fn given_concurrent_updates_when_applied_then_each_runs_alone() {
    // Given: A shared store and an in-flight marker checked inside each update
    let store = Arc::new(StateStore::new(idle_state()));
    let in_flight = Arc::new(std::sync::atomic::AtomicBool::new(false));

    // When: 32 tasks toggle the desired state concurrently
    let mut handles = Vec::new();
    for i in 0..32 {
        let store = Arc::clone(&store);
        let in_flight = Arc::clone(&in_flight);
        handles.push(tokio::spawn(async move {
            store
                .update(|state| {
                    let overlapped = in_flight.swap(true, std::sync::atomic::Ordering::SeqCst);
                    std::thread::sleep(Duration::from_millis(1));
                    state.set_should_record(i % 2 == 0);
                    in_flight.store(false, std::sync::atomic::Ordering::SeqCst);
                    Ok(overlapped)
                })
                .await
                .unwrap()
        }));
    }

    // Then: No update observed another one in flight
    for handle in handles {
        assert!(!handle.await.unwrap());
    }
}

/// WHAT: Waiting for a state that never arrives times out
/// WHY: Callers get an error instead of hanging forever when a bound is set
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_unreachable_state_when_waiting_with_timeout_then_await_timeout() {
    // Given: An idle store nobody will start
    let store = StateStore::new(idle_state());
    let mut rx = store.subscribe();

    // When: Waiting for a running recording with a short timeout
    let result =
        StateStore::wait_for(&mut rx, Some(Duration::from_millis(20)), |s| s.is_recording).await;

    // Then: The wait fails with AwaitTimeout
    assert!(matches!(result, Err(RecorderError::AwaitTimeout { .. })));
}

/// WHAT: Initialization surfaces a broken durable setting
/// WHY: A corrupt setting must not silently discard an interrupted recording
#[test]
#[allow(clippy::unwrap_used)]
fn given_unreadable_setting_when_initializing_then_error() {
    // Given: A TOML setting file with invalid contents
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("recorder_state.toml");
    std::fs::write(&path, "log_dir = [not toml").unwrap();
    let setting = crate::TomlPathSetting::new(&path);
    let sentinel = SentinelTrigger::in_dir(dir.path());

    // When: Initializing the store
    let result = StateStore::initialize(&sentinel, &setting as &dyn PathSetting);

    // Then: The setting error propagates
    assert!(matches!(result, Err(RecorderError::Setting { .. })));
}
