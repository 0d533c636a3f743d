use crate::{
    CoreResult, RecorderError,
    state::{RecorderState, StateSnapshot},
    storage::{PathSetting, SentinelTrigger},
};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, instrument};

/// Owner of the one [`RecorderState`] and its published sequence.
///
/// Updates are serialized through an async mutex and published while the
/// lock is still held, so every subscriber observes values in commit order.
/// Subscribers receive the current value first (replay-last), then each
/// later commit. A slow subscriber may skip intermediate values but always
/// converges on the latest one.
pub struct StateStore {
    state: Mutex<RecorderState>,
    published: watch::Sender<StateSnapshot>,
}

impl StateStore {
    /// Create a store around an explicit initial state.
    pub fn new(initial: RecorderState) -> Self {
        let (published, _) = watch::channel(initial.snapshot());
        Self {
            state: Mutex::new(initial),
            published,
        }
    }

    /// Seed the initial state from the sentinel and the durable path setting.
    ///
    /// Recording is desired if the sentinel exists or a path was persisted by
    /// a recording that never reached Stop.
    #[track_caller]
    #[instrument(skip(sentinel, setting))]
    pub fn initialize(sentinel: &SentinelTrigger, setting: &dyn PathSetting) -> CoreResult<Self> {
        let sentinel_exists = sentinel.exists();
        let persisted = setting.load()?;
        let should_record = sentinel_exists || persisted.is_some();

        info!(
            sentinel_exists,
            persisted_log_dir = ?persisted,
            should_record,
            "Recorder state initialized"
        );

        Ok(Self::new(RecorderState::new(should_record)))
    }

    /// Latest published value.
    pub fn current(&self) -> StateSnapshot {
        self.published.borrow().clone()
    }

    /// Subscribe to the published sequence.
    ///
    /// The returned receiver treats the current value as unseen, so the
    /// first `changed()` resolves immediately.
    pub fn subscribe(&self) -> watch::Receiver<StateSnapshot> {
        let mut rx = self.published.subscribe();
        rx.mark_changed();
        rx
    }

    /// Apply `f` under mutual exclusion and publish the result.
    ///
    /// A value is only published when the snapshot actually changed, so
    /// no-op updates produce no emission. If `f` fails nothing is published;
    /// `f` must leave the state untouched on its error paths.
    #[instrument(skip(self, f))]
    pub async fn update<F, R>(&self, f: F) -> CoreResult<R>
    where
        F: FnOnce(&mut RecorderState) -> CoreResult<R>,
    {
        let mut state = self.state.lock().await;
        let result = f(&mut *state)?;

        let next = state.snapshot();
        let published = self.published.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });

        if published {
            debug!(state = ?*state, "Recorder state published");
        }

        Ok(result)
    }

    /// Set the desired recording flag.
    pub async fn request_recording(&self, should_record: bool) -> CoreResult<()> {
        self.update(|state| {
            state.set_should_record(should_record);
            Ok(())
        })
        .await
    }

    /// Wait for a published value matching `predicate`.
    ///
    /// Checks the receiver's current value first, then each later one. With
    /// `timeout = None` this waits indefinitely.
    pub async fn wait_for<P>(
        rx: &mut watch::Receiver<StateSnapshot>,
        timeout: Option<Duration>,
        predicate: P,
    ) -> CoreResult<StateSnapshot>
    where
        P: FnMut(&StateSnapshot) -> bool,
    {
        let caller = Location::caller();
        let wait = async {
            rx.wait_for(predicate)
                .await
                .map(|snapshot| snapshot.clone())
                .map_err(|_| RecorderError::StoreClosed {
                    location: ErrorLocation::from(caller),
                })
        };

        match timeout {
            Some(limit) => tokio::time::timeout(limit, wait)
                .await
                .map_err(|_| RecorderError::AwaitTimeout {
                    timeout: limit,
                    location: ErrorLocation::from(caller),
                })?,
            None => wait.await,
        }
    }
}
