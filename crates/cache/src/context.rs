use crate::state::{CacheChange, CacheState};
use std::sync::{Mutex, MutexGuard};
use timemesh_domain::TimeNormalizer;
use timemesh_infra::TimeMeshContext;
use tokio::sync::broadcast;
use tracing::debug;

const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Everything a use case of the cache has access to
pub struct CacheContext {
    pub infra: TimeMeshContext,
    state: Mutex<CacheState>,
    changes: broadcast::Sender<CacheChange>,
}

impl CacheContext {
    pub fn new(infra: TimeMeshContext) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            state: Mutex::new(CacheState::new(infra.config.transcript_char_limit)),
            infra,
            changes,
        }
    }

    /// Never hold the returned guard across an `.await`
    pub fn state(&self) -> MutexGuard<'_, CacheState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn normalizer(&self) -> TimeNormalizer {
        self.infra.session.normalizer()
    }

    pub fn publish(&self, change: CacheChange) {
        debug!("Cache change: {:?}", change);
        // No receivers is not an error
        let _ = self.changes.send(change);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CacheChange> {
        self.changes.subscribe()
    }
}
