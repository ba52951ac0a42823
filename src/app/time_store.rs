use std::{
    sync::{Arc, RwLock},
    time::Duration,
};

use chrono::Utc;
use tokio::task::JoinHandle;

/// Cached "now" in unix seconds, shared by views that show relative times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeStore {
    now: i64,
}

impl TimeStore {
    pub fn new() -> Self {
        Self {
            now: Utc::now().timestamp(),
        }
    }

    pub fn at(now: i64) -> Self {
        Self { now }
    }

    pub fn now(&self) -> i64 {
        self.now
    }

    pub fn refresh(&mut self) -> i64 {
        self.now = Utc::now().timestamp();
        self.now
    }

    pub fn seconds_since(&self, timestamp: i64) -> i64 {
        (self.now - timestamp).max(0)
    }
}

impl Default for TimeStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Refreshes `store` every `period`. Runs until the lock is poisoned or the
/// task is dropped.
pub async fn run_ticker(store: Arc<RwLock<TimeStore>>, period: Duration) {
    let mut interval = tokio::time::interval(period);
    loop {
        interval.tick().await;
        let refreshed = store.write().map(|mut guard| guard.refresh()).is_ok();
        if !refreshed {
            log::warn!("No se pudo bloquear el reloj compartido (poisoned lock)");
            return;
        }
    }
}

pub fn spawn_ticker(store: Arc<RwLock<TimeStore>>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(run_ticker(store, period))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_since_never_goes_negative() {
        let store = TimeStore::at(1_000);

        assert_eq!(store.seconds_since(400), 600);
        assert_eq!(store.seconds_since(5_000), 0);
    }

    #[test]
    fn refresh_moves_to_wall_clock() {
        let mut store = TimeStore::at(0);

        let now = store.refresh();

        assert!(now > 1_600_000_000);
        assert_eq!(store.now(), now);
    }

    #[tokio::test]
    async fn ticker_refreshes_shared_store() {
        let store = Arc::new(RwLock::new(TimeStore::at(0)));

        let handle = spawn_ticker(Arc::clone(&store), Duration::from_millis(5));
        tokio::time::sleep(Duration::from_millis(30)).await;
        handle.abort();

        assert!(store.read().unwrap().now() > 0);
    }
}
