use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};
use crate::state::AppState;
use crate::domain::services::freshness::Resource;

const POLL_INTERVAL_SECS: u64 = 30;

/// Periodic staleness sweep. Seat counters can change under any cached
/// event snapshot, so the poller expires the event family on a fixed
/// interval; the next read refetches and repopulates.
pub async fn start_background_worker(state: Arc<AppState>) {
    info!("Starting freshness poller ({}s interval)...", POLL_INTERVAL_SECS);

    loop {
        sleep(Duration::from_secs(POLL_INTERVAL_SECS)).await;

        debug!("Freshness poll tick: expiring event caches");
        state.freshness.invalidate(Resource::EventList);
        state.cache.invalidate_by_prefix(
            crate::domain::services::cache::EVENT_DETAILS_PREFIX,
        );
    }
}
