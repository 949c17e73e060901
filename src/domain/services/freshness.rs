use std::sync::Arc;

use tracing::debug;

use crate::domain::services::cache::{
    CacheStore, EVENTS_KEY, EVENT_DETAILS_PREFIX, SETTINGS_KEY, USER_RESERVATIONS_PREFIX,
};

/// Cacheable resource families.
#[derive(Debug, Clone)]
pub enum Resource {
    EventList,
    Event(String),
    Settings,
    UserReservations(String),
    Everything,
}

/// Single entry point for every staleness trigger: mutations, the periodic
/// poller, the explicit refresh endpoint, and auth transitions all call
/// `invalidate` instead of touching cache keys directly.
pub struct FreshnessService {
    cache: Arc<CacheStore>,
}

impl FreshnessService {
    pub fn new(cache: Arc<CacheStore>) -> Self {
        Self { cache }
    }

    pub fn invalidate(&self, resource: Resource) {
        debug!("Invalidating cached resource: {:?}", resource);
        match resource {
            Resource::EventList => self.cache.remove(EVENTS_KEY),
            Resource::Event(id) => {
                self.cache.remove(&format!("{}{}", EVENT_DETAILS_PREFIX, id));
                // The list embeds session counters, so it is stale too.
                self.cache.remove(EVENTS_KEY);
            }
            Resource::Settings => self.cache.remove(SETTINGS_KEY),
            Resource::UserReservations(user_id) => {
                self.cache.remove(&format!("{}{}", USER_RESERVATIONS_PREFIX, user_id));
            }
            Resource::Everything => self.cache.clear_all(),
        }
    }

    /// Sign-in drops the shared event list along with that user's cached
    /// reservations; both get refetched lazily.
    pub fn on_sign_in(&self, user_id: &str) {
        self.invalidate(Resource::UserReservations(user_id.to_string()));
        self.invalidate(Resource::EventList);
    }

    /// Sign-out nukes everything, with no automatic refetch.
    pub fn on_sign_out(&self) {
        self.invalidate(Resource::Everything);
    }
}
