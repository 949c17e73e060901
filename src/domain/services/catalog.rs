use std::sync::Arc;

use tracing::debug;

use crate::domain::models::event::EventWithSessions;
use crate::domain::ports::{EventRepository, SessionRepository};
use crate::domain::services::cache::{CacheStore, EVENTS_KEY, EVENT_DETAILS_PREFIX};
use crate::error::AppError;

const EVENT_LIST_TTL_MINUTES: i64 = 1;
const EVENT_DETAILS_TTL_MINUTES: i64 = 5;

/// Event/session read path: events ordered by date ascending, each carrying
/// its sessions ordered by time ascending.
pub struct CatalogService {
    event_repo: Arc<dyn EventRepository>,
    session_repo: Arc<dyn SessionRepository>,
    cache: Arc<CacheStore>,
}

impl CatalogService {
    pub fn new(
        event_repo: Arc<dyn EventRepository>,
        session_repo: Arc<dyn SessionRepository>,
        cache: Arc<CacheStore>,
    ) -> Self {
        Self { event_repo, session_repo, cache }
    }

    /// Always-fresh list. The polling read path deliberately bypasses the
    /// cache: freshness beats hit rate for the list view. The result is still
    /// written back for the cached variant to reuse.
    pub async fn list_events(&self) -> Result<Vec<EventWithSessions>, AppError> {
        let events = self.event_repo.list().await?;

        let mut assembled = Vec::with_capacity(events.len());
        for event in events {
            let sessions = self.session_repo.list_by_event(&event.id).await?;
            assembled.push(EventWithSessions { event, sessions });
        }

        self.cache.set(EVENTS_KEY, &assembled, EVENT_LIST_TTL_MINUTES);
        Ok(assembled)
    }

    /// Opportunistic short-TTL variant of the list.
    pub async fn list_events_cached(&self) -> Result<Vec<EventWithSessions>, AppError> {
        if let Some(cached) = self.cache.get::<Vec<EventWithSessions>>(EVENTS_KEY) {
            debug!("Event list served from cache");
            return Ok(cached);
        }
        self.list_events().await
    }

    /// Cache-first detail read. A missing row is a normal absent outcome, not
    /// an error.
    pub async fn get_event(&self, id: &str) -> Result<Option<EventWithSessions>, AppError> {
        let key = format!("{}{}", EVENT_DETAILS_PREFIX, id);

        if let Some(cached) = self.cache.get::<EventWithSessions>(&key) {
            debug!("Event {} served from cache", id);
            return Ok(Some(cached));
        }

        let Some(event) = self.event_repo.find_by_id(id).await? else {
            return Ok(None);
        };
        let sessions = self.session_repo.list_by_event(&event.id).await?;
        let assembled = EventWithSessions { event, sessions };

        self.cache.set(&key, &assembled, EVENT_DETAILS_TTL_MINUTES);
        Ok(Some(assembled))
    }
}
