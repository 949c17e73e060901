use std::str::FromStr;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};

use crate::domain::models::reservation::{NewReservationParams, Reservation, ReservationWithGuest};
use crate::domain::ports::{EventRepository, ProfileRepository, ReservationRepository, SessionRepository};
use crate::domain::services::cache::{CacheStore, USER_RESERVATIONS_PREFIX};
use crate::domain::services::freshness::{FreshnessService, Resource};
use crate::domain::services::seat_ledger::{transition_delta, ReservationStatus};
use crate::error::AppError;

/// Stored phone numbers carry one fixed country prefix.
pub const COUNTRY_PREFIX: &str = "+39";

/// Shown in admin listings when a guest's profile lookup fails.
const GUEST_PLACEHOLDER: &str = "Guest";

const USER_RESERVATIONS_TTL_MINUTES: i64 = 5;

pub struct CreateReservationParams {
    pub event_id: String,
    pub session_id: String,
    pub number_of_seats: i32,
    pub contact_name: String,
    pub phone_number: String,
    pub allergy_notes: Option<String>,
}

#[derive(Default)]
pub struct ReservationUpdate {
    pub number_of_seats: Option<i32>,
    pub contact_name: Option<String>,
    pub phone_number: Option<String>,
    pub allergy_notes: Option<String>,
    pub status: Option<ReservationStatus>,
}

pub fn normalize_phone(raw: &str) -> String {
    let trimmed: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if trimmed.starts_with('+') {
        trimmed
    } else {
        format!("{}{}", COUNTRY_PREFIX, trimmed)
    }
}

/// Reservation lifecycle: every operation writes the row and the seat
/// counter in one transaction, then invalidates the caches its outcome made
/// stale, and resolves to exactly one success or failure.
pub struct ReservationService {
    reservation_repo: Arc<dyn ReservationRepository>,
    session_repo: Arc<dyn SessionRepository>,
    event_repo: Arc<dyn EventRepository>,
    profile_repo: Arc<dyn ProfileRepository>,
    cache: Arc<CacheStore>,
    freshness: Arc<FreshnessService>,
}

impl ReservationService {
    pub fn new(
        reservation_repo: Arc<dyn ReservationRepository>,
        session_repo: Arc<dyn SessionRepository>,
        event_repo: Arc<dyn EventRepository>,
        profile_repo: Arc<dyn ProfileRepository>,
        cache: Arc<CacheStore>,
        freshness: Arc<FreshnessService>,
    ) -> Self {
        Self { reservation_repo, session_repo, event_repo, profile_repo, cache, freshness }
    }

    pub async fn create(
        &self,
        user_id: &str,
        params: CreateReservationParams,
        admin_override: bool,
    ) -> Result<Reservation, AppError> {
        if params.number_of_seats < 1 {
            return Err(AppError::Validation("Seat count must be at least 1".into()));
        }
        if params.contact_name.trim().is_empty() {
            return Err(AppError::Validation("Contact name is required".into()));
        }

        let event = self.event_repo.find_by_id(&params.event_id).await?
            .ok_or(AppError::NotFound("Event not found".into()))?;

        if !admin_override && !event.is_open {
            return Err(AppError::Forbidden("Event is closed for reservations".into()));
        }

        if params.number_of_seats > event.max_reservations_per_user {
            return Err(AppError::Validation(format!(
                "At most {} seats per booking for this event",
                event.max_reservations_per_user
            )));
        }

        let session = self.session_repo.find_by_id(&params.session_id).await?
            .ok_or(AppError::NotFound("Session not found".into()))?;
        if session.event_id != event.id {
            return Err(AppError::Validation("Session does not belong to this event".into()));
        }

        if !admin_override {
            let existing = self.reservation_repo
                .find_active_for_user_event(user_id, &event.id)
                .await?;
            if existing.is_some() {
                return Err(AppError::Conflict("You already have a reservation for this event".into()));
            }
        }

        // Advisory pre-check. The guarded decrement inside the repository
        // transaction is what actually prevents overbooking under races.
        if params.number_of_seats > session.available_seats {
            return Err(AppError::Conflict("Not enough seats available".into()));
        }

        let reservation = Reservation::new(NewReservationParams {
            user_id: user_id.to_string(),
            event_id: params.event_id,
            session_id: params.session_id,
            number_of_seats: params.number_of_seats,
            contact_name: params.contact_name,
            phone_number: normalize_phone(&params.phone_number),
            allergy_notes: params.allergy_notes,
        });

        let created = self.reservation_repo.create_holding_seats(&reservation).await?;

        self.invalidate_after_change(&created.event_id, &created.user_id);
        info!("Reservation created: {} ({} seats, session {})", created.id, created.number_of_seats, created.session_id);
        Ok(created)
    }

    /// Idempotent: cancelling an already-cancelled reservation succeeds
    /// without touching the row or the seat counter.
    pub async fn cancel(&self, id: &str, actor_id: &str, actor_is_admin: bool) -> Result<Reservation, AppError> {
        let reservation = self.reservation_repo.find_by_id(id).await?
            .ok_or(AppError::NotFound("Reservation not found".into()))?;

        if reservation.user_id != actor_id && !actor_is_admin {
            return Err(AppError::Forbidden("Not your reservation".into()));
        }

        let old_status = ReservationStatus::from_str(&reservation.status)?;
        if old_status == ReservationStatus::Cancelled {
            return Ok(reservation);
        }

        let mut cancelled = reservation.clone();
        cancelled.status = ReservationStatus::Cancelled.as_str().to_string();

        let delta = transition_delta(
            Some((old_status, reservation.number_of_seats)),
            Some((ReservationStatus::Cancelled, reservation.number_of_seats)),
        );

        let updated = self.reservation_repo.update_adjusting_seats(&cancelled, delta).await?;

        self.invalidate_after_change(&updated.event_id, &updated.user_id);
        info!("Reservation cancelled: {} (released {} seats)", updated.id, reservation.number_of_seats);
        Ok(updated)
    }

    /// Admin partial edit. Status transitions and seat-count changes combine
    /// into a single availability delta, so reinstating a cancelled booking
    /// while resizing it commits exactly the new seat count.
    pub async fn edit(&self, id: &str, updates: ReservationUpdate) -> Result<Reservation, AppError> {
        let current = self.reservation_repo.find_by_id(id).await?
            .ok_or(AppError::NotFound("Reservation not found".into()))?;

        let old_status = ReservationStatus::from_str(&current.status)?;
        let old_seats = current.number_of_seats;

        let mut updated = current.clone();
        if let Some(seats) = updates.number_of_seats {
            if seats < 1 {
                return Err(AppError::Validation("Seat count must be at least 1".into()));
            }
            updated.number_of_seats = seats;
        }
        if let Some(name) = updates.contact_name {
            updated.contact_name = name;
        }
        if let Some(phone) = updates.phone_number {
            updated.phone_number = normalize_phone(&phone);
        }
        if let Some(notes) = updates.allergy_notes {
            updated.allergy_notes = Some(notes);
        }
        if let Some(status) = updates.status {
            updated.status = status.as_str().to_string();
        }

        let new_status = ReservationStatus::from_str(&updated.status)?;
        let delta = transition_delta(
            Some((old_status, old_seats)),
            Some((new_status, updated.number_of_seats)),
        );

        let saved = self.reservation_repo.update_adjusting_seats(&updated, delta).await?;

        self.invalidate_after_change(&saved.event_id, &saved.user_id);
        info!("Reservation edited: {} (seat delta {})", saved.id, delta);
        Ok(saved)
    }

    /// Admin hard delete. Active reservations release their seats; cancelled
    /// ones already did.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let reservation = self.reservation_repo.find_by_id(id).await?
            .ok_or(AppError::NotFound("Reservation not found".into()))?;

        let old_status = ReservationStatus::from_str(&reservation.status)?;
        let delta = transition_delta(Some((old_status, reservation.number_of_seats)), None);
        let seats_to_release = -delta;

        self.reservation_repo
            .delete_releasing_seats(&reservation.id, &reservation.session_id, seats_to_release)
            .await?;

        self.invalidate_after_change(&reservation.event_id, &reservation.user_id);
        info!("Reservation deleted: {} (released {} seats)", reservation.id, seats_to_release);
        Ok(())
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Reservation>, AppError> {
        let key = format!("{}{}", USER_RESERVATIONS_PREFIX, user_id);
        if let Some(cached) = self.cache.get::<Vec<Reservation>>(&key) {
            return Ok(cached);
        }

        let reservations = self.reservation_repo.list_by_user(user_id).await?;
        self.cache.set(&key, &reservations, USER_RESERVATIONS_TTL_MINUTES);
        Ok(reservations)
    }

    pub async fn list_by_event(&self, event_id: &str) -> Result<Vec<ReservationWithGuest>, AppError> {
        let reservations = self.reservation_repo.list_by_event(event_id).await?;
        Ok(self.decorate_with_guests(reservations).await)
    }

    pub async fn list_all(&self) -> Result<Vec<ReservationWithGuest>, AppError> {
        let reservations = self.reservation_repo.list_all().await?;
        Ok(self.decorate_with_guests(reservations).await)
    }

    /// Profile lookups run concurrently per item; any single failure degrades
    /// to a placeholder name instead of failing the batch.
    async fn decorate_with_guests(&self, reservations: Vec<Reservation>) -> Vec<ReservationWithGuest> {
        let lookups = reservations.iter().map(|r| {
            let repo = self.profile_repo.clone();
            let user_id = r.user_id.clone();
            async move {
                match repo.find_by_id(&user_id).await {
                    Ok(Some(profile)) => profile.full_name,
                    Ok(None) => GUEST_PLACEHOLDER.to_string(),
                    Err(e) => {
                        warn!("Profile lookup failed for {}: {}", user_id, e);
                        GUEST_PLACEHOLDER.to_string()
                    }
                }
            }
        });

        let names = join_all(lookups).await;

        reservations
            .into_iter()
            .zip(names)
            .map(|(reservation, guest_name)| ReservationWithGuest { reservation, guest_name })
            .collect()
    }

    fn invalidate_after_change(&self, event_id: &str, user_id: &str) {
        self.freshness.invalidate(Resource::Event(event_id.to_string()));
        self.freshness.invalidate(Resource::UserReservations(user_id.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_phone;

    #[test]
    fn phone_gets_country_prefix() {
        assert_eq!(normalize_phone("333 123 4567"), "+393331234567");
        assert_eq!(normalize_phone("+41 79 000 11 22"), "+41790001122");
    }
}
