use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    /// Active reservations count against session availability.
    pub fn is_active(self) -> bool {
        !matches!(self, ReservationStatus::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            other => Err(AppError::Validation(format!("Unknown reservation status: {}", other))),
        }
    }
}

/// Seats a reservation holds against its session: the seat count while the
/// status is active, zero once cancelled.
fn committed_seats(state: Option<(ReservationStatus, i32)>) -> i32 {
    match state {
        Some((status, seats)) if status.is_active() => seats,
        _ => 0,
    }
}

/// Signed number of seats to take away from a session's availability when a
/// reservation moves from `old` to `new` (`None` = the reservation does not
/// exist on that side, i.e. creation or hard delete).
///
/// Positive values reduce availability, negative values release seats. A
/// status transition and a seat-count change in the same update combine into
/// one delta, so cancelling 3 seats and reinstating with 5 nets exactly -5
/// against availability relative to the cancelled state.
pub fn transition_delta(
    old: Option<(ReservationStatus, i32)>,
    new: Option<(ReservationStatus, i32)>,
) -> i32 {
    committed_seats(new) - committed_seats(old)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ReservationStatus::{Cancelled, Confirmed, Pending};

    #[test]
    fn create_commits_new_seats() {
        assert_eq!(transition_delta(None, Some((Confirmed, 4))), 4);
        assert_eq!(transition_delta(None, Some((Pending, 2))), 2);
    }

    #[test]
    fn active_edit_without_seat_change_is_noop() {
        assert_eq!(transition_delta(Some((Confirmed, 3)), Some((Confirmed, 3))), 0);
        assert_eq!(transition_delta(Some((Pending, 3)), Some((Confirmed, 3))), 0);
    }

    #[test]
    fn active_edit_applies_seat_difference() {
        assert_eq!(transition_delta(Some((Confirmed, 3)), Some((Confirmed, 5))), 2);
        assert_eq!(transition_delta(Some((Confirmed, 5)), Some((Confirmed, 2))), -3);
    }

    #[test]
    fn cancelling_releases_all_held_seats() {
        assert_eq!(transition_delta(Some((Confirmed, 4)), Some((Cancelled, 4))), -4);
        assert_eq!(transition_delta(Some((Pending, 2)), Some((Cancelled, 2))), -2);
    }

    #[test]
    fn cancelled_edits_stay_neutral() {
        assert_eq!(transition_delta(Some((Cancelled, 4)), Some((Cancelled, 4))), 0);
        assert_eq!(transition_delta(Some((Cancelled, 4)), Some((Cancelled, 7))), 0);
    }

    #[test]
    fn reinstatement_commits_the_new_seat_count() {
        // Cancelled with 3 seats, reinstated and resized to 5 in one update:
        // net -5 against availability, not -2.
        assert_eq!(transition_delta(Some((Cancelled, 3)), Some((Confirmed, 5))), 5);
    }

    #[test]
    fn delete_releases_unless_already_cancelled() {
        assert_eq!(transition_delta(Some((Confirmed, 4)), None), -4);
        assert_eq!(transition_delta(Some((Cancelled, 4)), None), 0);
    }
}
