use crate::domain::{models::reservation::Reservation, ports::ReservationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

pub struct PostgresReservationRepo {
    pool: PgPool,
}

impl PostgresReservationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Guarded atomic counter adjustment; see the SQLite twin for the invariant.
async fn apply_seat_delta(
    tx: &mut Transaction<'_, Postgres>,
    session_id: &str,
    delta: i32,
) -> Result<(), AppError> {
    if delta == 0 {
        return Ok(());
    }

    let result = sqlx::query(
        r#"UPDATE sessions SET available_seats = available_seats - $1
           WHERE id = $2 AND available_seats - $1 >= 0 AND available_seats - $1 <= total_seats"#
    )
        .bind(delta)
        .bind(session_id)
        .execute(&mut **tx)
        .await
        .map_err(AppError::Database)?;

    if result.rows_affected() == 0 {
        // The guard also matches nothing when the session row is gone.
        let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE id = $1")
            .bind(session_id)
            .fetch_one(&mut **tx)
            .await
            .map_err(AppError::Database)?;
        if exists == 0 {
            return Err(AppError::NotFound("Session not found".into()));
        }
        if delta > 0 {
            return Err(AppError::Conflict("Not enough seats available".into()));
        }
        return Err(AppError::Conflict("Seat release exceeds session capacity".into()));
    }
    Ok(())
}

#[async_trait]
impl ReservationRepository for PostgresReservationRepo {
    async fn create_holding_seats(&self, reservation: &Reservation) -> Result<Reservation, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let created = sqlx::query_as::<_, Reservation>(
            r#"INSERT INTO reservations (id, user_id, event_id, session_id, number_of_seats, status, contact_name, phone_number, allergy_notes, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
               RETURNING *"#
        )
            .bind(&reservation.id)
            .bind(&reservation.user_id)
            .bind(&reservation.event_id)
            .bind(&reservation.session_id)
            .bind(reservation.number_of_seats)
            .bind(&reservation.status)
            .bind(&reservation.contact_name)
            .bind(&reservation.phone_number)
            .bind(&reservation.allergy_notes)
            .bind(reservation.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        apply_seat_delta(&mut tx, &created.session_id, created.number_of_seats).await?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn update_adjusting_seats(&self, reservation: &Reservation, seat_delta: i32) -> Result<Reservation, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let updated = sqlx::query_as::<_, Reservation>(
            r#"UPDATE reservations SET number_of_seats=$1, status=$2, contact_name=$3, phone_number=$4, allergy_notes=$5
               WHERE id=$6 RETURNING *"#
        )
            .bind(reservation.number_of_seats)
            .bind(&reservation.status)
            .bind(&reservation.contact_name)
            .bind(&reservation.phone_number)
            .bind(&reservation.allergy_notes)
            .bind(&reservation.id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        apply_seat_delta(&mut tx, &updated.session_id, seat_delta).await?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }

    async fn delete_releasing_seats(&self, id: &str, session_id: &str, seats_to_release: i32) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Reservation not found".into()));
        }

        apply_seat_delta(&mut tx, session_id, -seats_to_release).await?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_active_for_user_event(&self, user_id: &str, event_id: &str) -> Result<Option<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE user_id = $1 AND event_id = $2 AND status != 'cancelled' LIMIT 1"
        )
            .bind(user_id)
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE event_id = $1 ORDER BY created_at ASC")
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_all(&self) -> Result<Vec<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn exists_for_session(&self, session_id: &str) -> Result<bool, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reservations WHERE session_id = $1")
            .bind(session_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(count > 0)
    }
}
