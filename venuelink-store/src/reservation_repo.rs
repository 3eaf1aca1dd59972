use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;
use venuelink_domain::repository::ReservationRepository;
use venuelink_domain::reservation::{ContentType, Reservation, ReservationStatus};

pub struct PostgresReservationRepository {
    pub pool: PgPool,
}

/// Raw reservation row; enum columns come back as text and content
/// types as JSONB, both decoded at the boundary.
#[derive(sqlx::FromRow)]
struct ReservationRow {
    id: Uuid,
    venue_id: Uuid,
    requester_id: Uuid,
    requester_name: String,
    reserved_date: String,
    reserved_time: String,
    guests: String,
    content_types: serde_json::Value,
    timeframe: String,
    special_request: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = Box<dyn std::error::Error + Send + Sync>;

    fn try_from(row: ReservationRow) -> Result<Self, Self::Error> {
        let raw_types: Vec<String> = serde_json::from_value(row.content_types)?;
        let mut content_types = Vec::with_capacity(raw_types.len());
        for raw in raw_types {
            content_types.push(ContentType::from_str(&raw)?);
        }

        Ok(Reservation {
            id: row.id,
            venue_id: row.venue_id,
            requester_id: row.requester_id,
            requester_name: row.requester_name,
            date: row.reserved_date,
            time: row.reserved_time,
            guests: row.guests.parse()?,
            content_types,
            timeframe: row.timeframe.parse()?,
            special_request: row.special_request,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl ReservationRepository for PostgresReservationRepository {
    async fn insert(
        &self,
        reservation: &Reservation,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let content_types: Vec<String> = reservation
            .content_types
            .iter()
            .map(|ct| ct.to_string())
            .collect();

        sqlx::query(
            r#"
            INSERT INTO reservations
                (id, venue_id, requester_id, requester_name, reserved_date, reserved_time,
                 guests, content_types, timeframe, special_request, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(reservation.id)
        .bind(reservation.venue_id)
        .bind(reservation.requester_id)
        .bind(&reservation.requester_name)
        .bind(&reservation.date)
        .bind(&reservation.time)
        .bind(reservation.guests.to_string())
        .bind(serde_json::to_value(&content_types)?)
        .bind(reservation.timeframe.to_string())
        .bind(reservation.special_request.as_deref())
        .bind(reservation.status.to_string())
        .bind(reservation.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_for_requester(
        &self,
        requester_id: Uuid,
    ) -> Result<Vec<Reservation>, Box<dyn std::error::Error + Send + Sync>> {
        let rows: Vec<ReservationRow> = sqlx::query_as(
            r#"
            SELECT id, venue_id, requester_id, requester_name, reserved_date, reserved_time,
                   guests, content_types, timeframe, special_request, status, created_at
            FROM reservations
            WHERE requester_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(requester_id)
        .fetch_all(&self.pool)
        .await?;

        // Malformed rows are logged and skipped rather than failing the
        // whole listing.
        let mut reservations = Vec::with_capacity(rows.len());
        for row in rows {
            let id = row.id;
            match Reservation::try_from(row) {
                Ok(reservation) => reservations.push(reservation),
                Err(e) => tracing::warn!("Skipping malformed reservation row {}: {}", id, e),
            }
        }

        Ok(reservations)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ReservationStatus,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let result = sqlx::query(
            r#"
            UPDATE reservations
            SET status = $2
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(
        &self,
        id: Uuid,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
