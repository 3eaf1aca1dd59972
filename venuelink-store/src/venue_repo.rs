use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;
use venuelink_domain::repository::VenueRepository;
use venuelink_domain::schedule::WeeklySchedule;
use venuelink_domain::venue::Venue;

pub struct PostgresVenueRepository {
    pub pool: PgPool,
}

/// Raw venue row. Opening hours live in a JSONB array of loosely-typed
/// per-day rows; parsing happens at this boundary so malformed days are
/// logged and degraded to closed instead of leaking upward.
#[derive(sqlx::FromRow)]
struct VenueRow {
    id: Uuid,
    name: String,
    venue_type: String,
    category: String,
    location: String,
    offer: String,
    photos: Vec<String>,
    push_token: Option<String>,
    opening_hours: serde_json::Value,
}

impl From<VenueRow> for Venue {
    fn from(row: VenueRow) -> Self {
        let schedule = match row.opening_hours.as_array() {
            Some(rows) => WeeklySchedule::from_rows(rows),
            None => {
                tracing::warn!("Venue {} has non-array opening hours; treating as closed", row.id);
                WeeklySchedule::closed()
            }
        };

        Venue {
            id: row.id,
            name: row.name,
            venue_type: row.venue_type,
            category: row.category,
            location: row.location,
            offer: row.offer,
            photos: row.photos,
            push_token: row.push_token,
            schedule,
        }
    }
}

const VENUE_COLUMNS: &str =
    "id, name, venue_type, category, location, offer, photos, push_token, opening_hours";

#[async_trait]
impl VenueRepository for PostgresVenueRepository {
    async fn list(&self) -> Result<Vec<Venue>, Box<dyn std::error::Error + Send + Sync>> {
        let rows: Vec<VenueRow> = sqlx::query_as(&format!(
            "SELECT {} FROM venues ORDER BY name",
            VENUE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Venue::from).collect())
    }

    async fn get(
        &self,
        id: Uuid,
    ) -> Result<Option<Venue>, Box<dyn std::error::Error + Send + Sync>> {
        let row: Option<VenueRow> = sqlx::query_as(&format!(
            "SELECT {} FROM venues WHERE id = $1",
            VENUE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Venue::from))
    }

    async fn push_token(
        &self,
        id: Uuid,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
        let token: Option<(Option<String>,)> =
            sqlx::query_as("SELECT push_token FROM venues WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(token.and_then(|(t,)| t))
    }
}
