use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;
use venuelink_domain::repository::FavoriteRepository;

pub struct PostgresFavoriteRepository {
    pub pool: PgPool,
}

#[async_trait]
impl FavoriteRepository for PostgresFavoriteRepository {
    async fn toggle(
        &self,
        user_id: Uuid,
        venue_id: Uuid,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let removed = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND venue_id = $2")
            .bind(user_id)
            .bind(venue_id)
            .execute(&self.pool)
            .await?;

        if removed.rows_affected() > 0 {
            return Ok(false);
        }

        sqlx::query("INSERT INTO favorites (user_id, venue_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(venue_id)
            .execute(&self.pool)
            .await?;

        Ok(true)
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Uuid>, Box<dyn std::error::Error + Send + Sync>> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT venue_id FROM favorites WHERE user_id = $1 ORDER BY added_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
