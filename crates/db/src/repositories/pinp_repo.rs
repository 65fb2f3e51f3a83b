//! Repository for the `pinp` table.

use sqlx::PgPool;

use crate::models::pinp::PinpCaption;

pub struct PinpRepo;

impl PinpRepo {
    /// Distinct captions of one archive photograph, in image-URL order.
    pub async fn captions(
        pool: &PgPool,
        archive_id: &str,
    ) -> Result<Vec<PinpCaption>, sqlx::Error> {
        sqlx::query_as::<_, PinpCaption>(
            "SELECT archive_id, img_alt FROM pinp
             WHERE archive_id = $1
             GROUP BY archive_id, img_alt
             ORDER BY MIN(img_url)",
        )
        .bind(archive_id)
        .fetch_all(pool)
        .await
    }
}
