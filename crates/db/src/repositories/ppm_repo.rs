//! Repository for the `ppm` table.

use palp_core::forms::PpmField;
use sqlx::PgPool;

use crate::models::ppm::{PpmCaption, PpmRecord, PpmSearchRow};

const RECORD_COLUMNS: &str = "id, photo_archive_id, description, translated_text, image_path, \
     region, insula, doorway, doorways, room, other_location, volume, page, caption";

pub struct PpmRepo;

impl PpmRepo {
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Vec<PpmRecord>, sqlx::Error> {
        let query = format!("SELECT {RECORD_COLUMNS} FROM ppm WHERE id = $1");
        sqlx::query_as::<_, PpmRecord>(&query)
            .bind(id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_location(
        pool: &PgPool,
        location: &str,
    ) -> Result<Vec<PpmRecord>, sqlx::Error> {
        let query = format!("SELECT {RECORD_COLUMNS} FROM ppm WHERE location = $1 ORDER BY id");
        sqlx::query_as::<_, PpmRecord>(&query)
            .bind(location)
            .fetch_all(pool)
            .await
    }

    /// Location search with `LIKE` patterns (`%` for "any"), ordered by
    /// image path.
    pub async fn search(
        pool: &PgPool,
        patterns: &[String; 4],
    ) -> Result<Vec<PpmSearchRow>, sqlx::Error> {
        let [region, insula, doorway, room] = patterns;
        sqlx::query_as::<_, PpmSearchRow>(
            "SELECT id, description, image_path FROM ppm
             WHERE region LIKE $1 AND insula LIKE $2 AND doorway LIKE $3 AND room LIKE $4
             ORDER BY image_path ASC",
        )
        .bind(region)
        .bind(insula)
        .bind(doorway)
        .bind(room)
        .fetch_all(pool)
        .await
    }

    /// Distinct translated captions for one image.
    pub async fn captions(pool: &PgPool, id: &str) -> Result<Vec<PpmCaption>, sqlx::Error> {
        sqlx::query_as::<_, PpmCaption>(
            "SELECT DISTINCT id, translated_text FROM ppm WHERE id = $1",
        )
        .bind(id)
        .fetch_all(pool)
        .await
    }

    /// Create the row if missing, then set each field, in one transaction.
    pub async fn apply_fields(
        pool: &PgPool,
        id: &str,
        fields: &[(PpmField, String)],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("INSERT INTO ppm (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for (field, value) in fields {
            let query = format!("UPDATE ppm SET {} = $2 WHERE id = $1", field.column());
            sqlx::query(&query)
                .bind(id)
                .bind(value)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await
    }
}
