//! Repository for the `pinp_preq` and `ppm_preq` classification tables.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::like_contains;
use crate::models::preq::{ImageSource, PreqRow};

pub struct PreqRepo;

impl PreqRepo {
    /// Images classified against `arc`, either as their primary ARC or
    /// mentioned in `other_arc`.
    pub async fn rows_for_arc(
        pool: &PgPool,
        source: ImageSource,
        arc: &str,
    ) -> Result<Vec<PreqRow>, sqlx::Error> {
        let query = match source {
            ImageSource::Pinp => {
                "SELECT archive_id AS image_id, is_art, is_plaster, notes FROM pinp_preq
                 WHERE arc = $1 OR other_arc LIKE $2
                 ORDER BY archive_id"
            }
            ImageSource::Ppm => {
                "SELECT id AS image_id, is_art, is_plaster, notes FROM ppm_preq
                 WHERE arc = $1 OR other_arc LIKE $2
                 ORDER BY id"
            }
        };
        sqlx::query_as::<_, PreqRow>(query)
            .bind(arc)
            .bind(like_contains(arc))
            .fetch_all(pool)
            .await
    }

    /// Record `image_id` as a hero image.
    pub async fn mark_hero(
        pool: &PgPool,
        source: ImageSource,
        image_id: &str,
        date: NaiveDate,
    ) -> Result<(), sqlx::Error> {
        let query = match source {
            ImageSource::Pinp => {
                "INSERT INTO pinp_preq (archive_id, hero_image, date_added) VALUES ($1, '1', $2)
                 ON CONFLICT (archive_id) DO UPDATE
                 SET hero_image = '1', date_added = EXCLUDED.date_added"
            }
            ImageSource::Ppm => {
                "INSERT INTO ppm_preq (id, hero_image, date_added) VALUES ($1, '1', $2)
                 ON CONFLICT (id) DO UPDATE
                 SET hero_image = '1', date_added = EXCLUDED.date_added"
            }
        };
        sqlx::query(query)
            .bind(image_id)
            .bind(date)
            .execute(pool)
            .await?;
        tracing::debug!(?source, image_id, "Marked hero image");
        Ok(())
    }
}
