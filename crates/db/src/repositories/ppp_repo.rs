//! Repository for the `ppp` table.

use chrono::NaiveDate;
use palp_core::forms::{PppField, PppWorkspaceUpdate};
use sqlx::{PgConnection, PgPool};

use crate::models::ppp::{PppDescription, PppEntry, PppRecord};
use crate::repositories::PppArcRepo;

const RECORD_COLUMNS: &str = "uuid, id AS ppp_id, location, material, description, \
     condition_ppp, style, bibliography, photo_negative";

pub struct PppRepo;

impl PppRepo {
    /// Entries at a location. `room` of `None` lists the whole property.
    pub async fn list_at_location(
        pool: &PgPool,
        region: &str,
        insula: &str,
        doorway: &str,
        room: Option<&str>,
    ) -> Result<Vec<PppEntry>, sqlx::Error> {
        sqlx::query_as::<_, PppEntry>(
            "SELECT uuid, description, id AS ppp_id, location, material, room
             FROM ppp
             WHERE region = $1 AND insula = $2 AND doorway = $3
               AND ($4::text IS NULL OR room = $4)
             ORDER BY uuid",
        )
        .bind(region)
        .bind(insula)
        .bind(doorway)
        .bind(room)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_uuid(pool: &PgPool, uuid: &str) -> Result<Vec<PppRecord>, sqlx::Error> {
        let query = format!("SELECT {RECORD_COLUMNS} FROM ppp WHERE uuid = $1");
        sqlx::query_as::<_, PppRecord>(&query)
            .bind(uuid)
            .fetch_all(pool)
            .await
    }

    /// Entries carrying a given PPP catalogue id (not unique).
    pub async fn find_by_ppp_id(
        pool: &PgPool,
        ppp_id: &str,
    ) -> Result<Vec<PppRecord>, sqlx::Error> {
        let query = format!("SELECT {RECORD_COLUMNS} FROM ppp WHERE id = $1 ORDER BY uuid");
        sqlx::query_as::<_, PppRecord>(&query)
            .bind(ppp_id)
            .fetch_all(pool)
            .await
    }

    /// Descriptions of the listed entries, ordered by uuid.
    pub async fn descriptions_for(
        pool: &PgPool,
        uuids: &[String],
    ) -> Result<Vec<PppDescription>, sqlx::Error> {
        if uuids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, PppDescription>(
            "SELECT uuid, description, reviewed FROM ppp WHERE uuid = ANY($1) ORDER BY uuid",
        )
        .bind(uuids)
        .fetch_all(pool)
        .await
    }

    /// Create the entry if missing, then set each field. Runs in one
    /// transaction.
    pub async fn apply_fields(
        pool: &PgPool,
        uuid: &str,
        fields: &[(PppField, String)],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        Self::write_fields(&mut tx, uuid, fields).await?;
        tx.commit().await
    }

    /// Apply workspace-page edits (fields and ARC links) for several
    /// entries in one transaction.
    pub async fn apply_workspace_updates(
        pool: &PgPool,
        updates: &[PppWorkspaceUpdate],
        date: NaiveDate,
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for update in updates {
            Self::write_fields(&mut tx, &update.uuid, &update.fields).await?;
            if let Some(arcs) = &update.arcs {
                PppArcRepo::link(&mut *tx, &update.uuid, arcs, date).await?;
            }
        }
        tx.commit().await
    }

    async fn write_fields(
        conn: &mut PgConnection,
        uuid: &str,
        fields: &[(PppField, String)],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO ppp (uuid) VALUES ($1) ON CONFLICT (uuid) DO NOTHING")
            .bind(uuid)
            .execute(&mut *conn)
            .await?;

        for (field, value) in fields {
            // Column names come from the closed `PppField` set.
            let query = format!("UPDATE ppp SET {} = $2 WHERE uuid = $1", field.column());
            sqlx::query(&query)
                .bind(uuid)
                .bind(value)
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }
}
