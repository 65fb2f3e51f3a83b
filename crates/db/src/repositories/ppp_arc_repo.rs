//! Repository for the `ppp_desc` table (PPP entry -> linked ARCs).

use chrono::NaiveDate;
use sqlx::{PgExecutor, PgPool};

use crate::like_contains;
use crate::models::ppp::PppArcLink;

pub struct PppArcRepo;

impl PppArcRepo {
    /// The ARC text linked to one entry, if any.
    pub async fn arcs_for(pool: &PgPool, uuid: &str) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT arcs FROM ppp_desc WHERE uuid = $1")
            .bind(uuid)
            .fetch_optional(pool)
            .await
    }

    /// Links for several entries at once.
    pub async fn links_for(
        pool: &PgPool,
        uuids: &[String],
    ) -> Result<Vec<PppArcLink>, sqlx::Error> {
        sqlx::query_as::<_, PppArcLink>(
            "SELECT uuid, arcs, date_added FROM ppp_desc WHERE uuid = ANY($1)",
        )
        .bind(uuids)
        .fetch_all(pool)
        .await
    }

    /// Entries whose ARC text mentions `arc` anywhere.
    ///
    /// The column is free text, so `ARC1` also matches entries linked to
    /// `ARC10`.
    pub async fn uuids_for_arc(pool: &PgPool, arc: &str) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT uuid FROM ppp_desc WHERE arcs LIKE $1 ORDER BY uuid",
        )
        .bind(like_contains(arc))
        .fetch_all(pool)
        .await
    }

    /// Insert or replace the ARC text of one entry.
    pub async fn link<'e, E: PgExecutor<'e>>(
        executor: E,
        uuid: &str,
        arcs: &str,
        date: NaiveDate,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO ppp_desc (uuid, arcs, date_added) VALUES ($1, $2, $3)
             ON CONFLICT (uuid) DO UPDATE
             SET arcs = EXCLUDED.arcs, date_added = EXCLUDED.date_added",
        )
        .bind(uuid)
        .bind(arcs)
        .bind(date)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Link every listed entry to `arc`, replacing previous links, in one
    /// transaction.
    pub async fn link_all(
        pool: &PgPool,
        uuids: &[String],
        arc: &str,
        date: NaiveDate,
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for uuid in uuids {
            Self::link(&mut *tx, uuid, arc, date).await?;
        }
        tx.commit().await
    }
}
