//! Postgres-backed record store.
//!
//! The full canonical record lives in a JSONB column; `company_number`,
//! `delta_at`, `kind` and `ceased_on` are copied into columns for lookup,
//! staleness checks and register-view filtering. All SQL is runtime-checked.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::error;

use crate::error::PscError;
use crate::models::{DeltaAt, PscDocument};
use crate::ports::{RecordStore, Result};

pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// SQLSTATE classes 22 (data exception) and 23 (integrity constraint
/// violation) mean the write itself was rejected.
fn is_rejected_input(sqlstate: Option<&str>) -> bool {
    sqlstate.is_some_and(|code| code.starts_with("22") || code.starts_with("23"))
}

/// Rejected input is the caller's fault; anything else means the database is
/// unreachable or misbehaving.
fn map_sqlx_error(e: sqlx::Error) -> PscError {
    let sqlstate = e.as_database_error().and_then(|db| db.code());
    if is_rejected_input(sqlstate.as_deref()) {
        return PscError::BadRequest(format!("rejected by database: {e}"));
    }
    error!(error = %e, "record store query failed");
    PscError::ServiceUnavailable(format!("record store unavailable: {e}"))
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<PscDocument>> {
        let row = sqlx::query_scalar::<_, Json<PscDocument>>(
            r#"SELECT document FROM psc_records WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(row.map(|Json(doc)| doc))
    }

    async fn find_by_company_and_id(
        &self,
        company_number: &str,
        id: &str,
    ) -> Result<Option<PscDocument>> {
        let row = sqlx::query_scalar::<_, Json<PscDocument>>(
            r#"SELECT document FROM psc_records WHERE company_number = $1 AND id = $2"#,
        )
        .bind(company_number)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(row.map(|Json(doc)| doc))
    }

    async fn find_newer_or_equal(&self, id: &str, delta_at: &DeltaAt) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS (SELECT 1 FROM psc_records WHERE id = $1 AND delta_at >= $2)"#,
        )
        .bind(id)
        .bind(delta_at.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn save(&self, document: &PscDocument) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO psc_records (id, company_number, delta_at, kind, ceased_on, document)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE
               SET company_number = EXCLUDED.company_number,
                   delta_at       = EXCLUDED.delta_at,
                   kind           = EXCLUDED.kind,
                   ceased_on      = EXCLUDED.ceased_on,
                   document       = EXCLUDED.document
            "#,
        )
        .bind(&document.id)
        .bind(&document.company_number)
        .bind(document.delta_at.as_str())
        .bind(&document.kind)
        .bind(document.ceased_on())
        .bind(Json(document))
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn delete(&self, document: &PscDocument) -> Result<()> {
        sqlx::query(r#"DELETE FROM psc_records WHERE id = $1"#)
            .bind(&document.id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn list_page(
        &self,
        company_number: &str,
        start_index: u32,
        page_size: u32,
    ) -> Result<Vec<PscDocument>> {
        let rows = sqlx::query_scalar::<_, Json<PscDocument>>(
            r#"
            SELECT document FROM psc_records
            WHERE company_number = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(company_number)
        .bind(i64::from(page_size))
        .bind(i64::from(start_index))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(|Json(doc)| doc).collect())
    }

    async fn list_page_since(
        &self,
        company_number: &str,
        start_index: u32,
        page_size: u32,
        cutoff: NaiveDate,
    ) -> Result<Vec<PscDocument>> {
        let rows = sqlx::query_scalar::<_, Json<PscDocument>>(
            r#"
            SELECT document FROM psc_records
            WHERE company_number = $1
              AND (ceased_on IS NULL OR ceased_on > $4)
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(company_number)
        .bind(i64::from(page_size))
        .bind(i64::from(start_index))
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(|Json(doc)| doc).collect())
    }
}
