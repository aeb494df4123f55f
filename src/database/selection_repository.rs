//! Display selection repository
//!
//! Single row per session in `user_display_selection`, written with an
//! atomic `ON CONFLICT` upsert rather than read-then-write.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::StoreError;
use crate::session::SelectionStore;
use crate::summary::DisplaySelection;

pub struct SelectionRepository {
    pool: PgPool,
}

impl SelectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SelectionRow {
    session_id: String,
    selected_tenant_ids: Vec<String>,
    current_view: String,
    last_updated: DateTime<Utc>,
}

impl From<SelectionRow> for DisplaySelection {
    fn from(r: SelectionRow) -> Self {
        Self {
            session_id: r.session_id,
            selected_tenant_ids: r.selected_tenant_ids,
            current_view: r.current_view,
            last_updated: r.last_updated,
        }
    }
}

#[async_trait]
impl SelectionStore for SelectionRepository {
    async fn set_selection(
        &self,
        session_id: &str,
        tenant_ids: &[String],
        view: &str,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO user_display_selection
                (session_id, selected_tenant_ids, current_view, last_updated)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (session_id) DO UPDATE
            SET selected_tenant_ids = EXCLUDED.selected_tenant_ids,
                current_view = EXCLUDED.current_view,
                last_updated = now()
            "#,
        )
        .bind(session_id)
        .bind(tenant_ids.to_vec())
        .bind(view)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_selection(
        &self,
        session_id: &str,
    ) -> Result<Option<DisplaySelection>, StoreError> {
        let row = sqlx::query_as::<_, SelectionRow>(
            r#"
            SELECT session_id, selected_tenant_ids, current_view, last_updated
            FROM user_display_selection
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(DisplaySelection::from))
    }
}
