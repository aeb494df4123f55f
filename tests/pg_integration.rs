//! Live-Postgres round trip for the repositories.
//!
//! Skipped unless TEST_DATABASE_URL (or DATABASE_URL) points at a reachable
//! database. Each run uses a fresh session id and cleans up after itself.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use conso_cache::database::{SelectionRepository, SummaryRepository};
use conso_cache::session::{SelectionStore, SessionDataStore};
use conso_cache::summary::CompanySummary;

const MIGRATION: &str = include_str!("../migrations/001_session_cache.sql");

async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()?;
    let pool = match PgPool::connect(&url).await {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("skipping pg integration test, connect failed: {err}");
            return None;
        }
    };

    for statement in MIGRATION.split(';') {
        let statement = statement.trim();
        if !statement.is_empty() {
            sqlx::query(statement).execute(&pool).await.ok();
        }
    }
    Some(pool)
}

fn summary(session_id: &str, tenant_id: &str, assets: i64, minutes: i64) -> CompanySummary {
    CompanySummary {
        session_id: session_id.to_string(),
        tenant_id: tenant_id.to_string(),
        tenant_name: format!("{tenant_id} Ltd"),
        total_assets: Decimal::from(assets),
        total_liabilities: Decimal::from(assets / 2),
        total_equity: Decimal::from(assets / 2),
        total_cash: Decimal::ZERO,
        total_revenue: Decimal::ZERO,
        total_expenses: Decimal::ZERO,
        net_profit: Decimal::ZERO,
        is_balanced: true,
        has_data: true,
        load_error: None,
        expires_at: Utc::now() + Duration::minutes(minutes),
    }
}

#[tokio::test]
async fn summary_rows_round_trip_with_expiry_filter() {
    let Some(pool) = test_pool().await else { return };
    let repo = SummaryRepository::new(pool.clone());
    let session = format!("test-{}", Uuid::new_v4());

    repo.insert_summary(&summary(&session, "alpha", 1000, 30))
        .await
        .unwrap();
    repo.insert_summary(&summary(&session, "beta", 2000, 30))
        .await
        .unwrap();
    // Already expired: visible to nothing but the delete.
    repo.insert_summary(&summary(&session, "gamma", 4000, -30))
        .await
        .unwrap();

    let selection = vec!["alpha".to_string(), "beta".to_string(), "gamma".to_string()];
    let live = repo.live_summaries(&session, &selection).await.unwrap();
    assert_eq!(live.len(), 2);
    assert!(live.iter().all(|r| r.tenant_id != "gamma"));
    assert_eq!(live[0].total_assets, Decimal::from(1000));

    let status = repo.live_status(&session).await.unwrap();
    assert_eq!(status.companies_count, 2);
    assert!(status.earliest_expiry.is_some());

    // The delete clears expired rows too.
    let removed = repo.delete_session(&session).await.unwrap();
    assert_eq!(removed, 3);

    let status = repo.live_status(&session).await.unwrap();
    assert_eq!(status.companies_count, 0);
    assert!(status.earliest_expiry.is_none());
}

#[tokio::test]
async fn selection_upsert_round_trips_and_overwrites() {
    let Some(pool) = test_pool().await else { return };
    let repo = SelectionRepository::new(pool.clone());
    let session = format!("test-{}", Uuid::new_v4());

    assert!(repo.get_selection(&session).await.unwrap().is_none());

    let first = vec!["alpha".to_string(), "beta".to_string()];
    repo.set_selection(&session, &first, "overview").await.unwrap();

    let stored = repo.get_selection(&session).await.unwrap().unwrap();
    assert_eq!(stored.selected_tenant_ids, first);
    assert_eq!(stored.current_view, "overview");

    let second = vec!["gamma".to_string()];
    repo.set_selection(&session, &second, "cash").await.unwrap();

    let stored = repo.get_selection(&session).await.unwrap().unwrap();
    assert_eq!(stored.selected_tenant_ids, second);
    assert_eq!(stored.current_view, "cash");

    sqlx::query("DELETE FROM user_display_selection WHERE session_id = $1")
        .bind(&session)
        .execute(&pool)
        .await
        .unwrap();
}
