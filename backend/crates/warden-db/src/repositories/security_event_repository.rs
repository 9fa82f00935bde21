use crate::repositories::timestamp_from_epoch;
use crate::{DbError, Result as DbErrorResult};

use warden_core::{SecurityAction, SecurityEvent};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

pub struct SecurityEventRepository;

impl SecurityEventRepository {
    pub async fn create<'e, E>(executor: E, event: &SecurityEvent) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
              INSERT INTO security_events (
                  id, user_id, action, ip_address, user_agent, created_at
              ) VALUES (?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(event.id.to_string())
        .bind(&event.user_id)
        .bind(event.action.as_str())
        .bind(&event.ip_address)
        .bind(&event.user_agent)
        .bind(event.created_at.timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_user<'e, E>(
        executor: E,
        user_id: &str,
        limit: i64,
    ) -> DbErrorResult<Vec<SecurityEvent>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let rows = sqlx::query(
            r#"
              SELECT id, user_id, action, ip_address, user_agent, created_at
              FROM security_events
              WHERE user_id = ?
              ORDER BY created_at DESC
              LIMIT ?
              "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(executor)
        .await?;

        rows.iter().map(event_from_row).collect()
    }

    pub async fn find_by_action<'e, E>(
        executor: E,
        action: SecurityAction,
        limit: i64,
    ) -> DbErrorResult<Vec<SecurityEvent>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let rows = sqlx::query(
            r#"
              SELECT id, user_id, action, ip_address, user_agent, created_at
              FROM security_events
              WHERE action = ?
              ORDER BY created_at DESC
              LIMIT ?
              "#,
        )
        .bind(action.as_str())
        .bind(limit)
        .fetch_all(executor)
        .await?;

        rows.iter().map(event_from_row).collect()
    }
}

fn event_from_row(row: &SqliteRow) -> DbErrorResult<SecurityEvent> {
    let id: String = row.try_get("id")?;
    let action: String = row.try_get("action")?;

    Ok(SecurityEvent {
        id: Uuid::parse_str(&id).map_err(|e| DbError::InvalidRecord {
            message: format!("security event id {}: {}", id, e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        user_id: row.try_get("user_id")?,
        action: SecurityAction::from_str(&action)?,
        ip_address: row.try_get("ip_address")?,
        user_agent: row.try_get("user_agent")?,
        created_at: timestamp_from_epoch(row.try_get("created_at")?)?,
    })
}
