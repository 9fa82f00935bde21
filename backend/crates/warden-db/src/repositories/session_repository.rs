use crate::{DbError, Result as DbErrorResult};
use crate::repositories::timestamp_from_epoch;

use warden_core::{Session, SessionStatus, SessionWithUser, UserIdentity};

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

const SESSION_COLUMNS: &str =
    "s.id, s.user_id, s.status, s.fingerprint, s.user_agent, s.expires_at, s.created_at";

pub struct SessionRepository;

impl SessionRepository {
    pub async fn create<'e, E>(executor: E, session: &Session) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
              INSERT INTO sessions (
                  id, user_id, status, fingerprint, user_agent, expires_at, created_at
              ) VALUES (?, ?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(&session.id)
        .bind(&session.user_id)
        .bind(session.status.as_str())
        .bind(&session.fingerprint)
        .bind(&session.user_agent)
        .bind(session.expires_at.timestamp())
        .bind(session.created_at.timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: &str) -> DbErrorResult<Option<Session>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let sql = format!("SELECT {SESSION_COLUMNS} FROM sessions s WHERE s.id = ?");
        let row = sqlx::query(&sql).bind(id).fetch_optional(executor).await?;

        row.as_ref().map(session_from_row).transpose()
    }

    /// Session joined with its owner's role. A session whose user row is gone
    /// resolves to None.
    pub async fn find_with_user<'e, E>(
        executor: E,
        id: &str,
    ) -> DbErrorResult<Option<SessionWithUser>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let sql = format!(
            "SELECT {SESSION_COLUMNS}, u.role AS user_role \
             FROM sessions s INNER JOIN users u ON u.id = s.user_id \
             WHERE s.id = ?"
        );
        let row = sqlx::query(&sql).bind(id).fetch_optional(executor).await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let session = session_from_row(&row)?;
        let user = UserIdentity {
            user_id: session.user_id.clone(),
            role: row.try_get("user_role")?,
        };

        Ok(Some(SessionWithUser { session, user }))
    }

    pub async fn find_by_user<'e, E>(executor: E, user_id: &str) -> DbErrorResult<Vec<Session>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let sql = format!(
            "SELECT {SESSION_COLUMNS} FROM sessions s WHERE s.user_id = ? ORDER BY s.created_at DESC"
        );
        let rows = sqlx::query(&sql).bind(user_id).fetch_all(executor).await?;

        rows.iter().map(session_from_row).collect()
    }

    /// ACTIVE sessions with `expires_at <= now`, oldest expiry first.
    pub async fn find_active_past_expiry<'e, E>(
        executor: E,
        now: DateTime<Utc>,
        limit: u32,
    ) -> DbErrorResult<Vec<Session>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let sql = format!(
            "SELECT {SESSION_COLUMNS} FROM sessions s \
             WHERE s.status = ? AND s.expires_at <= ? \
             ORDER BY s.expires_at ASC \
             LIMIT ?"
        );
        let rows = sqlx::query(&sql)
            .bind(SessionStatus::Active.as_str())
            .bind(now.timestamp())
            .bind(i64::from(limit))
            .fetch_all(executor)
            .await?;

        rows.iter().map(session_from_row).collect()
    }

    /// Which of `ids` are still ACTIVE
    pub async fn find_active_ids<'e, E>(executor: E, ids: &[String]) -> DbErrorResult<Vec<String>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("SELECT id FROM sessions WHERE status = ? AND id IN ({placeholders})");

        let mut query = sqlx::query(&sql).bind(SessionStatus::Active.as_str());
        for id in ids {
            query = query.bind(id);
        }

        let rows = query.fetch_all(executor).await?;
        rows.iter()
            .map(|row| row.try_get::<String, _>("id").map_err(DbError::from))
            .collect()
    }

    /// Flip ACTIVE sessions to EXPIRED. Already-expired or unknown ids are ignored.
    pub async fn mark_expired<'e, E>(executor: E, ids: &[String]) -> DbErrorResult<u64>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        if ids.is_empty() {
            return Ok(0);
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "UPDATE sessions SET status = ? WHERE status = ? AND id IN ({placeholders})"
        );

        let mut query = sqlx::query(&sql)
            .bind(SessionStatus::Expired.as_str())
            .bind(SessionStatus::Active.as_str());
        for id in ids {
            query = query.bind(id);
        }

        let result = query.execute(executor).await?;

        Ok(result.rows_affected())
    }

    /// Set the user-agent only if none is bound yet
    pub async fn bind_user_agent<'e, E>(
        executor: E,
        id: &str,
        user_agent: &str,
    ) -> DbErrorResult<bool>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let result =
            sqlx::query("UPDATE sessions SET user_agent = ? WHERE id = ? AND user_agent IS NULL")
                .bind(user_agent)
                .bind(id)
                .execute(executor)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn session_from_row(row: &SqliteRow) -> DbErrorResult<Session> {
    let status: String = row.try_get("status")?;

    Ok(Session {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        status: SessionStatus::from_str(&status)?,
        fingerprint: row.try_get("fingerprint")?,
        user_agent: row.try_get("user_agent")?,
        expires_at: timestamp_from_epoch(row.try_get("expires_at")?)?,
        created_at: timestamp_from_epoch(row.try_get("created_at")?)?,
    })
}
