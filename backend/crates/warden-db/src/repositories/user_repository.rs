use crate::Result as DbErrorResult;

use warden_core::UserIdentity;

use sqlx::Row;

/// Minimal user access. Accounts are owned by the surrounding application;
/// this exists to seed fixtures and to resolve roles.
pub struct UserRepository;

impl UserRepository {
    pub async fn create<'e, E>(executor: E, user: &UserIdentity, email: &str) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query("INSERT INTO users (id, email, role) VALUES (?, ?, ?)")
            .bind(&user.user_id)
            .bind(email)
            .bind(&user.role)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: &str) -> DbErrorResult<Option<UserIdentity>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query("SELECT id, role FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(UserIdentity {
            user_id: row.try_get("id")?,
            role: row.try_get("role")?,
        }))
    }
}
