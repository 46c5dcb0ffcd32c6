//! One-time task completions.
//!
//! The `(user_id, task_type)` primary key makes each task completable at
//! most once per player; the reward is credited only when the insert
//! actually creates the completion row, the same gate the referral
//! ledger uses.

use sqlx::PgPool;
use tapcoin_types::{TaskType, UserId, UserTask};

use crate::error::DbError;

/// Operations on the `user_tasks` table.
pub struct TaskStore<'a> {
    pool: &'a PgPool,
}

impl<'a> TaskStore<'a> {
    /// Create a new task store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Mark a task completed and credit its one-time reward.
    ///
    /// Returns `true` if the task was newly completed and the reward
    /// paid, `false` if the player had already completed it (no-op,
    /// nothing is paid again).
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] on store failure, including an
    /// unknown `user_id` (foreign-key violation).
    pub async fn complete_task(
        &self,
        user_id: UserId,
        task_type: TaskType,
        reward: i64,
    ) -> Result<bool, DbError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r"INSERT INTO user_tasks (user_id, task_type, reward)
              VALUES ($1, $2, $3)
              ON CONFLICT (user_id, task_type) DO NOTHING",
        )
        .bind(user_id.into_inner())
        .bind(task_type_to_db(task_type))
        .bind(reward)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query(
            r"UPDATE users
              SET balance = balance + $2,
                  last_active = NOW()
              WHERE user_id = $1",
        )
        .bind(user_id.into_inner())
        .bind(reward)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(%user_id, ?task_type, reward, "Completed task");
        Ok(true)
    }

    /// List the tasks a player has completed, oldest first.
    ///
    /// Rows with a task type this build does not know are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn completed_tasks(&self, user_id: UserId) -> Result<Vec<UserTask>, DbError> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r"SELECT user_id, task_type, reward, completed_at
              FROM user_tasks
              WHERE user_id = $1
              ORDER BY completed_at",
        )
        .bind(user_id.into_inner())
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let task_type = task_type_from_db(&row.task_type)?;
                Some(UserTask {
                    user_id: UserId::new(row.user_id),
                    task_type,
                    reward: row.reward,
                    completed_at: row.completed_at,
                })
            })
            .collect())
    }
}

/// A row from the `user_tasks` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TaskRow {
    /// The player.
    pub user_id: i64,
    /// Task type as its stable database string.
    pub task_type: String,
    /// The reward paid on completion.
    pub reward: i64,
    /// When the task was completed.
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

/// Convert a [`TaskType`] to its stable database string.
pub const fn task_type_to_db(task_type: TaskType) -> &'static str {
    match task_type {
        TaskType::JoinChannel => "join_channel",
        TaskType::InviteFriend => "invite_friend",
        TaskType::DailyBonus => "daily_bonus",
        TaskType::ConnectWallet => "connect_wallet",
    }
}

/// Parse a database string back into a [`TaskType`].
pub fn task_type_from_db(s: &str) -> Option<TaskType> {
    match s {
        "join_channel" => Some(TaskType::JoinChannel),
        "invite_friend" => Some(TaskType::InviteFriend),
        "daily_bonus" => Some(TaskType::DailyBonus),
        "connect_wallet" => Some(TaskType::ConnectWallet),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_type_db_strings_roundtrip() {
        for task in TaskType::ALL {
            assert_eq!(task_type_from_db(task_type_to_db(task)), Some(task));
        }
    }

    #[test]
    fn unknown_task_type_is_none() {
        assert_eq!(task_type_from_db("moonwalk"), None);
    }
}
