//! The game facade: one handle bundling the connection pool with the
//! reward configuration.
//!
//! Bot handlers and the mini-app API talk to this type instead of
//! constructing stores themselves. Write paths propagate errors so the
//! caller can surface a failure to the player; display-only read paths
//! (leaderboard, roster, count) log the failure and return an empty
//! result, keeping a broken rendering widget from taking the bot down.

use chrono::Utc;
use tapcoin_db::{
    DbError, PostgresConfig, PostgresPool, RankingStore, ReferralStore, StatsStore, TaskStore,
    UserStore,
};
use tapcoin_types::{
    DailyStat, GameDelta, LeaderboardEntry, ReferralEdge, RosterEntry, TaskType, User, UserId,
    UserProfile, UserTask,
};

use crate::config::{GameConfig, RewardsConfig};
use crate::progression;

/// Errors surfaced by the game facade.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The data layer failed.
    #[error(transparent)]
    Db(#[from] DbError),
}

/// Handle to the whole game backend.
///
/// Owns the connection pool and the reward amounts; everything else is
/// borrowed per call. Cheap to clone, so one instance can be shared
/// across handler tasks.
#[derive(Clone)]
pub struct Game {
    pool: PostgresPool,
    rewards: RewardsConfig,
}

impl Game {
    /// Build a facade from an already connected pool.
    pub const fn new(pool: PostgresPool, rewards: RewardsConfig) -> Self {
        Self { pool, rewards }
    }

    /// Connect to the database described by `config`, run migrations,
    /// and return a ready facade.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the connection or a migration fails.
    pub async fn connect(config: &GameConfig) -> Result<Self, GameError> {
        let db = &config.database;
        let pg = PostgresConfig::new(&db.url)
            .with_max_connections(db.max_connections)
            .with_connect_timeout(std::time::Duration::from_secs(db.connect_timeout_secs))
            .with_idle_timeout(std::time::Duration::from_secs(db.idle_timeout_secs));

        let pool = PostgresPool::connect(&pg).await?;
        pool.run_migrations().await?;

        Ok(Self::new(pool, config.rewards.clone()))
    }

    /// The underlying connection pool.
    pub const fn pool(&self) -> &PostgresPool {
        &self.pool
    }

    /// Close all database connections gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    // -------------------------------------------------------------------
    // Player lifecycle
    // -------------------------------------------------------------------

    /// Register a player on first contact, or refresh their profile.
    ///
    /// If the profile carries a valid referrer attribution and the player
    /// is new, the referrer is paid the configured referral reward in the
    /// same transaction.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the write fails.
    pub async fn upsert_user(&self, user_id: UserId, profile: &UserProfile) -> Result<(), GameError> {
        UserStore::new(self.pool.pool())
            .upsert_user(user_id, profile, self.rewards.referral)
            .await?;
        Ok(())
    }

    /// Fetch a player. A missing row is `Ok(None)`, never an error.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the query fails.
    pub async fn get_user(&self, user_id: UserId) -> Result<Option<User>, GameError> {
        Ok(UserStore::new(self.pool.pool()).get_user(user_id).await?)
    }

    /// Apply a sparse game-state update to one player.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] wrapping [`DbError::UserNotFound`] if no
    /// row exists for `user_id`.
    pub async fn apply_delta(&self, user_id: UserId, delta: GameDelta) -> Result<(), GameError> {
        UserStore::new(self.pool.pool())
            .apply_delta(user_id, delta)
            .await?;
        Ok(())
    }

    /// Recompute a player's level from their stored balance and persist
    /// it when it changed. Returns the level now stored.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] wrapping [`DbError::UserNotFound`] if no
    /// row exists for `user_id`.
    pub async fn sync_level(&self, user_id: UserId) -> Result<i32, GameError> {
        let store = UserStore::new(self.pool.pool());
        let user = store
            .get_user(user_id)
            .await?
            .ok_or(DbError::UserNotFound(user_id))?;

        let level = progression::level_for_balance(user.balance);
        if level != user.level {
            store
                .apply_delta(user_id, GameDelta::new().with_level(level))
                .await?;
            tracing::info!(%user_id, from = user.level, to = level, "Player leveled");
        }
        Ok(level)
    }

    // -------------------------------------------------------------------
    // Referrals
    // -------------------------------------------------------------------

    /// Record a referral edge and pay the configured reward.
    ///
    /// Returns `true` if the edge was newly recorded, `false` if the
    /// referred player already has a referrer (nothing is paid again).
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] wrapping [`DbError::SelfReferral`] or
    /// [`DbError::ReferrerNotFound`] on an invalid attribution.
    pub async fn record_referral(
        &self,
        referrer_id: UserId,
        referred_id: UserId,
    ) -> Result<bool, GameError> {
        Ok(ReferralStore::new(self.pool.pool())
            .record_referral(referrer_id, referred_id, self.rewards.referral)
            .await?)
    }

    /// Fetch the referral edge for a referred player, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the query fails.
    pub async fn get_referral(&self, referred_id: UserId) -> Result<Option<ReferralEdge>, GameError> {
        Ok(ReferralStore::new(self.pool.pool())
            .get_referral(referred_id)
            .await?)
    }

    // -------------------------------------------------------------------
    // Tasks and daily activity
    // -------------------------------------------------------------------

    /// Complete a one-time task and credit its configured reward.
    ///
    /// Returns `true` if the task was newly completed, `false` if the
    /// player had already completed it.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the write fails.
    pub async fn complete_task(&self, user_id: UserId, task: TaskType) -> Result<bool, GameError> {
        let reward = self.rewards.task_reward(task);
        Ok(TaskStore::new(self.pool.pool())
            .complete_task(user_id, task, reward)
            .await?)
    }

    /// List the tasks a player has completed, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the query fails.
    pub async fn completed_tasks(&self, user_id: UserId) -> Result<Vec<UserTask>, GameError> {
        Ok(TaskStore::new(self.pool.pool())
            .completed_tasks(user_id)
            .await?)
    }

    /// Add taps and coins to a player's counters for today (UTC).
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the write fails.
    pub async fn record_activity(
        &self,
        user_id: UserId,
        taps: i64,
        coins: i64,
    ) -> Result<(), GameError> {
        StatsStore::new(self.pool.pool())
            .add_activity(user_id, Utc::now().date_naive(), taps, coins)
            .await?;
        Ok(())
    }

    /// Fetch a player's counters for today (UTC), if any.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the query fails.
    pub async fn today_stats(&self, user_id: UserId) -> Result<Option<DailyStat>, GameError> {
        Ok(StatsStore::new(self.pool.pool())
            .get_day(user_id, Utc::now().date_naive())
            .await?)
    }

    // -------------------------------------------------------------------
    // Display reads (lenient)
    // -------------------------------------------------------------------

    /// The top players by balance. On a store failure this logs the error
    /// and returns an empty list, so a display widget degrades instead of
    /// failing the handler.
    pub async fn leaderboard(&self, limit: u32) -> Vec<LeaderboardEntry> {
        RankingStore::new(self.pool.pool())
            .leaderboard(limit)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Leaderboard query failed, returning empty");
                Vec::new()
            })
    }

    /// Every player, newest first. Empty on store failure, with a warning.
    pub async fn all_users(&self) -> Vec<RosterEntry> {
        RankingStore::new(self.pool.pool())
            .all_users()
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Roster query failed, returning empty");
                Vec::new()
            })
    }

    /// Total number of players. Zero on store failure, with a warning.
    pub async fn user_count(&self) -> i64 {
        RankingStore::new(self.pool.pool())
            .count_users()
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Count query failed, returning zero");
                0
            })
    }
}
