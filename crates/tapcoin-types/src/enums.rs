//! Enumeration types for the Tapcoin game core.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One-time task a player can complete for a reward.
///
/// Each variant maps to a stable string in the `user_tasks` table; the
/// `(user_id, task_type)` primary key makes every task completable at
/// most once per player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum TaskType {
    /// Joined the announcement channel.
    JoinChannel,
    /// Invited a first friend through a referral link.
    InviteFriend,
    /// Claimed the daily login bonus.
    DailyBonus,
    /// Connected an external wallet.
    ConnectWallet,
}

impl TaskType {
    /// All task variants, for iteration in callers and tests.
    pub const ALL: [Self; 4] = [
        Self::JoinChannel,
        Self::InviteFriend,
        Self::DailyBonus,
        Self::ConnectWallet,
    ];
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&TaskType::JoinChannel).unwrap();
        assert_eq!(json, "\"join_channel\"");
        let back: TaskType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TaskType::JoinChannel);
    }

    #[test]
    fn all_lists_every_variant_once() {
        let mut seen = std::collections::BTreeSet::new();
        for task in TaskType::ALL {
            assert!(seen.insert(format!("{task:?}")));
        }
        assert_eq!(seen.len(), 4);
    }
}
