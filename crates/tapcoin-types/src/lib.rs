//! Shared type definitions for the Tapcoin game core.
//!
//! This crate is the single source of truth for the types used across the
//! Tapcoin workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for the mini-app front-end.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe wrapper for chat-platform player ids
//! - [`enums`] -- Enumeration types (one-time task kinds)
//! - [`structs`] -- Persisted entity structs and query views
//! - [`patch`] -- Sparse update payloads for the write operations

pub mod enums;
pub mod ids;
pub mod patch;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::TaskType;
pub use ids::UserId;
pub use patch::{GameDelta, UserProfile};
pub use structs::{DailyStat, LeaderboardEntry, ReferralEdge, RosterEntry, User, UserTask};

#[cfg(test)]
mod tests {
    //! Binding-generation test for the `TypeScript` exports.

    #[test]
    fn export_bindings() {
        // ts-rs writes the TypeScript files to the `bindings/` directory
        // relative to the crate root when the exports are touched here.
        use ts_rs::TS;

        let _ = crate::ids::UserId::export_all();
        let _ = crate::enums::TaskType::export_all();
        let _ = crate::structs::User::export_all();
        let _ = crate::structs::DailyStat::export_all();
        let _ = crate::structs::ReferralEdge::export_all();
        let _ = crate::structs::UserTask::export_all();
        let _ = crate::structs::LeaderboardEntry::export_all();
        let _ = crate::structs::RosterEntry::export_all();
        let _ = crate::patch::GameDelta::export_all();
        let _ = crate::patch::UserProfile::export_all();
    }
}
