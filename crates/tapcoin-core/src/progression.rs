//! Level progression rules.
//!
//! Levels are a pure function of lifetime balance against a fixed ladder
//! of thresholds. The store never derives a level on its own; callers
//! compute one here and write it back through a game-state update when
//! they want the stored level to match the balance.

/// Balance thresholds for each level, ascending.
///
/// A player is at level `n` when their balance has reached
/// `THRESHOLDS[n - 1]` but not `THRESHOLDS[n]`. A balance below the
/// first threshold (including negative balances) is level 1.
pub const THRESHOLDS: [i64; 8] = [
    0, 10_000, 20_000, 50_000, 100_000, 200_000, 300_000, 500_000,
];

/// The level a balance corresponds to, from 1 to [`THRESHOLDS`]`::len()`.
pub fn level_for_balance(balance: i64) -> i32 {
    let reached = THRESHOLDS
        .iter()
        .take_while(|threshold| balance >= **threshold)
        .count();
    // At least level 1, even below the first threshold.
    i32::try_from(reached.max(1)).unwrap_or(i32::MAX)
}

/// The balance required to reach the next level, or `None` at the top.
pub fn next_level_at(balance: i64) -> Option<i64> {
    THRESHOLDS
        .iter()
        .find(|threshold| balance < **threshold)
        .copied()
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn ladder_boundaries() {
        assert_eq!(level_for_balance(0), 1);
        assert_eq!(level_for_balance(9_999), 1);
        assert_eq!(level_for_balance(10_000), 2);
        assert_eq!(level_for_balance(19_999), 2);
        assert_eq!(level_for_balance(20_000), 3);
        assert_eq!(level_for_balance(50_000), 4);
        assert_eq!(level_for_balance(100_000), 5);
        assert_eq!(level_for_balance(200_000), 6);
        assert_eq!(level_for_balance(300_000), 7);
        assert_eq!(level_for_balance(500_000), 8);
        assert_eq!(level_for_balance(i64::MAX), 8);
    }

    #[test]
    fn negative_balance_is_level_one() {
        assert_eq!(level_for_balance(-1), 1);
        assert_eq!(level_for_balance(i64::MIN), 1);
    }

    #[test]
    fn next_threshold() {
        assert_eq!(next_level_at(0), Some(10_000));
        assert_eq!(next_level_at(9_999), Some(10_000));
        assert_eq!(next_level_at(10_000), Some(20_000));
        assert_eq!(next_level_at(499_999), Some(500_000));
        assert_eq!(next_level_at(500_000), None);
    }

    #[test]
    fn ladder_is_strictly_ascending() {
        assert!(THRESHOLDS.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
