use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Achievement {
    HotStreak,
    PointMaster,
}

impl Achievement {
    pub fn title(self) -> &'static str {
        match self {
            Achievement::HotStreak => "Hot Streak!",
            Achievement::PointMaster => "Point Master!",
        }
    }

    pub fn blurb(self) -> &'static str {
        match self {
            Achievement::HotStreak => "5 correct in a row",
            Achievement::PointMaster => "1000 points",
        }
    }
}

/// Evaluate the unlock rules against the session totals. Each rule fires at
/// most once per session: Hot Streak the instant the streak is exactly 5,
/// Point Master the first time the score crosses 1000.
pub fn newly_unlocked(
    streak: u32,
    score: u32,
    unlocked: &HashSet<Achievement>,
) -> Vec<Achievement> {
    let mut earned = Vec::new();
    if streak == 5 && !unlocked.contains(&Achievement::HotStreak) {
        earned.push(Achievement::HotStreak);
    }
    if score >= 1000 && !unlocked.contains(&Achievement::PointMaster) {
        earned.push(Achievement::PointMaster);
    }
    earned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hot_streak_only_at_exactly_five() {
        let none = HashSet::new();
        assert!(newly_unlocked(4, 0, &none).is_empty());
        assert_eq!(newly_unlocked(5, 0, &none), vec![Achievement::HotStreak]);
        assert!(newly_unlocked(6, 0, &none).is_empty());
    }

    #[test]
    fn rules_do_not_refire_once_unlocked() {
        let mut unlocked = HashSet::new();
        unlocked.insert(Achievement::HotStreak);
        unlocked.insert(Achievement::PointMaster);
        assert!(newly_unlocked(5, 5000, &unlocked).is_empty());
    }

    #[test]
    fn both_rules_can_fire_from_one_guess() {
        let none = HashSet::new();
        let earned = newly_unlocked(5, 1050, &none);
        assert_eq!(
            earned,
            vec![Achievement::HotStreak, Achievement::PointMaster]
        );
    }
}
