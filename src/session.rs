use std::collections::{HashMap, HashSet};

use rand::Rng;
use tracing::info;

use crate::achievements::{self, Achievement};
use crate::colors::Hsl;
use crate::modes::Mode;
use crate::round::{self, Round};

/// Best score per mode, for the lifetime of the process. Values only ever
/// go up, and only a finished game commits one.
#[derive(Debug, Default)]
pub struct HighScores(HashMap<Mode, u32>);

impl HighScores {
    pub fn new() -> Self {
        HighScores::default()
    }

    pub fn get(&self, mode: Mode) -> u32 {
        self.0.get(&mode).copied().unwrap_or(0)
    }

    fn record(&mut self, mode: Mode, score: u32) {
        let best = self.0.entry(mode).or_insert(0);
        if score > *best {
            *best = score;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct { points: u32 },
    Wrong { ended: bool },
    Ignored,
}

/// One playthrough of one mode. Pure state: no clocks and no I/O in here.
/// The frame loop feeds in `tick` once per second and supplies the rng, so
/// tests can drive a whole game deterministically.
#[derive(Debug)]
pub struct Session {
    pub mode: Mode,
    pub round: Round,
    /// Bumped on every new round; lets the frame loop drop deferred work
    /// that was scheduled against an earlier round.
    pub round_id: u32,
    pub score: u32,
    pub streak: u32,
    pub best_streak: u32,
    pub time_left: u32,
    pub is_playing: bool,
    pub is_game_over: bool,
    /// Memory mode hides the target shortly after each round starts. This
    /// is display-only: guessing stays valid while hidden.
    pub target_visible: bool,
    pub unlocked: HashSet<Achievement>,
    /// The most recent unlock, for the toast. A later unlock replaces an
    /// earlier one.
    pub notice: Option<Achievement>,
}

impl Session {
    pub fn start<R: Rng>(mode: Mode, rng: &mut R) -> Self {
        info!(mode = mode.name(), "session started");
        Session {
            mode,
            round: round::generate(mode, rng),
            round_id: 0,
            score: 0,
            streak: 0,
            best_streak: 0,
            time_left: mode.time_limit(),
            is_playing: true,
            is_game_over: false,
            target_visible: true,
            unlocked: HashSet::new(),
            notice: None,
        }
    }

    /// One second of countdown. Hitting zero ends the game.
    pub fn tick(&mut self, scores: &mut HighScores) {
        if !self.is_playing {
            return;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.end(scores);
        }
    }

    pub fn guess<R: Rng>(
        &mut self,
        pick: Hsl,
        rng: &mut R,
        scores: &mut HighScores,
    ) -> GuessOutcome {
        if !self.is_playing || self.is_game_over {
            return GuessOutcome::Ignored;
        }

        if pick == self.round.target {
            // points scale with remaining time, except in Speed Run
            let points = match self.mode {
                Mode::SpeedRun => 100,
                Mode::Classic | Mode::Memory => 100 + (self.time_left + 1) / 2,
            };
            self.score += points;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);

            for earned in achievements::newly_unlocked(self.streak, self.score, &self.unlocked) {
                info!(achievement = earned.title(), "achievement unlocked");
                self.unlocked.insert(earned);
                self.notice = Some(earned);
            }

            // Classic refills the clock on every correct guess
            if self.mode == Mode::Classic {
                self.time_left = self.mode.time_limit();
            }
            self.next_round(rng);
            GuessOutcome::Correct { points }
        } else {
            self.streak = 0;
            match self.mode {
                Mode::SpeedRun => {
                    self.score = self.score.saturating_sub(50);
                    self.time_left = self.time_left.saturating_sub(5);
                    if self.time_left == 0 {
                        // the penalty burned the rest of the clock
                        self.end(scores);
                        GuessOutcome::Wrong { ended: true }
                    } else {
                        self.next_round(rng);
                        GuessOutcome::Wrong { ended: false }
                    }
                }
                Mode::Classic | Mode::Memory => {
                    self.end(scores);
                    GuessOutcome::Wrong { ended: true }
                }
            }
        }
    }

    fn next_round<R: Rng>(&mut self, rng: &mut R) {
        self.round = round::generate(self.mode, rng);
        self.round_id += 1;
        self.target_visible = true;
    }

    fn end(&mut self, scores: &mut HighScores) {
        self.is_playing = false;
        self.is_game_over = true;
        scores.record(self.mode, self.score);
        info!(
            mode = self.mode.name(),
            score = self.score,
            best_streak = self.best_streak,
            "game over"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(1234)
    }

    // a color that can never equal the round's target
    fn wrong_pick(round: &Round) -> Hsl {
        let t = round.target;
        Hsl {
            hue: (t.hue + 180) % 360,
            ..t
        }
    }

    fn correct_guess(s: &mut Session, rng: &mut StdRng, scores: &mut HighScores) -> GuessOutcome {
        let target = s.round.target;
        s.guess(target, rng, scores)
    }

    #[test]
    fn classic_correct_guess_refills_the_clock_and_scores_by_formula() {
        let mut rng = rng();
        let mut scores = HighScores::new();
        let mut s = Session::start(Mode::Classic, &mut rng);
        s.time_left = 17;

        let outcome = correct_guess(&mut s, &mut rng, &mut scores);
        // 100 + ceil(17 / 2) = 109
        assert_eq!(outcome, GuessOutcome::Correct { points: 109 });
        assert_eq!(s.score, 109);
        assert_eq!(s.time_left, Mode::Classic.time_limit());
        assert!(s.is_playing);
    }

    #[test]
    fn speedrun_correct_guess_is_a_flat_hundred_and_keeps_the_clock() {
        let mut rng = rng();
        let mut scores = HighScores::new();
        let mut s = Session::start(Mode::SpeedRun, &mut rng);
        s.time_left = 33;

        let outcome = correct_guess(&mut s, &mut rng, &mut scores);
        assert_eq!(outcome, GuessOutcome::Correct { points: 100 });
        assert_eq!(s.time_left, 33);
    }

    #[test]
    fn correct_guess_starts_a_new_round_with_the_target_among_options() {
        let mut rng = rng();
        let mut scores = HighScores::new();
        let mut s = Session::start(Mode::Memory, &mut rng);
        let before = s.round_id;

        correct_guess(&mut s, &mut rng, &mut scores);
        assert_eq!(s.round_id, before + 1);
        assert!(s.round.options.contains(&s.round.target));
        assert!(s.target_visible);
    }

    #[test]
    fn wrong_guess_in_classic_ends_the_game_and_commits_the_high_score() {
        let mut rng = rng();
        let mut scores = HighScores::new();
        let mut s = Session::start(Mode::Classic, &mut rng);
        correct_guess(&mut s, &mut rng, &mut scores);
        let earned = s.score;

        let pick = wrong_pick(&s.round);
        let outcome = s.guess(pick, &mut rng, &mut scores);
        assert_eq!(outcome, GuessOutcome::Wrong { ended: true });
        assert!(!s.is_playing);
        assert!(s.is_game_over);
        assert_eq!(s.streak, 0);
        assert_eq!(scores.get(Mode::Classic), earned);
    }

    #[test]
    fn wrong_guess_in_memory_ends_the_game() {
        let mut rng = rng();
        let mut scores = HighScores::new();
        let mut s = Session::start(Mode::Memory, &mut rng);

        let pick = wrong_pick(&s.round);
        s.guess(pick, &mut rng, &mut scores);
        assert!(s.is_game_over);
        assert_eq!(scores.get(Mode::Memory), 0);
    }

    #[test]
    fn wrong_guess_in_speedrun_docks_score_and_time_but_plays_on() {
        let mut rng = rng();
        let mut scores = HighScores::new();
        let mut s = Session::start(Mode::SpeedRun, &mut rng);
        s.score = 120;
        s.time_left = 40;
        let round_before = s.round_id;

        let pick = wrong_pick(&s.round);
        let outcome = s.guess(pick, &mut rng, &mut scores);
        assert_eq!(outcome, GuessOutcome::Wrong { ended: false });
        assert_eq!(s.score, 70);
        assert_eq!(s.time_left, 35);
        assert!(s.is_playing);
        assert_eq!(s.round_id, round_before + 1);
    }

    #[test]
    fn speedrun_penalties_floor_at_zero_score() {
        let mut rng = rng();
        let mut scores = HighScores::new();
        let mut s = Session::start(Mode::SpeedRun, &mut rng);
        s.score = 30;

        let pick = wrong_pick(&s.round);
        s.guess(pick, &mut rng, &mut scores);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn speedrun_time_penalty_that_empties_the_clock_ends_the_game() {
        let mut rng = rng();
        let mut scores = HighScores::new();
        let mut s = Session::start(Mode::SpeedRun, &mut rng);
        s.time_left = 4;

        let pick = wrong_pick(&s.round);
        let outcome = s.guess(pick, &mut rng, &mut scores);
        assert_eq!(outcome, GuessOutcome::Wrong { ended: true });
        assert_eq!(s.time_left, 0);
        assert!(s.is_game_over);
    }

    #[test]
    fn guesses_after_game_over_are_ignored() {
        let mut rng = rng();
        let mut scores = HighScores::new();
        let mut s = Session::start(Mode::Classic, &mut rng);
        let pick = wrong_pick(&s.round);
        s.guess(pick, &mut rng, &mut scores);
        assert!(s.is_game_over);

        let target = s.round.target;
        assert_eq!(s.guess(target, &mut rng, &mut scores), GuessOutcome::Ignored);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn ticking_a_fresh_classic_session_to_zero_ends_it() {
        let mut rng = rng();
        let mut scores = HighScores::new();
        let mut s = Session::start(Mode::Classic, &mut rng);
        s.score = 250;

        for _ in 0..Mode::Classic.time_limit() {
            s.tick(&mut scores);
        }
        assert_eq!(s.time_left, 0);
        assert!(s.is_game_over);
        assert_eq!(scores.get(Mode::Classic), 250);

        // further ticks are no-ops
        s.tick(&mut scores);
        assert_eq!(s.time_left, 0);
    }

    #[test]
    fn hot_streak_fires_on_the_fifth_correct_guess_only() {
        let mut rng = rng();
        let mut scores = HighScores::new();
        let mut s = Session::start(Mode::SpeedRun, &mut rng);

        for i in 1..=4 {
            correct_guess(&mut s, &mut rng, &mut scores);
            assert_eq!(s.streak, i);
            assert_eq!(s.notice, None);
        }

        correct_guess(&mut s, &mut rng, &mut scores);
        assert_eq!(s.notice, Some(Achievement::HotStreak));
        assert!(s.unlocked.contains(&Achievement::HotStreak));

        s.notice = None;
        correct_guess(&mut s, &mut rng, &mut scores);
        assert_eq!(s.streak, 6);
        assert_eq!(s.notice, None);
    }

    #[test]
    fn point_master_fires_once_at_the_first_thousand() {
        let mut rng = rng();
        let mut scores = HighScores::new();
        let mut s = Session::start(Mode::SpeedRun, &mut rng);

        // nine flat hundreds, then the tenth crosses 1000
        for _ in 0..9 {
            correct_guess(&mut s, &mut rng, &mut scores);
        }
        assert_eq!(s.score, 900);
        s.notice = None;

        correct_guess(&mut s, &mut rng, &mut scores);
        assert_eq!(s.score, 1000);
        assert_eq!(s.notice, Some(Achievement::PointMaster));

        s.notice = None;
        correct_guess(&mut s, &mut rng, &mut scores);
        assert_eq!(s.notice, None);
    }

    #[test]
    fn a_later_unlock_replaces_the_shown_notice() {
        let mut rng = rng();
        let mut scores = HighScores::new();
        let mut s = Session::start(Mode::Classic, &mut rng);
        // arrange totals so the fifth correct guess also crosses 1000
        s.score = 890;
        s.streak = 4;

        correct_guess(&mut s, &mut rng, &mut scores);
        assert!(s.unlocked.contains(&Achievement::HotStreak));
        assert!(s.unlocked.contains(&Achievement::PointMaster));
        assert_eq!(s.notice, Some(Achievement::PointMaster));
    }

    #[test]
    fn best_streak_survives_a_reset() {
        let mut rng = rng();
        let mut scores = HighScores::new();
        let mut s = Session::start(Mode::SpeedRun, &mut rng);

        for _ in 0..3 {
            correct_guess(&mut s, &mut rng, &mut scores);
        }
        let pick = wrong_pick(&s.round);
        s.guess(pick, &mut rng, &mut scores);
        assert_eq!(s.streak, 0);
        assert_eq!(s.best_streak, 3);
    }

    #[test]
    fn high_scores_are_monotonic_across_sessions() {
        let mut scores = HighScores::new();
        scores.record(Mode::Classic, 500);
        scores.record(Mode::Classic, 300);
        assert_eq!(scores.get(Mode::Classic), 500);
        scores.record(Mode::Classic, 800);
        assert_eq!(scores.get(Mode::Classic), 800);
        assert_eq!(scores.get(Mode::Memory), 0);
    }
}
