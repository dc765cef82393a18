/// The three ways to play. Each mode carries fixed attributes; the
/// per-guess scoring and failure rules live in the session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Classic,
    SpeedRun,
    Memory,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Classic, Mode::SpeedRun, Mode::Memory];

    pub fn name(self) -> &'static str {
        match self {
            Mode::Classic => "Classic",
            Mode::SpeedRun => "Speed Run",
            Mode::Memory => "Memory",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Mode::Classic => "One wrong guess ends it. Correct guesses refill the clock.",
            Mode::SpeedRun => "Mistakes cost points and time, but the run goes on.",
            Mode::Memory => "The target hides after a moment. Guess from memory.",
        }
    }

    /// Starting countdown, in seconds.
    pub fn time_limit(self) -> u32 {
        match self {
            Mode::Classic => 30,
            Mode::SpeedRun => 60,
            Mode::Memory => 45,
        }
    }

    /// How many swatches each round offers.
    pub fn option_count(self) -> usize {
        match self {
            Mode::Classic => 6,
            Mode::SpeedRun => 4,
            Mode::Memory => 6,
        }
    }
}
