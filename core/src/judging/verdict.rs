use std::time::Duration;

use strum::Display;

/// Per-test outcome. The set is closed: everything that consumes a verdict
/// matches on it exhaustively, so widening it is a compile error everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Verdict {
    Correct,
    WrongAnswer,
    TimeExceeded,
    OutputMissing,
}

impl Verdict {
    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

/// Resolved outcome of a single test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestReport {
    /// 1-based position in pairing order.
    pub ord: usize,
    pub verdict: Verdict,
    /// Wall-clock time of the run; the full time limit for `TimeExceeded`.
    pub execution_time: Duration,
}
