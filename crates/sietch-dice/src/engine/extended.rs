//! Extended tests: several Dune tests pooled toward one success target.

use serde::{Deserialize, Serialize};

use super::dune::DuneTestResult;

/// An extended test in progress.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtendedTest {
    /// Successes needed to complete the test.
    pub target_successes: u32,
    /// Maximum number of tests allowed, if the task is under time pressure.
    pub time_limit: Option<u32>,
    results: Vec<DuneTestResult>,
}

/// A snapshot of an extended test's progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedProgress {
    /// Successes accumulated so far.
    pub total_successes: u32,
    /// Complications accumulated so far.
    pub complications: u32,
    /// Percentage of the target reached, capped at 100.
    pub progress: f64,
    /// Whether the target has been reached.
    pub complete: bool,
    /// Tests left before the time limit, if there is one.
    pub time_remaining: Option<u32>,
}

impl ExtendedTest {
    /// Start an extended test needing `target_successes`.
    pub fn new(target_successes: u32) -> Self {
        Self {
            target_successes,
            time_limit: None,
            results: Vec::new(),
        }
    }

    /// Limit the test to `tests` attempts.
    pub fn with_time_limit(mut self, tests: u32) -> Self {
        self.time_limit = Some(tests);
        self
    }

    /// Record another test toward the target.
    pub fn record(&mut self, result: DuneTestResult) {
        self.results.push(result);
    }

    /// The tests recorded so far.
    pub fn results(&self) -> &[DuneTestResult] {
        &self.results
    }

    /// Returns true if the time limit has been used up.
    pub fn is_out_of_time(&self) -> bool {
        self.time_limit
            .is_some_and(|limit| self.results.len() >= limit as usize)
    }

    /// Summarize progress toward the target.
    pub fn progress(&self) -> ExtendedProgress {
        let total_successes: u32 = self.results.iter().map(|r| r.successes).sum();
        let complications = self.results.iter().map(|r| r.complications).sum();
        let progress = if self.target_successes == 0 {
            100.0
        } else {
            (f64::from(total_successes) / f64::from(self.target_successes) * 100.0).min(100.0)
        };
        let used = u32::try_from(self.results.len()).unwrap_or(u32::MAX);

        ExtendedProgress {
            total_successes,
            complications,
            progress,
            complete: total_successes >= self.target_successes,
            time_remaining: self.time_limit.map(|limit| limit.saturating_sub(used)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::dune::TestOutcome;

    fn result(successes: u32, complications: u32) -> DuneTestResult {
        DuneTestResult {
            rolls: vec![10, 10],
            successes,
            critical_hits: 0,
            complications,
            outcome: TestOutcome::Success { margin: 0 },
            momentum: 0,
            threat: complications,
        }
    }

    #[test]
    fn empty_test() {
        let t = ExtendedTest::new(5);
        let p = t.progress();
        assert_eq!(p.total_successes, 0);
        assert!(p.progress.abs() < f64::EPSILON);
        assert!(!p.complete);
        assert_eq!(p.time_remaining, None);
    }

    #[test]
    fn accumulates_successes_and_complications() {
        let mut t = ExtendedTest::new(4);
        t.record(result(1, 0));
        t.record(result(2, 1));
        let p = t.progress();
        assert_eq!(p.total_successes, 3);
        assert_eq!(p.complications, 1);
        assert!((p.progress - 75.0).abs() < f64::EPSILON);
        assert!(!p.complete);
    }

    #[test]
    fn progress_capped_at_hundred() {
        let mut t = ExtendedTest::new(2);
        t.record(result(5, 0));
        let p = t.progress();
        assert!((p.progress - 100.0).abs() < f64::EPSILON);
        assert!(p.complete);
    }

    #[test]
    fn time_limit_counts_down() {
        let mut t = ExtendedTest::new(10).with_time_limit(2);
        assert_eq!(t.progress().time_remaining, Some(2));
        t.record(result(1, 0));
        assert_eq!(t.progress().time_remaining, Some(1));
        assert!(!t.is_out_of_time());
        t.record(result(1, 0));
        t.record(result(1, 0));
        assert_eq!(t.progress().time_remaining, Some(0));
        assert!(t.is_out_of_time());
        assert_eq!(t.results().len(), 3);
    }
}
