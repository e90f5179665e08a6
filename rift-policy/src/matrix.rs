//! The 2x2 validation decision matrix
//!
//! Rows are input validity, columns output validity. The default matrix
//! denies everything except the (valid, valid) cell. Counters advance on
//! every call; only Allow and Deny count toward the validation ratio.

use std::time::Instant;
use serde::{Deserialize, Serialize};
use crate::error::{PolicyError, PolicyResult};

/// Default validation-ratio threshold
pub const DEFAULT_THRESHOLD: f64 = 0.85;

/// Default entropy threshold (advisory)
pub const DEFAULT_ENTROPY_THRESHOLD: f64 = 0.5;

/// Outcome of one policy check
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    Allow,
    Deny,
    Defer,
}

impl Decision {
    pub const fn name(self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::Deny => "deny",
            Decision::Defer => "defer",
        }
    }
}

/// Running counters kept by the matrix
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixCounters {
    pub passed: u64,
    pub failed: u64,
    pub deferred: u64,
    pub total: u64,
}

/// The policy gate
///
/// Counters are updated under the caller's synchronization; the matrix
/// carries no internal lock.
#[derive(Clone, Debug)]
pub struct ResultMatrix {
    matrix: [[Decision; 2]; 2],
    threshold: f64,
    entropy_threshold: f64,
    counters: MatrixCounters,
    avg_validation_secs: f64,
}

impl ResultMatrix {
    /// Default matrix: Deny everywhere except (valid, valid) = Allow
    pub fn new() -> Self {
        Self {
            matrix: [[Decision::Deny, Decision::Deny], [Decision::Deny, Decision::Allow]],
            threshold: DEFAULT_THRESHOLD,
            entropy_threshold: DEFAULT_ENTROPY_THRESHOLD,
            counters: MatrixCounters::default(),
            avg_validation_secs: 0.0,
        }
    }

    /// Override the ratio threshold; must lie in (0, 1]
    pub fn with_threshold(mut self, threshold: f64) -> PolicyResult<Self> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(PolicyError::InvalidThreshold(threshold));
        }
        self.threshold = threshold;
        Ok(self)
    }

    /// Override the advisory entropy threshold; must lie in [0, 1]
    pub fn with_entropy_threshold(mut self, threshold: f64) -> PolicyResult<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(PolicyError::InvalidEntropyThreshold(threshold));
        }
        self.entropy_threshold = threshold;
        Ok(self)
    }

    /// Replace one cell of the decision table
    pub fn set_decision(&mut self, input_valid: bool, output_valid: bool, decision: Decision) {
        self.matrix[input_valid as usize][output_valid as usize] = decision;
    }

    /// Read one cell without touching the counters
    pub fn decision(&self, input_valid: bool, output_valid: bool) -> Decision {
        self.matrix[input_valid as usize][output_valid as usize]
    }

    /// Run one policy check: read the cell, advance the counters, fold
    /// the call's wall time into the running mean
    pub fn validate(&mut self, input_valid: bool, output_valid: bool) -> Decision {
        let started = Instant::now();
        let decision = self.matrix[input_valid as usize][output_valid as usize];

        self.counters.total += 1;
        match decision {
            Decision::Allow => self.counters.passed += 1,
            Decision::Deny => self.counters.failed += 1,
            Decision::Defer => self.counters.deferred += 1,
        }

        let elapsed = started.elapsed().as_secs_f64();
        let n = self.counters.total as f64;
        self.avg_validation_secs += (elapsed - self.avg_validation_secs) / n;

        decision
    }

    /// passed / (passed + failed); deferred calls are not decided
    pub fn ratio(&self) -> f64 {
        let decided = self.counters.passed + self.counters.failed;
        if decided == 0 {
            return 0.0;
        }
        self.counters.passed as f64 / decided as f64
    }

    /// True when the validation ratio meets the configured threshold
    pub fn meets_threshold(&self) -> bool {
        self.ratio() >= self.threshold
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn entropy_threshold(&self) -> f64 {
        self.entropy_threshold
    }

    pub fn counters(&self) -> MatrixCounters {
        self.counters
    }

    /// Running mean of per-call wall time, in seconds
    pub fn avg_validation_secs(&self) -> f64 {
        self.avg_validation_secs
    }
}

impl Default for ResultMatrix {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_deny_except_both_valid() {
        let matrix = ResultMatrix::new();
        assert_eq!(matrix.decision(false, false), Decision::Deny);
        assert_eq!(matrix.decision(false, true), Decision::Deny);
        assert_eq!(matrix.decision(true, false), Decision::Deny);
        assert_eq!(matrix.decision(true, true), Decision::Allow);
        assert_eq!(matrix.threshold(), 0.85);
    }

    #[test]
    fn validate_advances_counters() {
        let mut matrix = ResultMatrix::new();
        assert_eq!(matrix.validate(true, true), Decision::Allow);
        assert_eq!(matrix.validate(false, true), Decision::Deny);

        let counters = matrix.counters();
        assert_eq!(counters.passed, 1);
        assert_eq!(counters.failed, 1);
        assert_eq!(counters.deferred, 0);
        assert_eq!(counters.total, 2);
    }

    #[test]
    fn deferred_is_excluded_from_ratio() {
        let mut matrix = ResultMatrix::new();
        matrix.set_decision(false, true, Decision::Defer);

        matrix.validate(true, true);
        matrix.validate(true, true);
        matrix.validate(false, true);
        assert_eq!(matrix.counters().deferred, 1);
        assert!((matrix.ratio() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn threshold_boundary_at_85_percent() {
        let mut matrix = ResultMatrix::new();
        for _ in 0..85 {
            matrix.validate(true, true);
        }
        for _ in 0..15 {
            matrix.validate(false, false);
        }
        assert!(matrix.meets_threshold());

        // One more failure tips the ratio below 0.85.
        matrix.validate(false, false);
        assert!(!matrix.meets_threshold());
    }

    #[test]
    fn one_flipped_call_drops_below_threshold() {
        let mut matrix = ResultMatrix::new();
        for _ in 0..84 {
            matrix.validate(true, true);
        }
        for _ in 0..16 {
            matrix.validate(false, false);
        }
        assert!((matrix.ratio() - 0.84).abs() < 1e-12);
        assert!(!matrix.meets_threshold());
    }

    #[test]
    fn empty_matrix_never_meets_threshold() {
        let matrix = ResultMatrix::new();
        assert_eq!(matrix.ratio(), 0.0);
        assert!(!matrix.meets_threshold());
    }

    #[test]
    fn threshold_must_be_in_half_open_unit_interval() {
        assert!(ResultMatrix::new().with_threshold(1.0).is_ok());
        assert!(ResultMatrix::new().with_threshold(0.0).is_err());
        assert!(ResultMatrix::new().with_threshold(1.5).is_err());
    }

    #[test]
    fn timing_mean_is_tracked() {
        let mut matrix = ResultMatrix::new();
        matrix.validate(true, true);
        assert!(matrix.avg_validation_secs() >= 0.0);
    }
}
