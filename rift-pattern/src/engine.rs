//! The pattern engine
//!
//! An ordered catalogue of pairs behind one internal lock. Matching
//! scans every pair: the lowest priority number wins, and equal
//! priorities resolve to the earlier registration.

use std::sync::Mutex;
use std::time::Instant;
use serde::{Deserialize, Serialize};
use rift_core::GovernMode;
use crate::error::PatternResult;
use crate::pair::PatternPair;
use crate::template;

/// Counters kept across the engine's lifetime
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineMetrics {
    pub total_matches: u64,
    pub total_failures: u64,
    /// Running mean of per-call wall time, in seconds
    pub avg_match_secs: f64,
}

impl EngineMetrics {
    fn record(&mut self, matched: bool, elapsed_secs: f64) {
        if matched {
            self.total_matches += 1;
        } else {
            self.total_failures += 1;
        }
        let n = (self.total_matches + self.total_failures) as f64;
        self.avg_match_secs += (elapsed_secs - self.avg_match_secs) / n;
    }
}

/// Result of a successful match
#[derive(Clone, Debug, PartialEq)]
pub struct MatchOutcome {
    /// Expanded right template, owned by the caller
    pub output: String,
    /// Priority of the winning pair
    pub priority: u32,
    /// Registration index of the winning pair
    pub pair_index: usize,
}

struct EngineInner {
    pairs: Vec<PatternPair>,
    mode: GovernMode,
    metrics: EngineMetrics,
}

/// Priority-ordered pattern catalogue
///
/// Rule addition and matching serialize on one internal lock; the O(N)
/// regex work per match dominates the lock overhead.
pub struct PatternEngine {
    inner: Mutex<EngineInner>,
}

impl PatternEngine {
    pub fn new(mode: GovernMode) -> Self {
        Self {
            inner: Mutex::new(EngineInner {
                pairs: Vec::new(),
                mode,
                metrics: EngineMetrics::default(),
            }),
        }
    }

    /// Register one rule; fails only on a left-regex compile error and
    /// leaves the catalogue unchanged in that case
    pub fn register(
        &self,
        left: &str,
        right: &str,
        priority: u32,
        anchored: bool,
    ) -> PatternResult<()> {
        let pair = PatternPair::new(left, right, priority, anchored)?;
        self.inner.lock().expect("engine lock poisoned").pairs.push(pair);
        Ok(())
    }

    /// Match one input line against the catalogue
    ///
    /// Scans every pair; a pair is a candidate when its left regex
    /// matches and its priority is no worse than the best so far. The
    /// winning right template is expanded with the left captures.
    pub fn apply(&self, input: &str) -> Option<MatchOutcome> {
        let started = Instant::now();
        let mut inner = self.inner.lock().expect("engine lock poisoned");

        let mut winner: Option<(usize, u32)> = None;
        for (index, pair) in inner.pairs.iter().enumerate() {
            if !pair.left().is_match(input) {
                continue;
            }
            match winner {
                Some((_, best)) if pair.priority() >= best => {}
                _ => winner = Some((index, pair.priority())),
            }
        }

        let outcome = winner.map(|(index, priority)| {
            let pair = &inner.pairs[index];
            let caps = pair
                .left()
                .captures(input)
                .expect("matched pair must capture");
            MatchOutcome {
                output: template::expand(pair.right().template(), &caps),
                priority,
                pair_index: index,
            }
        });

        let elapsed = started.elapsed().as_secs_f64();
        inner.metrics.record(outcome.is_some(), elapsed);
        outcome
    }

    pub fn mode(&self) -> GovernMode {
        self.inner.lock().expect("engine lock poisoned").mode
    }

    pub fn set_mode(&self, mode: GovernMode) {
        self.inner.lock().expect("engine lock poisoned").mode = mode;
    }

    pub fn metrics(&self) -> EngineMetrics {
        self.inner.lock().expect("engine lock poisoned").metrics
    }

    pub fn pair_count(&self) -> usize {
        self.inner.lock().expect("engine lock poisoned").pairs.len()
    }
}

impl Default for PatternEngine {
    fn default() -> Self {
        Self::new(GovernMode::Classical)
    }
}
