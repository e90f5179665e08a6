//! # RIFT Pattern Engine
//!
//! The polar bipartite engine: every rule is a left (match) regex
//! paired with a right (emit) template. Matching is priority-ordered
//! with registration order breaking ties, and the winning template is
//! expanded with the left side's captures.
//!
//! ## Responsibilities
//! - Compile and hold the ordered rule catalogue
//! - Pick the lowest-priority matching pair per input line
//! - Expand `$N` / `{name}` capture references in the right template
//! - Track match/failure counters and mean match time
//!
//! ## Usage
//!
//! ```
//! use rift_pattern::PatternEngine;
//!
//! let engine = PatternEngine::default();
//! engine.register(r"^(?P<n>\w+) := (.+)$", "let {n} = $2;", 10, false).unwrap();
//!
//! let outcome = engine.apply("x := 41 + 1").unwrap();
//! assert_eq!(outcome.output, "let x = 41 + 1;");
//! ```

pub mod engine;
pub mod error;
pub mod pair;
pub mod template;

pub use engine::{EngineMetrics, MatchOutcome, PatternEngine};
pub use error::{PatternError, PatternResult};
pub use pair::{PatternPair, RightSide};
