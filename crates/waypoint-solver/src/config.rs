// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Solver Configuration
//!
//! Strategy selection and time budgets for a run. Two timers exist: the
//! main wall-clock budget for the search itself, and a short, independent
//! sub-budget for the greedy seeding pass that precedes branch-and-bound.
//! When no explicit seeding budget is set it defaults to one tenth of the
//! main budget.

use std::time::Duration;

/// Fraction of the main time budget granted to incumbent seeding when no
/// explicit seeding budget is configured.
const DEFAULT_SEED_BUDGET_DIVISOR: u32 = 10;

/// Which search strategy a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Nearest-neighbor construction from every start city.
    Greedy,
    /// Uniform random tour sampling.
    Random,
    /// Exhaustive depth-first enumeration without bounding.
    DepthFirst,
    /// Branch-and-bound with a LIFO frontier.
    BnbDepthFirst,
    /// Branch-and-bound with a depth-adjusted best-first frontier.
    #[default]
    BnbBestFirst,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Strategy::Greedy => "greedy",
            Strategy::Random => "random",
            Strategy::DepthFirst => "dfs",
            Strategy::BnbDepthFirst => "bnb-depth-first",
            Strategy::BnbBestFirst => "bnb-best-first",
        };
        write!(f, "{}", name)
    }
}

/// Configuration for a single solver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    strategy: Strategy,
    time_limit: Option<Duration>,
    seed_time_limit: Option<Duration>,
    seed_incumbent: bool,
    rng_seed: Option<u64>,
    log_progress: bool,
}

impl SolverConfig {
    /// Creates a configuration with the default strategy, no time limit,
    /// greedy seeding enabled, and progress logging off.
    pub fn new() -> Self {
        Self {
            strategy: Strategy::default(),
            time_limit: None,
            seed_time_limit: None,
            seed_incumbent: true,
            rng_seed: None,
            log_progress: false,
        }
    }

    #[inline]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[inline]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Overrides the seeding sub-budget. Without an override, seeding gets
    /// one tenth of the main budget (or runs unbudgeted when the main
    /// budget is unlimited; the greedy pass is finite work either way).
    #[inline]
    pub fn with_seed_time_limit(mut self, seed_time_limit: Duration) -> Self {
        self.seed_time_limit = Some(seed_time_limit);
        self
    }

    /// Enables or disables the greedy incumbent-seeding pass that precedes
    /// branch-and-bound. On by default.
    #[inline]
    pub fn with_seed_incumbent(mut self, seed_incumbent: bool) -> Self {
        self.seed_incumbent = seed_incumbent;
        self
    }

    /// Fixes the random-sampling seed for reproducible runs.
    #[inline]
    pub fn with_rng_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = Some(rng_seed);
        self
    }

    /// Enables the progress-logging monitor.
    #[inline]
    pub fn with_log_progress(mut self, log_progress: bool) -> Self {
        self.log_progress = log_progress;
        self
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    #[inline]
    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    #[inline]
    pub fn seed_incumbent(&self) -> bool {
        self.seed_incumbent
    }

    #[inline]
    pub fn log_progress(&self) -> bool {
        self.log_progress
    }

    /// Returns the effective seeding sub-budget: the explicit override if
    /// set, otherwise a tenth of the main budget, otherwise none.
    pub fn effective_seed_time_limit(&self) -> Option<Duration> {
        self.seed_time_limit
            .or_else(|| self.time_limit.map(|t| t / DEFAULT_SEED_BUDGET_DIVISOR))
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let config = SolverConfig::new();
        assert_eq!(config.strategy(), Strategy::BnbBestFirst);
        assert_eq!(config.time_limit(), None);
        assert_eq!(config.effective_seed_time_limit(), None);
        assert!(config.seed_incumbent());
        assert!(!config.log_progress());
    }

    #[test]
    fn test_seed_budget_defaults_to_tenth_of_main_budget() {
        let config = SolverConfig::new().with_time_limit(Duration::from_secs(10));
        assert_eq!(
            config.effective_seed_time_limit(),
            Some(Duration::from_secs(1))
        );
    }

    #[test]
    fn test_explicit_seed_budget_wins() {
        let config = SolverConfig::new()
            .with_time_limit(Duration::from_secs(10))
            .with_seed_time_limit(Duration::from_millis(50));
        assert_eq!(
            config.effective_seed_time_limit(),
            Some(Duration::from_millis(50))
        );
    }

    #[test]
    fn test_strategy_display_names() {
        assert_eq!(format!("{}", Strategy::Greedy), "greedy");
        assert_eq!(format!("{}", Strategy::BnbBestFirst), "bnb-best-first");
    }
}
