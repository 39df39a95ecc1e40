mod allocation;
mod combos;
mod config;
mod risk;

pub use allocation::Allocation;
pub use config::EngineConfig;

use super::domain::{Combo, Lender, RiskAssessment};

/// Failures local to the matching engine.
#[derive(Debug, thiserror::Error)]
pub enum MatchingError {
    /// Callers must never ask for a non-positive amount; reject loudly
    /// instead of returning a degenerate allocation.
    #[error("requested amount must be positive (got {requested})")]
    NonPositiveAmount { requested: f64 },
    /// The supplied lenders (possibly none) cannot cover the request.
    /// Partial fills are never surfaced.
    #[error("community pool cannot cover the requested amount")]
    InsufficientCapital,
}

/// Stateless matcher that applies the configured rounding and window
/// policy to a pre-ranked lender roster. Pure over its inputs: safe to
/// share across concurrent requests without coordination.
pub struct MatchingEngine {
    config: EngineConfig,
}

impl MatchingEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Score a request against the borrower's capacity ceiling.
    pub fn assess_risk(&self, requested_amount: f64, capacity_ceiling: f64) -> RiskAssessment {
        risk::assess(requested_amount, capacity_ceiling)
    }

    /// Split `requested_amount` across `lenders` in input order, covering
    /// it exactly or not at all. Lenders must arrive ranked (ascending
    /// rate, descending capital); the engine does not reorder them.
    pub fn allocate(
        &self,
        requested_amount: f64,
        lenders: &[Lender],
    ) -> Result<Allocation, MatchingError> {
        allocation::allocate(requested_amount, lenders, self.config.amount_precision)
    }

    /// Enumerate distinct fundable lender groupings over growing prefixes
    /// of the roster, falling back once to the full list. An empty result
    /// means the community pool cannot fund the request.
    pub fn fundable_combos(
        &self,
        requested_amount: f64,
        lenders: &[Lender],
    ) -> Result<Vec<Combo>, MatchingError> {
        combos::generate(requested_amount, lenders, &self.config)
    }
}

pub(crate) fn guard_requested(requested: f64) -> Result<(), MatchingError> {
    if !(requested > 0.0) {
        return Err(MatchingError::NonPositiveAmount { requested });
    }
    Ok(())
}

/// Deterministic half-away-from-zero rounding to `places` decimals.
pub(crate) fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
