use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{Combo, FundingRequest, Lender, MatchId, RiskAssessment, RosterFilter};
use super::engine::{EngineConfig, MatchingEngine, MatchingError};
use super::repository::{
    DirectoryError, LenderDirectory, MatchRecord, MatchRepository, RepositoryError,
};
use super::roster;

/// Service composing the lender directory, the matching engine, and the
/// match repository. The engine stays pure; everything stateful lives
/// behind the two traits.
pub struct LoanMatchingService<D, R> {
    directory: Arc<D>,
    matches: Arc<R>,
    engine: MatchingEngine,
}

static MATCH_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_match_id() -> MatchId {
    let id = MATCH_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    MatchId(format!("match-{id:06}"))
}

impl<D, R> LoanMatchingService<D, R>
where
    D: LenderDirectory + 'static,
    R: MatchRepository + 'static,
{
    pub fn new(directory: Arc<D>, matches: Arc<R>, config: EngineConfig) -> Self {
        Self {
            directory,
            matches,
            engine: MatchingEngine::new(config),
        }
    }

    pub fn engine(&self) -> &MatchingEngine {
        &self.engine
    }

    /// Risk read for a request; pure passthrough to the engine.
    pub fn quote_risk(&self, requested_amount: f64, capacity_ceiling: f64) -> RiskAssessment {
        self.engine.assess_risk(requested_amount, capacity_ceiling)
    }

    /// Distinct fundable lender groupings for the borrower to pick from.
    pub fn borrow_options(
        &self,
        request: &FundingRequest,
    ) -> Result<Vec<Combo>, LendingServiceError> {
        let lenders = self.roster(&request.filter)?;

        let pool = roster::pool_capital(&lenders);
        if pool < request.requested_amount {
            debug!(pool, requested = request.requested_amount, "pool short of request");
            return Err(MatchingError::InsufficientCapital.into());
        }

        let combos = self
            .engine
            .fundable_combos(request.requested_amount, &lenders)?;
        if combos.is_empty() {
            return Err(MatchingError::InsufficientCapital.into());
        }
        Ok(combos)
    }

    /// Commit one final match: allocate across the ranked roster, score
    /// the request, and persist the result as an immutable record.
    pub fn commit_match(
        &self,
        request: &FundingRequest,
    ) -> Result<MatchRecord, LendingServiceError> {
        let lenders = self.roster(&request.filter)?;
        let allocation = self.engine.allocate(request.requested_amount, &lenders)?;
        let risk = self
            .engine
            .assess_risk(request.requested_amount, request.capacity_ceiling);

        let record = MatchRecord {
            id: next_match_id(),
            borrower_id: request.borrower_id.clone(),
            total_amount: request.requested_amount,
            parts: allocation.parts(),
            risk_score: risk.score,
            created_at: Utc::now(),
        };
        let stored = self.matches.insert(record)?;
        info!(
            match_id = %stored.id.0,
            total = stored.total_amount,
            lenders = stored.parts.len(),
            "match committed"
        );
        Ok(stored)
    }

    /// Fetch a committed match for receipt display.
    pub fn get_match(&self, id: &MatchId) -> Result<MatchRecord, LendingServiceError> {
        let record = self
            .matches
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Feedback line for a borrower stepping back from a risky request.
    pub fn decline_guidance(&self, requested_amount: f64, capacity_ceiling: f64) -> String {
        let risk = self.engine.assess_risk(requested_amount, capacity_ceiling);
        format!(
            "Risk score {} suggests waiting. Reduce your request by ${:.0} or add savings.",
            risk.score,
            requested_amount * 0.2
        )
    }

    /// Eligible roster in matching order. An empty directory answer is the
    /// one failure the service distinguishes from plain insufficiency, so
    /// callers can say "no lenders here yet" rather than "pool too small".
    fn roster(&self, filter: &RosterFilter) -> Result<Vec<Lender>, LendingServiceError> {
        let lenders = self.directory.eligible_lenders(filter)?;
        if lenders.is_empty() {
            return Err(LendingServiceError::NoEligibleLenders);
        }
        Ok(roster::rank_for_matching(lenders))
    }
}

/// Error raised by the matching service.
#[derive(Debug, thiserror::Error)]
pub enum LendingServiceError {
    #[error("no eligible lenders available for this borrower")]
    NoEligibleLenders,
    #[error(transparent)]
    Matching(#[from] MatchingError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
