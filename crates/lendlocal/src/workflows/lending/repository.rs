use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AllocationPart, BorrowerId, Lender, MatchId, RosterFilter};

/// Immutable record of one committed match: the chosen allocation plus the
/// risk score it was approved under. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    pub borrower_id: BorrowerId,
    pub total_amount: f64,
    pub parts: Vec<AllocationPart>,
    pub risk_score: u8,
    pub created_at: DateTime<Utc>,
}

impl MatchRecord {
    /// Advice line shown with the receipt, derived from the score the
    /// match was committed under (70 is the low-risk boundary).
    pub fn advice(&self) -> &'static str {
        if self.risk_score >= 70 {
            "Great fit: community lenders are ready."
        } else {
            "Matched with cautious lenders."
        }
    }

    pub fn receipt(&self) -> MatchReceiptView {
        MatchReceiptView {
            match_id: self.id.clone(),
            total_amount: self.total_amount,
            lenders: self.parts.clone(),
            risk_score: self.risk_score,
            ai_advice: self.advice().to_string(),
        }
    }
}

/// Borrower-facing payload for a committed match. Carries display lender
/// identifiers only; raw account ids never leave the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReceiptView {
    pub match_id: MatchId,
    pub total_amount: f64,
    pub lenders: Vec<AllocationPart>,
    pub risk_score: u8,
    pub ai_advice: String,
}

/// Storage abstraction for committed matches so the service module can be
/// exercised in isolation.
pub trait MatchRepository: Send + Sync {
    fn insert(&self, record: MatchRecord) -> Result<MatchRecord, RepositoryError>;
    fn fetch(&self, id: &MatchId) -> Result<Option<MatchRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Roster provider: yields lenders already screened for role, community
/// membership, and (when required) location verification. Ranking happens
/// on the consuming side, so implementations only filter.
pub trait LenderDirectory: Send + Sync {
    fn eligible_lenders(&self, filter: &RosterFilter) -> Result<Vec<Lender>, DirectoryError>;
}

/// Directory lookup error.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("lender directory unavailable: {0}")]
    Unavailable(String),
}
