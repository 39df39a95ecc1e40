//! Community lending workflow: risk scoring, lender matching, and match
//! persistence for borrower funding requests.
//!
//! The matching engine itself is pure; rosters arrive pre-screened from a
//! [`LenderDirectory`] and committed matches land in a [`MatchRepository`].

pub mod domain;
pub(crate) mod engine;
pub mod outlook;
pub mod repository;
pub mod roster;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AllocationPart, BorrowerId, Combo, CommunityId, FundingRequest, Lender, LenderId, MatchId,
    Recommendation, RiskAssessment, RiskBand, RosterFilter,
};
pub use engine::{Allocation, EngineConfig, MatchingEngine, MatchingError};
pub use repository::{
    DirectoryError, LenderDirectory, MatchReceiptView, MatchRecord, MatchRepository,
    RepositoryError,
};
pub use router::match_router;
pub use service::{LendingServiceError, LoanMatchingService};
