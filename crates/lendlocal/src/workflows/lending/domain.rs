use serde::{Deserialize, Serialize};

/// Identifier wrapper for platform users acting as lenders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LenderId(pub String);

impl LenderId {
    /// Presentation form shown to borrowers instead of the raw account id.
    ///
    /// Takes the substring after the first underscore (the whole id when
    /// there is none), keeps the first four characters, uppercases them,
    /// and prefixes `Lender-`. Carries no meaning inside the engine.
    pub fn display_label(&self) -> String {
        let raw = self.0.as_str();
        let suffix = raw.split_once('_').map(|(_, rest)| rest).unwrap_or(raw);
        let short: String = suffix.chars().take(4).collect();
        format!("Lender-{}", short.to_uppercase())
    }
}

/// Identifier wrapper for borrowers requesting funds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BorrowerId(pub String);

/// Identifier wrapper for committed matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchId(pub String);

/// Opaque locality bucket used to scope a borrower to nearby lenders.
/// Computed upstream; the matching workflow only compares it for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommunityId(pub String);

/// One community member willing to extend funds, as handed to the engine:
/// already screened for eligibility, with their configured capital ceiling
/// and required annual rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lender {
    pub id: LenderId,
    pub capital: f64,
    pub rate: f64,
}

/// Eligibility constraints applied when assembling a lender roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterFilter {
    /// Restrict to lenders in this community when set.
    pub community: Option<CommunityId>,
    /// Require lenders who completed location verification.
    #[serde(default)]
    pub require_location_verified: bool,
}

/// A single lender's contribution toward one request, in display form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationPart {
    pub lender_id: String,
    pub amount: f64,
    pub rate: f64,
}

/// One candidate, fully funding grouping of lenders offered to a borrower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combo {
    pub id: String,
    pub total: f64,
    pub parts: Vec<AllocationPart>,
}

/// Coarse risk bucket derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low,
    Med,
    High,
}

impl RiskBand {
    pub const fn label(self) -> &'static str {
        match self {
            RiskBand::Low => "low",
            RiskBand::Med => "med",
            RiskBand::High => "high",
        }
    }
}

/// Funding recommendation paired with the risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Yes,
    Maybe,
    No,
}

impl Recommendation {
    pub const fn label(self) -> &'static str {
        match self {
            Recommendation::Yes => "yes",
            Recommendation::Maybe => "maybe",
            Recommendation::No => "no",
        }
    }
}

/// Transient risk read for one request. Recomputed on every call, never
/// stored on its own; only the score travels with a committed match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: u8,
    pub label: RiskBand,
    pub explanation: String,
    pub recommendation: Recommendation,
}

/// One borrower's funding ask as it reaches the matching service: the
/// amount, the capacity ceiling backing the risk read, and the roster
/// constraints established upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingRequest {
    pub borrower_id: BorrowerId,
    pub requested_amount: f64,
    pub capacity_ceiling: f64,
    #[serde(flatten)]
    pub filter: RosterFilter,
}
