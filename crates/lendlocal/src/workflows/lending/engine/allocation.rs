use super::super::domain::{AllocationPart, Lender, LenderId};
use super::{guard_requested, round_to, MatchingError};

/// One lender's share of a request, keyed by the raw account id so the
/// display transform stays out of the core loop.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Contribution {
    pub(crate) lender: LenderId,
    pub(crate) amount: f64,
    pub(crate) rate: f64,
}

/// A complete split of one request across one or more lenders. The sum of
/// contribution amounts equals the requested amount at the configured
/// precision; no lender appears twice. Constructed per request and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    contributions: Vec<Contribution>,
}

impl Allocation {
    pub fn len(&self) -> usize {
        self.contributions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.contributions.iter().map(|c| c.amount).sum()
    }

    pub fn contributors(&self) -> impl Iterator<Item = &LenderId> {
        self.contributions.iter().map(|c| &c.lender)
    }

    /// Ordered tuple of contributing raw ids; the distinctness key for
    /// combo generation. Never exposed to callers of the HTTP surface.
    pub(crate) fn contributor_key(&self) -> Vec<LenderId> {
        self.contributions.iter().map(|c| c.lender.clone()).collect()
    }

    /// Presentation form with display lender identifiers.
    pub fn parts(&self) -> Vec<AllocationPart> {
        self.contributions
            .iter()
            .map(|c| AllocationPart {
                lender_id: c.lender.display_label(),
                amount: c.amount,
                rate: c.rate,
            })
            .collect()
    }
}

/// Greedy single-pass split of `requested` across `lenders` in input
/// order. Covers the request exactly or fails; a roster that falls short
/// yields `InsufficientCapital`, never a partial allocation.
pub(crate) fn allocate(
    requested: f64,
    lenders: &[Lender],
    precision: u32,
) -> Result<Allocation, MatchingError> {
    guard_requested(requested)?;

    let mut remaining = requested;
    let mut contributions = Vec::new();
    for lender in lenders {
        if remaining <= 0.0 {
            break;
        }
        let contribution = lender.capital.min(remaining);
        if contribution <= 0.0 {
            // Zero or negative capital contributes nothing and must never
            // appear in the output.
            continue;
        }
        contributions.push(Contribution {
            lender: lender.id.clone(),
            amount: round_to(contribution, precision),
            rate: round_to(lender.rate, precision),
        });
        remaining -= contribution;
    }

    if remaining > 0.0 {
        return Err(MatchingError::InsufficientCapital);
    }

    settle_rounding_drift(&mut contributions, requested, precision);

    Ok(Allocation { contributions })
}

/// Fold the rounding residue into the last contribution so the advertised
/// total always equals the requested amount at `precision` decimals. The
/// last lender's displayed share absorbs the noise; exactness of the total
/// outranks per-lender rounding fairness here. Swapping in a different
/// policy (e.g. proportional spread) only touches this function.
fn settle_rounding_drift(contributions: &mut [Contribution], requested: f64, precision: u32) {
    let assigned: f64 = contributions.iter().map(|c| c.amount).sum();
    let drift = round_to(requested - assigned, precision);
    if drift != 0.0 {
        if let Some(last) = contributions.last_mut() {
            last.amount = round_to(last.amount + drift, precision);
        }
    }
}
