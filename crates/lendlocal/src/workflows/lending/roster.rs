use super::domain::Lender;

/// Put a roster into the order the engine expects: ascending required
/// rate, then descending capital so the cheapest, deepest lenders lead.
/// Non-positive-capital entries are dropped; they can never contribute.
pub fn rank_for_matching(mut lenders: Vec<Lender>) -> Vec<Lender> {
    lenders.retain(|lender| lender.capital > 0.0);
    lenders.sort_by(|a, b| {
        a.rate
            .total_cmp(&b.rate)
            .then_with(|| b.capital.total_cmp(&a.capital))
    });
    lenders
}

/// Total capital available across a roster, for "can the community cover
/// this at all" checks ahead of allocation.
pub fn pool_capital(lenders: &[Lender]) -> f64 {
    lenders.iter().map(|lender| lender.capital).sum()
}
