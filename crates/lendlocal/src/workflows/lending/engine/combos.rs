use std::collections::HashSet;

use super::super::domain::{Combo, Lender, LenderId};
use super::config::EngineConfig;
use super::{allocation, guard_requested, round_to, MatchingError};

/// Enumerate distinct fundable groupings over growing prefixes of the
/// ranked roster, so borrowers see a handful of realistic choices instead
/// of only the single minimal-rate split.
///
/// Prefix windows run from 1 up to the configured maximum. When every
/// window falls short, the full roster is tried once; combos from that
/// fallback are labeled `c_all`. An empty result means the pool cannot
/// fund the request at all.
pub(crate) fn generate(
    requested: f64,
    lenders: &[Lender],
    config: &EngineConfig,
) -> Result<Vec<Combo>, MatchingError> {
    guard_requested(requested)?;

    let mut combos = Vec::new();
    let mut seen: HashSet<Vec<LenderId>> = HashSet::new();
    let total = round_to(requested, config.amount_precision);

    let max_window = config.max_combo_window.min(lenders.len());
    for window in 1..=max_window {
        let allocation =
            match allocation::allocate(requested, &lenders[..window], config.amount_precision) {
                Ok(allocation) => allocation,
                Err(MatchingError::InsufficientCapital) => continue,
                Err(other) => return Err(other),
            };
        if !seen.insert(allocation.contributor_key()) {
            continue;
        }
        combos.push(Combo {
            id: format!("c{}", combos.len() + 1),
            total,
            parts: allocation.parts(),
        });
    }

    if combos.is_empty() {
        // Earlier windows lacked coverage; try the whole roster once.
        if let Ok(allocation) = allocation::allocate(requested, lenders, config.amount_precision) {
            if seen.insert(allocation.contributor_key()) {
                combos.push(Combo {
                    id: "c_all".to_string(),
                    total,
                    parts: allocation.parts(),
                });
            }
        }
    }

    Ok(combos)
}
