use super::super::domain::{Recommendation, RiskAssessment, RiskBand};

const SCORE_CEILING: f64 = 95.0;
const SCORE_FLOOR: f64 = 5.0;
const RATIO_WEIGHT: f64 = 60.0;
const RATIO_CLAMP: f64 = 1.2;
const LOW_RISK_MIN: u8 = 70;
const MODERATE_RISK_MIN: u8 = 45;

/// Score a requested amount against the borrower's capacity ceiling.
///
/// A ceiling of zero collapses to ratio 1 rather than an error; the ratio
/// is clamped to [0, 1.2] so runaway requests bottom out at the floor
/// score instead of going negative.
pub(crate) fn assess(requested_amount: f64, capacity_ceiling: f64) -> RiskAssessment {
    let ratio = if capacity_ceiling != 0.0 {
        requested_amount / capacity_ceiling
    } else {
        1.0
    };
    let ratio = ratio.clamp(0.0, RATIO_CLAMP);

    let raw_score = (SCORE_CEILING - ratio * RATIO_WEIGHT).max(SCORE_FLOOR);
    let score = raw_score.round() as u8;

    let (label, recommendation) = if score >= LOW_RISK_MIN {
        (RiskBand::Low, Recommendation::Yes)
    } else if score >= MODERATE_RISK_MIN {
        (RiskBand::Med, Recommendation::Maybe)
    } else {
        (RiskBand::High, Recommendation::No)
    };

    let explanation = format!(
        "Request of ${requested_amount:.0} vs savings capacity suggests {} risk relative to peers.",
        label.label()
    );

    RiskAssessment {
        score,
        label,
        explanation,
        recommendation,
    }
}
