//! Dashboard projections for active participants. Pure arithmetic over the
//! request or capital figure; nothing here touches storage.

use serde::{Deserialize, Serialize};

const WEEKLY_PAYMENT_SPLIT: f64 = 10.0;
const WEEKLY_PAYMENT_CAP: f64 = 50.0;
const LENDER_CYCLE_SHARE: f64 = 0.01;
const LENDER_ANNUAL_YIELD: f64 = 0.12;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPreview {
    pub amount: f64,
    pub due_in_weeks: u8,
}

/// What a borrower sees on their dashboard for an active request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowerOutlook {
    pub next_payment: PaymentPreview,
    pub total_owed_year: f64,
    pub savings_vs_bank_year: f64,
}

/// Weekly repayment capped at a small fixed ceiling, plus the yearly
/// saving against `bank_avg_rate` percent APR at a traditional bank.
pub fn borrower_outlook(amount: f64, bank_avg_rate: f64) -> BorrowerOutlook {
    let next_payment = round2((amount / WEEKLY_PAYMENT_SPLIT).min(WEEKLY_PAYMENT_CAP));
    BorrowerOutlook {
        next_payment: PaymentPreview {
            amount: next_payment,
            due_in_weeks: 1,
        },
        total_owed_year: round2(amount),
        savings_vs_bank_year: round2((bank_avg_rate / 100.0) * amount),
    }
}

/// What a lender sees for the capital they have committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LenderOutlook {
    pub next_payment: PaymentPreview,
    pub expected_revenue_year: f64,
}

pub fn lender_outlook(capital: f64) -> LenderOutlook {
    LenderOutlook {
        next_payment: PaymentPreview {
            amount: round2(capital * LENDER_CYCLE_SHARE),
            due_in_weeks: 1,
        },
        expected_revenue_year: round2(capital * LENDER_ANNUAL_YIELD),
    }
}
