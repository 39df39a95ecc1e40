use serde::{Deserialize, Serialize};

const DEFAULT_AMOUNT_PRECISION: u32 = 2;
const DEFAULT_MAX_COMBO_WINDOW: usize = 3;

/// Engine dials passed explicitly so the matcher stays pure and testable;
/// nothing in the engine reads ambient environment state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Decimal places used for contribution amounts and totals.
    pub amount_precision: u32,
    /// Largest roster prefix considered when enumerating combos.
    pub max_combo_window: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            amount_precision: DEFAULT_AMOUNT_PRECISION,
            max_combo_window: DEFAULT_MAX_COMBO_WINDOW,
        }
    }
}
