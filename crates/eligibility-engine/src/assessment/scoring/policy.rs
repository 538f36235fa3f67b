use super::super::domain::Tier;
use serde::{Deserialize, Serialize};

pub const CONFIDENCE_FLOOR: i32 = 15;
pub const CONFIDENCE_CEILING: i32 = 95;

const HIGHLY_ELIGIBLE_MIN: i32 = 80;
const LIKELY_ELIGIBLE_MIN: i32 = 60;
const POSSIBLY_ELIGIBLE_MIN: i32 = 40;

/// Tier and displayed confidence for a raw score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub tier: Tier,
    pub confidence_percent: u8,
}

/// Total over every `i32`. Confidence never reads 0% or 100%.
pub fn classify(total: i32) -> Classification {
    let tier = if total >= HIGHLY_ELIGIBLE_MIN {
        Tier::HighlyEligible
    } else if total >= LIKELY_ELIGIBLE_MIN {
        Tier::LikelyEligible
    } else if total >= POSSIBLY_ELIGIBLE_MIN {
        Tier::PossiblyEligible
    } else {
        Tier::Unclear
    };

    // Clamped into 15..=95, so the narrowing cannot truncate.
    let confidence_percent = total.clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING) as u8;

    Classification {
        tier,
        confidence_percent,
    }
}
