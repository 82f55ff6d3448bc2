use serde::{Deserialize, Serialize};

use super::super::domain::DonationRecency;

const MIN_AGE: u8 = 18;
const MAX_AGE: u8 = 65;
const MIN_WEIGHT_KG: f32 = 50.0;

const ELIGIBLE_CONFIDENCE: u8 = 95;
const INELIGIBLE_CONFIDENCE: u8 = 100;

/// Answers collected from the pre-donation questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityScreening {
    pub age: u8,
    pub weight_kg: f32,
    pub last_donation: DonationRecency,
    #[serde(default)]
    pub has_conditions: bool,
}

/// Outcome of the screening. When eligible, `reasons` holds exactly the
/// affirmative message; otherwise one entry per failed rule, in rule order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityReport {
    pub eligible: bool,
    pub reasons: Vec<String>,
    pub confidence: u8,
}

/// Evaluate every rule independently so multiple reasons can accumulate;
/// nothing short-circuits.
///
/// The recency rule admits only `3months` and `never`. A donor reporting
/// `6months` or `1year` is rejected even though a real donation-interval
/// policy would admit them; the behavior is kept deliberately (see DESIGN.md).
pub fn screen_donor(screening: &EligibilityScreening) -> EligibilityReport {
    let mut reasons = Vec::new();

    if screening.age < MIN_AGE || screening.age > MAX_AGE {
        reasons.push("Age must be between 18 and 65".to_string());
    }

    if screening.weight_kg < MIN_WEIGHT_KG {
        reasons.push("Minimum weight requirement is 50 kg".to_string());
    }

    if !matches!(
        screening.last_donation,
        DonationRecency::ThreeMonths | DonationRecency::Never
    ) {
        reasons.push("Must wait at least 3 months between donations".to_string());
    }

    if screening.has_conditions {
        reasons.push("Medical conditions may affect eligibility".to_string());
    }

    if reasons.is_empty() {
        EligibilityReport {
            eligible: true,
            reasons: vec!["You are eligible to donate!".to_string()],
            confidence: ELIGIBLE_CONFIDENCE,
        }
    } else {
        EligibilityReport {
            eligible: false,
            reasons,
            confidence: INELIGIBLE_CONFIDENCE,
        }
    }
}
