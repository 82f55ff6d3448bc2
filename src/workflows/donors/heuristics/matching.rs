use serde::{Deserialize, Serialize};

use super::super::domain::{BloodType, DonationRecency, Donor, DonorStatus, Urgency};

/// Upper bound on candidates returned by a match search.
pub const MAX_MATCHES: usize = 5;

const BASELINE_SCORE: i32 = 100;
const CITY_BONUS: i32 = 50;
const NEVER_DONATED_BONUS: i32 = 20;
const YEAR_SINCE_DONATION_BONUS: i32 = 10;
const ACTIVE_STATUS_BONUS: i32 = 15;

/// Standard ABO/Rh donation compatibility: which recipient types can safely
/// receive the donor's blood. O- is the universal donor; AB+ can only give
/// to AB+.
pub fn compatible_recipients(donor: BloodType) -> &'static [BloodType] {
    use BloodType::*;
    match donor {
        ONegative => &[
            OPositive, ONegative, APositive, ANegative, BPositive, BNegative, AbPositive,
            AbNegative,
        ],
        OPositive => &[OPositive, APositive, BPositive, AbPositive],
        ANegative => &[APositive, ANegative, AbPositive, AbNegative],
        APositive => &[APositive, AbPositive],
        BNegative => &[BPositive, BNegative, AbPositive, AbNegative],
        BPositive => &[BPositive, AbPositive],
        AbNegative => &[AbPositive, AbNegative],
        AbPositive => &[AbPositive],
    }
}

pub fn can_donate_to(donor: BloodType, recipient: BloodType) -> bool {
    compatible_recipients(donor).contains(&recipient)
}

/// Search parameters for a recipient needing blood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchQuery {
    pub blood_type: BloodType,
    pub city: String,
    /// Accepted but not yet weighted into scores; reserved for future use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
}

/// A compatible donor plus the composite match score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub donor: Donor,
    pub score: i32,
}

/// Rank compatible donors for a recipient. Scores start at 100 and gain
/// bonuses for a same-city donor, favorable donation recency, and active
/// status. Ties keep the filtered collection order (the sort is stable).
pub fn match_donors(donors: &[Donor], query: &MatchQuery) -> Vec<MatchCandidate> {
    let mut candidates: Vec<MatchCandidate> = donors
        .iter()
        .filter(|donor| can_donate_to(donor.blood_type, query.blood_type))
        .map(|donor| MatchCandidate {
            score: score_donor(donor, query),
            donor: donor.clone(),
        })
        .collect();

    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates.truncate(MAX_MATCHES);
    candidates
}

fn score_donor(donor: &Donor, query: &MatchQuery) -> i32 {
    let mut score = BASELINE_SCORE;

    if donor.city.eq_ignore_ascii_case(&query.city) {
        score += CITY_BONUS;
    }

    match donor.last_donation {
        DonationRecency::Never => score += NEVER_DONATED_BONUS,
        DonationRecency::OneYear => score += YEAR_SINCE_DONATION_BONUS,
        _ => {}
    }

    if donor.status == DonorStatus::Active {
        score += ACTIVE_STATUS_BONUS;
    }

    score
}
