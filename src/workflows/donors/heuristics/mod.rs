//! Donor-facing heuristics: compatibility matching, synthetic demand
//! forecasting, and eligibility screening. All three operate on plain data
//! and keep their randomness and time sources injected.

pub mod eligibility;
pub mod forecast;
pub mod matching;

pub use eligibility::{screen_donor, EligibilityReport, EligibilityScreening};
pub use forecast::{predict_demand, DemandForecast, DemandTrend};
pub use matching::{can_donate_to, match_donors, MatchCandidate, MatchQuery, MAX_MATCHES};
