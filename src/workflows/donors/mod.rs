//! Donor registration and dashboard workflow: the registry with its
//! persistence boundary, the descriptive statistics behind the dashboard,
//! and the matching/forecast/eligibility heuristics, exposed through a
//! service facade and an HTTP router.

pub mod domain;
pub mod heuristics;
pub mod repository;
pub mod router;
pub mod service;
pub mod stats;
pub mod storage;
pub mod sync;

#[cfg(test)]
mod tests;

pub use domain::{
    BloodRequest, BloodType, DonationRecency, Donor, DonorId, DonorPatch, DonorRegistration,
    DonorStatus, Inventory, ParseBloodTypeError, Urgency,
};
pub use heuristics::{
    can_donate_to, match_donors, predict_demand, screen_donor, DemandForecast, DemandTrend,
    EligibilityReport, EligibilityScreening, MatchCandidate, MatchQuery, MAX_MATCHES,
};
pub use repository::DonorStore;
pub use router::donor_router;
pub use service::{DonorService, DonorServiceError};
pub use stats::{mean, median, mode, std_dev, summarize, DonorSummary};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use sync::{ConnectivityState, SyncOutcome};
