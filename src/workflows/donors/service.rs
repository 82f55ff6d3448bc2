use std::sync::Mutex;

use tracing::info;

use super::domain::{
    BloodRequest, BloodType, Donor, DonorId, DonorPatch, DonorRegistration, Inventory, Urgency,
};
use super::heuristics::{
    match_donors, predict_demand, screen_donor, DemandForecast, EligibilityReport,
    EligibilityScreening, MatchCandidate, MatchQuery,
};
use super::repository::DonorStore;
use super::stats::{summarize, DonorSummary};
use super::storage::KeyValueStore;
use super::sync::{simulate_sync, ConnectivityState, SyncOutcome};
use crate::support::{Clock, RandomSource};

/// Errors surfaced by service operations. Store and statistics paths degrade
/// to defaults instead of failing; only the CSV export can error.
#[derive(Debug, thiserror::Error)]
pub enum DonorServiceError {
    #[error("roster export failed: {0}")]
    Export(#[from] csv::Error),
}

/// Facade composing the registry, the heuristics, and the injected
/// capabilities. Handlers run concurrently, so the store and random source
/// each sit behind a mutex; the registry itself is single-writer.
pub struct DonorService<S: KeyValueStore, R: RandomSource, C: Clock> {
    store: Mutex<DonorStore<S>>,
    rng: Mutex<R>,
    clock: C,
    connectivity: ConnectivityState,
}

impl<S, R, C> DonorService<S, R, C>
where
    S: KeyValueStore,
    R: RandomSource,
    C: Clock,
{
    /// Open the registry from storage and wire up the capabilities.
    pub fn open(storage: S, mut rng: R, clock: C) -> Self {
        let store = DonorStore::open(storage, &mut rng);
        Self {
            store: Mutex::new(store),
            rng: Mutex::new(rng),
            clock,
            connectivity: ConnectivityState::default(),
        }
    }

    pub fn register(&self, registration: DonorRegistration) -> Donor {
        let registered_at = self.clock.now();
        let donor = self
            .store
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .register(registration, registered_at);
        info!(donor = %donor.id, blood_type = %donor.blood_type, "registered donor");
        donor
    }

    pub fn donors(&self) -> Vec<Donor> {
        self.store
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .donors()
    }

    pub fn update(&self, id: &DonorId, patch: DonorPatch) -> Option<Donor> {
        self.store
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .update(id, patch)
    }

    pub fn remove(&self, id: &DonorId) {
        self.store
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .remove(id);
    }

    pub fn record_request(
        &self,
        blood_type: BloodType,
        units: u32,
        urgency: Urgency,
        city: String,
    ) -> BloodRequest {
        let requested_at = self.clock.now();
        self.store
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .record_request(blood_type, units, urgency, city, requested_at)
    }

    pub fn requests(&self) -> Vec<BloodRequest> {
        self.store
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .requests()
    }

    pub fn set_inventory(&self, blood_type: BloodType, units: u32) {
        self.store
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .set_inventory(blood_type, units);
    }

    pub fn inventory(&self) -> Inventory {
        self.store
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .inventory()
    }

    /// Dashboard aggregate over the current donor set.
    pub fn summary(&self) -> DonorSummary {
        summarize(&self.donors())
    }

    /// Rank compatible donors for a recipient; at most five candidates.
    pub fn match_donors(&self, query: &MatchQuery) -> Vec<MatchCandidate> {
        match_donors(&self.donors(), query)
    }

    /// Synthetic demand forecast for one blood type.
    pub fn forecast(&self, blood_type: BloodType, horizon_days: u32) -> DemandForecast {
        let mut rng = self.rng.lock().unwrap_or_else(|err| err.into_inner());
        predict_demand(blood_type, horizon_days, &mut *rng, self.clock.now())
    }

    pub fn check_eligibility(&self, screening: &EligibilityScreening) -> EligibilityReport {
        screen_donor(screening)
    }

    /// Donor roster as CSV for the dashboard's download link.
    pub fn export_roster_csv(&self) -> Result<String, DonorServiceError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "id",
            "name",
            "email",
            "blood_type",
            "phone",
            "age",
            "weight_kg",
            "city",
            "last_donation",
            "registered_at",
            "status",
        ])?;

        for donor in self.donors() {
            writer.write_record(&[
                donor.id.0,
                donor.name,
                donor.email,
                donor.blood_type.label().to_string(),
                donor.phone,
                donor.age.to_string(),
                donor.weight_kg.to_string(),
                donor.city,
                donor.last_donation.label().to_string(),
                donor.registered_at.to_rfc3339(),
                donor.status.label().to_string(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|err| csv::Error::from(err.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn set_online(&self, online: bool) {
        self.connectivity.set_online(online);
    }

    pub fn is_online(&self) -> bool {
        self.connectivity.is_online()
    }

    /// Simulated remote sync; resolves after a fixed delay.
    pub async fn sync(&self) -> SyncOutcome {
        simulate_sync(&self.connectivity).await
    }
}
