use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use crate::support::{FixedClock, SequenceSource};
use crate::workflows::donors::domain::{
    BloodType, DonationRecency, Donor, DonorId, DonorRegistration, DonorStatus,
};
use crate::workflows::donors::service::DonorService;
use crate::workflows::donors::storage::MemoryStore;

pub(super) fn test_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 1, 12, 0, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn donor(id: &str, blood_type: BloodType, city: &str) -> Donor {
    Donor {
        id: DonorId(id.to_string()),
        name: format!("Donor {id}"),
        email: format!("{id}@example.com"),
        blood_type,
        phone: "555-0100".to_string(),
        age: 30,
        weight_kg: 70.0,
        city: city.to_string(),
        last_donation: DonationRecency::ThreeMonths,
        registered_at: test_instant(),
        status: DonorStatus::Active,
    }
}

pub(super) fn registration(name: &str, blood_type: BloodType) -> DonorRegistration {
    DonorRegistration {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_ascii_lowercase().replace(' ', ".")),
        blood_type,
        phone: "555-0123".to_string(),
        age: 28,
        weight_kg: 64.0,
        city: "Des Moines".to_string(),
        last_donation: DonationRecency::Never,
    }
}

pub(super) type TestService = DonorService<Arc<MemoryStore>, SequenceSource, FixedClock>;

/// Service over a shared in-memory store, a constant random draw of 0.5, and
/// a clock pinned to April 1st (positive seasonal phase).
pub(super) fn test_service() -> (TestService, Arc<MemoryStore>) {
    let storage = Arc::new(MemoryStore::new());
    let service = DonorService::open(
        storage.clone(),
        SequenceSource::constant(0.5),
        FixedClock(test_instant()),
    );
    (service, storage)
}
