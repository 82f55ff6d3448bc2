//! The donor registry: donors, blood requests, and inventory, loaded from and
//! persisted to the key-value boundary. Single-writer by construction; the
//! service wraps it in a mutex before handing it to concurrent handlers.

use chrono::{DateTime, TimeZone, Utc};
use tracing::info;

use super::domain::{
    BloodRequest, BloodType, DonationRecency, Donor, DonorId, DonorPatch, DonorRegistration,
    DonorStatus, Inventory, Urgency,
};
use super::storage::{
    load_collection, store_collection, KeyValueStore, DONORS_KEY, INVENTORY_KEY, REQUESTS_KEY,
};
use crate::support::RandomSource;

/// Initial unit ranges per blood type, reflecting relative donor scarcity.
const INVENTORY_SEED_RANGES: [(BloodType, u32, u32); 8] = [
    (BloodType::OPositive, 40, 99),
    (BloodType::ONegative, 5, 24),
    (BloodType::APositive, 30, 79),
    (BloodType::ANegative, 5, 19),
    (BloodType::BPositive, 20, 59),
    (BloodType::BNegative, 5, 19),
    (BloodType::AbPositive, 10, 39),
    (BloodType::AbNegative, 3, 14),
];

pub struct DonorStore<S: KeyValueStore> {
    storage: S,
    donors: Vec<Donor>,
    requests: Vec<BloodRequest>,
    inventory: Inventory,
    donor_sequence: u64,
    request_sequence: u64,
}

impl<S: KeyValueStore> DonorStore<S> {
    /// Load the registry from storage. First run seeds a demo roster and a
    /// randomized inventory so the dashboard is never empty.
    pub fn open(storage: S, rng: &mut dyn RandomSource) -> Self {
        let donors: Vec<Donor> = load_collection(&storage, DONORS_KEY).unwrap_or_default();
        let requests: Vec<BloodRequest> = load_collection(&storage, REQUESTS_KEY).unwrap_or_default();
        let inventory: Option<Inventory> = load_collection(&storage, INVENTORY_KEY);

        let mut store = Self {
            storage,
            donors,
            requests,
            inventory: inventory.clone().unwrap_or_default(),
            donor_sequence: 0,
            request_sequence: 0,
        };
        store.inventory.normalize();

        let mut seeded = false;
        if store.donors.is_empty() {
            store.donors = demo_roster();
            info!(count = store.donors.len(), "seeded demo donor roster");
            seeded = true;
        }
        if inventory.is_none() {
            store.inventory = seed_inventory(rng);
            info!("seeded randomized inventory");
            seeded = true;
        }

        store.donor_sequence = highest_sequence(store.donors.iter().map(|d| d.id.0.as_str()));
        store.request_sequence = highest_sequence(store.requests.iter().map(|r| r.id.as_str()));

        if seeded {
            store.save();
        }
        store
    }

    /// Register a new donor: fresh id, supplied timestamp, active status.
    pub fn register(&mut self, registration: DonorRegistration, registered_at: DateTime<Utc>) -> Donor {
        self.donor_sequence += 1;
        let donor = Donor {
            id: DonorId(format!("donor-{:06}", self.donor_sequence)),
            name: registration.name,
            email: registration.email,
            blood_type: registration.blood_type,
            phone: registration.phone,
            age: registration.age,
            weight_kg: registration.weight_kg,
            city: registration.city,
            last_donation: registration.last_donation,
            registered_at,
            status: DonorStatus::Active,
        };
        self.donors.push(donor.clone());
        self.save();
        donor
    }

    /// Snapshot of the donor collection; not live-updating.
    pub fn donors(&self) -> Vec<Donor> {
        self.donors.clone()
    }

    /// Merge the patch into the matching donor. None when the id is unknown,
    /// in which case nothing is persisted.
    pub fn update(&mut self, id: &DonorId, patch: DonorPatch) -> Option<Donor> {
        let donor = self.donors.iter_mut().find(|donor| &donor.id == id)?;
        patch.apply(donor);
        let updated = donor.clone();
        self.save();
        Some(updated)
    }

    /// Remove the donor with the given id. Silent no-op when absent.
    pub fn remove(&mut self, id: &DonorId) {
        self.donors.retain(|donor| &donor.id != id);
        self.save();
    }

    /// Record a blood request for the dashboard's request feed.
    pub fn record_request(
        &mut self,
        blood_type: BloodType,
        units: u32,
        urgency: Urgency,
        city: String,
        requested_at: DateTime<Utc>,
    ) -> BloodRequest {
        self.request_sequence += 1;
        let request = BloodRequest {
            id: format!("req-{:06}", self.request_sequence),
            blood_type,
            units,
            urgency,
            city,
            requested_at,
        };
        self.requests.push(request.clone());
        self.save();
        request
    }

    pub fn requests(&self) -> Vec<BloodRequest> {
        self.requests.clone()
    }

    /// Set the absolute unit count for a blood type.
    pub fn set_inventory(&mut self, blood_type: BloodType, units: u32) {
        self.inventory.set_units(blood_type, units);
        self.save();
    }

    pub fn inventory(&self) -> Inventory {
        self.inventory.clone()
    }

    /// Persist all three collections under their fixed keys.
    pub fn save(&self) {
        store_collection(&self.storage, DONORS_KEY, &self.donors);
        store_collection(&self.storage, REQUESTS_KEY, &self.requests);
        store_collection(&self.storage, INVENTORY_KEY, &self.inventory);
    }
}

/// Highest numeric suffix among `prefix-NNNNNN` ids, so sequences resume
/// after a reload instead of colliding with persisted records.
fn highest_sequence<'a>(ids: impl Iterator<Item = &'a str>) -> u64 {
    ids.filter_map(|id| id.rsplit('-').next())
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
}

fn seed_inventory(rng: &mut dyn RandomSource) -> Inventory {
    let mut inventory = Inventory::zeroed();
    for (blood_type, lo, hi) in INVENTORY_SEED_RANGES {
        inventory.set_units(blood_type, rng.pick_u32(lo, hi));
    }
    inventory
}

/// Fixed demo roster used when no donors have been persisted yet.
fn demo_roster() -> Vec<Donor> {
    let registered_at = Utc
        .with_ymd_and_hms(2026, 1, 5, 9, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH);
    let seeds = [
        (
            "donor-000001",
            "Sarah Mitchell",
            "sarah.mitchell@example.com",
            BloodType::OPositive,
            "515-555-0121",
            29u8,
            63.5f32,
            "Des Moines",
            DonationRecency::ThreeMonths,
        ),
        (
            "donor-000002",
            "James Okafor",
            "james.okafor@example.com",
            BloodType::ANegative,
            "515-555-0162",
            41,
            82.0,
            "Cedar Rapids",
            DonationRecency::Never,
        ),
        (
            "donor-000003",
            "Priya Raman",
            "priya.raman@example.com",
            BloodType::BPositive,
            "319-555-0140",
            35,
            58.2,
            "Iowa City",
            DonationRecency::OneYear,
        ),
        (
            "donor-000004",
            "Miguel Santos",
            "miguel.santos@example.com",
            BloodType::ONegative,
            "515-555-0117",
            52,
            90.4,
            "Des Moines",
            DonationRecency::SixMonths,
        ),
        (
            "donor-000005",
            "Elena Kovacs",
            "elena.kovacs@example.com",
            BloodType::AbPositive,
            "641-555-0189",
            24,
            55.0,
            "Ames",
            DonationRecency::Never,
        ),
    ];

    seeds
        .into_iter()
        .map(
            |(id, name, email, blood_type, phone, age, weight_kg, city, last_donation)| Donor {
                id: DonorId(id.to_string()),
                name: name.to_string(),
                email: email.to_string(),
                blood_type,
                phone: phone.to_string(),
                age,
                weight_kg,
                city: city.to_string(),
                last_donation,
                registered_at,
                status: DonorStatus::Active,
            },
        )
        .collect()
}
