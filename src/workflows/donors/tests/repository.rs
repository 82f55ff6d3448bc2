use std::sync::Arc;

use super::common::*;
use crate::support::SequenceSource;
use crate::workflows::donors::domain::{
    BloodType, DonationRecency, DonorId, DonorPatch, DonorStatus, Urgency,
};
use crate::workflows::donors::repository::DonorStore;
use crate::workflows::donors::storage::{MemoryStore, DONORS_KEY};

fn open_store(storage: Arc<MemoryStore>) -> DonorStore<Arc<MemoryStore>> {
    let mut rng = SequenceSource::constant(0.5);
    DonorStore::open(storage, &mut rng)
}

#[test]
fn first_run_seeds_a_five_donor_roster_with_distinct_types() {
    let store = open_store(Arc::new(MemoryStore::new()));
    let donors = store.donors();

    assert_eq!(donors.len(), 5);
    let mut types: Vec<BloodType> = donors.iter().map(|d| d.blood_type).collect();
    types.sort();
    types.dedup();
    assert_eq!(types.len(), 5);
}

#[test]
fn first_run_seeds_inventory_within_documented_ranges() {
    let mut low = SequenceSource::constant(0.0);
    let store = DonorStore::open(Arc::new(MemoryStore::new()), &mut low);
    let inventory = store.inventory();

    assert_eq!(inventory.iter().count(), 8);
    assert_eq!(inventory.units(BloodType::OPositive), 40);
    assert_eq!(inventory.units(BloodType::ONegative), 5);
    assert_eq!(inventory.units(BloodType::AbNegative), 3);
}

#[test]
fn register_assigns_fresh_id_timestamp_and_active_status() {
    let mut store = open_store(Arc::new(MemoryStore::new()));
    let donor = store.register(registration("Test Donor", BloodType::BNegative), test_instant());

    assert!(!donor.id.0.is_empty());
    assert_eq!(donor.id.0, "donor-000006");
    assert_eq!(donor.status, DonorStatus::Active);
    assert_eq!(donor.registered_at, test_instant());

    let donors = store.donors();
    assert_eq!(donors.len(), 6);
    assert!(donors.iter().any(|d| d.id == donor.id));
}

#[test]
fn update_merges_provided_fields_and_keeps_the_rest() {
    let mut store = open_store(Arc::new(MemoryStore::new()));
    let donor = store.register(registration("Patch Me", BloodType::APositive), test_instant());
    let original_email = donor.email.clone();

    let patch = DonorPatch {
        city: Some("Ames".to_string()),
        last_donation: Some(DonationRecency::ThreeMonths),
        ..DonorPatch::default()
    };
    let updated = store.update(&donor.id, patch).expect("donor exists");

    assert_eq!(updated.city, "Ames");
    assert_eq!(updated.last_donation, DonationRecency::ThreeMonths);
    assert_eq!(updated.email, original_email);
    assert_eq!(updated.name, "Patch Me");
}

#[test]
fn update_of_unknown_id_is_a_no_op_returning_none() {
    let mut store = open_store(Arc::new(MemoryStore::new()));
    let before = store.donors();

    let patch = DonorPatch {
        city: Some("Nowhere".to_string()),
        ..DonorPatch::default()
    };
    assert!(store.update(&DonorId("donor-999999".to_string()), patch).is_none());
    assert_eq!(store.donors(), before);
}

#[test]
fn remove_deletes_the_record_and_ignores_unknown_ids() {
    let mut store = open_store(Arc::new(MemoryStore::new()));
    let donor = store.register(registration("Short Stay", BloodType::ONegative), test_instant());

    store.remove(&donor.id);
    assert!(!store.donors().iter().any(|d| d.id == donor.id));

    let before = store.donors();
    store.remove(&DonorId("donor-424242".to_string()));
    assert_eq!(store.donors(), before);
}

#[test]
fn registrations_survive_a_reload() {
    let storage = Arc::new(MemoryStore::new());

    let donor = {
        let mut store = open_store(storage.clone());
        store.register(registration("Persistent", BloodType::AbNegative), test_instant())
    };

    let reloaded = open_store(storage);
    assert!(reloaded.donors().iter().any(|d| d.id == donor.id));
}

#[test]
fn id_sequence_resumes_after_reload_without_collision() {
    let storage = Arc::new(MemoryStore::new());

    let first = {
        let mut store = open_store(storage.clone());
        store.register(registration("First", BloodType::OPositive), test_instant())
    };

    let mut store = open_store(storage);
    let second = store.register(registration("Second", BloodType::OPositive), test_instant());

    assert_ne!(first.id, second.id);
    assert_eq!(second.id.0, "donor-000007");
}

#[test]
fn malformed_donor_payload_falls_back_to_the_seed_roster() {
    let storage = Arc::new(MemoryStore::new().with_entry(DONORS_KEY, "{definitely not json"));
    let store = open_store(storage);
    assert_eq!(store.donors().len(), 5);
}

#[test]
fn inventory_updates_persist_across_reload() {
    let storage = Arc::new(MemoryStore::new());

    {
        let mut store = open_store(storage.clone());
        store.set_inventory(BloodType::BNegative, 77);
    }

    let reloaded = open_store(storage);
    assert_eq!(reloaded.inventory().units(BloodType::BNegative), 77);
}

#[test]
fn recorded_requests_are_listed_and_persisted() {
    let storage = Arc::new(MemoryStore::new());

    let request = {
        let mut store = open_store(storage.clone());
        store.record_request(
            BloodType::ONegative,
            4,
            Urgency::High,
            "Des Moines".to_string(),
            test_instant(),
        )
    };
    assert_eq!(request.id, "req-000001");

    let reloaded = open_store(storage);
    let requests = reloaded.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].blood_type, BloodType::ONegative);
    assert_eq!(requests[0].units, 4);
}

#[test]
fn existing_roster_is_not_reseeded() {
    let storage = Arc::new(MemoryStore::new());

    {
        let mut store = open_store(storage.clone());
        let donors = store.donors();
        for donor in &donors[1..] {
            store.remove(&donor.id);
        }
    }

    let reloaded = open_store(storage);
    assert_eq!(reloaded.donors().len(), 1);
}
