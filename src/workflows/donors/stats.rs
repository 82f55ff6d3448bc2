//! Descriptive statistics behind the dashboard summary. All functions are
//! pure: empty input yields a neutral default rather than an error.

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

use super::domain::{BloodType, Donor};

/// Arithmetic mean; 0 for an empty sequence.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median over a sorted copy; the input is never mutated. 0 when empty.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

/// Most frequent value, or None when empty. Ties keep the earlier winner: a
/// value only takes over as mode at the moment its count strictly exceeds the
/// running maximum, so the first value to reach the top count wins.
pub fn mode<T>(values: &[T]) -> Option<T>
where
    T: Eq + Hash + Clone,
{
    let mut counts: HashMap<&T, usize> = HashMap::new();
    let mut best: Option<&T> = None;
    let mut best_count = 0usize;

    for value in values {
        let count = counts.entry(value).or_insert(0);
        *count += 1;
        if *count > best_count {
            best_count = *count;
            best = Some(value);
        }
    }

    best.cloned()
}

/// Population standard deviation (divide by N); 0 when empty.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let avg = mean(values);
    let squared_deviations: Vec<f64> = values.iter().map(|v| (v - avg).powi(2)).collect();
    mean(&squared_deviations).sqrt()
}

/// Aggregate view rendered on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonorSummary {
    pub total_donors: usize,
    pub most_common_blood_type: Option<BloodType>,
    pub average_age: u32,
    pub median_age: f64,
    pub age_std_dev: f64,
}

/// Summarize the donor set: totals, modal blood type, and age statistics.
/// Average age is rounded to the nearest year; the standard deviation is
/// rounded to two decimal places for display.
pub fn summarize(donors: &[Donor]) -> DonorSummary {
    let ages: Vec<f64> = donors.iter().map(|donor| f64::from(donor.age)).collect();
    let blood_types: Vec<BloodType> = donors.iter().map(|donor| donor.blood_type).collect();

    DonorSummary {
        total_donors: donors.len(),
        most_common_blood_type: mode(&blood_types),
        average_age: mean(&ages).round() as u32,
        median_age: median(&ages),
        age_std_dev: (std_dev(&ages) * 100.0).round() / 100.0,
    }
}
