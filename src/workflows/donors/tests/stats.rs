use super::common::*;
use crate::workflows::donors::domain::BloodType;
use crate::workflows::donors::stats::{mean, median, mode, std_dev, summarize};

#[test]
fn mean_of_empty_sequence_is_zero() {
    assert_eq!(mean(&[]), 0.0);
}

#[test]
fn mean_averages_values() {
    assert_eq!(mean(&[4.0, 8.0]), 6.0);
}

#[test]
fn median_returns_middle_for_odd_length() {
    assert_eq!(median(&[1.0, 2.0, 3.0]), 2.0);
}

#[test]
fn median_averages_middle_pair_for_even_length() {
    assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5);
}

#[test]
fn median_of_empty_sequence_is_zero() {
    assert_eq!(median(&[]), 0.0);
}

#[test]
fn median_does_not_mutate_its_input() {
    let values = vec![3.0, 1.0, 2.0];
    assert_eq!(median(&values), 2.0);
    assert_eq!(values, vec![3.0, 1.0, 2.0]);
}

#[test]
fn median_handles_unsorted_input() {
    assert_eq!(median(&[9.0, 1.0, 5.0]), 5.0);
}

#[test]
fn mode_picks_most_frequent_value() {
    assert_eq!(mode(&[1, 1, 2]), Some(1));
}

#[test]
fn mode_of_empty_sequence_is_none() {
    assert_eq!(mode::<i32>(&[]), None);
}

#[test]
fn mode_tie_goes_to_first_value_reaching_the_max_count() {
    // 2 reaches count 2 before 1 does, so 2 wins the tie.
    assert_eq!(mode(&[1, 2, 2, 1]), Some(2));
}

#[test]
fn std_dev_of_identical_values_is_zero() {
    assert_eq!(std_dev(&[2.0, 2.0, 2.0]), 0.0);
}

#[test]
fn std_dev_of_empty_sequence_is_zero() {
    assert_eq!(std_dev(&[]), 0.0);
}

#[test]
fn std_dev_uses_the_population_form() {
    // Deviations from mean 3: [-1, 1, -1, 1]; variance 1 when dividing by N.
    assert_eq!(std_dev(&[2.0, 4.0, 2.0, 4.0]), 1.0);
}

#[test]
fn summarize_counts_and_ages() {
    let donors = vec![
        donor("d1", BloodType::OPositive, "Des Moines"),
        donor("d2", BloodType::OPositive, "Ames"),
        donor("d3", BloodType::ANegative, "Iowa City"),
    ];

    let summary = summarize(&donors);
    assert_eq!(summary.total_donors, 3);
    assert_eq!(summary.most_common_blood_type, Some(BloodType::OPositive));
    assert_eq!(summary.average_age, 30);
    assert_eq!(summary.median_age, 30.0);
    assert_eq!(summary.age_std_dev, 0.0);
}

#[test]
fn summarize_with_distinct_types_reports_the_first_donor_type() {
    let donors = vec![
        donor("d1", BloodType::BNegative, "Des Moines"),
        donor("d2", BloodType::OPositive, "Ames"),
        donor("d3", BloodType::ANegative, "Iowa City"),
        donor("d4", BloodType::AbPositive, "Cedar Rapids"),
        donor("d5", BloodType::ONegative, "Ames"),
    ];

    let summary = summarize(&donors);
    assert_eq!(summary.total_donors, 5);
    // All counts are 1; the first value to reach the max wins.
    assert_eq!(summary.most_common_blood_type, Some(BloodType::BNegative));
}

#[test]
fn summarize_empty_roster_uses_neutral_defaults() {
    let summary = summarize(&[]);
    assert_eq!(summary.total_donors, 0);
    assert_eq!(summary.most_common_blood_type, None);
    assert_eq!(summary.average_age, 0);
    assert_eq!(summary.median_age, 0.0);
    assert_eq!(summary.age_std_dev, 0.0);
}

#[test]
fn summarize_rounds_age_std_dev_to_two_decimals() {
    let mut donors = vec![
        donor("d1", BloodType::OPositive, "Des Moines"),
        donor("d2", BloodType::OPositive, "Ames"),
        donor("d3", BloodType::OPositive, "Iowa City"),
    ];
    donors[0].age = 20;
    donors[1].age = 30;
    donors[2].age = 41;

    let summary = summarize(&donors);
    // Population std dev of [20, 30, 41] is 8.5765..., rounded to 8.58.
    assert_eq!(summary.age_std_dev, 8.58);
    assert_eq!(summary.average_age, 30);
}
