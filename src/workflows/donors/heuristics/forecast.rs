use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::super::domain::BloodType;
use crate::support::RandomSource;

const HISTORY_DAYS: usize = 30;
const RECENT_WINDOW: usize = 7;
const NOISE_MAGNITUDE: f64 = 5.0;
const SEASONAL_AMPLITUDE: f64 = 0.2;

/// Default forecast horizon in days.
pub const DEFAULT_HORIZON_DAYS: u32 = 7;

/// Direction of the predicted demand relative to the recent average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemandTrend {
    Increasing,
    Decreasing,
}

/// Synthetic demand outlook for one blood type. Confidence is an informal
/// [85, 95) figure, not a statistically derived bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandForecast {
    pub blood_type: BloodType,
    pub horizon_days: u32,
    pub current_demand: u32,
    pub predicted_demand: u32,
    pub trend: DemandTrend,
    pub confidence: f64,
}

/// Daily demand baseline per blood type for the synthetic history.
fn baseline(blood_type: BloodType) -> f64 {
    match blood_type {
        BloodType::OPositive => 45.0,
        BloodType::ONegative => 15.0,
        BloodType::APositive => 35.0,
        BloodType::ANegative => 12.0,
        BloodType::BPositive => 30.0,
        BloodType::BNegative => 10.0,
        BloodType::AbPositive => 20.0,
        BloodType::AbNegative => 8.0,
    }
}

/// Forecast demand for a blood type over the given horizon.
///
/// The 30-day history is regenerated on every call, so repeated forecasts for
/// the same type may differ. That is intentional demo behavior, not a caching
/// bug. `horizon_days` is carried into the result but does not change the
/// math; the prediction always scales the trailing 7-day average.
pub fn predict_demand(
    blood_type: BloodType,
    horizon_days: u32,
    rng: &mut dyn RandomSource,
    now: DateTime<Utc>,
) -> DemandForecast {
    let base = baseline(blood_type);
    let history: Vec<f64> = (0..HISTORY_DAYS)
        .map(|_| (base + rng.noise(NOISE_MAGNITUDE)).round().max(0.0))
        .collect();

    let recent = &history[HISTORY_DAYS - RECENT_WINDOW..];
    let average = recent.iter().sum::<f64>() / recent.len() as f64;

    let phase = f64::from(now.ordinal()) / 365.0 * std::f64::consts::TAU;
    let seasonal = 1.0 + SEASONAL_AMPLITUDE * phase.sin();

    let predicted = (average * seasonal).round().max(0.0);
    let trend = if predicted > average {
        DemandTrend::Increasing
    } else {
        DemandTrend::Decreasing
    };

    DemandForecast {
        blood_type,
        horizon_days,
        current_demand: average.round().max(0.0) as u32,
        predicted_demand: predicted as u32,
        trend,
        confidence: 85.0 + rng.next_f64() * 10.0,
    }
}
