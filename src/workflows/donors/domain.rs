use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for registered donors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DonorId(pub String);

impl fmt::Display for DonorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The eight ABO/Rh blood groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BloodType {
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
}

impl BloodType {
    pub const ALL: [BloodType; 8] = [
        BloodType::OPositive,
        BloodType::ONegative,
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB-",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parse failure for a blood-type label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown blood type '{0}'")]
pub struct ParseBloodTypeError(pub String);

impl FromStr for BloodType {
    type Err = ParseBloodTypeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "O+" => Ok(BloodType::OPositive),
            "O-" => Ok(BloodType::ONegative),
            "A+" => Ok(BloodType::APositive),
            "A-" => Ok(BloodType::ANegative),
            "B+" => Ok(BloodType::BPositive),
            "B-" => Ok(BloodType::BNegative),
            "AB+" => Ok(BloodType::AbPositive),
            "AB-" => Ok(BloodType::AbNegative),
            _ => Err(ParseBloodTypeError(raw.to_string())),
        }
    }
}

/// Coarse bucket for how long ago a donor last gave blood. Used as a scoring
/// and eligibility signal instead of an exact date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationRecency {
    Never,
    #[serde(rename = "3months")]
    ThreeMonths,
    #[serde(rename = "6months")]
    SixMonths,
    #[serde(rename = "1year")]
    OneYear,
    Longer,
}

impl DonationRecency {
    pub fn label(&self) -> &'static str {
        match self {
            DonationRecency::Never => "never",
            DonationRecency::ThreeMonths => "3months",
            DonationRecency::SixMonths => "6months",
            DonationRecency::OneYear => "1year",
            DonationRecency::Longer => "longer",
        }
    }
}

/// Registry status of a donor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonorStatus {
    Active,
    Inactive,
}

impl DonorStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DonorStatus::Active => "active",
            DonorStatus::Inactive => "inactive",
        }
    }
}

/// Requested urgency for a blood request or match search. Accepted by the
/// matcher but not yet weighted into scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

/// A registered donor record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donor {
    pub id: DonorId,
    pub name: String,
    pub email: String,
    pub blood_type: BloodType,
    pub phone: String,
    pub age: u8,
    pub weight_kg: f32,
    pub city: String,
    pub last_donation: DonationRecency,
    pub registered_at: DateTime<Utc>,
    pub status: DonorStatus,
}

/// Registration payload; the store assigns id, timestamp, and status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonorRegistration {
    pub name: String,
    pub email: String,
    pub blood_type: BloodType,
    pub phone: String,
    pub age: u8,
    pub weight_kg: f32,
    pub city: String,
    pub last_donation: DonationRecency,
}

/// Field-level partial update; provided fields overwrite the stored record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DonorPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<BloodType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_donation: Option<DonationRecency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DonorStatus>,
}

impl DonorPatch {
    pub fn apply(self, donor: &mut Donor) {
        if let Some(name) = self.name {
            donor.name = name;
        }
        if let Some(email) = self.email {
            donor.email = email;
        }
        if let Some(blood_type) = self.blood_type {
            donor.blood_type = blood_type;
        }
        if let Some(phone) = self.phone {
            donor.phone = phone;
        }
        if let Some(age) = self.age {
            donor.age = age;
        }
        if let Some(weight_kg) = self.weight_kg {
            donor.weight_kg = weight_kg;
        }
        if let Some(city) = self.city {
            donor.city = city;
        }
        if let Some(last_donation) = self.last_donation {
            donor.last_donation = last_donation;
        }
        if let Some(status) = self.status {
            donor.status = status;
        }
    }
}

/// A recorded request for blood units. Kept in the data model for dashboard
/// symmetry; the matching heuristics do not consume it yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodRequest {
    pub id: String,
    pub blood_type: BloodType,
    pub units: u32,
    pub urgency: Urgency,
    pub city: String,
    pub requested_at: DateTime<Utc>,
}

/// Per-type unit counts. All eight blood-type keys are always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory(BTreeMap<BloodType, u32>);

impl Inventory {
    /// Empty inventory with every blood type at zero units.
    pub fn zeroed() -> Self {
        Self(BloodType::ALL.iter().map(|bt| (*bt, 0)).collect())
    }

    pub fn units(&self, blood_type: BloodType) -> u32 {
        self.0.get(&blood_type).copied().unwrap_or(0)
    }

    pub fn set_units(&mut self, blood_type: BloodType, units: u32) {
        self.0.insert(blood_type, units);
    }

    pub fn iter(&self) -> impl Iterator<Item = (BloodType, u32)> + '_ {
        self.0.iter().map(|(bt, units)| (*bt, *units))
    }

    /// Reinstates missing keys after a load from persistence, so the all-keys
    /// invariant holds even for hand-edited data files.
    pub fn normalize(&mut self) {
        for blood_type in BloodType::ALL {
            self.0.entry(blood_type).or_insert(0);
        }
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::zeroed()
    }
}
