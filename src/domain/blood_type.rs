use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// One of the eight ABO/Rh blood types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BloodType {
    /// O negative, the universal donor.
    ONeg,
    /// O positive.
    OPos,
    /// A negative.
    ANeg,
    /// A positive.
    APos,
    /// B negative.
    BNeg,
    /// B positive.
    BPos,
    /// AB negative.
    AbNeg,
    /// AB positive, the universal recipient.
    AbPos,
}

impl BloodType {
    /// Every blood type, in the order they are offered to users.
    pub const ALL: [Self; 8] = [
        Self::ONeg,
        Self::OPos,
        Self::ANeg,
        Self::APos,
        Self::BNeg,
        Self::BPos,
        Self::AbNeg,
        Self::AbPos,
    ];

    /// The canonical label, e.g. `AB+`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ONeg => "O-",
            Self::OPos => "O+",
            Self::ANeg => "A-",
            Self::APos => "A+",
            Self::BNeg => "B-",
            Self::BPos => "B+",
            Self::AbNeg => "AB-",
            Self::AbPos => "AB+",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodType {
    type Err = UnknownBloodType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|blood_type| blood_type.as_str() == normalized)
            .ok_or_else(|| UnknownBloodType(s.to_string()))
    }
}

impl TryFrom<String> for BloodType {
    type Error = UnknownBloodType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BloodType> for String {
    fn from(blood_type: BloodType) -> Self {
        blood_type.as_str().to_string()
    }
}

/// Error returned when a string is not one of the eight blood types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown blood type '{0}': expected one of O-, O+, A-, A+, B-, B+, AB-, AB+")]
pub struct UnknownBloodType(String);
