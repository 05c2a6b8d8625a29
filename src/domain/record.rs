use std::{
    fmt,
    str::FromStr,
    time::{SystemTime, UNIX_EPOCH},
};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::domain::BloodType;

/// Identifier of a stored record.
///
/// Generated from the current time plus a random suffix. Uniqueness is
/// probabilistic; collisions are not detected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generates a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis());
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!("{}{}", to_base36(millis), &suffix[..6]))
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn to_base36(mut value: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        // always < 36
        #[allow(clippy::cast_possible_truncation)]
        digits.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

/// The named collections kept in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Collection {
    /// Registered donors.
    Donors,
    /// Registered recipients.
    Recipients,
    /// Open blood requests.
    Requests,
    /// Booked donation appointments.
    Appointments,
}

impl Collection {
    /// Every collection, in display order.
    pub const ALL: [Self; 4] = [
        Self::Donors,
        Self::Recipients,
        Self::Requests,
        Self::Appointments,
    ];

    /// The fixed key the collection is stored under.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Donors => "donors",
            Self::Recipients => "recipients",
            Self::Requests => "requests",
            Self::Appointments => "appointments",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Collection {
    type Err = UnknownCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|collection| collection.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCollection(s.to_string()))
    }
}

/// Error returned when a collection name is not recognised.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown collection '{0}': expected donors, recipients, requests or appointments")]
pub struct UnknownCollection(String);

/// A record kept in one of the [`Collection`]s.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// The collection records of this type live in.
    const COLLECTION: Collection;

    /// Every field name, as serialized.
    const FIELDS: &'static [&'static str];

    /// Field names shown when no columns are requested.
    const DEFAULT_FIELDS: &'static [&'static str];

    /// The record's identifier.
    fn id(&self) -> &RecordId;

    /// A field rendered as a string, by its serialized (camelCase) name.
    ///
    /// Returns `None` for names the record does not have.
    fn field(&self, name: &str) -> Option<String>;
}

/// A registered blood donor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donor {
    /// Unique identifier.
    pub id: RecordId,
    /// Full name.
    pub name: String,
    /// Phone number.
    pub contact: String,
    /// Email address.
    pub email: String,
    /// Where the donor lives or can donate.
    pub location: String,
    /// The donor's blood type.
    pub blood_type: BloodType,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl Record for Donor {
    const COLLECTION: Collection = Collection::Donors;
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "contact",
        "email",
        "location",
        "bloodType",
        "createdAt",
    ];
    const DEFAULT_FIELDS: &'static [&'static str] =
        &["id", "name", "bloodType", "location", "contact"];

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn field(&self, name: &str) -> Option<String> {
        Some(match name {
            "id" => self.id.to_string(),
            "name" => self.name.clone(),
            "contact" => self.contact.clone(),
            "email" => self.email.clone(),
            "location" => self.location.clone(),
            "bloodType" => self.blood_type.to_string(),
            "createdAt" => self.created_at.to_rfc3339(),
            _ => return None,
        })
    }
}

/// A registered blood recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    /// Unique identifier.
    pub id: RecordId,
    /// Full name.
    pub name: String,
    /// Phone number.
    pub contact: String,
    /// Where the recipient is being treated.
    pub location: String,
    /// The recipient's blood type.
    pub blood_type: BloodType,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl Record for Recipient {
    const COLLECTION: Collection = Collection::Recipients;
    const FIELDS: &'static [&'static str] =
        &["id", "name", "contact", "location", "bloodType", "createdAt"];
    const DEFAULT_FIELDS: &'static [&'static str] =
        &["id", "name", "bloodType", "location", "contact"];

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn field(&self, name: &str) -> Option<String> {
        Some(match name {
            "id" => self.id.to_string(),
            "name" => self.name.clone(),
            "contact" => self.contact.clone(),
            "location" => self.location.clone(),
            "bloodType" => self.blood_type.to_string(),
            "createdAt" => self.created_at.to_rfc3339(),
            _ => return None,
        })
    }
}

/// How soon a request needs to be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    /// Routine.
    Low,
    /// Needed soon.
    Medium,
    /// Needed immediately.
    High,
}

impl Urgency {
    /// Every urgency level, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// The lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = UnknownUrgency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|urgency| urgency.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownUrgency(s.to_string()))
    }
}

/// Error returned when an urgency is not `low`, `medium` or `high`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown urgency '{0}': expected low, medium or high")]
pub struct UnknownUrgency(String);

/// A request for blood of a given type at a given location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Unique identifier.
    pub id: RecordId,
    /// The blood type needed.
    pub blood_type: BloodType,
    /// How soon it is needed.
    pub urgency: Urgency,
    /// Where it is needed.
    pub location: String,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

impl Record for Request {
    const COLLECTION: Collection = Collection::Requests;
    const FIELDS: &'static [&'static str] =
        &["id", "bloodType", "urgency", "location", "createdAt"];
    const DEFAULT_FIELDS: &'static [&'static str] = Self::FIELDS;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn field(&self, name: &str) -> Option<String> {
        Some(match name {
            "id" => self.id.to_string(),
            "bloodType" => self.blood_type.to_string(),
            "urgency" => self.urgency.to_string(),
            "location" => self.location.clone(),
            "createdAt" => self.created_at.to_rfc3339(),
            _ => return None,
        })
    }
}

/// A booked donation.
///
/// The donor's name, blood type and location are copied in at booking time
/// and are not kept in sync with the donor record afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Unique identifier.
    pub id: RecordId,
    /// Identifier of the donor at booking time.
    pub donor_id: RecordId,
    /// Donor name at booking time.
    pub donor_name: String,
    /// Donor blood type at booking time.
    pub donor_blood: BloodType,
    /// Donor location at booking time.
    pub location: String,
    /// Day of the appointment.
    pub date: NaiveDate,
    /// Time of the appointment.
    pub time: NaiveTime,
    /// Booking time.
    pub created_at: DateTime<Utc>,
}

impl Record for Appointment {
    const COLLECTION: Collection = Collection::Appointments;
    const FIELDS: &'static [&'static str] = &[
        "id",
        "donorId",
        "donorName",
        "donorBlood",
        "location",
        "date",
        "time",
        "createdAt",
    ];
    const DEFAULT_FIELDS: &'static [&'static str] =
        &["id", "donorName", "donorBlood", "location", "date", "time"];

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn field(&self, name: &str) -> Option<String> {
        Some(match name {
            "id" => self.id.to_string(),
            "donorId" => self.donor_id.to_string(),
            "donorName" => self.donor_name.clone(),
            "donorBlood" => self.donor_blood.to_string(),
            "location" => self.location.clone(),
            "date" => self.date.format("%Y-%m-%d").to_string(),
            "time" => self.time.format("%H:%M").to_string(),
            "createdAt" => self.created_at.to_rfc3339(),
            _ => return None,
        })
    }
}
