//! Turns submitted form fields into records.
//!
//! These are pure functions: they read a flat field mapping, run every
//! relevant validator, and either build the record or return all of the
//! failures together. Nothing here touches storage.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};

use crate::domain::{
    Appointment, BloodType, Donor, Recipient, RecordId, Request, Urgency, ValidationError,
    ValidationErrors,
    validate::{
        future_date, not_empty, parse_date, parse_time, time_range, valid_email, valid_phone,
    },
};

/// Submitted form values, keyed by field name.
///
/// Recognised names are `name`, `contact`, `email`, `location`,
/// `bloodType`, `urgency`, `donorId`, `date` and `time`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(HashMap<String, String>);

impl FormFields {
    /// An empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, returning the form for chaining.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a field.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_string(), value.into());
    }

    /// Sets a field only if a value is given.
    pub fn insert_opt(&mut self, name: &str, value: Option<String>) {
        if let Some(value) = value {
            self.insert(name, value);
        }
    }

    /// The raw value of a field, if submitted.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    fn text(&self, name: &str) -> String {
        self.get(name).map(str::trim).unwrap_or_default().to_string()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

fn blood_type(fields: &FormFields, name: &str) -> Result<BloodType, ValidationError> {
    not_empty(fields.get(name), "Blood type")?;
    fields
        .text(name)
        .parse()
        .map_err(|e: crate::domain::UnknownBloodType| ValidationError::Invalid {
            field: "Blood type".to_string(),
            reason: e.to_string(),
        })
}

fn urgency(fields: &FormFields) -> Result<Urgency, ValidationError> {
    not_empty(fields.get("urgency"), "Urgency")?;
    fields
        .text("urgency")
        .parse()
        .map_err(|e: crate::domain::UnknownUrgency| ValidationError::Invalid {
            field: "Urgency".to_string(),
            reason: e.to_string(),
        })
}

/// Validates a donor registration and builds the [`Donor`].
///
/// # Errors
///
/// Returns every failed check if the name, contact, email, location or blood
/// type is missing or malformed.
pub fn donor_from_fields(fields: &FormFields) -> Result<Donor, ValidationErrors> {
    let blood_type = blood_type(fields, "bloodType");

    ValidationErrors::check([
        not_empty(fields.get("name"), "Name"),
        valid_phone(fields.get("contact")),
        valid_email(fields.get("email")),
        not_empty(fields.get("location"), "Location"),
        blood_type.clone().map(drop),
    ])?;

    Ok(Donor {
        id: RecordId::generate(),
        name: fields.text("name"),
        contact: fields.text("contact"),
        email: fields.text("email"),
        location: fields.text("location"),
        blood_type: blood_type?,
        created_at: Utc::now(),
    })
}

/// Validates a recipient registration and builds the [`Recipient`].
///
/// # Errors
///
/// Returns every failed check if the name, contact, location or blood type
/// is missing or malformed.
pub fn recipient_from_fields(fields: &FormFields) -> Result<Recipient, ValidationErrors> {
    let blood_type = blood_type(fields, "bloodType");

    ValidationErrors::check([
        not_empty(fields.get("name"), "Name"),
        valid_phone(fields.get("contact")),
        not_empty(fields.get("location"), "Location"),
        blood_type.clone().map(drop),
    ])?;

    Ok(Recipient {
        id: RecordId::generate(),
        name: fields.text("name"),
        contact: fields.text("contact"),
        location: fields.text("location"),
        blood_type: blood_type?,
        created_at: Utc::now(),
    })
}

/// Validates a blood request and builds the [`Request`].
///
/// # Errors
///
/// Returns every failed check if the blood type, urgency or location is
/// missing or malformed.
pub fn request_from_fields(fields: &FormFields) -> Result<Request, ValidationErrors> {
    let blood_type = blood_type(fields, "bloodType");
    let urgency = urgency(fields);

    ValidationErrors::check([
        blood_type.clone().map(drop),
        urgency.clone().map(drop),
        not_empty(fields.get("location"), "Location"),
    ])?;

    Ok(Request {
        id: RecordId::generate(),
        blood_type: blood_type?,
        urgency: urgency?,
        location: fields.text("location"),
        created_at: Utc::now(),
    })
}

/// Validates a booking and builds the [`Appointment`].
///
/// The donor named by `donorId` is looked up in `donors` and its name, blood
/// type and location are copied into the appointment.
///
/// # Errors
///
/// Returns every failed check if the donor is missing or unknown, the date
/// is before `today`, or the time is outside opening hours.
pub fn appointment_from_fields(
    fields: &FormFields,
    donors: &[Donor],
    today: NaiveDate,
) -> Result<Appointment, ValidationErrors> {
    let donor = not_empty(fields.get("donorId"), "Donor").and_then(|()| {
        let id = fields.text("donorId");
        donors
            .iter()
            .find(|donor| donor.id.as_str() == id)
            .ok_or_else(|| ValidationError::Invalid {
                field: "Donor".to_string(),
                reason: format!("no donor with id '{id}'"),
            })
    });

    ValidationErrors::check([
        donor.clone().map(drop),
        future_date(fields.get("date"), today),
        time_range(fields.get("time")),
    ])?;

    let donor = donor?;
    Ok(Appointment {
        id: RecordId::generate(),
        donor_id: donor.id.clone(),
        donor_name: donor.name.clone(),
        donor_blood: donor.blood_type,
        location: donor.location.clone(),
        date: parse_date(fields.get("date"))?,
        time: parse_time(fields.get("time"))?,
        created_at: Utc::now(),
    })
}
