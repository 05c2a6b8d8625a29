//! Domain models for blood donation coordination.
//!
//! This module contains the record types, the blood type compatibility
//! table, field validation, form submission and request matching.

/// ABO/Rh blood types.
pub mod blood_type;
pub use blood_type::{BloodType, UnknownBloodType};

mod compatibility;
pub use compatibility::is_compatible;

mod config;
pub use config::Config;

/// Pure submission handlers turning form fields into records.
pub mod form;
pub use form::FormFields;

/// Request filtering and donor matching.
pub mod matching;
pub use matching::{DonorMatch, RequestFilter};

/// Persisted record types.
pub mod record;
pub use record::{
    Appointment, Collection, Donor, Recipient, Record, RecordId, Request, UnknownCollection,
    UnknownUrgency, Urgency,
};

/// Field validators.
pub mod validate;
pub use validate::{ValidationError, ValidationErrors};
