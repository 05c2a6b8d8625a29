//! Local record keeping for blood donation coordination
//!
//! Donors, recipients, blood requests and appointments are kept as named
//! collections in a local key-value store. Requests can be filtered, or
//! matched against the most recently registered donor using the standard
//! ABO/Rh compatibility table.

pub mod domain;
pub use domain::{
    Appointment, BloodType, Collection, Config, Donor, DonorMatch, FormFields, Recipient, Record,
    RecordId, Request, RequestFilter, Urgency, ValidationError, ValidationErrors, is_compatible,
};

/// Key-value stores and the record store layered over them.
pub mod storage;
pub use storage::{DirectoryStore, KeyValueStore, MemoryStore, RecordStore, StoreError};

mod registry;
pub use registry::{Counts, Registry};
