//! The registry service
//!
//! [`Registry`] ties form submission to the record store. It is built once
//! and handed to whatever drives it; there is no global state.

use chrono::NaiveDate;

use crate::{
    domain::{
        Appointment, Collection, Donor, DonorMatch, FormFields, Recipient, Record, Request,
        RequestFilter, ValidationErrors, form, matching,
    },
    storage::{KeyValueStore, RecordStore},
};

/// Record counts per collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct Counts {
    /// Registered donors.
    pub donors: usize,
    /// Registered recipients.
    pub recipients: usize,
    /// Submitted requests.
    pub requests: usize,
    /// Booked appointments.
    pub appointments: usize,
}

impl Counts {
    /// The count for one collection.
    #[must_use]
    pub const fn get(&self, collection: Collection) -> usize {
        match collection {
            Collection::Donors => self.donors,
            Collection::Recipients => self.recipients,
            Collection::Requests => self.requests,
            Collection::Appointments => self.appointments,
        }
    }

    /// The total number of records.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.donors + self.recipients + self.requests + self.appointments
    }
}

/// Registration, booking and request matching over a record store.
#[derive(Debug, Clone)]
pub struct Registry<S> {
    records: RecordStore<S>,
}

impl<S: KeyValueStore> Registry<S> {
    /// Builds a registry over a record store.
    #[must_use]
    pub const fn new(records: RecordStore<S>) -> Self {
        Self { records }
    }

    /// The underlying record store.
    #[must_use]
    pub const fn records(&self) -> &RecordStore<S> {
        &self.records
    }

    /// Validates and stores a donor registration.
    ///
    /// # Errors
    ///
    /// Returns the validation failures; nothing is stored in that case.
    pub fn register_donor(&mut self, fields: &FormFields) -> Result<Donor, ValidationErrors> {
        let donor = form::donor_from_fields(fields)?;
        self.records.append(donor.clone());
        Ok(donor)
    }

    /// Validates and stores a recipient registration.
    ///
    /// # Errors
    ///
    /// Returns the validation failures; nothing is stored in that case.
    pub fn register_recipient(
        &mut self,
        fields: &FormFields,
    ) -> Result<Recipient, ValidationErrors> {
        let recipient = form::recipient_from_fields(fields)?;
        self.records.append(recipient.clone());
        Ok(recipient)
    }

    /// Validates and stores a blood request.
    ///
    /// # Errors
    ///
    /// Returns the validation failures; nothing is stored in that case.
    pub fn submit_request(&mut self, fields: &FormFields) -> Result<Request, ValidationErrors> {
        let request = form::request_from_fields(fields)?;
        self.records.append(request.clone());
        Ok(request)
    }

    /// Validates and stores an appointment for a registered donor.
    ///
    /// Dates before `today` are rejected.
    ///
    /// # Errors
    ///
    /// Returns the validation failures; nothing is stored in that case.
    pub fn book_appointment(
        &mut self,
        fields: &FormFields,
        today: NaiveDate,
    ) -> Result<Appointment, ValidationErrors> {
        let donors = self.donors();
        let appointment = form::appointment_from_fields(fields, &donors, today)?;
        self.records.append(appointment.clone());
        Ok(appointment)
    }

    /// Every record of type `R`, in registration order.
    #[must_use]
    pub fn all<R: Record>(&self) -> Vec<R> {
        self.records.read()
    }

    /// Every registered donor.
    #[must_use]
    pub fn donors(&self) -> Vec<Donor> {
        self.all()
    }

    /// Every registered recipient.
    #[must_use]
    pub fn recipients(&self) -> Vec<Recipient> {
        self.all()
    }

    /// Every submitted request.
    #[must_use]
    pub fn requests(&self) -> Vec<Request> {
        self.all()
    }

    /// Every booked appointment.
    #[must_use]
    pub fn appointments(&self) -> Vec<Appointment> {
        self.all()
    }

    /// The requests satisfying `filter`, in submission order.
    #[must_use]
    pub fn filter_requests(&self, filter: &RequestFilter) -> Vec<Request> {
        filter
            .apply(&self.requests())
            .into_iter()
            .cloned()
            .collect()
    }

    /// Matches requests against the most recently registered donor.
    ///
    /// Returns `None` when no donor has registered.
    #[must_use]
    pub fn match_current_donor(&self) -> Option<(Donor, Vec<Request>)> {
        let donors = self.donors();
        let requests = self.requests();

        match matching::match_for_donor(&donors, &requests) {
            DonorMatch::NoProfile => None,
            DonorMatch::Matches { donor, requests } => {
                Some((donor.clone(), requests.into_iter().cloned().collect()))
            }
        }
    }

    /// Record counts per collection.
    #[must_use]
    pub fn counts(&self) -> Counts {
        Counts {
            donors: self.donors().len(),
            recipients: self.recipients().len(),
            requests: self.requests().len(),
            appointments: self.appointments().len(),
        }
    }
}
