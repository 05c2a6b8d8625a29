//! Drives a directory-backed registry through registration, booking,
//! filtering and matching, reopening the store between steps.

use bloodline::{
    BloodType, Collection, DirectoryStore, FormFields, KeyValueStore, RecordStore, Registry,
    RequestFilter,
};
use chrono::NaiveDate;
use tempfile::TempDir;

fn open(tmp: &TempDir) -> Registry<DirectoryStore> {
    let store = DirectoryStore::new(tmp.path().join("data"));
    Registry::new(RecordStore::new(store).with_key_prefix("test_").unwrap())
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

fn request(blood_type: &str, urgency: &str, location: &str) -> FormFields {
    FormFields::new()
        .with("bloodType", blood_type)
        .with("urgency", urgency)
        .with("location", location)
}

#[test]
fn full_registration_flow() {
    let tmp = TempDir::new().unwrap();

    let mut registry = open(&tmp);
    assert!(registry.match_current_donor().is_none());

    for (blood_type, location) in [
        ("AB+", "Springfield General"),
        ("A+", "Springfield Clinic"),
        ("O-", "Springfield General"),
        ("AB+", "Shelbyville"),
    ] {
        registry
            .submit_request(&request(blood_type, "high", location))
            .unwrap();
    }

    let donor = open(&tmp)
        .register_donor(
            &FormFields::new()
                .with("name", "Ada")
                .with("contact", "555 0100")
                .with("email", "ada@example.com")
                .with("location", "springfield")
                .with("bloodType", "A-"),
        )
        .unwrap();

    let mut registry = open(&tmp);
    let (current, matches) = registry.match_current_donor().unwrap();
    assert_eq!(current, donor);
    let matched: Vec<_> = matches
        .iter()
        .map(|r| (r.blood_type, r.location.as_str()))
        .collect();
    assert_eq!(
        matched,
        [
            (BloodType::AbPos, "Springfield General"),
            (BloodType::APos, "Springfield Clinic"),
        ]
    );

    let appointment = registry
        .book_appointment(
            &FormFields::new()
                .with("donorId", donor.id.to_string())
                .with("date", "2026-10-16")
                .with("time", "18:00"),
            today(),
        )
        .unwrap();
    assert_eq!(appointment.donor_blood, BloodType::ANeg);
    assert_eq!(appointment.location, "springfield");

    let registry = open(&tmp);
    let counts = registry.counts();
    assert_eq!(counts.get(Collection::Requests), 4);
    assert_eq!(counts.get(Collection::Donors), 1);
    assert_eq!(counts.get(Collection::Appointments), 1);
    assert_eq!(registry.appointments(), [appointment]);

    let filtered = registry.filter_requests(&RequestFilter {
        blood_type: Some(BloodType::AbPos),
        location: Some("  ".to_string()),
    });
    assert_eq!(filtered.len(), 2);
}

#[test]
fn rejected_submissions_leave_storage_untouched() {
    let tmp = TempDir::new().unwrap();
    let mut registry = open(&tmp);

    let errors = registry
        .submit_request(&request("C+", "", "Springfield"))
        .unwrap_err();
    assert_eq!(errors.len(), 2);

    let errors = registry
        .book_appointment(
            &FormFields::new()
                .with("donorId", "nobody")
                .with("date", "2026-10-15")
                .with("time", "07:59"),
            today(),
        )
        .unwrap_err();
    assert_eq!(errors.len(), 3);

    assert_eq!(registry.counts().total(), 0);
    assert!(!tmp.path().join("data").exists());
}

#[test]
fn foreign_records_survive_appends() {
    let tmp = TempDir::new().unwrap();
    let mut store = DirectoryStore::new(tmp.path().join("data"));
    store
        .set(
            "test_requests",
            r#"[{"id":"legacy","bloodType":"O+","urgency":"asap","location":"Springfield","createdAt":"2026-10-01T09:00:00Z"}]"#,
        )
        .unwrap();

    let mut registry = open(&tmp);
    assert!(registry.requests().is_empty());

    registry
        .submit_request(&request("O+", "low", "Springfield"))
        .unwrap();

    let registry = open(&tmp);
    assert_eq!(registry.requests().len(), 1);
    let stored = registry.records().read_collection(Collection::Requests);
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0]["id"], "legacy");
}
