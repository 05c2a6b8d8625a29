//! This bench test matches the current donor against a large directory-backed
//! collection of requests, including the read and parse of the collection.

#![allow(missing_docs)]

use bloodline::{BloodType, DirectoryStore, FormFields, RecordStore, Registry, RequestFilter};
use criterion::{Criterion, criterion_group, criterion_main};
use tempfile::TempDir;

const LOCATIONS: [&str; 4] = ["Springfield", "Shelbyville", "Ogdenville", "North Haverbrook"];

/// Generates a large number of requests and a handful of donors
fn preseed_registry(tmp_dir: &TempDir) -> Registry<DirectoryStore> {
    let store = DirectoryStore::new(tmp_dir.path().to_path_buf());
    let mut registry = Registry::new(RecordStore::new(store));

    for (i, blood_type) in BloodType::ALL.iter().cycle().take(500).enumerate() {
        registry
            .submit_request(
                &FormFields::new()
                    .with("bloodType", blood_type.as_str())
                    .with("urgency", "medium")
                    .with("location", LOCATIONS[i % LOCATIONS.len()]),
            )
            .unwrap();
    }

    registry
        .register_donor(
            &FormFields::new()
                .with("name", "Bench Donor")
                .with("contact", "555 0100")
                .with("email", "bench@example.com")
                .with("location", "field")
                .with("bloodType", "O+"),
        )
        .unwrap();

    registry
}

fn match_requests(c: &mut Criterion) {
    let tmp_dir = TempDir::new().unwrap();
    let registry = preseed_registry(&tmp_dir);

    c.bench_function("match current donor", |b| {
        b.iter(|| registry.match_current_donor().unwrap());
    });

    c.bench_function("filter requests", |b| {
        let filter = RequestFilter {
            blood_type: Some(BloodType::APos),
            location: Some("spring".to_string()),
        };

        b.iter(|| registry.filter_requests(&filter));
    });
}

criterion_group!(benches, match_requests);
criterion_main!(benches);
