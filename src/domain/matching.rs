use crate::domain::{BloodType, Donor, Request};

/// Constraints for listing requests.
///
/// Absent constraints always pass. The location constraint is a
/// case-insensitive substring match against the request location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFilter {
    /// Only requests needing exactly this blood type.
    pub blood_type: Option<BloodType>,
    /// Only requests whose location contains this text.
    pub location: Option<String>,
}

impl RequestFilter {
    /// Whether any constraint is set.
    #[must_use]
    pub fn any(&self) -> bool {
        self.blood_type.is_some() || self.location().is_some()
    }

    fn location(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|location| !location.is_empty())
    }

    /// Whether a single request satisfies every constraint.
    #[must_use]
    pub fn matches(&self, request: &Request) -> bool {
        if let Some(blood_type) = self.blood_type {
            if request.blood_type != blood_type {
                return false;
            }
        }

        if let Some(location) = self.location() {
            if !contains_ignore_case(&request.location, location) {
                return false;
            }
        }

        true
    }

    /// The requests satisfying every constraint, in their original order.
    #[must_use]
    pub fn apply<'a>(&self, requests: &'a [Request]) -> Vec<&'a Request> {
        requests
            .iter()
            .filter(|request| self.matches(request))
            .collect()
    }
}

/// The outcome of matching requests against the current donor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DonorMatch<'a> {
    /// No donor has registered, so there is nobody to match for.
    NoProfile,
    /// The requests the current donor can serve.
    Matches {
        /// The donor the requests were matched against.
        donor: &'a Donor,
        /// Compatible requests near the donor, in their original order.
        requests: Vec<&'a Request>,
    },
}

/// The donor treated as "the current user".
///
/// There are no accounts, so this is simply the most recently registered
/// donor: the last record in the collection.
#[must_use]
pub fn current_donor(donors: &[Donor]) -> Option<&Donor> {
    donors.last()
}

/// Whether a donor can serve a request: compatible blood and a request
/// location containing the donor's location.
#[must_use]
pub fn can_serve(donor: &Donor, request: &Request) -> bool {
    request.blood_type.accepts(donor.blood_type)
        && contains_ignore_case(&request.location, &donor.location)
}

/// Matches requests against the current donor.
#[must_use]
pub fn match_for_donor<'a>(donors: &'a [Donor], requests: &'a [Request]) -> DonorMatch<'a> {
    let Some(donor) = current_donor(donors) else {
        return DonorMatch::NoProfile;
    };

    let requests = requests
        .iter()
        .filter(|request| can_serve(donor, request))
        .collect();

    DonorMatch::Matches { donor, requests }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_lowercase()
        .contains(&needle.trim().to_lowercase())
}
