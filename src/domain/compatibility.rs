//! Red cell transfusion compatibility.

use super::BloodType;

impl BloodType {
    /// The donor blood types a recipient of this type may receive from.
    #[must_use]
    pub const fn accepted_donors(self) -> &'static [Self] {
        use BloodType::{ANeg, APos, AbNeg, AbPos, BNeg, BPos, ONeg, OPos};

        match self {
            ONeg => &[ONeg],
            OPos => &[OPos, ONeg],
            ANeg => &[ANeg, ONeg],
            APos => &[APos, ANeg, OPos, ONeg],
            BNeg => &[BNeg, ONeg],
            BPos => &[BPos, BNeg, OPos, ONeg],
            AbNeg => &[AbNeg, ANeg, BNeg, ONeg],
            AbPos => &[AbPos, AbNeg, APos, ANeg, BPos, BNeg, OPos, ONeg],
        }
    }

    /// Whether a recipient of this type can receive blood from `donor`.
    #[must_use]
    pub fn accepts(self, donor: Self) -> bool {
        self.accepted_donors().contains(&donor)
    }
}

/// Checks whether a donor may give to a request, both given as labels.
///
/// An unrecognised request type accepts nothing, and an unrecognised donor
/// type is never accepted.
#[must_use]
pub fn is_compatible(request_blood_type: &str, donor_blood_type: &str) -> bool {
    let Ok(request) = request_blood_type.parse::<BloodType>() else {
        return false;
    };
    donor_blood_type
        .parse::<BloodType>()
        .is_ok_and(|donor| request.accepts(donor))
}

#[cfg(test)]
mod tests {
    use super::is_compatible;
    use crate::BloodType;

    #[test]
    fn every_type_accepts_itself() {
        for blood_type in BloodType::ALL {
            assert!(blood_type.accepts(blood_type), "{blood_type}");
        }
    }

    #[test]
    fn o_negative_gives_to_everyone() {
        for blood_type in BloodType::ALL {
            assert!(blood_type.accepts(BloodType::ONeg), "{blood_type}");
        }
    }

    #[test]
    fn ab_positive_receives_from_everyone() {
        for donor in BloodType::ALL {
            assert!(BloodType::AbPos.accepts(donor), "{donor}");
        }
    }

    #[test]
    fn table_is_checked_literally() {
        assert!(is_compatible("AB+", "O-"));
        assert!(!is_compatible("O-", "A+"));
        assert!(is_compatible("A+", "O+"));
        assert!(!is_compatible("A-", "O+"));
        assert!(is_compatible("AB-", "B-"));
        assert!(!is_compatible("AB-", "AB+"));
        assert!(!is_compatible("B+", "A+"));
    }

    #[test]
    fn accepted_set_sizes() {
        let sizes: Vec<usize> = BloodType::ALL
            .into_iter()
            .map(|blood_type| blood_type.accepted_donors().len())
            .collect();
        assert_eq!(sizes, [1, 2, 2, 4, 2, 4, 4, 8]);
    }

    #[test]
    fn unknown_types_fail_closed() {
        assert!(!is_compatible("unknown-type", "O-"));
        assert!(!is_compatible("AB+", "unknown-type"));
        assert!(!is_compatible("", ""));
    }
}
