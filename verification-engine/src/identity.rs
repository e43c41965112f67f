//! Identity payload validation
//!
//! The age gate runs here, server-side, before a request is ever queued:
//! nobody under 18 reaches the reviewing operator.

use crate::error::{Error, Result};
use crate::types::{IdentityPayload, RedactedIdentity};
use account_core::ProfileKind;
use chrono::{Datelike, NaiveDate};

/// Completed age in whole years on the given date
///
/// Someone turning 18 today is 18: the month/day comparison is inclusive.
pub fn age_on(date_of_birth: NaiveDate, on: NaiveDate) -> i32 {
    let mut age = on.year() - date_of_birth.year();
    if (on.month(), on.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

/// Validate an identity payload for the given profile kind
///
/// Checks party count, field completeness, and the hard age gate. Any party
/// under 18 fails the whole submission.
pub fn validate(kind: ProfileKind, payload: &IdentityPayload, today: NaiveDate) -> Result<()> {
    let expected = kind.party_count();
    if payload.parties.len() != expected {
        return Err(Error::InvalidPayload(format!(
            "{} profile requires {} identity part{}, got {}",
            kind,
            expected,
            if expected == 1 { "y" } else { "ies" },
            payload.parties.len()
        )));
    }

    for party in &payload.parties {
        if party.full_name.trim().is_empty()
            || party.id_number.trim().is_empty()
            || party.id_document_ref.trim().is_empty()
        {
            return Err(Error::InvalidPayload(
                "every party needs a full name, ID number, and ID document".to_string(),
            ));
        }

        let age = age_on(party.date_of_birth, today);
        if age < 18 {
            return Err(Error::Underage { age });
        }
    }

    Ok(())
}

/// Strip a payload down to what the risk oracle is allowed to see
pub fn redact(kind: ProfileKind, payload: &IdentityPayload, today: NaiveDate) -> RedactedIdentity {
    RedactedIdentity {
        profile_kind: kind.as_str().to_string(),
        party_ages: payload
            .parties
            .iter()
            .map(|p| age_on(p.date_of_birth, today))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IdentityParty;

    fn party(dob: NaiveDate) -> IdentityParty {
        IdentityParty {
            full_name: "Ana López".to_string(),
            date_of_birth: dob,
            id_document_ref: "doc://id/123".to_string(),
            id_number: "X-1234567".to_string(),
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_counts_completed_years() {
        let dob = ymd(2000, 6, 15);
        assert_eq!(age_on(dob, ymd(2018, 6, 14)), 17);
        assert_eq!(age_on(dob, ymd(2018, 6, 15)), 18);
        assert_eq!(age_on(dob, ymd(2018, 6, 16)), 18);
    }

    #[test]
    fn test_eighteenth_birthday_today_passes() {
        let today = ymd(2026, 3, 10);
        let payload = IdentityPayload {
            parties: vec![party(ymd(2008, 3, 10))],
        };
        assert!(validate(ProfileKind::Individual, &payload, today).is_ok());
    }

    #[test]
    fn test_seventeen_is_rejected() {
        let today = ymd(2026, 3, 10);
        let payload = IdentityPayload {
            parties: vec![party(ymd(2008, 3, 11))],
        };
        let err = validate(ProfileKind::Individual, &payload, today).unwrap_err();
        assert!(matches!(err, Error::Underage { age: 17 }));
    }

    #[test]
    fn test_couple_requires_two_parties_and_both_adult() {
        let today = ymd(2026, 1, 1);
        let adult = party(ymd(1990, 5, 5));
        let minor = party(ymd(2010, 5, 5));

        let one_party = IdentityPayload {
            parties: vec![adult.clone()],
        };
        assert!(matches!(
            validate(ProfileKind::Couple, &one_party, today),
            Err(Error::InvalidPayload(_))
        ));

        let mixed = IdentityPayload {
            parties: vec![adult, minor],
        };
        assert!(matches!(
            validate(ProfileKind::Couple, &mixed, today),
            Err(Error::Underage { .. })
        ));
    }

    #[test]
    fn test_blank_fields_rejected() {
        let today = ymd(2026, 1, 1);
        let mut p = party(ymd(1990, 5, 5));
        p.id_number = "  ".to_string();
        let payload = IdentityPayload { parties: vec![p] };
        assert!(matches!(
            validate(ProfileKind::Individual, &payload, today),
            Err(Error::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_redaction_drops_all_identifiers() {
        let today = ymd(2026, 1, 1);
        let payload = IdentityPayload {
            parties: vec![party(ymd(1990, 5, 5))],
        };
        let redacted = redact(ProfileKind::Individual, &payload, today);

        assert_eq!(redacted.party_ages, vec![35]);
        let json = serde_json::to_string(&redacted).unwrap();
        assert!(!json.contains("Ana"));
        assert!(!json.contains("X-1234567"));
        assert!(!json.contains("doc://"));
    }
}
