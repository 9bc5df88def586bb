//! Field validators for experts and places
//!
//! Names and place names are checked against fixed Cyrillic patterns:
//!
//! - expert name: a capitalized surname followed by two capitalized initials,
//!   e.g. `Иванов И.И.`
//! - region, oblast and city: Cyrillic letters and hyphens only
//!
//! The validators are pure: they take a candidate record, return `bool` and
//! never panic. Empty strings never match.
//!
//! Patterns are anchored at both ends and must cover the whole input. A
//! trailing newline is therefore rejected, as is any other trailing
//! character: `"Иванов И.И.\n"` is not a valid name.

use std::sync::LazyLock;

use regex::Regex;
use validator::Validate;

use crate::{
    entities::{Expert, NewExpert, RegionCity},
    errors::DomainError,
};

static EXPERT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Infallible with a valid static pattern
    Regex::new(r"^[А-ЯЁ][а-яё]+\s[А-ЯЁ]\.[А-ЯЁ]\.$").expect("Invalid expert name pattern")
});

static PLACE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Infallible with a valid static pattern
    Regex::new(r"^[А-Яа-яЁё\-]+$").expect("Invalid place name pattern")
});

/// Check an expert display name such as `Иванов И.И.`
pub fn is_valid_expert_name(name: &str) -> bool {
    EXPERT_NAME.is_match(name)
}

/// Check a region, oblast or city name
pub fn is_valid_place_name(name: &str) -> bool {
    PLACE_NAME.is_match(name)
}

fn expert_fields_valid(name: &str, region: &str, city: &str) -> bool {
    is_valid_expert_name(name) && is_valid_place_name(region) && is_valid_place_name(city)
}

/// Validate a persisted expert's name, region and city
pub fn validate_expert(expert: &Expert) -> bool {
    expert_fields_valid(&expert.name, &expert.region, &expert.city)
}

/// Validate a draft expert's name, region and city
pub fn validate_new_expert(expert: &NewExpert) -> bool {
    expert_fields_valid(&expert.name, &expert.region, &expert.city)
}

/// Validate region, oblast and city of a place
pub fn validate_region_city(place: &RegionCity) -> bool {
    is_valid_place_name(&place.region)
        && is_valid_place_name(&place.oblname)
        && is_valid_place_name(&place.city)
}

/// Check a record's declared field constraints (lengths, ranges)
pub fn validate_record<T: Validate>(record: &T, what: &str) -> Result<(), DomainError> {
    record
        .validate()
        .map_err(|e| DomainError::ValidationError(format!("Invalid {what} data: {e}")))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{ExpertId, GrntiAssignmentDraft};

    fn draft(name: &str, region: &str, city: &str) -> NewExpert {
        NewExpert::new(
            name,
            region,
            city,
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        )
    }

    #[test]
    fn accepts_canonical_expert() {
        assert!(validate_new_expert(&draft("Иванов И.И.", "Москва", "Москва")));
    }

    #[test]
    fn accepts_yo_and_hyphens() {
        assert!(validate_new_expert(&draft(
            "Ёлкин А.Ё.",
            "Ханты-Мансийский",
            "Ростов-на-Дону"
        )));
    }

    #[test]
    fn rejects_latin_name() {
        assert!(!validate_new_expert(&draft("ivanov I.I.", "Москва", "Москва")));
    }

    #[test]
    fn rejects_lowercase_surname() {
        assert!(!is_valid_expert_name("иванов И.И."));
    }

    #[test]
    fn rejects_single_initial() {
        assert!(!is_valid_expert_name("Иванов И."));
    }

    #[test]
    fn rejects_missing_space() {
        assert!(!is_valid_expert_name("ИвановИ.И."));
    }

    #[test]
    fn rejects_trailing_newline() {
        assert!(!is_valid_expert_name("Иванов И.И.\n"));
        assert!(!is_valid_place_name("Москва\n"));
    }

    #[test]
    fn rejects_place_with_digits_or_spaces() {
        assert!(!is_valid_place_name("Москва 1"));
        assert!(!is_valid_place_name("Нижний Новгород"));
    }

    #[test]
    fn empty_strings_fail() {
        assert!(!is_valid_expert_name(""));
        assert!(!is_valid_place_name(""));
    }

    #[test]
    fn persisted_expert_uses_same_rules() {
        let expert = draft("Сидоров С.С.", "Москва", "Moscow").into_expert(ExpertId::new(1));
        assert!(!validate_expert(&expert));
    }

    #[test]
    fn region_city_requires_all_three() {
        assert!(validate_region_city(&RegionCity::new(
            "Поволжье",
            "Татарстан",
            "Казань"
        )));
        assert!(!validate_region_city(&RegionCity::new(
            "Поволжье",
            "Tatarstan",
            "Казань"
        )));
        assert!(!validate_region_city(&RegionCity::new("", "Татарстан", "Казань")));
    }

    #[test]
    fn validate_record_maps_to_domain_error() {
        let err = validate_record(&GrntiAssignmentDraft::new(150, 0, 0), "GRNTI").unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(msg) if msg.starts_with("Invalid GRNTI data")));
    }
}
