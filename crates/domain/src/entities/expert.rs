//! Expert entity
//!
//! An expert is stored with a store-assigned id. Before the first insert the
//! same fields travel as a [`NewExpert`], which has no id at all.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::value_objects::ExpertId;

/// A persisted expert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Expert {
    /// Store-assigned identifier
    pub id: ExpertId,
    /// Display name, e.g. "Иванов И.И."
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    /// Region name
    #[validate(length(min = 1, max = 50))]
    pub region: String,
    /// City name
    #[validate(length(min = 1, max = 50))]
    pub city: String,
    /// Date the expert was entered
    pub input_date: NaiveDate,
    /// Free-text keywords
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub keywords: Option<String>,
    /// Number of expert groups the expert took part in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub group_count: Option<i32>,
}

/// An expert that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewExpert {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub region: String,
    #[validate(length(min = 1, max = 50))]
    pub city: String,
    pub input_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub keywords: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub group_count: Option<i32>,
}

impl NewExpert {
    /// Create a draft with the required fields
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        region: impl Into<String>,
        city: impl Into<String>,
        input_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
            city: city.into(),
            input_date,
            keywords: None,
            group_count: None,
        }
    }

    /// Attach keywords
    #[must_use]
    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    /// Attach a group count
    #[must_use]
    pub const fn with_group_count(mut self, group_count: i32) -> Self {
        self.group_count = Some(group_count);
        self
    }

    /// Bind the draft to a store-assigned id
    #[must_use]
    pub fn into_expert(self, id: ExpertId) -> Expert {
        Expert {
            id,
            name: self.name,
            region: self.region,
            city: self.city,
            input_date: self.input_date,
            keywords: self.keywords,
            group_count: self.group_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn into_expert_keeps_fields() {
        let draft = NewExpert::new("Иванов И.И.", "Москва", "Москва", date())
            .with_keywords("физика")
            .with_group_count(2);
        let expert = draft.clone().into_expert(ExpertId::new(7));

        assert_eq!(expert.id, ExpertId::new(7));
        assert_eq!(expert.name, draft.name);
        assert_eq!(expert.keywords.as_deref(), Some("физика"));
        assert_eq!(expert.group_count, Some(2));
    }

    #[test]
    fn empty_name_violates_length() {
        let draft = NewExpert::new("", "Москва", "Москва", date());
        assert!(draft.validate().is_err());
    }

    #[test]
    fn long_city_violates_length() {
        let draft = NewExpert::new("Иванов И.И.", "Москва", "Я".repeat(51), date());
        assert!(draft.validate().is_err());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 50 Cyrillic letters are 100 bytes in UTF-8
        let draft = NewExpert::new("Иванов И.И.", "Москва", "Я".repeat(50), date());
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn negative_group_count_rejected() {
        let draft = NewExpert::new("Иванов И.И.", "Москва", "Москва", date()).with_group_count(-1);
        assert!(draft.validate().is_err());
    }

    #[test]
    fn optional_fields_are_omitted_from_json() {
        let expert = NewExpert::new("Иванов И.И.", "Москва", "Москва", date())
            .into_expert(ExpertId::new(1));
        let json = serde_json::to_value(&expert).unwrap();
        assert_eq!(json["input_date"], "2024-03-15");
        assert!(json.get("keywords").is_none());
    }
}
