//! Region / oblast / city lookup entry

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A row of the place lookup table, keyed by city name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RegionCity {
    #[validate(length(min = 1, max = 100))]
    pub region: String,
    #[validate(length(min = 1, max = 100))]
    pub oblname: String,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
}

impl RegionCity {
    #[must_use]
    pub fn new(
        region: impl Into<String>,
        oblname: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            oblname: oblname.into(),
            city: city.into(),
        }
    }
}
