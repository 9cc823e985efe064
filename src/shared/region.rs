//! Region partitioning.
//!
//! Every record and every authenticated caller belongs to exactly one region.
//! `Region` is the closed set of valid values; `BoundRegion` is the validated
//! region a repository is bound to for the lifetime of a request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::core::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    Us,
    Uk,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Us => "US",
            Region::Uk => "UK",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "US" => Ok(Region::Us),
            "UK" => Ok(Region::Uk),
            _ => Err(AppError::Validation(
                "Region must be 'UK' or 'US'.".to_string(),
            )),
        }
    }
}

// Used by `#[sqlx(try_from = "String")]` when decoding rows
impl TryFrom<String> for Region {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// A region a repository has been bound to.
///
/// Only obtainable through [`BoundRegion::new`], so persistence code never
/// sees an invalid region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundRegion(Region);

impl BoundRegion {
    pub fn new(region: &str) -> Result<Self> {
        region.parse().map(Self)
    }

    pub fn as_str(&self) -> &'static str {
        self.0.as_str()
    }

    /// Rejects any region other than the bound one
    pub fn ensure(&self, region: Region) -> Result<()> {
        if region != self.0 {
            tracing::warn!(
                bound = %self.0,
                requested = %region,
                "Rejected cross-region repository call"
            );
            return Err(AppError::Validation(format!(
                "Region must match repository region: {}.",
                self.0
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_only_us_and_uk() {
        assert_eq!("US".parse::<Region>().unwrap(), Region::Us);
        assert_eq!("UK".parse::<Region>().unwrap(), Region::Uk);

        for invalid in ["FR", "", " ", "us", "uk", "USA", " US"] {
            assert!(
                matches!(invalid.parse::<Region>(), Err(AppError::Validation(_))),
                "{invalid:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_serde_uses_upper_case_codes() {
        assert_eq!(serde_json::to_string(&Region::Uk).unwrap(), "\"UK\"");
        let parsed: Region = serde_json::from_str("\"US\"").unwrap();
        assert_eq!(parsed, Region::Us);
        assert!(serde_json::from_str::<Region>("\"FR\"").is_err());
    }

    #[test]
    fn test_bound_region_factory_validates() {
        assert!(matches!(BoundRegion::new("FR"), Err(AppError::Validation(_))));
        assert_eq!(BoundRegion::new("UK").unwrap().as_str(), "UK");
    }

    #[test]
    fn test_bound_region_rejects_other_region() {
        let bound = BoundRegion::new("US").unwrap();
        assert!(bound.ensure(Region::Us).is_ok());

        let err = bound.ensure(Region::Uk).unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("US")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
