//! Domain Value Objects
//!
//! Immutable value types for the listing domain.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{PropertyError, PropertyResult};

/// Discriminates which detail block a listing carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    #[display("home")]
    Home,
    #[display("hostel")]
    Hostel,
}

impl PropertyKind {
    /// Trimmed, case-insensitive; `None` for anything else
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("home") {
            Some(Self::Home)
        } else if input.eq_ignore_ascii_case("hostel") {
            Some(Self::Hostel)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Hostel => "hostel",
        }
    }
}

impl FromStr for PropertyKind {
    type Err = PropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
            .ok_or_else(|| PropertyError::Validation("Type must be either home or hostel".into()))
    }
}

/// Number of occupants sharing a hostel room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SharedBy {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4+")]
    FourPlus,
}

impl SharedBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::One => "1",
            Self::Two => "2",
            Self::Three => "3",
            Self::FourPlus => "4+",
        }
    }
}

impl FromStr for SharedBy {
    type Err = PropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::One),
            "2" => Ok(Self::Two),
            "3" => Ok(Self::Three),
            "4+" => Ok(Self::FourPlus),
            _ => Err(PropertyError::Validation(
                "Shared by must be one of 1, 2, 3 or 4+".into(),
            )),
        }
    }
}

/// Finite, non-negative asking price
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> PropertyResult<Self> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(PropertyError::Validation(
                "Price must be a non-negative number".into(),
            ))
        }
    }

    /// Parses the form value; blank input counts as missing
    pub fn parse(input: &str) -> PropertyResult<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(PropertyError::Validation("Price is required".into()));
        }
        let value = input.parse::<f64>().map_err(|_| {
            PropertyError::Validation("Price must be a non-negative number".into())
        })?;
        Self::new(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Public path of a stored image, e.g. `/uploads/1700000000000-ab12...-front.jpg`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(url_prefix: &str, file_name: &str) -> Self {
        Self(format!("{}/{}", url_prefix.trim_end_matches('/'), file_name))
    }

    pub fn from_db(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Last path segment
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Listing query: location substring and/or kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyFilter {
    location: Option<String>,
    kind: Option<PropertyKind>,
}

impl PropertyFilter {
    /// Blank locations and unknown kinds are dropped instead of rejected.
    pub fn new(location: Option<&str>, kind: Option<&str>) -> Self {
        let location = location
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string);
        let kind = kind.and_then(PropertyKind::parse);
        Self { location, kind }
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn kind(&self) -> Option<PropertyKind> {
        self.kind
    }

    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.kind.is_none()
    }

    /// Case-insensitive, unanchored location match plus exact kind match
    pub fn matches(&self, location: &str, kind: PropertyKind) -> bool {
        let location_ok = self
            .location
            .as_ref()
            .is_none_or(|needle| location.to_lowercase().contains(&needle.to_lowercase()));
        let kind_ok = self.kind.is_none_or(|k| k == kind);
        location_ok && kind_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse() {
        assert_eq!(PropertyKind::parse("home"), Some(PropertyKind::Home));
        assert_eq!(PropertyKind::parse(" HOSTEL "), Some(PropertyKind::Hostel));
        assert_eq!(PropertyKind::parse("villa"), None);
        assert!("villa".parse::<PropertyKind>().is_err());
        assert_eq!(PropertyKind::Hostel.to_string(), "hostel");
    }

    #[test]
    fn test_shared_by() {
        assert_eq!("4+".parse::<SharedBy>().unwrap(), SharedBy::FourPlus);
        assert_eq!("2".parse::<SharedBy>().unwrap().as_str(), "2");
        assert!("5".parse::<SharedBy>().is_err());
        assert_eq!(serde_json::to_string(&SharedBy::FourPlus).unwrap(), "\"4+\"");
    }

    #[test]
    fn test_price() {
        assert_eq!(Price::parse(" 1500.5 ").unwrap().value(), 1500.5);
        assert_eq!(Price::parse("0").unwrap().value(), 0.0);
        assert!(Price::parse("-1").is_err());
        assert!(Price::parse("NaN").is_err());
        assert!(Price::parse("inf").is_err());
        assert!(Price::parse("").is_err());
        assert!(Price::parse("cheap").is_err());
    }

    #[test]
    fn test_image_ref() {
        let image = ImageRef::new("/uploads/", "1-ab-front.jpg");
        assert_eq!(image.as_str(), "/uploads/1-ab-front.jpg");
        assert_eq!(image.file_name(), "1-ab-front.jpg");
    }

    #[test]
    fn test_filter_location_substring() {
        let filter = PropertyFilter::new(Some("  park "), None);
        assert!(filter.matches("Forest Park Lane", PropertyKind::Home));
        assert!(filter.matches("PARKSIDE", PropertyKind::Hostel));
        assert!(!filter.matches("Downtown", PropertyKind::Home));
    }

    #[test]
    fn test_filter_kind_and_invalid_values() {
        let filter = PropertyFilter::new(None, Some("Hostel"));
        assert!(filter.matches("Anywhere", PropertyKind::Hostel));
        assert!(!filter.matches("Anywhere", PropertyKind::Home));

        let ignored = PropertyFilter::new(Some("   "), Some("castle"));
        assert!(ignored.is_empty());
        assert!(ignored.matches("Anywhere", PropertyKind::Home));
    }
}
