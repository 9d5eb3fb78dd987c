//! Domain Entities
//!
//! A listing is a home or a hostel. The kind decides which detail block is
//! present; the two blocks never coexist.

use chrono::{DateTime, Utc};
use kernel::id::{PropertyId, UserId};
use serde::{Deserialize, Serialize};

use crate::domain::value_object::{ImageRef, Price, PropertyKind, SharedBy};
use crate::error::{PropertyError, PropertyResult};

/// Listing contact, both parts required
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub name: String,
    pub contact: String,
}

impl Owner {
    pub fn new(name: &str, contact: &str) -> PropertyResult<Self> {
        let name = name.trim();
        let contact = contact.trim();
        if name.is_empty() {
            return Err(PropertyError::Validation("Owner name is required".into()));
        }
        if contact.is_empty() {
            return Err(PropertyError::Validation("Owner contact is required".into()));
        }
        Ok(Self {
            name: name.to_string(),
            contact: contact.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parking {
    pub car: bool,
    pub bike: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Facilities {
    pub food: bool,
    pub wifi: bool,
    pub transport: bool,
    pub laundry: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeDetails {
    /// Apartment, villa, ...
    pub property_type: Option<String>,
    pub facing: Option<String>,
    pub floor: Option<String>,
    pub carpet_area: Option<String>,
    pub parking: Parking,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostelDetails {
    pub shared_by: Option<SharedBy>,
    pub facilities: Facilities,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyDetails {
    Home(HomeDetails),
    Hostel(HostelDetails),
}

impl PropertyDetails {
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Home(_) => PropertyKind::Home,
            Self::Hostel(_) => PropertyKind::Hostel,
        }
    }

    pub fn home(&self) -> Option<&HomeDetails> {
        match self {
            Self::Home(details) => Some(details),
            Self::Hostel(_) => None,
        }
    }

    pub fn hostel(&self) -> Option<&HostelDetails> {
        match self {
            Self::Hostel(details) => Some(details),
            Self::Home(_) => None,
        }
    }
}

/// Property listing
#[derive(Debug, Clone)]
pub struct Property {
    pub property_id: PropertyId,
    pub title: String,
    pub price: Price,
    pub location: String,
    pub owner: Owner,
    /// In upload order
    pub images: Vec<ImageRef>,
    pub created_by: UserId,
    pub details: PropertyDetails,
    pub created_at: DateTime<Utc>,
}

impl Property {
    pub fn new(
        title: String,
        price: Price,
        location: String,
        owner: Owner,
        details: PropertyDetails,
        images: Vec<ImageRef>,
        created_by: UserId,
    ) -> Self {
        Self {
            property_id: PropertyId::new(),
            title,
            price,
            location,
            owner,
            images,
            created_by,
            details,
            created_at: Utc::now(),
        }
    }

    pub fn kind(&self) -> PropertyKind {
        self.details.kind()
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.created_by == *user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_requires_both_parts() {
        assert!(Owner::new("Bob", "555-0101").is_ok());
        assert!(Owner::new(" ", "555-0101").is_err());
        assert!(Owner::new("Bob", "").is_err());
    }

    #[test]
    fn test_details_kind() {
        let home = PropertyDetails::Home(HomeDetails::default());
        assert_eq!(home.kind(), PropertyKind::Home);
        assert!(home.hostel().is_none());

        let hostel = PropertyDetails::Hostel(HostelDetails::default());
        assert_eq!(hostel.kind(), PropertyKind::Hostel);
        assert!(hostel.home().is_none());
    }

    #[test]
    fn test_partial_flag_objects_default_to_false() {
        let parking: Parking = serde_json::from_str(r#"{"car":true}"#).unwrap();
        assert_eq!(parking, Parking { car: true, bike: false });

        let facilities: Facilities = serde_json::from_str(r#"{"wifi":true}"#).unwrap();
        assert!(facilities.wifi && !facilities.food);
    }

    #[test]
    fn test_ownership() {
        let owner = UserId::new();
        let property = Property::new(
            "Flat".into(),
            Price::new(10.0).unwrap(),
            "Forest Park Lane".into(),
            Owner::new("Bob", "555").unwrap(),
            PropertyDetails::Home(HomeDetails::default()),
            vec![],
            owner,
        );
        assert!(property.is_owned_by(&owner));
        assert!(!property.is_owned_by(&UserId::new()));
    }
}
