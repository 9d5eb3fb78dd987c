//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::{HomeDetails, HostelDetails, Owner, Property};
use crate::domain::value_object::{ImageRef, PropertyKind};

/// `GET /properties?location=&type=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Public view of a listing. Exactly one of the detail blocks is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyResponse {
    pub id: Uuid,
    pub title: String,
    pub price: f64,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    pub owner: Owner,
    pub images: Vec<ImageRef>,
    pub created_by: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_details: Option<HomeDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostel_details: Option<HostelDetails>,
    pub created_at: DateTime<Utc>,
}

impl From<&Property> for PropertyResponse {
    fn from(property: &Property) -> Self {
        Self {
            id: property.property_id.into_uuid(),
            title: property.title.clone(),
            price: property.price.value(),
            location: property.location.clone(),
            kind: property.kind(),
            owner: property.owner.clone(),
            images: property.images.clone(),
            created_by: property.created_by.into_uuid(),
            home_details: property.details.home().cloned(),
            hostel_details: property.details.hostel().cloned(),
            created_at: property.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePropertyResponse {
    pub success: bool,
    pub message: String,
    pub property: PropertyResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertyListResponse {
    pub success: bool,
    pub properties: Vec<PropertyResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
