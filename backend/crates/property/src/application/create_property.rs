//! Create Property Use Case
//!
//! Validates the form, stores the images, then persists the record. Images
//! stored for a request that ultimately fails are removed again.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::cleanup::discard_images;
use crate::application::config::PropertyConfig;
use crate::domain::entity::{
    Facilities, HomeDetails, HostelDetails, Owner, Parking, Property, PropertyDetails,
};
use crate::domain::repository::{ImageStore, PropertyRepository};
use crate::domain::value_object::{ImageRef, Price, PropertyKind, SharedBy};
use crate::error::{PropertyError, PropertyResult};

/// One uploaded file
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Raw form values. Fields of the variant that does not match `kind` are
/// ignored.
#[derive(Debug, Clone, Default)]
pub struct CreatePropertyInput {
    pub title: String,
    pub location: String,
    pub price: String,
    pub kind: String,
    pub owner_name: String,
    pub owner_contact: String,
    // home
    pub property_type: Option<String>,
    pub facing: Option<String>,
    pub floor: Option<String>,
    pub carpet_area: Option<String>,
    /// JSON `{car, bike}`
    pub parking: Option<String>,
    // hostel
    pub shared_by: Option<String>,
    /// JSON `{food, wifi, transport, laundry}`
    pub facilities: Option<String>,
    pub images: Vec<ImageUpload>,
}

/// Validated form, ready to be combined with stored images
struct Draft {
    title: String,
    price: Price,
    location: String,
    owner: Owner,
    details: PropertyDetails,
}

pub struct CreatePropertyUseCase<R, S>
where
    R: PropertyRepository,
    S: ImageStore,
{
    repo: Arc<R>,
    images: Arc<S>,
    config: Arc<PropertyConfig>,
}

impl<R, S> CreatePropertyUseCase<R, S>
where
    R: PropertyRepository,
    S: ImageStore,
{
    pub fn new(repo: Arc<R>, images: Arc<S>, config: Arc<PropertyConfig>) -> Self {
        Self {
            repo,
            images,
            config,
        }
    }

    pub async fn execute(
        &self,
        created_by: &UserId,
        input: CreatePropertyInput,
    ) -> PropertyResult<Property> {
        if input.images.len() > self.config.max_images {
            return Err(PropertyError::TooManyImages {
                max: self.config.max_images,
            });
        }
        if input
            .images
            .iter()
            .any(|image| image.bytes.len() > self.config.max_image_bytes)
        {
            return Err(PropertyError::ImageTooLarge {
                max_bytes: self.config.max_image_bytes,
            });
        }

        let draft = validate(&input)?;

        let mut stored: Vec<ImageRef> = Vec::with_capacity(input.images.len());
        for upload in &input.images {
            match self
                .images
                .store_image(&upload.bytes, &upload.file_name)
                .await
            {
                Ok(image) => stored.push(image),
                Err(e) => {
                    discard_images(self.images.as_ref(), &stored).await;
                    return Err(e);
                }
            }
        }

        let property = Property::new(
            draft.title,
            draft.price,
            draft.location,
            draft.owner,
            draft.details,
            stored,
            *created_by,
        );

        if let Err(e) = self.repo.create_property(&property).await {
            discard_images(self.images.as_ref(), &property.images).await;
            return Err(e);
        }

        tracing::info!(
            property_id = %property.property_id,
            created_by = %property.created_by,
            kind = %property.kind(),
            images = property.images.len(),
            "Property created"
        );

        Ok(property)
    }
}

fn required(value: &str, field: &str) -> PropertyResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(PropertyError::Validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

/// Blank optional text counts as absent
fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Absent or blank JSON flag objects fall back to all-false
fn flags<T>(value: &Option<String>, field: &str) -> PropertyResult<T>
where
    T: serde::de::DeserializeOwned + Default,
{
    match value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(T::default()),
        Some(json) => serde_json::from_str(json)
            .map_err(|_| PropertyError::Validation(format!("Invalid {field} data"))),
    }
}

fn validate(input: &CreatePropertyInput) -> PropertyResult<Draft> {
    let title = required(&input.title, "Title")?;
    let location = required(&input.location, "Location")?;
    let price = Price::parse(&input.price)?;
    let kind: PropertyKind = input.kind.parse()?;
    let owner = Owner::new(&input.owner_name, &input.owner_contact)?;

    let details = match kind {
        PropertyKind::Home => PropertyDetails::Home(HomeDetails {
            property_type: optional(&input.property_type),
            facing: optional(&input.facing),
            floor: optional(&input.floor),
            carpet_area: optional(&input.carpet_area),
            parking: flags::<Parking>(&input.parking, "parking")?,
        }),
        PropertyKind::Hostel => PropertyDetails::Hostel(HostelDetails {
            shared_by: optional(&input.shared_by)
                .map(|s| s.parse::<SharedBy>())
                .transpose()?,
            facilities: flags::<Facilities>(&input.facilities, "facilities")?,
        }),
    };

    Ok(Draft {
        title,
        price,
        location,
        owner,
        details,
    })
}
