//! HTTP Handlers

use auth::AuthenticatedUser;
use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use kernel::id::PropertyId;
use std::sync::Arc;

use crate::application::config::PropertyConfig;
use crate::application::{
    CreatePropertyInput, CreatePropertyUseCase, DeletePropertyUseCase, FindPropertyUseCase,
    ImageUpload, ListPropertiesUseCase,
};
use crate::domain::repository::{ImageStore, PropertyRepository};
use crate::domain::value_object::PropertyFilter;
use crate::error::{PropertyError, PropertyResult};
use crate::presentation::dto::{
    CreatePropertyResponse, ListQuery, MessageResponse, PropertyListResponse, PropertyResponse,
};

/// Shared state for property handlers
#[derive(Clone)]
pub struct PropertyAppState<R, S>
where
    R: PropertyRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub images: Arc<S>,
    pub config: Arc<PropertyConfig>,
}

/// A malformed id cannot name a stored listing.
fn parse_id(raw: &str) -> PropertyResult<PropertyId> {
    raw.parse().map_err(|_| PropertyError::NotFound)
}

/// GET /api/properties
pub async fn list_properties<R, S>(
    State(state): State<PropertyAppState<R, S>>,
    Query(query): Query<ListQuery>,
) -> PropertyResult<Json<PropertyListResponse>>
where
    R: PropertyRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let filter = PropertyFilter::new(query.location.as_deref(), query.kind.as_deref());
    let properties = ListPropertiesUseCase::new(state.repo.clone())
        .execute(&filter)
        .await?;

    Ok(Json(PropertyListResponse {
        success: true,
        properties: properties.iter().map(PropertyResponse::from).collect(),
    }))
}

/// GET /api/properties/{id}
pub async fn get_property<R, S>(
    State(state): State<PropertyAppState<R, S>>,
    Path(id): Path<String>,
) -> PropertyResult<Json<PropertyResponse>>
where
    R: PropertyRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let property_id = parse_id(&id)?;
    let property = FindPropertyUseCase::new(state.repo.clone())
        .execute(&property_id)
        .await?;
    Ok(Json(PropertyResponse::from(&property)))
}

/// POST /api/properties/add (multipart)
pub async fn add_property<R, S>(
    State(state): State<PropertyAppState<R, S>>,
    caller: AuthenticatedUser,
    mut multipart: Multipart,
) -> PropertyResult<(StatusCode, Json<CreatePropertyResponse>)>
where
    R: PropertyRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let input = read_form(&mut multipart, &state.config).await?;

    let property =
        CreatePropertyUseCase::new(state.repo.clone(), state.images.clone(), state.config.clone())
            .execute(&caller.user_id, input)
            .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePropertyResponse {
            success: true,
            message: "Property uploaded successfully!".to_string(),
            property: PropertyResponse::from(&property),
        }),
    ))
}

/// DELETE /api/properties/{id}
pub async fn delete_property<R, S>(
    State(state): State<PropertyAppState<R, S>>,
    caller: AuthenticatedUser,
    Path(id): Path<String>,
) -> PropertyResult<Json<MessageResponse>>
where
    R: PropertyRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let property_id = parse_id(&id)?;
    DeletePropertyUseCase::new(state.repo.clone(), state.images.clone())
        .execute(&caller.user_id, &property_id)
        .await?;
    Ok(Json(MessageResponse::new("Property deleted successfully!")))
}

/// Collects the upload form. Files arrive under `images`; everything else
/// is text. The image count is checked while reading so surplus files are
/// never buffered.
async fn read_form(
    multipart: &mut Multipart,
    config: &PropertyConfig,
) -> PropertyResult<CreatePropertyInput> {
    let mut input = CreatePropertyInput::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if name == "images" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await?;
            // Browsers send an empty part when no file was picked.
            if file_name.is_empty() && bytes.is_empty() {
                continue;
            }
            if input.images.len() >= config.max_images {
                return Err(PropertyError::TooManyImages {
                    max: config.max_images,
                });
            }
            input.images.push(ImageUpload {
                file_name,
                bytes: bytes.to_vec(),
            });
            continue;
        }

        let value = field.text().await?;
        match name.as_str() {
            "title" => input.title = value,
            "location" => input.location = value,
            "price" => input.price = value,
            "type" => input.kind = value,
            "ownerName" => input.owner_name = value,
            "ownerContact" => input.owner_contact = value,
            "propertyType" => input.property_type = Some(value),
            "facing" => input.facing = Some(value),
            "floor" => input.floor = Some(value),
            "carpetArea" => input.carpet_area = Some(value),
            "parking" => input.parking = Some(value),
            "sharedBy" => input.shared_by = Some(value),
            "facilities" => input.facilities = Some(value),
            other => tracing::debug!(field = %other, "Ignoring unknown form field"),
        }
    }

    Ok(input)
}
