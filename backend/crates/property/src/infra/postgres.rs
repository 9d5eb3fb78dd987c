//! PostgreSQL Repository Implementation
//!
//! Variant blocks are flattened into nullable `home_*` / `hostel_*` columns;
//! a CHECK constraint keeps exactly the block matching `kind` populated.

use chrono::{DateTime, Utc};
use kernel::id::{PropertyId, UserId};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::entity::{
    Facilities, HomeDetails, HostelDetails, Owner, Parking, Property, PropertyDetails,
};
use crate::domain::repository::PropertyRepository;
use crate::domain::value_object::{ImageRef, Price, PropertyFilter, PropertyKind, SharedBy};
use crate::error::{PropertyError, PropertyResult};

/// PostgreSQL-backed property repository
#[derive(Clone)]
pub struct PgPropertyRepository {
    pool: PgPool,
}

impl PgPropertyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PROPERTY_COLUMNS: &str = r#"
    property_id,
    title,
    price,
    location,
    kind,
    owner_name,
    owner_contact,
    images,
    created_by,
    home_property_type,
    home_facing,
    home_floor,
    home_carpet_area,
    home_parking_car,
    home_parking_bike,
    hostel_shared_by,
    hostel_food,
    hostel_wifi,
    hostel_transport,
    hostel_laundry,
    created_at
"#;

/// `%` and `_` in user input are literals, not wildcards
fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

impl PropertyRepository for PgPropertyRepository {
    async fn create_property(&self, property: &Property) -> PropertyResult<()> {
        let home = property.details.home();
        let hostel = property.details.hostel();
        let images: Vec<String> = property
            .images
            .iter()
            .map(|image| image.as_str().to_string())
            .collect();

        sqlx::query(&format!(
            "INSERT INTO properties ({PROPERTY_COLUMNS}) VALUES \
             ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21)"
        ))
        .bind(property.property_id.as_uuid())
        .bind(&property.title)
        .bind(property.price.value())
        .bind(&property.location)
        .bind(property.kind().as_str())
        .bind(&property.owner.name)
        .bind(&property.owner.contact)
        .bind(images)
        .bind(property.created_by.as_uuid())
        .bind(home.and_then(|h| h.property_type.as_deref()))
        .bind(home.and_then(|h| h.facing.as_deref()))
        .bind(home.and_then(|h| h.floor.as_deref()))
        .bind(home.and_then(|h| h.carpet_area.as_deref()))
        .bind(home.map(|h| h.parking.car))
        .bind(home.map(|h| h.parking.bike))
        .bind(hostel.and_then(|h| h.shared_by.map(|s| s.as_str())))
        .bind(hostel.map(|h| h.facilities.food))
        .bind(hostel.map(|h| h.facilities.wifi))
        .bind(hostel.map(|h| h.facilities.transport))
        .bind(hostel.map(|h| h.facilities.laundry))
        .bind(property.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_property(&self, property_id: &PropertyId) -> PropertyResult<Option<Property>> {
        let row = sqlx::query_as::<_, PropertyRow>(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties WHERE property_id = $1"
        ))
        .bind(property_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(PropertyRow::into_property).transpose()
    }

    async fn delete_property(&self, property_id: &PropertyId) -> PropertyResult<bool> {
        let deleted = sqlx::query("DELETE FROM properties WHERE property_id = $1")
            .bind(property_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted == 1)
    }

    async fn list_properties(&self, filter: &PropertyFilter) -> PropertyResult<Vec<Property>> {
        let mut query: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("SELECT {PROPERTY_COLUMNS} FROM properties WHERE TRUE"));

        if let Some(location) = filter.location() {
            query
                .push(" AND location ILIKE ")
                .push_bind(like_pattern(location))
                .push(" ESCAPE '\\'");
        }
        if let Some(kind) = filter.kind() {
            query.push(" AND kind = ").push_bind(kind.as_str());
        }
        query.push(" ORDER BY created_at, property_id");

        let rows = query
            .build_query_as::<PropertyRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(PropertyRow::into_property).collect()
    }
}

// ============================================================================
// Row type
// ============================================================================

#[derive(sqlx::FromRow)]
struct PropertyRow {
    property_id: Uuid,
    title: String,
    price: f64,
    location: String,
    kind: String,
    owner_name: String,
    owner_contact: String,
    images: Vec<String>,
    created_by: Uuid,
    home_property_type: Option<String>,
    home_facing: Option<String>,
    home_floor: Option<String>,
    home_carpet_area: Option<String>,
    home_parking_car: Option<bool>,
    home_parking_bike: Option<bool>,
    hostel_shared_by: Option<String>,
    hostel_food: Option<bool>,
    hostel_wifi: Option<bool>,
    hostel_transport: Option<bool>,
    hostel_laundry: Option<bool>,
    created_at: DateTime<Utc>,
}

impl PropertyRow {
    fn into_property(self) -> PropertyResult<Property> {
        let id = self.property_id;
        let corrupt =
            move |what: &str| PropertyError::Internal(format!("property {id} has invalid {what}"));

        let kind = PropertyKind::parse(&self.kind).ok_or_else(|| corrupt("kind"))?;
        let price = Price::new(self.price).map_err(|_| corrupt("price"))?;
        let details = match kind {
            PropertyKind::Home => PropertyDetails::Home(HomeDetails {
                property_type: self.home_property_type,
                facing: self.home_facing,
                floor: self.home_floor,
                carpet_area: self.home_carpet_area,
                parking: Parking {
                    car: self.home_parking_car.unwrap_or_default(),
                    bike: self.home_parking_bike.unwrap_or_default(),
                },
            }),
            PropertyKind::Hostel => PropertyDetails::Hostel(HostelDetails {
                shared_by: self
                    .hostel_shared_by
                    .as_deref()
                    .map(str::parse::<SharedBy>)
                    .transpose()
                    .map_err(|_| corrupt("shared_by"))?,
                facilities: Facilities {
                    food: self.hostel_food.unwrap_or_default(),
                    wifi: self.hostel_wifi.unwrap_or_default(),
                    transport: self.hostel_transport.unwrap_or_default(),
                    laundry: self.hostel_laundry.unwrap_or_default(),
                },
            }),
        };

        Ok(Property {
            property_id: PropertyId::from_uuid(self.property_id),
            title: self.title,
            price,
            location: self.location,
            owner: Owner {
                name: self.owner_name,
                contact: self.owner_contact,
            },
            images: self.images.into_iter().map(ImageRef::from_db).collect(),
            created_by: UserId::from_uuid(self.created_by),
            details,
            created_at: self.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("park"), "%park%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
