use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::car::Car;

/// Request para crear un nuevo coche (solo admin)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCarRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    pub category_id: Option<Uuid>,

    #[validate(range(min = 1, max = 20))]
    pub seats: Option<i32>,

    #[validate(range(min = 1, max = 10))]
    pub doors: Option<i32>,

    pub transmission: Option<String>,
    pub fuel_type: Option<String>,

    #[serde(default)]
    pub has_ac: bool,

    pub price_per_day: Decimal,

    #[serde(default = "default_available")]
    pub available: bool,

    pub image_url: Option<String>,
}

fn default_available() -> bool {
    true
}

/// Request para actualizar un coche existente (solo admin)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCarRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    pub category_id: Option<Uuid>,

    #[validate(range(min = 1, max = 20))]
    pub seats: Option<i32>,

    #[validate(range(min = 1, max = 10))]
    pub doors: Option<i32>,

    pub transmission: Option<String>,
    pub fuel_type: Option<String>,
    pub has_ac: Option<bool>,
    pub price_per_day: Option<Decimal>,
    pub available: Option<bool>,
    pub image_url: Option<String>,
}

/// Query de disponibilidad por ventana de fechas
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Response de coche para la API, con la categoría resuelta
#[derive(Debug, Serialize, FromRow)]
pub struct CarResponse {
    pub id: Uuid,
    pub name: String,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub seats: Option<i32>,
    pub doors: Option<i32>,
    pub transmission: Option<String>,
    pub fuel_type: Option<String>,
    pub has_ac: bool,
    pub price_per_day: Decimal,
    pub available: bool,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        Self {
            id: car.id,
            name: car.name,
            category_id: car.category_id,
            category_name: None,
            seats: car.seats,
            doors: car.doors,
            transmission: car.transmission,
            fuel_type: car.fuel_type,
            has_ac: car.has_ac,
            price_per_day: car.price_per_day,
            available: car.available,
            image_url: car.image_url,
            created_at: car.created_at,
            updated_at: car.updated_at,
        }
    }
}
