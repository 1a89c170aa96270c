//! Modelo de Car
//!
//! Este módulo contiene el struct Car. Mapea exactamente a la tabla
//! cars del schema PostgreSQL.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Car principal - mapea exactamente a la tabla cars
///
/// `available` es un interruptor administrativo, independiente de las
/// reservas existentes. Los atributos descriptivos no afectan a la
/// lógica de admisión; solo `available` y `price_per_day` participan.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Car {
    pub id: Uuid,
    pub name: String,
    pub category_id: Option<Uuid>,
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
