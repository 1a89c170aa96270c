use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::booking::{Booking, BookingStatus};

/// Request para crear una reserva
///
/// `is_over_18` se comprueba en el controller (validator no cubre
/// booleanos que deban ser true).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    pub car_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_over_18: bool,

    #[validate(custom = "crate::utils::validation::validate_not_empty")]
    pub driving_license_number: String,
}

/// Request para cambiar el estado de una reserva (solo admin)
#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

/// Response de reserva para la API
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub car_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub is_over_18: bool,
    pub driving_license_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response de reserva para el listado del propio usuario,
/// con los datos del coche resueltos
#[derive(Debug, Serialize, FromRow)]
pub struct UserBookingResponse {
    pub id: Uuid,
    pub car_id: Uuid,
    pub car_name: String,
    pub car_image_url: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// Response de reserva para el listado de administración,
/// con usuario y coche resueltos
#[derive(Debug, Serialize, FromRow)]
pub struct AdminBookingResponse {
    pub id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub is_over_18: bool,
    pub driving_license_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub user_full_name: String,
    pub user_email: String,
    pub car_id: Uuid,
    pub car_name: String,
    pub price_per_day: Decimal,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            user_id: booking.user_id,
            car_id: booking.car_id,
            start_date: booking.start_date,
            end_date: booking.end_date,
            total_price: booking.total_price,
            status: booking.status,
            is_over_18: booking.is_over_18,
            driving_license_number: booking.driving_license_number,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}
