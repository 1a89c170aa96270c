//! Modelo de Booking
//!
//! Este módulo contiene el struct Booking y el enum de estados del
//! ciclo de vida. Mapea exactamente a la tabla bookings del schema
//! PostgreSQL con el ENUM booking_status.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado de la reserva - mapea al ENUM booking_status
///
/// `pending` es el estado inicial. Las transiciones las inicia un
/// administrador; el modelo es permisivo (cualquier transición excepto
/// la no-op está permitida, incluso salir de `completed`/`cancelled`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Completed,
    Cancelled,
}

impl sqlx::postgres::PgHasArrayType for BookingStatus {
    fn array_type_info() -> sqlx::postgres::PgTypeInfo {
        sqlx::postgres::PgTypeInfo::with_name("_booking_status")
    }
}

impl BookingStatus {
    /// Estados que cuentan para el límite de "una reserva activa por usuario"
    pub const ACTIVE: [BookingStatus; 2] = [BookingStatus::Pending, BookingStatus::Approved];

    /// Solo las reservas aprobadas bloquean fechas de un coche
    pub const BLOCKING: [BookingStatus; 1] = [BookingStatus::Approved];

    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Approved)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "pending"),
            BookingStatus::Approved => write!(f, "approved"),
            BookingStatus::Completed => write!(f, "completed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Booking principal - mapea exactamente a la tabla bookings
///
/// `total_price` se calcula una sola vez en la admisión y nunca se
/// recalcula, aunque el precio del coche cambie después.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_and_approved_are_active() {
        assert!(BookingStatus::Pending.is_active());
        assert!(BookingStatus::Approved.is_active());
        assert!(!BookingStatus::Completed.is_active());
        assert!(!BookingStatus::Cancelled.is_active());
    }

    #[test]
    fn status_display_matches_db_representation() {
        assert_eq!(BookingStatus::Pending.to_string(), "pending");
        assert_eq!(BookingStatus::Approved.to_string(), "approved");
        assert_eq!(BookingStatus::Completed.to_string(), "completed");
        assert_eq!(BookingStatus::Cancelled.to_string(), "cancelled");
    }
}
