//! Controller de reservas
//!
//! Contiene el motor de admisión (creación de reservas) y el gestor del
//! ciclo de vida (transiciones de estado iniciadas por un administrador).
//!
//! Toda la admisión se ejecuta en una única transacción. Las filas del
//! usuario y del coche se bloquean con `FOR UPDATE`, de modo que dos
//! peticiones concurrentes sobre el mismo usuario o el mismo coche se
//! serializan antes de los chequeos de reserva activa y de solape: o
//! pasan todos los chequeos y se escribe exactamente una fila, o no se
//! escribe nada.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::booking_dto::{
    AdminBookingResponse, BookingResponse, CreateBookingRequest, UserBookingResponse,
};
use crate::models::booking::BookingStatus;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::car_repository::CarRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{validation_error, AppError};
use crate::utils::validation::validate_date_range;

const MS_PER_DAY: i64 = 86_400_000;

/// Días facturables de un alquiler: un día parcial cuenta como día entero.
pub(crate) fn rental_days(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let ms = (end - start).num_milliseconds();
    (ms + MS_PER_DAY - 1) / MS_PER_DAY
}

/// Precio total: días facturables por precio por día, en decimal fijo.
/// Se calcula una sola vez con el precio vigente del coche y no se
/// recalcula nunca.
pub(crate) fn compute_total_price(price_per_day: Decimal, days: i64) -> Decimal {
    price_per_day * Decimal::from(days)
}

pub struct BookingController {
    pool: PgPool,
    repository: BookingRepository,
}

impl BookingController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: BookingRepository::new(pool.clone()),
            pool,
        }
    }

    /// Admisión de una reserva nueva.
    ///
    /// Orden de chequeos: reserva activa del usuario, existencia del
    /// coche, flag de disponibilidad, solape con reservas aprobadas.
    /// Las reservas pendientes de otros usuarios NO bloquean: el
    /// conflicto se resuelve en la aprobación.
    pub async fn create(
        &self,
        user_id: Uuid,
        request: CreateBookingRequest,
    ) -> Result<BookingResponse, AppError> {
        request.validate()?;

        validate_date_range(request.start_date, request.end_date).map_err(|_| {
            validation_error("start_date", "start date must be strictly before end date")
        })?;

        if !request.is_over_18 {
            return Err(validation_error(
                "is_over_18",
                "you must confirm that you are over 18",
            ));
        }

        let mut tx = self.pool.begin().await?;

        // Serializar admisiones del mismo usuario
        if !UserRepository::lock_row(&mut tx, user_id).await? {
            return Err(AppError::Unauthorized("User no longer exists".to_string()));
        }

        if BookingRepository::user_has_active(&mut tx, user_id).await? {
            return Err(AppError::ActiveBookingExists);
        }

        // Catálogo: existencia + flag + precio, con la fila del coche
        // bloqueada para serializar admisiones del mismo coche
        let (available, price_per_day) =
            CarRepository::lock_availability_and_price(&mut tx, request.car_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        if !available {
            return Err(AppError::CarUnavailable);
        }

        if BookingRepository::has_overlap(
            &mut tx,
            request.car_id,
            request.start_date,
            request.end_date,
            &BookingStatus::BLOCKING,
            None,
        )
        .await?
        {
            return Err(AppError::DateConflict);
        }

        let days = rental_days(request.start_date, request.end_date);
        let total_price = compute_total_price(price_per_day, days);

        let booking = BookingRepository::insert(
            &mut tx,
            user_id,
            request.car_id,
            request.start_date,
            request.end_date,
            total_price,
            request.is_over_18,
            request.driving_license_number,
        )
        .await?;

        tx.commit().await?;

        info!(
            "📝 Reserva {} creada: usuario {} coche {} ({} días, total {})",
            booking.id, user_id, booking.car_id, days, booking.total_price
        );

        Ok(booking.into())
    }

    /// Transición de estado iniciada por un administrador.
    ///
    /// Modelo permisivo: cualquier transición está permitida excepto la
    /// no-op. Al aprobar se re-chequea el solape contra las demás
    /// reservas aprobadas del coche; el flag de disponibilidad no se
    /// re-consulta.
    pub async fn update_status(
        &self,
        booking_id: Uuid,
        new_status: BookingStatus,
    ) -> Result<BookingResponse, AppError> {
        let mut tx = self.pool.begin().await?;

        let booking = BookingRepository::find_by_id_for_update(&mut tx, booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        if booking.status == new_status {
            return Err(AppError::NoOpTransition);
        }

        if new_status == BookingStatus::Approved {
            // Mismo bloqueo de coche que en la admisión, para que una
            // aprobación y una admisión concurrentes se serialicen
            CarRepository::lock_availability_and_price(&mut tx, booking.car_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

            if BookingRepository::has_overlap(
                &mut tx,
                booking.car_id,
                booking.start_date,
                booking.end_date,
                &BookingStatus::BLOCKING,
                Some(booking.id),
            )
            .await?
            {
                return Err(AppError::DateConflict);
            }
        }

        let updated = BookingRepository::set_status(&mut tx, booking_id, new_status).await?;

        tx.commit().await?;

        info!(
            "🔄 Reserva {}: {} -> {}",
            booking_id, booking.status, new_status
        );

        Ok(updated.into())
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<UserBookingResponse>, AppError> {
        self.repository.list_by_user(user_id).await
    }

    pub async fn list_all(&self) -> Result<Vec<AdminBookingResponse>, AppError> {
        self.repository.list_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn two_whole_days_cost_two_daily_rates() {
        // Escenario de referencia: 50/día, 2024-06-01 -> 2024-06-03
        let days = rental_days(day(1), day(3));
        assert_eq!(days, 2);

        let total = compute_total_price(dec("50.00"), days);
        assert_eq!(total, dec("100.00"));
    }

    #[test]
    fn partial_day_rounds_up_to_full_day() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 6, 2, 12, 0, 0).unwrap();
        assert_eq!(rental_days(start, end), 2);
    }

    #[test]
    fn single_millisecond_counts_as_one_day() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let end = start + chrono::Duration::milliseconds(1);
        assert_eq!(rental_days(start, end), 1);
    }

    #[test]
    fn exact_day_boundary_does_not_round_up() {
        assert_eq!(rental_days(day(1), day(8)), 7);
    }

    #[test]
    fn decimal_price_has_no_float_drift() {
        // 0.10 * 3 días == 0.30 exacto en decimal fijo
        let total = compute_total_price(dec("0.10"), 3);
        assert_eq!(total, dec("0.30"));

        let total = compute_total_price(dec("33.33"), 3);
        assert_eq!(total, dec("99.99"));
    }
}
